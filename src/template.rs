//! The parsed template artifact and the precompiled render path.

use std::io::{self, Write};
use std::ops::Range;

use log::trace;

use crate::err::{Error, Result};
use crate::pool::{BufferPool, render_to_string};
use crate::resolver::Resolver;
use crate::tokenizer;

/// A template parsed once and rendered many times.
///
/// Parsing copies the source text into the template and stores fragment and
/// tag boundaries as byte offsets into that copy, so a `Template` borrows
/// nothing from its caller.
///
/// A parsed `Template` may be rendered from any number of threads
/// concurrently; re-parsing via [`Template::reset`] takes `&mut self` and is
/// therefore exclusive.
///
/// ```
/// use stencil::{TagMap, Template, Value};
///
/// let template = Template::parse("Hello, {{name}}!", "{{", "}}")?;
///
/// let mut values = TagMap::default();
/// values.insert("name".to_owned(), Value::from("world"));
///
/// assert_eq!(template.render_string(&values)?, "Hello, world!");
/// # Ok::<(), stencil::Error>(())
/// ```
#[derive(Debug)]
pub struct Template {
    source: String,
    start: String,
    end: String,
    fragments: Vec<Range<usize>>,
    tags: Vec<Range<usize>>,
    pool: BufferPool,
}

impl Template {
    /// Parse `source`, treating text between `start` and `end` delimiters as
    /// tag names.
    pub fn parse(
        source: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<Self> {
        let mut template = Template {
            source: source.into(),
            start: start.into(),
            end: end.into(),
            fragments: Vec::new(),
            tags: Vec::new(),
            pool: BufferPool::new(),
        };
        tokenizer::tokenize(
            &template.source,
            &template.start,
            &template.end,
            &mut template.fragments,
            &mut template.tags,
        )?;
        Ok(template)
    }

    /// Re-parse in place, replacing all logical content while reusing the
    /// fragment and tag storage of the previous parse.
    ///
    /// On error the template is left logically empty; it never retains the
    /// shape of a previous parse.
    pub fn reset(
        &mut self,
        source: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<()> {
        self.source = source.into();
        self.start = start.into();
        self.end = end.into();
        tokenizer::tokenize(
            &self.source,
            &self.start,
            &self.end,
            &mut self.fragments,
            &mut self.tags,
        )
    }

    /// The template source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Literal text fragments, in template order.
    ///
    /// A well-formed template always has one more fragment than it has tags.
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|r| &self.source[r.clone()])
    }

    /// Parsed tag names (whitespace-trimmed), in template order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|r| &self.source[r.clone()])
    }

    /// Number of tags found by the parse.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Render by calling `tag_fn` for every tag occurrence, in template
    /// order.
    ///
    /// `tag_fn` writes the substitution for the given tag name to the sink
    /// and returns the number of bytes it wrote. Returns the total number of
    /// bytes written to `sink`; a sink failure aborts the render immediately,
    /// leaving whatever was already written in the sink.
    pub fn render_with<W, F>(&self, sink: &mut W, mut tag_fn: F) -> Result<u64>
    where
        W: Write,
        F: FnMut(&mut W, &str) -> io::Result<u64>,
    {
        let mut written = 0u64;

        // A template without tags renders as its literal source.
        if self.tags.is_empty() {
            write_chunk(sink, self.source.as_bytes(), &mut written)?;
            return Ok(written);
        }

        for (fragment, tag) in self.fragments.iter().zip(&self.tags) {
            write_chunk(sink, self.source[fragment.clone()].as_bytes(), &mut written)?;
            let n = tag_fn(sink, &self.source[tag.clone()])
                .map_err(|source| Error::SinkWrite { written, source })?;
            written += n;
        }
        let trailing = self.fragments[self.tags.len()].clone();
        write_chunk(sink, self.source[trailing].as_bytes(), &mut written)?;

        trace!("rendered {} bytes from {} tags", written, self.tags.len());
        Ok(written)
    }

    /// Render, substituting each tag with its value from `values`.
    ///
    /// Tags that `values` does not resolve are substituted with nothing.
    pub fn render<W: Write>(&self, sink: &mut W, values: &impl Resolver) -> Result<u64> {
        self.render_with(sink, |sink, tag| match values.resolve(tag) {
            Some(value) => value.write_to(sink, tag),
            None => Ok(0),
        })
    }

    /// Render to a pooled buffer and return the result as a `String`.
    ///
    /// A template without tags returns its source directly, bypassing the
    /// pool.
    pub fn render_string(&self, values: &impl Resolver) -> Result<String> {
        if self.tags.is_empty() {
            return Ok(self.source.clone());
        }
        render_to_string(&self.pool, |buf| self.render(buf, values))
    }

    /// [`Template::render_with`] against a pooled buffer, returning the
    /// result as a `String`.
    pub fn render_string_with<F>(&self, tag_fn: F) -> Result<String>
    where
        F: FnMut(&mut Vec<u8>, &str) -> io::Result<u64>,
    {
        if self.tags.is_empty() {
            return Ok(self.source.clone());
        }
        render_to_string(&self.pool, |buf| self.render_with(buf, tag_fn))
    }
}

/// Write a literal chunk, keeping the running byte count current for error
/// reporting.
pub(crate) fn write_chunk<W>(sink: &mut W, chunk: &[u8], written: &mut u64) -> Result<()>
where
    W: Write + ?Sized,
{
    sink.write_all(chunk).map_err(|source| Error::SinkWrite {
        written: *written,
        source,
    })?;
    *written += chunk.len() as u64;
    Ok(())
}
