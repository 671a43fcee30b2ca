//! Fused parse-and-render for templates used exactly once.
//!
//! These functions walk the template in a single left-to-right scan without
//! retaining fragment or tag storage, trading the ability to reuse the parse
//! for avoiding the [`Template`](crate::Template) allocations. Unlike the
//! precompiled path, an unterminated trailing tag is not an error here: with
//! no further input to recover against, the content is written out verbatim.

use std::io::{self, Write};

use log::trace;
use memchr::memmem;

use crate::err::{Error, Result};
use crate::pool::{BufferPool, render_to_string};
use crate::resolver::Resolver;
use crate::template::write_chunk;
use crate::tokenizer::{TagBounds, scan_tag};

/// Parse and render `source` in one scan, calling `tag_fn` per tag.
///
/// Equivalent to parsing a template and rendering it with the same callback,
/// except for the unterminated-tag leniency described in the module docs.
/// Returns the total number of bytes written to `sink`.
pub fn render_once_with<W, F>(
    source: &str,
    start: &str,
    end: &str,
    sink: &mut W,
    mut tag_fn: F,
) -> Result<u64>
where
    W: Write,
    F: FnMut(&mut W, &str) -> io::Result<u64>,
{
    if start.is_empty() {
        return Err(Error::EmptyStartDelimiter);
    }
    if end.is_empty() {
        return Err(Error::EmptyEndDelimiter);
    }

    let src = source.as_bytes();
    let (start_b, end_b) = (start.as_bytes(), end.as_bytes());

    let mut written = 0u64;
    let mut pos = 0;
    loop {
        let Some(n) = memmem::find(&src[pos..], start_b) else {
            write_chunk(sink, &src[pos..], &mut written)?;
            return Ok(written);
        };
        let open = pos + n;
        write_chunk(sink, &src[pos..open], &mut written)?;

        match scan_tag(src, start_b, end_b, open) {
            TagBounds::Found { content, resume } => {
                let name = source[content].trim();
                let n = tag_fn(sink, name).map_err(|e| Error::SinkWrite {
                    written,
                    source: e,
                })?;
                written += n;
                pos = resume;
            }
            TagBounds::Unterminated { opened_at } => {
                // No closing delimiter remains; emit the rest verbatim.
                trace!("unterminated tag at byte {}, rendering literally", opened_at);
                write_chunk(sink, &src[opened_at..], &mut written)?;
                return Ok(written);
            }
        }
    }
}

/// Parse and render `source` in one scan, substituting tags from `values`.
///
/// Tags that `values` does not resolve are substituted with nothing.
pub fn render_once<W: Write>(
    source: &str,
    start: &str,
    end: &str,
    sink: &mut W,
    values: &impl Resolver,
) -> Result<u64> {
    render_once_with(source, start, end, sink, |sink, tag| {
        match values.resolve(tag) {
            Some(value) => value.write_to(sink, tag),
            None => Ok(0),
        }
    })
}

/// One-shot render into a buffer from `pool`, returning the result as a
/// `String`.
///
/// A template in which the start delimiter never occurs is returned as-is
/// without touching the pool.
pub fn render_once_string(
    source: &str,
    start: &str,
    end: &str,
    pool: &BufferPool,
    values: &impl Resolver,
) -> Result<String> {
    render_once_string_with(source, start, end, pool, |sink, tag| {
        match values.resolve(tag) {
            Some(value) => value.write_to(sink, tag),
            None => Ok(0),
        }
    })
}

/// [`render_once_with`] against a buffer from `pool`, returning the result
/// as a `String`.
pub fn render_once_string_with<F>(
    source: &str,
    start: &str,
    end: &str,
    pool: &BufferPool,
    tag_fn: F,
) -> Result<String>
where
    F: FnMut(&mut Vec<u8>, &str) -> io::Result<u64>,
{
    if start.is_empty() {
        return Err(Error::EmptyStartDelimiter);
    }
    if end.is_empty() {
        return Err(Error::EmptyEndDelimiter);
    }
    if memmem::find(source.as_bytes(), start.as_bytes()).is_none() {
        return Ok(source.to_owned());
    }
    render_to_string(pool, |buf| render_once_with(source, start, end, buf, tag_fn))
}
