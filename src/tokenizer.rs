//! Delimiter scanning shared by the precompiled and fused render paths.

use std::ops::Range;

use log::trace;
use memchr::memmem;

use crate::err::{Error, Result};

/// Outcome of scanning for the boundary of a single tag.
pub(crate) enum TagBounds {
    /// A terminated tag: `content` spans the raw (untrimmed) tag text,
    /// `resume` is the offset just past the closing delimiter.
    Found { content: Range<usize>, resume: usize },
    /// No closing delimiter remains for the tag opened at `opened_at`.
    Unterminated { opened_at: usize },
}

/// Locate the boundary of the tag whose start delimiter sits at `open`.
///
/// Inner start markers occurring before the nearest end marker belong to the
/// tag content; the scan advances past each one and re-compares until the end
/// marker is nearer. Within the window bounded by the next start marker (or
/// the end of the template), the last end-marker occurrence closes the tag.
pub(crate) fn scan_tag(src: &[u8], start: &[u8], end: &[u8], open: usize) -> TagBounds {
    let content_start = open + start.len();
    let mut cursor = content_start;

    loop {
        let next_start = memmem::find(&src[cursor..], start);
        let next_end = memmem::find(&src[cursor..], end);
        match (next_start, next_end) {
            (Some(s), Some(e)) if s < e => cursor += s + start.len(),
            _ => break,
        }
    }

    let mut window = match memmem::find(&src[cursor..], start) {
        Some(s) => s,
        None => src.len() - cursor,
    };

    if start == end {
        // Identical delimiters: the nearest-occurrence comparison above cannot
        // tell a closing marker from the next tag's opening marker. Take the
        // window up to the second occurrence past the one just found, falling
        // back to the end of the template.
        let rest_at = cursor + window + start.len();
        let rest = if rest_at <= src.len() {
            &src[rest_at..]
        } else {
            &[][..]
        };
        window = match second_occurrence(rest, start) {
            Some(n) => n,
            None => src.len() - cursor,
        };
    }

    match memmem::rfind(&src[cursor..cursor + window], end) {
        Some(n) => TagBounds::Found {
            content: content_start..cursor + n,
            resume: cursor + n + end.len(),
        },
        None => TagBounds::Unterminated { opened_at: open },
    }
}

/// Split `source` into interleaved fragment and tag byte ranges such that
/// `fragments[0] tags[0] fragments[1] .. tags[n-1] fragments[n]` reproduces
/// the template. Tag ranges are trimmed of surrounding whitespace.
///
/// Previous contents of `fragments`/`tags` are fully replaced; allocated
/// capacity is reused. On error both lists are left empty.
pub(crate) fn tokenize(
    source: &str,
    start: &str,
    end: &str,
    fragments: &mut Vec<Range<usize>>,
    tags: &mut Vec<Range<usize>>,
) -> Result<()> {
    fragments.clear();
    tags.clear();

    if start.is_empty() {
        return Err(Error::EmptyStartDelimiter);
    }
    if end.is_empty() {
        return Err(Error::EmptyEndDelimiter);
    }

    let src = source.as_bytes();
    let start_b = start.as_bytes();
    let end_b = end.as_bytes();

    let tag_hint = memmem::find_iter(src, start_b).count();
    if tag_hint == 0 {
        fragments.push(0..src.len());
        return Ok(());
    }
    fragments.reserve(tag_hint + 1);
    tags.reserve(tag_hint);

    let mut pos = 0;
    loop {
        match memmem::find(&src[pos..], start_b) {
            None => {
                fragments.push(pos..src.len());
                break;
            }
            Some(n) => {
                let open = pos + n;
                fragments.push(pos..open);
                match scan_tag(src, start_b, end_b, open) {
                    TagBounds::Found { content, resume } => {
                        tags.push(trim_range(source, content));
                        pos = resume;
                    }
                    TagBounds::Unterminated { opened_at } => {
                        fragments.clear();
                        tags.clear();
                        return Err(Error::UnterminatedTag {
                            delimiter: end.to_owned(),
                            offset: opened_at,
                        });
                    }
                }
            }
        }
    }

    trace!(
        "tokenized {} byte template into {} tags",
        src.len(),
        tags.len()
    );
    Ok(())
}

/// Shrink `range` so that `&source[range]` carries no surrounding whitespace.
fn trim_range(source: &str, range: Range<usize>) -> Range<usize> {
    let raw = &source[range.clone()];
    let begin = range.start + (raw.len() - raw.trim_start().len());
    begin..begin + raw.trim().len()
}

/// Index of the second occurrence of `needle` in `haystack` (occurrences may
/// overlap), or `None` if there are fewer than two.
fn second_occurrence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let first = memmem::find(haystack, needle)?;
    let from = first + 1;
    memmem::find(&haystack[from..], needle).map(|n| from + n)
}
