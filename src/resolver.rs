//! Per-render substitution sources.

use std::borrow::Cow;
use std::fmt;
use std::hash::BuildHasher;
use std::io::{self, Write};

use hashbrown::HashMap as FastMap;

/// Callback substitution value.
///
/// The callback writes arbitrary content for a tag directly to the output
/// sink and returns the number of bytes it wrote. It must be safe to call
/// from concurrently running renders.
pub type TagFn = dyn Fn(&mut dyn Write, &str) -> io::Result<u64> + Send + Sync;

/// Map from tag name to substitution value.
pub type TagMap<'v> = FastMap<String, Value<'v>, ahash::RandomState>;

/// A substitution value for a single tag.
///
/// Absence of a value is expressed by the resolver returning `None`, not by a
/// variant here; unresolved tags render as empty output.
pub enum Value<'v> {
    /// Raw bytes, written to the sink verbatim.
    Bytes(Cow<'v, [u8]>),
    /// Text, written to the sink verbatim.
    Text(Cow<'v, str>),
    /// A callback that writes the substitution itself.
    Func(Box<TagFn>),
}

impl Value<'_> {
    /// Wrap a callback as a substitution value.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Write, &str) -> io::Result<u64> + Send + Sync + 'static,
    {
        Value::Func(Box::new(f))
    }

    /// Write this value for `tag` to `sink`, reporting bytes written.
    pub(crate) fn write_to(&self, sink: &mut dyn Write, tag: &str) -> io::Result<u64> {
        match self {
            Value::Bytes(bytes) => {
                sink.write_all(bytes)?;
                Ok(bytes.len() as u64)
            }
            Value::Text(text) => {
                sink.write_all(text.as_bytes())?;
                Ok(text.len() as u64)
            }
            Value::Func(f) => f(sink, tag),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            Value::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Value::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl<'v> From<&'v str> for Value<'v> {
    fn from(text: &'v str) -> Self {
        Value::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Value<'static> {
    fn from(text: String) -> Self {
        Value::Text(Cow::Owned(text))
    }
}

impl<'v> From<&'v [u8]> for Value<'v> {
    fn from(bytes: &'v [u8]) -> Self {
        Value::Bytes(Cow::Borrowed(bytes))
    }
}

impl From<Vec<u8>> for Value<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(Cow::Owned(bytes))
    }
}

/// Per-render source of truth mapping tag names to substitution values.
///
/// Returning `None` is not an error: the tag renders as empty output.
pub trait Resolver {
    /// Look up the value for a (whitespace-trimmed) tag name.
    fn resolve(&self, tag: &str) -> Option<&Value<'_>>;
}

impl<'v, S: BuildHasher> Resolver for FastMap<String, Value<'v>, S> {
    fn resolve(&self, tag: &str) -> Option<&Value<'_>> {
        self.get(tag)
    }
}

impl<'k, 'v, S: BuildHasher> Resolver for FastMap<&'k str, Value<'v>, S> {
    fn resolve(&self, tag: &str) -> Option<&Value<'_>> {
        self.get(tag)
    }
}

impl<'v, S: BuildHasher> Resolver for std::collections::HashMap<String, Value<'v>, S> {
    fn resolve(&self, tag: &str) -> Option<&Value<'_>> {
        self.get(tag)
    }
}

impl<'k, 'v, S: BuildHasher> Resolver for std::collections::HashMap<&'k str, Value<'v>, S> {
    fn resolve(&self, tag: &str) -> Option<&Value<'_>> {
        self.get(tag)
    }
}

/// Resolves nothing; every tag is treated as absent.
impl Resolver for () {
    fn resolve(&self, _tag: &str) -> Option<&Value<'_>> {
        None
    }
}
