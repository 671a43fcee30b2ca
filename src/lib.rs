//! A fast (and safe) placeholder substitution template engine.
//!
//! A template is split once into literal text fragments and named tags, then
//! rendered any number of times with different substitution values, writing
//! straight into an [`std::io::Write`] sink. Substitution values are raw
//! bytes, text, or callbacks that write directly to the sink; tags without a
//! value render as empty output.
//!
//! ```
//! use stencil::{TagMap, Template, Value};
//!
//! let template = Template::parse("http://{{host}}/?q={{query}}", "{{", "}}")?;
//!
//! let mut values = TagMap::default();
//! values.insert("host".to_owned(), Value::from("example.com"));
//! values.insert("query".to_owned(), Value::from("x=1"));
//!
//! assert_eq!(template.render_string(&values)?, "http://example.com/?q=x=1");
//! # Ok::<(), stencil::Error>(())
//! ```
//!
//! Templates used exactly once can skip the intermediate parse storage with
//! the fused one-shot path:
//!
//! ```
//! use stencil::{TagMap, Value, render_once};
//!
//! let mut values = TagMap::default();
//! values.insert("name".to_owned(), Value::from("world"));
//!
//! let mut out = Vec::new();
//! let written = render_once("Hello, [name]!", "[", "]", &mut out, &values)?;
//!
//! assert_eq!(out, b"Hello, world!");
//! assert_eq!(written, out.len() as u64);
//! # Ok::<(), stencil::Error>(())
//! ```

mod err;
mod oneshot;
mod pool;
mod resolver;
mod template;
mod tokenizer;

pub use err::{Error, Result};
pub use oneshot::{render_once, render_once_string, render_once_string_with, render_once_with};
pub use pool::BufferPool;
pub use resolver::{Resolver, TagFn, TagMap, Value};
pub use template::Template;
