use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("start delimiter cannot be empty")]
    EmptyStartDelimiter,

    #[error("end delimiter cannot be empty")]
    EmptyEndDelimiter,

    #[error("cannot find end delimiter `{delimiter}` for the tag opened at byte {offset}")]
    UnterminatedTag { delimiter: String, offset: usize },

    #[error("writing to the output sink failed after {written} bytes: {source}")]
    SinkWrite { written: u64, source: io::Error },

    #[error("rendered output is not valid UTF-8: {source}")]
    OutputNotUtf8 { source: std::str::Utf8Error },
}
