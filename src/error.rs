use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the flat-file stores and form decoding.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a table file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be turned back into a record.
    #[error("malformed record in {path} at row {row}: {message}")]
    Malformed {
        path: PathBuf,
        row: usize,
        message: String,
    },

    #[error("missing form field '{0}'")]
    MissingField(&'static str),

    #[error("invalid value for '{field}': {value:?}")]
    InvalidField { field: &'static str, value: String },
}

impl Error {
    /// Whether the error was caused by what the client sent.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::InvalidField { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
