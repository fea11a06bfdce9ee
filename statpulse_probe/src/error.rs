use std::io;

use thiserror::Error;

/// Why a probe could not produce a reading.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed {what}: {detail}")]
    Parse { what: &'static str, detail: String },
    #[error("{0} is unavailable on this system")]
    Unavailable(&'static str),
}
