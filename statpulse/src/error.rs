//! Error types shared across the session.

use std::io;

use thiserror::Error;

use crate::kind::MetricKind;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("no runtime to spawn the worker on: {0}")]
    Spawn(#[from] tokio::runtime::TryCurrentError),
    #[error("reader went away before the payload was delivered")]
    ChannelClosed,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not start the {kind} worker")]
    Spawn {
        kind: MetricKind,
        #[source]
        source: WorkerError,
    },
    #[error("terminal write failed: {0}")]
    Terminal(#[from] io::Error),
    #[error("could not read the quit confirmation: {0}")]
    Prompt(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sample count must be at least 1")]
    ZeroSamples,
    #[error("sample count {0} is too large")]
    TooManySamples(u32),
    #[error("could not write settings: {0}")]
    Settings(#[from] io::Error),
}
