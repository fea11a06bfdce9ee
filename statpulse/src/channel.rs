//! One-shot byte pipe between a worker and the orchestrator.
//!
//! The writer lives on the worker's blocking thread; dropping it is end-of-stream.

use bytes::{Bytes, BytesMut};
use tokio::sync::mpsc;

use crate::error::WorkerError;

const CHANNEL_DEPTH: usize = 16;

/// Creates both ends at once, so a reader never exists without its writer.
pub fn channel() -> (ChannelWriter, ChannelReader) {
    let (tx, rx) = mpsc::channel(CHANNEL_DEPTH);
    (ChannelWriter { tx }, ChannelReader { rx })
}

#[derive(Debug)]
pub struct ChannelWriter {
    tx: mpsc::Sender<Bytes>,
}

impl ChannelWriter {
    /// Sends one chunk, blocking while the pipe is full. Must not be called from
    /// async context.
    pub fn write(&self, chunk: impl Into<Bytes>) -> Result<(), WorkerError> {
        let chunk = chunk.into();
        if chunk.is_empty() {
            return Ok(());
        }
        self.tx
            .blocking_send(chunk)
            .map_err(|_| WorkerError::ChannelClosed)
    }
}

#[derive(Debug)]
pub struct ChannelReader {
    rx: mpsc::Receiver<Bytes>,
}

impl ChannelReader {
    /// Collects chunks until the writer is gone. Whatever arrived before a writer
    /// died early is returned as the whole payload.
    pub async fn read_to_end(mut self) -> Bytes {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.rx.recv().await {
            buf.extend_from_slice(&chunk);
        }
        buf.freeze()
    }
}
