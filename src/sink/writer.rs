//! Queued writer task owning the output stream.
//!
//! # Responsibilities
//! - Serialize access to the underlying stream from any number of tasks
//! - Keep every formatted line contiguous in the output
//! - Flush on demand, covering everything queued before the request
//! - Surface I/O failures to the next flush or close caller
//!
//! # Design Decisions
//! - One writer task per sink; callers only enqueue pre-formatted bytes
//! - Unbounded FIFO channel: a flush marker is ordered after every write
//!   submitted before it, whichever task submitted it
//! - No retries: the first I/O error since the last flush is reported as is
//! - After a failure, queued lines are dropped until the error is reported;
//!   a line cut short by the failure is terminated before writing resumes

use std::io;
use std::sync::Mutex;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::logger::LogRecord;
use crate::sink::{Format, SinkError};

enum Command {
    Write(Vec<u8>),
    Flush(oneshot::Sender<Result<(), SinkError>>),
    Close(oneshot::Sender<Result<(), SinkError>>),
}

/// Sink that formats records on the caller's task and writes them on a
/// dedicated writer task.
pub struct QueuedSink {
    tx: mpsc::UnboundedSender<Command>,
    format: Box<dyn Format>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl QueuedSink {
    /// Start the writer task. Must be called within a Tokio runtime.
    pub fn spawn<W, F>(writer: W, format: F) -> Self
    where
        W: AsyncWrite + Unpin + Send + 'static,
        F: Format + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_writer(writer, rx));
        tracing::debug!(format = ?format, "Log sink writer started");

        Self {
            tx,
            format: Box::new(format),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Format `batch` and queue it as one contiguous block.
    pub fn write(&self, batch: &[LogRecord]) -> Result<(), SinkError> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut buf = Vec::with_capacity(batch.len() * 128);
        for record in batch {
            self.format.format(record, &mut buf);
        }
        self.tx.send(Command::Write(buf)).map_err(|_| SinkError::Closed)
    }

    /// Wait until every write queued before this call has reached the stream
    /// and the stream has been flushed.
    pub async fn flush(&self) -> Result<(), SinkError> {
        let (reply, done) = oneshot::channel();
        self.tx.send(Command::Flush(reply)).map_err(|_| SinkError::Closed)?;
        done.await.map_err(|_| SinkError::Closed)?
    }

    /// Flush, shut the stream down and stop the writer task.
    ///
    /// Later writes fail with [`SinkError::Closed`].
    pub async fn close(&self) -> Result<(), SinkError> {
        let (reply, done) = oneshot::channel();
        self.tx.send(Command::Close(reply)).map_err(|_| SinkError::Closed)?;
        let result = done.await.map_err(|_| SinkError::Closed)?;

        let worker = self
            .worker
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "Log sink writer task failed");
            }
        }
        result
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

fn settle(pending: &mut Option<io::Error>, outcome: io::Result<()>) -> Result<(), SinkError> {
    match pending.take() {
        Some(e) => Err(SinkError::Io(e)),
        None => outcome.map_err(SinkError::Io),
    }
}

/// Write `bytes`, returning how many reached the stream before any error.
async fn write_counted<W>(writer: &mut W, bytes: &[u8]) -> (usize, io::Result<()>)
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while written < bytes.len() {
        match writer.write(&bytes[written..]).await {
            Ok(0) => return (written, Err(io::ErrorKind::WriteZero.into())),
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return (written, Err(e)),
        }
    }
    (written, Ok(()))
}

async fn run_writer<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<Command>)
where
    W: AsyncWrite + Unpin,
{
    let mut pending: Option<io::Error> = None;
    // A failed write left a partial line on the stream.
    let mut torn = false;

    while let Some(command) = rx.recv().await {
        match command {
            Command::Write(bytes) => {
                // Nothing is written between a failure and its report.
                if pending.is_some() {
                    tracing::warn!(bytes = bytes.len(), "Dropping log lines until the sink error is reported");
                    continue;
                }
                let block = if torn {
                    let mut block = Vec::with_capacity(bytes.len() + 1);
                    block.push(b'\n');
                    block.extend_from_slice(&bytes);
                    block
                } else {
                    bytes
                };
                let (written, outcome) = write_counted(&mut writer, &block).await;
                if written > 0 {
                    torn = block[written - 1] != b'\n';
                }
                if let Err(e) = outcome {
                    tracing::error!(error = %e, bytes = block.len(), written, "Log sink write failed");
                    pending = Some(e);
                }
            }
            Command::Flush(reply) => {
                let outcome = writer.flush().await;
                let _ = reply.send(settle(&mut pending, outcome));
            }
            Command::Close(reply) => {
                let outcome = match writer.flush().await {
                    Ok(()) => writer.shutdown().await,
                    Err(e) => Err(e),
                };
                let _ = reply.send(settle(&mut pending, outcome));
                break;
            }
        }
    }

    tracing::debug!("Log sink writer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Level;
    use crate::sink::{JsonFormat, MemoryWriter};

    #[tokio::test]
    async fn test_flush_delivers_queued_lines() {
        let out = MemoryWriter::new();
        let sink = QueuedSink::spawn(out.clone(), JsonFormat);

        sink.write(&[LogRecord::new(Level::Info, "one"), LogRecord::new(Level::Info, "two")])
            .unwrap();
        sink.flush().await.unwrap();

        let lines = out.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"message\":\"one\""));
        assert!(lines[1].contains("\"message\":\"two\""));
    }

    #[tokio::test]
    async fn test_write_after_close_fails() {
        let sink = QueuedSink::spawn(MemoryWriter::new(), JsonFormat);
        sink.close().await.unwrap();

        assert!(sink.is_closed());
        assert!(matches!(sink.write(&[LogRecord::new(Level::Info, "late")]), Err(SinkError::Closed)));
        assert!(matches!(sink.flush().await, Err(SinkError::Closed)));
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        let out = MemoryWriter::new();
        let sink = QueuedSink::spawn(out.clone(), JsonFormat);
        sink.write(&[]).unwrap();
        sink.flush().await.unwrap();
        assert!(out.contents().is_empty());
    }
}
