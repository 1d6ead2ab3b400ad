// ABOUTME: Line loop behind the job watch operation
// ABOUTME: Delivers lines in order, stops on end of stream, cancellation, read or handler failure

use std::io;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{BoxError, ExecutorError, Result};

/// Code returned by a watch that ended normally or was cancelled.
pub const WATCH_EXIT_OK: i32 = 0;

/// Result type of a watch line handler.
pub type HandlerResult = std::result::Result<(), BoxError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEnd {
    Completed,
    Cancelled,
}

/// Reads `reader` line by line into `on_line` until end of stream or
/// cancellation. The reader is owned here and dropped before returning, on
/// every path.
///
/// Cancellation is checked before each read and also wins over a read that is
/// still pending, so a stalled connection is released once the token fires.
/// Lines already buffered are not delivered after that.
///
/// Lines are split on `\n` with a trailing `\r` removed. Bytes that are not
/// valid UTF-8 are replaced with U+FFFD and the stream goes on.
pub async fn pump_lines<R, F>(
    mut reader: R,
    cancel: &CancellationToken,
    idle_timeout: Option<Duration>,
    on_line: &mut F,
) -> Result<WatchEnd>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(String) -> HandlerResult,
{
    let mut buf = Vec::new();
    let mut delivered: u64 = 0;

    loop {
        buf.clear();
        let read = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("watch cancelled after {} lines", delivered);
                return Ok(WatchEnd::Cancelled);
            }
            read = read_raw_line(&mut reader, &mut buf, idle_timeout) => read,
        };

        if read.map_err(ExecutorError::Stream)? == 0 {
            debug!("watch stream ended after {} lines", delivered);
            return Ok(WatchEnd::Completed);
        }

        on_line(decode_line(&buf)).map_err(ExecutorError::Handler)?;
        delivered += 1;
    }
}

async fn read_raw_line<R>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    idle_timeout: Option<Duration>,
) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    match idle_timeout {
        None => reader.read_until(b'\n', buf).await,
        Some(limit) => match tokio::time::timeout(limit, reader.read_until(b'\n', buf)).await {
            Ok(read) => read,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("no output for {:?}", limit),
            )),
        },
    }
}

fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
