//! Output relay from child pipes to the progress handler

use crate::progress::{OutputStream, ProgressEvent, ProgressHandler};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

/// Forwards every line read from `reader` until EOF.
///
/// Lines are decoded lossily so that non-UTF-8 tool output never ends the
/// relay early. The relay is observational only; read errors end it silently.
pub fn spawn_relay<R>(
    reader: R,
    stream: OutputStream,
    handler: Arc<dyn ProgressHandler>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(trim_line_ending(&buf)).into_owned();
                    handler.on_progress(&ProgressEvent::Output { stream, line });
                }
                Err(e) => {
                    debug!(stream = %stream, error = %e, "Output relay stopped");
                    break;
                }
            }
        }
    })
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
