// src/exec/output.rs

//! Line splitting for child output streams.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::transcript::Transcript;
use crate::types::{LogLine, OutputStream};

/// Spawn a reader that forwards every line of `reader` to the transcript
/// as soon as it is read.
///
/// Bytes are decoded lossily so a tool printing in a legacy code page does
/// not end the stream early. The task finishes at end-of-stream.
pub fn spawn_line_forwarder<R>(
    reader: R,
    stream: OutputStream,
    transcript: Transcript,
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
                    let text = String::from_utf8_lossy(&buf);
                    transcript.push(LogLine::from_stream(stream, text.trim()));
                }
                Err(e) => {
                    warn!(%stream, error = %e, "output stream read error");
                    transcript.error(format!("Log stream error: {e}"));
                    break;
                }
            }
        }
    })
}
