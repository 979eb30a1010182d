//! Byte-exact stream forwarding from the engine to the launcher.
//!
//! The engine writes unbuffered and may emit partial lines or non-UTF8 bytes,
//! so output is copied chunk by chunk and flushed immediately. Nothing is
//! decoded, split or prefixed.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tracing::debug;

const CHUNK_SIZE: usize = 8 * 1024;

/// Boxed writer the forwarder copies into.
pub type OutputSink = Box<dyn AsyncWrite + Unpin + Send>;

/// Copy `source` into `sink` until EOF. Resolves to the number of bytes read.
///
/// A failing sink does not stop the reader: the pipe keeps being drained so
/// the engine never blocks on a full pipe.
pub(crate) fn spawn_stream_forwarder(
    source: impl AsyncRead + Unpin + Send + 'static,
    sink: OutputSink,
    stream_type: &'static str,
) -> JoinHandle<u64> {
    tokio::spawn(forward(source, sink, stream_type))
}

async fn forward(
    mut source: impl AsyncRead + Unpin,
    mut sink: OutputSink,
    stream_type: &'static str,
) -> u64 {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total: u64 = 0;
    let mut sink_open = true;

    loop {
        let n = match source.read(&mut buf).await {
            Ok(0) => break, // EOF
            Ok(n) => n,
            Err(e) => {
                debug!(%stream_type, error = %e, "stream forwarder exiting due to read error");
                break;
            }
        };
        total += n as u64;

        if sink_open {
            let written = async {
                sink.write_all(&buf[..n]).await?;
                sink.flush().await
            }
            .await;
            if let Err(e) = written {
                debug!(
                    %stream_type,
                    error = %e,
                    "output sink closed, discarding further engine output"
                );
                sink_open = false;
            }
        }
    }

    debug!(%stream_type, bytes = total, "stream forwarder task exiting");
    total
}
