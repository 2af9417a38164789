//! Background forwarding of the debugger's merged output stream.

use std::io::{ErrorKind, PipeReader, Read};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::SUPERVISOR_TARGET;

/// Size of each read from the output pipe.
const READ_CHUNK_BYTES: usize = 4096;

/// Callback invoked from the reader thread whenever output is queued.
///
/// Hosts use it to wake their event loop, which then calls
/// [`crate::DebugSession::pump`] on its own thread.
pub type OutputNotifier = Arc<dyn Fn() + Send + Sync>;

/// One delivery from the reader thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputChunk {
    /// Raw bytes, not necessarily ending on a line boundary.
    Data(Vec<u8>),
    /// The output stream reached end of file.
    Closed,
}

/// Starts the thread that drains `source` into `sink`.
pub(super) fn spawn_reader(
    mut source: PipeReader,
    sink: Sender<OutputChunk>,
    notifier: Option<OutputNotifier>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(String::from("linedbg-output"))
        .spawn(move || {
            let notify = || {
                if let Some(callback) = &notifier {
                    callback();
                }
            };
            let mut buffer = [0_u8; READ_CHUNK_BYTES];
            loop {
                match source.read(&mut buffer) {
                    Ok(0) => break,
                    Ok(count) => {
                        let chunk = buffer.get(..count).map(<[u8]>::to_vec).unwrap_or_default();
                        if sink.send(OutputChunk::Data(chunk)).is_err() {
                            debug!(
                                target: SUPERVISOR_TARGET,
                                "output receiver dropped, stopping reader"
                            );
                            return;
                        }
                        notify();
                    }
                    Err(error) if error.kind() == ErrorKind::Interrupted => {}
                    Err(error) => {
                        warn!(
                            target: SUPERVISOR_TARGET,
                            error = %error,
                            "failed to read debugger output"
                        );
                        break;
                    }
                }
            }
            if sink.send(OutputChunk::Closed).is_ok() {
                notify();
            }
        })
}
