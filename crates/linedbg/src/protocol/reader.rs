//! Newline framing and decoding of debugger output.

use encoding_rs::{Encoding, UTF_8};
use tracing::{trace, warn};

use super::{PROTOCOL_TARGET, ProtocolEvent, classify};

/// Incremental splitter that turns output chunks into classified lines.
///
/// Bytes are buffered until a `\n` arrives, so the events produced do not
/// depend on how the output was chunked. An unterminated tail stays in the
/// buffer for the next call to [`LineReader::feed`].
#[derive(Debug)]
pub struct LineReader {
    buffer: Vec<u8>,
    encoding: &'static Encoding,
}

impl LineReader {
    /// Builds a reader decoding with the encoding named by `label`.
    ///
    /// Unknown labels fall back to UTF-8.
    #[must_use]
    pub fn new(label: &str) -> Self {
        let encoding = Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
            warn!(
                target: PROTOCOL_TARGET,
                label,
                "unknown text encoding, decoding debugger output as UTF-8"
            );
            UTF_8
        });
        Self::with_encoding(encoding)
    }

    /// Builds a reader with an already resolved encoding.
    #[must_use]
    pub const fn with_encoding(encoding: &'static Encoding) -> Self {
        Self {
            buffer: Vec::new(),
            encoding,
        }
    }

    /// Encoding used to decode lines.
    #[must_use]
    pub const fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Number of buffered bytes not yet terminated by a newline.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Appends `chunk` and returns the events for every completed line.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ProtocolEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(position) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=position).collect();
            line.pop();
            events.push(self.decode_and_classify(&line));
        }
        events
    }

    /// Flushes an unterminated tail as a final line.
    ///
    /// Used once the output stream has closed. Returns `None` when nothing is
    /// buffered.
    pub fn finish(&mut self) -> Option<ProtocolEvent> {
        if self.buffer.is_empty() {
            return None;
        }
        let tail = std::mem::take(&mut self.buffer);
        Some(self.decode_and_classify(&tail))
    }

    fn decode_and_classify(&self, line: &[u8]) -> ProtocolEvent {
        let (text, had_errors) = self.encoding.decode_without_bom_handling(line);
        if had_errors {
            trace!(
                target: PROTOCOL_TARGET,
                encoding = self.encoding.name(),
                "replaced undecodable bytes in debugger output"
            );
        }
        classify(&text)
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::with_encoding(UTF_8)
    }
}
