//! A [`DocumentSink`] that renders debugger activity on a terminal.
//!
//! The terminal has no buffers of its own, so every file the operator names
//! (and the debug target) is "opened" as a document keyed by its absolute
//! path. Tags are printed as they change and the execution position is shown
//! together with the source line when the file can be read.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, absolute};

use linedbg::{DocumentId, DocumentSink, TagRange, TagStyle};
use tracing::{debug, warn};

const HOST_TARGET: &str = "linedbg::cli::host";

/// Spells `file` the way the debugger reports it: as an absolute path.
pub(crate) fn resolve_file(file: &str) -> String {
    absolute(Path::new(file)).map_or_else(|_| file.to_owned(), |path| path.display().to_string())
}

/// Terminal-backed host for a debug session.
pub(crate) struct TerminalHost<W: Write> {
    writer: W,
    documents: HashMap<String, DocumentId>,
    names: BTreeMap<DocumentId, String>,
    next_document: u64,
}

impl<W: Write> TerminalHost<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self {
            writer,
            documents: HashMap::new(),
            names: BTreeMap::new(),
            next_document: 1,
        }
    }

    /// Registers `file` as an open document and returns its handle.
    pub(crate) fn open(&mut self, file: &str) -> DocumentId {
        let key = resolve_file(file);
        if let Some(document) = self.documents.get(&key) {
            return *document;
        }
        let document = DocumentId(self.next_document);
        self.next_document += 1;
        self.names.insert(document, key.clone());
        self.documents.insert(key, document);
        document
    }

    /// Everything written so far.
    #[cfg(test)]
    pub(crate) fn written(&self) -> String
    where
        W: AsRef<[u8]>,
    {
        String::from_utf8_lossy(self.writer.as_ref()).into_owned()
    }

    fn name(&self, document: DocumentId) -> &str {
        self.names.get(&document).map_or("<unknown>", String::as_str)
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Err(error) = writeln!(self.writer, "{line}").and_then(|()| self.writer.flush()) {
            warn!(target: HOST_TARGET, error = %error, "failed to write to the terminal");
        }
    }
}

/// Extracts the line number from a `<line>.<column> <modifier>` index.
fn index_line(index: &str) -> &str {
    index.split_once('.').map_or(index, |(line, _)| line)
}

fn source_line(file: &str, line: u32) -> Option<String> {
    let offset = usize::try_from(line.checked_sub(1)?).ok()?;
    let bytes = fs::read(file).ok()?;
    String::from_utf8_lossy(&bytes)
        .lines()
        .nth(offset)
        .map(str::to_owned)
}

impl<W: Write> DocumentSink for TerminalHost<W> {
    fn charset(&self) -> Option<&str> {
        None
    }

    fn lookup(&self, filename: &str) -> Option<DocumentId> {
        self.documents.get(&resolve_file(filename)).copied()
    }

    fn tag_add(&mut self, document: DocumentId, name: &str, range: TagRange) {
        let file = self.name(document).to_owned();
        self.emit(format_args!(
            "breakpoint {name} set at {file}:{}",
            index_line(&range.start)
        ));
    }

    fn tag_delete(&mut self, document: DocumentId, name: &str) {
        let file = self.name(document).to_owned();
        self.emit(format_args!("breakpoint {name} removed from {file}"));
    }

    fn tag_config(&mut self, document: DocumentId, name: &str, style: &TagStyle) {
        debug!(
            target: HOST_TARGET,
            document = document.0,
            tag = name,
            background = %style.background,
            foreground = %style.foreground,
            "tag styled"
        );
    }

    fn set_line(&mut self, document: DocumentId, line: u32) {
        let file = self.name(document).to_owned();
        match source_line(&file, line) {
            Some(text) => self.emit(format_args!("-> {file}:{line}\n   {text}")),
            None => self.emit(format_args!("-> {file}:{line}")),
        }
    }

    fn diagnostic(&mut self, text: &str) {
        self.emit(format_args!("{text}"));
    }

    fn status(&mut self, message: &str) {
        self.emit(format_args!("[{message}]"));
    }
}
