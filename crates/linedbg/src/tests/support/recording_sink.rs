//! A `DocumentSink` that records every call for assertions.

use std::collections::{BTreeMap, HashMap};

use crate::sink::{DocumentId, DocumentSink, TagRange, TagStyle};

/// One recorded host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    /// `tag_add` was called.
    TagAdd(DocumentId, String, TagRange),
    /// `tag_delete` was called.
    TagDelete(DocumentId, String),
    /// `tag_config` was called.
    TagConfig(DocumentId, String, TagStyle),
    /// `set_line` was called.
    SetLine(DocumentId, u32),
}

/// Host double with a fixed set of open documents.
#[derive(Debug, Default)]
pub struct RecordingSink {
    charset: Option<String>,
    documents: HashMap<String, DocumentId>,
    /// Every tag, set-line, and style call in order.
    pub calls: Vec<SinkCall>,
    /// Tags currently present, keyed by document and name.
    pub tags: BTreeMap<(DocumentId, String), TagRange>,
    /// Raw output lines received.
    pub diagnostics: Vec<String>,
    /// Status messages shown.
    pub statuses: Vec<String>,
}

impl RecordingSink {
    /// Opens the given files, numbering documents from 1.
    pub fn with_documents<'a>(files: impl IntoIterator<Item = &'a str>) -> Self {
        let documents = files
            .into_iter()
            .zip(1_u64..)
            .map(|(file, id)| (file.to_owned(), DocumentId(id)))
            .collect();
        Self {
            documents,
            ..Self::default()
        }
    }

    /// Reports `charset` as the attachment document's encoding.
    pub fn with_charset(mut self, charset: &str) -> Self {
        self.charset = Some(charset.to_owned());
        self
    }

    /// Document handle of an open file.
    pub fn document(&self, file: &str) -> DocumentId {
        self.documents
            .get(file)
            .copied()
            .unwrap_or_else(|| panic!("{file} is not open"))
    }

    /// Whether the breakpoint tag `name` is present in `file`.
    pub fn has_tag(&self, file: &str, name: &str) -> bool {
        self.tags
            .contains_key(&(self.document(file), name.to_owned()))
    }

    /// The last status message shown.
    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }
}

impl DocumentSink for RecordingSink {
    fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    fn lookup(&self, filename: &str) -> Option<DocumentId> {
        self.documents.get(filename).copied()
    }

    fn tag_add(&mut self, document: DocumentId, name: &str, range: TagRange) {
        self.tags.insert((document, name.to_owned()), range.clone());
        self.calls
            .push(SinkCall::TagAdd(document, name.to_owned(), range));
    }

    fn tag_delete(&mut self, document: DocumentId, name: &str) {
        self.tags.remove(&(document, name.to_owned()));
        self.calls.push(SinkCall::TagDelete(document, name.to_owned()));
    }

    fn tag_config(&mut self, document: DocumentId, name: &str, style: &TagStyle) {
        self.calls
            .push(SinkCall::TagConfig(document, name.to_owned(), style.clone()));
    }

    fn set_line(&mut self, document: DocumentId, line: u32) {
        self.calls.push(SinkCall::SetLine(document, line));
    }

    fn diagnostic(&mut self, text: &str) {
        self.diagnostics.push(text.to_owned());
    }

    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_owned());
    }
}
