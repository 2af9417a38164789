//! Capability interface onto the host editor.

use linedbg_config::Config;

/// Opaque handle to an open document, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// A text range in host index notation (`<line>.<column> <modifier>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRange {
    /// Start index, e.g. `10.0 linestart`.
    pub start: String,
    /// End index, e.g. `10.0 lineend`.
    pub end: String,
}

impl TagRange {
    /// Range covering the whole of a 1-based `line`.
    #[must_use]
    pub fn whole_line(line: u32) -> Self {
        Self {
            start: format!("{line}.0 linestart"),
            end: format!("{line}.0 lineend"),
        }
    }
}

/// Visual style of a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagStyle {
    /// Background colour name.
    pub background: String,
    /// Foreground colour name.
    pub foreground: String,
}

impl TagStyle {
    /// Breakpoint style taken from the resolved configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            background: config.breakpoint_background().to_owned(),
            foreground: config.breakpoint_foreground().to_owned(),
        }
    }
}

impl Default for TagStyle {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Host editor operations the debugger driver relies on.
///
/// Implementations live in the host; the driver never owns document
/// contents. Every method is infallible from the driver's point of view:
/// a host that cannot honour a request (the file is not open, say) simply
/// ignores it.
pub trait DocumentSink {
    /// Encoding label of the document the session is attached to.
    fn charset(&self) -> Option<&str>;

    /// Finds the open document for `filename`.
    fn lookup(&self, filename: &str) -> Option<DocumentId>;

    /// Adds tag `name` over `range` in `document`.
    fn tag_add(&mut self, document: DocumentId, name: &str, range: TagRange);

    /// Deletes tag `name` from `document`.
    fn tag_delete(&mut self, document: DocumentId, name: &str);

    /// Applies `style` to tag `name` in `document`.
    fn tag_config(&mut self, document: DocumentId, name: &str, style: &TagStyle);

    /// Brings `document` forward and shows the execution position at `line`.
    fn set_line(&mut self, document: DocumentId, line: u32);

    /// Receives debugger output that carries no protocol meaning.
    fn diagnostic(&mut self, text: &str);

    /// Shows a user-facing status message.
    fn status(&mut self, message: &str);
}
