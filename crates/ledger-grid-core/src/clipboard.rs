//! Clipboard abstraction and tab-separated block interchange.
//!
//! Blocks travel as text: cells separated by `\t`, rows by `\n`, which is
//! what spreadsheet applications put on the system clipboard. The grid also
//! keeps the last copied block as a [`ClipboardSnapshot`] so paste still
//! works when the system clipboard is unavailable.

use ledger_grid_engine::engine::CellRef;

/// Trait for clipboard operations.
pub trait ClipboardProvider {
    /// Get text from clipboard.
    fn get_text(&mut self) -> Option<String>;

    /// Set text to clipboard. Returns false when the clipboard is unavailable.
    fn set_text(&mut self, text: String) -> bool;
}

/// Process-local clipboard for hosts without a system clipboard.
#[derive(Clone, Debug, Default)]
pub struct InMemoryClipboard {
    text: Option<String>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardProvider for InMemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: String) -> bool {
        self.text = Some(text);
        true
    }
}

/// The last copied block and where it was copied from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipboardSnapshot {
    pub values: Vec<Vec<String>>,
    pub origin: CellRef,
}

impl ClipboardSnapshot {
    pub fn width(&self) -> usize {
        self.values.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.values.len()
    }
}

/// Serialize a block of raw values as tab/newline-delimited text.
pub fn serialize_block(values: &[Vec<String>]) -> String {
    values
        .iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse tab/newline-delimited text into a block. `\r\n` line endings are
/// accepted and a single trailing newline does not add an empty row.
pub fn parse_block(text: &str) -> Vec<Vec<String>> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.len() == 1 && lines[0].is_empty() {
        return Vec::new();
    }
    lines
        .into_iter()
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}
