//! System clipboard provider backed by arboard.

use ledger_grid_core::ClipboardProvider;

/// OS clipboard (X11/Wayland, macOS, Windows). Every call opens a fresh
/// handle, so a clipboard that comes and goes is picked up on the next use.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        let mut cb = arboard::Clipboard::new().ok()?;
        cb.get_text().ok()
    }

    fn set_text(&mut self, text: String) -> bool {
        let mut cb = match arboard::Clipboard::new() {
            Ok(cb) => cb,
            Err(err) => {
                tracing::debug!(%err, "system clipboard unavailable");
                return false;
            }
        };
        cb.set_text(text).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_grid_core::{CellRef, Grid, GridConfig, Modifiers};

    #[test]
    fn test_grid_copy_survives_missing_display() {
        // Headless runners have no clipboard; the in-memory snapshot still
        // backs the paste.
        let mut grid = Grid::new(GridConfig {
            min_rows: 3,
            draft_columns: 2,
            ..GridConfig::default()
        })
        .with_clipboard(SystemClipboard::new());
        grid.edit_cell(CellRef::new(0, 0), "42").unwrap();
        grid.pointer_down(CellRef::new(0, 0), Modifiers::NONE);
        grid.pointer_up();
        assert!(grid.copy());
        grid.pointer_down(CellRef::new(2, 1), Modifiers::NONE);
        grid.pointer_up();
        assert_eq!(grid.paste(), 1);
        assert_eq!(grid.raw_input(&CellRef::new(2, 1)), "42");
    }
}
