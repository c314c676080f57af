//! Pointer capture.
//!
//! A gesture that started on the grid (a column resize, a drag selection, a
//! fill drag) keeps receiving pointer events until it is released or
//! cancelled. The host forwards every pointer event to the grid and the
//! current [`InputCapture`] decides what it means.

use ledger_grid_engine::engine::{CellRange, CellRef};

use crate::model::ColId;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum InputCapture {
    #[default]
    Idle,
    /// Dragging a header edge.
    ResizingColumn {
        col: ColId,
        start_x: f32,
        start_width: u32,
    },
    /// Dragging out a selection range.
    Selecting,
    /// Dragging the fill handle of `source`.
    Filling {
        source: CellRange,
        target: Option<CellRef>,
    },
}

impl InputCapture {
    pub fn is_idle(&self) -> bool {
        matches!(self, InputCapture::Idle)
    }

    /// Width for a resize drag that has moved to `x`, never below `min_width`.
    pub fn resized_width(start_x: f32, start_width: u32, x: f32, min_width: u32) -> u32 {
        let width = start_width as f32 + (x - start_x);
        (width.round().max(0.0) as u32).max(min_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resized_width_clamps_to_minimum() {
        assert_eq!(InputCapture::resized_width(100.0, 120, 130.0, 40), 150);
        assert_eq!(InputCapture::resized_width(100.0, 120, 10.0, 40), 40);
        assert_eq!(InputCapture::resized_width(100.0, 120, -500.0, 40), 40);
    }

    #[test]
    fn test_default_is_idle() {
        assert!(InputCapture::default().is_idle());
        assert!(!InputCapture::Selecting.is_idle());
    }
}
