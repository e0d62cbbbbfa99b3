//! Per-square click routing
//!
//! Each of the 64 interactive cells routes its activation through a handler
//! value that knows exactly one coordinate. The handlers live in a
//! coordinate-indexed table instead of captured-variable closures, so there
//! is no way for a late-bound capture to deliver the wrong square.

use crate::editor::selection::ClickOutcome;
use crate::editor::BoardEditor;
use shakmaty::{File, Rank, Square};

/// Click handler bound to a single square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareHandler {
    square: Square,
}

impl SquareHandler {
    pub fn square(&self) -> Square {
        self.square
    }

    /// Route this cell's activation into the editor
    pub fn activate(&self, editor: &mut BoardEditor) -> ClickOutcome {
        editor.click_square(self.square)
    }
}

/// Coordinate-indexed table of the 64 square handlers
#[derive(Debug)]
pub struct SquareGrid {
    handlers: [SquareHandler; 64],
}

impl Default for SquareGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl SquareGrid {
    pub fn new() -> Self {
        Self {
            handlers: std::array::from_fn(|i| SquareHandler {
                square: Square::new(i as u32),
            }),
        }
    }

    /// Handler for one square
    pub fn handler(&self, square: Square) -> &SquareHandler {
        &self.handlers[square as usize]
    }

    /// Handlers in display order: rank 8 down to rank 1, file a to file h
    ///
    /// This is the order a UI lays the cells out in, top-left first.
    pub fn display_order(&self) -> impl Iterator<Item = &SquareHandler> + '_ {
        (0..8u32).rev().flat_map(move |rank| {
            (0..8u32).map(move |file| {
                self.handler(Square::from_coords(File::new(file), Rank::new(rank)))
            })
        })
    }
}
