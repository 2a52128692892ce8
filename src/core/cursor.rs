//! Cursor state management
//!
//! The cursor tracks position, the pending-wrap flag, and the current
//! attribute brush. It supports save/restore (DECSC/DECRC and CSI s/u).

use serde::{Deserialize, Serialize};

use super::cell::Attributes;

/// Cursor state: position plus the attributes applied to new characters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    /// Column position (0-indexed)
    pub col: usize,
    /// Row position (0-indexed)
    pub row: usize,
    /// Cursor sits past the right margin; the next print wraps first
    pub pending_wrap: bool,
    /// Current text attributes (applied to new characters)
    pub attrs: Attributes,
}

/// Saved cursor state for DECSC/DECRC
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedCursor {
    pub col: usize,
    pub row: usize,
    pub attrs: Attributes,
    pub origin_mode: bool,
}

impl Cursor {
    /// Create a new cursor at the home position
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to absolute position, clamping to bounds
    pub fn move_to(&mut self, col: usize, row: usize, cols: usize, rows: usize) {
        self.col = col.min(cols.saturating_sub(1));
        self.row = row.min(rows.saturating_sub(1));
        self.pending_wrap = false;
    }

    /// Move up by n rows, stopping at the given top margin
    pub fn move_up(&mut self, n: usize, top_margin: usize) {
        self.row = self.row.saturating_sub(n).max(top_margin);
        self.pending_wrap = false;
    }

    /// Move down by n rows, stopping at the given bottom margin
    pub fn move_down(&mut self, n: usize, bottom_margin: usize) {
        self.row = (self.row + n).min(bottom_margin);
        self.pending_wrap = false;
    }

    /// Move left by n columns, stopping at column 0
    pub fn move_left(&mut self, n: usize) {
        self.col = self.col.saturating_sub(n);
        self.pending_wrap = false;
    }

    /// Move right by n columns, stopping at the right margin
    pub fn move_right(&mut self, n: usize, cols: usize) {
        self.col = (self.col + n).min(cols.saturating_sub(1));
        self.pending_wrap = false;
    }

    /// Move to a column (0-indexed), clamped
    pub fn set_col(&mut self, col: usize, cols: usize) {
        self.col = col.min(cols.saturating_sub(1));
        self.pending_wrap = false;
    }

    /// Carriage return - move to column 0
    pub fn carriage_return(&mut self) {
        self.col = 0;
        self.pending_wrap = false;
    }

    /// Clamp the position into new bounds (after resize)
    pub fn clamp(&mut self, cols: usize, rows: usize) {
        self.col = self.col.min(cols.saturating_sub(1));
        self.row = self.row.min(rows.saturating_sub(1));
        self.pending_wrap = false;
    }

    /// Save position and attributes
    pub fn save(&self, origin_mode: bool) -> SavedCursor {
        SavedCursor {
            col: self.col,
            row: self.row,
            attrs: self.attrs,
            origin_mode,
        }
    }

    /// Restore position and attributes, clamped to current bounds
    pub fn restore(&mut self, saved: &SavedCursor, cols: usize, rows: usize) {
        self.col = saved.col.min(cols.saturating_sub(1));
        self.row = saved.row.min(rows.saturating_sub(1));
        self.attrs = saved.attrs;
        self.pending_wrap = false;
    }

    /// Reset to the home position with default attributes
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
