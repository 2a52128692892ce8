//! Display-ready snapshot generation
//!
//! A snapshot projects the grid into rows of (packed attribute, character)
//! pairs, one pair per column, the shape a row painter consumes directly.
//! Snapshots are a pure read: the same screen state always produces the
//! same snapshot, byte for byte.

use serde::{Deserialize, Serialize};

use super::cell::Attributes;
use super::screen::Screen;

/// One display position: packed attribute word + character
///
/// See [`Attributes::encode`] for the attribute word layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCell {
    /// Packed attribute word
    pub attr: u32,
    /// Character to display
    pub ch: char,
}

/// Cursor position in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub col: usize,
    pub row: usize,
    pub visible: bool,
}

/// A complete display-ready snapshot of the screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Screen dimensions
    pub cols: usize,
    pub rows: usize,
    /// Display content, row-major; every row has exactly `cols` entries
    pub lines: Vec<Vec<SnapshotCell>>,
    /// Cursor state
    pub cursor: CursorPosition,
    /// Window title (empty if never set)
    pub title: String,
}

impl Snapshot {
    /// Project the current screen state
    ///
    /// Unwritten cells display as spaces carrying the most recent written
    /// attribute on their row (the default attribute if nothing earlier on
    /// the row was written), matching the row-painting convention where
    /// padding inherits the preceding attribute.
    pub fn from_screen(screen: &Screen) -> Self {
        let (cols, rows) = (screen.cols(), screen.rows());
        let mut lines = Vec::with_capacity(rows);

        for row in 0..rows {
            let mut line = Vec::with_capacity(cols);
            let mut last_attr = Attributes::default().encode();

            if let Some(grid_row) = screen.grid().row(row) {
                for cell in &grid_row.cells {
                    let attr = if cell.is_empty() && !cell.is_wide_continuation() {
                        last_attr
                    } else {
                        let encoded = cell.attrs.encode();
                        last_attr = encoded;
                        encoded
                    };
                    line.push(SnapshotCell {
                        attr,
                        ch: cell.display_char(),
                    });
                }
            }
            lines.push(line);
        }

        Snapshot {
            cols,
            rows,
            lines,
            cursor: CursorPosition {
                col: screen.cursor().col,
                row: screen.cursor().row,
                visible: screen.modes.cursor_visible,
            },
            title: screen.title.clone(),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Plain-text projection, one line per row, trailing spaces trimmed
    pub fn to_text(&self) -> String {
        let mut result = String::new();

        for line in &self.lines {
            let start = result.len();
            for cell in line {
                result.push(cell.ch);
            }
            while result.len() > start && result.ends_with(' ') {
                result.pop();
            }
            result.push('\n');
        }

        result
    }

    /// Text content of a single row, trailing spaces trimmed
    pub fn row_text(&self, row: usize) -> String {
        let mut text: String = self.lines[row].iter().map(|c| c.ch).collect();
        while text.ends_with(' ') {
            text.pop();
        }
        text
    }
}
