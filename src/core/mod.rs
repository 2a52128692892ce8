//! Terminal Core Module
//!
//! Platform-independent terminal state management:
//! - Cell grid with per-cell attributes
//! - Cursor state and positioning
//! - Mode table (autowrap, CRLF translation, origin mode, ...)
//! - Screen model applying print/control events
//! - Display-ready snapshot generation
//!
//! The core is completely deterministic: given the same sequence of events
//! it always produces the same state.

mod cell;
mod cursor;
mod grid;
mod modes;
mod screen;
mod snapshot;

pub use cell::{Attributes, Cell, Color, DEFAULT_BG_CODE, DEFAULT_FG_CODE};
pub use cursor::{Cursor, SavedCursor};
pub use grid::{Grid, Row};
pub use modes::{Mode, Modes};
pub use screen::{EraseMode, Screen};
pub use snapshot::{CursorPosition, Snapshot, SnapshotCell};
