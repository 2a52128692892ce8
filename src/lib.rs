//! headless-term
//!
//! A headless terminal emulator core: feed it a raw byte stream (text
//! interleaved with escape sequences) and query a display-ready cell grid.
//! No rendering, no pty, no I/O - a host supplies bytes and consumes
//! snapshots.
//!
//! - `core`: cell grid, cursor, modes, screen model, snapshots
//! - `parser`: VT/xterm escape sequence parser
//! - [`Terminal`]: the single entry point tying them together
//!
//! ```
//! use headless_term::{Mode, Terminal};
//!
//! let mut term = Terminal::new(80, 24).unwrap();
//! term.set_mode(Mode::Crlf, true);
//! term.write(b"hello \x1b[1;31mworld\x1b[0m");
//!
//! let snapshot = term.snapshot();
//! assert_eq!(snapshot.row_text(0), "hello world");
//! assert_eq!(snapshot.cursor.col, 11);
//! ```

pub mod core;
pub mod parser;

mod error;
mod terminal;

pub use crate::core::{Mode, Snapshot};
pub use error::{Error, Result};
pub use terminal::{Damage, Terminal};
