//! Error type and crate-local `Result` alias.
//!
//! Exactly one caller-visible failure mode escapes the core: invalid
//! terminal dimensions passed to `Terminal::new` / `Terminal::resize`.

use thiserror::Error;

/// Errors that can escape to callers of the crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Terminal dimensions were invalid (zero cols or rows).
    #[error("invalid terminal dimensions: {cols}x{rows}")]
    InvalidDimensions { cols: usize, rows: usize },
}

/// Crate-local `Result` alias defaulting to the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
