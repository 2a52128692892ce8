//! Terminal Cell
//!
//! Represents a single cell in the terminal grid: an optional character and
//! the attributes it was written with. A cell with no character has never
//! been written (or was erased) and displays as a space.

use serde::{Deserialize, Serialize};

/// Color representation: the terminal default or a 256-color palette index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    /// Default terminal color (foreground or background)
    #[default]
    Default,
    /// 256-color palette index (0-15 classic, 16-231 cube, 232-255 grayscale)
    Indexed(u8),
}

/// Code for the default foreground in the packed attribute word
pub const DEFAULT_FG_CODE: u32 = 257;
/// Code for the default background in the packed attribute word
pub const DEFAULT_BG_CODE: u32 = 256;

/// Attributes applied to printed characters
///
/// The "current" attributes live on the cursor and are stamped onto every
/// cell a print touches; they persist until changed by an SGR sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attributes {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text (SGR 1)
    pub bold: bool,
    /// Underlined text (SGR 4)
    pub underline: bool,
    /// Inverse/reverse video (SGR 7)
    pub inverse: bool,
}

impl Attributes {
    /// Create new default attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all attributes to default (SGR 0)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pack into the display-buffer attribute word:
    ///
    /// ```text
    /// bit 20    inverse
    /// bit 19    underline
    /// bit 18    bold
    /// bits 9-17 foreground (0-255, 257 = default)
    /// bits 0-8  background (0-255, 256 = default)
    /// ```
    pub fn encode(&self) -> u32 {
        let fg = match self.fg {
            Color::Default => DEFAULT_FG_CODE,
            Color::Indexed(i) => u32::from(i),
        };
        let bg = match self.bg {
            Color::Default => DEFAULT_BG_CODE,
            Color::Indexed(i) => u32::from(i),
        };
        (u32::from(self.inverse) << 20)
            | (u32::from(self.underline) << 19)
            | (u32::from(self.bold) << 18)
            | (fg << 9)
            | bg
    }
}

/// A single cell in the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The character in this cell; `None` if never written or erased
    pub ch: Option<char>,
    /// Attributes the cell was written with
    pub attrs: Attributes,
    /// Display width: 1 normal, 2 wide-character head, 0 continuation
    pub width: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: None,
            attrs: Attributes::default(),
            width: 1,
        }
    }
}

impl Cell {
    /// Create a cell holding a single-width character
    pub fn new(c: char) -> Self {
        Self {
            ch: Some(c),
            ..Default::default()
        }
    }

    /// Check if this cell has never been written (or was erased)
    pub fn is_empty(&self) -> bool {
        self.ch.is_none()
    }

    /// Check if this cell is the shadow of a preceding wide character
    pub fn is_wide_continuation(&self) -> bool {
        self.width == 0
    }

    /// The character to display: the stored one, or a space
    pub fn display_char(&self) -> char {
        self.ch.unwrap_or(' ')
    }

    /// Reset the cell to the unwritten default state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_default() {
        let cell = Cell::default();
        assert!(cell.is_empty());
        assert_eq!(cell.display_char(), ' ');
        assert_eq!(cell.attrs, Attributes::default());
        assert_eq!(cell.width, 1);
    }

    #[test]
    fn test_cell_new() {
        let cell = Cell::new('A');
        assert_eq!(cell.ch, Some('A'));
        assert!(!cell.is_empty());
    }

    #[test]
    fn test_cell_reset() {
        let mut cell = Cell::new('A');
        cell.attrs.fg = Color::Indexed(1);
        cell.attrs.bold = true;
        cell.reset();
        assert!(cell.is_empty());
        assert_eq!(cell.attrs.fg, Color::Default);
        assert!(!cell.attrs.bold);
    }

    #[test]
    fn test_encode_default() {
        // Default attributes: fg=257, bg=256, no flags
        assert_eq!(Attributes::default().encode(), (257 << 9) | 256);
    }

    #[test]
    fn test_encode_colors() {
        let attrs = Attributes {
            fg: Color::Indexed(1),
            bg: Color::Indexed(4),
            ..Default::default()
        };
        assert_eq!(attrs.encode(), (1 << 9) | 4);
    }

    #[test]
    fn test_encode_flags() {
        let attrs = Attributes {
            bold: true,
            underline: true,
            inverse: true,
            ..Default::default()
        };
        let word = attrs.encode();
        assert_ne!(word & (1 << 18), 0);
        assert_ne!(word & (1 << 19), 0);
        assert_ne!(word & (1 << 20), 0);
        assert_eq!(word & 0x1FF, 256);
        assert_eq!((word >> 9) & 0x1FF, 257);
    }

    #[test]
    fn test_attributes_reset() {
        let mut attrs = Attributes {
            fg: Color::Indexed(2),
            bold: true,
            ..Default::default()
        };
        attrs.reset();
        assert_eq!(attrs, Attributes::default());
    }
}
