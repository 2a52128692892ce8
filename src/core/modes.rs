//! Terminal mode flags
//!
//! The mode table owned by the screen. Modes are set either by the host
//! through [`Mode`] or by escape sequences (SM/RM and DECSET/DECRST).

use serde::{Deserialize, Serialize};

/// Host-settable modes, addressed by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Printing past the last column wraps to the next row (DECAWM)
    Autowrap,
    /// Line feed implies carriage return (LNM)
    Crlf,
    /// Vertical cursor addressing is relative to the scroll region (DECOM)
    Origin,
    /// Printing shifts the rest of the row right instead of overwriting (IRM)
    Insert,
    /// The cursor should be drawn (DECTCEM)
    CursorVisible,
}

/// Terminal mode table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modes {
    /// DECAWM - auto wrap mode
    pub autowrap: bool,
    /// LNM - line feed/new line mode (LF implies CR)
    pub crlf: bool,
    /// DECOM - origin mode
    pub origin: bool,
    /// IRM - insert/replace mode
    pub insert: bool,
    /// DECTCEM - text cursor enable
    pub cursor_visible: bool,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            autowrap: true,
            crlf: false,
            origin: false,
            insert: false,
            cursor_visible: true,
        }
    }
}

impl Modes {
    /// Create new default modes
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all modes to default values
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Set or clear a named mode
    pub fn set(&mut self, mode: Mode, enabled: bool) {
        match mode {
            Mode::Autowrap => self.autowrap = enabled,
            Mode::Crlf => self.crlf = enabled,
            Mode::Origin => self.origin = enabled,
            Mode::Insert => self.insert = enabled,
            Mode::CursorVisible => self.cursor_visible = enabled,
        }
    }

    /// Read a named mode
    pub fn get(&self, mode: Mode) -> bool {
        match mode {
            Mode::Autowrap => self.autowrap,
            Mode::Crlf => self.crlf,
            Mode::Origin => self.origin,
            Mode::Insert => self.insert,
            Mode::CursorVisible => self.cursor_visible,
        }
    }

    /// Apply a DEC private mode number (CSI ? Ps h / l)
    ///
    /// Returns the named mode when the number maps to one this core models,
    /// `None` when it should be ignored.
    pub fn dec_mode(number: u16) -> Option<Mode> {
        match number {
            6 => Some(Mode::Origin),
            7 => Some(Mode::Autowrap),
            25 => Some(Mode::CursorVisible),
            _ => None,
        }
    }

    /// Apply an ANSI mode number (CSI Ps h / l)
    pub fn ansi_mode(number: u16) -> Option<Mode> {
        match number {
            4 => Some(Mode::Insert),
            20 => Some(Mode::Crlf),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_default() {
        let modes = Modes::new();
        assert!(modes.autowrap);
        assert!(!modes.crlf);
        assert!(!modes.origin);
        assert!(!modes.insert);
        assert!(modes.cursor_visible);
    }

    #[test]
    fn test_set_get() {
        let mut modes = Modes::new();

        modes.set(Mode::Crlf, true);
        assert!(modes.get(Mode::Crlf));

        modes.set(Mode::Autowrap, false);
        assert!(!modes.get(Mode::Autowrap));

        modes.reset();
        assert!(modes.autowrap);
        assert!(!modes.crlf);
    }

    #[test]
    fn test_dec_mode_numbers() {
        assert_eq!(Modes::dec_mode(6), Some(Mode::Origin));
        assert_eq!(Modes::dec_mode(7), Some(Mode::Autowrap));
        assert_eq!(Modes::dec_mode(25), Some(Mode::CursorVisible));
        assert_eq!(Modes::dec_mode(1049), None);
        assert_eq!(Modes::dec_mode(9999), None);
    }

    #[test]
    fn test_ansi_mode_numbers() {
        assert_eq!(Modes::ansi_mode(4), Some(Mode::Insert));
        assert_eq!(Modes::ansi_mode(20), Some(Mode::Crlf));
        assert_eq!(Modes::ansi_mode(12), None);
    }
}
