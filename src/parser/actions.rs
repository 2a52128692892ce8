//! Terminal Actions
//!
//! Semantic events produced by the parser, applied to the screen by the
//! writer. Actions are plain values so tests can compare them directly.

use serde::{Deserialize, Serialize};

/// A terminal action produced by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Print a character at the cursor
    Print(char),

    /// Execute a C0 control character
    Control(ControlCode),

    /// Execute a CSI (Control Sequence Introducer) command
    Csi(CsiAction),

    /// Execute an ESC sequence (non-CSI)
    Esc(EscAction),

    /// Execute an OSC (Operating System Command)
    Osc(OscAction),

    /// Bytes of an aborted or unrecognized sequence
    ///
    /// Surfaced for diagnostics only; the writer never mutates state for
    /// these.
    Unknown(Vec<u8>),
}

/// C0 control codes the screen reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlCode {
    /// BEL - Bell
    Bell,
    /// BS - Backspace
    Backspace,
    /// HT - Horizontal Tab
    Tab,
    /// LF - Line Feed
    LineFeed,
    /// VT - Vertical Tab (treated as LF)
    VerticalTab,
    /// FF - Form Feed (treated as LF)
    FormFeed,
    /// CR - Carriage Return
    CarriageReturn,
}

impl ControlCode {
    /// Map a C0 byte to a control code; `None` for bytes the screen ignores
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x07 => Some(ControlCode::Bell),
            0x08 => Some(ControlCode::Backspace),
            0x09 => Some(ControlCode::Tab),
            0x0A => Some(ControlCode::LineFeed),
            0x0B => Some(ControlCode::VerticalTab),
            0x0C => Some(ControlCode::FormFeed),
            0x0D => Some(ControlCode::CarriageReturn),
            _ => None,
        }
    }
}

/// A parsed CSI sequence: `ESC [ <params> <intermediates> <final>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsiAction {
    /// The final byte that identifies the command
    pub final_byte: u8,
    /// Numeric parameters (semicolon-separated; omitted entries are 0)
    pub params: Vec<u16>,
    /// Intermediate bytes (0x20-0x2F)
    pub intermediates: Vec<u8>,
    /// Private marker (`?`, `>`, `<`, `=`) if present
    pub private_marker: Option<u8>,
}

impl CsiAction {
    /// Get parameter at index, or `default` if not present
    pub fn param(&self, index: usize, default: u16) -> u16 {
        self.params.get(index).copied().unwrap_or(default)
    }

    /// Get parameter at index, treating both missing and 0 as `default`
    ///
    /// Most CSI commands document an omitted count as 1; streams commonly
    /// send an explicit 0 to mean the same thing.
    pub fn param_or_default(&self, index: usize, default: u16) -> u16 {
        match self.params.get(index) {
            Some(&0) | None => default,
            Some(&v) => v,
        }
    }
}

/// ESC sequence actions (non-CSI)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscAction {
    /// ESC 7 - Save cursor (DECSC)
    SaveCursor,
    /// ESC 8 - Restore cursor (DECRC)
    RestoreCursor,
    /// ESC D - Index (IND): cursor down, scroll at bottom
    Index,
    /// ESC M - Reverse Index (RI): cursor up, scroll at top
    ReverseIndex,
    /// ESC E - Next Line (NEL): start of next line
    NextLine,
    /// ESC H - Horizontal Tab Set (HTS)
    TabSet,
    /// ESC c - Full Reset (RIS)
    FullReset,
    /// Unrecognized ESC sequence (intermediates + final byte)
    Unknown(Vec<u8>),
}

/// OSC (Operating System Command) actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OscAction {
    /// Set window title (OSC 0 or OSC 2)
    SetTitle(String),
    /// Unknown/unsupported OSC command
    Unknown { command: u16, data: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_code_from_byte() {
        assert_eq!(ControlCode::from_byte(0x0A), Some(ControlCode::LineFeed));
        assert_eq!(
            ControlCode::from_byte(0x0D),
            Some(ControlCode::CarriageReturn)
        );
        assert_eq!(ControlCode::from_byte(0x07), Some(ControlCode::Bell));
        assert_eq!(ControlCode::from_byte(0x00), None);
        assert_eq!(ControlCode::from_byte(0x0E), None);
    }

    #[test]
    fn test_csi_action_param() {
        let csi = CsiAction {
            final_byte: b'H',
            params: vec![10, 20],
            intermediates: vec![],
            private_marker: None,
        };

        assert_eq!(csi.param(0, 1), 10);
        assert_eq!(csi.param(1, 1), 20);
        assert_eq!(csi.param(2, 1), 1);
    }

    #[test]
    fn test_csi_action_param_or_default() {
        let csi = CsiAction {
            final_byte: b'H',
            params: vec![0, 5],
            intermediates: vec![],
            private_marker: None,
        };

        assert_eq!(csi.param_or_default(0, 1), 1);
        assert_eq!(csi.param_or_default(1, 1), 5);
        assert_eq!(csi.param_or_default(2, 1), 1);
    }
}
