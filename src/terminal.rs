//! Terminal Writer
//!
//! Ties the parser and the screen together: `write` is the single entry
//! point for feeding bytes in. Every action the parser produces is applied
//! to the screen in byte order, and each call reports one damage descriptor
//! covering the rows that changed.

use tracing::debug;

use crate::core::{Color, EraseMode, Mode, Modes, Screen, Snapshot};
use crate::error::{Error, Result};
use crate::parser::{Action, ControlCode, CsiAction, EscAction, OscAction, Parser};

/// Inclusive row span changed by a `write` or `resize`
///
/// An over-approximation is allowed: the span covers at least every row
/// whose content changed, and may cover more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    /// First changed row (0-indexed)
    pub first_row: usize,
    /// Last changed row (0-indexed, inclusive)
    pub last_row: usize,
}

/// A headless terminal: byte stream in, queryable screen state out
pub struct Terminal {
    screen: Screen,
    parser: Parser,
}

impl Terminal {
    /// Create a terminal with the given dimensions
    ///
    /// Fails if either dimension is zero; this is the one caller-visible
    /// error in the core.
    pub fn new(cols: usize, rows: usize) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(Error::InvalidDimensions { cols, rows });
        }
        let mut screen = Screen::new(cols, rows);
        // The initial all-dirty state is not damage to report
        screen.take_damage();
        Ok(Self {
            screen,
            parser: Parser::new(),
        })
    }

    /// Get a reference to the screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn cols(&self) -> usize {
        self.screen.cols()
    }

    pub fn rows(&self) -> usize {
        self.screen.rows()
    }

    /// Window title, if one was set via OSC 0/2
    pub fn title(&self) -> &str {
        &self.screen.title
    }

    /// Set or clear a named mode
    pub fn set_mode(&mut self, mode: Mode, enabled: bool) {
        self.screen.set_mode(mode, enabled);
    }

    /// Take a display-ready snapshot; a pure read
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_screen(&self.screen)
    }

    /// Feed bytes into the terminal
    ///
    /// Parses the bytes (continuing any sequence left pending by an earlier
    /// call), applies every resulting action in order, and returns a single
    /// damage descriptor for the rows that changed - `None` if no row
    /// content changed (pure cursor motion, empty input, ...).
    pub fn write(&mut self, bytes: &[u8]) -> Option<Damage> {
        let actions = self.parser.feed(bytes);
        for action in actions {
            self.apply_action(action);
        }
        self.screen
            .take_damage()
            .map(|(first_row, last_row)| Damage {
                first_row,
                last_row,
            })
    }

    /// Resize the terminal, preserving content in place
    ///
    /// Fails if either dimension is zero. Always reports the full grid as
    /// damaged.
    pub fn resize(&mut self, cols: usize, rows: usize) -> Result<Damage> {
        if cols == 0 || rows == 0 {
            return Err(Error::InvalidDimensions { cols, rows });
        }
        self.screen.resize(cols, rows);
        self.screen.take_damage();
        Ok(Damage {
            first_row: 0,
            last_row: rows - 1,
        })
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Print(c) => self.screen.print(c),
            Action::Control(code) => self.execute_control(code),
            Action::Csi(csi) => self.execute_csi(&csi),
            Action::Esc(esc) => self.execute_esc(esc),
            Action::Osc(osc) => self.execute_osc(osc),
            Action::Unknown(bytes) => {
                debug!(?bytes, "ignoring unrecognized sequence");
            }
        }
    }

    fn execute_control(&mut self, code: ControlCode) {
        match code {
            ControlCode::Bell => self.screen.bell(),
            ControlCode::Backspace => self.screen.backspace(),
            ControlCode::Tab => self.screen.tab(),
            ControlCode::LineFeed | ControlCode::VerticalTab | ControlCode::FormFeed => {
                self.screen.linefeed()
            }
            ControlCode::CarriageReturn => self.screen.carriage_return(),
        }
    }

    fn execute_csi(&mut self, csi: &CsiAction) {
        if csi.private_marker.is_some() {
            self.execute_csi_private(csi);
            return;
        }

        let n = csi.param_or_default(0, 1) as usize;

        match csi.final_byte {
            // Cursor movement
            b'A' => self.screen.move_cursor_up(n),
            b'B' | b'e' => self.screen.move_cursor_down(n),
            b'C' | b'a' => self.screen.move_cursor_forward(n),
            b'D' => self.screen.move_cursor_backward(n),
            b'E' => {
                // CNL - Cursor Next Line
                self.screen.move_cursor_down(n);
                self.screen.cursor_mut().carriage_return();
            }
            b'F' => {
                // CPL - Cursor Previous Line
                self.screen.move_cursor_up(n);
                self.screen.cursor_mut().carriage_return();
            }
            b'G' | b'`' => {
                // CHA / HPA - column absolute (1-indexed)
                self.screen.move_cursor_to_col(n.saturating_sub(1));
            }
            b'H' | b'f' => {
                // CUP / HVP - cursor position (1-indexed)
                let row = csi.param_or_default(0, 1).saturating_sub(1) as usize;
                let col = csi.param_or_default(1, 1).saturating_sub(1) as usize;
                self.screen.move_cursor_to(row, col);
            }
            b'd' => {
                // VPA - row absolute (1-indexed)
                self.screen.move_cursor_to_row(n.saturating_sub(1));
            }

            // Erase operations
            b'J' => {
                if let Some(mode) = erase_mode(csi.param(0, 0)) {
                    self.screen.erase_in_display(mode);
                }
            }
            b'K' => {
                if let Some(mode) = erase_mode(csi.param(0, 0)) {
                    self.screen.erase_in_line(mode);
                }
            }
            b'X' => self.screen.erase_chars(n),

            // Insert/delete
            b'L' => self.screen.insert_lines(n),
            b'M' => self.screen.delete_lines(n),
            b'@' => self.screen.insert_chars(n),
            b'P' => self.screen.delete_chars(n),

            // Scrolling
            b'S' => self.screen.scroll_up(n),
            b'T' => self.screen.scroll_down(n),

            // DECSTBM - scroll region (1-indexed, inclusive)
            b'r' => {
                let top = csi.param_or_default(0, 1).saturating_sub(1) as usize;
                let bottom = csi
                    .param_or_default(1, self.screen.rows() as u16)
                    .saturating_sub(1) as usize;
                self.screen.set_scroll_region(top, bottom);
            }

            // SGR - select graphic rendition
            b'm' => self.execute_sgr(&csi.params),

            // Tab clear
            b'g' => match csi.param(0, 0) {
                0 => self.screen.clear_tab_stop(),
                3 => self.screen.clear_all_tab_stops(),
                other => debug!(mode = other, "ignoring TBC mode"),
            },

            // ANSI save/restore cursor
            b's' if csi.params.is_empty() => self.screen.save_cursor(),
            b'u' if csi.params.is_empty() => self.screen.restore_cursor(),

            // SM / RM - ANSI modes
            b'h' => self.set_ansi_modes(csi, true),
            b'l' => self.set_ansi_modes(csi, false),

            // DSR - device status report; this core has no reply channel
            b'n' => debug!(kind = csi.param(0, 0), "ignoring DSR request"),

            _ => {
                debug!(
                    final_byte = %(csi.final_byte as char),
                    params = ?csi.params,
                    "ignoring unhandled CSI"
                );
            }
        }
    }

    fn execute_csi_private(&mut self, csi: &CsiAction) {
        match csi.final_byte {
            b'h' | b'l' => {
                let enable = csi.final_byte == b'h';
                for &param in &csi.params {
                    match Modes::dec_mode(param) {
                        Some(mode) => self.screen.set_mode(mode, enable),
                        None => debug!(number = param, enable, "ignoring DEC private mode"),
                    }
                }
            }
            _ => {
                debug!(
                    final_byte = %(csi.final_byte as char),
                    params = ?csi.params,
                    "ignoring private CSI"
                );
            }
        }
    }

    fn set_ansi_modes(&mut self, csi: &CsiAction, enable: bool) {
        for &param in &csi.params {
            match Modes::ansi_mode(param) {
                Some(mode) => self.screen.set_mode(mode, enable),
                None => debug!(number = param, enable, "ignoring ANSI mode"),
            }
        }
    }

    fn execute_sgr(&mut self, params: &[u16]) {
        let attrs = &mut self.screen.cursor_mut().attrs;

        if params.is_empty() {
            attrs.reset();
            return;
        }

        let mut i = 0;
        while i < params.len() {
            match params[i] {
                0 => attrs.reset(),
                1 => attrs.bold = true,
                4 => attrs.underline = true,
                7 => attrs.inverse = true,
                22 => attrs.bold = false,
                24 => attrs.underline = false,
                27 => attrs.inverse = false,
                30..=37 => attrs.fg = Color::Indexed((params[i] - 30) as u8),
                39 => attrs.fg = Color::Default,
                40..=47 => attrs.bg = Color::Indexed((params[i] - 40) as u8),
                49 => attrs.bg = Color::Default,
                90..=97 => attrs.fg = Color::Indexed((params[i] - 90 + 8) as u8),
                100..=107 => attrs.bg = Color::Indexed((params[i] - 100 + 8) as u8),
                38 | 48 => {
                    let is_fg = params[i] == 38;
                    match params.get(i + 1) {
                        Some(&5) => {
                            // 256-color: 38;5;n
                            if let Some(&index) = params.get(i + 2) {
                                let color = Color::Indexed(index.min(255) as u8);
                                if is_fg {
                                    attrs.fg = color;
                                } else {
                                    attrs.bg = color;
                                }
                            }
                            i += 2;
                        }
                        Some(&2) => {
                            // Truecolor: 38;2;r;g;b - parsed but not stored;
                            // the packed attribute word is 256-color only
                            debug!("ignoring truecolor SGR");
                            i += 4;
                        }
                        _ => {}
                    }
                }
                other => debug!(code = other, "ignoring SGR code"),
            }
            i += 1;
        }
    }

    fn execute_esc(&mut self, esc: EscAction) {
        match esc {
            EscAction::SaveCursor => self.screen.save_cursor(),
            EscAction::RestoreCursor => self.screen.restore_cursor(),
            EscAction::Index => self.screen.index(),
            EscAction::ReverseIndex => self.screen.reverse_index(),
            EscAction::NextLine => self.screen.next_line(),
            EscAction::TabSet => self.screen.set_tab_stop(),
            EscAction::FullReset => {
                self.screen.reset();
                self.parser.reset();
            }
            EscAction::Unknown(bytes) => {
                debug!(?bytes, "ignoring unknown ESC sequence");
            }
        }
    }

    fn execute_osc(&mut self, osc: OscAction) {
        match osc {
            OscAction::SetTitle(title) => self.screen.title = title,
            OscAction::Unknown { command, data } => {
                debug!(command, data_len = data.len(), "ignoring OSC command");
            }
        }
    }
}

fn erase_mode(param: u16) -> Option<EraseMode> {
    match param {
        0 => Some(EraseMode::ToEnd),
        1 => Some(EraseMode::ToStart),
        2 => Some(EraseMode::All),
        _ => None,
    }
}
