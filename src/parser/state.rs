//! Parser State Machine
//!
//! A byte-oriented state machine in the VT500 style: bytes go in, typed
//! actions come out. All transient state lives in struct fields, so input
//! split at arbitrary chunk boundaries parses exactly like unsplit input.
//!
//! States:
//! - Ground: normal text (with incremental UTF-8 decoding)
//! - Escape / EscapeIntermediate: after ESC, waiting for the final byte
//! - CsiEntry / CsiParam / CsiIntermediate: collecting a CSI sequence
//! - CsiIgnore: malformed CSI, consumed and reported as unknown
//! - OscString: collecting an OSC payload until BEL or ST
//! - StringConsume: DCS/SOS/PM/APC payloads, consumed and reported as
//!   unknown (none of them are implemented)
//!
//! Reference: "A parser for DEC's ANSI-compatible video terminals",
//! <https://vt100.net/emu/dec_ansi_parser>

use super::actions::{Action, ControlCode, CsiAction, EscAction, OscAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiParam,
    CsiIntermediate,
    CsiIgnore,
    OscString,
    StringConsume,
}

/// The terminal escape-sequence parser
#[derive(Debug)]
pub struct Parser {
    state: State,
    /// Raw bytes of the in-flight sequence, reported on abort
    raw: Vec<u8>,
    /// Intermediate bytes collected during parsing
    intermediates: Vec<u8>,
    /// Parameters for CSI sequences
    params: Vec<u16>,
    /// Current parameter being accumulated
    current_param: u16,
    /// Whether the current parameter has seen a digit
    param_has_digit: bool,
    /// Private marker byte (?, >, <, =) if present
    private_marker: Option<u8>,
    /// OSC command number
    osc_command: u16,
    /// Whether the OSC command number is complete (first ';' seen)
    osc_command_parsed: bool,
    /// OSC string payload
    osc_string: Vec<u8>,
    /// Pending ESC inside a string state (possible ST)
    string_esc: bool,
    /// UTF-8 decoder state
    utf8_buffer: Vec<u8>,
    utf8_remaining: u8,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a new parser in the ground state
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            raw: Vec::with_capacity(32),
            intermediates: Vec::with_capacity(4),
            params: Vec::with_capacity(16),
            current_param: 0,
            param_has_digit: false,
            private_marker: None,
            osc_command: 0,
            osc_command_parsed: false,
            osc_string: Vec::with_capacity(64),
            string_esc: false,
            utf8_buffer: Vec::with_capacity(4),
            utf8_remaining: 0,
        }
    }

    /// Reset the parser to the ground state, dropping any partial sequence
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.raw.clear();
        self.clear_sequence();
        self.utf8_buffer.clear();
        self.utf8_remaining = 0;
    }

    fn clear_sequence(&mut self) {
        self.intermediates.clear();
        self.params.clear();
        self.current_param = 0;
        self.param_has_digit = false;
        self.private_marker = None;
        self.osc_command = 0;
        self.osc_command_parsed = false;
        self.osc_string.clear();
        self.string_esc = false;
    }

    /// Feed a chunk of bytes, returning the actions it completes
    ///
    /// A sequence split across chunks stays pending in parser state and is
    /// emitted by the call that supplies its final byte.
    pub fn feed(&mut self, data: &[u8]) -> Vec<Action> {
        let mut actions = Vec::new();
        for &byte in data {
            self.step(byte, &mut actions);
        }
        actions
    }

    fn step(&mut self, byte: u8, out: &mut Vec<Action>) {
        // A pending UTF-8 scalar takes priority; anything that is not a
        // continuation byte aborts it.
        if self.state == State::Ground && self.utf8_remaining > 0 {
            if (0x80..=0xBF).contains(&byte) {
                self.utf8_buffer.push(byte);
                self.utf8_remaining -= 1;
                if self.utf8_remaining == 0 {
                    let s = String::from_utf8_lossy(&self.utf8_buffer);
                    out.push(Action::Print(s.chars().next().unwrap_or('\u{FFFD}')));
                    self.utf8_buffer.clear();
                }
                return;
            }
            self.utf8_buffer.clear();
            self.utf8_remaining = 0;
            out.push(Action::Print('\u{FFFD}'));
            // fall through and process the byte normally
        }

        // A pending ESC inside a string is either ST (ESC \) or an abort
        if self.string_esc {
            self.string_esc = false;
            if byte == 0x5C {
                self.terminate_string(out);
                return;
            }
            self.abort_sequence(out);
            self.enter_escape();
            self.step(byte, out);
            return;
        }

        if byte < 0x20 {
            self.process_c0(byte, out);
            return;
        }

        // DEL is ignored everywhere
        if byte == 0x7F {
            return;
        }

        // C1 controls, 7-bit-equivalent handling
        if (0x80..=0x9F).contains(&byte) && self.state != State::Ground {
            self.process_c1(byte, out);
            return;
        }

        match self.state {
            State::Ground => self.process_ground(byte, out),
            State::Escape => self.process_escape(byte, out),
            State::EscapeIntermediate => self.process_escape_intermediate(byte, out),
            State::CsiEntry => self.process_csi_entry(byte, out),
            State::CsiParam => self.process_csi_param(byte, out),
            State::CsiIntermediate => self.process_csi_intermediate(byte, out),
            State::CsiIgnore => self.process_csi_ignore(byte, out),
            State::OscString => self.process_osc_string(byte),
            State::StringConsume => self.raw.push(byte),
        }
    }

    /// Abort the in-flight sequence, surfacing its raw bytes
    fn abort_sequence(&mut self, out: &mut Vec<Action>) {
        if !self.raw.is_empty() {
            out.push(Action::Unknown(std::mem::take(&mut self.raw)));
        }
        self.clear_sequence();
        self.state = State::Ground;
    }

    fn enter_escape(&mut self) {
        self.clear_sequence();
        self.state = State::Escape;
        self.raw.clear();
        self.raw.push(0x1B);
    }

    fn process_c0(&mut self, byte: u8, out: &mut Vec<Action>) {
        match byte {
            // ESC starts a new sequence from anywhere, abandoning any
            // partial one
            0x1B => {
                match self.state {
                    State::Ground | State::Escape => {}
                    // ESC inside a string may be the ST terminator
                    State::OscString | State::StringConsume => {
                        self.string_esc = true;
                        return;
                    }
                    _ => self.abort_sequence(out),
                }
                self.enter_escape();
            }
            // CAN and SUB cancel the sequence in progress
            0x18 | 0x1A => {
                if self.state != State::Ground {
                    self.abort_sequence(out);
                }
            }
            0x07 if self.state == State::OscString => {
                // BEL terminates OSC (xterm convention)
                self.terminate_string(out);
            }
            _ => match self.state {
                State::OscString | State::StringConsume => {
                    // Other C0 controls are swallowed inside strings
                }
                _ => {
                    if let Some(code) = ControlCode::from_byte(byte) {
                        out.push(Action::Control(code));
                    }
                }
            },
        }
    }

    fn process_c1(&mut self, byte: u8, out: &mut Vec<Action>) {
        match byte {
            // ST terminates string states
            0x9C => match self.state {
                State::OscString | State::StringConsume => self.terminate_string(out),
                _ => self.abort_sequence(out),
            },
            // Inside strings, other C1 bytes are payload
            _ if matches!(self.state, State::OscString | State::StringConsume) => {
                if self.state == State::OscString {
                    self.osc_string.push(byte);
                } else {
                    self.raw.push(byte);
                }
            }
            _ => {
                // Unexpected C1 mid-sequence: abort to ground
                self.raw.push(byte);
                self.abort_sequence(out);
            }
        }
    }

    fn process_ground(&mut self, byte: u8, out: &mut Vec<Action>) {
        match byte {
            0x20..=0x7E => out.push(Action::Print(byte as char)),
            // UTF-8 lead bytes
            0xC0..=0xDF => self.start_utf8(byte, 1),
            0xE0..=0xEF => self.start_utf8(byte, 2),
            0xF0..=0xF7 => self.start_utf8(byte, 3),
            // Stray continuation or invalid lead byte
            _ => out.push(Action::Print('\u{FFFD}')),
        }
    }

    fn start_utf8(&mut self, byte: u8, remaining: u8) {
        self.utf8_buffer.clear();
        self.utf8_buffer.push(byte);
        self.utf8_remaining = remaining;
    }

    fn process_escape(&mut self, byte: u8, out: &mut Vec<Action>) {
        self.raw.push(byte);
        match byte {
            0x20..=0x2F => {
                self.intermediates.push(byte);
                self.state = State::EscapeIntermediate;
            }
            // CSI (ESC [)
            0x5B => self.state = State::CsiEntry,
            // OSC (ESC ])
            0x5D => self.state = State::OscString,
            // DCS (ESC P), SOS (ESC X), PM (ESC ^), APC (ESC _)
            0x50 | 0x58 | 0x5E | 0x5F => self.state = State::StringConsume,
            // Final bytes
            0x30..=0x7E => self.dispatch_esc(byte, out),
            _ => self.abort_sequence(out),
        }
    }

    fn process_escape_intermediate(&mut self, byte: u8, out: &mut Vec<Action>) {
        self.raw.push(byte);
        match byte {
            0x20..=0x2F => self.intermediates.push(byte),
            0x30..=0x7E => self.dispatch_esc(byte, out),
            _ => self.abort_sequence(out),
        }
    }

    fn dispatch_esc(&mut self, final_byte: u8, out: &mut Vec<Action>) {
        let action = if self.intermediates.is_empty() {
            match final_byte {
                b'7' => EscAction::SaveCursor,
                b'8' => EscAction::RestoreCursor,
                b'D' => EscAction::Index,
                b'M' => EscAction::ReverseIndex,
                b'E' => EscAction::NextLine,
                b'H' => EscAction::TabSet,
                b'c' => EscAction::FullReset,
                _ => EscAction::Unknown(vec![final_byte]),
            }
        } else {
            let mut seq = std::mem::take(&mut self.intermediates);
            seq.push(final_byte);
            EscAction::Unknown(seq)
        };

        out.push(Action::Esc(action));
        self.raw.clear();
        self.clear_sequence();
        self.state = State::Ground;
    }

    fn process_csi_entry(&mut self, byte: u8, out: &mut Vec<Action>) {
        self.raw.push(byte);
        match byte {
            0x30..=0x39 => {
                self.current_param = u16::from(byte - b'0');
                self.param_has_digit = true;
                self.state = State::CsiParam;
            }
            b';' | b':' => {
                self.params.push(0);
                self.state = State::CsiParam;
            }
            b'?' | b'>' | b'<' | b'=' => {
                self.private_marker = Some(byte);
                self.state = State::CsiParam;
            }
            0x20..=0x2F => {
                self.intermediates.push(byte);
                self.state = State::CsiIntermediate;
            }
            0x40..=0x7E => self.dispatch_csi(byte, out),
            _ => self.state = State::CsiIgnore,
        }
    }

    fn process_csi_param(&mut self, byte: u8, out: &mut Vec<Action>) {
        self.raw.push(byte);
        match byte {
            0x30..=0x39 => {
                self.current_param = self
                    .current_param
                    .saturating_mul(10)
                    .saturating_add(u16::from(byte - b'0'));
                self.param_has_digit = true;
            }
            b';' | b':' => {
                self.params.push(self.current_param);
                self.current_param = 0;
                self.param_has_digit = false;
            }
            0x20..=0x2F => {
                if self.param_has_digit {
                    self.params.push(self.current_param);
                    self.current_param = 0;
                    self.param_has_digit = false;
                }
                self.intermediates.push(byte);
                self.state = State::CsiIntermediate;
            }
            0x40..=0x7E => self.dispatch_csi(byte, out),
            // Private markers are only valid immediately after the CSI
            _ => self.state = State::CsiIgnore,
        }
    }

    fn process_csi_intermediate(&mut self, byte: u8, out: &mut Vec<Action>) {
        self.raw.push(byte);
        match byte {
            0x20..=0x2F => self.intermediates.push(byte),
            0x40..=0x7E => self.dispatch_csi(byte, out),
            _ => self.state = State::CsiIgnore,
        }
    }

    fn process_csi_ignore(&mut self, byte: u8, out: &mut Vec<Action>) {
        self.raw.push(byte);
        if (0x40..=0x7E).contains(&byte) {
            self.abort_sequence(out);
        }
    }

    fn dispatch_csi(&mut self, final_byte: u8, out: &mut Vec<Action>) {
        if self.param_has_digit || !self.params.is_empty() {
            self.params.push(self.current_param);
        }

        out.push(Action::Csi(CsiAction {
            final_byte,
            params: std::mem::take(&mut self.params),
            intermediates: std::mem::take(&mut self.intermediates),
            private_marker: self.private_marker,
        }));

        self.raw.clear();
        self.clear_sequence();
        self.state = State::Ground;
    }

    fn process_osc_string(&mut self, byte: u8) {
        self.raw.push(byte);
        if !self.osc_command_parsed {
            if byte.is_ascii_digit() {
                self.osc_command = self
                    .osc_command
                    .saturating_mul(10)
                    .saturating_add(u16::from(byte - b'0'));
                return;
            }
            if byte == b';' {
                self.osc_command_parsed = true;
                return;
            }
            // Malformed command prefix: collect as payload
            self.osc_command_parsed = true;
        }
        self.osc_string.push(byte);
    }

    /// Terminate the current string sequence (BEL or ST received)
    fn terminate_string(&mut self, out: &mut Vec<Action>) {
        match self.state {
            State::OscString => {
                let payload = String::from_utf8_lossy(&self.osc_string).to_string();
                let action = match self.osc_command {
                    0 | 2 => OscAction::SetTitle(payload),
                    command => OscAction::Unknown {
                        command,
                        data: payload,
                    },
                };
                out.push(Action::Osc(action));
                self.raw.clear();
            }
            State::StringConsume => {
                out.push(Action::Unknown(std::mem::take(&mut self.raw)));
            }
            _ => {}
        }
        self.clear_sequence();
        self.state = State::Ground;
    }
}
