//! Screen model implementation
//!
//! The screen is the terminal buffer: it owns the grid, the cursor, the mode
//! table, tab stops, and the scroll region, and applies print/control events
//! to them. It also tracks which rows changed so the writer can report a
//! damage span after each chunk of input.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::cursor::{Cursor, SavedCursor};
use super::grid::Grid;
use super::modes::{Mode, Modes};

/// Which part of a line or of the display an erase affects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EraseMode {
    /// From the cursor to the end
    ToEnd,
    /// From the start to the cursor (inclusive)
    ToStart,
    /// The whole line / display
    All,
}

/// The terminal buffer: grid + cursor + modes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screen {
    grid: Grid,
    cursor: Cursor,
    saved_cursor: SavedCursor,
    /// Terminal modes
    pub modes: Modes,
    /// Scroll region top (0-indexed, inclusive)
    scroll_top: usize,
    /// Scroll region bottom (0-indexed, inclusive)
    scroll_bottom: usize,
    /// Tab stops (column indices)
    tab_stops: Vec<bool>,
    /// Window title (set via OSC 0/2)
    pub title: String,
    /// Number of BEL characters seen
    bell_count: u64,
    /// Dirty rows since the last damage collection
    dirty_lines: Vec<bool>,
}

fn default_tab_stops(cols: usize) -> Vec<bool> {
    let mut stops = vec![false; cols];
    for i in (8..cols).step_by(8) {
        stops[i] = true;
    }
    stops
}

impl Screen {
    /// Create a new screen with the given dimensions
    ///
    /// Dimensions are validated by the caller ([`crate::Terminal::new`]);
    /// the screen itself assumes both are nonzero.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            grid: Grid::new(cols, rows),
            cursor: Cursor::new(),
            saved_cursor: SavedCursor::default(),
            modes: Modes::default(),
            scroll_top: 0,
            scroll_bottom: rows.saturating_sub(1),
            tab_stops: default_tab_stops(cols),
            title: String::new(),
            bell_count: 0,
            dirty_lines: vec![true; rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn scroll_bottom(&self) -> usize {
        self.scroll_bottom
    }

    pub fn bell_count(&self) -> u64 {
        self.bell_count
    }

    /// Get a cell at the given position
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.grid.cell(col, row)
    }

    fn mark_line_dirty(&mut self, row: usize) {
        if let Some(d) = self.dirty_lines.get_mut(row) {
            *d = true;
        }
    }

    fn mark_lines_dirty(&mut self, top: usize, bottom: usize) {
        for row in top..=bottom.min(self.dirty_lines.len().saturating_sub(1)) {
            self.dirty_lines[row] = true;
        }
    }

    fn mark_all_dirty(&mut self) {
        for d in &mut self.dirty_lines {
            *d = true;
        }
    }

    /// Collect and clear the dirty row span: `Some((first, last))` inclusive,
    /// or `None` if no row content changed since the last collection
    pub fn take_damage(&mut self) -> Option<(usize, usize)> {
        let first = self.dirty_lines.iter().position(|d| *d)?;
        let last = self.dirty_lines.iter().rposition(|d| *d)?;
        for d in &mut self.dirty_lines {
            *d = false;
        }
        Some((first, last))
    }

    /// Set or clear a named mode
    ///
    /// Changing origin mode homes the cursor, as DECOM requires.
    pub fn set_mode(&mut self, mode: Mode, enabled: bool) {
        self.modes.set(mode, enabled);
        if mode == Mode::Origin {
            let home_row = if enabled { self.scroll_top } else { 0 };
            self.cursor.move_to(0, home_row, self.cols(), self.rows());
        }
    }

    /// Print a character at the cursor with the current attributes
    pub fn print(&mut self, c: char) {
        let width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(1);

        // Zero-width characters (combining marks) have no cell of their own
        if width == 0 {
            return;
        }

        if self.cursor.pending_wrap {
            self.wrap_cursor();
        }

        let cols = self.cols();

        // A wide character cannot start in the last column
        if width == 2 && self.cursor.col == cols - 1 {
            if self.modes.autowrap {
                let (col, row) = (self.cursor.col, self.cursor.row);
                if let Some(cell) = self.grid.cell_mut(col, row) {
                    cell.reset();
                }
                self.mark_line_dirty(row);
                self.wrap_cursor();
            } else {
                return;
            }
        }

        let attrs = self.cursor.attrs;
        let (col, row) = (self.cursor.col, self.cursor.row);

        if self.modes.insert {
            self.grid.insert_cells(col, row, width);
        }

        if let Some(cell) = self.grid.cell_mut(col, row) {
            cell.ch = Some(c);
            cell.attrs = attrs;
            cell.width = width as u8;
        }

        // Wide characters shadow the following cell
        if width == 2 && col + 1 < cols {
            if let Some(cell) = self.grid.cell_mut(col + 1, row) {
                cell.ch = None;
                cell.attrs = attrs;
                cell.width = 0;
            }
        }

        self.mark_line_dirty(row);

        let new_col = col + width;
        if new_col >= cols {
            self.cursor.col = cols - 1;
            if self.modes.autowrap {
                self.cursor.pending_wrap = true;
            }
        } else {
            self.cursor.col = new_col;
        }
    }

    /// Wrap to column 0 of the next row, scrolling at the region bottom
    fn wrap_cursor(&mut self) {
        self.cursor.pending_wrap = false;
        self.cursor.col = 0;
        self.advance_row();
    }

    /// Move the cursor down one row, scrolling at the region bottom
    fn advance_row(&mut self) {
        if self.cursor.row == self.scroll_bottom {
            self.scroll_up(1);
        } else if self.cursor.row < self.rows() - 1 {
            self.cursor.row += 1;
        }
    }

    /// Handle line feed (LF); in CRLF mode also returns to column 0
    pub fn linefeed(&mut self) {
        self.cursor.pending_wrap = false;
        self.advance_row();
        if self.modes.crlf {
            self.cursor.col = 0;
        }
    }

    /// Handle carriage return (CR)
    pub fn carriage_return(&mut self) {
        self.cursor.carriage_return();
    }

    /// Handle backspace (BS)
    pub fn backspace(&mut self) {
        self.cursor.pending_wrap = false;
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        }
    }

    /// Handle horizontal tab (HT): advance to the next tab stop
    pub fn tab(&mut self) {
        self.cursor.pending_wrap = false;
        let col = self.cursor.col;

        for i in (col + 1)..self.cols() {
            if self.tab_stops.get(i).copied().unwrap_or(false) {
                self.cursor.col = i;
                return;
            }
        }
        self.cursor.col = self.cols() - 1;
    }

    /// Handle bell (BEL)
    pub fn bell(&mut self) {
        self.bell_count += 1;
    }

    /// Index (IND): move down one row, scrolling at the region bottom
    pub fn index(&mut self) {
        self.cursor.pending_wrap = false;
        self.advance_row();
    }

    /// Reverse index (RI): move up one row, scrolling at the region top
    pub fn reverse_index(&mut self) {
        self.cursor.pending_wrap = false;
        if self.cursor.row == self.scroll_top {
            self.scroll_down(1);
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
        }
    }

    /// Next line (NEL): index plus carriage return
    pub fn next_line(&mut self) {
        self.index();
        self.cursor.col = 0;
    }

    /// Scroll the region up by n lines (content moves up)
    pub fn scroll_up(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let (top, bottom) = (self.scroll_top, self.scroll_bottom);
        self.grid.scroll_up(n, top, bottom);
        self.mark_lines_dirty(top, bottom);
    }

    /// Scroll the region down by n lines (content moves down)
    pub fn scroll_down(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let (top, bottom) = (self.scroll_top, self.scroll_bottom);
        self.grid.scroll_down(n, top, bottom);
        self.mark_lines_dirty(top, bottom);
    }

    /// Set the scroll region (DECSTBM); homes the cursor
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let top = top.min(self.rows() - 1);
        let bottom = bottom.min(self.rows() - 1);

        if top < bottom {
            self.scroll_top = top;
            self.scroll_bottom = bottom;
        } else {
            self.scroll_top = 0;
            self.scroll_bottom = self.rows() - 1;
        }

        let home_row = if self.modes.origin { self.scroll_top } else { 0 };
        self.cursor.move_to(0, home_row, self.cols(), self.rows());
    }

    /// Reset the scroll region to the full screen
    pub fn reset_scroll_region(&mut self) {
        self.scroll_top = 0;
        self.scroll_bottom = self.rows() - 1;
    }

    /// Set a tab stop at the current column (HTS)
    pub fn set_tab_stop(&mut self) {
        let col = self.cursor.col;
        if let Some(stop) = self.tab_stops.get_mut(col) {
            *stop = true;
        }
    }

    /// Clear the tab stop at the current column (TBC 0)
    pub fn clear_tab_stop(&mut self) {
        let col = self.cursor.col;
        if let Some(stop) = self.tab_stops.get_mut(col) {
            *stop = false;
        }
    }

    /// Clear all tab stops (TBC 3)
    pub fn clear_all_tab_stops(&mut self) {
        for stop in &mut self.tab_stops {
            *stop = false;
        }
    }

    /// Erase in display (ED); cursor position is unaffected
    pub fn erase_in_display(&mut self, mode: EraseMode) {
        let (col, row) = (self.cursor.col, self.cursor.row);
        let (cols, rows) = (self.cols(), self.rows());

        match mode {
            EraseMode::ToEnd => {
                if let Some(line) = self.grid.row_mut(row) {
                    line.reset_range(col, cols);
                }
                for r in (row + 1)..rows {
                    if let Some(line) = self.grid.row_mut(r) {
                        line.reset();
                    }
                }
                self.mark_lines_dirty(row, rows - 1);
            }
            EraseMode::ToStart => {
                for r in 0..row {
                    if let Some(line) = self.grid.row_mut(r) {
                        line.reset();
                    }
                }
                if let Some(line) = self.grid.row_mut(row) {
                    line.reset_range(0, col + 1);
                }
                self.mark_lines_dirty(0, row);
            }
            EraseMode::All => {
                self.grid.reset();
                self.mark_all_dirty();
            }
        }
    }

    /// Erase in line (EL); cursor position is unaffected
    pub fn erase_in_line(&mut self, mode: EraseMode) {
        let (col, row) = (self.cursor.col, self.cursor.row);
        let cols = self.cols();

        if let Some(line) = self.grid.row_mut(row) {
            match mode {
                EraseMode::ToEnd => line.reset_range(col, cols),
                EraseMode::ToStart => line.reset_range(0, col + 1),
                EraseMode::All => line.reset(),
            }
        }
        self.mark_line_dirty(row);
    }

    /// Erase n characters at the cursor (ECH); nothing shifts
    pub fn erase_chars(&mut self, n: usize) {
        let (col, row) = (self.cursor.col, self.cursor.row);
        let cols = self.cols();

        if let Some(line) = self.grid.row_mut(row) {
            line.reset_range(col, (col + n).min(cols));
        }
        self.mark_line_dirty(row);
    }

    /// Insert n blank lines at the cursor row (IL), region-bounded
    pub fn insert_lines(&mut self, n: usize) {
        let row = self.cursor.row;
        if n == 0 || row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        self.grid.insert_lines(row, n, self.scroll_bottom);
        self.mark_lines_dirty(row, self.scroll_bottom);
    }

    /// Delete n lines at the cursor row (DL), region-bounded
    pub fn delete_lines(&mut self, n: usize) {
        let row = self.cursor.row;
        if n == 0 || row < self.scroll_top || row > self.scroll_bottom {
            return;
        }
        self.grid.delete_lines(row, n, self.scroll_bottom);
        self.mark_lines_dirty(row, self.scroll_bottom);
    }

    /// Insert n blank characters at the cursor (ICH)
    pub fn insert_chars(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let (col, row) = (self.cursor.col, self.cursor.row);
        self.grid.insert_cells(col, row, n);
        self.mark_line_dirty(row);
    }

    /// Delete n characters at the cursor (DCH)
    pub fn delete_chars(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let (col, row) = (self.cursor.col, self.cursor.row);
        self.grid.delete_cells(col, row, n);
        self.mark_line_dirty(row);
    }

    /// Move the cursor to an absolute position (CUP/HVP), clamped
    ///
    /// In origin mode the row is relative to the scroll region.
    pub fn move_cursor_to(&mut self, row: usize, col: usize) {
        let row = if self.modes.origin {
            (self.scroll_top + row).min(self.scroll_bottom)
        } else {
            row.min(self.rows() - 1)
        };
        let col = col.min(self.cols() - 1);

        self.cursor.col = col;
        self.cursor.row = row;
        self.cursor.pending_wrap = false;
    }

    /// Move the cursor up (CUU), clamped
    pub fn move_cursor_up(&mut self, n: usize) {
        let top = if self.modes.origin { self.scroll_top } else { 0 };
        self.cursor.move_up(n, top);
    }

    /// Move the cursor down (CUD), clamped
    pub fn move_cursor_down(&mut self, n: usize) {
        let bottom = if self.modes.origin {
            self.scroll_bottom
        } else {
            self.rows() - 1
        };
        self.cursor.move_down(n, bottom);
    }

    /// Move the cursor right (CUF), clamped
    pub fn move_cursor_forward(&mut self, n: usize) {
        let cols = self.cols();
        self.cursor.move_right(n, cols);
    }

    /// Move the cursor left (CUB), clamped
    pub fn move_cursor_backward(&mut self, n: usize) {
        self.cursor.move_left(n);
    }

    /// Move the cursor to a column (CHA/HPA), clamped
    pub fn move_cursor_to_col(&mut self, col: usize) {
        let cols = self.cols();
        self.cursor.set_col(col, cols);
    }

    /// Move the cursor to a row (VPA), clamped, origin-aware
    pub fn move_cursor_to_row(&mut self, row: usize) {
        let row = if self.modes.origin {
            (self.scroll_top + row).min(self.scroll_bottom)
        } else {
            row.min(self.rows() - 1)
        };
        self.cursor.row = row;
        self.cursor.pending_wrap = false;
    }

    /// Save cursor position and attributes (DECSC)
    pub fn save_cursor(&mut self) {
        self.saved_cursor = self.cursor.save(self.modes.origin);
    }

    /// Restore cursor position and attributes (DECRC)
    pub fn restore_cursor(&mut self) {
        let saved = self.saved_cursor.clone();
        self.modes.origin = saved.origin_mode;
        self.cursor.restore(&saved, self.cols(), self.rows());
    }

    /// Resize the screen, preserving content in place
    ///
    /// New area takes default cells; the cursor and scroll region are
    /// clamped; tab stops are rebuilt for the new width.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        if cols == self.cols() && rows == self.rows() {
            self.mark_all_dirty();
            return;
        }

        self.grid.resize(cols, rows);
        self.scroll_top = 0;
        self.scroll_bottom = rows - 1;
        self.tab_stops = default_tab_stops(cols);
        self.cursor.clamp(cols, rows);
        self.dirty_lines.resize(rows, true);
        self.mark_all_dirty();
    }

    /// Reset the terminal to its initial state (RIS)
    pub fn reset(&mut self) {
        self.grid.reset();
        self.cursor.reset();
        self.saved_cursor = SavedCursor::default();
        self.modes.reset();
        self.scroll_top = 0;
        self.scroll_bottom = self.rows() - 1;
        self.tab_stops = default_tab_stops(self.cols());
        self.title.clear();
        self.bell_count = 0;
        self.mark_all_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell::Color;

    /// Text content of a row, trailing blanks trimmed
    fn row_text(screen: &Screen, row: usize) -> String {
        let line = screen.grid().row(row).unwrap();
        let mut text: String = line
            .cells
            .iter()
            .filter(|c| !c.is_wide_continuation())
            .map(|c| c.display_char())
            .collect();
        while text.ends_with(' ') {
            text.pop();
        }
        text
    }

    fn print_str(screen: &mut Screen, s: &str) {
        for c in s.chars() {
            screen.print(c);
        }
    }

    #[test]
    fn test_screen_new() {
        let screen = Screen::new(80, 24);
        assert_eq!(screen.cols(), 80);
        assert_eq!(screen.rows(), 24);
        assert_eq!(screen.cursor().col, 0);
        assert_eq!(screen.cursor().row, 0);
        assert_eq!(screen.scroll_bottom(), 23);
    }

    #[test]
    fn test_print() {
        let mut screen = Screen::new(80, 24);
        print_str(&mut screen, "Hi");

        assert_eq!(screen.cell(0, 0).unwrap().display_char(), 'H');
        assert_eq!(screen.cell(1, 0).unwrap().display_char(), 'i');
        assert_eq!(screen.cursor().col, 2);
    }

    #[test]
    fn test_print_uses_current_attributes() {
        let mut screen = Screen::new(80, 24);
        screen.cursor_mut().attrs.fg = Color::Indexed(1);
        screen.cursor_mut().attrs.bold = true;
        screen.print('A');

        let cell = screen.cell(0, 0).unwrap();
        assert_eq!(cell.attrs.fg, Color::Indexed(1));
        assert!(cell.attrs.bold);
    }

    #[test]
    fn test_autowrap() {
        let mut screen = Screen::new(5, 3);
        print_str(&mut screen, "Hello World");

        assert_eq!(row_text(&screen, 0), "Hello");
        assert_eq!(row_text(&screen, 1), " Worl");
        assert_eq!(row_text(&screen, 2), "d");
    }

    #[test]
    fn test_pending_wrap_cursor_position() {
        let mut screen = Screen::new(5, 3);
        print_str(&mut screen, "ABCDE");

        // Cursor stays in the last column until the next print
        assert_eq!(screen.cursor().col, 4);
        assert_eq!(screen.cursor().row, 0);
        assert!(screen.cursor().pending_wrap);

        screen.print('F');
        assert_eq!(screen.cursor().col, 1);
        assert_eq!(screen.cursor().row, 1);
    }

    #[test]
    fn test_autowrap_disabled_clamps() {
        let mut screen = Screen::new(5, 3);
        screen.modes.autowrap = false;
        print_str(&mut screen, "ABCDEFG");

        // Last column keeps being overwritten
        assert_eq!(row_text(&screen, 0), "ABCDG");
        assert_eq!(screen.cursor().col, 4);
        assert_eq!(screen.cursor().row, 0);
    }

    #[test]
    fn test_linefeed_and_scroll() {
        let mut screen = Screen::new(80, 3);

        print_str(&mut screen, "1");
        screen.linefeed();
        screen.carriage_return();
        print_str(&mut screen, "2");
        screen.linefeed();
        screen.carriage_return();
        print_str(&mut screen, "3");
        screen.linefeed();
        screen.carriage_return();
        print_str(&mut screen, "4");

        assert_eq!(row_text(&screen, 0), "2");
        assert_eq!(row_text(&screen, 1), "3");
        assert_eq!(row_text(&screen, 2), "4");
    }

    #[test]
    fn test_crlf_mode() {
        let mut screen = Screen::new(10, 2);
        screen.modes.crlf = true;

        print_str(&mut screen, "AB");
        screen.linefeed();
        print_str(&mut screen, "CD");

        assert_eq!(row_text(&screen, 0), "AB");
        assert_eq!(row_text(&screen, 1), "CD");
        assert_eq!(screen.cursor().col, 2);
        assert_eq!(screen.cursor().row, 1);
    }

    #[test]
    fn test_scroll_discards_top_row() {
        let mut screen = Screen::new(5, 2);
        print_str(&mut screen, "AAAAA");
        // Wrap onto the last row, then fill it to force a scroll
        print_str(&mut screen, "BBBBB");
        print_str(&mut screen, "C");

        assert_eq!(row_text(&screen, 0), "BBBBB");
        assert_eq!(row_text(&screen, 1), "C");
    }

    #[test]
    fn test_erase_in_display() {
        let mut screen = Screen::new(10, 3);
        for _ in 0..3 {
            print_str(&mut screen, "XXXXXXXXXX");
        }

        screen.move_cursor_to(1, 5);
        screen.erase_in_display(EraseMode::ToEnd);

        assert_eq!(row_text(&screen, 0), "XXXXXXXXXX");
        assert_eq!(row_text(&screen, 1), "XXXXX");
        assert_eq!(row_text(&screen, 2), "");
        // Cursor unaffected by erase
        assert_eq!((screen.cursor().col, screen.cursor().row), (5, 1));
    }

    #[test]
    fn test_erase_resets_attributes() {
        let mut screen = Screen::new(10, 1);
        screen.cursor_mut().attrs.bg = Color::Indexed(4);
        print_str(&mut screen, "XXXX");

        screen.move_cursor_to(0, 0);
        screen.erase_in_line(EraseMode::All);

        let cell = screen.cell(0, 0).unwrap();
        assert!(cell.is_empty());
        assert_eq!(cell.attrs, Default::default());
    }

    #[test]
    fn test_erase_in_line() {
        let mut screen = Screen::new(10, 1);
        print_str(&mut screen, "ABCDEFGHIJ");

        screen.move_cursor_to(0, 5);
        screen.erase_in_line(EraseMode::ToEnd);
        assert_eq!(row_text(&screen, 0), "ABCDE");

        screen.move_cursor_to(0, 2);
        screen.erase_in_line(EraseMode::ToStart);
        assert_eq!(row_text(&screen, 0), "   DE");
    }

    #[test]
    fn test_erase_chars() {
        let mut screen = Screen::new(10, 1);
        print_str(&mut screen, "ABCDEFGHIJ");

        screen.move_cursor_to(0, 2);
        screen.erase_chars(3);
        assert_eq!(row_text(&screen, 0), "AB   FGHIJ");
    }

    #[test]
    fn test_scroll_region() {
        let mut screen = Screen::new(10, 5);
        for i in 0..5 {
            screen.move_cursor_to(i, 0);
            screen.print(char::from_digit(i as u32, 10).unwrap());
        }

        screen.set_scroll_region(1, 3);
        assert_eq!(screen.scroll_top(), 1);
        assert_eq!(screen.scroll_bottom(), 3);

        // Linefeed at the region bottom scrolls only the region
        screen.move_cursor_to(3, 0);
        screen.linefeed();

        assert_eq!(row_text(&screen, 0), "0");
        assert_eq!(row_text(&screen, 1), "2");
        assert_eq!(row_text(&screen, 2), "3");
        assert_eq!(row_text(&screen, 3), "");
        assert_eq!(row_text(&screen, 4), "4");
    }

    #[test]
    fn test_invalid_scroll_region_resets() {
        let mut screen = Screen::new(10, 5);
        screen.set_scroll_region(3, 3);
        assert_eq!(screen.scroll_top(), 0);
        assert_eq!(screen.scroll_bottom(), 4);
    }

    #[test]
    fn test_insert_delete_lines() {
        let mut screen = Screen::new(10, 5);
        for i in 0..5 {
            screen.move_cursor_to(i, 0);
            screen.print(char::from_digit(i as u32, 10).unwrap());
        }

        screen.move_cursor_to(2, 0);
        screen.insert_lines(2);

        assert_eq!(row_text(&screen, 0), "0");
        assert_eq!(row_text(&screen, 1), "1");
        assert_eq!(row_text(&screen, 2), "");
        assert_eq!(row_text(&screen, 3), "");
        assert_eq!(row_text(&screen, 4), "2");

        screen.delete_lines(2);
        assert_eq!(row_text(&screen, 2), "2");
    }

    #[test]
    fn test_insert_delete_chars() {
        let mut screen = Screen::new(10, 1);
        print_str(&mut screen, "ABCDEFGHIJ");

        screen.move_cursor_to(0, 3);
        screen.insert_chars(2);
        assert_eq!(row_text(&screen, 0), "ABC  DEFGH");

        screen.delete_chars(2);
        assert_eq!(row_text(&screen, 0), "ABCDEFGH");
    }

    #[test]
    fn test_cursor_clamping() {
        let mut screen = Screen::new(10, 5);

        screen.move_cursor_to(100, 100);
        assert_eq!((screen.cursor().col, screen.cursor().row), (9, 4));

        screen.move_cursor_up(100);
        assert_eq!(screen.cursor().row, 0);

        screen.move_cursor_backward(100);
        assert_eq!(screen.cursor().col, 0);
    }

    #[test]
    fn test_origin_mode_addressing() {
        let mut screen = Screen::new(10, 6);
        screen.set_scroll_region(2, 4);
        screen.set_mode(Mode::Origin, true);

        // Home is the region top
        assert_eq!(screen.cursor().row, 2);

        // Row 0 addresses the region top; clamped to the region bottom
        screen.move_cursor_to(0, 0);
        assert_eq!(screen.cursor().row, 2);
        screen.move_cursor_to(100, 0);
        assert_eq!(screen.cursor().row, 4);
    }

    #[test]
    fn test_tab_stops() {
        let mut screen = Screen::new(80, 24);

        screen.tab();
        assert_eq!(screen.cursor().col, 8);
        screen.tab();
        assert_eq!(screen.cursor().col, 16);

        screen.clear_all_tab_stops();
        screen.move_cursor_to(0, 5);
        screen.set_tab_stop();

        screen.move_cursor_to(0, 0);
        screen.tab();
        assert_eq!(screen.cursor().col, 5);

        // No stops past col 5: tab goes to the last column
        screen.tab();
        assert_eq!(screen.cursor().col, 79);
    }

    #[test]
    fn test_save_restore_cursor() {
        let mut screen = Screen::new(80, 24);

        screen.move_cursor_to(10, 20);
        screen.cursor_mut().attrs.bold = true;
        screen.save_cursor();

        screen.move_cursor_to(0, 0);
        screen.cursor_mut().attrs.bold = false;

        screen.restore_cursor();
        assert_eq!((screen.cursor().col, screen.cursor().row), (20, 10));
        assert!(screen.cursor().attrs.bold);
    }

    #[test]
    fn test_resize_preserves_and_clamps() {
        let mut screen = Screen::new(80, 24);
        screen.print('X');
        screen.move_cursor_to(23, 79);

        screen.resize(40, 12);

        assert_eq!(screen.cols(), 40);
        assert_eq!(screen.rows(), 12);
        assert_eq!(screen.cell(0, 0).unwrap().display_char(), 'X');
        assert!(screen.cursor().col < 40);
        assert!(screen.cursor().row < 12);
        assert_eq!(screen.scroll_bottom(), 11);
    }

    #[test]
    fn test_wide_char() {
        let mut screen = Screen::new(10, 2);
        screen.print('世');

        assert_eq!(screen.cell(0, 0).unwrap().display_char(), '世');
        assert_eq!(screen.cell(0, 0).unwrap().width, 2);
        assert!(screen.cell(1, 0).unwrap().is_wide_continuation());
        assert_eq!(screen.cursor().col, 2);
    }

    #[test]
    fn test_wide_char_at_last_column_wraps() {
        let mut screen = Screen::new(4, 2);
        print_str(&mut screen, "ABC");
        screen.print('世');

        assert_eq!(row_text(&screen, 0), "ABC");
        assert_eq!(screen.cell(0, 1).unwrap().display_char(), '世');
    }

    #[test]
    fn test_bell_counted() {
        let mut screen = Screen::new(10, 2);
        screen.bell();
        screen.bell();
        assert_eq!(screen.bell_count(), 2);
    }

    #[test]
    fn test_damage_tracking() {
        let mut screen = Screen::new(10, 5);
        screen.take_damage();

        screen.move_cursor_to(2, 0);
        screen.print('A');
        screen.move_cursor_to(3, 0);
        screen.print('B');

        assert_eq!(screen.take_damage(), Some((2, 3)));
        assert_eq!(screen.take_damage(), None);

        // Cursor motion alone is not row damage
        screen.move_cursor_to(0, 0);
        assert_eq!(screen.take_damage(), None);
    }

    #[test]
    fn test_reset() {
        let mut screen = Screen::new(10, 3);
        print_str(&mut screen, "Hello");
        screen.modes.crlf = true;
        screen.title.push_str("title");
        screen.set_scroll_region(1, 2);

        screen.reset();

        assert_eq!(row_text(&screen, 0), "");
        assert_eq!((screen.cursor().col, screen.cursor().row), (0, 0));
        assert!(!screen.modes.crlf);
        assert!(screen.title.is_empty());
        assert_eq!(screen.scroll_top(), 0);
        assert_eq!(screen.scroll_bottom(), 2);
    }
}
