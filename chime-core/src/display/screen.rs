//! Screen buffer types
//!
//! Provides a character-based screen buffer for the 128x64 clock display.
//! Rows hold preformatted text; the display driver decides fonts and pixel
//! placement.

use heapless::String;

/// Number of text rows
pub const SCREEN_ROWS: usize = 6;

/// Maximum characters per row at the small font
pub const LINE_LEN: usize = 21;

/// Glyph size of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    #[default]
    Small,
    /// Double height and width
    Large,
}

/// Screen buffer for text-mode displays
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Glyph size per row
    sizes: [TextSize; SCREEN_ROWS],
    /// Rows drawn inverted (menu selection)
    highlights: [bool; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Screen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.lines()).finish()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            sizes: [TextSize::Small; SCREEN_ROWS],
            highlights: [false; SCREEN_ROWS],
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.sizes = [TextSize::Small; SCREEN_ROWS];
        self.highlights = [false; SCREEN_ROWS];
        self.dirty = true;
    }

    /// Set the content of a specific row
    ///
    /// Text longer than a row is truncated.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            line.clear();
            let end = text
                .char_indices()
                .nth(LINE_LEN)
                .map_or(text.len(), |(i, _)| i);
            let _ = line.push_str(&text[..end]);
            self.dirty = true;
        }
    }

    /// Set a row drawn with the large font
    pub fn set_large_line(&mut self, row: usize, text: &str) {
        self.set_line(row, text);
        if let Some(size) = self.sizes.get_mut(row) {
            *size = TextSize::Large;
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    pub fn size(&self, row: usize) -> TextSize {
        self.sizes.get(row).copied().unwrap_or_default()
    }

    /// Mark a row as selected
    pub fn set_highlight(&mut self, row: usize, on: bool) {
        if let Some(highlight) = self.highlights.get_mut(row) {
            *highlight = on;
            self.dirty = true;
        }
    }

    pub fn is_highlighted(&self, row: usize) -> bool {
        self.highlights.get(row).copied().unwrap_or(false)
    }

    /// First highlighted row, if any
    pub fn selection(&self) -> Option<usize> {
        self.highlights.iter().position(|&h| h)
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, " | ");
            }
            if self.highlights[i] {
                defmt::write!(f, ">");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_line_truncates() {
        let mut screen = Screen::new();
        screen.set_line(0, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(screen.get_line(0), Some("ABCDEFGHIJKLMNOPQRSTU"));
    }

    #[test]
    fn test_out_of_range_row_is_ignored() {
        let mut screen = Screen::new();
        screen.mark_clean();
        screen.set_line(SCREEN_ROWS, "X");
        screen.set_highlight(SCREEN_ROWS, true);
        assert!(!screen.is_dirty());
        assert_eq!(screen.get_line(SCREEN_ROWS), None);
    }

    #[test]
    fn test_clear_resets_rows() {
        let mut screen = Screen::new();
        screen.set_large_line(1, "12:00:00");
        screen.set_highlight(2, true);
        assert_eq!(screen.size(1), TextSize::Large);
        assert_eq!(screen.selection(), Some(2));

        screen.clear();
        assert_eq!(screen.get_line(1), Some(""));
        assert_eq!(screen.size(1), TextSize::Small);
        assert_eq!(screen.selection(), None);
    }
}
