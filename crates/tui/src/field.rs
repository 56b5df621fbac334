//! UTF-8 safe editable line buffer for the chip input field.
//!
//! The core consumes whole-text change events only, so character-level
//! editing (cursor motion, insert, backspace) lives here in the embedding
//! layer. The cursor is a byte index kept on a UTF-8 boundary at all times.

#[derive(Clone, Debug, Default)]
pub struct FieldBuffer {
    text: String,
    /// Byte index into `text`, always on a char boundary
    cursor: usize,
}

impl FieldBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole contents, clamping the caret onto a boundary.
    pub fn set(&mut self, text: &str, caret: usize) {
        self.text = text.to_string();
        self.cursor = caret.min(self.text.len());
        while !self.text.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the character before the caret; no-op at the start.
    pub fn backspace(&mut self) -> bool {
        let Some(prev) = self.text[..self.cursor].chars().next_back() else {
            return false;
        };
        let start = self.cursor - prev.len_utf8();
        self.text.drain(start..self.cursor);
        self.cursor = start;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_across_multibyte() {
        let mut field = FieldBuffer::new();
        field.set("h，llo", 1); // full-width comma is 3 bytes
        field.insert_char('e');
        assert_eq!(field.text(), "he，llo");
        field.move_right();
        assert!(field.backspace());
        assert_eq!(field.text(), "hello");
    }

    #[test]
    fn boundary_motion_is_clamped() {
        let mut field = FieldBuffer::new();
        field.set("ab", 0);
        assert!(!field.backspace());
        field.move_left();
        assert_eq!(field.cursor(), 0);
        field.move_right();
        field.move_right();
        field.move_right();
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn set_clamps_caret_onto_char_boundary() {
        let mut field = FieldBuffer::new();
        field.set("é", 1); // é is 2 bytes; byte 1 is mid-char
        assert_eq!(field.cursor(), 0);
        field.set("é", 9);
        assert_eq!(field.cursor(), 2);
    }
}
