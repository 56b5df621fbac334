//! Highlight cursor over the current suggestion list.
//!
//! The cursor is either on no suggestion or on index `i` of the list it was
//! last moved against. Movement wraps cyclically; moving against an empty
//! list never changes state. The owner resets the cursor whenever the
//! suggestion list is recomputed or a value is committed, so a held index is
//! always valid for the displayed list.

/// Cyclic highlight position: none, or an index into the suggestion list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    selected: Option<usize>,
}

impl SelectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_none(&self) -> bool {
        self.selected.is_none()
    }

    /// Move the highlight down one entry in a list of `len` suggestions,
    /// wrapping past the end. From no highlight, lands on the first entry.
    /// Returns whether the state changed (always false for an empty list).
    pub fn move_down(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => (i as isize + 1).rem_euclid(len as isize) as usize,
        });
        true
    }

    /// Move the highlight up one entry, wrapping past the start. From no
    /// highlight, lands on the last entry.
    pub fn move_up(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        self.selected = Some(match self.selected {
            None => len - 1,
            Some(i) => (i as isize - 1).rem_euclid(len as isize) as usize,
        });
        true
    }

    /// Clear the highlight (user cancel; list stays as it is).
    pub fn cancel(&mut self) {
        self.selected = None;
    }

    /// Clear the highlight because the list was recomputed or a commit fired.
    pub fn reset(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_from_none_lands_on_first() {
        let mut cursor = SelectionCursor::new();
        assert!(cursor.move_down(3));
        assert_eq!(cursor.selected(), Some(0));
    }

    #[test]
    fn up_from_none_lands_on_last() {
        let mut cursor = SelectionCursor::new();
        assert!(cursor.move_up(3));
        assert_eq!(cursor.selected(), Some(2));
    }

    #[test]
    fn down_wraps_past_end() {
        let mut cursor = SelectionCursor::new();
        for _ in 0..4 {
            cursor.move_down(3);
        }
        // 0 -> 1 -> 2 -> 0
        assert_eq!(cursor.selected(), Some(0));
    }

    #[test]
    fn up_wraps_past_start() {
        let mut cursor = SelectionCursor::new();
        cursor.move_down(3);
        cursor.move_up(3);
        assert_eq!(cursor.selected(), Some(2));
    }

    #[test]
    fn empty_list_moves_are_noops() {
        let mut cursor = SelectionCursor::new();
        assert!(!cursor.move_down(0));
        assert!(!cursor.move_up(0));
        assert_eq!(cursor.selected(), None);
    }

    #[test]
    fn bounds_hold_under_arbitrary_move_sequences() {
        let mut cursor = SelectionCursor::new();
        let len = 5;
        for step in 0..100 {
            if step % 3 == 0 {
                cursor.move_up(len);
            } else {
                cursor.move_down(len);
            }
            let i = cursor.selected().unwrap();
            assert!(i < len);
        }
    }

    #[test]
    fn cancel_and_reset_clear_highlight() {
        let mut cursor = SelectionCursor::new();
        cursor.move_down(2);
        cursor.cancel();
        assert!(cursor.is_none());
        cursor.move_up(2);
        cursor.reset();
        assert!(cursor.is_none());
    }
}
