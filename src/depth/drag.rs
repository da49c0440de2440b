// Reorder gesture session.
//
// A gesture grabs one row, moves it up or down any number of times, and
// either drops (committing `GestureEnded { from, to }` to the reducer) or
// cancels. The session carries indices only; it never touches the order
// itself, so the relocation algorithm stays independent of how the gesture
// is captured.

/// An in-progress row reorder gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Index of the grabbed row in the order shown when the gesture began.
    pub from: usize,
    /// Where the grabbed row currently sits in the live preview.
    pub to: usize,
}

impl DragSession {
    /// Grab the row at `index`.
    pub fn grab(index: usize) -> DragSession {
        DragSession {
            from: index,
            to: index,
        }
    }

    /// Move the grabbed row one slot toward the front, clamped at 0.
    pub fn move_up(&mut self) {
        self.to = self.to.saturating_sub(1);
    }

    /// Move the grabbed row one slot toward the back, clamped at `len - 1`.
    pub fn move_down(&mut self, len: usize) {
        if self.to + 1 < len {
            self.to += 1;
        }
    }

    /// Whether dropping now would change anything.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grab_starts_in_place() {
        let s = DragSession::grab(3);
        assert_eq!(s.from, 3);
        assert_eq!(s.to, 3);
        assert!(s.is_noop());
    }

    #[test]
    fn move_up_clamps_at_zero() {
        let mut s = DragSession::grab(1);
        s.move_up();
        s.move_up();
        assert_eq!(s.to, 0);
    }

    #[test]
    fn move_down_clamps_at_end() {
        let mut s = DragSession::grab(3);
        s.move_down(5);
        s.move_down(5);
        s.move_down(5);
        assert_eq!(s.to, 4);
    }

    #[test]
    fn round_trip_is_noop() {
        let mut s = DragSession::grab(2);
        s.move_down(6);
        s.move_up();
        assert!(s.is_noop());
    }
}
