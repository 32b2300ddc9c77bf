//! Single-item focus cursor over the flat sequence.
//!
//! The cursor never stores an index. Neighbours are looked up in whatever
//! sequence the caller passes, so a sequence that shrank or changed since the
//! record was focused cannot produce a stale position.

use crate::Capture;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusCursor {
    focused: Option<Capture>,
}

impl FocusCursor {
    pub fn focused(&self) -> Option<&Capture> {
        self.focused.as_ref()
    }

    /// Focus `record`, even if it is not part of the current sequence.
    pub fn focus(&mut self, record: Capture) {
        self.focused = Some(record);
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }

    /// Index of the focused record in `flat`, if both exist.
    pub fn index_in(&self, flat: &[Capture]) -> Option<usize> {
        let focused = self.focused.as_ref()?;
        flat.iter().position(|c| c.id == focused.id)
    }

    /// Move to the next record. No-op at the end, when unfocused, or when the
    /// focused record is not in `flat`.
    pub fn next(&mut self, flat: &[Capture]) {
        if let Some(i) = self.index_in(flat)
            && i + 1 < flat.len()
        {
            self.focused = Some(flat[i + 1].clone());
        }
    }

    /// Move to the previous record. Symmetric to [`next`](Self::next).
    pub fn previous(&mut self, flat: &[Capture]) {
        if let Some(i) = self.index_in(flat)
            && i > 0
        {
            self.focused = Some(flat[i - 1].clone());
        }
    }

    pub fn can_next(&self, flat: &[Capture]) -> bool {
        self.index_in(flat).is_some_and(|i| i + 1 < flat.len())
    }

    pub fn can_previous(&self, flat: &[Capture]) -> bool {
        self.index_in(flat).is_some_and(|i| i > 0)
    }

    /// `(position, total)` for a "k of n" label; position is 1-based.
    pub fn position(&self, flat: &[Capture]) -> Option<(usize, usize)> {
        self.index_in(flat).map(|i| (i + 1, flat.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::capture;

    fn flat() -> Vec<Capture> {
        vec![
            capture(1, "a.com", 9, 0),
            capture(2, "a.com", 12, 0),
            capture(3, "a.com", 15, 0),
        ]
    }

    #[test]
    fn next_then_previous_round_trips_from_interior() {
        let flat = flat();
        let mut cursor = FocusCursor::default();
        cursor.focus(flat[1].clone());
        cursor.next(&flat);
        assert_eq!(cursor.focused().map(|c| c.id), Some(3));
        cursor.previous(&flat);
        assert_eq!(cursor.focused().map(|c| c.id), Some(2));
    }

    #[test]
    fn ends_are_no_ops() {
        let flat = flat();
        let mut cursor = FocusCursor::default();
        cursor.focus(flat[0].clone());
        cursor.previous(&flat);
        assert_eq!(cursor.focused().map(|c| c.id), Some(1));
        assert!(!cursor.can_previous(&flat));

        cursor.focus(flat[2].clone());
        cursor.next(&flat);
        assert_eq!(cursor.focused().map(|c| c.id), Some(3));
        assert!(!cursor.can_next(&flat));
    }

    #[test]
    fn unfocused_navigation_is_no_op() {
        let flat = flat();
        let mut cursor = FocusCursor::default();
        cursor.next(&flat);
        cursor.previous(&flat);
        assert!(cursor.focused().is_none());
        assert_eq!(cursor.position(&flat), None);
    }

    #[test]
    fn focus_outside_sequence_disables_both_directions() {
        let flat = flat();
        let mut cursor = FocusCursor::default();
        let outsider = capture(99, "b.com", 10, 0);
        cursor.focus(outsider.clone());
        cursor.next(&flat);
        cursor.previous(&flat);
        assert_eq!(cursor.focused(), Some(&outsider));
        assert!(!cursor.can_next(&flat));
        assert!(!cursor.can_previous(&flat));
        assert_eq!(cursor.position(&flat), None);
    }

    #[test]
    fn position_tracks_shrinking_sequence() {
        let mut flat = flat();
        let mut cursor = FocusCursor::default();
        cursor.focus(flat[2].clone());
        assert_eq!(cursor.position(&flat), Some((3, 3)));
        flat.remove(0);
        assert_eq!(cursor.position(&flat), Some((2, 2)));
    }

    #[test]
    fn clear_removes_focus() {
        let mut cursor = FocusCursor::default();
        cursor.focus(capture(1, "a.com", 9, 0));
        cursor.clear();
        assert!(cursor.focused().is_none());
    }
}
