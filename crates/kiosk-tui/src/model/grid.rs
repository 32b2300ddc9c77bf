use kiosk_core::{Capture, CaptureId, GalleryState};

/// Cursor over the gallery rows: `row` indexes visible groups, `col` the
/// record inside that group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCursor {
    pub row: usize,
    pub col: usize,
}

/// Number of records in each visible row, top to bottom.
pub fn row_lens(state: &GalleryState) -> Vec<usize> {
    state.visible_groups().map(|(_, g)| g.len()).collect()
}

impl GridCursor {
    /// Pull the cursor back inside the grid after rows changed.
    pub fn clamp(&mut self, row_lens: &[usize]) {
        if row_lens.is_empty() {
            *self = Self::default();
            return;
        }
        self.row = self.row.min(row_lens.len() - 1);
        self.col = self.col.min(row_lens[self.row].saturating_sub(1));
    }

    pub fn move_up(&mut self, row_lens: &[usize]) {
        self.row = self.row.saturating_sub(1);
        self.clamp(row_lens);
    }

    pub fn move_down(&mut self, row_lens: &[usize]) {
        self.row += 1;
        self.clamp(row_lens);
    }

    pub fn move_left(&mut self, row_lens: &[usize]) {
        self.col = self.col.saturating_sub(1);
        self.clamp(row_lens);
    }

    pub fn move_right(&mut self, row_lens: &[usize]) {
        self.col += 1;
        self.clamp(row_lens);
    }

    /// Record under the cursor, if the grid has one there.
    pub fn selected<'a>(&self, state: &'a GalleryState) -> Option<&'a Capture> {
        state
            .visible_groups()
            .nth(self.row)
            .and_then(|(_, group)| group.get(self.col))
    }

    /// Cursor position of a record among the visible rows.
    pub fn locate(state: &GalleryState, id: CaptureId) -> Option<Self> {
        state.visible_groups().enumerate().find_map(|(row, (_, group))| {
            group
                .iter()
                .position(|c| c.id == id)
                .map(|col| Self { row, col })
        })
    }
}
