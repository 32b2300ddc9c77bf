//! Full-screen viewer: the focus cursor plus the open/closed surface it drives.
//!
//! Focus is the single source of truth. Every operation first changes the
//! cursor and then re-derives the surface state from it, so the surface is
//! open exactly when a record is focused.

use crate::Capture;
use crate::cursor::FocusCursor;

/// Presentation state of the viewer surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(Capture),
}

/// Ways the user can dismiss an open viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    CloseButton,
    EscapeKey,
    /// Activation on the backdrop, outside the content.
    Backdrop,
}

/// Key signals the viewer listens for while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySignal {
    MoveLeft,
    MoveRight,
    Dismiss,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    cursor: FocusCursor,
    modal: ModalState,
}

impl Viewer {
    pub fn cursor(&self) -> &FocusCursor {
        &self.cursor
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn is_open(&self) -> bool {
        matches!(self.modal, ModalState::Open(_))
    }

    pub fn focused(&self) -> Option<&Capture> {
        self.cursor.focused()
    }

    /// The key listener is attached only while the surface is open.
    pub fn listening(&self) -> bool {
        self.is_open()
    }

    pub fn focus(&mut self, record: Capture) {
        self.cursor.focus(record);
        self.sync();
    }

    pub fn next(&mut self, flat: &[Capture]) {
        self.cursor.next(flat);
        self.sync();
    }

    pub fn previous(&mut self, flat: &[Capture]) {
        self.cursor.previous(flat);
        self.sync();
    }

    pub fn clear(&mut self) {
        self.cursor.clear();
        self.sync();
    }

    /// Every dismissal path clears focus; closing the surface follows from that.
    pub fn dismiss(&mut self, via: Dismissal) {
        tracing::debug!(?via, "viewer dismissed");
        self.clear();
    }

    /// Route a key signal. Returns `false` when the viewer is closed and the
    /// key should fall through to the rest of the interface.
    pub fn handle_key(&mut self, key: KeySignal, flat: &[Capture]) -> bool {
        if !self.listening() {
            return false;
        }
        match key {
            KeySignal::MoveLeft => self.previous(flat),
            KeySignal::MoveRight => self.next(flat),
            KeySignal::Dismiss => self.dismiss(Dismissal::EscapeKey),
        }
        true
    }

    fn sync(&mut self) {
        self.modal = match self.cursor.focused() {
            Some(record) => ModalState::Open(record.clone()),
            None => ModalState::Closed,
        };
    }
}
