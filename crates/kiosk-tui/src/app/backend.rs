use kiosk_core::GalleryEvent;

use super::App;
use crate::tui_event::BackendEvent;

impl App {
    /// Process a backend event and update model state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::CapturesLoaded { ticket, result } => match result {
                Ok(records) => self.dispatch(GalleryEvent::RecordsLoaded { ticket, records }),
                Err(error) => self.dispatch(GalleryEvent::LoadFailed { ticket, error }),
            },
            BackendEvent::ActiveDaysLoaded(days) => {
                self.dispatch(GalleryEvent::ActiveDaysLoaded(days));
            }
            BackendEvent::ActiveDaysFailed(error) => {
                tracing::warn!(%error, "could not load calendar markers");
            }
        }
    }
}
