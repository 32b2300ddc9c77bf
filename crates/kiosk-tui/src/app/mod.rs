mod backend;
mod update;

use chrono::{Local, NaiveDate};
use ratatui::layout::{Constraint, Layout, Position, Rect};
use tokio::sync::mpsc;

use kiosk_core::prefs::PreferenceStore;
use kiosk_core::{CaptureId, CloudinaryResolver, GalleryEvent, GalleryState, Side};

use crate::model::calendar::CalendarState;
use crate::model::grid::{GridCursor, row_lens};
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Terminals narrower than this get the compact layout.
pub const NARROW_WIDTH: u16 = 100;

/// Clickable things recorded while drawing the last frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    DeviceToggle,
    DateButton,
    VersusButton,
    SourcesToggle,
    SourceChip(String),
    Cell(GridCursor),
    CloseViewer,
    Day(NaiveDate),
    SideTab(Side),
    Site { side: Side, source: String },
    Record { side: Side, id: CaptureId },
}

pub struct App {
    pub gallery: GalleryState,
    pub theme: Theme,
    pub resolver: CloudinaryResolver,
    pub prefs: Box<dyn PreferenceStore>,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    /// Narrow layout only: whether the source chips are expanded.
    pub show_sources: bool,
    pub grid: GridCursor,
    pub calendar: CalendarState,
    /// "Today" for the date picker. Refreshed on every tick.
    pub today: NaiveDate,
    /// Terminal width at the last draw or resize.
    pub width: u16,
    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
    /// Hit regions of the topmost surface drawn last frame.
    pub hits: Vec<(Rect, Hit)>,
    /// Area of the open popup (viewer or date picker), for backdrop clicks.
    pub last_popup_area: Option<Rect>,
}

impl App {
    pub fn new(
        gallery: GalleryState,
        theme: Theme,
        prefs: Box<dyn PreferenceStore>,
        resolver: CloudinaryResolver,
    ) -> Self {
        let day = gallery.day();
        Self {
            gallery,
            theme,
            resolver,
            prefs,
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            show_sources: false,
            grid: GridCursor::default(),
            calendar: CalendarState::new(day),
            today: Local::now().date_naive(),
            width: 120,
            backend_cmd_tx: None,
            hits: Vec::new(),
            last_popup_area: None,
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_WIDTH
    }

    /// Feed one event through the session and follow up on what changed.
    pub fn dispatch(&mut self, event: GalleryEvent) {
        let state = std::mem::take(&mut self.gallery);
        self.gallery = state.apply(event);
        self.dispatch_fetch();
        self.sync_grid();
    }

    /// Hand a pending fetch request, if any, to the backend.
    pub fn dispatch_fetch(&mut self) {
        let Some(ticket) = self.gallery.take_fetch_request() else {
            return;
        };
        match &self.backend_cmd_tx {
            Some(tx) => {
                if tx.send(BackendCommand::FetchCaptures(ticket)).is_err() {
                    tracing::warn!(seq = ticket.seq, "backend gone, fetch dropped");
                }
            }
            None => tracing::debug!(seq = ticket.seq, "no backend attached"),
        }
    }

    pub fn request_active_days(&self) {
        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(BackendCommand::FetchActiveDays);
        }
    }

    /// Keep the grid cursor inside the rows and on the viewer's record.
    fn sync_grid(&mut self) {
        if let Some(focused) = self.gallery.viewer().focused()
            && let Some(pos) = GridCursor::locate(&self.gallery, focused.id)
        {
            self.grid = pos;
            return;
        }
        let rows = row_lens(&self.gallery);
        self.grid.clamp(&rows);
    }

    /// Topmost hit region containing the point.
    pub fn hit_at(&self, x: u16, y: u16) -> Option<&Hit> {
        let pos = Position::new(x, y);
        self.hits
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, hit)| hit)
    }

    /// Render the full TUI.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();
        self.width = area.width;
        self.hits.clear();
        self.last_popup_area = None;

        let sources_height = crate::view::sources::height(self, area.width);
        let [header_area, sources_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(sources_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        crate::view::header::render(f, self, header_area);
        crate::view::sources::render(f, self, sources_area);
        crate::view::gallery::render(f, self, body_area);
        crate::view::footer::render(f, self, footer_area);

        // Overlays, painter's order
        if self.gallery.comparison().is_open() {
            crate::view::versus::render(f, self, area);
        }

        if self.gallery.viewer().is_open() {
            crate::view::viewer::render(f, self);
        }

        if self.calendar.open {
            crate::view::calendar::render(f, self);
        }

        if self.show_help {
            self.hits.clear();
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            self.hits.clear();
            crate::view::quit_confirm::render(f, &self.theme);
        }
    }
}
