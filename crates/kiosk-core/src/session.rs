//! Gallery session: the single application-state object.
//!
//! Every change goes through [`GalleryState::apply`], which consumes the old
//! state and returns the next one. Derived structures (timeline, flat
//! sequence) are `Arc` snapshots rebuilt only when the record set or the
//! visibility set changed since they were last derived.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::comparison::{Comparison, Side};
use crate::grouping::{Timeline, group_by_source};
use crate::modal::{Dismissal, KeySignal, Viewer};
use crate::visibility::{VisibilitySet, flat_sequence, visible_groups};
use crate::{Capture, DeviceClass, GalleryIssue};

/// Identifies one fetch of the record set. Completions carrying anything but
/// the latest ticket are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub day: NaiveDate,
    pub device: DeviceClass,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    /// Loaded, possibly with zero records.
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Everything that can happen to a gallery session.
#[derive(Debug, Clone)]
pub enum GalleryEvent {
    SetDay(NaiveDate),
    SetDevice(DeviceClass),
    /// Fetch the active day again.
    Reload,
    RecordsLoaded {
        ticket: FetchTicket,
        records: Vec<Capture>,
    },
    LoadFailed {
        ticket: FetchTicket,
        error: String,
    },
    ActiveDaysLoaded(Vec<NaiveDate>),
    ToggleSource(String),
    Focus(Capture),
    FocusNext,
    FocusPrevious,
    Dismiss(Dismissal),
    Key(KeySignal),
    OpenComparison,
    CloseComparison,
    SelectSite { side: Side, source: String },
    SelectRecord { side: Side, record: Capture },
    StepRecord { side: Side, delta: isize },
    CycleSite { side: Side, delta: isize },
    ToggleComparisonControls,
    SetActiveSide(Side),
}

#[derive(Debug, Clone)]
pub struct GalleryState {
    day: NaiveDate,
    device: DeviceClass,
    records: Arc<[Capture]>,
    records_gen: u64,
    timeline: Arc<Timeline>,
    visibility: VisibilitySet,
    visibility_gen: u64,
    flat: Arc<[Capture]>,
    derived_from: (u64, u64),
    viewer: Viewer,
    comparison: Comparison,
    load: LoadState,
    /// Latest ticket issued; only its completion is accepted.
    current_ticket: Option<FetchTicket>,
    /// Ticket the host still has to dispatch to the store.
    outbox: Option<FetchTicket>,
    next_seq: u64,
    active_days: Arc<[NaiveDate]>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new(
            chrono::Local::now().date_naive(),
            DeviceClass::default(),
            VisibilitySet::default(),
        )
    }
}

impl GalleryState {
    /// Create a session and request the first fetch.
    pub fn new(day: NaiveDate, device: DeviceClass, visibility: VisibilitySet) -> Self {
        let mut state = Self {
            day,
            device,
            records: Arc::from(Vec::new()),
            records_gen: 0,
            timeline: Arc::new(Timeline::default()),
            visibility,
            visibility_gen: 0,
            flat: Arc::from(Vec::new()),
            derived_from: (0, 0),
            viewer: Viewer::default(),
            comparison: Comparison::default(),
            load: LoadState::Idle,
            current_ticket: None,
            outbox: None,
            next_seq: 0,
            active_days: Arc::from(Vec::new()),
        };
        state.request_fetch();
        state
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn records(&self) -> &[Capture] {
        &self.records
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn visibility(&self) -> &VisibilitySet {
        &self.visibility
    }

    /// Filter-aware linear order used for prev/next navigation.
    pub fn flat(&self) -> &[Capture] {
        &self.flat
    }

    pub fn visible_groups(&self) -> impl Iterator<Item = (&str, &[Capture])> {
        visible_groups(&self.timeline, &self.visibility)
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn comparison(&self) -> &Comparison {
        &self.comparison
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn active_days(&self) -> &[NaiveDate] {
        &self.active_days
    }

    pub fn has_data_on(&self, day: NaiveDate) -> bool {
        self.active_days.contains(&day)
    }

    pub fn current_ticket(&self) -> Option<FetchTicket> {
        self.current_ticket
    }

    /// Take the pending fetch request, if any. The host performs the fetch
    /// and reports back with `RecordsLoaded` or `LoadFailed`.
    pub fn take_fetch_request(&mut self) -> Option<FetchTicket> {
        self.outbox.take()
    }

    /// The recoverable condition currently affecting the session, if any.
    pub fn issue(&self) -> Option<GalleryIssue> {
        match &self.load {
            LoadState::Failed(reason) => Some(GalleryIssue::DataUnavailable {
                reason: reason.clone(),
            }),
            LoadState::Loaded if self.records.is_empty() => Some(GalleryIssue::DataUnavailable {
                reason: "No captures for this day.".to_string(),
            }),
            _ => None,
        }
    }

    /// Selections that a day or device change would drop: the focused
    /// record, then the left and right comparison records.
    pub fn stale_selections(&self) -> Vec<GalleryIssue> {
        let focused = self.viewer.focused();
        let left = self.comparison.slot(Side::Left).record();
        let right = self.comparison.slot(Side::Right).record();
        [focused, left, right]
            .into_iter()
            .flatten()
            .map(|record| GalleryIssue::StaleSelection { id: record.id })
            .collect()
    }

    /// Apply one event and return the resulting state.
    #[must_use]
    pub fn apply(mut self, event: GalleryEvent) -> Self {
        match event {
            GalleryEvent::SetDay(day) => {
                if day != self.day {
                    self.day = day;
                    self.invalidate();
                }
            }
            GalleryEvent::SetDevice(device) => {
                if device != self.device {
                    self.device = device;
                    self.invalidate();
                }
            }
            GalleryEvent::Reload => self.invalidate(),
            GalleryEvent::RecordsLoaded { ticket, records } => {
                if self.accepts(&ticket) {
                    tracing::info!(
                        day = %ticket.day,
                        device = %ticket.device,
                        count = records.len(),
                        "captures loaded"
                    );
                    self.replace_records(records);
                    self.load = LoadState::Loaded;
                    if self.comparison.is_open() {
                        self.comparison.fill_unset(&self.timeline);
                    }
                }
            }
            GalleryEvent::LoadFailed { ticket, error } => {
                if self.accepts(&ticket) {
                    tracing::warn!(day = %ticket.day, device = %ticket.device, %error, "capture load failed");
                    self.replace_records(Vec::new());
                    self.load = LoadState::Failed(error);
                }
            }
            GalleryEvent::ActiveDaysLoaded(days) => {
                self.active_days = Arc::from(days);
            }
            GalleryEvent::ToggleSource(source) => {
                self.visibility.toggle(&source);
                self.visibility_gen += 1;
            }
            GalleryEvent::Focus(record) => self.viewer.focus(record),
            GalleryEvent::FocusNext => {
                let flat = Arc::clone(&self.flat);
                self.viewer.next(&flat);
            }
            GalleryEvent::FocusPrevious => {
                let flat = Arc::clone(&self.flat);
                self.viewer.previous(&flat);
            }
            GalleryEvent::Dismiss(via) => self.viewer.dismiss(via),
            GalleryEvent::Key(key) => {
                let flat = Arc::clone(&self.flat);
                self.viewer.handle_key(key, &flat);
            }
            GalleryEvent::OpenComparison => self.comparison.open(&self.timeline),
            GalleryEvent::CloseComparison => self.comparison.close(),
            GalleryEvent::SelectSite { side, source } => {
                self.comparison.select_site(side, &source, &self.timeline)
            }
            GalleryEvent::SelectRecord { side, record } => {
                self.comparison.select_record(side, record)
            }
            GalleryEvent::StepRecord { side, delta } => {
                self.comparison.step_record(side, delta, &self.timeline)
            }
            GalleryEvent::CycleSite { side, delta } => {
                self.comparison.cycle_site(side, delta, &self.timeline)
            }
            GalleryEvent::ToggleComparisonControls => self.comparison.toggle_controls(),
            GalleryEvent::SetActiveSide(side) => self.comparison.set_active_side(side),
        }
        self.derive();
        self
    }

    fn accepts(&self, ticket: &FetchTicket) -> bool {
        if self.current_ticket.as_ref() == Some(ticket) {
            return true;
        }
        tracing::debug!(
            seq = ticket.seq,
            day = %ticket.day,
            device = %ticket.device,
            "discarding stale fetch result"
        );
        false
    }

    /// The day or device changed: everything loaded so far no longer applies.
    fn invalidate(&mut self) {
        for issue in self.stale_selections() {
            tracing::debug!(%issue, "resetting selection");
        }
        self.viewer.clear();
        self.comparison.reset();
        self.replace_records(Vec::new());
        self.request_fetch();
    }

    fn request_fetch(&mut self) {
        self.next_seq += 1;
        let ticket = FetchTicket {
            seq: self.next_seq,
            day: self.day,
            device: self.device,
        };
        self.current_ticket = Some(ticket);
        self.outbox = Some(ticket);
        self.load = LoadState::Loading;
    }

    fn replace_records(&mut self, records: Vec<Capture>) {
        self.records = Arc::from(records);
        self.records_gen += 1;
    }

    fn derive(&mut self) {
        let key = (self.records_gen, self.visibility_gen);
        if key == self.derived_from {
            return;
        }
        if self.derived_from.0 != self.records_gen {
            self.timeline = Arc::new(group_by_source(&self.records));
        }
        self.flat = Arc::from(flat_sequence(&self.timeline, &self.visibility));
        self.derived_from = key;
    }
}
