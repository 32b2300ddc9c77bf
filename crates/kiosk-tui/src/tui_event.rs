use chrono::NaiveDate;

use kiosk_core::{Capture, FetchTicket};

/// Commands sent from the TUI to the backend.
#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Fetch the captures for the day and device named by the ticket.
    FetchCaptures(FetchTicket),
    /// Fetch the list of days that have any captures (calendar markers).
    FetchActiveDays,
}

/// Events flowing from the backend task to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// A capture fetch finished. The ticket is echoed back so stale
    /// completions can be told apart from the current one.
    CapturesLoaded {
        ticket: FetchTicket,
        result: Result<Vec<Capture>, String>,
    },
    ActiveDaysLoaded(Vec<NaiveDate>),
    /// Active-day lookup failed. Non-fatal: the calendar just has no markers.
    ActiveDaysFailed(String),
}
