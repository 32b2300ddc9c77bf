//! In-memory capture store for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{NaiveDate, Utc};

use super::{CaptureStore, StoreFuture, day_bounds};
use crate::{Capture, CoreError, DeviceClass, JobStatus};

/// A hand-rolled [`CaptureStore`] backed by a vector of rows.
///
/// Days are UTC calendar days. Failed rows are stored but never returned,
/// mirroring the `job_status=eq.ok` filter of the real store.
pub struct MockStore {
    rows: Vec<Capture>,
    /// If set, the next fetch fails with this message.
    fail_next: Mutex<Option<String>>,
    call_count: AtomicUsize,
}

impl MockStore {
    pub fn new(rows: Vec<Capture>) -> Self {
        Self {
            rows,
            fail_next: Mutex::new(None),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Make the next `fetch_captures` call fail.
    pub fn fail_next(&self, message: &str) {
        if let Ok(mut slot) = self.fail_next.lock() {
            *slot = Some(message.to_string());
        }
    }

    /// How many times `fetch_captures` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn select(&self, day: NaiveDate, device: DeviceClass) -> Vec<Capture> {
        let (start, end) = day_bounds(day, &Utc);
        let mut rows: Vec<Capture> = self
            .rows
            .iter()
            .filter(|c| c.status == JobStatus::Ok && c.device == device)
            .filter(|c| c.captured_at >= start && c.captured_at < end)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.source
                .cmp(&b.source)
                .then_with(|| a.captured_at.cmp(&b.captured_at))
        });
        rows
    }
}

impl CaptureStore for MockStore {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch_captures<'a>(
        &'a self,
        day: NaiveDate,
        device: DeviceClass,
    ) -> StoreFuture<'a, Vec<Capture>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let failure = self.fail_next.lock().ok().and_then(|mut f| f.take());
        let rows = self.select(day, device);
        Box::pin(async move {
            match failure {
                Some(message) => Err(CoreError::Io(std::io::Error::other(message))),
                None => Ok(rows),
            }
        })
    }

    fn fetch_active_days<'a>(&'a self) -> StoreFuture<'a, Vec<NaiveDate>> {
        let mut days: Vec<NaiveDate> = self
            .rows
            .iter()
            .map(|c| c.captured_at.date_naive())
            .collect();
        days.sort();
        days.dedup();
        Box::pin(async move { Ok(days) })
    }
}
