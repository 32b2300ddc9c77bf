//! Capture store trait and implementations.

pub mod mock;
pub mod supabase;

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{Capture, CoreError, DeviceClass};

pub use mock::MockStore;
pub use supabase::SupabaseStore;

/// Boxed future returned by store queries.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CoreError>> + Send + 'a>>;

/// Read access to captured screenshots.
pub trait CaptureStore: Send + Sync {
    /// Short name for logs (e.g., "supabase").
    fn name(&self) -> &str;

    /// All `ok` captures for `day` and `device`, ordered by source then
    /// capture time.
    fn fetch_captures<'a>(
        &'a self,
        day: NaiveDate,
        device: DeviceClass,
    ) -> StoreFuture<'a, Vec<Capture>>;

    /// Distinct days that have any captured data.
    fn fetch_active_days<'a>(&'a self) -> StoreFuture<'a, Vec<NaiveDate>>;
}

/// `[start, end)` of a calendar day in `tz`, as UTC instants.
pub fn day_bounds<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = day.succ_opt().unwrap_or(day);
    (midnight(day, tz), midnight(next, tz))
}

fn midnight<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::MIN);
    // A DST gap can swallow local midnight; fall back to UTC midnight then.
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}
