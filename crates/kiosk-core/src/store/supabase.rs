use std::time::Duration;

use chrono::{Local, NaiveDate, SecondsFormat};

use super::{CaptureStore, StoreFuture, day_bounds};
use crate::{Capture, CoreError, DeviceClass};

/// PostgREST endpoint backing the `screenshots` table.
pub struct SupabaseStore {
    base_url: String,
    publishable_key: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl SupabaseStore {
    pub fn new(base_url: &str, publishable_key: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            publishable_key: publishable_key.to_string(),
            client: reqwest::Client::new(),
            timeout,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.publishable_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.publishable_key),
            )
            .header("Accept", "application/json")
            .timeout(self.timeout)
    }

    async fn send(&self, req: reqwest::RequestBuilder, url: &str) -> Result<String, CoreError> {
        let resp = self.authorized(req).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.text().await?)
    }
}

/// Query parameters selecting one day's `ok` captures for a device.
pub fn capture_query(day: NaiveDate, device: DeviceClass) -> Vec<(&'static str, String)> {
    let (start, end) = day_bounds(day, &Local);
    vec![
        ("select", "*".to_string()),
        ("job_status", "eq.ok".to_string()),
        ("device", format!("eq.{}", device.as_str())),
        (
            "captured_at",
            format!("gte.{}", start.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ),
        (
            "captured_at",
            format!("lt.{}", end.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ),
        ("order", "url.asc,captured_at.asc".to_string()),
    ]
}

/// Parse the `get_screenshot_days` RPC result. Elements may be plain date
/// strings or objects with a `date` field; timestamps are cut to their date.
pub fn parse_active_days(value: &serde_json::Value) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item.as_str().or_else(|| item["date"].as_str()))
                .filter_map(|s| NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok())
                .collect()
        })
        .unwrap_or_default();
    days.sort();
    days.dedup();
    days
}

impl CaptureStore for SupabaseStore {
    fn name(&self) -> &str {
        "supabase"
    }

    fn fetch_captures<'a>(
        &'a self,
        day: NaiveDate,
        device: DeviceClass,
    ) -> StoreFuture<'a, Vec<Capture>> {
        Box::pin(async move {
            let url = self.endpoint("screenshots");
            let req = self.client.get(&url).query(&capture_query(day, device));
            let body = self.send(req, &url).await?;
            let captures: Vec<Capture> = serde_json::from_str(&body)?;
            tracing::debug!(%day, %device, count = captures.len(), "fetched captures");
            Ok(captures)
        })
    }

    fn fetch_active_days<'a>(&'a self) -> StoreFuture<'a, Vec<NaiveDate>> {
        Box::pin(async move {
            let url = self.endpoint("rpc/get_screenshot_days");
            let req = self.client.post(&url).json(&serde_json::json!({}));
            let body = self.send(req, &url).await?;
            let value: serde_json::Value = serde_json::from_str(&body)?;
            Ok(parse_active_days(&value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_filters_status_device_and_window() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let query = capture_query(day, DeviceClass::Mobile);
        assert!(query.contains(&("job_status", "eq.ok".to_string())));
        assert!(query.contains(&("device", "eq.mobile".to_string())));
        assert!(query.contains(&("order", "url.asc,captured_at.asc".to_string())));
        let windows: Vec<&String> = query
            .iter()
            .filter(|(k, _)| *k == "captured_at")
            .map(|(_, v)| v)
            .collect();
        assert_eq!(windows.len(), 2);
        assert!(windows[0].starts_with("gte."));
        assert!(windows[1].starts_with("lt."));
    }

    #[test]
    fn active_days_accepts_strings_and_objects() {
        let value = serde_json::json!([
            "2025-03-14",
            {"date": "2025-03-12"},
            "2025-03-14T00:00:00+00:00",
            {"other": 1},
            "garbage"
        ]);
        let days = parse_active_days(&value);
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            ]
        );
    }

    #[test]
    fn active_days_tolerates_non_array() {
        assert!(parse_active_days(&serde_json::json!({"error": "x"})).is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let store = SupabaseStore::new("https://x.supabase.co/", "key", Duration::from_secs(5));
        assert_eq!(
            store.endpoint("screenshots"),
            "https://x.supabase.co/rest/v1/screenshots"
        );
    }
}
