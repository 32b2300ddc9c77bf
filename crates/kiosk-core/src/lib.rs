use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod comparison;
pub mod config_file;
pub mod cursor;
pub mod grouping;
pub mod image;
pub mod modal;
pub mod prefs;
pub mod session;
pub mod store;
pub mod visibility;

// Re-export for convenience
pub use comparison::{Comparison, Readiness, Side, Slot};
pub use cursor::FocusCursor;
pub use grouping::{Timeline, group_by_source};
pub use image::{CloudinaryResolver, ImageResolver, ImageView, ImageWidth};
pub use modal::{Dismissal, KeySignal, ModalState, Viewer};
pub use session::{FetchTicket, GalleryEvent, GalleryState, LoadState};
pub use store::{CaptureStore, SupabaseStore};
pub use visibility::{DEFAULT_SOURCES, VisibilitySet, flat_sequence};

/// Stable identifier of a capture row.
pub type CaptureId = i64;

/// Outcome of the capture job that produced a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Ok,
    Failed,
}

/// Viewport class a screenshot was taken with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Desktop => Self::Mobile,
            Self::Mobile => Self::Desktop,
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(Self::Desktop),
            "mobile" => Ok(Self::Mobile),
            other => Err(CoreError::Config(format!("unknown device class: {other}"))),
        }
    }
}

/// One screenshot event for a source at a point in time.
///
/// Field names on the wire follow the `screenshots` table written by the
/// capture job (`url`, `cloudinary_url`, `job_status`, `device`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub id: CaptureId,
    #[serde(rename = "url")]
    pub source: String,
    pub captured_at: DateTime<Utc>,
    #[serde(rename = "cloudinary_url", default)]
    pub image_ref: Option<String>,
    #[serde(rename = "job_status")]
    pub status: JobStatus,
    #[serde(default)]
    pub device: DeviceClass,
}

impl Capture {
    /// Whether the capture carries a usable image reference.
    pub fn has_image(&self) -> bool {
        self.image_ref.as_deref().is_some_and(|r| !r.is_empty())
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Conditions the engine recovers from locally. None of them are fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryIssue {
    /// The store failed or returned nothing for the active day.
    DataUnavailable { reason: String },
    /// A capture has no image, or the resolver produced no URL.
    ImageMissing { id: CaptureId },
    /// A focused or compared capture no longer belongs to the loaded set.
    StaleSelection { id: CaptureId },
}

impl fmt::Display for GalleryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataUnavailable { reason } => write!(f, "data unavailable: {reason}"),
            Self::ImageMissing { id } => write!(f, "capture {id} has no image"),
            Self::StaleSelection { id } => write!(f, "capture {id} is no longer loaded"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_decodes_from_store_row() {
        let row = r#"{
            "id": 42,
            "url": "bbc.com",
            "public_id": "kiosk247/bbc.com/desktop/2025-03-14T09-00-00Z",
            "cloudinary_url": "https://res.cloudinary.com/x/image/upload/a.jpg",
            "job_status": "ok",
            "captured_at": "2025-03-14T09:00:00+00:00",
            "device": "mobile"
        }"#;
        let capture: Capture = serde_json::from_str(row).unwrap();
        assert_eq!(capture.id, 42);
        assert_eq!(capture.source, "bbc.com");
        assert_eq!(capture.status, JobStatus::Ok);
        assert_eq!(capture.device, DeviceClass::Mobile);
        assert!(capture.has_image());
    }

    #[test]
    fn null_image_ref_means_no_image() {
        let row = r#"{"id":1,"url":"a.com","cloudinary_url":null,"job_status":"failed","captured_at":"2025-03-14T09:00:00Z","device":"desktop"}"#;
        let capture: Capture = serde_json::from_str(row).unwrap();
        assert!(!capture.has_image());
        assert_eq!(capture.status, JobStatus::Failed);
    }

    #[test]
    fn device_class_parses_case_insensitively() {
        assert_eq!("Mobile".parse::<DeviceClass>().unwrap(), DeviceClass::Mobile);
        assert_eq!(" desktop ".parse::<DeviceClass>().unwrap(), DeviceClass::Desktop);
        assert!("tablet".parse::<DeviceClass>().is_err());
        assert_eq!(DeviceClass::Desktop.toggled(), DeviceClass::Mobile);
    }
}
