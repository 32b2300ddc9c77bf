use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub store: Option<StoreConfig>,
    pub gallery: Option<GalleryConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub publishable_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    pub default_sources: Option<Vec<String>>,
    pub preview_width: Option<u32>,
    pub full_width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub fps: Option<u32>,
}

/// Platform config directory path: `<config_dir>/kiosk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kiosk").join("config.toml"))
}

/// Load config by cascading CWD `.kiosk.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".kiosk.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let url = overlay
        .store
        .as_ref()
        .and_then(|s| s.url.clone())
        .or_else(|| base.store.as_ref().and_then(|s| s.url.clone()));
    let publishable_key = overlay
        .store
        .as_ref()
        .and_then(|s| s.publishable_key.clone())
        .or_else(|| base.store.as_ref().and_then(|s| s.publishable_key.clone()));
    let timeout_secs = overlay
        .store
        .as_ref()
        .and_then(|s| s.timeout_secs)
        .or_else(|| base.store.as_ref().and_then(|s| s.timeout_secs));

    ConfigFile {
        store: Some(StoreConfig {
            url,
            publishable_key,
            timeout_secs,
        }),
        gallery: Some(GalleryConfig {
            default_sources: overlay
                .gallery
                .as_ref()
                .and_then(|g| g.default_sources.clone())
                .or_else(|| base.gallery.as_ref().and_then(|g| g.default_sources.clone())),
            preview_width: overlay
                .gallery
                .as_ref()
                .and_then(|g| g.preview_width)
                .or_else(|| base.gallery.as_ref().and_then(|g| g.preview_width)),
            full_width: overlay
                .gallery
                .as_ref()
                .and_then(|g| g.full_width)
                .or_else(|| base.gallery.as_ref().and_then(|g| g.full_width)),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
            fps: overlay
                .display
                .as_ref()
                .and_then(|d| d.fps)
                .or_else(|| base.display.as_ref().and_then(|d| d.fps)),
        }),
    }
}

/// Save a config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, CoreError> {
    let path = config_path()
        .ok_or_else(|| CoreError::Config("could not determine config directory".into()))?;
    save_to_path(config, &path)?;
    Ok(path)
}

pub fn save_to_path(config: &ConfigFile, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| CoreError::Config(format!("failed to serialize config: {e}")))?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_parses() {
        let cfg: ConfigFile = toml::from_str(
            r#"
            [gallery]
            default_sources = ["bbc.com"]
            "#,
        )
        .unwrap();
        assert!(cfg.store.is_none());
        assert_eq!(
            cfg.gallery.unwrap().default_sources,
            Some(vec!["bbc.com".to_string()])
        );
    }

    #[test]
    fn overlay_wins_and_base_fills_gaps() {
        let base = ConfigFile {
            store: Some(StoreConfig {
                url: Some("https://base.supabase.co".into()),
                publishable_key: Some("base-key".into()),
                timeout_secs: Some(10),
            }),
            display: Some(DisplayConfig {
                theme: Some("modern".into()),
                fps: None,
            }),
            ..ConfigFile::default()
        };
        let overlay = ConfigFile {
            store: Some(StoreConfig {
                url: Some("https://cwd.supabase.co".into()),
                ..StoreConfig::default()
            }),
            display: Some(DisplayConfig {
                theme: None,
                fps: Some(60),
            }),
            ..ConfigFile::default()
        };
        let merged = merge(base, overlay);
        let store = merged.store.unwrap();
        assert_eq!(store.url.as_deref(), Some("https://cwd.supabase.co"));
        assert_eq!(store.publishable_key.as_deref(), Some("base-key"));
        assert_eq!(store.timeout_secs, Some(10));
        let display = merged.display.unwrap();
        assert_eq!(display.theme.as_deref(), Some("modern"));
        assert_eq!(display.fps, Some(60));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kiosk").join("config.toml");
        let cfg = ConfigFile {
            gallery: Some(GalleryConfig {
                default_sources: Some(vec!["a.com".into(), "b.com".into()]),
                preview_width: Some(400),
                full_width: None,
            }),
            ..ConfigFile::default()
        };
        save_to_path(&cfg, &path).unwrap();
        assert_eq!(load_from_path(&path), Some(cfg));
    }

    #[test]
    fn unparseable_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store\nurl = ").unwrap();
        assert_eq!(load_from_path(&path), None);
    }
}
