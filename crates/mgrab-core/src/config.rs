use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::convert::TargetFormat;
use crate::filter::FilterConfig;

/// Conversion defaults (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Probe unrecognized formats and re-encode exotic ones when true.
    pub enabled: bool,
    /// Re-encode target: "png", "jpg", or "webp".
    pub target: TargetFormat,
    /// JPEG encode quality (only used when target is "jpg").
    pub jpeg_quality: u8,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target: TargetFormat::Png,
            jpeg_quality: 90,
        }
    }
}

/// Global configuration loaded from `~/.config/mgrab/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MgrabConfig {
    /// Root directory for downloads. Per-batch timestamp folders are
    /// created underneath. Defaults to `./mgrab` when unset.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Conversion defaults; if missing, built-in defaults are used.
    #[serde(default)]
    pub convert: ConvertConfig,
    /// Default filter set applied when a session starts without explicit
    /// filters.
    #[serde(default)]
    pub filters: FilterConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mgrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MgrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MgrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: MgrabConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ResourceCategory;

    #[test]
    fn default_config_values() {
        let cfg = MgrabConfig::default();
        assert_eq!(cfg.download_dir, None);
        assert!(!cfg.convert.enabled);
        assert_eq!(cfg.convert.target, TargetFormat::Png);
        assert_eq!(cfg.convert.jpeg_quality, 90);
        assert_eq!(cfg.filters.resource_types, vec![ResourceCategory::Image]);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = MgrabConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: MgrabConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.convert.target, cfg.convert.target);
        assert_eq!(parsed.filters, cfg.filters);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            download_dir = "/data/media"

            [convert]
            enabled = true
            target = "jpg"
            jpeg_quality = 80

            [filters]
            resource_types = ["image", "video"]
            image_formats = ["jpg", "png"]
            video_formats = ["mp4"]
            audio_formats = []
        "#;
        let cfg: MgrabConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.download_dir, Some(PathBuf::from("/data/media")));
        assert!(cfg.convert.enabled);
        assert_eq!(cfg.convert.target, TargetFormat::Jpg);
        assert_eq!(cfg.convert.jpeg_quality, 80);
        assert_eq!(
            cfg.filters.resource_types,
            vec![ResourceCategory::Image, ResourceCategory::Video]
        );
        assert_eq!(cfg.filters.video_formats, vec!["mp4".to_string()]);
    }

    #[test]
    fn config_toml_missing_sections_use_defaults() {
        let cfg: MgrabConfig = toml::from_str("").unwrap();
        assert!(!cfg.convert.enabled);
        assert_eq!(cfg.filters, FilterConfig::default());
    }
}
