//! Admission policy: which classified resources enter the registry.
//!
//! A resource is admitted iff its category is selected AND, for categories
//! with a format allow-list, its format is on that list. The catch-all
//! `media` category has no allow-list and admits unconditionally once
//! selected. Changing filters never evicts entries already admitted; only
//! future observations see the new config.

use serde::{Deserialize, Serialize};

use crate::classify::{Classification, ResourceCategory};

/// Declarative acceptance policy, persisted verbatim with the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Accepted coarse categories.
    pub resource_types: Vec<ResourceCategory>,
    /// Accepted image formats (meaningful only when `image` is selected).
    pub image_formats: Vec<String>,
    /// Accepted video formats (meaningful only when `video` is selected).
    pub video_formats: Vec<String>,
    /// Accepted audio formats (meaningful only when `audio` is selected).
    pub audio_formats: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            resource_types: vec![ResourceCategory::Image],
            image_formats: to_strings(&["jpg", "png", "gif", "webp", "svg", "bmp", "ico"]),
            video_formats: to_strings(&["mp4", "webm", "m3u8", "flv", "avi", "mov"]),
            audio_formats: to_strings(&["mp3", "wav", "ogg", "aac", "flac"]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl FilterConfig {
    /// Admission decision for one classified resource.
    pub fn admits(&self, classification: &Classification) -> bool {
        if !self.resource_types.contains(&classification.category) {
            return false;
        }
        let allow_list = match classification.category {
            ResourceCategory::Image => &self.image_formats,
            ResourceCategory::Video => &self.video_formats,
            ResourceCategory::Audio => &self.audio_formats,
            ResourceCategory::Media => return true,
        };
        allow_list.iter().any(|f| f == classification.format)
    }
}
