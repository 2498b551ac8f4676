//! Extension and content-type lookup tables.
//!
//! The extension sets define what counts as a media URL per category. A few
//! extensions classify by category but carry no dedicated format tag in the
//! capture model (mkv, wmv, wma); those resolve to an unknown format unless
//! the content-type names one.

use super::ResourceCategory;

const IMAGE_EXTS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "ico", "avif", "heic", "tiff", "tif",
];
const VIDEO_EXTS: &[&str] = &[
    "mp4", "webm", "m3u8", "ts", "flv", "avi", "mov", "mkv", "wmv",
];
const AUDIO_EXTS: &[&str] = &["mp3", "wav", "ogg", "aac", "flac", "m4a", "wma"];

/// Lowercased extension of the URL's path, ignoring query and fragment.
///
/// Prefers proper URL parsing; falls back to a manual `?`/`#` strip for
/// strings the `url` crate rejects.
pub(super) fn path_extension(url: &str) -> Option<String> {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            url[..end].to_string()
        }
    };
    let segment = path.split('/').next_back()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > 5 {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub(super) fn category_from_extension(ext: &str) -> Option<ResourceCategory> {
    if IMAGE_EXTS.contains(&ext) {
        Some(ResourceCategory::Image)
    } else if VIDEO_EXTS.contains(&ext) {
        Some(ResourceCategory::Video)
    } else if AUDIO_EXTS.contains(&ext) {
        Some(ResourceCategory::Audio)
    } else {
        None
    }
}

/// Concrete format tag for an extension, with normalization: any JPEG
/// variant -> "jpg", HLS segments (.ts) -> the "m3u8" bucket, m4a -> "aac".
pub(super) fn format_from_extension(ext: &str) -> Option<&'static str> {
    let tag = match ext {
        "jpg" | "jpeg" => "jpg",
        "png" => "png",
        "gif" => "gif",
        "webp" => "webp",
        "svg" => "svg",
        "bmp" => "bmp",
        "ico" => "ico",
        "avif" => "avif",
        "heic" => "heic",
        "tiff" | "tif" => "tiff",
        "mp4" => "mp4",
        "webm" => "webm",
        "m3u8" | "ts" => "m3u8",
        "flv" => "flv",
        "avi" => "avi",
        "mov" => "mov",
        "mp3" => "mp3",
        "wav" => "wav",
        "ogg" => "ogg",
        "aac" | "m4a" => "aac",
        "flac" => "flac",
        _ => return None,
    };
    Some(tag)
}

/// Format tag when the content-type directly names a known subtype.
///
/// Expects a lowercased content-type. `mpegurl` must be tested before the
/// generic `mpeg` match so HLS playlists don't resolve as mp3.
pub(super) fn format_from_content_type(ct: &str) -> Option<&'static str> {
    let tag = if ct.contains("jpeg") {
        "jpg"
    } else if ct.contains("png") {
        "png"
    } else if ct.contains("gif") {
        "gif"
    } else if ct.contains("webp") {
        "webp"
    } else if ct.contains("svg") {
        "svg"
    } else if ct.contains("avif") {
        "avif"
    } else if ct.contains("heic") || ct.contains("heif") {
        "heic"
    } else if ct.contains("bmp") {
        "bmp"
    } else if ct.contains("icon") {
        "ico"
    } else if ct.contains("tiff") {
        "tiff"
    } else if ct.contains("mp4") {
        "mp4"
    } else if ct.contains("webm") {
        "webm"
    } else if ct.contains("mpegurl") {
        "m3u8"
    } else if ct.contains("quicktime") {
        "mov"
    } else if ct.contains("flv") {
        "flv"
    } else if ct.contains("mp3") || ct.contains("mpeg") {
        "mp3"
    } else if ct.contains("wav") {
        "wav"
    } else if ct.contains("ogg") {
        "ogg"
    } else if ct.contains("aac") {
        "aac"
    } else if ct.contains("flac") {
        "flac"
    } else {
        return None;
    };
    Some(tag)
}

/// Cheap pre-check used while the coordinator is still restoring state:
/// does the URL carry any known media extension? Bounds the pending queue
/// without running the full admission policy.
pub fn has_media_extension(url: &str) -> bool {
    path_extension(url)
        .as_deref()
        .map(|ext| category_from_extension(ext).is_some())
        .unwrap_or(false)
}
