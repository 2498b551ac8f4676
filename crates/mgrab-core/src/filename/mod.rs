//! Destination naming: safe local filenames and batch folder tokens.
//!
//! Derives filenames for captured resources from the URL path or a
//! Content-Disposition hint, sanitized for Linux filesystems, and corrects
//! extensions when conversion changes the stored format.

mod content_disposition;
mod path;
mod sanitize;

pub use content_disposition::filename_from_content_disposition;
pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename_for_linux;

use chrono::{DateTime, Local};

/// Default filename when URL path and Content-Disposition yield nothing usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Derives a safe filename for saving a captured resource.
///
/// Prefers the filename from `content_disposition` (if present and
/// parseable), otherwise the last path segment of `url`. The result is
/// sanitized for Linux; reserved names fall back to `download.bin`.
pub fn derive_filename(url: &str, content_disposition: Option<&str>) -> String {
    let candidate = content_disposition
        .and_then(filename_from_content_disposition)
        .filter(|s| !s.is_empty())
        .or_else(|| filename_from_url_path(url));

    let raw = match candidate {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename_for_linux(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Replaces (or appends) the filename's extension with the given tag.
/// Used when conversion changes the stored format, e.g. `pic.avif` with
/// `png` -> `pic.png`.
pub fn with_extension_tag(name: &str, tag: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{}.{}", stem, tag),
        _ => format!("{}.{}", name, tag),
    }
}

/// Folder token grouping one download batch: `YYYYMMDD_HHMMSS`.
pub fn batch_folder_token(now: DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn derive_filename_from_url_path() {
        assert_eq!(
            derive_filename("https://cdn.example.com/img/photo.jpg?w=1200", None),
            "photo.jpg"
        );
        assert_eq!(
            derive_filename("https://cdn.example.com/v/clip.mp4", None),
            "clip.mp4"
        );
    }

    #[test]
    fn derive_filename_prefers_content_disposition() {
        assert_eq!(
            derive_filename(
                "https://cdn.example.com/dl?id=9",
                Some("attachment; filename=\"cover.webp\"")
            ),
            "cover.webp"
        );
    }

    #[test]
    fn derive_filename_fallback() {
        assert_eq!(derive_filename("https://example.com/", None), "download.bin");
        assert_eq!(derive_filename("https://example.com/..", None), "download.bin");
    }

    #[test]
    fn extension_tag_replacement() {
        assert_eq!(with_extension_tag("pic.avif", "png"), "pic.png");
        assert_eq!(with_extension_tag("archive.tar.gz", "png"), "archive.tar.png");
        assert_eq!(with_extension_tag("noext", "jpg"), "noext.jpg");
        assert_eq!(with_extension_tag(".hidden", "png"), ".hidden.png");
    }

    #[test]
    fn batch_folder_token_format() {
        let t = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(batch_folder_token(t), "20240307_090502");
    }
}
