//! Resource classification: (URL, content-type) -> category + concrete format.
//!
//! Pure and deterministic. Category is resolved from the declared
//! content-type prefix first, then from the URL path extension. For the
//! concrete format a content-type that directly names a known subtype is
//! authoritative (a server may serve `image/avif` under a `.jpg` path);
//! the extension is consulted only when the content-type names nothing.

mod ext;

use serde::{Deserialize, Serialize};

pub use ext::has_media_extension;

/// Format tag used when neither extension nor content-type yields a result.
pub const FORMAT_UNKNOWN: &str = "unknown";

/// Coarse resource category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Image,
    Video,
    Audio,
    /// Unclassified-but-plausible media (documents, archives, streams).
    Media,
}

impl ResourceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceCategory::Image => "image",
            ResourceCategory::Video => "video",
            ResourceCategory::Audio => "audio",
            ResourceCategory::Media => "media",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(ResourceCategory::Image),
            "video" => Some(ResourceCategory::Video),
            "audio" => Some(ResourceCategory::Audio),
            "media" => Some(ResourceCategory::Media),
            _ => None,
        }
    }
}

/// Result of classifying one URL/content-type pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: ResourceCategory,
    pub format: &'static str,
}

/// Classifies a URL plus optional declared content-type.
///
/// Category: content-type prefix (`image/`, `video/`, `audio/`) wins, then
/// the extension table, then `Media`. Format: content-type subtype wins,
/// then the extension table, then `"unknown"`. Matching is case-insensitive
/// and tolerates query strings and fragments after the extension.
pub fn classify(url: &str, content_type: Option<&str>) -> Classification {
    let ct = content_type.map(|c| c.trim().to_ascii_lowercase());
    let ct = ct.as_deref().filter(|c| !c.is_empty());
    let extension = ext::path_extension(url);
    let extension = extension.as_deref();

    let category = category_from_content_type(ct)
        .or_else(|| extension.and_then(ext::category_from_extension))
        .unwrap_or(ResourceCategory::Media);

    let format = ct
        .and_then(ext::format_from_content_type)
        .or_else(|| extension.and_then(ext::format_from_extension))
        .unwrap_or(FORMAT_UNKNOWN);

    Classification { category, format }
}

/// True for URL schemes that can never be fetched as network resources
/// (`data:`, `blob:`, extension-internal pages). Checked before classification.
pub fn is_undownloadable_scheme(url: &str) -> bool {
    const REJECTED: &[&str] = &["data:", "blob:", "chrome-extension:", "moz-extension:"];
    let head: String = url
        .chars()
        .take_while(|c| *c != '/')
        .collect::<String>()
        .to_ascii_lowercase();
    REJECTED.iter().any(|scheme| head.starts_with(scheme))
}

fn category_from_content_type(ct: Option<&str>) -> Option<ResourceCategory> {
    let ct = ct?;
    if ct.starts_with("image/") {
        Some(ResourceCategory::Image)
    } else if ct.starts_with("video/") {
        Some(ResourceCategory::Video)
    } else if ct.starts_with("audio/") {
        Some(ResourceCategory::Audio)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_case_insensitive() {
        let upper = classify("https://cdn.example.com/FOO.JPG", None);
        let lower = classify("https://cdn.example.com/foo.jpg", None);
        assert_eq!(upper, lower);
        assert_eq!(upper.category, ResourceCategory::Image);
        assert_eq!(upper.format, "jpg");
    }

    #[test]
    fn classify_tolerates_query_and_fragment() {
        let c = classify("https://cdn.example.com/img/pic.JPEG?x=1", None);
        assert_eq!(c.category, ResourceCategory::Image);
        assert_eq!(c.format, "jpg");

        let c = classify("https://cdn.example.com/clip.mp4#t=10", None);
        assert_eq!(c.category, ResourceCategory::Video);
        assert_eq!(c.format, "mp4");
    }

    #[test]
    fn content_type_wins_for_format_over_extension() {
        let c = classify("https://a.b/c.jpg", Some("image/avif"));
        assert_eq!(c.category, ResourceCategory::Image);
        assert_eq!(c.format, "avif");
    }

    #[test]
    fn extension_alone_resolves_format() {
        let c = classify("https://a.b/c.jpg", None);
        assert_eq!(c.format, "jpg");
        let c = classify("https://a.b/c.avif", None);
        assert_eq!(c.format, "avif");
    }

    #[test]
    fn content_type_prefix_sets_category() {
        let c = classify("https://a.b/stream", Some("video/mp4"));
        assert_eq!(c.category, ResourceCategory::Video);
        assert_eq!(c.format, "mp4");

        let c = classify("https://a.b/sound", Some("audio/mpeg"));
        assert_eq!(c.category, ResourceCategory::Audio);
        assert_eq!(c.format, "mp3");
    }

    #[test]
    fn unmatched_defaults_to_media_unknown() {
        let c = classify("https://a.b/page.html", None);
        assert_eq!(c.category, ResourceCategory::Media);
        assert_eq!(c.format, FORMAT_UNKNOWN);
    }

    #[test]
    fn hls_segments_bucket_to_m3u8() {
        assert_eq!(classify("https://a.b/seg-001.ts", None).format, "m3u8");
        assert_eq!(classify("https://a.b/index.m3u8", None).format, "m3u8");
        assert_eq!(
            classify("https://a.b/seg-001.ts", None).category,
            ResourceCategory::Video
        );
    }

    #[test]
    fn jpeg_variants_normalize() {
        assert_eq!(classify("https://a.b/x.jpeg", None).format, "jpg");
        assert_eq!(classify("https://a.b/x.jpg", None).format, "jpg");
        assert_eq!(classify("https://a.b/x", Some("image/jpeg")).format, "jpg");
    }

    #[test]
    fn m4a_normalizes_to_aac() {
        let c = classify("https://a.b/track.m4a", None);
        assert_eq!(c.category, ResourceCategory::Audio);
        assert_eq!(c.format, "aac");
    }

    #[test]
    fn category_known_format_unknown() {
        // mkv is in the video extension set but has no dedicated format tag.
        let c = classify("https://a.b/movie.mkv", None);
        assert_eq!(c.category, ResourceCategory::Video);
        assert_eq!(c.format, FORMAT_UNKNOWN);
    }

    #[test]
    fn rejected_schemes() {
        assert!(is_undownloadable_scheme("data:image/png;base64,AAAA"));
        assert!(is_undownloadable_scheme("blob:https://example.com/uuid"));
        assert!(is_undownloadable_scheme("chrome-extension://abcdef/p.png"));
        assert!(is_undownloadable_scheme("DATA:image/png;base64,AAAA"));
        assert!(!is_undownloadable_scheme("https://example.com/a.png"));
    }

    #[test]
    fn empty_content_type_is_ignored() {
        let c = classify("https://a.b/c.png", Some(""));
        assert_eq!(c.category, ResourceCategory::Image);
        assert_eq!(c.format, "png");
    }
}
