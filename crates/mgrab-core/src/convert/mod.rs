//! Conversion decision and execution for exotic image formats.
//!
//! Some captured formats (next-gen encodings, icon/vector formats) are not
//! universally previewable, so they can be re-encoded client-side before
//! the download sink sees them. The decision happens per download request:
//!
//! 1. If the caller already knows the resource's true format and it is
//!    convertible, convert; probe metadata is irrelevant.
//! 2. Otherwise, when conversion is enabled, the caller supplies the result
//!    of a header-only probe and the real content-type decides (extensions
//!    lie). A convertible true format also gets the destination extension
//!    corrected.
//! 3. Without probe metadata the original resource is downloaded
//!    unconverted. Conversion never blocks a download.

mod encode;
mod error;


pub use error::ConvertError;

use serde::{Deserialize, Serialize};

use crate::classify;
use crate::fetch::fetch_bytes;
use crate::filename::with_extension_tag;
use crate::probe::ProbeResult;
use crate::sink::DownloadSource;

/// Image formats considered "exotic": worth re-encoding into a universally
/// supported target before the file lands on disk.
pub const CONVERTIBLE_FORMATS: &[&str] = &["avif", "heic", "webp", "bmp", "ico", "tiff", "svg"];

pub fn is_convertible(format: &str) -> bool {
    CONVERTIBLE_FORMATS.contains(&format)
}

/// Re-encode target. Quality parameters are fixed constants per format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    #[default]
    Png,
    Jpg,
    Webp,
}

impl TargetFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetFormat::Png => "png",
            TargetFormat::Jpg => "jpg",
            TargetFormat::Webp => "webp",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "png" => Some(TargetFormat::Png),
            "jpg" | "jpeg" => Some(TargetFormat::Jpg),
            "webp" => Some(TargetFormat::Webp),
            _ => None,
        }
    }
}

/// Outcome of the conversion decision for one download request.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    pub url: String,
    /// Destination name when downloading the original resource.
    pub original_name: String,
    /// Destination name when conversion succeeds (extension corrected).
    pub final_name: String,
    pub convert: bool,
    pub target: TargetFormat,
}

/// What the download sink ultimately receives: either the re-encoded bytes
/// or the untouched original URL with the original filename.
#[derive(Debug)]
pub struct ResolvedDownload {
    pub source: DownloadSource,
    pub file_name: String,
}

/// Decide whether `url` should be converted before download.
///
/// `known_format` is the resource's format tag when it is definitively
/// known (content-type-confirmed at capture time); pass `None` for
/// extension-only guesses along with `probed` headers so lying extensions
/// are caught. `probed` being `None` means no metadata could be obtained.
pub fn plan(
    url: &str,
    file_name: &str,
    known_format: Option<&str>,
    enabled: bool,
    target: TargetFormat,
    probed: Option<&ProbeResult>,
) -> ConversionPlan {
    let convert = match known_format.filter(|f| *f != classify::FORMAT_UNKNOWN) {
        Some(format) => is_convertible(format),
        None if enabled => match probed {
            Some(result) => {
                let true_format = classify::classify(url, result.content_type.as_deref()).format;
                is_convertible(true_format)
            }
            None => false,
        },
        None => false,
    };

    let final_name = if convert {
        with_extension_tag(file_name, target.as_str())
    } else {
        file_name.to_string()
    };

    ConversionPlan {
        url: url.to_string(),
        original_name: file_name.to_string(),
        final_name,
        convert,
        target,
    }
}

/// Carry out a conversion plan: fetch, decode, re-encode.
///
/// Any failure is logged and degrades to the original URL and filename;
/// no error escapes to the caller.
pub fn execute(plan: &ConversionPlan, jpeg_quality: u8) -> ResolvedDownload {
    if !plan.convert {
        return ResolvedDownload {
            source: DownloadSource::Url(plan.url.clone()),
            file_name: plan.original_name.clone(),
        };
    }

    match convert_bytes(&plan.url, plan.target, jpeg_quality) {
        Ok(bytes) => ResolvedDownload {
            source: DownloadSource::Bytes(bytes),
            file_name: plan.final_name.clone(),
        },
        Err(err) => {
            tracing::warn!("conversion failed for {}, downloading original: {}", plan.url, err);
            ResolvedDownload {
                source: DownloadSource::Url(plan.url.clone()),
                file_name: plan.original_name.clone(),
            }
        }
    }
}

fn convert_bytes(url: &str, target: TargetFormat, jpeg_quality: u8) -> Result<Vec<u8>, ConvertError> {
    let bytes = fetch_bytes(url).map_err(ConvertError::Fetch)?;
    encode::reencode(&bytes, target, jpeg_quality)
}
