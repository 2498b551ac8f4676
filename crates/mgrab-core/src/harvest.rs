//! Batch download of selected resources.
//!
//! Probes each unknown-format item at most once when conversion is on; the
//! probed headers feed both the conversion decision and filename derivation
//! (Content-Disposition beats the URL path). Each item then resolves to a
//! URL or converted payload and goes to the download sink. Individual
//! failures are logged and skipped; the batch reports an aggregate count.
//!
//! Everything here blocks on network and disk. Callers on an async runtime
//! run the batch inside `spawn_blocking`.

use crate::classify::FORMAT_UNKNOWN;
use crate::convert::{self, TargetFormat};
use crate::filename::derive_filename;
use crate::probe::{MetadataProbe, ProbeResult};
use crate::registry::CapturedResource;
use crate::sink::{DownloadRequest, DownloadSink};

/// One resource selected for download.
#[derive(Debug, Clone)]
pub struct HarvestItem {
    pub url: String,
    /// Explicit destination name; derived from the URL when absent.
    pub file_name: Option<String>,
    /// Format tag when definitively known (content-type-confirmed at
    /// capture time). Extension-only guesses should stay `None` so the
    /// conversion probe can catch lying extensions.
    pub known_format: Option<String>,
}

impl HarvestItem {
    /// Build an item from a registry entry. The captured format counts as
    /// definitive only when a content-type was observed.
    pub fn from_resource(resource: &CapturedResource) -> Self {
        let known_format = if resource.content_type.is_empty() {
            None
        } else {
            Some(resource.format.clone())
        };
        Self {
            url: resource.url.clone(),
            file_name: None,
            known_format,
        }
    }
}

/// Conversion knobs for one batch.
#[derive(Debug, Clone, Copy)]
pub struct HarvestOptions {
    pub convert: bool,
    pub target: TargetFormat,
    pub jpeg_quality: u8,
}

/// Aggregate result of a batch download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub attempted: usize,
    pub succeeded: usize,
}

/// Download every item into `folder` under the sink. Continues past
/// individual failures.
pub fn download_batch(
    sink: &dyn DownloadSink,
    probe: &dyn MetadataProbe,
    items: &[HarvestItem],
    folder: &str,
    options: &HarvestOptions,
) -> BatchOutcome {
    let mut succeeded = 0;
    for item in items {
        let known = item
            .known_format
            .as_deref()
            .filter(|f| *f != FORMAT_UNKNOWN);
        let probed: Option<ProbeResult> = if options.convert && known.is_none() {
            match probe.probe(&item.url) {
                Ok(result) => Some(result),
                Err(err) => {
                    tracing::debug!("metadata probe failed for {}: {:#}", item.url, err);
                    None
                }
            }
        } else {
            None
        };

        let file_name = item.file_name.clone().unwrap_or_else(|| {
            let disposition = probed.as_ref().and_then(|p| p.content_disposition.as_deref());
            derive_filename(&item.url, disposition)
        });

        let plan = convert::plan(
            &item.url,
            &file_name,
            known,
            options.convert,
            options.target,
            probed.as_ref(),
        );
        let resolved = convert::execute(&plan, options.jpeg_quality);

        let request = DownloadRequest {
            source: resolved.source,
            file_name: resolved.file_name,
            folder: folder.to_string(),
        };
        match sink.begin(request) {
            Ok(handle) => {
                succeeded += 1;
                tracing::debug!("download dispatched: {}", handle.path.display());
            }
            Err(err) => {
                tracing::warn!("download failed for {}: {:#}", item.url, err);
            }
        }
    }
    BatchOutcome {
        attempted: items.len(),
        succeeded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{MetadataProbe, ProbeResult};
    use crate::sink::{DownloadHandle, DownloadSource};
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct NoProbe;

    impl MetadataProbe for NoProbe {
        fn probe(&self, _url: &str) -> anyhow::Result<ProbeResult> {
            anyhow::bail!("offline")
        }
    }

    /// Probe returning fixed headers.
    struct HeaderProbe {
        content_type: &'static str,
        content_disposition: Option<&'static str>,
    }

    impl MetadataProbe for HeaderProbe {
        fn probe(&self, _url: &str) -> anyhow::Result<ProbeResult> {
            Ok(ProbeResult {
                content_type: Some(self.content_type.to_string()),
                content_disposition: self.content_disposition.map(|s| s.to_string()),
                ..Default::default()
            })
        }
    }

    /// Probe that fails the test if it is ever consulted.
    struct PanicProbe;

    impl MetadataProbe for PanicProbe {
        fn probe(&self, _url: &str) -> anyhow::Result<ProbeResult> {
            panic!("probe must not run");
        }
    }

    /// Sink that records requests and fails for URLs containing "bad".
    struct RecordingSink {
        seen: RefCell<Vec<(String, String)>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl DownloadSink for RecordingSink {
        fn begin(&self, request: DownloadRequest) -> anyhow::Result<DownloadHandle> {
            let url = match &request.source {
                DownloadSource::Url(url) => url.clone(),
                DownloadSource::Bytes(_) => String::new(),
            };
            if url.contains("bad") {
                anyhow::bail!("sink rejected {}", url);
            }
            self.seen
                .borrow_mut()
                .push((url, request.file_name.clone()));
            Ok(DownloadHandle {
                path: PathBuf::from(request.file_name),
            })
        }
    }

    fn item(url: &str) -> HarvestItem {
        HarvestItem {
            url: url.to_string(),
            file_name: None,
            known_format: None,
        }
    }

    fn options() -> HarvestOptions {
        HarvestOptions {
            convert: false,
            target: TargetFormat::Png,
            jpeg_quality: 90,
        }
    }

    #[test]
    fn batch_continues_past_failures() {
        let sink = RecordingSink::new();
        let items = vec![
            item("https://a.b/1.jpg"),
            item("https://a.b/bad.jpg"),
            item("https://a.b/2.jpg"),
        ];
        let outcome = download_batch(&sink, &NoProbe, &items, "20240307_090502", &options());
        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(sink.seen.borrow().len(), 2);
    }

    #[test]
    fn file_names_derive_from_urls() {
        let sink = RecordingSink::new();
        let items = vec![item("https://a.b/photos/cat.jpg?w=100")];
        download_batch(&sink, &NoProbe, &items, "t", &options());
        assert_eq!(sink.seen.borrow()[0].1, "cat.jpg");
    }

    #[test]
    fn probed_disposition_names_file() {
        let sink = RecordingSink::new();
        let probe = HeaderProbe {
            content_type: "image/jpeg",
            content_disposition: Some("attachment; filename=\"cover.jpg\""),
        };
        let items = vec![item("https://a.b/dl?id=9")];
        let opts = HarvestOptions {
            convert: true,
            ..options()
        };
        download_batch(&sink, &probe, &items, "t", &opts);
        assert_eq!(sink.seen.borrow()[0].1, "cover.jpg");
    }

    #[test]
    fn probe_failure_keeps_url_name() {
        let sink = RecordingSink::new();
        let items = vec![item("https://a.b/photos/cat.jpg")];
        let opts = HarvestOptions {
            convert: true,
            ..options()
        };
        download_batch(&sink, &NoProbe, &items, "t", &opts);
        assert_eq!(sink.seen.borrow()[0].1, "cat.jpg");
    }

    #[test]
    fn disabled_conversion_never_probes() {
        let sink = RecordingSink::new();
        let items = vec![item("https://a.b/pic.jpg")];
        let outcome = download_batch(&sink, &PanicProbe, &items, "t", &options());
        assert_eq!(outcome.succeeded, 1);
    }

    #[test]
    fn known_format_skips_probe() {
        let sink = RecordingSink::new();
        let items = vec![HarvestItem {
            url: "https://a.b/pic.jpg".to_string(),
            file_name: None,
            known_format: Some("jpg".to_string()),
        }];
        let opts = HarvestOptions {
            convert: true,
            ..options()
        };
        let outcome = download_batch(&sink, &PanicProbe, &items, "t", &opts);
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(sink.seen.borrow()[0].1, "pic.jpg");
    }

    #[tokio::test]
    async fn batch_runs_off_the_async_runtime() {
        let items = vec![item("https://a.b/1.jpg"), item("https://a.b/2.jpg")];
        let opts = options();
        let outcome = tokio::task::spawn_blocking(move || {
            let sink = RecordingSink::new();
            download_batch(&sink, &NoProbe, &items, "t", &opts)
        })
        .await
        .unwrap();
        assert_eq!(outcome.succeeded, 2);
    }

    #[test]
    fn known_format_from_resource_requires_content_type() {
        let mut resource = crate::registry::CapturedResource {
            url: "https://a.b/p.avif".to_string(),
            category: crate::classify::ResourceCategory::Image,
            format: "avif".to_string(),
            size: 0,
            timestamp: 0,
            status_code: 200,
            method: "GET".to_string(),
            content_type: "image/avif".to_string(),
        };
        assert_eq!(
            HarvestItem::from_resource(&resource).known_format.as_deref(),
            Some("avif")
        );

        resource.content_type.clear();
        assert_eq!(HarvestItem::from_resource(&resource).known_format, None);
    }
}
