//! Ingress boundary for network observation events.
//!
//! The observation source delivers loosely-shaped records (webRequest-style
//! JSON with a raw header list). They are normalized into `ObservationEvent`
//! at the boundary so nothing duck-typed flows into the registry.

use serde::{Deserialize, Serialize};

/// Which of the two independent capture channels delivered the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// Fired when response headers became available.
    Early,
    /// Fired on full response completion.
    Completed,
}

/// A validated, normalized observation event.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationEvent {
    pub url: String,
    pub status_code: u16,
    pub method: String,
    /// Lowercased Content-Type header value, if any.
    pub content_type: Option<String>,
    /// Parsed Content-Length header value, if any.
    pub content_length: Option<u64>,
    /// Browsing context (tab) the response belongs to, if resolvable.
    pub context_id: Option<i64>,
    pub source: EventSource,
}

/// Wire shape of one exported webRequest event (camelCase, raw headers).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub url: String,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub response_headers: Vec<RawHeader>,
    #[serde(default)]
    pub tab_id: Option<i64>,
    /// Missing source means the completion channel (the common export case).
    #[serde(default)]
    pub source: Option<EventSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHeader {
    pub name: String,
    pub value: String,
}

fn default_method() -> String {
    "GET".to_string()
}

impl RawEvent {
    /// Normalize into the coordinator's ingress type: case-insensitive
    /// header lookup, lowercased content-type, parsed content-length.
    pub fn normalize(self) -> ObservationEvent {
        let content_type = header_value(&self.response_headers, "content-type")
            .map(|v| v.trim().to_ascii_lowercase());
        let content_length =
            header_value(&self.response_headers, "content-length").and_then(|v| v.parse().ok());
        ObservationEvent {
            url: self.url,
            status_code: self.status_code,
            method: self.method,
            content_type,
            content_length,
            context_id: self.tab_id,
            source: self.source.unwrap_or(EventSource::Completed),
        }
    }
}

fn header_value<'a>(headers: &'a [RawHeader], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_event_normalizes_headers() {
        let raw: RawEvent = serde_json::from_str(
            r#"{
                "url": "https://a.b/p.jpg",
                "statusCode": 200,
                "method": "GET",
                "tabId": 7,
                "source": "early",
                "responseHeaders": [
                    {"name": "Content-Type", "value": "IMAGE/JPEG"},
                    {"name": "CONTENT-LENGTH", "value": "12345"}
                ]
            }"#,
        )
        .unwrap();
        let event = raw.normalize();
        assert_eq!(event.url, "https://a.b/p.jpg");
        assert_eq!(event.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(event.content_length, Some(12345));
        assert_eq!(event.context_id, Some(7));
        assert_eq!(event.source, EventSource::Early);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let raw: RawEvent = serde_json::from_str(r#"{"url": "https://a.b/x.png"}"#).unwrap();
        let event = raw.normalize();
        assert_eq!(event.method, "GET");
        assert_eq!(event.status_code, 0);
        assert_eq!(event.content_type, None);
        assert_eq!(event.content_length, None);
        assert_eq!(event.context_id, None);
        assert_eq!(event.source, EventSource::Completed);
    }

    #[test]
    fn unparseable_content_length_ignored() {
        let raw: RawEvent = serde_json::from_str(
            r#"{
                "url": "https://a.b/x.png",
                "responseHeaders": [{"name": "content-length", "value": "chunked"}]
            }"#,
        )
        .unwrap();
        assert_eq!(raw.normalize().content_length, None);
    }
}
