//! Filename hint from a Content-Disposition header.

/// Extracts a filename from a raw Content-Disposition value.
///
/// The RFC 5987 `filename*` form wins over the plain `filename` parameter
/// when both are present and decodable. Only the UTF-8 charset is accepted.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    for param in header.split(';') {
        let Some((name, raw)) = param.split_once('=') else {
            continue;
        };
        let raw = raw.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                if let Some(decoded) = rfc5987_filename(raw) {
                    return Some(decoded);
                }
            }
            "filename" => {
                let value = unquote(raw);
                if !value.is_empty() {
                    plain = Some(value);
                }
            }
            _ => {}
        }
    }
    plain
}

fn rfc5987_filename(raw: &str) -> Option<String> {
    let encoded = raw
        .strip_prefix("UTF-8''")
        .or_else(|| raw.strip_prefix("utf-8''"))?;
    let decoded = percent_decode(encoded);
    (!decoded.is_empty()).then_some(decoded)
}

/// Strips surrounding double quotes and unescapes `\"` and `\\`.
fn unquote(raw: &str) -> String {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
    else {
        return raw.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Percent-decode for `filename*` values. A malformed escape sequence is
/// kept as its raw text.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quoted() {
        let r = filename_from_content_disposition("attachment; filename=\"cover.webp\"");
        assert_eq!(r.as_deref(), Some("cover.webp"));
    }

    #[test]
    fn parse_token() {
        let r = filename_from_content_disposition("inline; filename=pic.png");
        assert_eq!(r.as_deref(), Some("pic.png"));
    }

    #[test]
    fn parse_filename_star_utf8() {
        let r = filename_from_content_disposition("attachment; filename*=UTF-8''caf%C3%A9.jpg");
        assert_eq!(r.as_deref(), Some("café.jpg"));
    }

    #[test]
    fn filename_star_takes_precedence() {
        let r = filename_from_content_disposition(
            "attachment; filename=\"fallback.bin\"; filename*=UTF-8''real%20name.gif",
        );
        assert_eq!(r.as_deref(), Some("real name.gif"));
    }

    #[test]
    fn escaped_quotes_unescaped() {
        let r = filename_from_content_disposition(r#"attachment; filename="a\"b.png""#);
        assert_eq!(r.as_deref(), Some("a\"b.png"));
    }

    #[test]
    fn malformed_percent_escape_kept_literal() {
        assert_eq!(percent_decode("bad%4Gname"), "bad%4Gname");
        assert_eq!(percent_decode("cut%4"), "cut%4");
        assert_eq!(percent_decode("tail%"), "tail%");
    }

    #[test]
    fn no_filename_param() {
        assert_eq!(filename_from_content_disposition("inline"), None);
    }

    #[test]
    fn non_utf8_charset_rejected() {
        let r = filename_from_content_disposition("attachment; filename*=ISO-8859-1''f%E9e.gif");
        assert_eq!(r, None);
    }
}
