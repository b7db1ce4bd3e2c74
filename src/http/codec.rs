//! Incremental HTTP/1.1 request parsing

use super::error::{HttpError, HttpResult};
use super::request::{Request, Version};

/// Size limits applied while parsing
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_header_bytes: 8 * 1024,
            max_body_bytes: 1024 * 1024,
        }
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Try to parse one request from the front of `buf`.
///
/// Returns `Ok(None)` while more bytes are needed, otherwise the request and
/// the number of bytes it occupied.
pub fn parse_request(buf: &[u8], limits: &Limits) -> HttpResult<Option<(Request, usize)>> {
    let Some(header_end) = find_header_end(buf) else {
        if buf.len() > limits.max_header_bytes {
            return Err(HttpError::HeadersTooLarge {
                limit: limits.max_header_bytes,
            });
        }
        return Ok(None);
    };
    if header_end > limits.max_header_bytes {
        return Err(HttpError::HeadersTooLarge {
            limit: limits.max_header_bytes,
        });
    }

    let head = std::str::from_utf8(&buf[..header_end])
        .map_err(|_| HttpError::Malformed("request head is not UTF-8".to_string()))?;
    let mut lines = head.split("\r\n");

    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split(' ');
    let (method, target, version) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(m), Some(t), Some(v), None) if !m.is_empty() && t.starts_with('/') => (m, t, v),
        _ => {
            return Err(HttpError::Malformed(format!(
                "bad request line: {:?}",
                request_line
            )));
        }
    };
    let version = match version {
        "HTTP/1.1" => Version::Http11,
        "HTTP/1.0" => Version::Http10,
        other => return Err(HttpError::Malformed(format!("unsupported version {}", other))),
    };

    let mut request = Request::new(method, target);
    request.version = version;
    for line in lines {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| HttpError::Malformed(format!("bad header line: {:?}", line)))?;
        request = request.with_header(name.trim(), value.trim());
    }

    if let Some(encoding) = request.header("transfer-encoding") {
        return Err(HttpError::UnsupportedEncoding(encoding.to_string()));
    }

    let content_length = match request.header("content-length") {
        Some(value) => value
            .parse::<usize>()
            .map_err(|_| HttpError::Malformed(format!("bad content-length: {:?}", value)))?,
        None => 0,
    };
    if content_length > limits.max_body_bytes {
        return Err(HttpError::BodyTooLarge {
            limit: limits.max_body_bytes,
            actual: content_length,
        });
    }

    let body_start = header_end + 4;
    let total = body_start + content_length;
    if buf.len() < total {
        return Ok(None);
    }
    request.body = buf[body_start..total].to_vec();
    Ok(Some((request, total)))
}
