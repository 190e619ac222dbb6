use std::io::{Cursor, Read};

use tracing::trace;

use super::{Body, Headers, Method, Request, Response, StatusCode, Version};
use crate::config::ServerConfig;
use crate::error::ParseError;

/// Request line and headers, before the body has been read.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: Method,
    /// Request target as sent, query string included.
    pub target: String,
    pub version: Version,
    pub headers: Headers,
}

impl RequestHead {
    /// Declared body length, `0` when the header is absent.
    pub fn content_length(&self) -> Result<usize, ParseError> {
        match self.headers.get("Content-Length") {
            None => Ok(0),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ParseError::InvalidContentLength(raw.to_string())),
        }
    }
}

/// Parses a complete raw HTTP request held in memory.
pub fn parse(raw: &[u8]) -> Result<Request, ParseError> {
    let config = ServerConfig {
        read_buffer_bytes: raw.len().max(1),
        max_header_bytes: usize::MAX,
        max_body_bytes: usize::MAX,
        ..ServerConfig::default()
    };
    read_request(&mut Cursor::new(raw), &config)?.ok_or(ParseError::IncompleteHead)
}

/// Reads one request from `stream`.
///
/// Returns `Ok(None)` when the peer closed the connection without sending
/// anything. Once the head is complete, the body is read until the declared
/// `Content-Length` is satisfied; there is no read timeout, so a client that
/// stalls keeps this call blocked.
pub fn read_request<R: Read>(
    stream: &mut R,
    config: &ServerConfig,
) -> Result<Option<Request>, ParseError> {
    let mut buffer = vec![0; config.read_buffer_bytes.max(1)];
    let mut data = Vec::new();

    let (head_end, separator_len) = loop {
        let bytes_read = stream.read(&mut buffer)?;
        if bytes_read == 0 {
            if data.is_empty() {
                return Ok(None);
            }
            return Err(ParseError::IncompleteHead);
        }
        data.extend_from_slice(&buffer[..bytes_read]);

        if let Some(found) = find_head_end(&data) {
            break found;
        }
        if data.len() > config.max_header_bytes {
            return Err(ParseError::HeadersTooLarge {
                limit: config.max_header_bytes,
            });
        }
    };

    let head = parse_head(&data[..head_end])?;
    let declared = head.content_length()?;
    if declared > config.max_body_bytes {
        return Err(ParseError::PayloadTooLarge {
            declared,
            limit: config.max_body_bytes,
        });
    }

    let mut body = data.split_off(head_end + separator_len);
    body.truncate(declared);
    while body.len() < declared {
        let wanted = (declared - body.len()).min(buffer.len());
        let bytes_read = stream.read(&mut buffer[..wanted])?;
        if bytes_read == 0 {
            return Err(ParseError::TruncatedBody {
                expected: declared,
                received: body.len(),
            });
        }
        trace!(bytes_read, remaining = declared - body.len(), "reading request body");
        body.extend_from_slice(&buffer[..bytes_read]);
    }

    Ok(Some(Request::new(
        head.method,
        &head.target,
        head.version,
        head.headers,
        body,
    )))
}

/// Parses the request line and headers. `raw` must not include the blank
/// line that ends the head.
pub fn parse_head(raw: &[u8]) -> Result<RequestHead, ParseError> {
    let text = String::from_utf8_lossy(raw);
    let mut lines = text.split('\n').map(|line| line.trim_end_matches('\r'));

    let request_line = lines.next().unwrap_or_default();
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    let [method, target, version] = parts.as_slice() else {
        return Err(ParseError::MalformedRequestLine(request_line.to_string()));
    };

    let headers = lines
        .take_while(|line| !line.is_empty())
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect();

    Ok(RequestHead {
        method: method.parse()?,
        target: target.to_string(),
        version: Version::from(*version),
        headers,
    })
}

/// Parses a complete serialized response, the inverse of
/// [`Response::to_bytes`]. Used by clients and tests talking to the server.
pub fn parse_response(raw: &[u8]) -> Result<Response, ParseError> {
    let (head_end, separator_len) = find_head_end(raw).ok_or(ParseError::IncompleteHead)?;
    let text = String::from_utf8_lossy(&raw[..head_end]);
    let mut lines = text.split('\n').map(|line| line.trim_end_matches('\r'));

    let status_line = lines.next().unwrap_or_default();
    let mut parts = status_line.splitn(3, ' ');
    let version = parts.next().map(Version::from).unwrap_or(Version::Unknown);
    let status = parts
        .next()
        .and_then(|code| code.parse().ok())
        .map(StatusCode)
        .ok_or_else(|| ParseError::MalformedRequestLine(status_line.to_string()))?;

    let headers: Headers = lines
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect();

    let mut body = raw[head_end + separator_len..].to_vec();
    if let Some(declared) = headers.get("Content-Length") {
        let declared: usize = declared
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidContentLength(declared.to_string()))?;
        if body.len() < declared {
            return Err(ParseError::TruncatedBody {
                expected: declared,
                received: body.len(),
            });
        }
        body.truncate(declared);
    }

    let is_json = headers
        .get("Content-Type")
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));
    let body = match serde_json::from_slice(&body) {
        Ok(value) if is_json => Body::Json(value),
        _ => match String::from_utf8(body) {
            Ok(text) => Body::Text(text),
            Err(e) => Body::Bytes(e.into_bytes()),
        },
    };

    Ok(Response {
        version,
        status,
        headers,
        body,
    })
}

/// Offset of the blank line ending the head and the length of that
/// separator. Bare `\n\n` is accepted for lenient clients.
fn find_head_end(data: &[u8]) -> Option<(usize, usize)> {
    let crlf = data.windows(4).position(|w| w == b"\r\n\r\n");
    let lf = data.windows(2).position(|w| w == b"\n\n");
    match (crlf, lf) {
        (Some(c), Some(l)) if l < c => Some((l, 2)),
        (Some(c), _) => Some((c, 4)),
        (None, Some(l)) => Some((l, 2)),
        (None, None) => None,
    }
}
