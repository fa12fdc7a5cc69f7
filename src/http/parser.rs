use crate::error::RequestError;
use crate::http::request::{Method, Request};

/// Parses the request line `GET <path>`.
///
/// The first two whitespace-delimited tokens are the method and the path.
/// Anything after them (a protocol version, headers) is ignored.
pub fn parse_request(buf: &[u8]) -> Result<Request, RequestError> {
    let text = String::from_utf8_lossy(buf);
    let mut parts = text.split_whitespace();

    let method_str = parts.next().ok_or(RequestError::BadRequest)?;
    let path = parts.next().ok_or(RequestError::BadRequest)?;

    let method = Method::from_str(method_str).ok_or(RequestError::BadRequest)?;

    if !path.starts_with('/') {
        return Err(RequestError::BadRequest);
    }

    Ok(Request {
        method,
        path: path.to_string(),
    })
}
