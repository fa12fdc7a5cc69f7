use bytes::Bytes;

use crate::files::MappedContent;

/// Outcome classes the server can report.
///
/// There is no status line on the wire: errors are signalled by sending
/// `"<code> <reason>"` as the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use docserver::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Response payload.
///
/// A mapped file stays mapped for as long as the body lives.
#[derive(Debug)]
pub enum Body {
    Mapped(MappedContent),
    Captured(Bytes),
    Text(String),
}

impl Body {
    pub fn len(&self) -> usize {
        self.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AsRef<[u8]> for Body {
    fn as_ref(&self) -> &[u8] {
        match self {
            Body::Mapped(content) => &content[..],
            Body::Captured(bytes) => &bytes[..],
            Body::Text(text) => text.as_bytes(),
        }
    }
}

/// A framed response: `Content-Length: <N>\n\n` followed by the body.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub header: String,
    pub body: Body,
}

impl Response {
    /// Frames `body` as a successful response.
    pub fn ok(body: Body) -> Self {
        Self::framed(StatusCode::Ok, body)
    }

    /// Builds the error response for `status`, e.g. `404 Not Found`.
    pub fn error(status: StatusCode) -> Self {
        let text = format!("{} {}", status.as_u16(), status.reason_phrase());
        Self::framed(status, Body::Text(text))
    }

    pub fn bad_request() -> Self {
        Self::error(StatusCode::BadRequest)
    }

    fn framed(status: StatusCode, body: Body) -> Self {
        let header = format!("Content-Length: {}\n\n", body.len());
        Self {
            status,
            header,
            body,
        }
    }
}
