//! HTTP response builder and serialization.
//!
//! A [`Response`] is a mutable builder: each setter returns `&mut Self` so
//! calls can be chained, and the terminal [`encode`](Response::encode)
//! serializes status line, headers and body into one byte sequence. A
//! response is never shared before serialization, so no locking is involved.

use std::collections::HashMap;

use bytes::{BufMut, Bytes, BytesMut};

use crate::protocol::{CRLF, StatusCode};

const INIT_RESPONSE_SIZE: usize = 1024;

/// An HTTP/1.1 response under construction.
///
/// ```
/// use atomic_http::protocol::{Response, StatusCode};
///
/// let mut response = Response::new();
/// response
///     .set_status_code(StatusCode::Ok)
///     .set_header("request-id", "123")
///     .set_body("hello", "text/plain");
/// let bytes = response.encode();
/// assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
/// ```
#[derive(Debug)]
pub struct Response {
    status_code: StatusCode,
    headers: HashMap<String, String>,
    body: String,
}

impl Response {
    /// Creates an empty response. The status code defaults to
    /// [`StatusCode::Ok`]; an unset status is not representable.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_status_code(&mut self, status_code: StatusCode) -> &mut Self {
        self.status_code = status_code;
        self
    }

    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body and, as a side effect, the `Content-Type` and
    /// `Content-Length` headers, overwriting any previously set values for
    /// those two keys.
    pub fn set_body(&mut self, content: impl Into<String>, content_type: &str) -> &mut Self {
        self.body = content.into();
        self.headers.insert("Content-Type".to_owned(), content_type.to_owned());
        self.headers.insert("Content-Length".to_owned(), self.body.len().to_string());
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Serializes the response into raw bytes.
    ///
    /// Produces the status line, each header as `key: value` (iteration order
    /// unspecified), exactly one blank line regardless of header count, then
    /// the body verbatim with nothing appended. `Content-Length` is not
    /// validated against the actual body size; it is only as accurate as the
    /// last [`set_body`](Response::set_body) call.
    pub fn encode(&self) -> Bytes {
        let mut dst = BytesMut::with_capacity(INIT_RESPONSE_SIZE);
        self.write_to(&mut dst);
        dst.freeze()
    }

    pub(crate) fn write_to(&self, dst: &mut BytesMut) {
        dst.put_slice(b"HTTP/1.1 ");
        dst.put_slice(self.status_code.as_str().as_bytes());
        dst.put_slice(CRLF);
        for (key, value) in &self.headers {
            dst.put_slice(key.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(CRLF);
        }
        dst.put_slice(CRLF);
        dst.put_slice(self.body.as_bytes());
    }
}

impl Default for Response {
    fn default() -> Self {
        Self { status_code: StatusCode::Ok, headers: HashMap::new(), body: String::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(encoded: &Bytes) -> (Vec<String>, String) {
        let text = std::str::from_utf8(encoded).unwrap();
        let (head, body) = text.split_once("\r\n\r\n").unwrap();
        (head.split("\r\n").map(str::to_owned).collect(), body.to_owned())
    }

    #[test]
    fn fluent_builder_chains() {
        let mut response = Response::new();
        response.set_status_code(StatusCode::Created).set_header("request-id", "42").set_body("{}", "application/json");

        assert_eq!(response.status_code(), StatusCode::Created);
        assert_eq!(response.headers().get("request-id").map(String::as_str), Some("42"));
        assert_eq!(response.body(), "{}");
    }

    #[test]
    fn set_body_populates_content_headers() {
        let mut response = Response::new();
        response.set_body("hello", "text/plain");

        assert_eq!(response.headers().get("Content-Type").map(String::as_str), Some("text/plain"));
        assert_eq!(response.headers().get("Content-Length").map(String::as_str), Some("5"));
    }

    #[test]
    fn set_body_overwrites_manual_content_headers() {
        let mut response = Response::new();
        response.set_header("Content-Type", "text/html").set_header("Content-Length", "9999").set_body("hi", "text/plain");

        assert_eq!(response.headers().get("Content-Type").map(String::as_str), Some("text/plain"));
        assert_eq!(response.headers().get("Content-Length").map(String::as_str), Some("2"));
    }

    #[test]
    fn second_set_body_wins() {
        let mut response = Response::new();
        response.set_body("a longer first body", "text/plain");
        response.set_body("tiny", "application/json");

        assert_eq!(response.body(), "tiny");
        assert_eq!(response.headers().get("Content-Length").map(String::as_str), Some("4"));
        assert_eq!(response.headers().get("Content-Type").map(String::as_str), Some("application/json"));
    }

    #[test]
    fn encode_full_response() {
        let mut response = Response::new();
        response.set_status_code(StatusCode::Ok).set_header("request-id", "123").set_body("hello", "text/plain");

        let encoded = response.encode();
        assert!(encoded.starts_with(b"HTTP/1.1 200 OK\r\n"));

        let (head, body) = lines(&encoded);
        assert!(head.contains(&"Content-Type: text/plain".to_owned()));
        assert!(head.contains(&"Content-Length: 5".to_owned()));
        assert!(head.contains(&"request-id: 123".to_owned()));
        // body is verbatim, nothing appended after it
        assert_eq!(body, "hello");
        assert!(encoded.ends_with(b"hello"));
    }

    #[test]
    fn encode_without_headers_has_single_blank_line() {
        let mut response = Response::new();
        response.set_status_code(StatusCode::NoContent);

        let encoded = response.encode();
        assert_eq!(&encoded[..], b"HTTP/1.1 204 No Content\r\n\r\n");
    }

    #[test]
    fn encode_without_body_ends_at_blank_line() {
        let mut response = Response::new();
        response.set_status_code(StatusCode::NotFound).set_header("request-id", "7");

        let encoded = response.encode();
        assert!(encoded.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
        assert!(encoded.ends_with(b"request-id: 7\r\n\r\n"));
    }
}
