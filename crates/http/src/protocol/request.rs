//! Decoded HTTP request representation.
//!
//! A [`Request`] is the structured form of one incoming message: the verbatim
//! start line, the method and path tokens extracted from it, the header
//! mapping and the body bytes. It is built once by
//! [`RequestDecoder::decode`](crate::codec::RequestDecoder::decode), bound to
//! a single connection, and read-only afterwards.

use std::collections::HashMap;

use bytes::Bytes;

/// A decoded HTTP/1.1 request.
///
/// # Header contract
///
/// The header mapping is always initialized: a message with zero header lines
/// yields an *empty* map, never an absent one, so lookup call sites need no
/// `Option` handling. Keys are stored exact-case with the trailing colon
/// stripped; when a key occurs more than once the last occurrence wins.
#[derive(Debug, Default)]
pub struct Request {
    start_line: String,
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Request {
    pub(crate) fn new(
        start_line: String,
        method: String,
        path: String,
        headers: HashMap<String, String>,
        body: Bytes,
    ) -> Self {
        Self { start_line, method, path, headers, body }
    }

    /// The first frame of the message, verbatim.
    pub fn start_line(&self) -> &str {
        &self.start_line
    }

    /// The method token, whitespace-trimmed.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The path token, whitespace-trimmed. No URL decoding is performed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All decoded headers.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Looks up a single header by its exact-case key.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// The message body, possibly empty. Trailing NUL padding from the fixed
    /// read buffer has already been stripped.
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}
