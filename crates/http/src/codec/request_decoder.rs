//! HTTP request decoder.
//!
//! The decoder performs exactly one read into a fixed-capacity buffer, splits
//! the buffer on the `\r\n` line terminator into frames, then extracts the
//! start line, the headers up to the blank separator, and the remaining frame
//! as the body. It never loops to accumulate more data: a message that does
//! not fit in one read is out of scope, and a streaming frame accumulator
//! would be a separate extension rather than a change to this decoder.
//!
//! # Decoding stages
//!
//! 1. Read frames: one read, zero bytes means the peer closed prematurely
//! 2. Parse the start line: exactly three non-empty space-separated tokens
//! 3. Parse headers: first-space split per frame, stopping at the blank
//!    separator
//! 4. Parse the body: last frame, trailing NUL padding stripped
//!
//! Each stage short-circuits the next on failure and no partial
//! [`Request`] is ever returned.

use std::collections::HashMap;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::ensure;
use crate::protocol::{CRLF, ParseError, Request};

/// Capacity of the single read performed per request.
///
/// Messages longer than this are truncated; the tail of the buffer arrives as
/// NUL padding and is stripped from the body.
pub const READ_BUFFER_SIZE: usize = 1024;

/// Decoder for one HTTP/1.1 request read off a connection.
///
/// One decoder serves one connection for one request; it holds no state
/// shared between connections.
#[derive(Debug, Default)]
pub struct RequestDecoder;

impl RequestDecoder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Reads one request from `conn` and decodes it.
    ///
    /// # Errors
    ///
    /// - [`ParseError::ConnectionClosed`]: the read returned zero bytes
    /// - [`ParseError::Io`]: the read itself failed
    /// - [`ParseError::EmptyMessage`]: nothing to parse
    /// - [`ParseError::InvalidStartLine`]: malformed request line
    pub async fn decode<C>(&mut self, conn: &mut C) -> Result<Request, ParseError>
    where
        C: AsyncRead + Unpin,
    {
        let mut buf = [0u8; READ_BUFFER_SIZE];
        let num_of_bytes = conn.read(&mut buf).await?;
        ensure!(num_of_bytes > 0, ParseError::ConnectionClosed);
        trace!(bytes = num_of_bytes, "read request bytes");

        // The buffer is split whole: the last frame carries the NUL padding
        // until the body stage strips it.
        let frames = split_frames(&buf);
        let (start_line, method, path) = parse_start_line(&frames)?;
        let headers = parse_headers(&frames[1..]);
        let body = parse_body(&frames);

        Ok(Request::new(start_line, method, path, headers, body))
    }
}

/// Splits the raw buffer on `\r\n`. Like the split of a string, this always
/// yields at least one frame (the whole buffer when no terminator occurs).
fn split_frames(buf: &[u8]) -> Vec<&[u8]> {
    let mut frames = Vec::new();
    let mut rest = buf;
    while let Some(pos) = rest.windows(CRLF.len()).position(|window| window == CRLF) {
        frames.push(&rest[..pos]);
        rest = &rest[pos + CRLF.len()..];
    }
    frames.push(rest);
    frames
}

/// Validates frame 0 as the start line and extracts the method and path
/// tokens, both whitespace-trimmed.
fn parse_start_line(frames: &[&[u8]]) -> Result<(String, String, String), ParseError> {
    let raw = frames.first().ok_or(ParseError::EmptyMessage)?;
    let start_line = String::from_utf8_lossy(raw).into_owned();

    let parts: Vec<&str> = start_line.split(' ').collect();
    ensure!(
        parts.len() == 3 && parts.iter().all(|part| !part.is_empty()),
        ParseError::invalid_start_line(start_line.trim_end_matches('\0'))
    );

    let method = parts[0].trim().to_owned();
    let path = parts[1].trim().to_owned();
    Ok((start_line, method, path))
}

/// Scans frames after the start line. A frame without a space ends the header
/// section (it is the blank separator, or malformed). The key loses one
/// trailing colon; the value is everything after the first space. Later
/// duplicates overwrite earlier ones.
fn parse_headers(frames: &[&[u8]]) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    for frame in frames {
        let frame = String::from_utf8_lossy(frame);
        let Some((key, value)) = frame.split_once(' ') else {
            break;
        };
        let key = key.strip_suffix(':').unwrap_or(key);
        headers.insert(key.to_owned(), value.to_owned());
    }
    headers
}

/// Takes the last frame as the body, stripping the trailing NUL padding left
/// over from the fixed-size read buffer.
fn parse_body(frames: &[&[u8]]) -> Bytes {
    match frames.last() {
        Some(frame) if !frame.is_empty() => {
            let end = frame.iter().rposition(|byte| *byte != 0).map_or(0, |pos| pos + 1);
            Bytes::copy_from_slice(&frame[..end])
        }
        _ => Bytes::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use tokio::io::ReadBuf;

    use super::*;

    async fn decode(input: &str) -> Result<Request, ParseError> {
        let mut conn = input.as_bytes();
        RequestDecoder::new().decode(&mut conn).await
    }

    #[tokio::test]
    async fn valid_get_request() {
        let request = decode("GET /path HTTP/1.1\r\nHeader1: Value1\r\n\r\n").await.unwrap();

        assert_eq!(request.start_line(), "GET /path HTTP/1.1");
        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/path");
        assert_eq!(request.header("Header1"), Some("Value1"));
        assert_eq!(request.headers().len(), 1);
        assert!(request.body().is_empty());
    }

    #[tokio::test]
    async fn valid_post_request_with_body() {
        let request = decode("POST /path HTTP/1.1\r\nHeader1: Value1\r\n\r\nbody message").await.unwrap();

        assert_eq!(request.method(), "POST");
        assert_eq!(request.path(), "/path");
        assert_eq!(request.header("Header1"), Some("Value1"));
        assert_eq!(&request.body()[..], b"body message");
    }

    #[tokio::test]
    async fn zero_header_lines_yield_empty_map() {
        let request = decode("GET /path HTTP/1.1\r\n\r\n").await.unwrap();

        assert!(request.headers().is_empty());
        assert!(request.body().is_empty());
    }

    #[tokio::test]
    async fn duplicate_header_key_last_wins() {
        let request = decode("GET / HTTP/1.1\r\nToken: first\r\nToken: second\r\n\r\n").await.unwrap();

        assert_eq!(request.header("Token"), Some("second"));
    }

    #[tokio::test]
    async fn header_value_keeps_everything_after_first_space() {
        let request = decode("GET / HTTP/1.1\r\nUser-Agent: curl thing/1.0\r\n\r\n").await.unwrap();

        assert_eq!(request.header("User-Agent"), Some("curl thing/1.0"));
    }

    #[tokio::test]
    async fn malformed_header_frame_ends_header_section() {
        let request = decode("GET / HTTP/1.1\r\nHeader1: Value1\r\nNoSpaceHere\r\nHeader2: Value2\r\n\r\n").await.unwrap();

        assert_eq!(request.header("Header1"), Some("Value1"));
        assert_eq!(request.header("Header2"), None);
    }

    #[tokio::test]
    async fn body_padding_is_stripped() {
        // the 1024-byte buffer pads the last frame with NULs; they must not
        // leak into the body
        let request = decode("POST /upload HTTP/1.1\r\n\r\npayload").await.unwrap();

        assert_eq!(&request.body()[..], b"payload");
    }

    #[tokio::test]
    async fn start_line_without_spaces_is_invalid() {
        let err = decode("GET/pathHTTP/1.1").await.unwrap_err();
        assert!(matches!(err, ParseError::InvalidStartLine { .. }));
    }

    #[tokio::test]
    async fn start_line_with_irregular_spacing_is_invalid() {
        let err = decode(" GET  /path  ").await.unwrap_err();
        assert!(matches!(err, ParseError::InvalidStartLine { .. }));
    }

    #[tokio::test]
    async fn start_line_with_missing_parts_is_invalid() {
        let err = decode("Invalid").await.unwrap_err();
        assert!(matches!(err, ParseError::InvalidStartLine { .. }));
    }

    #[tokio::test]
    async fn zero_byte_read_is_premature_close() {
        let err = decode("").await.unwrap_err();
        assert!(matches!(err, ParseError::ConnectionClosed));
    }

    #[tokio::test]
    async fn read_failure_surfaces_io_error() {
        struct BrokenConn;

        impl AsyncRead for BrokenConn {
            fn poll_read(
                self: Pin<&mut Self>,
                _cx: &mut Context<'_>,
                _buf: &mut ReadBuf<'_>,
            ) -> Poll<io::Result<()>> {
                Poll::Ready(Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer")))
            }
        }

        let err = RequestDecoder::new().decode(&mut BrokenConn).await.unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }

    #[test]
    fn empty_frame_sequence_is_empty_message() {
        let err = parse_start_line(&[]).unwrap_err();
        assert!(matches!(err, ParseError::EmptyMessage));
    }

    #[test]
    fn split_frames_keeps_remainder() {
        let frames = split_frames(b"a\r\nb\r\n");
        assert_eq!(frames, vec![&b"a"[..], &b"b"[..], &b""[..]]);

        let frames = split_frames(b"no terminator");
        assert_eq!(frames, vec![&b"no terminator"[..]]);
    }
}
