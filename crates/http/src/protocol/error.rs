use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// Errors produced while decoding a request.
///
/// All variants are terminal for the decode call: no partial [`Request`] is
/// returned and the decoder never retries internally.
///
/// [`Request`]: crate::protocol::Request
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("connection closed prematurely")]
    ConnectionClosed,

    #[error("error while reading connection: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("request has no frames")]
    EmptyMessage,

    #[error("invalid start line format: {line:?}")]
    InvalidStartLine { line: String },
}

impl ParseError {
    pub fn invalid_start_line<S: ToString>(line: S) -> Self {
        Self::InvalidStartLine { line: line.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

/// Errors produced while sending a response.
///
/// Serialization itself cannot fail; only the underlying write can.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
