//! Core protocol types for the codec.
//!
//! This module provides the data model the codec operates on:
//!
//! - **Request side** ([`request`]): [`Request`], the decoded form of one
//!   incoming message
//! - **Response side** ([`response`]): [`Response`], a mutable builder that
//!   serializes into raw bytes
//! - **Status table** ([`status`]): [`StatusCode`], the closed enumeration of
//!   standard-registry status codes with their wire text
//! - **Error handling** ([`error`]): [`HttpError`], [`ParseError`] and
//!   [`SendError`]

mod error;
mod request;
mod response;
mod status;

pub use error::{HttpError, ParseError, SendError};
pub use request::Request;
pub use response::Response;
pub use status::StatusCode;

/// The HTTP/1.1 line terminator.
pub(crate) const CRLF: &[u8] = b"\r\n";
