//! Codec for decoding HTTP requests and encoding HTTP responses.
//!
//! The two sides are independent of each other:
//!
//! - [`RequestDecoder`]: performs exactly one bounded read from a connection
//!   and parses the buffer into a [`Request`](crate::protocol::Request)
//! - [`ResponseEncoder`]: adapts [`Response`](crate::protocol::Response)
//!   serialization to the [`Encoder`](tokio_util::codec::Encoder) trait so
//!   responses can be written through a
//!   [`FramedWrite`](tokio_util::codec::FramedWrite) sink

mod request_decoder;
mod response_encoder;

pub use request_decoder::{READ_BUFFER_SIZE, RequestDecoder};
pub use response_encoder::ResponseEncoder;
