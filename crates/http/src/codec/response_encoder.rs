//! HTTP response encoder.
//!
//! Serialization itself lives on [`Response`] and cannot fail; this encoder
//! adapts it to the [`Encoder`] trait so a response can be written through a
//! [`FramedWrite`](tokio_util::codec::FramedWrite) sink, which is where IO
//! errors can occur.

use bytes::BytesMut;
use tokio_util::codec::Encoder;

use crate::protocol::{Response, SendError};

/// Encoder writing one serialized [`Response`] into the outgoing buffer.
#[derive(Debug, Default)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        item.write_to(dst);
        Ok(())
    }
}
