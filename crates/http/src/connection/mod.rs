//! Per-connection lifecycle glue around the codec.
//!
//! [`HttpConnection`] owns one live connection and drives it through exactly
//! one request/response exchange: one decode, one handler call, one response
//! write, then the connection is dropped and thereby closed. There is no
//! keep-alive loop and no pipelining.
//!
//! Decode errors propagate to the caller; the connection does not write an
//! error response on the caller's behalf. Each accepted connection is meant
//! to be processed on its own task (`tokio::spawn` in the accept loop), no
//! state is shared between connections.

use std::sync::Arc;

use futures::SinkExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::FramedWrite;
use tracing::{error, info};

use crate::codec::{RequestDecoder, ResponseEncoder};
use crate::handler::Handler;
use crate::protocol::HttpError;

/// One HTTP connection, processed synchronously and sequentially.
///
/// # Type Parameters
///
/// * `R`: the async readable half of the connection
/// * `W`: the async writable half of the connection
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    reader: R,
    framed_write: FramedWrite<W, ResponseEncoder>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, framed_write: FramedWrite::new(writer, ResponseEncoder::new()) }
    }

    /// Decodes one request, hands it to `handler` and writes the response.
    ///
    /// Consumes the connection; dropping it on return closes the underlying
    /// stream. A decode failure is returned as-is and nothing is written.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let mut decoder = RequestDecoder::new();
        let request = match decoder.decode(&mut self.reader).await {
            Ok(request) => request,
            Err(e) => {
                error!(cause = %e, "can't decode request");
                return Err(e.into());
            }
        };
        info!(method = request.method(), path = request.path(), "decoded request");

        let response = handler.call(request).await;
        self.framed_write.send(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use crate::handler::make_handler;
    use crate::protocol::{Request, Response, StatusCode};

    use super::*;

    #[tokio::test]
    async fn processes_one_request_end_to_end() {
        let (client, server) = tokio::io::duplex(4 * 1024);
        let (server_reader, server_writer) = tokio::io::split(server);

        let handler = Arc::new(make_handler(|request: Request| async move {
            let mut response = Response::new();
            response
                .set_status_code(StatusCode::Ok)
                .set_header("request-id", "123")
                .set_body(format!("hello {}", request.path()), "text/plain");
            response
        }));

        let connection = HttpConnection::new(server_reader, server_writer);
        let server_task = tokio::spawn(connection.process(handler));

        let (mut client_reader, mut client_writer) = tokio::io::split(client);
        client_writer.write_all(b"GET /world HTTP/1.1\r\nHeader1: Value1\r\n\r\n").await.unwrap();

        let mut raw = Vec::new();
        client_reader.read_to_end(&mut raw).await.unwrap();
        let text = String::from_utf8(raw).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("request-id: 123\r\n"));
        assert!(text.contains("Content-Type: text/plain\r\n"));
        assert!(text.ends_with("\r\n\r\nhello /world"));

        server_task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn malformed_request_gets_no_response() {
        let (client, server) = tokio::io::duplex(4 * 1024);
        let (server_reader, server_writer) = tokio::io::split(server);

        let handler = Arc::new(make_handler(|_request: Request| async move { Response::new() }));

        let connection = HttpConnection::new(server_reader, server_writer);
        let server_task = tokio::spawn(connection.process(handler));

        let (mut client_reader, mut client_writer) = tokio::io::split(client);
        client_writer.write_all(b"Invalid").await.unwrap();

        let result = server_task.await.unwrap();
        assert!(matches!(result, Err(HttpError::RequestError { .. })));

        // the connection is closed without any bytes written back
        let mut raw = Vec::new();
        client_reader.read_to_end(&mut raw).await.unwrap();
        assert!(raw.is_empty());
    }
}
