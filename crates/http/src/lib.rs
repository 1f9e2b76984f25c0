//! A minimal single-read HTTP/1.1 message codec
//!
//! This crate turns raw bytes read from a byte-stream connection into a structured
//! [`Request`](protocol::Request) and serializes a structured
//! [`Response`](protocol::Response) back into bytes suitable for writing to a
//! connection. It is deliberately not a general-purpose HTTP implementation:
//! a whole request must arrive in a single bounded read, and there is no
//! chunked transfer-encoding, keep-alive, or pipelining.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//! use atomic_http::connection::HttpConnection;
//! use atomic_http::handler::make_handler;
//! use atomic_http::protocol::{Request, Response, StatusCode};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:3000").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = Arc::clone(&handler);
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             if let Err(e) = connection.process(handler).await {
//!                 error!(cause = %e, "connection closed with error");
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request) -> Response {
//!     info!(path = request.path(), "incoming request");
//!     let mut response = Response::new();
//!     response.set_status_code(StatusCode::Ok).set_body("Hello World!", "text/plain");
//!     response
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: the data model: [`Request`](protocol::Request),
//!   [`Response`](protocol::Response), the closed [`StatusCode`](protocol::StatusCode)
//!   table and the error types
//! - [`codec`]: decoding requests and encoding responses
//! - [`connection`]: per-connection lifecycle glue around the codec
//! - [`handler`]: the request handler seam
//!
//! # Limitations
//!
//! - A request must fit in one 1024-byte read; longer messages are truncated
//! - One request per connection, then the connection is closed
//! - Header keys are stored exact-case; no case-insensitive lookup

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
