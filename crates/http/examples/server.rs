//! Demo ingest server: accepts JSON records over HTTP on port 3000.
//!
//! ```bash
//! curl -v http://127.0.0.1:3000/ -d '{"user":{"id":1,"username":"ada","email":"ada@example.com"},
//!   "products":[{"id":7,"name":"keyboard","price":42.5}],"status":"open","timestamp":"2026-01-01T00:00:00Z"}'
//! ```

use std::sync::Arc;

use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use atomic_http::connection::HttpConnection;
use atomic_http::handler::make_handler;
use atomic_http::protocol::{Request, Response, StatusCode};

#[derive(Debug, Deserialize)]
struct Product {
    id: i64,
    name: String,
    price: f64,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
    username: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct Record {
    user: User,
    products: Vec<Product>,
    status: String,
    timestamp: String,
}

async fn ingest(request: Request) -> Response {
    for (key, value) in request.headers() {
        info!("{key}: {value}");
    }

    let mut response = Response::new();
    match serde_json::from_slice::<Record>(request.body()) {
        Ok(record) => {
            info!(
                user_id = record.user.id,
                username = %record.user.username,
                email = %record.user.email,
                status = %record.status,
                timestamp = %record.timestamp,
                "record received"
            );
            for product in &record.products {
                info!(id = product.id, name = %product.name, price = product.price, "product");
            }
            response.set_status_code(StatusCode::Ok).set_body(r#"{"result":"accepted"}"#, mime::APPLICATION_JSON.as_ref());
        }
        Err(e) => {
            error!(cause = %e, "invalid record payload");
            response
                .set_status_code(StatusCode::BadRequest)
                .set_body(r#"{"result":"rejected"}"#, mime::APPLICATION_JSON.as_ref());
        }
    }
    response
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let tcp_listener = match TcpListener::bind("0.0.0.0:3000").await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "failed to bind to port 3000");
            return;
        }
    };
    info!("server listening on port 3000");

    let handler = Arc::new(make_handler(ingest));

    loop {
        let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "error accepting connection");
                continue;
            }
        };

        let handler = Arc::clone(&handler);

        tokio::spawn(async move {
            let (reader, writer) = tcp_stream.into_split();
            let connection = HttpConnection::new(reader, writer);
            if let Err(e) = connection.process(handler).await {
                error!(remote_addr = %remote_addr, cause = %e, "connection closed with error");
            }
        });
    }
}
