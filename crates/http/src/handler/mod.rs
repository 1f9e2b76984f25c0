//! Request handler seam.
//!
//! A [`Handler`] turns a decoded [`Request`] into a [`Response`]. Handlers
//! are infallible by contract: building a response never fails, so a handler
//! that hits an application error answers with an error status itself rather
//! than propagating it into the codec.

use std::future::Future;

use async_trait::async_trait;

use crate::protocol::{Request, Response};

#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, request: Request) -> Response;
}

/// Adapter implementing [`Handler`] for plain async functions.
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send,
{
    async fn call(&self, request: Request) -> Response {
        (self.f)(request).await
    }
}

pub fn make_handler<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Request) -> Fut,
    Fut: Future<Output = Response>,
{
    HandlerFn { f }
}
