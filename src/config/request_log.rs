use axum::http::{Method, Request, Response};
use std::{
    task::{Context, Poll},
    time::{Duration, Instant},
};
use tower::{Layer, Service};

/// Logs one line per request: method, path, status and latency.
#[derive(Clone, Copy, Default)]
pub struct RequestLogLayer;

impl RequestLogLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogService { inner }
    }
}

#[derive(Clone)]
pub struct RequestLogService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestLogService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = RequestLogFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let method = request.method().clone();
        let path = request.uri().path().to_owned();

        RequestLogFuture {
            future: self.inner.call(request),
            method,
            path,
            started: Instant::now(),
        }
    }
}

#[pin_project::pin_project]
pub struct RequestLogFuture<F> {
    #[pin]
    future: F,
    method: Method,
    path: String,
    started: Instant,
}

impl<F, ResBody, E> std::future::Future for RequestLogFuture<F>
where
    F: std::future::Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: std::pin::Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.future.poll(cx) {
            Poll::Ready(Ok(response)) => {
                let latency: Duration = this.started.elapsed();
                tracing::info!(
                    status = response.status().as_u16(),
                    method = %this.method,
                    path = %this.path,
                    latency_ms = latency.as_secs_f64() * 1000.0,
                    "request completed"
                );
                Poll::Ready(Ok(response))
            }
            Poll::Ready(Err(e)) => {
                tracing::error!(method = %this.method, path = %this.path, "request failed");
                Poll::Ready(Err(e))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
