//! Access log middleware - one structured event per request, tagged with
//! a request id that is echoed back to the client.

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the request id, in and out.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs method, path, status and latency of every request.
pub struct AccessLog;

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AccessLogService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogService { service }))
    }
}

pub struct AccessLogService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AccessLogService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Reuse an id set by a client or proxy.
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let method = req.method().to_string();
        let path = req.path().to_string();
        let started = Instant::now();

        // Everything logged while handling the request carries its id.
        let span = tracing::info_span!("request", %request_id);
        let fut = span.in_scope(|| self.service.call(req));

        Box::pin(async move {
            let mut res = fut.await?;

            let status = res.status().as_u16();
            let latency_ms = started.elapsed().as_millis() as u64;

            match status {
                500.. => tracing::error!(%request_id, %method, %path, status, latency_ms, "request"),
                400..=499 => {
                    tracing::warn!(%request_id, %method, %path, status, latency_ms, "request")
                }
                _ => tracing::info!(%request_id, %method, %path, status, latency_ms, "request"),
            }

            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            Ok(res)
        }
        .instrument(span))
    }
}
