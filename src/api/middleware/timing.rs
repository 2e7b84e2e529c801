//! Request timing middleware
//!
//! Logs method, path, status and latency of every request through `tracing`.

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, warn};

/// Latency above which a request is logged at WARN
const SLOW_REQUEST_MS: u128 = 1000;

#[derive(Clone, Default)]
pub struct TimingMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingService {
            service: Rc::new(service),
        }))
    }
}

pub struct TimingService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TimingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        Box::pin(async move {
            let result = srv.call(req).await;

            let elapsed_ms = start.elapsed().as_millis();
            let status = match &result {
                Ok(response) => response.status().as_u16(),
                Err(_) => 500,
            };

            if elapsed_ms >= SLOW_REQUEST_MS {
                warn!(
                    "Slow request: {} {} -> {} in {} ms",
                    method, path, status, elapsed_ms
                );
            } else {
                debug!("{} {} -> {} in {} ms", method, path, status, elapsed_ms);
            }

            result
        })
    }
}
