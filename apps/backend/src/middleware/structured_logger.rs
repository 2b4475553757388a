use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{web, Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn, Level};

use crate::state::app_state::AppState;
use crate::trace_ctx::UNKNOWN_TRACE_ID;

/// Emits one `request_completed` event per request, carrying the matched
/// route and the store's connection status at completion. Server errors log
/// at `error`, client errors at `warn`, everything else at `info`.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

struct RequestLine {
    method: String,
    path: String,
    route: String,
    status: StatusCode,
    duration_us: u64,
    trace_id: String,
    store: &'static str,
}

macro_rules! request_completed {
    ($emit:ident, $line:expr) => {
        $emit!(
            http.method = %$line.method,
            url.path = %$line.path,
            http.route = %$line.route,
            http.status_code = $line.status.as_u16(),
            duration_us = $line.duration_us,
            trace_id = %$line.trace_id,
            store.status = $line.store,
            "request_completed"
        )
    };
}

impl RequestLine {
    fn emit(&self) {
        let level = level_for(self.status);
        if level == Level::ERROR {
            request_completed!(error, self);
        } else if level == Level::WARN {
            request_completed!(warn, self);
        } else {
            request_completed!(info, self);
        }
    }
}

fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

fn store_status(state: Option<&web::Data<AppState>>) -> &'static str {
    match state {
        Some(state) if state.store().is_connected() => "connected",
        Some(_) => "disconnected",
        None => "absent",
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, route) = match &result {
                Ok(res) => (res.status(), res.request().match_pattern()),
                Err(err) => (err.as_response_error().status_code(), None),
            };

            RequestLine {
                method,
                path,
                route: route.unwrap_or_else(|| "unmatched".to_string()),
                status,
                duration_us: start.elapsed().as_micros() as u64,
                trace_id,
                store: store_status(state.as_ref()),
            }
            .emit();

            result
        })
    }
}
