//! Request-level logging, request IDs, and parent trace extraction.

mod parent_context;
mod request_ids;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::config::observability::ObservabilityConfig;

use super::metrics;

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Middleware logging each request with its id, status and duration.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLogging {
    slow_request_threshold: Duration,
    propagate_parent: bool,
}

impl RequestLogging {
    pub(crate) fn new(slow_request_threshold: Duration, propagate_parent: bool) -> Self {
        Self {
            slow_request_threshold,
            propagate_parent,
        }
    }

    /// Incoming trace context is only honoured when spans are exported.
    pub(crate) fn from_config(config: &ObservabilityConfig) -> Self {
        Self::new(
            Duration::from_millis(config.slow_request_threshold_ms),
            config.otel_enabled,
        )
    }

    fn is_slow(&self, duration: Duration) -> bool {
        duration > self.slow_request_threshold
    }
}

#[handler]
impl RequestLogging {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if req.uri().path() == "/metrics" {
            ctrl.call_next(req, depot, res).await;
            return;
        }

        let started = Instant::now();

        let request_id =
            request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

        request_ids::set_request_id_header(res, &request_id);

        let method = req.method().to_string();
        let path = req.uri().path().to_owned();
        let remote_addr = req.remote_addr().to_string();
        let otel_span_name = format!("{method} {path}");
        let _in_flight_request = metrics::InFlightRequestGuard::track();

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            otel.name = %otel_span_name,
            otel.kind = "server",
            request_id = %request_id,
            method = %method,
            path = %path,
            remote_addr = %remote_addr,
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        if self.propagate_parent
            && let Some(parent_context) = parent_context::extract_parent_context(req.headers())
            && let Err(source) = span.set_parent(parent_context)
        {
            warn!("failed to set parent context on request span: {source}");
        }

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;

        let duration = started.elapsed();
        let status = request_ids::response_status_or_ok(res.status_code);
        let duration_ms = duration.as_millis();
        let threshold_ms = self.slow_request_threshold.as_millis();

        metrics::observe_request(&method, &path, status.as_u16(), duration.as_secs_f64());

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            info!(status = status.as_u16(), duration_ms, "request.completed");

            if status.is_server_error() {
                error!(
                    status = status.as_u16(),
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    "server error response"
                );
            } else if status.is_client_error() {
                warn!(
                    status = status.as_u16(),
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    "client error response"
                );
            }

            if self.is_slow(duration) {
                warn!(
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    duration_ms,
                    threshold_ms,
                    "slow request detected"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };

    use super::*;

    #[handler]
    async fn echo_request_id(depot: &mut Depot) -> String {
        depot
            .get::<String>(REQUEST_ID_DEPOT_KEY)
            .cloned()
            .unwrap_or_default()
    }

    fn service() -> Service {
        Service::new(
            Router::new()
                .hoop(RequestLogging::new(Duration::from_secs(1), false))
                .push(Router::with_path("echo").get(echo_request_id)),
        )
    }

    #[tokio::test]
    async fn supplied_request_id_is_echoed() {
        let mut response = TestClient::get("http://example.com/echo")
            .add_header(request_ids::REQUEST_ID_HEADER, "req-123", true)
            .send(&service())
            .await;

        let header = response
            .headers()
            .get(request_ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        assert_eq!(header.as_deref(), Some("req-123"));
        assert_eq!(response.take_string().await.unwrap_or_default(), "req-123");
    }

    #[test]
    fn threshold_and_propagation_come_from_config() {
        let logging = RequestLogging::from_config(&ObservabilityConfig {
            otel_enabled: true,
            otel_exporter_otlp_endpoint: "http://localhost:4317".into(),
            otel_exporter_otlp_timeout_seconds: 3,
            otel_service_name: "crm-graphql".into(),
            otel_service_version: "0.1.0".into(),
            otel_deployment_environment: "test".into(),
            otel_trace_sample_ratio: 1.0,
            slow_request_threshold_ms: 250,
        });

        assert!(logging.propagate_parent);
        assert!(!logging.is_slow(Duration::from_millis(250)));
        assert!(logging.is_slow(Duration::from_millis(251)));
    }

    #[tokio::test]
    async fn missing_request_id_is_generated() {
        let response = TestClient::get("http://example.com/echo")
            .send(&service())
            .await;

        let header = response
            .headers()
            .get(request_ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        assert!(uuid::Uuid::parse_str(header).is_ok(), "got {header:?}");
    }
}
