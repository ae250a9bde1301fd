use crate::api::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Which part of the service a request hit. Used as a bounded metric label
/// instead of the raw path, which carries ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Lookup,
    Record,
    Create,
    Chat,
    Fields,
    Health,
    Metrics,
    Root,
    Other,
}

impl Surface {
    #[must_use]
    pub fn classify(method: &Method, path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Self::Root,
            "/metrics" => Self::Metrics,
            "/api/health" => Self::Health,
            "/api/fields" => Self::Fields,
            "/api/chat" => Self::Chat,
            "/api/anime/lookup" => Self::Lookup,
            "/api/anime" if *method == Method::POST => Self::Create,
            p if p.starts_with("/api/anime/") => Self::Record,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lookup => "lookup",
            Self::Record => "record",
            Self::Create => "create",
            Self::Chat => "chat",
            Self::Fields => "fields",
            Self::Health => "health",
            Self::Metrics => "metrics",
            Self::Root => "root",
            Self::Other => "other",
        }
    }
}

/// Maps a lookup-facing status to the outcome reported to dashboards.
const fn outcome(status: u16) -> &'static str {
    match status {
        404 => "not_found",
        400 => "invalid_request",
        503 => "storage_unavailable",
        s if s >= 500 => "error",
        s if s >= 400 => "client_error",
        _ => "ok",
    }
}

/// Tags every request with an id, echoes it in `x-request-id`, and records
/// `http_requests_total` / `http_request_duration_seconds` by surface.
pub async fn request_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let surface = Surface::classify(req.method(), req.uri().path());
    let method = req.method().clone();

    let span = info_span!(
        "request",
        %request_id,
        %method,
        surface = surface.label(),
    );

    async move {
        let mut response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();
        let outcome = outcome(status);

        let labels = [
            ("method", method.to_string()),
            ("surface", surface.label().to_string()),
            ("outcome", outcome.to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        match (surface, outcome) {
            (_, "storage_unavailable" | "error") => {
                warn!(status, elapsed_ms, outcome, "Request failed");
            }
            (Surface::Metrics | Surface::Health, _) => {
                debug!(status, elapsed_ms, "Probe served");
            }
            _ => info!(status, elapsed_ms, outcome, "Request finished"),
        }

        response
    }
    .instrument(span)
    .await
}
