//! HTTP surface: `GET /api/destino/reporte`.

use std::error::Error as _;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use log::error;

use crate::handler::{ReportError, ReportPayload, ReportRequestHandler};

/// Path of the report download route.
pub const REPORT_ROUTE: &str = "/api/destino/reporte";

/// Builds the router serving the destination report.
pub fn router(handler: ReportRequestHandler) -> Router {
    Router::new()
        .route(REPORT_ROUTE, get(generate_report))
        .with_state(Arc::new(handler))
}

/// Layout and serialization are CPU-bound, so the request runs on the blocking pool.
async fn generate_report(State(handler): State<Arc<ReportRequestHandler>>) -> Response {
    match tokio::task::spawn_blocking(move || handler.handle_report_request()).await {
        Ok(result) => result.into_response(),
        Err(err) => {
            error!("Destination report task did not complete: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

impl IntoResponse for ReportPayload {
    fn into_response(self) -> Response {
        let disposition = self.content_disposition();
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.content_type.to_owned()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        error!("Destination report request failed: {}", message);

        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
