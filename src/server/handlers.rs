//! HTTP request handlers
//!
//! Axum handlers for the form page and the prediction endpoint.

use crate::predict::{predict_body, PredictError};
use crate::server::{state::AppState, ErrorResponse, PredictionResponse};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{error, info_span, warn};

/// Form page served at `/`.
pub const INDEX_HTML: &str = include_str!("index.html");

/// Generate a request ID
fn request_id() -> String {
    format!("req-{:016x}", rand::random::<u64>())
}

fn status_for(err: &PredictError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Serve the price form
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Predict a shipping price
///
/// The body is read raw so that a missing or wrong `Content-Type` gets the
/// same answer as an unparseable body. A body that cannot be buffered (over
/// `max_body_size`, or a broken stream) keeps the rejection's status but
/// still answers with an `{"error": ...}` body.
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PredictionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let span = info_span!("predict", request_id = %request_id());

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let status = rejection.status();
            let err = PredictError::Internal(rejection.body_text());
            span.in_scope(|| warn!(%status, error = %err, "request body rejected"));
            return Err((status, Json(ErrorResponse::new(err.to_string()))));
        }
    };

    span.in_scope(|| match predict_body(state.model(), &body) {
        Ok(precio_predicho) => Ok(Json(PredictionResponse { precio_predicho })),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                error!(error = ?e, "prediction failed");
            } else {
                warn!(error = %e, "rejected request");
            }
            Err((status, Json(ErrorResponse::new(e.to_string()))))
        }
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::ServerConfig;
    use std::path::PathBuf;

    fn uninitialized_state() -> AppState {
        AppState::new(
            ServerConfig::default(),
            Err(crate::Error::ArtifactNotFound {
                path: PathBuf::from("modelo_envios.safetensors"),
            }),
        )
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let Html(page) = index().await;
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("fetch('/predict'"));
        assert!(page.contains(r#"<option value="Tarapoto">Tarapoto</option>"#));
    }

    #[tokio::test]
    async fn test_predict_uninitialized() {
        let body = Bytes::from_static(br#"{"peso": 5, "inicio": "Lima", "llegada": "Cusco"}"#);
        let (status, Json(err)) =
            predict(State(uninitialized_state()), Ok(body)).await.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.error,
            "Modelo o codificadores no inicializados. Contacte al administrador."
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&PredictError::InvalidCity), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&PredictError::NoJson), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&PredictError::NotInitialized), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status_for(&PredictError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_request_id_format() {
        let id = request_id();
        assert!(id.starts_with("req-"));
        assert_eq!(id.len(), 20);
    }
}
