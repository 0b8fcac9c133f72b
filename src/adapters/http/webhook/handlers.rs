//! HTTP handlers for the Telegram webhook.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::telegram::{Update, WebhookSecret, SECRET_TOKEN_HEADER};
use crate::application::TriageDispatcher;
use crate::domain::foundation::DomainError;
use crate::domain::triage::{DiagnosisIndex, TriageCatalog};
use crate::ports::ChatTransport;

use super::dto::{ErrorResponse, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct WebhookAppState {
    dispatcher: Arc<TriageDispatcher>,
    transport: Arc<dyn ChatTransport>,
    catalog: Arc<TriageCatalog>,
    secret: WebhookSecret,
}

impl WebhookAppState {
    pub fn new(
        dispatcher: Arc<TriageDispatcher>,
        transport: Arc<dyn ChatTransport>,
        catalog: Arc<TriageCatalog>,
        secret: WebhookSecret,
    ) -> Self {
        Self {
            dispatcher,
            transport,
            catalog,
            secret,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /telegram/webhook - Handle one Telegram update
///
/// Answers 200 to every well-formed update, including ones the bot ignores
/// and ones whose reply could not be delivered, so Telegram does not redeliver.
pub async fn handle_telegram_update(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let provided = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    if !state.secret.verify(provided) {
        tracing::warn!("Webhook delivery with invalid secret token rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized("Invalid secret token")),
        )
            .into_response();
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed Telegram update");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!("Invalid update: {}", e))),
            )
                .into_response();
        }
    };

    let update_id = update.update_id;
    let resolved = update.resolve();

    if let Some(callback_id) = &resolved.callback_id {
        if let Err(e) = state.transport.acknowledge(callback_id).await {
            tracing::warn!(update_id, error = %e, "Failed to acknowledge button press");
        }
    }

    let Some(event) = resolved.event else {
        tracing::debug!(update_id, "Update ignored");
        return StatusCode::OK.into_response();
    };

    match state.dispatcher.handle(event).await {
        Ok(Some(response)) => {
            if let Err(e) = state.transport.deliver(&response).await {
                tracing::error!(
                    update_id,
                    conversation_id = %response.conversation_id(),
                    error = %e,
                    "Failed to deliver response"
                );
            }
        }
        Ok(None) => {}
        Err(e) => {
            let err = DomainError::from(e);
            tracing::error!(update_id, code = %err.code, error = %err.message, "Triage failed");
        }
    }

    StatusCode::OK.into_response()
}

/// GET /health - Liveness with catalog sizes
pub async fn health(State(state): State<WebhookAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        symptoms: state.catalog.symptoms().len(),
        facilities: state.catalog.facilities().len(),
        diagnoses: state.catalog.diagnoses().map(DiagnosisIndex::len),
        normalization_rules: state.catalog.rules().len(),
    })
}
