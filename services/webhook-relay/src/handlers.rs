use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::extract::{extract_message, Extraction};
use crate::models::{RelayResponse, VerifyQuery};
use crate::prediction::reply_text;
use crate::state::AppState;

const GREETING: &str = "Hello, this is webhook setup";

pub async fn root() -> &'static str {
    GREETING
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Subscription handshake: echo the challenge when mode and token match.
pub async fn verify(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = match pairs {
        Ok(Query(pairs)) => VerifyQuery::from_pairs(pairs),
        Err(err) => {
            tracing::warn!(error = %err, "unreadable webhook verification query");
            VerifyQuery::default()
        }
    };
    let mode = query.mode.as_deref().filter(|value| !value.is_empty());
    let token = query.verify_token.as_deref().filter(|value| !value.is_empty());

    let (Some(mode), Some(token)) = (mode, token) else {
        tracing::warn!("missing mode or token in webhook verification request");
        return StatusCode::BAD_REQUEST.into_response();
    };

    if mode == "subscribe" && token == state.config.verify_token {
        tracing::info!("webhook verified successfully");
        return query.challenge.unwrap_or_default().into_response();
    }

    tracing::warn!(mode, "webhook verification failed");
    StatusCode::FORBIDDEN.into_response()
}

/// Inbound notification. Every outcome is a 2xx so the provider never redelivers.
pub async fn receive(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(error = %err, "error processing webhook: body could not be read");
            return StatusCode::OK.into_response();
        }
    };
    tracing::info!(bytes = body.len(), "webhook call received");

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::error!(error = %err, "error processing webhook: body is not JSON");
            return StatusCode::OK.into_response();
        }
    };
    tracing::debug!(body = %payload, "notification payload");

    let message = match extract_message(&payload) {
        Extraction::Message(message) => message,
        Extraction::Absent { field } => {
            tracing::warn!(field, "no message text or sender found in webhook payload");
            return StatusCode::NO_CONTENT.into_response();
        }
        Extraction::Malformed { field, expected } => {
            tracing::warn!(field, expected, "webhook payload has an unexpected shape");
            return StatusCode::NO_CONTENT.into_response();
        }
    };
    tracing::info!(sender = %message.sender, "message received");

    let answer = match state.prediction.ask(&message.text).await {
        Ok(answer) => answer,
        Err(err) => {
            tracing::error!(error = %err, "error processing webhook");
            return StatusCode::OK.into_response();
        }
    };
    tracing::info!(answer = %answer, "prediction answer");

    let reply = reply_text(&answer);
    // "sent" reports the attempt; delivery failures surface in the logs only.
    if !state.messaging.send_text(&message.sender, &reply).await {
        tracing::warn!(sender = %message.sender, "messaging provider did not accept the reply");
    }

    (StatusCode::OK, Json(RelayResponse { status: "sent" })).into_response()
}
