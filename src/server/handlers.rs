//! Route handlers.
//!
//! Bodies are parsed leniently: anything that is not a JSON object is
//! treated as an empty object so the field checks below produce the 400.

use super::error::BridgeError;
use super::{BridgeContext, SERVICE_NAME, media};
use crate::messenger::OutboundMessage;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::{Value, json};

type HandlerResult = Result<Json<Value>, BridgeError>;

/// Non-empty string field, or `None`.
fn get_str<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    match body.get(key).and_then(|v| v.as_str()) {
        Some(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

fn parse_body(raw: &Bytes) -> Value {
    serde_json::from_slice::<Value>(raw)
        .ok()
        .filter(Value::is_object)
        .unwrap_or_else(|| json!({}))
}

async fn deliver(ctx: &BridgeContext, message: OutboundMessage, route: &str) -> HandlerResult {
    if let Err(e) = ctx.deliver(&message).await {
        tracing::error!("WhatsApp: {} error: {}", route, e);
        return Err(e.into());
    }
    Ok(Json(json!({ "ok": true })))
}

/// GET /
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "service": SERVICE_NAME }))
}

/// POST /send-text
pub async fn send_text(State(ctx): State<BridgeContext>, raw: Bytes) -> HandlerResult {
    let body = parse_body(&raw);
    let text = get_str(&body, "text")
        .ok_or_else(|| BridgeError::BadRequest("text required".to_string()))?;

    deliver(&ctx, OutboundMessage::Text(text.to_string()), "send-text").await
}

/// POST /send-file
pub async fn send_file(State(ctx): State<BridgeContext>, raw: Bytes) -> HandlerResult {
    let body = parse_body(&raw);
    let path = get_str(&body, "path")
        .ok_or_else(|| BridgeError::BadRequest("path required".to_string()))?;

    let resolved = std::path::absolute(path)
        .map_err(|e| BridgeError::BadRequest(format!("invalid path: {e}")))?;

    if !tokio::fs::try_exists(&resolved).await.unwrap_or(false) {
        tracing::debug!("send-file: {} does not exist", resolved.display());
        return Err(BridgeError::NotFound("file not found".to_string()));
    }

    let document = media::document_ref(resolved, get_str(&body, "filename"));
    tracing::debug!(
        "send-file: {} as {} ({})",
        document.path.display(),
        document.file_name,
        document.mime_type
    );

    deliver(&ctx, OutboundMessage::Document(document), "send-file").await
}
