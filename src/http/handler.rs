use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::context::AppContext;
use crate::domain::validation::ValidationResult;
use crate::error::AppResult;
use crate::http::{payload, signature};
use crate::workflow::check;

pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/healthz", get(healthz_handler))
        .with_state(ctx)
}

async fn healthz_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Entry point for GitHub `pull_request` webhooks. The check result always
/// travels via the commit-status API; the HTTP reply only reports whether
/// the event itself was processed.
async fn webhook_handler(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let header = headers
        .get("X-Hub-Signature-256")
        .and_then(|value| value.to_str().ok());
    signature::verify_signature(ctx.config.github_webhook_secret.as_deref(), &body, header)?;

    let pr = payload::parse_event(&body)?;
    tracing::debug!(
        repository = %pr.repository,
        number = pr.number,
        branch = %pr.branch,
        "pull_request event received"
    );

    let outcome = check::run_check(&ctx, &pr).await?;

    let body = match &outcome.result {
        ValidationResult::Valid(key) => json!({
            "result": "valid",
            "key": key.to_string(),
            "status": outcome.reported.as_str(),
        }),
        ValidationResult::Invalid(reason) => json!({
            "result": "invalid",
            "reason": reason,
            "status": outcome.reported.as_str(),
        }),
    };
    Ok(Json(body))
}
