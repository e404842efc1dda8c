use serde::Deserialize;

use crate::domain::pull_request::PullRequestRef;
use crate::error::{AppError, AppResult};

/// Stripped-down view of a GitHub `pull_request` webhook event. Only the
/// fields the check needs are modelled; the rest of the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct PullRequestEvent {
    pub number: u64,
    pub pull_request: PullRequestPayload,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestPayload {
    pub title: Option<String>,
    pub head: HeadRef,
}

#[derive(Debug, Deserialize)]
pub struct HeadRef {
    #[serde(rename = "ref")]
    pub branch: String,
    pub sha: String,
    pub repo: RepoRef,
}

#[derive(Debug, Deserialize)]
pub struct RepoRef {
    pub full_name: String,
}

/// Parse the raw webhook body into the pull request it describes.
///
/// Payloads without a `pull_request` object (push events, ping events, a
/// webhook configured for the wrong content type) are malformed input here,
/// rejected before any outbound call is made.
pub fn parse_event(body: &[u8]) -> AppResult<PullRequestRef> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|err| AppError::MalformedPayload(format!("body is not JSON: {err}")))?;

    if value.get("pull_request").is_none() {
        let kind = if value.get("pusher").is_some() {
            "a push event"
        } else {
            "not a pull_request event"
        };
        return Err(AppError::MalformedPayload(format!(
            "{kind}; this endpoint only handles pull_request webhooks"
        )));
    }

    let event: PullRequestEvent = serde_json::from_value(value)
        .map_err(|err| AppError::MalformedPayload(format!("missing required field: {err}")))?;

    Ok(PullRequestRef {
        repository: event.pull_request.head.repo.full_name,
        number: event.number,
        branch: event.pull_request.head.branch,
        head_sha: event.pull_request.head.sha,
        title: event.pull_request.title,
    })
}
