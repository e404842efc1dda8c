use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::Serialize;

use crate::domain::pull_request::{CheckState, CommitRef};
use crate::error::{AppError, AppResult};
use crate::services::StatusReporter;

/// Name under which the check appears on the pull request.
pub const STATUS_CONTEXT: &str = "branch-name/jira";

const API_BASE_URL: &str = "https://api.github.com";

pub struct GithubStatusClient {
    http: Client,
    api_base_url: String,
    token: Option<String>,
    callback_url: Option<String>,
}

impl GithubStatusClient {
    pub fn new(token: Option<String>, callback_url: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_base_url: API_BASE_URL.to_string(),
            token,
            callback_url,
        }
    }

    fn token(&self) -> AppResult<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GitHub token not configured".to_string()))
    }

    fn status_endpoint(&self, commit: &CommitRef) -> String {
        format!(
            "{}/repos/{}/statuses/{}",
            self.api_base_url.trim_end_matches('/'),
            commit.repository,
            commit.sha
        )
    }
}

#[async_trait]
impl StatusReporter for GithubStatusClient {
    async fn report(
        &self,
        commit: &CommitRef,
        state: CheckState,
        description: &str,
    ) -> AppResult<()> {
        let token = self.token()?;
        let request_body = CreateStatusRequest {
            state: state.as_str(),
            description,
            context: STATUS_CONTEXT,
            target_url: self.callback_url.as_deref(),
        };

        let response = self
            .http
            .post(self.status_endpoint(commit))
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("prcheck/", env!("CARGO_PKG_VERSION")))
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::StatusReport(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::StatusReport(format!(
                "GitHub responded with {status}: {body}"
            )));
        }

        tracing::debug!(
            repository = %commit.repository,
            sha = %commit.sha,
            state = state.as_str(),
            "commit status posted"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct CreateStatusRequest<'a> {
    state: &'a str,
    description: &'a str,
    context: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_url: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_endpoint_targets_the_head_commit() {
        let client = GithubStatusClient::new(Some("token".to_string()), None);
        let commit = CommitRef {
            repository: "acme/widgets".to_string(),
            sha: "abc123".to_string(),
        };
        assert_eq!(
            client.status_endpoint(&commit),
            "https://api.github.com/repos/acme/widgets/statuses/abc123"
        );
    }

    #[test]
    fn missing_token_is_a_configuration_error() {
        let client = GithubStatusClient::new(None, None);
        assert!(matches!(client.token(), Err(AppError::Configuration(_))));
    }

    #[test]
    fn target_url_is_omitted_when_unset() {
        let body = CreateStatusRequest {
            state: "success",
            description: "ok",
            context: STATUS_CONTEXT,
            target_url: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("target_url").is_none());
        assert_eq!(json["context"], "branch-name/jira");
    }
}
