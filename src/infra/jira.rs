use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION},
};

use crate::domain::ticket::TicketKey;
use crate::error::{AppError, AppResult};
use crate::services::{TicketLookup, TicketPresence};

pub struct JiraLookupClient {
    http: Client,
    base_url: Option<String>,
    email: Option<String>,
    token: Option<String>,
}

impl JiraLookupClient {
    pub fn new(base_url: Option<String>, email: Option<String>, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            email,
            token,
        }
    }

    fn api_details(&self) -> AppResult<(&str, &str, &str)> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Jira domain not configured".to_string()))?;
        let email = self
            .email
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Jira email not configured".to_string()))?;
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| AppError::Configuration("Jira API token not configured".to_string()))?;
        Ok((base_url, email, token))
    }

    fn auth_header(email: &str, token: &str) -> String {
        let credentials = format!("{email}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn issue_endpoint(base_url: &str, key: &TicketKey) -> String {
        format!("{}/rest/api/3/issue/{}", base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl TicketLookup for JiraLookupClient {
    async fn lookup(&self, key: &TicketKey) -> AppResult<TicketPresence> {
        let (base_url, email, token) = self.api_details()?;

        tracing::debug!(key = %key, "looking up issue in Jira");
        let response = self
            .http
            .get(Self::issue_endpoint(base_url, key))
            .query(&[("fields", "key")])
            .header(AUTHORIZATION, Self::auth_header(email, token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(key = %key, "issue found in Jira");
            return Ok(TicketPresence::Exists);
        }
        // 404 is a definitive answer; every other failure is operational and
        // must not masquerade as a missing ticket.
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(key = %key, "issue not found in Jira");
            return Ok(TicketPresence::NotFound);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unable to read response>".to_string());
        Err(AppError::IssueTracker(format!(
            "Jira responded with {status}: {body}"
        )))
    }
}
