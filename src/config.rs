use std::env;
use std::net::SocketAddr;

use crate::error::{AppError, AppResult};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub github_token: Option<String>,
    pub github_webhook_secret: Option<String>,
    pub callback_url: Option<String>,
    pub jira_base_url: Option<String>,
    pub jira_email: Option<String>,
    pub jira_token: Option<String>,
    pub verify_ticket_exists: bool,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let bind_raw = env_string("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|err| AppError::Configuration(format!("invalid BIND_ADDR '{bind_raw}': {err}")))?;

        // JIRA_DOMAIN carries the bare host; the tracker is always reached over https.
        let jira_base_url = env_string("JIRA_DOMAIN").map(|domain| {
            let domain = domain.trim_end_matches('/');
            format!("https://{domain}")
        });

        let verify_ticket_exists = env_bool("VERIFY_TICKET_EXISTS", jira_base_url.is_some());

        Ok(Self {
            bind_addr,
            github_token: env_string("GITHUB_TOKEN"),
            github_webhook_secret: env_string("GITHUB_WEBHOOK_SECRET"),
            callback_url: env_string("CALLBACK_URL"),
            jira_base_url,
            jira_email: env_string("JIRA_EMAIL"),
            jira_token: env_string("JIRA_TOKEN"),
            verify_ticket_exists,
            log_level: env_string("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.trim() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}
