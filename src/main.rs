mod config;
mod context;
mod domain;
mod error;
mod http;
mod infra;
mod services;
mod workflow;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::http::handler::build_router;
use crate::infra::github::GithubStatusClient;
use crate::infra::jira::JiraLookupClient;

#[derive(Parser)]
#[command(
    name = "prcheck",
    author,
    version,
    about = "Webhook service that checks PR branch names for issue-tracker ticket keys"
)]
struct Cli {
    /// Override the bind address from the environment (BIND_ADDR).
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .init();

    if config.github_token.is_none() {
        warn!("GitHub token not configured; posting commit statuses will fail.");
    }
    if config.github_webhook_secret.is_none() {
        warn!("GitHub webhook secret not configured; payload signatures will not be checked.");
    }
    if config.verify_ticket_exists
        && (config.jira_email.is_none() || config.jira_token.is_none())
    {
        warn!("Jira credentials not configured; ticket existence lookups will fail.");
    }

    let status_reporter = Arc::new(GithubStatusClient::new(
        config.github_token.clone(),
        config.callback_url.clone(),
    ));
    let ticket_lookup = Arc::new(JiraLookupClient::new(
        config.jira_base_url.clone(),
        config.jira_email.clone(),
        config.jira_token.clone(),
    ));

    let bind_addr = config.bind_addr;
    let verify = config.verify_ticket_exists;
    let context = AppContext::new(config, status_reporter, ticket_lookup);
    let app = build_router(context);

    let listener = TcpListener::bind(bind_addr).await?;
    info!(%bind_addr, verify_ticket_exists = verify, "prcheck listening");
    axum::serve(listener, app).await?;

    Ok(())
}
