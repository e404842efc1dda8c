use crate::context::AppContext;
use crate::domain::pull_request::{CheckState, PullRequestRef};
use crate::domain::validation::{self, ValidationResult};
use crate::error::AppResult;
use crate::services::TicketPresence;

#[derive(Debug)]
pub struct CheckOutcome {
    pub result: ValidationResult,
    pub reported: CheckState,
}

/// Run the branch check for one pull-request event: validate the branch name
/// (title as fallback), optionally confirm the ticket exists, then post the
/// matching commit status.
pub async fn run_check(ctx: &AppContext, pr: &PullRequestRef) -> AppResult<CheckOutcome> {
    let commit = pr.commit_ref();
    let result = validation::validate(&pr.branch, pr.title.as_deref());

    let result = match result {
        ValidationResult::Valid(key) if ctx.config.verify_ticket_exists => {
            tracing::debug!(branch = %pr.branch, key = %key, "ticket key found");
            match ctx.ticket_lookup.lookup(&key).await {
                Ok(TicketPresence::Exists) => ValidationResult::Valid(key),
                Ok(TicketPresence::NotFound) => ValidationResult::Invalid(format!(
                    "branch '{}' references {key}, which was not found in the tracker",
                    pr.branch
                )),
                Err(err) => {
                    // An unreachable tracker says nothing about the branch.
                    // Mark the check "error" so the author sees an unknown
                    // state, then surface the operational failure.
                    if let Err(report_err) = ctx
                        .status_reporter
                        .report(
                            &commit,
                            CheckState::Error,
                            "could not reach the issue tracker to verify the ticket",
                        )
                        .await
                    {
                        tracing::error!(error = %report_err, "failed to post error status");
                    }
                    return Err(err);
                }
            }
        }
        other => other,
    };

    let (state, description) = match &result {
        ValidationResult::Valid(key) => (
            CheckState::Success,
            format!("branch '{}' references ticket {key}", pr.branch),
        ),
        ValidationResult::Invalid(reason) => (CheckState::Failure, reason.clone()),
    };

    ctx.status_reporter.report(&commit, state, &description).await?;
    tracing::info!(
        repository = %pr.repository,
        number = pr.number,
        state = state.as_str(),
        "branch check completed"
    );

    Ok(CheckOutcome { result, reported: state })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::config::AppConfig;
    use crate::domain::pull_request::CommitRef;
    use crate::domain::ticket::TicketKey;
    use crate::error::AppError;
    use crate::services::{StatusReporter, TicketLookup};

    #[derive(Default)]
    struct RecordingReporter {
        posted: Mutex<Vec<(CommitRef, CheckState, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl StatusReporter for RecordingReporter {
        async fn report(
            &self,
            commit: &CommitRef,
            state: CheckState,
            description: &str,
        ) -> AppResult<()> {
            if self.fail {
                return Err(AppError::StatusReport("GitHub unreachable".to_string()));
            }
            self.posted
                .lock()
                .unwrap()
                .push((commit.clone(), state, description.to_string()));
            Ok(())
        }
    }

    enum LookupBehaviour {
        Exists,
        NotFound,
        NetworkError,
    }

    struct FakeLookup {
        behaviour: LookupBehaviour,
        calls: Mutex<Vec<TicketKey>>,
    }

    impl FakeLookup {
        fn new(behaviour: LookupBehaviour) -> Self {
            Self {
                behaviour,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TicketLookup for FakeLookup {
        async fn lookup(&self, key: &TicketKey) -> AppResult<TicketPresence> {
            self.calls.lock().unwrap().push(key.clone());
            match self.behaviour {
                LookupBehaviour::Exists => Ok(TicketPresence::Exists),
                LookupBehaviour::NotFound => Ok(TicketPresence::NotFound),
                LookupBehaviour::NetworkError => {
                    Err(AppError::IssueTracker("connection refused".to_string()))
                }
            }
        }
    }

    fn test_config(verify: bool) -> AppConfig {
        AppConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            github_token: Some("token".to_string()),
            github_webhook_secret: None,
            callback_url: None,
            jira_base_url: Some("https://acme.atlassian.net".to_string()),
            jira_email: Some("bot@acme.example".to_string()),
            jira_token: Some("token".to_string()),
            verify_ticket_exists: verify,
            log_level: "info".to_string(),
        }
    }

    fn context(
        verify: bool,
        reporter: Arc<RecordingReporter>,
        lookup: Arc<FakeLookup>,
    ) -> AppContext {
        AppContext::new(test_config(verify), reporter, lookup)
    }

    fn pr(branch: &str, title: Option<&str>) -> PullRequestRef {
        PullRequestRef {
            repository: "acme/widgets".to_string(),
            number: 17,
            branch: branch.to_string(),
            head_sha: "abc123".to_string(),
            title: title.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn valid_branch_with_lookup_off_posts_success() {
        let reporter = Arc::new(RecordingReporter::default());
        let lookup = Arc::new(FakeLookup::new(LookupBehaviour::NetworkError));
        let ctx = context(false, reporter.clone(), lookup.clone());

        let outcome = run_check(&ctx, &pr("feature/PROJ-42-fix-login", None))
            .await
            .unwrap();

        assert_eq!(
            outcome.result,
            ValidationResult::Valid(TicketKey::new("PROJ", "42"))
        );
        assert_eq!(outcome.reported, CheckState::Success);
        assert!(lookup.calls.lock().unwrap().is_empty());

        let posted = reporter.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].1, CheckState::Success);
        assert!(posted[0].2.contains("PROJ-42"));
    }

    #[tokio::test]
    async fn title_fallback_finds_the_key() {
        let reporter = Arc::new(RecordingReporter::default());
        let lookup = Arc::new(FakeLookup::new(LookupBehaviour::Exists));
        let ctx = context(true, reporter.clone(), lookup.clone());

        let outcome = run_check(&ctx, &pr("hotfix/urgent-patch", Some("Fixes PROJ-99 crash")))
            .await
            .unwrap();

        assert_eq!(
            outcome.result,
            ValidationResult::Valid(TicketKey::new("PROJ", "99"))
        );
        assert_eq!(
            lookup.calls.lock().unwrap().as_slice(),
            &[TicketKey::new("PROJ", "99")]
        );
    }

    #[tokio::test]
    async fn branch_without_key_posts_failure_and_skips_lookup() {
        let reporter = Arc::new(RecordingReporter::default());
        let lookup = Arc::new(FakeLookup::new(LookupBehaviour::Exists));
        let ctx = context(true, reporter.clone(), lookup.clone());

        let outcome = run_check(&ctx, &pr("random-branch-name", None)).await.unwrap();

        assert!(matches!(outcome.result, ValidationResult::Invalid(_)));
        assert_eq!(outcome.reported, CheckState::Failure);
        assert!(lookup.calls.lock().unwrap().is_empty());
        assert_eq!(reporter.posted.lock().unwrap()[0].1, CheckState::Failure);
    }

    #[tokio::test]
    async fn missing_ticket_becomes_a_failing_check() {
        let reporter = Arc::new(RecordingReporter::default());
        let lookup = Arc::new(FakeLookup::new(LookupBehaviour::NotFound));
        let ctx = context(true, reporter.clone(), lookup);

        let outcome = run_check(&ctx, &pr("feature/PROJ-42-fix-login", None))
            .await
            .unwrap();

        match &outcome.result {
            ValidationResult::Invalid(reason) => assert!(reason.contains("not found")),
            other => panic!("expected invalid result, got {other:?}"),
        }
        assert_eq!(reporter.posted.lock().unwrap()[0].1, CheckState::Failure);
    }

    #[tokio::test]
    async fn lookup_outage_posts_error_state_and_propagates() {
        let reporter = Arc::new(RecordingReporter::default());
        let lookup = Arc::new(FakeLookup::new(LookupBehaviour::NetworkError));
        let ctx = context(true, reporter.clone(), lookup);

        let err = run_check(&ctx, &pr("feature/PROJ-42-fix-login", None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::IssueTracker(_)));
        let posted = reporter.posted.lock().unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].1, CheckState::Error);
    }

    #[tokio::test]
    async fn status_post_failure_propagates() {
        let reporter = Arc::new(RecordingReporter {
            posted: Mutex::new(Vec::new()),
            fail: true,
        });
        let lookup = Arc::new(FakeLookup::new(LookupBehaviour::Exists));
        let ctx = context(false, reporter, lookup);

        let err = run_check(&ctx, &pr("feature/PROJ-42-fix-login", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StatusReport(_)));
    }
}
