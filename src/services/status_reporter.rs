use async_trait::async_trait;

use crate::domain::pull_request::{CheckState, CommitRef};
use crate::error::AppResult;

/// Posts a pass/fail/error annotation onto a commit in the source-control
/// platform. Errors are operational (network, auth, API rejection).
#[async_trait]
pub trait StatusReporter: Send + Sync {
    async fn report(
        &self,
        commit: &CommitRef,
        state: CheckState,
        description: &str,
    ) -> AppResult<()>;
}
