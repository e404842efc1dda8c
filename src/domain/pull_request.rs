/// Read-only view of the pull request a webhook event describes.
#[derive(Debug, Clone)]
pub struct PullRequestRef {
    /// Repository in `owner/name` form.
    pub repository: String,
    pub number: u64,
    pub branch: String,
    pub head_sha: String,
    pub title: Option<String>,
}

impl PullRequestRef {
    pub fn commit_ref(&self) -> CommitRef {
        CommitRef {
            repository: self.repository.clone(),
            sha: self.head_sha.clone(),
        }
    }
}

/// The commit a status check attaches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub repository: String,
    pub sha: String,
}

/// Commit-status states this service ever posts. `Error` is reserved for
/// operational problems and is never used for a failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Success,
    Failure,
    Error,
}

impl CheckState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckState::Success => "success",
            CheckState::Failure => "failure",
            CheckState::Error => "error",
        }
    }
}
