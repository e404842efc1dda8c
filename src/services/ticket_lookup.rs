use async_trait::async_trait;

use crate::domain::ticket::TicketKey;
use crate::error::AppResult;

/// Definitive lookup outcomes. Anything that is not a clear yes/no answer
/// (network failure, bad credentials, tracker 5xx) is an `Err`, so callers
/// can never mistake an outage for a missing ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketPresence {
    Exists,
    NotFound,
}

#[async_trait]
pub trait TicketLookup: Send + Sync {
    async fn lookup(&self, key: &TicketKey) -> AppResult<TicketPresence>;
}
