use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{StatusReporter, TicketLookup};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub status_reporter: Arc<dyn StatusReporter>,
    pub ticket_lookup: Arc<dyn TicketLookup>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        status_reporter: Arc<dyn StatusReporter>,
        ticket_lookup: Arc<dyn TicketLookup>,
    ) -> Self {
        Self {
            config,
            status_reporter,
            ticket_lookup,
        }
    }
}
