pub mod status_reporter;
pub mod ticket_lookup;

pub use status_reporter::StatusReporter;
pub use ticket_lookup::{TicketLookup, TicketPresence};
