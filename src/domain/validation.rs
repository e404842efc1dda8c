use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::ticket::TicketKey;

/// Ticket key convention: project prefix starting with a letter, a dash, then
/// digits. Unanchored so keys embedded mid-string match, case-insensitive on
/// the prefix. The leftmost match wins when several candidates are present.
static TICKET_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([A-Z][A-Z0-9]*)-([0-9]+)").expect("ticket key pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(TicketKey),
    Invalid(String),
}

/// Find the first ticket key embedded anywhere in `text`.
pub fn extract_ticket_key(text: &str) -> Option<TicketKey> {
    TICKET_KEY_PATTERN
        .captures(text)
        .map(|caps| TicketKey::new(&caps[1], &caps[2]))
}

/// Validate a branch name, falling back to the pull-request title when the
/// branch itself carries no key. Pure function, no I/O.
pub fn validate(branch: &str, title: Option<&str>) -> ValidationResult {
    if branch.trim().is_empty() {
        return ValidationResult::Invalid("branch name is empty".to_string());
    }

    if let Some(key) = extract_ticket_key(branch) {
        return ValidationResult::Valid(key);
    }

    if let Some(key) = title.and_then(extract_ticket_key) {
        return ValidationResult::Valid(key);
    }

    ValidationResult::Invalid(format!("no ticket key found in branch name '{branch}'"))
}
