use std::fmt;

/// An issue-tracker ticket key such as `PROJ-123`.
///
/// The project prefix is normalised to uppercase on construction, so two keys
/// that differ only in prefix casing compare equal. The numeric part is kept
/// verbatim: `PROJ-007` and `PROJ-7` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketKey {
    prefix: String,
    number: String,
}

impl TicketKey {
    pub fn new(prefix: &str, number: &str) -> Self {
        Self {
            prefix: prefix.to_ascii_uppercase(),
            number: number.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.number)
    }
}
