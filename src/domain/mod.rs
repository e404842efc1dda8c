pub mod pull_request;
pub mod ticket;
pub mod validation;
