pub mod handler;
pub mod payload;
pub mod signature;
