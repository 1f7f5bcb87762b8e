//! Shared utilities: error type, session-token handling, pagination math.

pub mod errors;
pub mod jwt;
pub mod pagination;
