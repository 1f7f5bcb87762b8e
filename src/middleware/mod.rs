//! Request-processing middleware.
//!
//! - [`auth`]: session-token extractor for API handlers
//! - [`role`]: admin gate performing an uncached role-claim lookup
//! - [`edge_gate`]: redirect-based access control for page routes

pub mod auth;
pub mod edge_gate;
pub mod role;
