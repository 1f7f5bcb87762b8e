//! Environment-driven configuration.
//!
//! Each submodule owns one concern and exposes a `from_env()` constructor.
//! `DATABASE_URL` and `WEBHOOK_SECRET` are required; their absence is a
//! startup-time fatal condition.

pub mod cors;
pub mod database;
pub mod identity;
pub mod webhook;
