//! TimePulse engine
//!
//! This crate turns logged work days into worked hours, overtime and
//! earnings under a user-defined pay policy. It also persists entries and
//! settings, produces period summaries and backups, and serves all of it
//! over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
