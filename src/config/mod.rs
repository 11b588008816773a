//! Pay policy configuration for the TimePulse engine.
//!
//! This module defines the [`PayPolicy`] value object and the
//! [`PolicyLoader`] that reads it from YAML or JSON, merging every field
//! against the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use timepulse_engine::config::PolicyLoader;
//!
//! let policy = PolicyLoader::load("./config/default_policy.yaml").unwrap();
//! println!("Hourly rate: {}", policy.hourly_rate);
//! ```

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{DateFormat, Language, PayPolicy, Theme, TimeFormat};
