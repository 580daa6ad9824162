// src/config/mod.rs

//! Configuration loading and validation for modwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like nonzero intervals (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{AlertsSection, AuthSection, ConfigFile, LivePostsSection, ReportsSection};
pub use validate::validate_config;
