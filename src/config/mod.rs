// src/config/mod.rs

//! Persisted installer configuration.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Resolve the data directory, load/create and save `config.toml`
//!   (`loader.rs`).
//! - Validate basic invariants such as non-zero timeouts (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{config_path, load_from_path, load_or_create, resolve_data_dir, save};
pub use model::{InstallerConfig, Sources, Timeouts};
pub use validate::validate_config;
