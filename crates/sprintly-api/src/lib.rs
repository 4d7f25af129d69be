//! sprintly-api: Sprint.ly REST client plus on-disk config and cache.
//!
//! Stores per-user state under `~/.sprintly/`:
//! - `config.yml`: credentials and default product
//! - `cache.json`: last successfully fetched product list
//! - `commit-msg`: the hook shim the CLI symlinks into git repositories

pub mod cache;
pub mod client;
pub mod config;
pub mod error;

pub use cache::Cache;
pub use client::{Client, Whoami};
pub use config::{CONFIG_VERSION, ConfigStore, ProductChoice, UserConfig};
pub use error::{ApiError, Result};
