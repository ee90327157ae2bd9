//! # formlink-core
//!
//! Core types for the formlink client toolkit: error types, client settings,
//! and logging setup. This crate has no formlink dependencies and provides
//! the foundation for all other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Client settings and global configuration
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;

// Re-export the most commonly used types at the crate root.
pub use error::{FormlinkError, FormlinkResult, ValidationError};
pub use settings::{Settings, SETTINGS};
