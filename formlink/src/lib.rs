//! # formlink
//!
//! Client toolkit for the Formlink form builder.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. You can depend on `formlink` to get the whole toolkit, or depend
//! on individual crates for finer-grained control.

/// Errors, settings, and logging.
pub use formlink_core as core;

/// Schema types: forms, sections, fields, constraints, and submissions.
pub use formlink_schema as schema;

/// Mutation layer for composing and editing form schemas.
#[cfg(feature = "builder")]
pub use formlink_builder as builder;

/// Client-side submission validation and the pre-submit gate.
#[cfg(feature = "validate")]
pub use formlink_validate as validate;

/// HTML rendering of form schemas.
#[cfg(feature = "render")]
pub use formlink_render as render;

/// Async HTTP client for the backend API.
#[cfg(feature = "client")]
pub use formlink_client as client;
