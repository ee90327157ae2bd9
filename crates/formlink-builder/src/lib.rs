//! # formlink-builder
//!
//! The in-memory schema editor behind the form builder UI: add, update,
//! remove, and reorder sections and fields while keeping order indexes
//! contiguous. Persistence happens elsewhere; the builder only mutates a
//! [`Form`](formlink_schema::Form) value.

mod builder;

pub use builder::{Direction, FieldPatch, FormBuilder, SectionPatch};
