//! # formlink-validate
//!
//! Client-side validation of a candidate [`Submission`](formlink_schema::Submission)
//! against a [`Form`](formlink_schema::Form) schema: a pure, synchronous,
//! single pass over the schema's fields that accumulates per-field errors
//! instead of short-circuiting.
//!
//! Also provides the pre-submit gate that mirrors how the public endpoint
//! decides whether a form still accepts responses.

mod errors;
mod gate;
mod validate;

pub use errors::SubmissionErrors;
pub use gate::{submission_gate, SubmitGate};
pub use validate::{validate_field, validate_submission};
