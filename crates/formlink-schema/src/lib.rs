//! # formlink-schema
//!
//! The form schema model: a [`Form`] is an ordered list of sections, each an
//! ordered list of typed fields with constraints. This is the shared language
//! between the builder (which mutates schemas), the renderer (which walks
//! them), the validator (which checks submissions against them), and the API
//! client (which moves them over the wire as JSON).

pub mod constraints;
pub mod field;
pub mod form;
pub mod submission;

pub use constraints::Constraints;
pub use field::{FieldType, FormField};
pub use form::{Form, FormSection, FormStyle};
pub use submission::{Submission, SubmissionMetadata};
