//! The error container produced by submission validation.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Per-field validation errors, keyed by field name.
///
/// Field names iterate in sorted order so error output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionErrors(BTreeMap<String, Vec<String>>);

impl SubmissionErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error message for a field. Exact duplicates are dropped.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let message = message.into();
        let entry = self.0.entry(field.into()).or_default();
        if !entry.contains(&message) {
            entry.push(message);
        }
    }

    /// Returns `true` if no errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of fields with at least one error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the errors recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Iterates over `(field, errors)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// Consumes the set, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for SubmissionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for SubmissionErrors {}
