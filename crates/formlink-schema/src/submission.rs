//! Submissions: the candidate response object a respondent sends back.
//!
//! A [`Submission`] maps field names to submitted JSON values, optionally
//! carrying the collected email (under the `email` key, like any other
//! value) and client metadata. [`Submission::to_wire`] produces the flat
//! JSON object the submit endpoint expects, with metadata tucked under
//! `_metadata`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client metadata captured at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionMetadata {
    /// ISO timestamp of the submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// The respondent's user agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Screen size as "WIDTHxHEIGHT".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_size: Option<String>,
    /// The respondent's locale (e.g. "en-US").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// A candidate response to a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Submitted values keyed by field name.
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
    /// Client metadata attached on submit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SubmissionMetadata>,
}

impl Submission {
    /// Creates an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, replacing any existing one.
    #[must_use]
    pub fn set(mut self, field_name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field_name.into(), value.into());
        self
    }

    /// Sets the collected email. Stored under the `email` key like the
    /// original public page does.
    #[must_use]
    pub fn with_email(self, email: impl Into<String>) -> Self {
        self.set("email", Value::String(email.into()))
    }

    /// Attaches client metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: SubmissionMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the submitted value for a field, if any.
    pub fn value(&self, field_name: &str) -> Option<&Value> {
        self.values.get(field_name)
    }

    /// Returns the collected email, if one was entered.
    pub fn email(&self) -> Option<&str> {
        self.values.get("email").and_then(Value::as_str)
    }

    /// Produces the flat wire object for the submit endpoint:
    /// all values at the top level plus a `_metadata` object.
    pub fn to_wire(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.values {
            map.insert(key.clone(), value.clone());
        }
        if let Some(metadata) = &self.metadata {
            if let Ok(meta_value) = serde_json::to_value(metadata) {
                map.insert("_metadata".to_string(), meta_value);
            }
        }
        Value::Object(map)
    }
}
