//! Request and response bodies for the backend API.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use formlink_schema::Form;

/// Decodes the backend's `success` member.
///
/// The backend reports success as either a bool or a human-readable message
/// string ("Form submitted successfully"); a non-empty string counts as
/// success.
fn success_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::String(s) => Ok(!s.is_empty()),
        other => Err(D::Error::custom(format!(
            "expected a bool or string for 'success', got {other}"
        ))),
    }
}

/// Body for `POST /v1/auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Display name of the new account.
    pub username: String,
    /// Login email, unique per account.
    pub email: String,
    /// Plain-text password; hashed server-side.
    pub password: String,
}

/// Body for `POST /v1/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Token issued by register and login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for authenticated endpoints.
    pub token: String,
}

/// Plain acknowledgement for mutations that return only a success marker
/// (form update, form delete).
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    /// Whether the operation succeeded.
    #[serde(deserialize_with = "success_flag")]
    pub success: bool,
}

/// Acknowledgement returned by `POST /v1/forms/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedForm {
    /// Whether the form was stored.
    #[serde(deserialize_with = "success_flag")]
    pub success: bool,
    /// The id assigned to the new form.
    pub form_id: Uuid,
}

/// A form as returned by the list endpoint, with its response count.
#[derive(Debug, Clone, Deserialize)]
pub struct FormWithCount {
    /// The form definition.
    #[serde(flatten)]
    pub form: Form,
    /// Number of responses collected so far.
    #[serde(default)]
    pub responses_count: u64,
}

/// Acknowledgement returned by the public submit endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAck {
    /// Whether the response was stored.
    #[serde(deserialize_with = "success_flag")]
    pub success: bool,
    /// Id of the stored response, when the backend reports one.
    #[serde(default)]
    pub response_id: Option<Uuid>,
}

/// A stored response, as returned by the response endpoints.
///
/// `response` holds the raw field-name to value map the respondent
/// submitted, including the `_metadata` envelope. The `device_*` members
/// are derived server-side from the submitting user agent.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseRecord {
    /// Response id.
    pub id: Uuid,
    /// When the response was stored.
    pub created_at: DateTime<Utc>,
    /// When the response was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// The submitted values, keyed by field name.
    pub response: BTreeMap<String, Value>,
    /// Device family parsed from the user agent.
    #[serde(default)]
    pub device_family: Option<String>,
    /// Device brand parsed from the user agent.
    #[serde(default)]
    pub device_brand: Option<String>,
    /// Operating system parsed from the user agent.
    #[serde(default)]
    pub device_os: Option<String>,
    /// Browser parsed from the user agent.
    #[serde(default)]
    pub device_browser: Option<String>,
}

impl ResponseRecord {
    /// Returns the submitted value for a field, if present.
    pub fn value(&self, field_name: &str) -> Option<&Value> {
        self.response.get(field_name)
    }
}

/// Aggregate statistics for a form's responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseSummary {
    /// Total number of stored responses.
    pub total_responses: u64,
    /// Responses per device family.
    #[serde(default)]
    pub device_distribution: HashMap<String, u64>,
    /// Responses per browser.
    #[serde(default)]
    pub browser_distribution: HashMap<String, u64>,
    /// Share of responses answering every field, in percent.
    #[serde(default)]
    pub completion_rate: f64,
}
