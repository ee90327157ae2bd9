//! The form aggregate: styling, activity window, response policy, and the
//! ordered section/field tree.
//!
//! A form carries two identifiers: the internal `id` used by authenticated
//! endpoints, and the short `public_id` embedded in shareable links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use formlink_core::ValidationError;

use crate::field::FormField;

/// Visual styling applied to the public form page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormStyle {
    /// Primary accent color (hex string or "default").
    pub primary_color: String,
    /// Secondary accent color (hex string or "default").
    pub secondary_color: String,
}

impl Default for FormStyle {
    fn default() -> Self {
        Self {
            primary_color: "default".to_string(),
            secondary_color: "default".to_string(),
        }
    }
}

/// A titled group of fields rendered as one card on the public page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSection {
    /// Section heading.
    pub title: String,
    /// Optional text shown under the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Position of the section within the form.
    #[serde(default)]
    pub order: i32,
    /// The fields belonging to this section.
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormSection {
    /// Creates an empty section with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            order: 0,
            fields: Vec::new(),
        }
    }

    /// Returns the section's fields sorted by `field_order`.
    pub fn ordered_fields(&self) -> Vec<&FormField> {
        let mut fields: Vec<&FormField> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.field_order);
        fields
    }
}

/// A complete form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    /// Internal identifier, assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Short identifier used in shareable links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    /// Form title shown at the top of the public page.
    pub title: String,
    /// Longer description shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// URL of the logo image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// URL of the cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// URL shown in the "Powered by" footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    /// Maximum number of responses accepted, if capped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_response: Option<u64>,
    /// Whether the form currently accepts responses.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Whether the form is an unpublished draft.
    #[serde(default)]
    pub draft: bool,
    /// Whether the form is offered as a reusable template.
    #[serde(default)]
    pub as_template: bool,
    /// Instant after which the form stops accepting responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_until: Option<DateTime<Utc>>,
    /// Whether the public page asks for the respondent's email.
    #[serde(default = "default_true")]
    pub collect_email: bool,
    /// Whether one respondent may submit more than once.
    #[serde(default = "default_true")]
    pub multi_response: bool,
    /// Visual styling.
    #[serde(flatten)]
    pub style: FormStyle,
    /// The ordered sections of the form.
    #[serde(default)]
    pub sections: Vec<FormSection>,
    /// Creation timestamp, assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-update timestamp, assigned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_true() -> bool {
    true
}

impl Form {
    /// Creates a new active, non-draft form with no sections.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            public_id: None,
            title: title.into(),
            detail: None,
            logo: None,
            cover_image: None,
            company_website: None,
            max_response: None,
            is_active: true,
            draft: false,
            as_template: false,
            active_until: None,
            collect_email: true,
            multi_response: true,
            style: FormStyle::default(),
            sections: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Generates a fresh 6-character public id.
    ///
    /// The id is the hex prefix of a hash over a random UUID and the current
    /// timestamp, so collisions across forms are vanishingly unlikely.
    pub fn generate_public_id() -> String {
        let unique = format!("{}-{}", Uuid::new_v4(), Utc::now().timestamp_nanos_opt().unwrap_or_default());
        let digest = Sha256::digest(unique.as_bytes());
        digest
            .iter()
            .take(3)
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    /// Assigns a public id if the form does not have one yet, returning it.
    pub fn ensure_public_id(&mut self) -> &str {
        if self.public_id.is_none() {
            self.public_id = Some(Self::generate_public_id());
        }
        self.public_id.as_deref().unwrap_or_default()
    }

    /// Returns `true` if the form accepts responses at the given instant.
    ///
    /// Drafts and deactivated forms are closed; a form past its
    /// `active_until` window is closed.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        if self.draft || !self.is_active {
            return false;
        }
        match self.active_until {
            Some(until) => until >= now,
            None => true,
        }
    }

    /// Returns the form's sections sorted by `order`.
    pub fn ordered_sections(&self) -> Vec<&FormSection> {
        let mut sections: Vec<&FormSection> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// Iterates over all fields in (section order, field order) order.
    pub fn all_fields(&self) -> Vec<&FormField> {
        self.ordered_sections()
            .into_iter()
            .flat_map(FormSection::ordered_fields)
            .collect()
    }

    /// Looks up a field by name anywhere in the form.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.field_name == name)
    }

    /// Checks the schema's structural invariants.
    ///
    /// - the title is non-empty
    /// - field names are 1 to 100 characters
    /// - field order values are unique within each section
    /// - field names are unique across the form
    /// - every set constraint is meaningful for its field type
    /// - choice-backed fields carry a non-empty option list
    ///
    /// All violations are reported at once.
    pub fn check(&self) -> Result<(), Vec<ValidationError>> {
        let mut issues = Vec::new();

        if self.title.trim().is_empty() {
            issues.push(ValidationError::new("Form title must not be empty", "empty_title"));
        }

        let mut seen_names: Vec<&str> = Vec::new();
        for section in &self.sections {
            let mut seen_orders: Vec<i32> = Vec::new();
            for field in &section.fields {
                if seen_orders.contains(&field.field_order) {
                    issues.push(ValidationError::new(
                        format!(
                            "Duplicate field order {} in section '{}'",
                            field.field_order, section.title
                        ),
                        "duplicate_order",
                    ));
                } else {
                    seen_orders.push(field.field_order);
                }

                if field.field_name.is_empty() || field.field_name.chars().count() > 100 {
                    issues.push(ValidationError::new(
                        format!(
                            "Field name '{}' must be between 1 and 100 characters",
                            field.field_name
                        ),
                        "invalid_name",
                    ));
                }

                if seen_names.contains(&field.field_name.as_str()) {
                    issues.push(ValidationError::new(
                        format!("Duplicate field name '{}'", field.field_name),
                        "duplicate_name",
                    ));
                } else {
                    seen_names.push(&field.field_name);
                }

                for violation in field.constraints.violations_for(field.field_type) {
                    issues.push(ValidationError::new(
                        format!(
                            "Constraint '{violation}' does not apply to {} field '{}'",
                            field.field_type, field.field_name
                        ),
                        "constraint_mismatch",
                    ));
                }

                if field.field_type.has_options()
                    && field.constraints.items.as_ref().map_or(true, Vec::is_empty)
                {
                    issues.push(ValidationError::new(
                        format!(
                            "{} field '{}' needs a non-empty option list",
                            field.field_type, field.field_name
                        ),
                        "missing_items",
                    ));
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}
