//! Field definitions: the typed input slots of a form.
//!
//! Each [`FormField`] describes a single input within a section: its name,
//! its [`FieldType`], whether it is required, its position, and the
//! type-specific [`Constraints`] attached to it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constraints::Constraints;

/// The type of a form field.
///
/// The type decides which input control the renderer produces, which JSON
/// shape a submitted value must have, and which constraints are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A single-line text input.
    Text,
    /// A multi-line text area.
    Textarea,
    /// A floating-point number input.
    Number,
    /// A whole-number input.
    Integer,
    /// A rating scale (row of numbered buttons, default 1 to 10).
    Scale,
    /// A true/false checkbox.
    Boolean,
    /// A date input (YYYY-MM-DD).
    Date,
    /// A date-time input.
    #[serde(rename = "datetime")]
    DateTime,
    /// An email address input.
    Email,
    /// A URL pointing at an image.
    ImageUrl,
    /// A UUID input.
    Uuid,
    /// A single-choice dropdown.
    Select,
    /// A single-choice radio group.
    Radio,
    /// A multi-choice checkbox group.
    Checkbox,
    /// A multi-choice select.
    Multiselect,
}

impl FieldType {
    /// Returns the wire name of this field type (its JSON representation).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Scale => "scale",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Email => "email",
            Self::ImageUrl => "image_url",
            Self::Uuid => "uuid",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Multiselect => "multiselect",
        }
    }

    /// Returns `true` if submitted values for this type are JSON arrays.
    pub const fn is_multi_valued(self) -> bool {
        matches!(self, Self::Checkbox | Self::Multiselect)
    }

    /// Returns `true` if this type picks values from a fixed option list.
    pub const fn has_options(self) -> bool {
        matches!(
            self,
            Self::Select | Self::Radio | Self::Checkbox | Self::Multiselect
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete definition of a form field.
///
/// `field_order` positions the field within its section; the renderer and
/// validator both walk fields in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// The field name, unique across the form. Doubles as the submission key.
    pub field_name: String,
    /// The field type.
    pub field_type: FieldType,
    /// Whether a value must be supplied on submission.
    #[serde(default = "default_required")]
    pub required: bool,
    /// Position of the field within its section.
    #[serde(default)]
    pub field_order: i32,
    /// Type-specific validation constraints.
    #[serde(default, skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,
}

const fn default_required() -> bool {
    true
}

impl FormField {
    /// Creates a new required field with no constraints.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field_name: name.into(),
            field_type,
            required: true,
            field_order: 0,
            constraints: Constraints::default(),
        }
    }

    /// Sets whether the field is required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the field's position within its section.
    #[must_use]
    pub const fn order(mut self, order: i32) -> Self {
        self.field_order = order;
        self
    }

    /// Attaches constraints to the field.
    #[must_use]
    pub fn constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_wire_names() {
        assert_eq!(FieldType::Text.as_str(), "text");
        assert_eq!(FieldType::DateTime.as_str(), "datetime");
        assert_eq!(FieldType::ImageUrl.as_str(), "image_url");
        assert_eq!(FieldType::Multiselect.as_str(), "multiselect");
    }

    #[test]
    fn test_field_type_serde_round_trip() {
        for ft in [
            FieldType::Text,
            FieldType::Textarea,
            FieldType::Number,
            FieldType::Integer,
            FieldType::Scale,
            FieldType::Boolean,
            FieldType::Date,
            FieldType::DateTime,
            FieldType::Email,
            FieldType::ImageUrl,
            FieldType::Uuid,
            FieldType::Select,
            FieldType::Radio,
            FieldType::Checkbox,
            FieldType::Multiselect,
        ] {
            let json = serde_json::to_string(&ft).unwrap();
            assert_eq!(json, format!("\"{}\"", ft.as_str()));
            let back: FieldType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, ft);
        }
    }

    #[test]
    fn test_multi_valued_types() {
        assert!(FieldType::Checkbox.is_multi_valued());
        assert!(FieldType::Multiselect.is_multi_valued());
        assert!(!FieldType::Select.is_multi_valued());
        assert!(!FieldType::Text.is_multi_valued());
    }

    #[test]
    fn test_option_backed_types() {
        assert!(FieldType::Select.has_options());
        assert!(FieldType::Radio.has_options());
        assert!(FieldType::Checkbox.has_options());
        assert!(!FieldType::Scale.has_options());
    }

    #[test]
    fn test_field_builder_chain() {
        let field = FormField::new("age", FieldType::Number)
            .required(false)
            .order(3)
            .constraints(Constraints::numeric(Some(0.0), Some(150.0)));
        assert_eq!(field.field_name, "age");
        assert!(!field.required);
        assert_eq!(field.field_order, 3);
        assert_eq!(field.constraints.min, Some(0.0));
    }

    #[test]
    fn test_field_required_by_default() {
        let field = FormField::new("name", FieldType::Text);
        assert!(field.required);

        // A field deserialized without a `required` key is required too.
        let parsed: FormField =
            serde_json::from_str(r#"{"field_name": "name", "field_type": "text"}"#).unwrap();
        assert!(parsed.required);
    }

    #[test]
    fn test_empty_constraints_not_serialized() {
        let field = FormField::new("name", FieldType::Text);
        let json = serde_json::to_string(&field).unwrap();
        assert!(!json.contains("constraints"));
    }
}
