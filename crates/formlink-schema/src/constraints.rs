//! Validation constraints attached to form fields.
//!
//! [`Constraints`] is a bag of optional limits; which members are meaningful
//! depends on the [`FieldType`](crate::field::FieldType) they are attached
//! to. The wire format keeps only the members that are set, matching the
//! free-form JSON constraint objects the backend stores.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::field::FieldType;

/// Type-specific validation constraints for a single field.
///
/// | field types                      | meaningful members                          |
/// |----------------------------------|---------------------------------------------|
/// | text, textarea, email            | `min_length`, `max_length`, `pattern`       |
/// | number, integer, scale           | `min`, `max`                                |
/// | date                             | `min_date`, `max_date`                      |
/// | datetime                         | `min_datetime`, `max_datetime`              |
/// | select, radio                    | `items`                                     |
/// | checkbox, multiselect            | `items`, `min_items`, `max_items`           |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Minimum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regex the whole value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Minimum numeric value (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum numeric value (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Earliest allowed date (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<NaiveDate>,
    /// Latest allowed date (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_date: Option<NaiveDate>,
    /// Earliest allowed date-time (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_datetime: Option<NaiveDateTime>,
    /// Latest allowed date-time (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_datetime: Option<NaiveDateTime>,
    /// The option list for choice-backed fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    /// Minimum number of selected options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    /// Maximum number of selected options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

impl Constraints {
    /// Returns `true` if no constraint member is set.
    pub const fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.min_date.is_none()
            && self.max_date.is_none()
            && self.min_datetime.is_none()
            && self.max_datetime.is_none()
            && self.items.is_none()
            && self.min_items.is_none()
            && self.max_items.is_none()
    }

    /// Length bounds for text-like fields.
    pub fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min_length: min,
            max_length: max,
            ..Self::default()
        }
    }

    /// Numeric bounds for number, integer, and scale fields.
    pub fn numeric(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    /// An option list for choice-backed fields.
    pub fn choices<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: Some(items.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Sets a regex pattern the value must match.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets selection-count bounds for checkbox and multiselect fields.
    #[must_use]
    pub const fn item_bounds(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_items = min;
        self.max_items = max;
        self
    }

    /// Sets date bounds for date fields.
    #[must_use]
    pub const fn date_bounds(mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        self.min_date = min;
        self.max_date = max;
        self
    }

    /// Sets date-time bounds for datetime fields.
    #[must_use]
    pub const fn datetime_bounds(
        mut self,
        min: Option<NaiveDateTime>,
        max: Option<NaiveDateTime>,
    ) -> Self {
        self.min_datetime = min;
        self.max_datetime = max;
        self
    }

    /// Returns the names of constraint members that are set but meaningless
    /// for the given field type.
    ///
    /// An empty result means the constraints agree with the type.
    pub fn violations_for(&self, field_type: FieldType) -> Vec<&'static str> {
        let mut set: Vec<(&'static str, bool)> = vec![
            ("min_length", self.min_length.is_some()),
            ("max_length", self.max_length.is_some()),
            ("pattern", self.pattern.is_some()),
            ("min", self.min.is_some()),
            ("max", self.max.is_some()),
            ("min_date", self.min_date.is_some()),
            ("max_date", self.max_date.is_some()),
            ("min_datetime", self.min_datetime.is_some()),
            ("max_datetime", self.max_datetime.is_some()),
            ("items", self.items.is_some()),
            ("min_items", self.min_items.is_some()),
            ("max_items", self.max_items.is_some()),
        ];

        let allowed: &[&str] = match field_type {
            FieldType::Text | FieldType::Textarea | FieldType::Email => {
                &["min_length", "max_length", "pattern"]
            }
            FieldType::Number | FieldType::Integer | FieldType::Scale => &["min", "max"],
            FieldType::Date => &["min_date", "max_date"],
            FieldType::DateTime => &["min_datetime", "max_datetime"],
            FieldType::Select | FieldType::Radio => &["items"],
            FieldType::Checkbox | FieldType::Multiselect => {
                &["items", "min_items", "max_items"]
            }
            FieldType::Boolean | FieldType::ImageUrl | FieldType::Uuid => &[],
        };

        set.retain(|(name, is_set)| *is_set && !allowed.contains(name));
        set.into_iter().map(|(name, _)| name).collect()
    }
}
