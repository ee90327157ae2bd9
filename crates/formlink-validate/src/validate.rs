//! The validation routine.
//!
//! [`validate_submission`] walks every field of the schema in order, checks
//! the submitted value against the field's type and constraints, and
//! accumulates errors per field. [`validate_field`] is the single-field
//! entry point used by the builder preview.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use formlink_schema::{Constraints, FieldType, Form, FormField, Submission};

use crate::errors::SubmissionErrors;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid regex"));

const MSG_REQUIRED: &str = "This field is required";
const MSG_EMAIL: &str = "Please enter a valid email address";

/// Validates a submission against a form schema.
///
/// Checks, in order:
/// 1. the collected email when the form has `collect_email` enabled
/// 2. the required flag for every field
/// 3. type-specific constraints for every non-empty value
///
/// Errors accumulate across fields; a failing field never hides another
/// field's errors. Submission keys that match no schema field are ignored.
pub fn validate_submission(form: &Form, submission: &Submission) -> Result<(), SubmissionErrors> {
    let mut errors = SubmissionErrors::new();

    if form.collect_email {
        match submission.email() {
            Some(email) if EMAIL_RE.is_match(email) => {}
            _ => errors.add("email", MSG_EMAIL),
        }
    }

    for field in form.all_fields() {
        for message in validate_field(field, submission.value(&field.field_name)) {
            errors.add(field.field_name.clone(), message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a single value against one field definition.
///
/// Returns the list of error messages; an empty list means the value passed.
pub fn validate_field(field: &FormField, value: Option<&Value>) -> Vec<String> {
    if is_empty_value(value) {
        if field.required {
            return vec![MSG_REQUIRED.to_string()];
        }
        // Optional and empty: constraints do not apply.
        return Vec::new();
    }
    let Some(value) = value else {
        return Vec::new();
    };

    let constraints = &field.constraints;
    match field.field_type {
        FieldType::Text | FieldType::Textarea => check_text(value, constraints),
        FieldType::Email => check_email(value, constraints),
        FieldType::Number => check_number(value, constraints, false),
        FieldType::Integer => check_number(value, constraints, true),
        FieldType::Scale => check_scale(value, constraints),
        FieldType::Boolean => check_boolean(value),
        FieldType::Date => check_date(value, constraints),
        FieldType::DateTime => check_datetime(value, constraints),
        FieldType::ImageUrl => check_image_url(value),
        FieldType::Uuid => check_uuid(value),
        FieldType::Select | FieldType::Radio => check_choice(value, constraints),
        FieldType::Checkbox | FieldType::Multiselect => check_multi_choice(value, constraints),
    }
}

/// An empty value is a missing key, JSON null, an empty string, or an
/// empty array.
fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(_) => false,
    }
}

fn check_text(value: &Value, constraints: &Constraints) -> Vec<String> {
    let Some(s) = value.as_str() else {
        return vec!["Must be a string".to_string()];
    };
    let mut errors = Vec::new();
    let len = s.chars().count();
    if let Some(min) = constraints.min_length {
        if len < min {
            errors.push(format!("Minimum length is {min} characters"));
        }
    }
    if let Some(max) = constraints.max_length {
        if len > max {
            errors.push(format!("Maximum length is {max} characters"));
        }
    }
    if let Some(pattern) = &constraints.pattern {
        match Regex::new(pattern) {
            Ok(re) => {
                if !re.is_match(s) {
                    errors.push("Value doesn't match the required pattern".to_string());
                }
            }
            Err(_) => errors.push("Invalid pattern constraint".to_string()),
        }
    }
    errors
}

fn check_email(value: &Value, constraints: &Constraints) -> Vec<String> {
    let Some(s) = value.as_str() else {
        return vec!["Must be a string".to_string()];
    };
    let mut errors = check_text(value, constraints);
    if !EMAIL_RE.is_match(s) {
        errors.push(MSG_EMAIL.to_string());
    }
    errors
}

fn check_number(value: &Value, constraints: &Constraints, whole: bool) -> Vec<String> {
    let Some(n) = numeric_value(value) else {
        return vec!["Enter a valid number".to_string()];
    };
    let mut errors = Vec::new();
    if whole && n.fract() != 0.0 {
        errors.push("Enter a whole number".to_string());
    }
    push_numeric_bounds(&mut errors, n, constraints.min, constraints.max);
    errors
}

// Scale defaults to 1..=10 when the schema sets no explicit bounds.
fn check_scale(value: &Value, constraints: &Constraints) -> Vec<String> {
    let Some(n) = numeric_value(value) else {
        return vec!["Enter a valid number".to_string()];
    };
    let mut errors = Vec::new();
    if n.fract() != 0.0 {
        errors.push("Enter a whole number".to_string());
    }
    let min = constraints.min.unwrap_or(1.0);
    let max = constraints.max.unwrap_or(10.0);
    push_numeric_bounds(&mut errors, n, Some(min), Some(max));
    errors
}

fn push_numeric_bounds(errors: &mut Vec<String>, n: f64, min: Option<f64>, max: Option<f64>) {
    if let Some(min) = min {
        if n < min {
            errors.push(format!("Minimum value is {min}"));
        }
    }
    if let Some(max) = max {
        if n > max {
            errors.push(format!("Maximum value is {max}"));
        }
    }
}

/// Accepts JSON numbers and numeric strings, like the backend's coercion.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn check_boolean(value: &Value) -> Vec<String> {
    match value {
        Value::Bool(_) => Vec::new(),
        Value::String(s) if s == "true" || s == "false" => Vec::new(),
        _ => vec!["Enter true or false".to_string()],
    }
}

fn check_date(value: &Value, constraints: &Constraints) -> Vec<String> {
    let Some(date) = value
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    else {
        return vec!["Enter a valid date (YYYY-MM-DD)".to_string()];
    };
    let mut errors = Vec::new();
    if let Some(min) = constraints.min_date {
        if date < min {
            errors.push(format!("Date must be on or after {min}"));
        }
    }
    if let Some(max) = constraints.max_date {
        if date > max {
            errors.push(format!("Date must be on or before {max}"));
        }
    }
    errors
}

fn check_datetime(value: &Value, constraints: &Constraints) -> Vec<String> {
    let Some(dt) = value.as_str().and_then(parse_datetime) else {
        return vec!["Enter a valid date/time".to_string()];
    };
    let mut errors = Vec::new();
    if let Some(min) = constraints.min_datetime {
        if dt < min {
            errors.push(format!("Datetime must be on or after {min}"));
        }
    }
    if let Some(max) = constraints.max_datetime {
        if dt > max {
            errors.push(format!("Datetime must be on or before {max}"));
        }
    }
    errors
}

/// Parses the formats the datetime-local input and the backend both emit.
fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

fn check_image_url(value: &Value) -> Vec<String> {
    match value.as_str() {
        Some(s) if URL_RE.is_match(s) => Vec::new(),
        _ => vec!["Enter a valid URL".to_string()],
    }
}

fn check_uuid(value: &Value) -> Vec<String> {
    match value.as_str() {
        Some(s) if uuid::Uuid::parse_str(s).is_ok() => Vec::new(),
        _ => vec!["Enter a valid UUID".to_string()],
    }
}

fn check_choice(value: &Value, constraints: &Constraints) -> Vec<String> {
    let Some(s) = value.as_str() else {
        return vec!["Must be a string".to_string()];
    };
    match &constraints.items {
        Some(items) if !items.iter().any(|item| item == s) => {
            vec!["Must be one of the available options".to_string()]
        }
        _ => Vec::new(),
    }
}

fn check_multi_choice(value: &Value, constraints: &Constraints) -> Vec<String> {
    let Some(selected) = value.as_array() else {
        return vec!["Must be a list of selected options".to_string()];
    };
    let mut errors = Vec::new();

    if let Some(items) = &constraints.items {
        let invalid = selected
            .iter()
            .any(|v| !v.as_str().is_some_and(|s| items.iter().any(|item| item == s)));
        if invalid {
            errors.push("Must be one of the available options".to_string());
        }
    }
    if let Some(min) = constraints.min_items {
        if selected.len() < min {
            errors.push(format!("Please select at least {min} options"));
        }
    }
    if let Some(max) = constraints.max_items {
        if selected.len() > max {
            errors.push(format!("Please select at most {max} options"));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use formlink_schema::{FormSection, Submission};
    use serde_json::json;

    fn field(field_type: FieldType) -> FormField {
        FormField::new("f", field_type)
    }

    fn errs(field: &FormField, value: Value) -> Vec<String> {
        validate_field(field, Some(&value))
    }

    // ── required / empty handling ──────────────────────────────────────

    #[test]
    fn test_required_missing() {
        let f = field(FieldType::Text);
        assert_eq!(validate_field(&f, None), vec![MSG_REQUIRED]);
    }

    #[test]
    fn test_required_null_empty_string_empty_array() {
        let f = field(FieldType::Text);
        assert_eq!(errs(&f, Value::Null), vec![MSG_REQUIRED]);
        assert_eq!(errs(&f, json!("")), vec![MSG_REQUIRED]);
        let multi = field(FieldType::Checkbox);
        assert_eq!(errs(&multi, json!([])), vec![MSG_REQUIRED]);
    }

    #[test]
    fn test_optional_empty_skips_constraints() {
        let f = field(FieldType::Text)
            .required(false)
            .constraints(Constraints::length(Some(5), None));
        assert!(errs(&f, json!("")).is_empty());
        assert!(validate_field(&f, None).is_empty());
    }

    // ── text ───────────────────────────────────────────────────────────

    #[test]
    fn test_text_length_bounds() {
        let f = field(FieldType::Text).constraints(Constraints::length(Some(3), Some(5)));
        assert_eq!(errs(&f, json!("ab")), vec!["Minimum length is 3 characters"]);
        assert_eq!(errs(&f, json!("abcdef")), vec!["Maximum length is 5 characters"]);
        assert!(errs(&f, json!("abcd")).is_empty());
    }

    #[test]
    fn test_text_length_counts_chars_not_bytes() {
        let f = field(FieldType::Text).constraints(Constraints::length(None, Some(3)));
        assert!(errs(&f, json!("äöü")).is_empty());
    }

    #[test]
    fn test_text_pattern() {
        let f = field(FieldType::Text)
            .constraints(Constraints::default().pattern(r"^[A-Z]{3}\d{3}$"));
        assert!(errs(&f, json!("ABC123")).is_empty());
        assert_eq!(
            errs(&f, json!("abc")),
            vec!["Value doesn't match the required pattern"]
        );
    }

    #[test]
    fn test_text_invalid_pattern_constraint() {
        let f = field(FieldType::Text).constraints(Constraints::default().pattern("["));
        assert_eq!(errs(&f, json!("x")), vec!["Invalid pattern constraint"]);
    }

    #[test]
    fn test_text_rejects_non_string() {
        let f = field(FieldType::Textarea);
        assert_eq!(errs(&f, json!(42)), vec!["Must be a string"]);
    }

    // ── email ──────────────────────────────────────────────────────────

    #[test]
    fn test_email_field() {
        let f = field(FieldType::Email);
        assert!(errs(&f, json!("user@example.com")).is_empty());
        assert_eq!(errs(&f, json!("not-an-email")), vec![MSG_EMAIL]);
        assert_eq!(errs(&f, json!("a b@example.com")), vec![MSG_EMAIL]);
    }

    // ── numbers ────────────────────────────────────────────────────────

    #[test]
    fn test_number_bounds() {
        let f = field(FieldType::Number).constraints(Constraints::numeric(Some(0.0), Some(100.0)));
        assert!(errs(&f, json!(50)).is_empty());
        assert_eq!(errs(&f, json!(-1)), vec!["Minimum value is 0"]);
        assert_eq!(errs(&f, json!(101)), vec!["Maximum value is 100"]);
    }

    #[test]
    fn test_number_accepts_numeric_string() {
        let f = field(FieldType::Number);
        assert!(errs(&f, json!("19.5")).is_empty());
        assert_eq!(errs(&f, json!("abc")), vec!["Enter a valid number"]);
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let f = field(FieldType::Integer);
        assert!(errs(&f, json!(3)).is_empty());
        assert_eq!(errs(&f, json!(3.5)), vec!["Enter a whole number"]);
    }

    #[test]
    fn test_scale_default_bounds() {
        let f = field(FieldType::Scale);
        assert!(errs(&f, json!(1)).is_empty());
        assert!(errs(&f, json!(10)).is_empty());
        assert_eq!(errs(&f, json!(0)), vec!["Minimum value is 1"]);
        assert_eq!(errs(&f, json!(11)), vec!["Maximum value is 10"]);
    }

    #[test]
    fn test_scale_explicit_bounds() {
        let f = field(FieldType::Scale).constraints(Constraints::numeric(Some(1.0), Some(5.0)));
        assert!(errs(&f, json!(5)).is_empty());
        assert_eq!(errs(&f, json!(6)), vec!["Maximum value is 5"]);
    }

    // ── boolean ────────────────────────────────────────────────────────

    #[test]
    fn test_boolean() {
        let f = field(FieldType::Boolean);
        assert!(errs(&f, json!(true)).is_empty());
        assert!(errs(&f, json!("false")).is_empty());
        assert_eq!(errs(&f, json!("maybe")), vec!["Enter true or false"]);
    }

    // ── dates ──────────────────────────────────────────────────────────

    #[test]
    fn test_date_bounds() {
        let f = field(FieldType::Date).constraints(Constraints::default().date_bounds(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 12, 31),
        ));
        assert!(errs(&f, json!("2024-06-15")).is_empty());
        assert_eq!(
            errs(&f, json!("2023-12-31")),
            vec!["Date must be on or after 2024-01-01"]
        );
        assert_eq!(
            errs(&f, json!("2025-01-01")),
            vec!["Date must be on or before 2024-12-31"]
        );
    }

    #[test]
    fn test_date_bounds_inclusive() {
        let f = field(FieldType::Date).constraints(Constraints::default().date_bounds(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 12, 31),
        ));
        assert!(errs(&f, json!("2024-01-01")).is_empty());
        assert!(errs(&f, json!("2024-12-31")).is_empty());
    }

    #[test]
    fn test_date_parse_failure() {
        let f = field(FieldType::Date);
        assert_eq!(errs(&f, json!("not-a-date")), vec!["Enter a valid date (YYYY-MM-DD)"]);
    }

    #[test]
    fn test_datetime_formats() {
        let f = field(FieldType::DateTime);
        assert!(errs(&f, json!("2024-06-15T10:30:00")).is_empty());
        assert!(errs(&f, json!("2024-06-15T10:30")).is_empty());
        assert!(errs(&f, json!("2024-06-15 10:30:00")).is_empty());
        assert!(errs(&f, json!("2024-06-15T10:30:00Z")).is_empty());
        assert_eq!(errs(&f, json!("junk")), vec!["Enter a valid date/time"]);
    }

    #[test]
    fn test_datetime_bounds() {
        let min = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(9, 0, 0);
        let f = field(FieldType::DateTime)
            .constraints(Constraints::default().datetime_bounds(min, None));
        assert!(errs(&f, json!("2024-06-01T09:00")).is_empty());
        assert_eq!(
            errs(&f, json!("2024-06-01T08:59")),
            vec!["Datetime must be on or after 2024-06-01 09:00:00"]
        );
    }

    // ── image url / uuid ───────────────────────────────────────────────

    #[test]
    fn test_image_url() {
        let f = field(FieldType::ImageUrl);
        assert!(errs(&f, json!("https://cdn.example.com/logo.png")).is_empty());
        assert_eq!(errs(&f, json!("not a url")), vec!["Enter a valid URL"]);
    }

    #[test]
    fn test_uuid() {
        let f = field(FieldType::Uuid);
        assert!(errs(&f, json!("550e8400-e29b-41d4-a716-446655440000")).is_empty());
        assert_eq!(errs(&f, json!("nope")), vec!["Enter a valid UUID"]);
    }

    // ── choices ────────────────────────────────────────────────────────

    #[test]
    fn test_select_choice() {
        let f = field(FieldType::Select).constraints(Constraints::choices(["Red", "Blue"]));
        assert!(errs(&f, json!("Red")).is_empty());
        assert_eq!(
            errs(&f, json!("Green")),
            vec!["Must be one of the available options"]
        );
    }

    #[test]
    fn test_multiselect_membership_and_bounds() {
        let f = field(FieldType::Multiselect).constraints(
            Constraints::choices(["a", "b", "c"]).item_bounds(Some(2), Some(3)),
        );
        assert!(errs(&f, json!(["a", "b"])).is_empty());
        assert_eq!(
            errs(&f, json!(["a"])),
            vec!["Please select at least 2 options"]
        );
        assert_eq!(
            errs(&f, json!(["a", "b", "c", "a"])),
            vec!["Please select at most 3 options"]
        );
        assert_eq!(
            errs(&f, json!(["a", "z"])),
            vec!["Must be one of the available options"]
        );
    }

    #[test]
    fn test_checkbox_requires_array() {
        let f = field(FieldType::Checkbox).constraints(Constraints::choices(["x"]));
        assert_eq!(
            errs(&f, json!("x")),
            vec!["Must be a list of selected options"]
        );
    }

    // ── whole-submission pass ──────────────────────────────────────────

    fn survey() -> Form {
        let mut form = Form::new("Survey");
        form.collect_email = false;
        let mut section = FormSection::new("Main");
        section.fields.push(FormField::new("name", FieldType::Text).order(0));
        section.fields.push(
            FormField::new("age", FieldType::Number)
                .constraints(Constraints::numeric(Some(0.0), Some(150.0)))
                .order(1),
        );
        section.fields.push(
            FormField::new("topics", FieldType::Multiselect)
                .required(false)
                .constraints(Constraints::choices(["rust", "go"]).item_bounds(Some(1), None))
                .order(2),
        );
        form.sections.push(section);
        form
    }

    #[test]
    fn test_submission_valid() {
        let submission = Submission::new().set("name", "Alice").set("age", 30);
        assert!(validate_submission(&survey(), &submission).is_ok());
    }

    #[test]
    fn test_errors_accumulate_per_field() {
        let submission = Submission::new().set("age", 200);
        let errors = validate_submission(&survey(), &submission).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), &[MSG_REQUIRED.to_string()]);
        assert_eq!(errors.get("age").unwrap(), &["Maximum value is 150".to_string()]);
        assert!(errors.get("topics").is_none());
    }

    #[test]
    fn test_required_error_hits_only_missing_fields() {
        let submission = Submission::new().set("name", "Bob").set("age", 1);
        assert!(validate_submission(&survey(), &submission).is_ok());

        let errors = validate_submission(&survey(), &Submission::new()).unwrap_err();
        assert_eq!(errors.len(), 2); // name and age, not topics
    }

    #[test]
    fn test_unknown_submission_keys_ignored() {
        let submission = Submission::new()
            .set("name", "Alice")
            .set("age", 30)
            .set("stray", "value");
        assert!(validate_submission(&survey(), &submission).is_ok());
    }

    #[test]
    fn test_collect_email_enforced() {
        let mut form = survey();
        form.collect_email = true;
        let base = Submission::new().set("name", "A").set("age", 1);

        let errors = validate_submission(&form, &base).unwrap_err();
        assert_eq!(errors.get("email").unwrap(), &[MSG_EMAIL.to_string()]);

        let bad = base.clone().with_email("nope");
        let errors = validate_submission(&form, &bad).unwrap_err();
        assert_eq!(errors.get("email").unwrap(), &[MSG_EMAIL.to_string()]);

        let good = base.with_email("a@b.co");
        assert!(validate_submission(&form, &good).is_ok());
    }
}
