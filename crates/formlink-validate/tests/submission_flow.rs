//! End-to-end flow: build a schema with the builder, ship it through JSON
//! (builder -> wire -> renderer side), and validate submissions against the
//! deserialized copy.

use formlink_builder::FormBuilder;
use formlink_schema::{Constraints, FieldType, Form, FormField, Submission};
use formlink_validate::{submission_gate, validate_submission, SubmitGate};

use chrono::{TimeZone, Utc};
use serde_json::json;

fn registration_form() -> Form {
    let mut builder = FormBuilder::new("Conference Registration");
    let about = builder.add_section("About you");
    builder
        .add_field(
            about,
            FormField::new("full_name", FieldType::Text)
                .constraints(Constraints::length(Some(2), Some(100))),
        )
        .unwrap();
    builder
        .add_field(about, FormField::new("contact_email", FieldType::Email))
        .unwrap();

    let prefs = builder.add_section("Preferences");
    builder
        .add_field(
            prefs,
            FormField::new("tracks", FieldType::Multiselect).constraints(
                Constraints::choices(["Systems", "Web", "Embedded"]).item_bounds(Some(1), Some(2)),
            ),
        )
        .unwrap();
    builder
        .add_field(
            prefs,
            FormField::new("rating", FieldType::Scale)
                .required(false)
                .constraints(Constraints::numeric(Some(1.0), Some(5.0))),
        )
        .unwrap();

    builder.finish().unwrap()
}

#[test]
fn schema_survives_the_wire_with_ordering_intact() {
    let form = registration_form();
    let json = serde_json::to_string(&form).unwrap();
    let fetched: Form = serde_json::from_str(&json).unwrap();

    let sent: Vec<&str> = form.all_fields().iter().map(|f| f.field_name.as_str()).collect();
    let received: Vec<&str> = fetched
        .all_fields()
        .iter()
        .map(|f| f.field_name.as_str())
        .collect();
    assert_eq!(sent, received);
    assert_eq!(
        received,
        vec!["full_name", "contact_email", "tracks", "rating"]
    );
}

#[test]
fn collect_email_form_rejects_missing_and_malformed_email() {
    // collect_email defaults to true on new forms.
    let form = registration_form();
    assert!(form.collect_email);

    let filled = Submission::new()
        .set("full_name", "Ada Lovelace")
        .set("contact_email", "ada@example.org")
        .set("tracks", json!(["Systems"]));

    // No collected email at all.
    let errors = validate_submission(&form, &filled).unwrap_err();
    assert_eq!(
        errors.get("email").unwrap(),
        &["Please enter a valid email address".to_string()]
    );

    // Malformed collected email.
    let errors =
        validate_submission(&form, &filled.clone().with_email("ada@nowhere")).unwrap_err();
    assert!(errors.get("email").is_some());

    // Well-formed collected email passes.
    assert!(validate_submission(&form, &filled.with_email("ada@example.org")).is_ok());
}

#[test]
fn invalid_submission_reports_every_broken_field_once() {
    let form = registration_form();
    let submission = Submission::new()
        .with_email("ada@example.org")
        .set("full_name", "A")
        .set("contact_email", "not-an-email")
        .set("tracks", json!(["Systems", "Web", "Embedded"]))
        .set("rating", 9);

    let errors = validate_submission(&form, &submission).unwrap_err();
    assert_eq!(errors.len(), 4);
    assert_eq!(
        errors.get("full_name").unwrap(),
        &["Minimum length is 2 characters".to_string()]
    );
    assert_eq!(
        errors.get("contact_email").unwrap(),
        &["Please enter a valid email address".to_string()]
    );
    assert_eq!(
        errors.get("tracks").unwrap(),
        &["Please select at most 2 options".to_string()]
    );
    assert_eq!(
        errors.get("rating").unwrap(),
        &["Maximum value is 5".to_string()]
    );
}

#[test]
fn gate_blocks_submission_to_an_expired_form() {
    let mut form = registration_form();
    form.active_until = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());

    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    assert_eq!(submission_gate(&form, now, 0), SubmitGate::Expired);

    let before = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
    assert_eq!(submission_gate(&form, before, 0), SubmitGate::Open);
}
