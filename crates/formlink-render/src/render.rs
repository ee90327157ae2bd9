//! Renders the public page body for a form schema.
//!
//! The output mirrors the hosted response page: a header with the logo,
//! title, and description, an email block when the form collects respondent
//! emails, and one card per section with labelled controls. Validation
//! errors are rendered inline under the control they belong to.

use std::collections::BTreeMap;

use serde_json::Value;

use formlink_schema::{FieldType, Form, FormField, FormSection};

use crate::widgets::{escape, widget_for, AttrMap};

/// Per-field error messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Renders the form header: cover image, logo, title, and description.
pub fn render_header(form: &Form) -> String {
    let mut out = String::from(r#"<header class="form-header">"#);
    if let Some(cover) = &form.cover_image {
        out.push_str(&format!(
            r#"<img class="cover" src="{}" alt="" />"#,
            escape(cover)
        ));
    }
    if let Some(logo) = &form.logo {
        out.push_str(&format!(
            r#"<img class="logo" src="{}" alt="" />"#,
            escape(logo)
        ));
    }
    out.push_str(&format!("<h1>{}</h1>", escape(&form.title)));
    if let Some(detail) = &form.detail {
        out.push_str(&format!(r#"<p class="detail">{}</p>"#, escape(detail)));
    }
    out.push_str("</header>");
    out
}

/// Renders the full form body: header, email block, and section cards.
///
/// `values` holds the current (pre-filled or re-submitted) values keyed by
/// field name; `errors` holds the messages to show under each field. Both
/// may be empty for a fresh page.
pub fn render_form(form: &Form, values: &BTreeMap<String, Value>, errors: &FieldErrors) -> String {
    let mut out = render_header(form);
    out.push_str(r#"<form method="post">"#);

    if form.collect_email {
        out.push_str(&render_email_block(
            values.get("email"),
            errors.get("email"),
        ));
    }

    for section in form.ordered_sections() {
        out.push_str(&render_section(section, values, errors));
    }

    out.push_str(r#"<button type="submit">Submit</button></form>"#);
    out
}

fn render_email_block(value: Option<&Value>, errors: Option<&Vec<String>>) -> String {
    let current = value.and_then(Value::as_str).unwrap_or("");
    let mut out = String::from(r#"<div class="form-group email-block">"#);
    out.push_str(r#"<label for="id_email">Your email<span class="required">*</span></label>"#);
    out.push_str(&format!(
        r#"<input type="email" id="id_email" name="email" value="{}" required />"#,
        escape(current)
    ));
    out.push_str(&render_errors(errors));
    out.push_str("</div>");
    out
}

fn render_section(
    section: &FormSection,
    values: &BTreeMap<String, Value>,
    errors: &FieldErrors,
) -> String {
    let mut out = String::from(r#"<section class="form-card">"#);
    out.push_str(&format!("<h2>{}</h2>", escape(&section.title)));
    if let Some(description) = &section.description {
        out.push_str(&format!(
            r#"<p class="section-description">{}</p>"#,
            escape(description)
        ));
    }
    for field in section.ordered_fields() {
        out.push_str(&render_field(
            field,
            values.get(&field.field_name),
            errors.get(&field.field_name),
        ));
    }
    out.push_str("</section>");
    out
}

fn render_field(
    field: &FormField,
    value: Option<&Value>,
    errors: Option<&Vec<String>>,
) -> String {
    let widget = widget_for(field.field_type);
    let name = escape(&field.field_name);
    let required = if field.required {
        r#"<span class="required">*</span>"#
    } else {
        ""
    };
    // Boolean checkboxes put the label after the control.
    let control = widget.render(field, value, &AttrMap::new());
    let label = format!(r#"<label for="id_{name}">{}{required}</label>"#, label_text(field));
    let body = if field.field_type == FieldType::Boolean {
        format!("{control}{label}")
    } else {
        format!("{label}{control}")
    };
    format!(
        r#"<div class="form-group">{body}{}</div>"#,
        render_errors(errors)
    )
}

fn render_errors(errors: Option<&Vec<String>>) -> String {
    errors
        .into_iter()
        .flatten()
        .map(|msg| format!(r#"<p class="field-error">{}</p>"#, escape(msg)))
        .collect()
}

/// Turns a snake_case field name into a human-readable label.
fn label_text(field: &FormField) -> String {
    let mut out = String::with_capacity(field.field_name.len());
    for (i, part) in field.field_name.split('_').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                out.extend(first.to_uppercase());
            } else {
                out.push(first);
            }
            out.push_str(chars.as_str());
        }
    }
    escape(&out)
}
