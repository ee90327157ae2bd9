//! Widget system for rendering form fields as HTML.
//!
//! Widgets are the bridge between field definitions and their HTML
//! representation. Each widget renders one control for a given field,
//! current value, and extra attributes; [`widget_for`] picks the widget
//! matching a [`FieldType`].

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use formlink_schema::{FieldType, FormField};

/// Extra HTML attributes, sorted so rendered output is deterministic.
pub type AttrMap = BTreeMap<String, String>;

/// Enumerates the built-in widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetType {
    /// `<input type="text">`.
    TextInput,
    /// `<input type="email">`.
    EmailInput,
    /// `<textarea>`.
    Textarea,
    /// `<input type="number">`.
    NumberInput,
    /// `<input type="date">`.
    DateInput,
    /// `<input type="datetime-local">`.
    DateTimeInput,
    /// `<input type="checkbox">` (single, boolean).
    CheckboxInput,
    /// `<input type="url">`.
    UrlInput,
    /// `<select>` with a placeholder option.
    Select,
    /// A set of `<input type="radio">` elements.
    RadioGroup,
    /// A set of `<input type="checkbox">` elements.
    CheckboxGroup,
    /// A row of numbered scale buttons.
    ScaleRow,
}

/// A trait for HTML form widgets.
///
/// Widgets render a control for a field given the submitted (or default)
/// value. All widgets are `Send + Sync` so rendered pages can be produced
/// from any thread.
pub trait Widget: Send + Sync + fmt::Debug {
    /// Returns the widget type enum variant.
    fn widget_type(&self) -> WidgetType;

    /// Renders the widget as an HTML string.
    ///
    /// # Arguments
    /// - `field` - The field definition (name, constraints, required flag)
    /// - `value` - The current value to display, if any
    /// - `attrs` - Additional HTML attributes
    fn render(&self, field: &FormField, value: Option<&Value>, attrs: &AttrMap) -> String;
}

/// Returns the widget matching a field type.
pub fn widget_for(field_type: FieldType) -> Box<dyn Widget> {
    match field_type {
        FieldType::Text | FieldType::Uuid => Box::new(TextInput),
        FieldType::Email => Box::new(EmailInput),
        FieldType::Textarea => Box::new(Textarea),
        FieldType::Number | FieldType::Integer => Box::new(NumberInput),
        FieldType::Date => Box::new(DateInput),
        FieldType::DateTime => Box::new(DateTimeInput),
        FieldType::Boolean => Box::new(CheckboxInput),
        FieldType::ImageUrl => Box::new(UrlInput),
        FieldType::Select => Box::new(Select),
        FieldType::Radio => Box::new(RadioGroup),
        FieldType::Checkbox | FieldType::Multiselect => Box::new(CheckboxGroup),
        FieldType::Scale => Box::new(ScaleRow),
    }
}

/// Escapes text for safe inclusion in HTML bodies and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats an attribute map into ` key="value"` pairs (sorted by key).
fn render_attrs(attrs: &AttrMap) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!(r#" {k}="{}""#, escape(v)))
        .collect()
}

/// Renders the current value as an attribute-safe string.
fn value_str(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => escape(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Attributes derived from a field's constraints, mirroring the native
/// HTML validation hints the original page sets.
fn constraint_attrs(field: &FormField) -> AttrMap {
    let c = &field.constraints;
    let mut attrs = AttrMap::new();
    match field.field_type {
        FieldType::Text | FieldType::Textarea | FieldType::Email => {
            if let Some(min) = c.min_length {
                attrs.insert("minlength".to_string(), min.to_string());
            }
            if let Some(max) = c.max_length {
                attrs.insert("maxlength".to_string(), max.to_string());
            }
            if let Some(pattern) = &c.pattern {
                attrs.insert("pattern".to_string(), pattern.clone());
            }
        }
        FieldType::Number | FieldType::Integer | FieldType::Scale => {
            if let Some(min) = c.min {
                attrs.insert("min".to_string(), min.to_string());
            }
            if let Some(max) = c.max {
                attrs.insert("max".to_string(), max.to_string());
            }
        }
        FieldType::Date => {
            if let Some(min) = c.min_date {
                attrs.insert("min".to_string(), min.to_string());
            }
            if let Some(max) = c.max_date {
                attrs.insert("max".to_string(), max.to_string());
            }
        }
        FieldType::DateTime => {
            if let Some(min) = c.min_datetime {
                attrs.insert("min".to_string(), min.format("%Y-%m-%dT%H:%M").to_string());
            }
            if let Some(max) = c.max_datetime {
                attrs.insert("max".to_string(), max.format("%Y-%m-%dT%H:%M").to_string());
            }
        }
        _ => {}
    }
    attrs
}

fn input_widget(
    input_type: &str,
    field: &FormField,
    value: Option<&Value>,
    attrs: &AttrMap,
) -> String {
    let mut all = constraint_attrs(field);
    all.extend(attrs.clone());
    let name = escape(&field.field_name);
    let required = if field.required { " required" } else { "" };
    format!(
        r#"<input type="{input_type}" id="id_{name}" name="{name}" value="{}"{}{required} />"#,
        value_str(value),
        render_attrs(&all),
    )
}

/// A basic `<input type="text">` widget.
#[derive(Debug, Clone)]
pub struct TextInput;

impl Widget for TextInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::TextInput
    }

    fn render(&self, field: &FormField, value: Option<&Value>, attrs: &AttrMap) -> String {
        input_widget("text", field, value, attrs)
    }
}

/// An `<input type="email">` widget.
#[derive(Debug, Clone)]
pub struct EmailInput;

impl Widget for EmailInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::EmailInput
    }

    fn render(&self, field: &FormField, value: Option<&Value>, attrs: &AttrMap) -> String {
        input_widget("email", field, value, attrs)
    }
}

/// A `<textarea>` widget.
#[derive(Debug, Clone)]
pub struct Textarea;

impl Widget for Textarea {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Textarea
    }

    fn render(&self, field: &FormField, value: Option<&Value>, attrs: &AttrMap) -> String {
        let mut all = constraint_attrs(field);
        all.extend(attrs.clone());
        let name = escape(&field.field_name);
        let required = if field.required { " required" } else { "" };
        format!(
            r#"<textarea id="id_{name}" name="{name}" rows="5"{}{required}>{}</textarea>"#,
            render_attrs(&all),
            value_str(value),
        )
    }
}

/// An `<input type="number">` widget.
#[derive(Debug, Clone)]
pub struct NumberInput;

impl Widget for NumberInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::NumberInput
    }

    fn render(&self, field: &FormField, value: Option<&Value>, attrs: &AttrMap) -> String {
        input_widget("number", field, value, attrs)
    }
}

/// An `<input type="date">` widget.
#[derive(Debug, Clone)]
pub struct DateInput;

impl Widget for DateInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::DateInput
    }

    fn render(&self, field: &FormField, value: Option<&Value>, attrs: &AttrMap) -> String {
        input_widget("date", field, value, attrs)
    }
}

/// An `<input type="datetime-local">` widget.
#[derive(Debug, Clone)]
pub struct DateTimeInput;

impl Widget for DateTimeInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::DateTimeInput
    }

    fn render(&self, field: &FormField, value: Option<&Value>, attrs: &AttrMap) -> String {
        input_widget("datetime-local", field, value, attrs)
    }
}

/// A single boolean `<input type="checkbox">` widget.
#[derive(Debug, Clone)]
pub struct CheckboxInput;

impl Widget for CheckboxInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::CheckboxInput
    }

    fn render(&self, field: &FormField, value: Option<&Value>, attrs: &AttrMap) -> String {
        let name = escape(&field.field_name);
        let checked = if value.and_then(Value::as_bool).unwrap_or(false) {
            " checked"
        } else {
            ""
        };
        format!(
            r#"<input type="checkbox" id="id_{name}" name="{name}"{}{checked} />"#,
            render_attrs(attrs),
        )
    }
}

/// An `<input type="url">` widget.
#[derive(Debug, Clone)]
pub struct UrlInput;

impl Widget for UrlInput {
    fn widget_type(&self) -> WidgetType {
        WidgetType::UrlInput
    }

    fn render(&self, field: &FormField, value: Option<&Value>, attrs: &AttrMap) -> String {
        input_widget("url", field, value, attrs)
    }
}

/// A `<select>` widget with a placeholder option.
#[derive(Debug, Clone)]
pub struct Select;

impl Widget for Select {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Select
    }

    fn render(&self, field: &FormField, value: Option<&Value>, attrs: &AttrMap) -> String {
        let name = escape(&field.field_name);
        let current = value.and_then(Value::as_str).unwrap_or("");
        let required = if field.required { " required" } else { "" };
        let mut options = String::from(r#"<option value="">Select an option</option>"#);
        for item in field.constraints.items.as_deref().unwrap_or_default() {
            let selected = if item == current { " selected" } else { "" };
            let item = escape(item);
            options.push_str(&format!(r#"<option value="{item}"{selected}>{item}</option>"#));
        }
        format!(
            r#"<select id="id_{name}" name="{name}"{}{required}>{options}</select>"#,
            render_attrs(attrs),
        )
    }
}

/// A group of `<input type="radio">` elements, one per option.
#[derive(Debug, Clone)]
pub struct RadioGroup;

impl Widget for RadioGroup {
    fn widget_type(&self) -> WidgetType {
        WidgetType::RadioGroup
    }

    fn render(&self, field: &FormField, value: Option<&Value>, _attrs: &AttrMap) -> String {
        let name = escape(&field.field_name);
        let current = value.and_then(Value::as_str).unwrap_or("");
        field
            .constraints
            .items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let checked = if item == current { " checked" } else { "" };
                let item = escape(item);
                format!(
                    r#"<div class="option"><input type="radio" id="{name}_{i}" name="{name}" value="{item}"{checked} /><label for="{name}_{i}">{item}</label></div>"#
                )
            })
            .collect()
    }
}

/// A group of `<input type="checkbox">` elements, one per option.
#[derive(Debug, Clone)]
pub struct CheckboxGroup;

impl Widget for CheckboxGroup {
    fn widget_type(&self) -> WidgetType {
        WidgetType::CheckboxGroup
    }

    fn render(&self, field: &FormField, value: Option<&Value>, _attrs: &AttrMap) -> String {
        let name = escape(&field.field_name);
        let selected: Vec<&str> = value
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        field
            .constraints
            .items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let checked = if selected.contains(&item.as_str()) {
                    " checked"
                } else {
                    ""
                };
                let item = escape(item);
                format!(
                    r#"<div class="option"><input type="checkbox" id="{name}_{i}" name="{name}_{i}" value="{item}"{checked} /><label for="{name}_{i}">{item}</label></div>"#
                )
            })
            .collect()
    }
}

/// A row of numbered buttons for scale fields.
///
/// The range comes from the field's `min`/`max` constraints, defaulting to
/// 1 through 10 like the validator.
#[derive(Debug, Clone)]
pub struct ScaleRow;

impl Widget for ScaleRow {
    fn widget_type(&self) -> WidgetType {
        WidgetType::ScaleRow
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, field: &FormField, value: Option<&Value>, _attrs: &AttrMap) -> String {
        let name = escape(&field.field_name);
        let min = field.constraints.min.unwrap_or(1.0) as i64;
        let max = field.constraints.max.unwrap_or(10.0) as i64;
        let current = value.and_then(Value::as_i64);
        let buttons: String = (min..=max)
            .map(|n| {
                let selected = if current == Some(n) { r#" class="selected""# } else { "" };
                format!(
                    r#"<button type="button" data-name="{name}" data-value="{n}"{selected}>{n}</button>"#
                )
            })
            .collect();
        format!(r#"<div class="scale" id="id_{name}">{buttons}</div>"#)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formlink_schema::Constraints;
    use serde_json::json;

    fn attrs() -> AttrMap {
        AttrMap::new()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_text_input_renders_value_and_constraints() {
        let field = FormField::new("name", FieldType::Text)
            .constraints(Constraints::length(Some(2), Some(40)));
        let html = TextInput.render(&field, Some(&json!("Alice")), &attrs());
        assert!(html.contains(r#"type="text""#));
        assert!(html.contains(r#"name="name""#));
        assert!(html.contains(r#"id="id_name""#));
        assert!(html.contains(r#"value="Alice""#));
        assert!(html.contains(r#"minlength="2""#));
        assert!(html.contains(r#"maxlength="40""#));
        assert!(html.contains("required"));
    }

    #[test]
    fn test_optional_field_has_no_required_attr() {
        let field = FormField::new("nick", FieldType::Text).required(false);
        let html = TextInput.render(&field, None, &attrs());
        assert!(!html.contains("required"));
    }

    #[test]
    fn test_value_is_escaped() {
        let field = FormField::new("name", FieldType::Text);
        let html = TextInput.render(&field, Some(&json!(r#""><script>"#)), &attrs());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_number_input_bounds() {
        let field = FormField::new("age", FieldType::Number)
            .constraints(Constraints::numeric(Some(0.0), Some(150.0)));
        let html = NumberInput.render(&field, Some(&json!(30)), &attrs());
        assert!(html.contains(r#"type="number""#));
        assert!(html.contains(r#"min="0""#));
        assert!(html.contains(r#"max="150""#));
        assert!(html.contains(r#"value="30""#));
    }

    #[test]
    fn test_textarea_holds_value_as_body() {
        let field = FormField::new("bio", FieldType::Textarea);
        let html = Textarea.render(&field, Some(&json!("hello")), &attrs());
        assert!(html.contains(r#"<textarea id="id_bio" name="bio" rows="5""#));
        assert!(html.contains(">hello</textarea>"));
    }

    #[test]
    fn test_select_placeholder_and_selection() {
        let field = FormField::new("color", FieldType::Select)
            .constraints(Constraints::choices(["Red", "Blue"]));
        let html = Select.render(&field, Some(&json!("Blue")), &attrs());
        assert!(html.contains(r#"<option value="">Select an option</option>"#));
        assert!(html.contains(r#"<option value="Red">Red</option>"#));
        assert!(html.contains(r#"<option value="Blue" selected>Blue</option>"#));
    }

    #[test]
    fn test_checkbox_group_checks_selected_items() {
        let field = FormField::new("topics", FieldType::Multiselect)
            .constraints(Constraints::choices(["a", "b", "c"]));
        let html = CheckboxGroup.render(&field, Some(&json!(["a", "c"])), &attrs());
        assert!(html.contains(r#"id="topics_0" name="topics_0" value="a" checked"#));
        assert!(html.contains(r#"id="topics_1" name="topics_1" value="b" />"#));
        assert!(html.contains(r#"id="topics_2" name="topics_2" value="c" checked"#));
    }

    #[test]
    fn test_radio_group_shares_one_name() {
        let field = FormField::new("size", FieldType::Radio)
            .constraints(Constraints::choices(["S", "M"]));
        let html = RadioGroup.render(&field, Some(&json!("M")), &attrs());
        assert!(html.contains(r#"id="size_0" name="size" value="S" />"#));
        assert!(html.contains(r#"id="size_1" name="size" value="M" checked"#));
    }

    #[test]
    fn test_scale_row_default_range() {
        let field = FormField::new("rating", FieldType::Scale);
        let html = ScaleRow.render(&field, Some(&json!(7)), &attrs());
        assert!(html.contains(r#"data-value="1""#));
        assert!(html.contains(r#"data-value="10""#));
        assert!(!html.contains(r#"data-value="11""#));
        assert!(html.contains(r#"data-value="7" class="selected""#));
    }

    #[test]
    fn test_scale_row_custom_range() {
        let field = FormField::new("rating", FieldType::Scale)
            .constraints(Constraints::numeric(Some(1.0), Some(5.0)));
        let html = ScaleRow.render(&field, None, &attrs());
        assert!(html.contains(r#"data-value="5""#));
        assert!(!html.contains(r#"data-value="6""#));
    }

    #[test]
    fn test_date_input_bounds() {
        use chrono::NaiveDate;
        let field = FormField::new("when", FieldType::Date).constraints(
            Constraints::default()
                .date_bounds(NaiveDate::from_ymd_opt(2024, 1, 1), None),
        );
        let html = DateInput.render(&field, None, &attrs());
        assert!(html.contains(r#"type="date""#));
        assert!(html.contains(r#"min="2024-01-01""#));
    }

    #[test]
    fn test_widget_for_covers_all_types() {
        assert_eq!(widget_for(FieldType::Text).widget_type(), WidgetType::TextInput);
        assert_eq!(widget_for(FieldType::Email).widget_type(), WidgetType::EmailInput);
        assert_eq!(widget_for(FieldType::Textarea).widget_type(), WidgetType::Textarea);
        assert_eq!(widget_for(FieldType::Integer).widget_type(), WidgetType::NumberInput);
        assert_eq!(widget_for(FieldType::Date).widget_type(), WidgetType::DateInput);
        assert_eq!(widget_for(FieldType::DateTime).widget_type(), WidgetType::DateTimeInput);
        assert_eq!(widget_for(FieldType::Boolean).widget_type(), WidgetType::CheckboxInput);
        assert_eq!(widget_for(FieldType::ImageUrl).widget_type(), WidgetType::UrlInput);
        assert_eq!(widget_for(FieldType::Uuid).widget_type(), WidgetType::TextInput);
        assert_eq!(widget_for(FieldType::Select).widget_type(), WidgetType::Select);
        assert_eq!(widget_for(FieldType::Radio).widget_type(), WidgetType::RadioGroup);
        assert_eq!(widget_for(FieldType::Checkbox).widget_type(), WidgetType::CheckboxGroup);
        assert_eq!(widget_for(FieldType::Multiselect).widget_type(), WidgetType::CheckboxGroup);
        assert_eq!(widget_for(FieldType::Scale).widget_type(), WidgetType::ScaleRow);
    }
}
