//! # formlink-render
//!
//! Walks a [`Form`](formlink_schema::Form) schema and produces the HTML
//! input controls for the public form page. Each field type maps to a
//! [`Widget`](widgets::Widget) that knows how to render itself, including
//! the HTML attributes derived from the field's constraints.

pub mod render;
pub mod widgets;

pub use render::{render_form, render_header, FieldErrors};
pub use widgets::{widget_for, Widget, WidgetType};
