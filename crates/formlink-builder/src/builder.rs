//! The schema editor.
//!
//! [`FormBuilder`] wraps a [`Form`] and exposes the mutations the builder UI
//! performs: section and field CRUD plus reordering. Order indexes are
//! renumbered after every removal so they stay contiguous, and swapped in
//! place on moves.

use formlink_core::{FormlinkError, FormlinkResult, ValidationError};
use formlink_schema::{Constraints, FieldType, Form, FormField, FormSection};

/// Direction for move operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the list.
    Up,
    /// Towards the end of the list.
    Down,
}

/// A partial update to a section. Unset members leave the section unchanged.
#[derive(Debug, Clone, Default)]
pub struct SectionPatch {
    /// New section title.
    pub title: Option<String>,
    /// New section description.
    pub description: Option<String>,
}

/// A partial update to a field. Unset members leave the field unchanged.
///
/// Changing the field type resets the constraints, since constraints are
/// only meaningful for their matching type.
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    /// New field name.
    pub field_name: Option<String>,
    /// New field type.
    pub field_type: Option<FieldType>,
    /// New required flag.
    pub required: Option<bool>,
    /// New constraints.
    pub constraints: Option<Constraints>,
}

/// Mutable editor over a form schema.
#[derive(Debug, Clone)]
pub struct FormBuilder {
    form: Form,
}

impl FormBuilder {
    /// Starts a builder for a brand-new form.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            form: Form::new(title),
        }
    }

    /// Starts a builder over an existing form (the edit flow).
    pub const fn edit(form: Form) -> Self {
        Self { form }
    }

    /// Read access to the schema being edited.
    pub const fn form(&self) -> &Form {
        &self.form
    }

    /// Appends a new empty section and returns its index.
    pub fn add_section(&mut self, title: impl Into<String>) -> usize {
        let mut section = FormSection::new(title);
        section.order = i32::try_from(self.form.sections.len()).unwrap_or(i32::MAX);
        self.form.sections.push(section);
        self.form.sections.len() - 1
    }

    /// Applies a patch to the section at `index`.
    pub fn update_section(&mut self, index: usize, patch: SectionPatch) -> FormlinkResult<()> {
        let section = self.section_mut(index)?;
        if let Some(title) = patch.title {
            section.title = title;
        }
        if let Some(description) = patch.description {
            section.description = Some(description);
        }
        Ok(())
    }

    /// Removes the section at `index` and renumbers the remaining sections.
    pub fn remove_section(&mut self, index: usize) -> FormlinkResult<()> {
        if index >= self.form.sections.len() {
            return Err(bad_index("section", index));
        }
        self.form.sections.remove(index);
        self.renumber_sections();
        Ok(())
    }

    /// Swaps the section at `index` with its neighbour in `direction`.
    ///
    /// Moving the first section up or the last one down is a no-op.
    pub fn move_section(&mut self, index: usize, direction: Direction) -> FormlinkResult<()> {
        let len = self.form.sections.len();
        if index >= len {
            return Err(bad_index("section", index));
        }
        if let Some(target) = neighbour(index, len, direction) {
            self.form.sections.swap(index, target);
            self.renumber_sections();
        }
        Ok(())
    }

    /// Appends a field to the section at `section_index` and returns the
    /// field's index. The field's `field_order` is set to its position.
    pub fn add_field(&mut self, section_index: usize, field: FormField) -> FormlinkResult<usize> {
        let section = self.section_mut(section_index)?;
        let order = i32::try_from(section.fields.len()).unwrap_or(i32::MAX);
        section.fields.push(field.order(order));
        Ok(section.fields.len() - 1)
    }

    /// Applies a patch to a field.
    pub fn update_field(
        &mut self,
        section_index: usize,
        field_index: usize,
        patch: FieldPatch,
    ) -> FormlinkResult<()> {
        let field = self.field_mut(section_index, field_index)?;
        if let Some(name) = patch.field_name {
            field.field_name = name;
        }
        if let Some(required) = patch.required {
            field.required = required;
        }
        match (patch.field_type, patch.constraints) {
            (Some(field_type), constraints) if field_type != field.field_type => {
                // A type change invalidates the old constraints.
                field.field_type = field_type;
                field.constraints = constraints.unwrap_or_default();
            }
            (_, Some(constraints)) => field.constraints = constraints,
            _ => {}
        }
        Ok(())
    }

    /// Removes a field and renumbers the section's remaining fields.
    pub fn remove_field(&mut self, section_index: usize, field_index: usize) -> FormlinkResult<()> {
        let section = self.section_mut(section_index)?;
        if field_index >= section.fields.len() {
            return Err(bad_index("field", field_index));
        }
        section.fields.remove(field_index);
        renumber_fields(section);
        Ok(())
    }

    /// Swaps a field with its neighbour in `direction`, rewriting both
    /// `field_order` values. Edge moves are no-ops.
    pub fn move_field(
        &mut self,
        section_index: usize,
        field_index: usize,
        direction: Direction,
    ) -> FormlinkResult<()> {
        let section = self.section_mut(section_index)?;
        let len = section.fields.len();
        if field_index >= len {
            return Err(bad_index("field", field_index));
        }
        if let Some(target) = neighbour(field_index, len, direction) {
            section.fields.swap(field_index, target);
            renumber_fields(section);
        }
        Ok(())
    }

    /// Runs the schema integrity check and hands back the finished form.
    pub fn finish(self) -> Result<Form, Vec<ValidationError>> {
        self.form.check()?;
        Ok(self.form)
    }

    fn section_mut(&mut self, index: usize) -> FormlinkResult<&mut FormSection> {
        self.form
            .sections
            .get_mut(index)
            .ok_or_else(|| bad_index("section", index))
    }

    fn field_mut(
        &mut self,
        section_index: usize,
        field_index: usize,
    ) -> FormlinkResult<&mut FormField> {
        self.section_mut(section_index)?
            .fields
            .get_mut(field_index)
            .ok_or_else(|| bad_index("field", field_index))
    }

    fn renumber_sections(&mut self) {
        for (i, section) in self.form.sections.iter_mut().enumerate() {
            section.order = i32::try_from(i).unwrap_or(i32::MAX);
        }
    }
}

fn renumber_fields(section: &mut FormSection) {
    for (i, field) in section.fields.iter_mut().enumerate() {
        field.field_order = i32::try_from(i).unwrap_or(i32::MAX);
    }
}

fn neighbour(index: usize, len: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Up if index > 0 => Some(index - 1),
        Direction::Down if index + 1 < len => Some(index + 1),
        _ => None,
    }
}

fn bad_index(kind: &str, index: usize) -> FormlinkError {
    FormlinkError::Schema(format!("no {kind} at index {index}"))
}
