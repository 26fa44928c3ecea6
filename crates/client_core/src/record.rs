//! The generic record seam: one trait describing everything the table
//! controller needs to know about an entity type, so a single controller
//! serves colleges, programs, and students alike.

use serde::{de::DeserializeOwned, Serialize};
use shared::domain::{College, EntityKind, Program, Student};

use crate::form::{
    optional_i32, optional_i64, optional_string, required_string, FormError, FormValues,
};

pub trait TableRecord:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    const ENTITY: EntityKind;

    /// Column headers in table order, excluding the trailing actions column.
    fn columns() -> &'static [&'static str];

    /// Form input names, in form order. `populate_for_edit` blanks any of
    /// these the record has no value for.
    fn form_fields() -> &'static [&'static str];

    /// Fields that must be non-empty before a frontend-only submit.
    fn required_fields() -> &'static [&'static str];

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);

    /// Name used in the delete confirmation prompt.
    fn display_name(&self) -> String;

    /// Display values in column order, pre-escaping.
    fn cells(&self) -> Vec<String>;

    /// Field values matched by the search filter.
    fn search_fields(&self) -> Vec<&str>;

    fn to_form(&self) -> FormValues;
    fn from_form(values: &FormValues) -> Result<Self, FormError>;

    /// Apply submitted values onto an existing record, keeping fields the
    /// form did not carry.
    fn apply_form(&mut self, values: &FormValues) -> Result<(), FormError>;

    /// New records are prepended for students and appended otherwise,
    /// matching the original insertion order.
    fn prepend_new() -> bool {
        false
    }
}

fn id_to_form(values: &mut FormValues, id: Option<i64>) {
    values.set("id", id.map(|v| v.to_string()).unwrap_or_default());
}

impl TableRecord for College {
    const ENTITY: EntityKind = EntityKind::College;

    fn columns() -> &'static [&'static str] {
        &["Code", "Name"]
    }

    fn form_fields() -> &'static [&'static str] {
        &["id", "code", "name"]
    }

    fn required_fields() -> &'static [&'static str] {
        &["code", "name"]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![self.code.clone(), self.name.clone()]
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.code]
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        id_to_form(&mut values, self.id);
        values.set("code", self.code.clone());
        values.set("name", self.name.clone());
        values
    }

    fn from_form(values: &FormValues) -> Result<Self, FormError> {
        Ok(Self {
            id: optional_i64(values, "id")?,
            code: required_string(values, "code")?,
            name: required_string(values, "name")?,
        })
    }

    fn apply_form(&mut self, values: &FormValues) -> Result<(), FormError> {
        self.code = required_string(values, "code")?;
        self.name = required_string(values, "name")?;
        Ok(())
    }
}

impl TableRecord for Program {
    const ENTITY: EntityKind = EntityKind::Program;

    fn columns() -> &'static [&'static str] {
        &["Code", "Name", "College"]
    }

    fn form_fields() -> &'static [&'static str] {
        &["id", "code", "name", "college", "college_id"]
    }

    fn required_fields() -> &'static [&'static str] {
        &["code", "name"]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![self.code.clone(), self.name.clone(), self.college.clone()]
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.code, &self.college]
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        id_to_form(&mut values, self.id);
        values.set("code", self.code.clone());
        values.set("name", self.name.clone());
        values.set("college", self.college.clone());
        values.set(
            "college_id",
            self.college_id.map(|v| v.to_string()).unwrap_or_default(),
        );
        values
    }

    fn from_form(values: &FormValues) -> Result<Self, FormError> {
        Ok(Self {
            id: optional_i64(values, "id")?,
            code: required_string(values, "code")?,
            name: required_string(values, "name")?,
            college: optional_string(values, "college"),
            college_id: optional_i64(values, "college_id")?,
        })
    }

    fn apply_form(&mut self, values: &FormValues) -> Result<(), FormError> {
        self.code = required_string(values, "code")?;
        self.name = required_string(values, "name")?;
        if let Some(college) = values.get_trimmed("college") {
            self.college = college.to_string();
        }
        if let Some(college_id) = optional_i64(values, "college_id")? {
            self.college_id = Some(college_id);
        }
        Ok(())
    }
}

impl TableRecord for Student {
    const ENTITY: EntityKind = EntityKind::Student;

    fn columns() -> &'static [&'static str] {
        &["Student ID", "First name", "Last name", "Program", "Year", "Gender"]
    }

    fn form_fields() -> &'static [&'static str] {
        &[
            "id",
            "id_number",
            "first_name",
            "last_name",
            "program",
            "program_id",
            "year",
            "gender",
        ]
    }

    fn required_fields() -> &'static [&'static str] {
        &["id_number", "first_name", "last_name"]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn display_name(&self) -> String {
        format!("{} {} ({})", self.first_name, self.last_name, self.id_number)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id_number.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.program.clone(),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.gender.clone(),
        ]
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.first_name,
            &self.last_name,
            &self.id_number,
            &self.program,
        ]
    }

    fn to_form(&self) -> FormValues {
        let mut values = FormValues::new();
        id_to_form(&mut values, self.id);
        values.set("id_number", self.id_number.clone());
        values.set("first_name", self.first_name.clone());
        values.set("last_name", self.last_name.clone());
        values.set("program", self.program.clone());
        values.set(
            "program_id",
            self.program_id.map(|v| v.to_string()).unwrap_or_default(),
        );
        values.set("year", self.year.map(|v| v.to_string()).unwrap_or_default());
        values.set("gender", self.gender.clone());
        values
    }

    fn from_form(values: &FormValues) -> Result<Self, FormError> {
        Ok(Self {
            id: optional_i64(values, "id")?,
            id_number: required_string(values, "id_number")?,
            first_name: required_string(values, "first_name")?,
            last_name: required_string(values, "last_name")?,
            program: optional_string(values, "program"),
            program_id: optional_i64(values, "program_id")?,
            year: optional_i32(values, "year")?,
            gender: optional_string(values, "gender"),
        })
    }

    fn apply_form(&mut self, values: &FormValues) -> Result<(), FormError> {
        self.id_number = required_string(values, "id_number")?;
        self.first_name = required_string(values, "first_name")?;
        self.last_name = required_string(values, "last_name")?;
        if let Some(program) = values.get_trimmed("program") {
            self.program = program.to_string();
        }
        if let Some(program_id) = optional_i64(values, "program_id")? {
            self.program_id = Some(program_id);
        }
        if let Some(year) = optional_i32(values, "year")? {
            self.year = Some(year);
        }
        if let Some(gender) = values.get_trimmed("gender") {
            self.gender = gender.to_string();
        }
        Ok(())
    }

    fn prepend_new() -> bool {
        true
    }
}
