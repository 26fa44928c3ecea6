use serde::{Deserialize, Serialize};

/// The three managed entity types. Controls URL path segments and
/// user-facing labels; one table controller instance serves one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    College,
    Program,
    Student,
}

impl EntityKind {
    /// Path segment used by the delete endpoint and the seed resource,
    /// e.g. `/user/students/delete/<id>`.
    pub fn path_segment(self) -> &'static str {
        match self {
            EntityKind::College => "colleges",
            EntityKind::Program => "programs",
            EntityKind::Student => "students",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::College => "college",
            EntityKind::Program => "program",
            EntityKind::Student => "student",
        }
    }

    pub fn label_plural(self) -> &'static str {
        self.path_segment()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    /// Display code of the owning college. The form submits `college_id`;
    /// the table shows this code. No referential integrity client-side.
    #[serde(default)]
    pub college: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_id: Option<i64>,
}

/// Canonical student record. This is the server-persisted shape
/// (`id_number` formatted as YYYY-NNNN, split names, program reference);
/// see DESIGN.md for why the roll/semester variant was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    /// Display name of the program, as rendered in the table.
    #[serde(default)]
    pub program: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub gender: String,
}
