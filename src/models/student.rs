use serde::{Deserialize, Serialize};

/// One entry of the student registry. Registration happens outside this
/// tool; rollcall only ever reads these records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub roll_no: String, // ⇔ students.roll_no (TEXT UNIQUE)
    pub name: String,    // ⇔ students.name
    pub password: String,
    /// Optional: one device per student.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
}

impl Student {
    /// Name comparison is case-insensitive; roll numbers are exact-match.
    pub fn matches_identity(&self, roll_no: &str, name: &str) -> bool {
        self.roll_no == roll_no && self.name.eq_ignore_ascii_case(name)
    }

    pub fn matches_login(&self, roll_no: &str, password: &str) -> bool {
        self.roll_no == roll_no && self.password == password
    }
}
