use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed resume as returned by the upload endpoint. Candidates are
/// produced only by the backend and never mutated locally — the
/// workflow replaces whole sets, not fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Opaque server-issued id.
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Education>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub years_of_experience: f64,
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company_name: String,
    pub position: String,
    pub start_date: DateTime<Utc>,
    /// Absent together with `is_current = true` for an ongoing role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub description: String,
    pub is_current: bool,
    pub duration_in_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
}
