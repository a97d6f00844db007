use serde::{Deserialize, Serialize};

/// The weighted matching profile submitted for scoring. Immutable per
/// submission — the workflow mutates a draft and hands a snapshot to
/// the analyze call.
///
/// The three weights nominally sum to 100 but are passed through as
/// given; the backend owns any normalization. `max_years_of_experience`
/// below the minimum is likewise accepted unchecked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirement {
    pub job_title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub min_years_of_experience: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_years_of_experience: Option<u32>,
    pub required_degree: String,
    pub preferred_fields_of_study: Vec<String>,
    pub skills_weight: u32,
    pub experience_weight: u32,
    pub education_weight: u32,
}

impl Default for JobRequirement {
    fn default() -> Self {
        Self {
            job_title: String::new(),
            description: String::new(),
            required_skills: Vec::new(),
            preferred_skills: Vec::new(),
            min_years_of_experience: 0,
            max_years_of_experience: None,
            required_degree: String::new(),
            preferred_fields_of_study: Vec::new(),
            skills_weight: 40,
            experience_weight: 40,
            education_weight: 20,
        }
    }
}
