//! The in-progress job-requirement draft. Scalar fields are replaced
//! individually; the three lists are only ever mutated one element at
//! a time (add trimmed / remove by index) — bulk replacement happens
//! solely through `reset`. Blank additions are ignored without error.

use crate::models::JobRequirement;

#[derive(Debug, Default)]
pub struct RequirementDraft {
    requirement: JobRequirement,
}

impl RequirementDraft {
    pub fn get(&self) -> &JobRequirement {
        &self.requirement
    }

    /// Snapshot handed to the analyze call.
    pub fn to_requirement(&self) -> JobRequirement {
        self.requirement.clone()
    }

    pub fn reset(&mut self) {
        self.requirement = JobRequirement::default();
    }

    pub fn set_job_title(&mut self, title: &str) {
        self.requirement.job_title = title.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.requirement.description = description.to_string();
    }

    pub fn set_min_years(&mut self, years: u32) {
        self.requirement.min_years_of_experience = years;
    }

    pub fn set_max_years(&mut self, years: Option<u32>) {
        self.requirement.max_years_of_experience = years;
    }

    pub fn set_required_degree(&mut self, degree: &str) {
        self.requirement.required_degree = degree.to_string();
    }

    pub fn set_skills_weight(&mut self, weight: u32) {
        self.requirement.skills_weight = weight;
    }

    pub fn set_experience_weight(&mut self, weight: u32) {
        self.requirement.experience_weight = weight;
    }

    pub fn set_education_weight(&mut self, weight: u32) {
        self.requirement.education_weight = weight;
    }

    /// Returns false when the input was blank and nothing was added.
    pub fn add_required_skill(&mut self, raw: &str) -> bool {
        push_trimmed(&mut self.requirement.required_skills, raw)
    }

    pub fn remove_required_skill(&mut self, index: usize) {
        remove_at(&mut self.requirement.required_skills, index);
    }

    pub fn add_preferred_skill(&mut self, raw: &str) -> bool {
        push_trimmed(&mut self.requirement.preferred_skills, raw)
    }

    pub fn remove_preferred_skill(&mut self, index: usize) {
        remove_at(&mut self.requirement.preferred_skills, index);
    }

    pub fn add_preferred_field(&mut self, raw: &str) -> bool {
        push_trimmed(&mut self.requirement.preferred_fields_of_study, raw)
    }

    pub fn remove_preferred_field(&mut self, index: usize) {
        remove_at(&mut self.requirement.preferred_fields_of_study, index);
    }
}

fn push_trimmed(list: &mut Vec<String>, raw: &str) -> bool {
    let value = raw.trim();
    if value.is_empty() {
        return false;
    }
    list.push(value.to_string());
    true
}

fn remove_at(list: &mut Vec<String>, index: usize) {
    if index < list.len() {
        list.remove(index);
    }
}
