use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candidate::Candidate;
use super::requirement::JobRequirement;

/// One scoring outcome per candidate per analysis run. `candidate_id`
/// is a relation, not ownership — the embedded `candidate` may or may
/// not be populated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    pub candidate_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Candidate>,
    pub skills_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub total_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_analysis: Option<SkillsAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_analysis: Option<ExperienceAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_analysis: Option<EducationAnalysis>,
    pub ai_summary: String,
    pub strengths: String,
    pub weaknesses: String,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsAnalysis {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_count: u32,
    pub required_count: u32,
    pub match_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceAnalysis {
    pub total_years_of_experience: f64,
    pub required_years: u32,
    pub number_of_companies: u32,
    pub average_years_per_company: f64,
    pub has_relevant_experience: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationAnalysis {
    pub has_required_degree: bool,
    pub is_relevant_field: bool,
    pub actual_degree: String,
    pub actual_field: String,
}

/// Upload envelope. A nonzero `failed_to_upload` alongside populated
/// `candidates` is a valid success response, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub session_id: String,
    pub total_files: u32,
    pub successfully_uploaded: u32,
    pub failed_to_upload: u32,
    pub candidates: Vec<Candidate>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub job_requirement: JobRequirement,
}

/// Analyze envelope, same partial-failure contract as upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub session_id: String,
    pub total_candidates: u32,
    pub successfully_analyzed: u32,
    pub failed_to_analyze: u32,
    pub results: Vec<AnalysisResult>,
    pub errors: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_result_with_optional_blocks_absent() {
        let json = r#"{
            "id": "r-1",
            "candidateId": "c-1",
            "skillsScore": 72.5,
            "experienceScore": 80.0,
            "educationScore": 60.0,
            "totalScore": 73.0,
            "aiSummary": "Solid backend profile",
            "strengths": "Rust depth",
            "weaknesses": "No cloud exposure",
            "analyzedAt": "2026-03-01T12:00:00Z"
        }"#;
        let r: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.candidate_id, "c-1");
        assert!(r.candidate.is_none());
        assert!(r.skills_analysis.is_none());
        assert!((r.total_score - 73.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_upload_response_partial_failure_is_deserializable() {
        let json = r#"{
            "sessionId": "s-1",
            "totalFiles": 3,
            "successfullyUploaded": 2,
            "failedToUpload": 1,
            "candidates": [],
            "errors": ["broken.pdf: could not extract text"]
        }"#;
        let resp: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.successfully_uploaded, 2);
        assert_eq!(resp.failed_to_upload, 1);
        assert_eq!(resp.errors.len(), 1);
    }

    #[test]
    fn test_analyze_request_nests_requirement_under_contract_key() {
        let req = AnalyzeRequest {
            job_requirement: JobRequirement::default(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("jobRequirement").is_some());
        assert_eq!(json["jobRequirement"]["skillsWeight"], 40);
    }

    #[test]
    fn test_skills_analysis_field_names() {
        let json = r#"{
            "matchedSkills": ["Rust"],
            "missingSkills": ["Go"],
            "matchedCount": 1,
            "requiredCount": 2,
            "matchPercentage": 50.0
        }"#;
        let sa: SkillsAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(sa.matched_count, 1);
        assert_eq!(sa.missing_skills, vec!["Go".to_string()]);
    }
}
