//! Wire-contract data model shared by the client and the workflow.
//!
//! Field names here ARE the backend contract: every struct serializes
//! to the exact camelCase keys the scoring API expects. No validation
//! happens in this layer — the workflow controller validates at the
//! point of use.

#![allow(dead_code)]

pub mod analysis;
pub mod candidate;
pub mod llm;
pub mod requirement;
pub mod session;

pub use analysis::{
    AnalysisResult, AnalyzeRequest, AnalyzeResponse, EducationAnalysis, ExperienceAnalysis,
    SkillsAnalysis, UploadResponse,
};
pub use candidate::{Candidate, Education, Experience, Skill};
pub use llm::{
    ConfigureRequest, ConfigureResponse, LlmConfigResponse, LlmProvider, LlmStatusResponse,
};
pub use requirement::JobRequirement;
pub use session::{CloseSessionResponse, SessionResponse};
