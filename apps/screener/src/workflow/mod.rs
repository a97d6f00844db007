//! Workflow Controller — the stateful core of the screening pipeline.
//!
//! Owns the live session, the candidate and result sets, the
//! job-requirement draft and the pending-file buffer, and sequences
//! the four stages: configure → session → upload → analyze. All
//! mutation goes through named transition methods; observers either
//! poll [`WorkflowController::snapshot`] or subscribe to the watch
//! channel republished after every transition.
//!
//! Backend failures never escape this module: every `ClientError` is
//! absorbed into the transient error notice channel.

pub mod draft;
pub mod files;
pub mod notices;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::{ClientError, ResumeFile, ScreeningBackend};
use crate::models::{AnalysisResult, AnalyzeRequest, Candidate, ConfigureRequest, JobRequirement};

use draft::RequirementDraft;
use files::{Admission, FileBuffer};
use notices::Notices;

/// Position in the four-step screening sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Unconfigured,
    Configured,
    Uploaded,
    Analyzed,
}

impl Stage {
    /// 1-based step number shown to users.
    pub fn step(self) -> u8 {
        match self {
            Stage::Unconfigured => 1,
            Stage::Configured => 2,
            Stage::Uploaded => 3,
            Stage::Analyzed => 4,
        }
    }
}

/// Provider configuration as last observed. Set as a whole on a
/// successful configure (or detected at startup); survives reset —
/// configuration is process-lifetime.
#[derive(Debug, Clone, Default)]
pub struct LlmState {
    pub is_configured: bool,
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// Immutable view of the controller state at one instant.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub stage: Stage,
    pub llm: LlmState,
    pub session_id: Option<String>,
    pub candidates: Vec<Candidate>,
    pub results: Vec<AnalysisResult>,
    pub requirement: JobRequirement,
    pub pending_files: Vec<String>,
    pub is_uploading: bool,
    pub is_analyzing: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

#[derive(Debug, Default)]
struct WorkflowState {
    stage: Stage,
    llm: LlmState,
    session_id: Option<String>,
    candidates: Vec<Candidate>,
    results: Vec<AnalysisResult>,
    draft: RequirementDraft,
    files: FileBuffer,
    is_uploading: bool,
    is_analyzing: bool,
    notices: Notices,
}

impl WorkflowState {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            stage: self.stage,
            llm: self.llm.clone(),
            session_id: self.session_id.clone(),
            candidates: self.candidates.clone(),
            results: self.results.clone(),
            requirement: self.draft.to_requirement(),
            pending_files: self.files.file_names(),
            is_uploading: self.is_uploading,
            is_analyzing: self.is_analyzing,
            error: self.notices.error().map(str::to_string),
            success: self.notices.success().map(str::to_string),
        }
    }
}

pub struct WorkflowController {
    backend: Arc<dyn ScreeningBackend>,
    state: WorkflowState,
    watch_tx: watch::Sender<Snapshot>,
}

impl WorkflowController {
    pub fn new(backend: Arc<dyn ScreeningBackend>) -> Self {
        let state = WorkflowState::default();
        let (watch_tx, _) = watch::channel(state.snapshot());
        Self {
            backend,
            state,
            watch_tx,
        }
    }

    /// Change-notification channel: receivers see the latest snapshot
    /// after every transition.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.watch_tx.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    fn publish(&self) {
        self.watch_tx.send_replace(self.state.snapshot());
    }

    /// Startup probe: loads the provider config (best effort) and the
    /// configured flag. Detecting an already-configured provider is a
    /// compound transition — it advances to stage 2 AND opens a fresh
    /// session, discarding any previously held one.
    pub async fn bootstrap(&mut self) {
        match self.backend.llm_config().await {
            Ok(config) => {
                self.state.llm.provider = Some(config.provider);
                self.state.llm.model = Some(config.model);
            }
            Err(err) => {
                warn!("failed to load LLM configuration: {err}");
                self.state.notices.show_error("Could not load the LLM configuration");
            }
        }

        match self.backend.llm_status().await {
            Ok(status) => {
                self.state.llm.is_configured = status.is_configured;
                if let Some(provider) = status.current_provider {
                    self.state.llm.provider = Some(provider);
                }
                if let Some(model) = status.current_model {
                    self.state.llm.model = Some(model);
                }
                if status.is_configured {
                    self.state.stage = Stage::Configured;
                    self.open_session().await;
                }
            }
            Err(err) => {
                warn!("failed to query LLM status: {err}");
                self.state.llm.is_configured = false;
            }
        }
        self.publish();
    }

    /// Configures the provider with the given key. A blank key is
    /// refused locally, without a call. Success is the same compound
    /// transition as startup detection: advance to stage 2 and open a
    /// new session.
    pub async fn configure(&mut self, api_key: &str) {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            self.state.notices.show_error("API key is required");
            self.publish();
            return;
        }

        let request = ConfigureRequest {
            api_key: api_key.to_string(),
        };
        match self.backend.configure(&request).await {
            Ok(response) if response.success => {
                self.state.notices.show_success(response.message);
                self.state.llm.is_configured = true;
                self.state.llm.provider = response.provider;
                self.state.llm.model = response.model;
                self.state.stage = Stage::Configured;
                self.open_session().await;
            }
            Ok(response) => {
                self.state.notices.show_error(if response.message.is_empty() {
                    "Provider configuration failed".to_string()
                } else {
                    response.message
                });
            }
            Err(err) => {
                self.state
                    .notices
                    .show_error(user_message(err, "Provider configuration failed"));
            }
        }
        self.publish();
    }

    /// Opens a fresh session, replacing the previous one. Candidates,
    /// results and pending files belong to a session and are cleared
    /// together with the switch.
    pub async fn open_session(&mut self) {
        match self.backend.create_session().await {
            Ok(response) => {
                debug!(session_id = %response.session_id, "session opened");
                self.state.session_id = Some(response.session_id);
                self.state.candidates.clear();
                self.state.results.clear();
                self.state.files.clear();
            }
            Err(err) => {
                self.state
                    .notices
                    .show_error(user_message(err, "Could not open a session"));
            }
        }
        self.publish();
    }

    /// Admits a batch of files into the pending buffer. Files failing
    /// the extension allow-list are dropped and reported by name.
    pub fn add_files(&mut self, batch: Vec<ResumeFile>) -> Admission {
        let admission = self.state.files.admit(batch);
        debug!(pending = self.state.files.len(), "files admitted");
        if !admission.all_admitted() {
            self.state.notices.show_error(format!(
                "Unsupported file type(s): {}. Supported formats: PDF, DOCX, DOC, TXT",
                admission.rejected.join(", ")
            ));
        }
        self.publish();
        admission
    }

    pub fn remove_file(&mut self, index: usize) {
        self.state.files.remove(index);
        self.publish();
    }

    /// Sends the pending buffer to the backend. The stage advances on
    /// response receipt — even zero successes — because advancement
    /// tracks the envelope, not the success count. The candidate set
    /// is wholesale-replaced and the buffer cleared; per-file failures
    /// surface as a non-blocking joined error notice.
    pub async fn upload(&mut self) {
        if self.state.is_uploading {
            self.state.notices.show_error("An upload is already in progress");
            self.publish();
            return;
        }
        let Some(session_id) = self.state.session_id.clone() else {
            debug!("upload requested without a session");
            return;
        };
        if self.state.files.is_empty() {
            return;
        }

        self.state.is_uploading = true;
        self.publish();

        let batch = self.state.files.to_batch();
        match self.backend.upload_resumes(&session_id, batch).await {
            Ok(response) => {
                self.state.candidates = response.candidates;
                self.state.files.clear();
                self.state.is_uploading = false;
                self.state
                    .notices
                    .show_success(format!("{} resumes uploaded", response.successfully_uploaded));
                if !response.errors.is_empty() {
                    self.state.notices.show_error(response.errors.join("\n"));
                }
                self.state.stage = Stage::Uploaded;
            }
            Err(err) => {
                self.state.is_uploading = false;
                self.state.notices.show_error(user_message(err, "Upload failed"));
            }
        }
        self.publish();
    }

    // Requirement draft — scalar fields replace independently, lists
    // mutate one element at a time.

    pub fn set_job_title(&mut self, title: &str) {
        self.state.draft.set_job_title(title);
        self.publish();
    }

    pub fn set_description(&mut self, description: &str) {
        self.state.draft.set_description(description);
        self.publish();
    }

    pub fn set_min_years(&mut self, years: u32) {
        self.state.draft.set_min_years(years);
        self.publish();
    }

    pub fn set_max_years(&mut self, years: Option<u32>) {
        self.state.draft.set_max_years(years);
        self.publish();
    }

    pub fn set_required_degree(&mut self, degree: &str) {
        self.state.draft.set_required_degree(degree);
        self.publish();
    }

    pub fn set_weights(&mut self, skills: u32, experience: u32, education: u32) {
        self.state.draft.set_skills_weight(skills);
        self.state.draft.set_experience_weight(experience);
        self.state.draft.set_education_weight(education);
        self.publish();
    }

    pub fn add_required_skill(&mut self, raw: &str) {
        self.state.draft.add_required_skill(raw);
        self.publish();
    }

    pub fn remove_required_skill(&mut self, index: usize) {
        self.state.draft.remove_required_skill(index);
        self.publish();
    }

    pub fn add_preferred_skill(&mut self, raw: &str) {
        self.state.draft.add_preferred_skill(raw);
        self.publish();
    }

    pub fn remove_preferred_skill(&mut self, index: usize) {
        self.state.draft.remove_preferred_skill(index);
        self.publish();
    }

    pub fn add_preferred_field(&mut self, raw: &str) {
        self.state.draft.add_preferred_field(raw);
        self.publish();
    }

    pub fn remove_preferred_field(&mut self, index: usize) {
        self.state.draft.remove_preferred_field(index);
        self.publish();
    }

    /// Readiness predicate gating the analyze transition.
    pub fn can_analyze(&self) -> bool {
        let requirement = self.state.draft.get();
        self.state.llm.is_configured
            && !self.state.candidates.is_empty()
            && !requirement.job_title.trim().is_empty()
            && !requirement.required_skills.is_empty()
    }

    /// Scores the held candidates against the current draft. Refused
    /// locally (no call) when the readiness predicate fails or an
    /// analysis is already in flight. The result set is replaced
    /// wholesale — previous results are discarded, never merged.
    pub async fn analyze(&mut self) {
        if self.state.is_analyzing {
            self.state.notices.show_error("An analysis is already in progress");
            self.publish();
            return;
        }
        let Some(session_id) = self.state.session_id.clone() else {
            debug!("analysis requested without a session");
            return;
        };
        if !self.can_analyze() {
            self.state.notices.show_error(
                "A configured provider, uploaded resumes, a job title and at least one required skill are needed before analysis",
            );
            self.publish();
            return;
        }

        self.state.is_analyzing = true;
        self.publish();

        let request = AnalyzeRequest {
            job_requirement: self.state.draft.to_requirement(),
        };
        match self.backend.analyze(&session_id, &request).await {
            Ok(response) => {
                self.state.results = response.results;
                self.state.is_analyzing = false;
                self.state.notices.show_success(format!(
                    "{} candidates analyzed",
                    response.successfully_analyzed
                ));
                if !response.errors.is_empty() {
                    self.state.notices.show_error(response.errors.join("\n"));
                }
                self.state.stage = Stage::Analyzed;
            }
            Err(err) => {
                self.state.is_analyzing = false;
                self.state.notices.show_error(user_message(err, "Analysis failed"));
            }
        }
        self.publish();
    }

    /// Re-reads the session's parsed candidates from the backend,
    /// replacing the held set. Same contract as [`Self::refresh_results`]:
    /// wholesale replacement, no merge.
    pub async fn refresh_candidates(&mut self) {
        let Some(session_id) = self.state.session_id.clone() else {
            return;
        };
        match self.backend.candidates(&session_id).await {
            Ok(candidates) => self.state.candidates = candidates,
            Err(err) => self
                .state
                .notices
                .show_error(user_message(err, "Could not fetch candidates")),
        }
        self.publish();
    }

    /// Re-reads the session's results from the backend, replacing the
    /// held set.
    pub async fn refresh_results(&mut self) {
        let Some(session_id) = self.state.session_id.clone() else {
            return;
        };
        match self.backend.results(&session_id).await {
            Ok(results) => self.state.results = results,
            Err(err) => self
                .state
                .notices
                .show_error(user_message(err, "Could not fetch results")),
        }
        self.publish();
    }

    /// Read-through ranking query; does not touch held state.
    pub async fn top_candidates(&mut self, count: u32) -> Vec<AnalysisResult> {
        let Some(session_id) = self.state.session_id.clone() else {
            return Vec::new();
        };
        match self.backend.top_candidates(&session_id, count).await {
            Ok(results) => results,
            Err(err) => {
                self.state
                    .notices
                    .show_error(user_message(err, "Could not fetch top candidates"));
                self.publish();
                Vec::new()
            }
        }
    }

    /// Full reset back to stage 1. The backend session is closed
    /// best-effort on a detached task — its outcome is deliberately
    /// discarded and the local reset proceeds unconditionally.
    /// Provider configuration survives.
    pub fn reset(&mut self) {
        if let Some(session_id) = self.state.session_id.take() {
            let backend = Arc::clone(&self.backend);
            tokio::spawn(async move {
                if let Err(err) = backend.close_session(&session_id).await {
                    debug!(%session_id, "session close on reset failed: {err}");
                }
            });
        }
        self.state.stage = Stage::Unconfigured;
        self.state.candidates.clear();
        self.state.results.clear();
        self.state.files.clear();
        self.state.draft.reset();
        self.publish();
    }
}

/// Prefers the backend's own message for API-level failures; transport
/// failures get the caller's fallback text.
fn user_message(err: ClientError, fallback: &str) -> String {
    match err {
        ClientError::Api { message, .. } if !message.is_empty() => message,
        _ => fallback.to_string(),
    }
}
