//! Screening Client — the single point of entry for all scoring-backend
//! calls. Stateless: one request per operation, no retries, no caching.
//!
//! The controller depends on the [`ScreeningBackend`] trait, not the
//! HTTP implementation, so tests can substitute an in-memory fake.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    AnalysisResult, AnalyzeRequest, AnalyzeResponse, Candidate, CloseSessionResponse,
    ConfigureRequest, ConfigureResponse, LlmConfigResponse, LlmStatusResponse, SessionResponse,
    UploadResponse,
};

const REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_TOP_COUNT: u32 = 10;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A file blob queued for upload, with its original name preserved —
/// the backend keys per-file errors on the name.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub content: Bytes,
}

/// One method per backend capability. Each call is a single
/// request/response; partial failure (nonzero failed counts in the
/// envelope) is a success at this layer.
#[async_trait]
pub trait ScreeningBackend: Send + Sync {
    async fn configure(&self, request: &ConfigureRequest) -> Result<ConfigureResponse, ClientError>;
    async fn llm_status(&self) -> Result<LlmStatusResponse, ClientError>;
    async fn llm_config(&self) -> Result<LlmConfigResponse, ClientError>;
    async fn create_session(&self) -> Result<SessionResponse, ClientError>;
    async fn close_session(&self, session_id: &str) -> Result<CloseSessionResponse, ClientError>;
    async fn upload_resumes(
        &self,
        session_id: &str,
        files: Vec<ResumeFile>,
    ) -> Result<UploadResponse, ClientError>;
    async fn candidates(&self, session_id: &str) -> Result<Vec<Candidate>, ClientError>;
    async fn analyze(
        &self,
        session_id: &str,
        request: &AnalyzeRequest,
    ) -> Result<AnalyzeResponse, ClientError>;
    async fn results(&self, session_id: &str) -> Result<Vec<AnalysisResult>, ClientError>;
    async fn top_candidates(
        &self,
        session_id: &str,
        count: u32,
    ) -> Result<Vec<AnalysisResult>, ClientError>;
}

/// Error body shape the backend uses for non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// The reqwest-backed client used in production.
#[derive(Clone)]
pub struct HttpScreeningClient {
    http: Client,
    base_url: String,
}

impl HttpScreeningClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Converts a non-success status into `ClientError::Api`, pulling
    /// the backend's `message` field out of the body when it parses.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ScreeningBackend for HttpScreeningClient {
    async fn configure(&self, request: &ConfigureRequest) -> Result<ConfigureResponse, ClientError> {
        let response = self
            .http
            .post(self.url("configure"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn llm_status(&self) -> Result<LlmStatusResponse, ClientError> {
        let response = self.http.get(self.url("llm-status")).send().await?;
        Self::read_json(response).await
    }

    async fn llm_config(&self) -> Result<LlmConfigResponse, ClientError> {
        let response = self.http.get(self.url("llm-config")).send().await?;
        Self::read_json(response).await
    }

    async fn create_session(&self) -> Result<SessionResponse, ClientError> {
        let response = self
            .http
            .post(self.url("session"))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn close_session(&self, session_id: &str) -> Result<CloseSessionResponse, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("session/{session_id}")))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn upload_resumes(
        &self,
        session_id: &str,
        files: Vec<ResumeFile>,
    ) -> Result<UploadResponse, ClientError> {
        let mut form = Form::new();
        for file in files {
            // Shared field name across all parts; the backend reads the
            // batch from the repeated "files" field.
            let part = Part::bytes(file.content.to_vec()).file_name(file.file_name);
            form = form.part("files", part);
        }

        debug!(session_id, "uploading resume batch");
        let response = self
            .http
            .post(self.url(&format!("upload/{session_id}")))
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn candidates(&self, session_id: &str) -> Result<Vec<Candidate>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("candidates/{session_id}")))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn analyze(
        &self,
        session_id: &str,
        request: &AnalyzeRequest,
    ) -> Result<AnalyzeResponse, ClientError> {
        debug!(session_id, "requesting candidate analysis");
        let response = self
            .http
            .post(self.url(&format!("analyze/{session_id}")))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn results(&self, session_id: &str) -> Result<Vec<AnalysisResult>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("results/{session_id}")))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn top_candidates(
        &self,
        session_id: &str,
        count: u32,
    ) -> Result<Vec<AnalysisResult>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("top-candidates/{session_id}")))
            .query(&[("count", count)])
            .send()
            .await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> HttpScreeningClient {
        HttpScreeningClient::new(server.url("/api/resume"))
    }

    #[tokio::test]
    async fn test_configure_posts_api_key_and_reads_outcome() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/resume/configure")
                    .json_body(json!({"apiKey": "sk-live"}));
                then.status(200).json_body(json!({
                    "success": true,
                    "message": "Configured",
                    "provider": "OpenAI",
                    "model": "gpt-4o"
                }));
            })
            .await;

        let resp = client_for(&server)
            .configure(&ConfigureRequest {
                api_key: "sk-live".to_string(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(resp.success);
        assert_eq!(resp.provider.as_deref(), Some("OpenAI"));
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/resume/configure");
                then.status(400)
                    .json_body(json!({"message": "Invalid API key"}));
            })
            .await;

        let err = client_for(&server)
            .configure(&ConfigureRequest {
                api_key: "bad".to_string(),
            })
            .await
            .unwrap_err();

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_error_body_falls_back_to_raw_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/resume/llm-status");
                then.status(502).body("bad gateway");
            })
            .await;

        let err = client_for(&server).llm_status().await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_llm_status_reads_configured_flag() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/resume/llm-status");
                then.status(200).json_body(json!({
                    "isConfigured": true,
                    "currentProvider": "Qwen",
                    "currentModel": "qwen-max"
                }));
            })
            .await;

        let status = client_for(&server).llm_status().await.unwrap();
        mock.assert_async().await;
        assert!(status.is_configured);
        assert_eq!(status.current_provider.as_deref(), Some("Qwen"));
    }

    #[tokio::test]
    async fn test_llm_config_reads_stored_provider_settings() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/resume/llm-config");
                then.status(200).json_body(json!({
                    "provider": "Gemini",
                    "model": "gemini-pro",
                    "hasApiKey": true
                }));
            })
            .await;

        let config = client_for(&server).llm_config().await.unwrap();
        mock.assert_async().await;
        assert_eq!(config.provider, "Gemini");
        assert_eq!(config.model, "gemini-pro");
        assert!(config.has_api_key);
    }

    #[tokio::test]
    async fn test_candidates_fetches_session_candidate_list() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/resume/candidates/s-9");
                then.status(200).json_body(json!([{
                    "id": "c-1",
                    "fullName": "Ada Lovelace",
                    "email": "ada@example.com",
                    "phone": "",
                    "fileName": "ada.pdf",
                    "uploadedAt": "2026-03-01T10:00:00Z",
                    "skills": [],
                    "experiences": []
                }]));
            })
            .await;

        let candidates = client_for(&server).candidates("s-9").await.unwrap();
        mock.assert_async().await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].file_name, "ada.pdf");
    }

    #[tokio::test]
    async fn test_results_fetches_session_result_list() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/resume/results/s-9");
                then.status(200).json_body(json!([{
                    "id": "r-1",
                    "candidateId": "c-1",
                    "skillsScore": 70.0,
                    "experienceScore": 80.0,
                    "educationScore": 60.0,
                    "totalScore": 72.0,
                    "aiSummary": "",
                    "strengths": "",
                    "weaknesses": "",
                    "analyzedAt": "2026-03-01T12:00:00Z"
                }]));
            })
            .await;

        let results = client_for(&server).results("s-9").await.unwrap();
        mock.assert_async().await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].candidate_id, "c-1");
    }

    #[tokio::test]
    async fn test_session_lifecycle_paths() {
        let server = MockServer::start_async().await;
        let open = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/resume/session");
                then.status(200).json_body(json!({"sessionId": "s-77"}));
            })
            .await;
        let close = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/resume/session/s-77");
                then.status(200)
                    .json_body(json!({"success": true, "message": "Session cleared"}));
            })
            .await;

        let client = client_for(&server);
        let session = client.create_session().await.unwrap();
        assert_eq!(session.session_id, "s-77");
        let closed = client.close_session(&session.session_id).await.unwrap();
        assert!(closed.success);

        open.assert_async().await;
        close.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_under_shared_field_name() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/resume/upload/s-1")
                    .body_contains("name=\"files\"")
                    .body_contains("filename=\"ada.pdf\"")
                    .body_contains("filename=\"grace.docx\"");
                then.status(200).json_body(json!({
                    "sessionId": "s-1",
                    "totalFiles": 2,
                    "successfullyUploaded": 2,
                    "failedToUpload": 0,
                    "candidates": [],
                    "errors": []
                }));
            })
            .await;

        let files = vec![
            ResumeFile {
                file_name: "ada.pdf".to_string(),
                content: Bytes::from_static(b"%PDF-1.4"),
            },
            ResumeFile {
                file_name: "grace.docx".to_string(),
                content: Bytes::from_static(b"PK"),
            },
        ];
        let resp = client_for(&server)
            .upload_resumes("s-1", files)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(resp.successfully_uploaded, 2);
    }

    #[tokio::test]
    async fn test_analyze_posts_requirement_envelope() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/resume/analyze/s-1")
                    .body_contains("\"jobRequirement\"")
                    .body_contains("\"jobTitle\":\"Backend Engineer\"");
                then.status(200).json_body(json!({
                    "sessionId": "s-1",
                    "totalCandidates": 1,
                    "successfullyAnalyzed": 1,
                    "failedToAnalyze": 0,
                    "results": [],
                    "errors": [],
                    "analyzedAt": "2026-03-01T12:00:00Z"
                }));
            })
            .await;

        let request = AnalyzeRequest {
            job_requirement: crate::models::JobRequirement {
                job_title: "Backend Engineer".to_string(),
                required_skills: vec!["Rust".to_string()],
                ..Default::default()
            },
        };
        let resp = client_for(&server).analyze("s-1", &request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(resp.successfully_analyzed, 1);
    }

    #[tokio::test]
    async fn test_top_candidates_passes_count_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/resume/top-candidates/s-1")
                    .query_param("count", "5");
                then.status(200).json_body(json!([]));
            })
            .await;

        let results = client_for(&server).top_candidates("s-1", 5).await.unwrap();
        mock.assert_async().await;
        assert!(results.is_empty());
    }
}
