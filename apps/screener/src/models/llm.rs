use serde::{Deserialize, Serialize};

/// Language-model providers the backend can be configured with.
/// Status/config responses carry the display name, not the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Gemini,
    Qwen,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LlmProvider::OpenAi => "OpenAI",
            LlmProvider::Gemini => "Gemini",
            LlmProvider::Qwen => "Qwen",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureRequest {
    pub api_key: String,
}

/// Outcome of a provider-configuration attempt. `provider`/`model`
/// are populated only on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmStatusResponse {
    pub is_configured: bool,
    #[serde(default)]
    pub current_provider: Option<String>,
    #[serde(default)]
    pub current_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfigResponse {
    pub provider: String,
    pub model: String,
    pub has_api_key: bool,
}
