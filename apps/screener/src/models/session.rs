use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseSessionResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_response_reads_contract_key() {
        let resp: SessionResponse = serde_json::from_str(r#"{"sessionId": "abc-123"}"#).unwrap();
        assert_eq!(resp.session_id, "abc-123");
    }
}
