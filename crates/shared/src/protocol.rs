use serde::{Deserialize, Serialize};

use crate::domain::{PolicyName, TempDocId};

pub const POLICIES_PATH: &str = "/api/policies";
pub const UPLOAD_TEMP_PATH: &str = "/api/upload-temp";
pub const ASK_PATH: &str = "/api/ask";

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoliciesResponse {
    #[serde(default)]
    pub policies: Vec<PolicyName>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadTempResponse {
    pub temp_doc_id: TempDocId,
    pub filename: String,
}

/// Body of `POST /api/ask`. At most one reference is ever set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_doc_id: Option<TempDocId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<PolicyName>,
}

impl AskRequest {
    pub fn general(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            temp_doc_id: None,
            policy_name: None,
        }
    }

    pub fn for_temp_doc(question: impl Into<String>, temp_doc_id: TempDocId) -> Self {
        Self {
            question: question.into(),
            temp_doc_id: Some(temp_doc_id),
            policy_name: None,
        }
    }

    pub fn for_policy(question: impl Into<String>, policy_name: PolicyName) -> Self {
        Self {
            question: question.into(),
            temp_doc_id: None,
            policy_name: Some(policy_name),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Retrieved snippets the answer was grounded on, when the backend reports them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
}
