use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use serde::de::DeserializeOwned;
use shared::{
    error::ApiException,
    protocol::{
        AskRequest, AskResponse, PoliciesResponse, UploadTempResponse, ASK_PATH, POLICIES_PATH,
        UPLOAD_FIELD, UPLOAD_TEMP_PATH,
    },
};
use tracing::debug;

pub mod controller;
pub mod error;
pub mod session;

pub use controller::{Answer, ControllerEvent, PolicyController};
pub use error::ClientError;
pub use session::{DocumentTarget, QueryRecord, SessionState, SessionStats, TranscriptEntry};

pub type Result<T> = std::result::Result<T, ClientError>;

/// A file picked for upload, already read into memory.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// The three backend endpoints the controller talks to.
#[async_trait]
pub trait PolicyApi: Send + Sync {
    async fn list_policies(&self) -> Result<PoliciesResponse>;
    async fn upload_temp(&self, upload: DocumentUpload) -> Result<UploadTempResponse>;
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse>;
}

pub struct HttpPolicyApi {
    http: Client,
    server_url: String,
}

impl HttpPolicyApi {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self { http, server_url }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }
}

async fn read_json<T: DeserializeOwned>(endpoint: &'static str, res: Response) -> Result<T> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(ApiException::from_body(status.as_u16(), &body).into());
    }
    let bytes = res.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { endpoint, source })
}

#[async_trait]
impl PolicyApi for HttpPolicyApi {
    async fn list_policies(&self) -> Result<PoliciesResponse> {
        let res = self.http.get(self.url(POLICIES_PATH)).send().await?;
        read_json(POLICIES_PATH, res).await
    }

    async fn upload_temp(&self, upload: DocumentUpload) -> Result<UploadTempResponse> {
        debug!(
            filename = %upload.filename,
            size_bytes = upload.bytes.len(),
            "uploading temp document"
        );
        let part = Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(&upload.mime_type)?;
        let form = Form::new().part(UPLOAD_FIELD, part);
        let res = self
            .http
            .post(self.url(UPLOAD_TEMP_PATH))
            .multipart(form)
            .send()
            .await?;
        read_json(UPLOAD_TEMP_PATH, res).await
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
        let res = self
            .http
            .post(self.url(ASK_PATH))
            .json(request)
            .send()
            .await?;
        read_json(ASK_PATH, res).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
