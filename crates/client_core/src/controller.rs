//! Command handlers for the policy desk: one async method per user action.

use std::{path::Path, sync::Arc};

use shared::{
    domain::{PolicyList, PolicyName, Speaker, Surface, TempDoc},
    protocol::AskRequest,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

use crate::{
    error::ClientError,
    session::{DocumentTarget, SessionState, SessionStats, TranscriptEntry, GENERAL_CONTEXT},
    DocumentUpload, PolicyApi, Result,
};

pub const NO_ANSWER: &str = "No answer.";
pub const NO_FILE_CHOSEN: &str = "Choose a PDF first.";
pub const UPLOAD_IN_PROGRESS: &str = "Uploading and indexing…";
pub const SUMMARY_PROMPT: &str =
    "Summarize the key points and entitlements from this policy in 5 bullet points.";
pub const DOWNLOAD_UNAVAILABLE: &str = "Download is not available in this deployment. \
Open the backend policies folder directly, or extend the API to serve files.";
const FAQ_PROMPT_PREFIX: &str =
    "From these employee questions, create a list of 5 common Q&A FAQs:";
const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub enum ControllerEvent {
    CatalogUpdated(Vec<PolicyName>),
    StatusChanged(String),
    /// Rejected user input; no request was sent.
    Alert(String),
    Notice(String),
    TranscriptAppended {
        surface: Surface,
        entry: TranscriptEntry,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub surface: Surface,
    pub question: String,
    pub text: String,
    pub context: Vec<String>,
}

pub struct PolicyController {
    api: Arc<dyn PolicyApi>,
    session: Mutex<SessionState>,
    events: broadcast::Sender<ControllerEvent>,
}

impl PolicyController {
    pub fn new(api: Arc<dyn PolicyApi>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            api,
            session: Mutex::new(SessionState::default()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: ControllerEvent) {
        // No subscribers is fine; the typed results carry the same data.
        let _ = self.events.send(event);
    }

    fn set_status(&self, session: &mut SessionState, status: impl Into<String>) -> String {
        let status = status.into();
        session.set_status(status.clone());
        self.emit(ControllerEvent::StatusChanged(status.clone()));
        status
    }

    fn alert(&self, err: ClientError) -> ClientError {
        if let ClientError::Validation(message) = &err {
            self.emit(ControllerEvent::Alert(message.clone()));
        }
        err
    }

    fn append(&self, session: &mut SessionState, surface: Surface, speaker: Speaker, text: &str) {
        let entry = session.transcript_mut(surface).push(speaker, text);
        self.emit(ControllerEvent::TranscriptAppended { surface, entry });
    }

    pub async fn list_policies(&self) -> Result<Vec<PolicyName>> {
        let response = self.api.list_policies().await?;
        info!(count = response.policies.len(), "loaded policy catalog");
        let mut session = self.session.lock().await;
        session.set_catalog(response.policies.clone());
        self.emit(ControllerEvent::CatalogUpdated(response.policies.clone()));
        Ok(response.policies)
    }

    pub async fn upload_document(&self, path: Option<&Path>) -> Result<TempDoc> {
        let Some(path) = path else {
            return Err(self.alert(ClientError::validation(NO_FILE_CHOSEN)));
        };

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        {
            let mut session = self.session.lock().await;
            self.set_status(&mut session, UPLOAD_IN_PROGRESS);
        }

        let response = self
            .api
            .upload_temp(DocumentUpload {
                filename,
                mime_type,
                bytes,
            })
            .await?;
        info!(
            temp_doc_id = %response.temp_doc_id,
            filename = %response.filename,
            "uploaded temp document"
        );

        let doc = TempDoc {
            id: response.temp_doc_id,
            filename: response.filename,
        };
        let mut session = self.session.lock().await;
        session.set_temp_doc(doc.clone());
        self.set_status(&mut session, format!("Uploaded: {}", doc.filename));
        Ok(doc)
    }

    /// Changes one list's selection without touching the active document reference.
    pub async fn pick_policy(&self, list: PolicyList, name: &PolicyName) -> Result<()> {
        let mut session = self.session.lock().await;
        session.pick(list, name).map_err(|err| self.alert(err))
    }

    /// Drops the uploaded document so document questions go to the ask-list policy.
    pub async fn use_library_policy(&self) -> String {
        let mut session = self.session.lock().await;
        session.clear_temp_doc();
        let name = session
            .selection(PolicyList::Ask)
            .map(ToString::to_string)
            .unwrap_or_default();
        self.set_status(&mut session, format!("Using policy: {name}"))
    }

    pub async fn ask_document(&self, question: &str) -> Result<Option<Answer>> {
        self.exchange(Surface::Document, question).await
    }

    pub async fn summarize_document(&self) -> Result<Option<Answer>> {
        self.exchange(Surface::Document, SUMMARY_PROMPT).await
    }

    pub async fn ask_general(&self, question: &str) -> Result<Option<Answer>> {
        self.exchange(Surface::General, question).await
    }

    async fn exchange(&self, surface: Surface, question: &str) -> Result<Option<Answer>> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }

        let (request, context_label) = {
            let mut session = self.session.lock().await;
            self.append(&mut session, surface, Speaker::User, question);
            match surface {
                Surface::Document => {
                    let target = session.document_target();
                    if target == DocumentTarget::Unselected {
                        warn!("document question sent without an uploaded document or policy");
                    }
                    (target.request(question), target.context_label())
                }
                Surface::General => (
                    AskRequest::general(question),
                    GENERAL_CONTEXT.to_string(),
                ),
            }
        };

        let response = self.api.ask(&request).await?;
        let text = response
            .answer
            .filter(|answer| !answer.is_empty())
            .unwrap_or_else(|| NO_ANSWER.to_string());

        let mut session = self.session.lock().await;
        self.append(&mut session, surface, Speaker::Bot, &text);
        session.record_query(context_label, question, text.clone());

        Ok(Some(Answer {
            surface,
            question: question.to_string(),
            text,
            context: response.context,
        }))
    }

    /// Download is intentionally unavailable; returns the notice to show, if any.
    pub async fn download_from_library(&self) -> Option<&'static str> {
        let session = self.session.lock().await;
        session.selection(PolicyList::Library)?;
        self.emit(ControllerEvent::Notice(DOWNLOAD_UNAVAILABLE.to_string()));
        Some(DOWNLOAD_UNAVAILABLE)
    }

    pub async fn stats(&self) -> SessionStats {
        self.session.lock().await.stats()
    }

    /// Asks the backend to condense this session's questions into FAQs.
    pub async fn faq_digest(&self) -> Result<Option<String>> {
        let questions = {
            let session = self.session.lock().await;
            let questions = session
                .history()
                .iter()
                .map(|record| record.question.as_str())
                .collect::<Vec<_>>();
            questions.join("\n")
        };
        if questions.is_empty() {
            return Ok(None);
        }

        let prompt = format!("{FAQ_PROMPT_PREFIX}\n{questions}");
        let response = self.api.ask(&AskRequest::general(prompt)).await?;
        Ok(Some(
            response
                .answer
                .filter(|answer| !answer.is_empty())
                .unwrap_or_else(|| NO_ANSWER.to_string()),
        ))
    }

    pub async fn transcript(&self, surface: Surface) -> Vec<TranscriptEntry> {
        self.session
            .lock()
            .await
            .transcript(surface)
            .entries()
            .to_vec()
    }

    pub async fn status(&self) -> String {
        self.session.lock().await.status().to_string()
    }

    pub async fn active_temp_doc(&self) -> Option<TempDoc> {
        self.session.lock().await.temp_doc().cloned()
    }

    pub async fn selection(&self, list: PolicyList) -> Option<PolicyName> {
        self.session.lock().await.selection(list).cloned()
    }

    pub async fn catalog(&self) -> Vec<PolicyName> {
        self.session.lock().await.catalog().to_vec()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
