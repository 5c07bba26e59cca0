//! Per-run session state: active document reference, policy selections and transcripts.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use shared::{
    domain::{PolicyList, PolicyName, Speaker, Surface, TempDoc},
    protocol::AskRequest,
};

use crate::error::ClientError;

pub const GENERAL_CONTEXT: &str = "General";
pub const RECENT_QUERY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Append-only log of one chat surface.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) -> TranscriptEntry {
        let entry = TranscriptEntry {
            speaker,
            text: text.into(),
            at: Utc::now(),
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    pub at: DateTime<Utc>,
    pub context: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub total_questions: usize,
    pub unique_contexts: usize,
    /// Newest first.
    pub recent: Vec<QueryRecord>,
}

/// What a document-scoped question is asked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentTarget {
    TempDoc(TempDoc),
    Policy(PolicyName),
    Unselected,
}

impl DocumentTarget {
    pub fn request(&self, question: &str) -> AskRequest {
        match self {
            Self::TempDoc(doc) => AskRequest::for_temp_doc(question, doc.id.clone()),
            Self::Policy(name) => AskRequest::for_policy(question, name.clone()),
            // A blank name is falsy on the backend, which answers it as a general question.
            Self::Unselected => AskRequest::for_policy(question, PolicyName::new("")),
        }
    }

    pub fn context_label(&self) -> String {
        match self {
            Self::TempDoc(doc) => doc.filename.clone(),
            Self::Policy(name) => name.to_string(),
            Self::Unselected => GENERAL_CONTEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    temp_doc: Option<TempDoc>,
    catalog: Vec<PolicyName>,
    library_selection: Option<PolicyName>,
    ask_selection: Option<PolicyName>,
    document_transcript: Transcript,
    general_transcript: Transcript,
    history: Vec<QueryRecord>,
    status: String,
}

impl SessionState {
    /// Replaces the catalog. Selections that are no longer listed fall back to the first name.
    pub fn set_catalog(&mut self, policies: Vec<PolicyName>) {
        self.catalog = policies;
        let first = self.catalog.first().cloned();
        for selection in [&mut self.library_selection, &mut self.ask_selection] {
            let still_listed = selection
                .as_ref()
                .is_some_and(|name| self.catalog.contains(name));
            if !still_listed {
                *selection = first.clone();
            }
        }
    }

    pub fn catalog(&self) -> &[PolicyName] {
        &self.catalog
    }

    pub fn pick(&mut self, list: PolicyList, name: &PolicyName) -> Result<(), ClientError> {
        if !self.catalog.contains(name) {
            return Err(ClientError::validation(format!("Unknown policy: {name}")));
        }
        *self.selection_mut(list) = Some(name.clone());
        Ok(())
    }

    pub fn selection(&self, list: PolicyList) -> Option<&PolicyName> {
        match list {
            PolicyList::Library => self.library_selection.as_ref(),
            PolicyList::Ask => self.ask_selection.as_ref(),
        }
    }

    fn selection_mut(&mut self, list: PolicyList) -> &mut Option<PolicyName> {
        match list {
            PolicyList::Library => &mut self.library_selection,
            PolicyList::Ask => &mut self.ask_selection,
        }
    }

    pub fn temp_doc(&self) -> Option<&TempDoc> {
        self.temp_doc.as_ref()
    }

    pub fn set_temp_doc(&mut self, doc: TempDoc) {
        self.temp_doc = Some(doc);
    }

    pub fn clear_temp_doc(&mut self) -> Option<TempDoc> {
        self.temp_doc.take()
    }

    /// The uploaded document wins over the ask-list selection.
    pub fn document_target(&self) -> DocumentTarget {
        if let Some(doc) = &self.temp_doc {
            return DocumentTarget::TempDoc(doc.clone());
        }
        match &self.ask_selection {
            Some(name) => DocumentTarget::Policy(name.clone()),
            None => DocumentTarget::Unselected,
        }
    }

    pub fn transcript(&self, surface: Surface) -> &Transcript {
        match surface {
            Surface::Document => &self.document_transcript,
            Surface::General => &self.general_transcript,
        }
    }

    pub fn transcript_mut(&mut self, surface: Surface) -> &mut Transcript {
        match surface {
            Surface::Document => &mut self.document_transcript,
            Surface::General => &mut self.general_transcript,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn record_query(
        &mut self,
        context: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) {
        self.history.push(QueryRecord {
            at: Utc::now(),
            context: context.into(),
            question: question.into(),
            answer: answer.into(),
        });
    }

    pub fn history(&self) -> &[QueryRecord] {
        &self.history
    }

    pub fn stats(&self) -> SessionStats {
        let unique_contexts = self
            .history
            .iter()
            .map(|record| record.context.as_str())
            .collect::<HashSet<_>>()
            .len();
        SessionStats {
            total_questions: self.history.len(),
            unique_contexts,
            recent: self
                .history
                .iter()
                .rev()
                .take(RECENT_QUERY_LIMIT)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
