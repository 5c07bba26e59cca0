//! Text rendering of controller events and command results.

use client_core::{ClientError, ControllerEvent, SessionStats, TranscriptEntry};
use shared::domain::{Speaker, Surface};

pub fn surface_tag(surface: Surface) -> &'static str {
    match surface {
        Surface::Document => "doc",
        Surface::General => "general",
    }
}

pub fn render_entry(surface: Surface, entry: &TranscriptEntry) -> String {
    let who = match entry.speaker {
        Speaker::User => "You",
        Speaker::Bot => "AI",
    };
    format!("[{}] {who}: {}", surface_tag(surface), entry.text)
}

pub fn render_event(event: &ControllerEvent) -> String {
    match event {
        ControllerEvent::CatalogUpdated(policies) if policies.is_empty() => {
            "No policies available yet.".to_string()
        }
        ControllerEvent::CatalogUpdated(policies) => {
            let names = policies
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("Policies: {names}")
        }
        ControllerEvent::StatusChanged(status) => format!("[status] {status}"),
        ControllerEvent::Alert(message) => format!("Alert: {message}"),
        ControllerEvent::Notice(message) => format!("Notice: {message}"),
        ControllerEvent::TranscriptAppended { surface, entry } => render_entry(*surface, entry),
    }
}

pub fn render_stats(stats: &SessionStats) -> Vec<String> {
    if stats.total_questions == 0 {
        return vec!["You haven't asked any questions yet.".to_string()];
    }
    let mut lines = vec![
        format!("Total questions: {}", stats.total_questions),
        format!("Unique policies: {}", stats.unique_contexts),
    ];
    lines.extend(stats.recent.iter().map(|record| {
        format!(
            "  {} [{}] {}",
            record.at.format("%H:%M:%S"),
            record.context,
            record.question
        )
    }));
    lines
}

/// Short user-facing description of a failed command.
pub fn describe_failure(err: &ClientError) -> String {
    match err {
        ClientError::Validation(message) => message.clone(),
        ClientError::Io { .. } => format!("Could not read file: {err}"),
        ClientError::Transport(source) if source.is_connect() || source.is_timeout() => {
            "Server unreachable; check the API URL and network.".to_string()
        }
        ClientError::Transport(_) => format!("Request failed: {err}"),
        ClientError::Server(exception) => {
            format!("Server error {}: {}", exception.status, exception.message)
        }
        ClientError::Decode { .. } => format!("Unexpected server response: {err}"),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
