use super::*;
use client_core::{session::Transcript, QueryRecord};
use shared::{domain::PolicyName, error::ApiException};

fn entry(speaker: Speaker, text: &str) -> TranscriptEntry {
    Transcript::default().push(speaker, text)
}

#[test]
fn renders_transcript_lines_per_surface() {
    assert_eq!(
        render_entry(Surface::Document, &entry(Speaker::User, "What is covered?")),
        "[doc] You: What is covered?"
    );
    assert_eq!(
        render_entry(Surface::General, &entry(Speaker::Bot, "No answer.")),
        "[general] AI: No answer."
    );
}

#[test]
fn renders_catalog_and_status_events() {
    assert_eq!(
        render_event(&ControllerEvent::CatalogUpdated(vec![
            PolicyName::new("a.pdf"),
            PolicyName::new("b.pdf"),
        ])),
        "Policies: a.pdf, b.pdf"
    );
    assert_eq!(
        render_event(&ControllerEvent::CatalogUpdated(Vec::new())),
        "No policies available yet."
    );
    assert_eq!(
        render_event(&ControllerEvent::StatusChanged("Uploaded: p.pdf".to_string())),
        "[status] Uploaded: p.pdf"
    );
}

#[test]
fn renders_alert_and_notice_events() {
    assert_eq!(
        render_event(&ControllerEvent::Alert("Choose a PDF first.".to_string())),
        "Alert: Choose a PDF first."
    );
    assert_eq!(
        render_event(&ControllerEvent::Notice("Download is off.".to_string())),
        "Notice: Download is off."
    );
}

#[test]
fn empty_stats_render_hint() {
    assert_eq!(
        render_stats(&SessionStats::default()),
        vec!["You haven't asked any questions yet.".to_string()]
    );
}

#[test]
fn stats_render_totals_then_recent_questions() {
    let recent = QueryRecord {
        at: "2024-03-01T09:30:05Z".parse().expect("timestamp"),
        context: "leave.pdf".to_string(),
        question: "How many days?".to_string(),
        answer: "25".to_string(),
    };
    let lines = render_stats(&SessionStats {
        total_questions: 1,
        unique_contexts: 1,
        recent: vec![recent],
    });

    assert_eq!(
        lines,
        vec![
            "Total questions: 1".to_string(),
            "Unique policies: 1".to_string(),
            "  09:30:05 [leave.pdf] How many days?".to_string(),
        ]
    );
}

#[test]
fn describes_server_and_validation_failures() {
    assert_eq!(
        describe_failure(&ClientError::validation("Choose a PDF first.")),
        "Choose a PDF first."
    );
    assert_eq!(
        describe_failure(&ClientError::Server(ApiException::new(404, "Policy not found"))),
        "Server error 404: Policy not found"
    );
}
