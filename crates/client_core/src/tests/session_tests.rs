use super::*;
use shared::domain::TempDocId;

fn names(raw: &[&str]) -> Vec<PolicyName> {
    raw.iter().map(|name| PolicyName::new(*name)).collect()
}

fn sample_doc() -> TempDoc {
    TempDoc {
        id: TempDocId::new("abc"),
        filename: "p.pdf".to_string(),
    }
}

#[test]
fn catalog_defaults_both_selections_to_first_name() {
    let mut session = SessionState::default();
    session.set_catalog(names(&["dental-2023.pdf", "leave.pdf"]));

    assert_eq!(
        session.selection(PolicyList::Library),
        Some(&PolicyName::new("dental-2023.pdf"))
    );
    assert_eq!(
        session.selection(PolicyList::Ask),
        Some(&PolicyName::new("dental-2023.pdf"))
    );
}

#[test]
fn catalog_reload_keeps_selection_that_is_still_listed() {
    let mut session = SessionState::default();
    session.set_catalog(names(&["a.pdf", "b.pdf"]));
    session
        .pick(PolicyList::Ask, &PolicyName::new("b.pdf"))
        .expect("pick");

    session.set_catalog(names(&["c.pdf", "b.pdf"]));
    assert_eq!(
        session.selection(PolicyList::Ask),
        Some(&PolicyName::new("b.pdf"))
    );
    assert_eq!(
        session.selection(PolicyList::Library),
        Some(&PolicyName::new("c.pdf"))
    );
}

#[test]
fn empty_catalog_clears_selections() {
    let mut session = SessionState::default();
    session.set_catalog(names(&["a.pdf"]));
    session.set_catalog(Vec::new());

    assert!(session.catalog().is_empty());
    assert_eq!(session.selection(PolicyList::Library), None);
    assert_eq!(session.selection(PolicyList::Ask), None);
}

#[test]
fn lists_are_selected_independently() {
    let mut session = SessionState::default();
    session.set_catalog(names(&["a.pdf", "b.pdf"]));
    session
        .pick(PolicyList::Library, &PolicyName::new("b.pdf"))
        .expect("pick");

    assert_eq!(
        session.selection(PolicyList::Library),
        Some(&PolicyName::new("b.pdf"))
    );
    assert_eq!(
        session.selection(PolicyList::Ask),
        Some(&PolicyName::new("a.pdf"))
    );
}

#[test]
fn picking_unknown_policy_is_a_validation_error() {
    let mut session = SessionState::default();
    session.set_catalog(names(&["a.pdf"]));

    let err = session
        .pick(PolicyList::Ask, &PolicyName::new("missing.pdf"))
        .expect_err("unknown policy");
    assert!(err.is_validation());
    assert_eq!(
        session.selection(PolicyList::Ask),
        Some(&PolicyName::new("a.pdf"))
    );
}

#[test]
fn temp_doc_takes_precedence_over_policy() {
    let mut session = SessionState::default();
    session.set_catalog(names(&["dental-2023"]));
    session.set_temp_doc(sample_doc());

    assert_eq!(session.document_target(), DocumentTarget::TempDoc(sample_doc()));

    session.clear_temp_doc();
    assert_eq!(
        session.document_target(),
        DocumentTarget::Policy(PolicyName::new("dental-2023"))
    );
}

#[test]
fn document_target_without_any_reference_is_unselected() {
    let session = SessionState::default();
    let target = session.document_target();

    assert_eq!(target, DocumentTarget::Unselected);
    assert_eq!(
        serde_json::to_value(target.request("hi")).expect("serialize"),
        serde_json::json!({ "question": "hi", "policy_name": "" })
    );
    assert_eq!(target.context_label(), GENERAL_CONTEXT);
}

#[test]
fn transcripts_are_independent_and_ordered() {
    let mut session = SessionState::default();
    session
        .transcript_mut(Surface::Document)
        .push(Speaker::User, "first");
    session
        .transcript_mut(Surface::Document)
        .push(Speaker::Bot, "second");
    session
        .transcript_mut(Surface::General)
        .push(Speaker::User, "other");

    let doc: Vec<_> = session
        .transcript(Surface::Document)
        .entries()
        .iter()
        .map(|entry| (entry.speaker, entry.text.as_str()))
        .collect();
    assert_eq!(doc, vec![(Speaker::User, "first"), (Speaker::Bot, "second")]);
    assert_eq!(session.transcript(Surface::General).entries().len(), 1);
}

#[test]
fn stats_count_distinct_contexts_and_list_newest_first() {
    let mut session = SessionState::default();
    session.record_query("leave.pdf", "q1", "a1");
    session.record_query(GENERAL_CONTEXT, "q2", "a2");
    session.record_query("leave.pdf", "q3", "a3");

    let stats = session.stats();
    assert_eq!(stats.total_questions, 3);
    assert_eq!(stats.unique_contexts, 2);
    let recent: Vec<_> = stats.recent.iter().map(|r| r.question.as_str()).collect();
    assert_eq!(recent, vec!["q3", "q2", "q1"]);
}

#[test]
fn stats_keep_only_recent_window() {
    let mut session = SessionState::default();
    for i in 0..(RECENT_QUERY_LIMIT + 5) {
        session.record_query(GENERAL_CONTEXT, format!("q{i}"), "a");
    }

    let stats = session.stats();
    assert_eq!(stats.total_questions, RECENT_QUERY_LIMIT + 5);
    assert_eq!(stats.recent.len(), RECENT_QUERY_LIMIT);
    assert_eq!(stats.recent[0].question, format!("q{}", RECENT_QUERY_LIMIT + 4));
}
