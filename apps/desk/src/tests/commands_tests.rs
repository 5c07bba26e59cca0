use super::*;

#[test]
fn blank_lines_are_ignored() {
    assert_eq!(parse_line(""), Ok(None));
    assert_eq!(parse_line("   \t"), Ok(None));
}

#[test]
fn upload_path_is_optional() {
    assert_eq!(
        parse_line("upload"),
        Ok(Some(DeskCommand::Upload { path: None }))
    );
    assert_eq!(
        parse_line("upload ./docs/My Policy.pdf"),
        Ok(Some(DeskCommand::Upload {
            path: Some(PathBuf::from("./docs/My Policy.pdf")),
        }))
    );
}

#[test]
fn questions_keep_inner_whitespace() {
    assert_eq!(
        parse_line("ask  What is   covered? "),
        Ok(Some(DeskCommand::AskDocument {
            question: "What is   covered?".to_string(),
        }))
    );
    assert_eq!(
        parse_line("GENERAL notice period"),
        Ok(Some(DeskCommand::AskGeneral {
            question: "notice period".to_string(),
        }))
    );
}

#[test]
fn empty_question_still_parses() {
    assert_eq!(
        parse_line("ask"),
        Ok(Some(DeskCommand::AskDocument {
            question: String::new(),
        }))
    );
}

#[test]
fn pick_targets_one_list() {
    assert_eq!(
        parse_line("pick ask dental 2023.pdf"),
        Ok(Some(DeskCommand::Pick {
            list: PolicyList::Ask,
            name: PolicyName::new("dental 2023.pdf"),
        }))
    );
    assert_eq!(
        parse_line("pick lib leave.pdf"),
        Ok(Some(DeskCommand::Pick {
            list: PolicyList::Library,
            name: PolicyName::new("leave.pdf"),
        }))
    );
    assert!(parse_line("pick ask").is_err());
    assert!(parse_line("pick shelf leave.pdf").is_err());
}

#[test]
fn transcript_defaults_to_document() {
    assert_eq!(
        parse_line("transcript"),
        Ok(Some(DeskCommand::Transcript {
            surface: Surface::Document,
        }))
    );
    assert_eq!(
        parse_line("transcript general"),
        Ok(Some(DeskCommand::Transcript {
            surface: Surface::General,
        }))
    );
    assert!(parse_line("transcript other").is_err());
}

#[test]
fn unknown_command_is_reported() {
    let err = parse_line("frobnicate now").expect_err("unknown");
    assert!(err.contains("frobnicate"));
}

#[test]
fn command_names_match_their_keywords() {
    for line in ["upload", "policies", "use", "summarize", "download", "stats", "faq", "quit"] {
        let command = parse_line(line).expect("parse").expect("command");
        assert_eq!(command.name(), line);
    }
}
