//! Line commands typed at the desk prompt.

use std::path::PathBuf;

use shared::domain::{PolicyList, PolicyName, Surface};

pub const HELP: &str = "\
commands:
  upload [path]             upload a PDF and ask against it
  policies                  reload the policy library
  pick library|ask <name>   select a policy in one of the two lists
  use                       ask against the selected library policy
  ask <question>            ask about the active document or policy
  summarize                 summarize the active document or policy
  general <question>        ask the general assistant
  download                  download the selected library policy
  stats                     show questions asked this session
  faq                       build FAQs from this session's questions
  transcript doc|general    print a transcript
  help                      show this help
  quit                      exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskCommand {
    Upload { path: Option<PathBuf> },
    ListPolicies,
    Pick { list: PolicyList, name: PolicyName },
    UseLibrary,
    AskDocument { question: String },
    Summarize,
    AskGeneral { question: String },
    Download,
    Stats,
    Faq,
    Transcript { surface: Surface },
    Help,
    Quit,
}

impl DeskCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Upload { .. } => "upload",
            Self::ListPolicies => "policies",
            Self::Pick { .. } => "pick",
            Self::UseLibrary => "use",
            Self::AskDocument { .. } => "ask",
            Self::Summarize => "summarize",
            Self::AskGeneral { .. } => "general",
            Self::Download => "download",
            Self::Stats => "stats",
            Self::Faq => "faq",
            Self::Transcript { .. } => "transcript",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<DeskCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "upload" => DeskCommand::Upload {
            path: (!rest.is_empty()).then(|| PathBuf::from(rest)),
        },
        "policies" => DeskCommand::ListPolicies,
        "pick" => parse_pick(rest)?,
        "use" => DeskCommand::UseLibrary,
        // Empty questions are passed through; the controller drops them.
        "ask" => DeskCommand::AskDocument {
            question: rest.to_string(),
        },
        "summarize" => DeskCommand::Summarize,
        "general" => DeskCommand::AskGeneral {
            question: rest.to_string(),
        },
        "download" => DeskCommand::Download,
        "stats" => DeskCommand::Stats,
        "faq" => DeskCommand::Faq,
        "transcript" => DeskCommand::Transcript {
            surface: parse_surface(rest)?,
        },
        "help" | "?" => DeskCommand::Help,
        "quit" | "exit" => DeskCommand::Quit,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(Some(command))
}

fn parse_pick(rest: &str) -> Result<DeskCommand, String> {
    let Some((list, name)) = rest.split_once(char::is_whitespace) else {
        return Err("usage: pick library|ask <name>".to_string());
    };
    let list = match list.to_ascii_lowercase().as_str() {
        "library" | "lib" => PolicyList::Library,
        "ask" => PolicyList::Ask,
        other => return Err(format!("unknown list '{other}'; use 'library' or 'ask'")),
    };
    Ok(DeskCommand::Pick {
        list,
        name: PolicyName::new(name.trim()),
    })
}

fn parse_surface(rest: &str) -> Result<Surface, String> {
    match rest.to_ascii_lowercase().as_str() {
        "" | "doc" | "document" => Ok(Surface::Document),
        "general" | "gen" => Ok(Surface::General),
        other => Err(format!("unknown transcript '{other}'; use 'doc' or 'general'")),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
