//! Runs desk commands against the controller, one task per command.

use std::sync::Arc;

use client_core::PolicyController;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::{
    commands::DeskCommand,
    render::{describe_failure, render_entry, render_stats},
};

/// Spawns the command so the prompt stays responsive. Completions print in whatever order they finish.
pub fn dispatch(
    tasks: &mut JoinSet<()>,
    controller: Arc<PolicyController>,
    command: DeskCommand,
    show_context: bool,
) {
    debug!(command = command.name(), "dispatching desk command");
    tasks.spawn(async move {
        for line in execute(&controller, command, show_context).await {
            println!("{line}");
        }
    });
}

/// Waits for every dispatched command; accepted commands are never dropped on exit.
pub async fn drain(tasks: &mut JoinSet<()>) {
    if !tasks.is_empty() {
        debug!(pending = tasks.len(), "waiting for in-flight commands");
    }
    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined {
            error!(error = %err, "desk command task failed");
        }
    }
}

/// Returns lines to print beyond those the controller's events already render.
pub async fn execute(
    controller: &PolicyController,
    command: DeskCommand,
    show_context: bool,
) -> Vec<String> {
    let command_name = command.name();
    let result = match command {
        DeskCommand::Upload { path } => controller
            .upload_document(path.as_deref())
            .await
            .map(|_| Vec::new()),
        DeskCommand::ListPolicies => controller.list_policies().await.map(|_| Vec::new()),
        DeskCommand::Pick { list, name } => controller
            .pick_policy(list, &name)
            .await
            .map(|_| Vec::new()),
        DeskCommand::UseLibrary => {
            controller.use_library_policy().await;
            Ok(Vec::new())
        }
        DeskCommand::AskDocument { question } => {
            answer_lines(controller.ask_document(&question).await, show_context)
        }
        DeskCommand::Summarize => {
            answer_lines(controller.summarize_document().await, show_context)
        }
        DeskCommand::AskGeneral { question } => {
            answer_lines(controller.ask_general(&question).await, show_context)
        }
        DeskCommand::Download => {
            controller.download_from_library().await;
            Ok(Vec::new())
        }
        DeskCommand::Stats => Ok(render_stats(&controller.stats().await)),
        DeskCommand::Faq => controller.faq_digest().await.map(|digest| match digest {
            Some(text) => vec![text],
            None => vec!["No data yet; start asking questions!".to_string()],
        }),
        DeskCommand::Transcript { surface } => Ok(controller
            .transcript(surface)
            .await
            .iter()
            .map(|entry| render_entry(surface, entry))
            .collect()),
        DeskCommand::Help | DeskCommand::Quit => Ok(Vec::new()),
    };

    match result {
        Ok(lines) => lines,
        // Rendered from the controller's alert event.
        Err(err) if err.is_validation() => Vec::new(),
        Err(err) => {
            error!(command = command_name, error = %err, "desk command failed");
            vec![format!("Error: {}", describe_failure(&err))]
        }
    }
}

fn answer_lines(
    result: client_core::Result<Option<client_core::Answer>>,
    show_context: bool,
) -> client_core::Result<Vec<String>> {
    let Some(answer) = result? else {
        return Ok(Vec::new());
    };
    if !show_context {
        return Ok(Vec::new());
    }
    Ok(answer
        .context
        .iter()
        .map(|snippet| format!("  context: {snippet}"))
        .collect())
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
