//! Command implementations
//!
//! Each session command is one pass over the workflow: load the session,
//! apply the event, save it back and print the result.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::adapters::toml_config::AppConfig;
use crate::app::{
    AppContainer, SelectionEvent, SelectionInteractor, SelectionOutcome, TransitionRequest,
};
use crate::cli::args::*;
use crate::domain::errors::DomainError;
use crate::domain::model::VideoParams;
use crate::domain::session::{CellPreview, SelectionGrid, SelectionSession, SelectionState};
use crate::utils::path::display_name;

/// Snapshot printed by `session show`
#[derive(Debug, Serialize)]
pub struct SessionView<'a> {
    pub task_id: &'a str,
    pub state: SelectionState,
    pub selected: usize,
    pub total: usize,
    pub grid: &'a SelectionGrid,
}

/// Execute the preview command
pub async fn preview(container: &dyn AppContainer, args: PreviewArgs) -> Result<()> {
    let interactor = container.preview_interactor();
    info!("Preview requested for {}", args.input.display());
    match interactor.create_video_preview(&args.input).await {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => Err(anyhow::anyhow!(
            "Could not preview video {}",
            args.input.display()
        )),
    }
}

/// Execute the transition command
pub async fn transition(container: &dyn AppContainer, args: TransitionArgs) -> Result<()> {
    let request = TransitionRequest {
        input: args.input,
        output: args.output,
        kind: args.kind,
        duration: args.duration,
        side: args.side,
        dry_run: args.dry_run,
    };
    let response = container.transition_interactor().execute(request).await?;
    match response.output {
        Some(output) => println!("{}", output.display()),
        None => println!("{}", response.filter_graph),
    }
    Ok(())
}

/// Print the effective configuration
pub fn show_config(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

async fn load_session(container: &dyn AppContainer, task_id: &str) -> Result<SelectionSession> {
    container
        .session_store()
        .load(task_id)
        .await?
        .ok_or_else(|| DomainError::SessionNotFound(task_id.to_string()).into())
}

async fn save_session(container: &dyn AppContainer, session: &SelectionSession) -> Result<()> {
    container
        .session_store()
        .save(session)
        .await
        .with_context(|| format!("Failed to save session {}", session.task_id))
}

/// Load, apply one event, save. The session is saved even when the event fails.
async fn apply_event(
    container: &dyn AppContainer,
    task_id: &str,
    event: SelectionEvent,
) -> Result<(SelectionSession, SelectionOutcome)> {
    let mut session = load_session(container, task_id).await?;
    let result = container
        .selection_interactor()
        .handle(&mut session, event)
        .await;
    save_session(container, &session).await?;
    Ok((session, result?))
}

/// Execute a session subcommand
pub async fn session(
    container: &dyn AppContainer,
    config: &AppConfig,
    command: SessionCommand,
) -> Result<()> {
    match command {
        SessionCommand::Start(args) => start(container, config, args).await,
        SessionCommand::Show(args) => show(container, config, args).await,
        SessionCommand::Toggle(args) => {
            let event = SelectionEvent::Toggle {
                index: args.index - 1,
            };
            report(apply_event(container, &args.task.task, event).await?)
        }
        SessionCommand::Select(args) => {
            let event = SelectionEvent::SetSelected {
                index: args.index - 1,
                selected: true,
            };
            report(apply_event(container, &args.task.task, event).await?)
        }
        SessionCommand::Deselect(args) => {
            let event = SelectionEvent::SetSelected {
                index: args.index - 1,
                selected: false,
            };
            report(apply_event(container, &args.task.task, event).await?)
        }
        SessionCommand::SelectAll(args) => {
            report(apply_event(container, &args.task, SelectionEvent::SelectAll).await?)
        }
        SessionCommand::SelectNone(args) => {
            report(apply_event(container, &args.task, SelectionEvent::SelectNone).await?)
        }
        SessionCommand::Refresh(args) => {
            report(apply_event(container, &args.task, SelectionEvent::Refresh).await?)
        }
        SessionCommand::Reopen(args) => {
            report(apply_event(container, &args.task, SelectionEvent::Reopen).await?)
        }
        SessionCommand::Confirm(args) => {
            let (_, outcome) =
                apply_event(container, &args.task.task, SelectionEvent::Confirm).await?;
            if let SelectionOutcome::Confirmed(paths) = outcome {
                let stdout = std::io::stdout();
                write_confirmed(&mut stdout.lock(), &paths, args.json)?;
            }
            Ok(())
        }
        SessionCommand::Reset(args) => {
            if container.session_store().remove(&args.task).await? {
                println!("Removed session {}", args.task);
            } else {
                println!("No session for task: {}", args.task);
            }
            Ok(())
        }
        SessionCommand::List => list(container).await,
    }
}

async fn start(container: &dyn AppContainer, config: &AppConfig, args: StartArgs) -> Result<()> {
    let task_id = args.task.task;
    let store = container.session_store();
    let selection = container.selection_interactor();

    let mut session = store
        .load(&task_id)
        .await?
        .unwrap_or_else(|| SelectionSession::new(task_id.clone()));

    let defaults = config.material.video_params();
    let params = VideoParams {
        video_source: args.source.unwrap_or(defaults.video_source),
        video_aspect: args.aspect.unwrap_or(defaults.video_aspect),
        video_concat_mode: args.concat_mode.unwrap_or(defaults.video_concat_mode),
        video_clip_duration: args.clip_duration.unwrap_or(defaults.video_clip_duration),
    };
    let request = selection.download_request(&task_id, &args.terms, &params)?;

    let result = selection
        .handle(&mut session, SelectionEvent::Start(request))
        .await;
    save_session(container, &session).await?;
    if let SelectionOutcome::AlreadyDownloaded = result? {
        info!("Task {} already has candidates", task_id);
    }

    if !args.no_previews {
        selection.ensure_previews(&mut session).await;
        save_session(container, &session).await?;
    }

    let columns = args.columns.unwrap_or(config.selection.grid_columns);
    print_grid(&selection, &mut session, columns, false).await
}

async fn show(container: &dyn AppContainer, config: &AppConfig, args: ShowArgs) -> Result<()> {
    let selection = container.selection_interactor();
    let mut session = load_session(container, &args.task.task).await?;

    if session.has_candidates() {
        let (rendered, failed) = selection.ensure_previews(&mut session).await;
        if rendered + failed > 0 {
            save_session(container, &session).await?;
        }
    }

    let columns = args.columns.unwrap_or(config.selection.grid_columns);
    print_grid(&selection, &mut session, columns, args.json).await
}

async fn print_grid(
    selection: &SelectionInteractor,
    session: &mut SelectionSession,
    columns: usize,
    json: bool,
) -> Result<()> {
    let grid = selection.render_grid(session, columns).await?;
    let view = SessionView {
        task_id: &session.task_id,
        state: session.state,
        selected: session.selected_count(),
        total: session.entries.len(),
        grid: &grid,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
    } else {
        write_grid(&mut out, &view)?;
    }
    Ok(())
}

/// Plain-text grid: one block per row, one line per cell
pub fn write_grid(out: &mut impl Write, view: &SessionView<'_>) -> std::io::Result<()> {
    writeln!(
        out,
        "Task {} [{}] {} of {} selected",
        view.task_id,
        view.state.as_str(),
        view.selected,
        view.total
    )?;
    if view.total == 0 {
        writeln!(out, "No candidate clips yet. Run `session start` first.")?;
        return Ok(());
    }

    for (row_number, row) in view.grid.rows.iter().enumerate() {
        writeln!(out, "-- row {} --", row_number + 1)?;
        for cell in row {
            let mark = if cell.selected { "x" } else { " " };
            let preview = match &cell.preview {
                CellPreview::Ready { path, bytes_len } => {
                    format!("{} ({} bytes)", path.display(), bytes_len)
                }
                CellPreview::Pending => "preview pending".to_string(),
                CellPreview::Error { message } => message.clone(),
            };
            writeln!(
                out,
                "[{}] {:>3}. {}  {}",
                mark,
                cell.index + 1,
                display_name(&cell.path),
                preview
            )?;
        }
    }
    Ok(())
}

/// Confirmed paths, one per line or as a JSON array
pub fn write_confirmed(out: &mut impl Write, paths: &[PathBuf], json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(paths)?)?;
    } else {
        for path in paths {
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}

fn report((session, outcome): (SelectionSession, SelectionOutcome)) -> Result<()> {
    match outcome {
        SelectionOutcome::SelectionChanged {
            index, selected, ..
        } => println!(
            "Video {} {} ({} of {} selected)",
            index + 1,
            if selected { "selected" } else { "deselected" },
            session.selected_count(),
            session.entries.len()
        ),
        SelectionOutcome::AllSet { .. } => println!(
            "{} of {} selected",
            session.selected_count(),
            session.entries.len()
        ),
        SelectionOutcome::Refreshed { generation } => {
            println!("Grid refreshed (generation {})", generation)
        }
        SelectionOutcome::Reopened => println!(
            "Session {} is open for selection again",
            session.task_id
        ),
        other => println!("{:?}", other),
    }
    Ok(())
}

async fn list(container: &dyn AppContainer) -> Result<()> {
    let sessions = container.session_store().list().await?;
    if sessions.is_empty() {
        println!("No sessions");
        return Ok(());
    }
    for session in sessions {
        println!(
            "{}\t{}\t{}/{}\t{}",
            session.task_id,
            session.state.as_str(),
            session.selected_count(),
            session.entries.len(),
            session.updated_at.to_rfc3339()
        );
    }
    Ok(())
}
