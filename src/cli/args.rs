//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, Subcommand};
use clap_num::number_range;

use crate::domain::model::{ConcatMode, Side, TimeSpec, TransitionKind, VideoAspect, VideoSource};

/// Seconds as a plain number, MM:SS.ms or HH:MM:SS.ms, strictly positive
fn parse_seconds(s: &str) -> Result<f64, String> {
    let seconds = TimeSpec::parse(s).map_err(|e| e.to_string())?.seconds;
    if seconds <= 0.0 {
        return Err("must be greater than zero".to_string());
    }
    Ok(seconds)
}

fn parse_columns(s: &str) -> Result<usize, String> {
    number_range(s, 1, 12)
}

fn parse_index(s: &str) -> Result<usize, String> {
    number_range(s, 1, 100_000)
}

/// Arguments for the preview command
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Longest preview in seconds (default from config)
    #[arg(long, value_parser = parse_seconds)]
    pub max_duration: Option<f64>,
}

/// Arguments for the transition command
#[derive(Args, Debug)]
pub struct TransitionArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path
    #[arg(short, long)]
    pub output: PathBuf,

    /// fade-in, fade-out, slide-in or slide-out
    #[arg(short, long)]
    pub kind: TransitionKind,

    /// Transition length (seconds, MM:SS.ms or HH:MM:SS.ms)
    #[arg(short, long, value_parser = parse_seconds)]
    pub duration: f64,

    /// Screen edge for slides: left, right, top or bottom
    #[arg(short, long)]
    pub side: Option<Side>,

    /// Print the FFmpeg filter graph without encoding
    #[arg(long)]
    pub dry_run: bool,
}

/// Task selector shared by session commands
#[derive(Args, Debug)]
pub struct TaskArgs {
    /// Task identifier (letters, digits, '-' and '_')
    #[arg(short, long)]
    pub task: String,
}

/// Arguments for `session start`
#[derive(Args, Debug)]
pub struct StartArgs {
    #[command(flatten)]
    pub task: TaskArgs,

    /// Comma separated search terms
    #[arg(long, value_delimiter = ',')]
    pub terms: Vec<String>,

    /// pexels, pixabay or local
    #[arg(long)]
    pub source: Option<VideoSource>,

    /// 9:16, 16:9 or 1:1
    #[arg(long)]
    pub aspect: Option<VideoAspect>,

    /// random or sequential
    #[arg(long)]
    pub concat_mode: Option<ConcatMode>,

    /// Longest usable seconds per clip
    #[arg(long, value_parser = parse_seconds)]
    pub clip_duration: Option<f64>,

    /// Only download, render previews on the next `show`
    #[arg(long)]
    pub no_previews: bool,

    /// Cells per grid row (default from config)
    #[arg(long, value_parser = parse_columns)]
    pub columns: Option<usize>,
}

/// Arguments for `session show`
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub task: TaskArgs,

    /// Cells per grid row (default from config)
    #[arg(long, value_parser = parse_columns)]
    pub columns: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments addressing one candidate
#[derive(Args, Debug)]
pub struct IndexArgs {
    #[command(flatten)]
    pub task: TaskArgs,

    /// Candidate number as shown in the grid, starting at 1
    #[arg(short, long, value_parser = parse_index)]
    pub index: usize,
}

/// Arguments for `session confirm`
#[derive(Args, Debug)]
pub struct ConfirmArgs {
    #[command(flatten)]
    pub task: TaskArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Session subcommands
#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Gather candidate clips for a task (once) and render previews
    Start(StartArgs),
    /// Show the selection grid
    Show(ShowArgs),
    /// Flip one checkbox
    Toggle(IndexArgs),
    /// Check one candidate
    Select(IndexArgs),
    /// Uncheck one candidate
    Deselect(IndexArgs),
    /// Check every candidate
    SelectAll(TaskArgs),
    /// Uncheck every candidate
    SelectNone(TaskArgs),
    /// Rebuild the grid on the next show
    Refresh(TaskArgs),
    /// Confirm the checked candidates and print their paths
    Confirm(ConfirmArgs),
    /// Go back from confirmed to selecting
    Reopen(TaskArgs),
    /// Delete the session
    Reset(TaskArgs),
    /// List stored sessions
    List,
}
