//! CLI module for ReelPick
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::LogLevel;

pub mod args;
pub mod commands;

/// ReelPick clip selection and transitions
///
/// Gathers candidate clips for a task, renders short muted previews, keeps
/// the checkbox state between invocations and confirms the final selection.
#[derive(Parser, Debug)]
#[command(name = "reelpick")]
#[command(about = "ReelPick - pick clips from previews and apply transitions")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "REELPICK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Storage directory for sessions and task files
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render (or reuse) a short muted preview of a video
    Preview(args::PreviewArgs),
    /// Apply a fade or slide transition to a clip
    Transition(args::TransitionArgs),
    /// Manage clip selection sessions
    #[command(subcommand)]
    Session(args::SessionCommand),
    /// Print the effective configuration as TOML
    Config,
}
