//! FFmpeg execution adapter
//!
//! Drives the `ffmpeg` binary for preview encodes and transition renders.
//! The child process is awaited to completion inside each call.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::transitions::{Clip, OUTPUT_LABEL};

/// Stderr kept in error messages
const STDERR_TAIL_CHARS: usize = 600;

/// FFmpeg-based render adapter
pub struct FFmpegAdapter {
    ffmpeg_bin: PathBuf,
    thread_count: usize,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter. `threads = None` sizes from the CPU count.
    pub fn new(ffmpeg_bin: impl Into<PathBuf>, threads: Option<usize>) -> Self {
        Self {
            ffmpeg_bin: ffmpeg_bin.into(),
            thread_count: threads.unwrap_or_else(Self::optimize_thread_count),
        }
    }

    /// 75% of the cores, at least 1 and at most 16
    fn optimize_thread_count() -> usize {
        let cpu_count = num_cpus::get();
        let optimal_threads = (cpu_count as f64 * 0.75).ceil() as usize;
        optimal_threads.clamp(1, 16)
    }

    /// Arguments for a muted preview of the first `job.duration` seconds
    pub fn preview_args(&self, job: &PreviewJob) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            job.source.to_string_lossy().to_string(),
            "-t".to_string(),
            format!("{:.3}", job.duration),
            "-an".to_string(),
            "-c:v".to_string(),
            job.codec.clone(),
            "-preset".to_string(),
            job.preset.clone(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-threads".to_string(),
            self.thread_count.to_string(),
            job.output.to_string_lossy().to_string(),
        ]
    }

    /// Arguments rendering `clip` with its effects compiled to a filter graph
    pub fn render_args(&self, clip: &Clip, output: &Path, settings: &EncodeSettings) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            clip.source.to_string_lossy().to_string(),
            "-filter_complex".to_string(),
            clip.filter_graph(),
            "-map".to_string(),
            format!("[{}]", OUTPUT_LABEL),
            "-map".to_string(),
            "0:a?".to_string(),
            "-c:v".to_string(),
            settings.codec.clone(),
            "-preset".to_string(),
            settings.preset.clone(),
            "-crf".to_string(),
            settings.crf.to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-threads".to_string(),
            self.thread_count.to_string(),
            output.to_string_lossy().to_string(),
        ]
    }

    async fn run(&self, args: Vec<String>) -> Result<(), DomainError> {
        debug!(bin = %self.ffmpeg_bin.display(), ?args, "Running ffmpeg");

        let output = Command::new(&self.ffmpeg_bin)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::ProcessingError(format!(
                    "Failed to spawn {}: {}",
                    self.ffmpeg_bin.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::ProcessingError(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr_tail(&stderr)
            )));
        }
        Ok(())
    }
}

fn stderr_tail(stderr: &str) -> &str {
    let trimmed = stderr.trim();
    let count = trimmed.chars().count();
    if count <= STDERR_TAIL_CHARS {
        return trimmed;
    }
    let skip = count - STDERR_TAIL_CHARS;
    match trimmed.char_indices().nth(skip) {
        Some((index, _)) => &trimmed[index..],
        None => trimmed,
    }
}

#[async_trait]
impl RenderPort for FFmpegAdapter {
    async fn render_preview(&self, job: &PreviewJob) -> Result<(), DomainError> {
        self.run(self.preview_args(job)).await
    }

    async fn render_clip(
        &self,
        clip: &Clip,
        output: &Path,
        settings: &EncodeSettings,
    ) -> Result<(), DomainError> {
        self.run(self.render_args(clip, output, settings)).await
    }
}
