//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` with JSON output and reads the container duration and the
//! first video stream's frame size.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffprobe_bin: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(ffprobe_bin: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_bin: ffprobe_bin.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    format: Option<ProbeFormat>,
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

/// Build a `ClipInfo` from `ffprobe -print_format json` output
pub fn parse_probe_output(path: &Path, json: &str) -> Result<ClipInfo, DomainError> {
    let parsed: ProbeOutput = serde_json::from_str(json).map_err(|e| {
        DomainError::ProbeFail(format!(
            "Unreadable ffprobe output for {}: {}",
            path.display(),
            e
        ))
    })?;

    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            DomainError::ProbeFail(format!("No video stream found in {}", path.display()))
        })?;

    // Container duration first, stream duration as fallback
    let duration = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| *d > 0.0)
        .or_else(|| video.duration.as_deref().and_then(|d| d.parse::<f64>().ok()))
        .ok_or_else(|| {
            DomainError::ProbeFail(format!("Unknown duration for {}", path.display()))
        })?;

    ClipInfo::new(
        path.to_path_buf(),
        duration,
        video.width.unwrap_or(0),
        video.height.unwrap_or(0),
    )
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_clip(&self, file_path: &Path) -> Result<ClipInfo, DomainError> {
        if tokio::fs::metadata(file_path).await.is_err() {
            return Err(DomainError::FileNotFound(file_path.display().to_string()));
        }

        debug!(path = %file_path.display(), "Probing clip with ffprobe");
        let output = Command::new(&self.ffprobe_bin)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(file_path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::ProbeFail(format!(
                    "Failed to run {} for {}: {}",
                    self.ffprobe_bin.display(),
                    file_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeFail(format!(
                "ffprobe failed for {}: {}",
                file_path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_probe_output(file_path, &String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "audio", "duration": "12.000"},
            {"index": 1, "codec_type": "video", "width": 1080, "height": 1920, "duration": "11.980"}
        ],
        "format": {"filename": "clip.mp4", "duration": "12.012000"}
    }"#;

    #[test]
    fn test_parse_uses_first_video_stream() {
        let info = parse_probe_output(Path::new("clip.mp4"), SAMPLE).unwrap();
        assert_eq!((info.width, info.height), (1080, 1920));
        assert!((info.duration - 12.012).abs() < 1e-9);
    }

    #[test]
    fn test_parse_falls_back_to_stream_duration() {
        let json = r#"{"streams":[{"codec_type":"video","width":640,"height":360,"duration":"3.5"}],"format":{}}"#;
        let info = parse_probe_output(Path::new("a.webm"), json).unwrap();
        assert_eq!(info.duration, 3.5);
    }

    #[test]
    fn test_parse_rejects_audio_only() {
        let json = r#"{"streams":[{"codec_type":"audio"}],"format":{"duration":"4.0"}}"#;
        let err = parse_probe_output(Path::new("a.m4a"), json).unwrap_err();
        assert!(matches!(err, DomainError::ProbeFail(_)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_probe_output(Path::new("x.mp4"), "not json").is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let adapter = FFprobeAdapter::new("ffprobe");
        let err = adapter
            .probe_clip(Path::new("/definitely/not/here.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::FileNotFound(_)));
    }
}
