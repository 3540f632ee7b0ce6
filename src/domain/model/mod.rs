// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Time specification in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Parse time string: plain seconds, MM:SS.ms or HH:MM:SS.ms
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        if let Ok(seconds) = trimmed.parse::<f64>() {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(DomainError::BadArgs(format!(
                    "Time must be a non-negative number: {}",
                    trimmed
                )));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let (hours, minutes, seconds_part) = match parts.as_slice() {
            [m, s] => (0, Self::parse_unit(m, "minutes")?, Self::parse_seconds(s)?),
            [h, m, s] => {
                let minutes = Self::parse_unit(m, "minutes")?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs(
                        "Minutes must be less than 60".to_string(),
                    ));
                }
                (Self::parse_unit(h, "hours")?, minutes, Self::parse_seconds(s)?)
            }
            _ => {
                return Err(DomainError::BadArgs(
                    "Invalid time format. Supported formats: seconds (e.g., 1.5), MM:SS.ms (e.g., 0:01.5), HH:MM:SS.ms".to_string(),
                ))
            }
        };

        Ok(Self::from_seconds(
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds_part,
        ))
    }

    fn parse_unit(part: &str, name: &str) -> Result<u32, DomainError> {
        part.parse::<u32>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid {} format", name)))
    }

    fn parse_seconds(part: &str) -> Result<f64, DomainError> {
        let seconds = part
            .parse::<f64>()
            .map_err(|_| DomainError::BadArgs("Invalid seconds format".to_string()))?;
        if !(0.0..60.0).contains(&seconds) {
            return Err(DomainError::BadArgs(
                "Seconds must be between 0 and 60".to_string(),
            ));
        }
        Ok(seconds)
    }

    /// Format as [H:]MM:SS.mmm
    pub fn format_hms(&self) -> String {
        let total_ms = (self.seconds * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let seconds = (total_ms % 60_000) / 1000;
        let milliseconds = total_ms % 1000;

        if hours > 0 {
            format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

/// What the probe knows about a source clip
#[derive(Debug, Clone, PartialEq)]
pub struct ClipInfo {
    pub path: PathBuf,
    pub duration: f64,
    pub width: u32,
    pub height: u32,
}

impl ClipInfo {
    /// Create clip info with validation
    pub fn new(path: PathBuf, duration: f64, width: u32, height: u32) -> Result<Self, DomainError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(DomainError::ProbeFail(format!(
                "{}: duration must be positive, got {}",
                path.display(),
                duration
            )));
        }
        if width == 0 || height == 0 {
            return Err(DomainError::ProbeFail(format!(
                "{}: video dimensions cannot be zero",
                path.display()
            )));
        }
        Ok(Self {
            path,
            duration,
            width,
            height,
        })
    }
}

/// Screen edge a slide transition enters from or exits to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Whether movement along this side is horizontal
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }
}

impl FromStr for Side {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            "top" => Ok(Side::Top),
            "bottom" => Ok(Side::Bottom),
            other => Err(DomainError::BadArgs(format!(
                "Invalid side: {}. Valid sides: left, right, top, bottom",
                other
            ))),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four supported transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionKind {
    FadeIn,
    FadeOut,
    SlideIn,
    SlideOut,
}

impl TransitionKind {
    /// Slides need a side, fades ignore it
    pub fn needs_side(self) -> bool {
        matches!(self, TransitionKind::SlideIn | TransitionKind::SlideOut)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransitionKind::FadeIn => "fade-in",
            TransitionKind::FadeOut => "fade-out",
            TransitionKind::SlideIn => "slide-in",
            TransitionKind::SlideOut => "slide-out",
        }
    }
}

impl FromStr for TransitionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "fade-in" | "fadein" => Ok(TransitionKind::FadeIn),
            "fade-out" | "fadeout" => Ok(TransitionKind::FadeOut),
            "slide-in" | "slidein" => Ok(TransitionKind::SlideIn),
            "slide-out" | "slideout" => Ok(TransitionKind::SlideOut),
            other => Err(DomainError::BadArgs(format!(
                "Invalid transition: {}. Valid transitions: fade-in, fade-out, slide-in, slide-out",
                other
            ))),
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where candidate clips come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoSource {
    Pexels,
    Pixabay,
    Local,
}

impl FromStr for VideoSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pexels" => Ok(VideoSource::Pexels),
            "pixabay" => Ok(VideoSource::Pixabay),
            "local" => Ok(VideoSource::Local),
            other => Err(DomainError::BadArgs(format!(
                "Invalid video source: {}. Valid sources: pexels, pixabay, local",
                other
            ))),
        }
    }
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VideoSource::Pexels => "pexels",
            VideoSource::Pixabay => "pixabay",
            VideoSource::Local => "local",
        };
        f.write_str(name)
    }
}

/// Output aspect ratio requested from the material collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoAspect {
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "1:1")]
    Square,
}

impl VideoAspect {
    /// Canonical frame size for the aspect
    pub fn resolution(self) -> (u32, u32) {
        match self {
            VideoAspect::Portrait => (1080, 1920),
            VideoAspect::Landscape => (1920, 1080),
            VideoAspect::Square => (1080, 1080),
        }
    }
}

impl FromStr for VideoAspect {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "9:16" | "portrait" => Ok(VideoAspect::Portrait),
            "16:9" | "landscape" => Ok(VideoAspect::Landscape),
            "1:1" | "square" => Ok(VideoAspect::Square),
            other => Err(DomainError::BadArgs(format!(
                "Invalid aspect: {}. Valid aspects: 9:16, 16:9, 1:1",
                other
            ))),
        }
    }
}

impl fmt::Display for VideoAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ratio = match self {
            VideoAspect::Portrait => "9:16",
            VideoAspect::Landscape => "16:9",
            VideoAspect::Square => "1:1",
        };
        f.write_str(ratio)
    }
}

/// How downloaded clips are ordered for later concatenation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcatMode {
    Random,
    Sequential,
}

impl FromStr for ConcatMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(ConcatMode::Random),
            "sequential" => Ok(ConcatMode::Sequential),
            other => Err(DomainError::BadArgs(format!(
                "Invalid concat mode: {}. Valid modes: random, sequential",
                other
            ))),
        }
    }
}

/// User-facing video parameters relevant to clip gathering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoParams {
    pub video_source: VideoSource,
    pub video_aspect: VideoAspect,
    pub video_concat_mode: ConcatMode,
    pub video_clip_duration: f64,
}

impl Default for VideoParams {
    fn default() -> Self {
        Self {
            video_source: VideoSource::Local,
            video_aspect: VideoAspect::Portrait,
            video_concat_mode: ConcatMode::Random,
            video_clip_duration: 5.0,
        }
    }
}

impl VideoParams {
    /// Validate the numeric parameters
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.video_clip_duration.is_finite() || self.video_clip_duration <= 0.0 {
            return Err(DomainError::BadArgs(
                "Clip duration must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything the material collaborator needs for one batch
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRequest {
    pub task_id: String,
    pub search_terms: Vec<String>,
    pub source: VideoSource,
    pub aspect: VideoAspect,
    pub concat_mode: ConcatMode,
    pub audio_duration: f64,
    pub max_clip_duration: f64,
}

/// A single preview encode
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewJob {
    pub source: PathBuf,
    pub output: PathBuf,
    pub duration: f64,
    pub codec: String,
    pub preset: String,
}

/// Encoder settings for full clip renders
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSettings {
    pub codec: String,
    pub preset: String,
    pub crf: u8,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            codec: "libx264".to_string(),
            preset: "medium".to_string(),
            crf: 23,
        }
    }
}
