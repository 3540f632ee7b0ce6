// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::error::{ReelPickError, ReelPickResult};
use crate::utils::logging::LoggingConfig;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "reelpick.toml";

/// Where sessions and per-task files live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("storage"),
        }
    }
}

impl StorageConfig {
    pub fn sessions_dir(&self) -> PathBuf {
        self.dir.join("sessions")
    }
}

/// Preview encode settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Subdirectory of the temp root holding previews
    pub dir_name: String,
    /// Temp root, the system temp directory when unset
    pub temp_root: Option<PathBuf>,
    pub max_duration: f64,
    /// Characters of the source stem kept in the preview name
    pub stem_chars: usize,
    pub codec: String,
    pub preset: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            dir_name: "video_previews".to_string(),
            temp_root: None,
            max_duration: 5.0,
            stem_chars: 30,
            codec: "libx264".to_string(),
            preset: "ultrafast".to_string(),
        }
    }
}

impl PreviewConfig {
    pub fn preview_dir(&self) -> PathBuf {
        self.temp_root
            .clone()
            .unwrap_or_else(std::env::temp_dir)
            .join(&self.dir_name)
    }
}

/// Selection workflow settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub grid_columns: usize,
    /// Target seconds of material requested per download
    pub download_audio_duration: f64,
    pub default_selected: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            grid_columns: 3,
            download_audio_duration: 300.0,
            default_selected: true,
        }
    }
}

/// Probe implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeBackend {
    Ffprobe,
    Libav,
}

/// External tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfmpegConfig {
    pub ffmpeg_bin: PathBuf,
    pub ffprobe_bin: PathBuf,
    /// Encoder threads, sized from the CPU count when unset
    pub threads: Option<usize>,
    pub probe_backend: ProbeBackend,
    pub codec: String,
    pub preset: String,
    pub crf: u8,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        let encode = EncodeSettings::default();
        Self {
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            ffprobe_bin: PathBuf::from("ffprobe"),
            threads: None,
            probe_backend: ProbeBackend::Ffprobe,
            codec: encode.codec,
            preset: encode.preset,
            crf: encode.crf,
        }
    }
}

impl FfmpegConfig {
    pub fn encode_settings(&self) -> EncodeSettings {
        EncodeSettings {
            codec: self.codec.clone(),
            preset: self.preset.clone(),
            crf: self.crf,
        }
    }
}

/// Material library and default video params
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub library_dir: PathBuf,
    pub source: VideoSource,
    pub aspect: VideoAspect,
    pub concat_mode: ConcatMode,
    pub clip_duration: f64,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        let params = VideoParams::default();
        Self {
            library_dir: PathBuf::from("material"),
            source: params.video_source,
            aspect: params.video_aspect,
            concat_mode: params.video_concat_mode,
            clip_duration: params.video_clip_duration,
        }
    }
}

impl MaterialConfig {
    pub fn video_params(&self) -> VideoParams {
        VideoParams {
            video_source: self.source,
            video_aspect: self.aspect,
            video_concat_mode: self.concat_mode,
            video_clip_duration: self.clip_duration,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub preview: PreviewConfig,
    pub selection: SelectionConfig,
    pub ffmpeg: FfmpegConfig,
    pub material: MaterialConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parse TOML text. `origin` names the source in error messages.
    pub fn parse_str(content: &str, origin: &str) -> ReelPickResult<Self> {
        toml::from_str(content).map_err(|e| ReelPickError::ConfigParse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a TOML file; missing keys keep their defaults
    pub fn load_file(path: &Path) -> ReelPickResult<Self> {
        debug!(path = %path.display(), "Loading configuration file");
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(&content, &path.display().to_string())
    }

    pub fn to_toml_string(&self) -> ReelPickResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values no component can work with
    pub fn validate(&self) -> Result<(), DomainError> {
        let positive = |value: f64, name: &str| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(DomainError::ConfigError(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        };
        positive(self.preview.max_duration, "preview.max_duration")?;
        positive(
            self.selection.download_audio_duration,
            "selection.download_audio_duration",
        )?;
        positive(self.material.clip_duration, "material.clip_duration")?;

        if self.selection.grid_columns == 0 {
            return Err(DomainError::ConfigError(
                "selection.grid_columns must be at least 1".to_string(),
            ));
        }
        if self.preview.stem_chars == 0 || self.preview.dir_name.trim().is_empty() {
            return Err(DomainError::ConfigError(
                "preview.dir_name and preview.stem_chars must not be empty".to_string(),
            ));
        }
        if self.ffmpeg.ffmpeg_bin.as_os_str().is_empty()
            || self.ffmpeg.ffprobe_bin.as_os_str().is_empty()
        {
            return Err(DomainError::ConfigError(
                "ffmpeg.ffmpeg_bin and ffmpeg.ffprobe_bin must not be empty".to_string(),
            ));
        }
        if self.ffmpeg.crf > 51 {
            return Err(DomainError::ConfigError(format!(
                "ffmpeg.crf must be 0-51, got {}",
                self.ffmpeg.crf
            )));
        }
        if self.ffmpeg.threads == Some(0) {
            return Err(DomainError::ConfigError(
                "ffmpeg.threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::logging::LogLevel;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.preview.dir_name, "video_previews");
        assert_eq!(config.preview.max_duration, 5.0);
        assert_eq!(config.preview.stem_chars, 30);
        assert_eq!(config.preview.preset, "ultrafast");
        assert_eq!(config.selection.grid_columns, 3);
        assert_eq!(config.selection.download_audio_duration, 300.0);
        assert_eq!(config.ffmpeg.probe_backend, ProbeBackend::Ffprobe);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::parse_str(
            r#"
            [selection]
            grid_columns = 4

            [material]
            library_dir = "/srv/clips"
            concat_mode = "sequential"

            [logging]
            level = "debug"
            "#,
            "inline",
        )
        .unwrap();
        assert_eq!(config.selection.grid_columns, 4);
        assert!(config.selection.default_selected);
        assert_eq!(config.material.library_dir, PathBuf::from("/srv/clips"));
        assert_eq!(config.material.concat_mode, ConcatMode::Sequential);
        assert_eq!(config.material.aspect, VideoAspect::Portrait);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = AppConfig::parse_str("[preview]\nmax_duration = \"long\"", "bad.toml").unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.selection.grid_columns = 0;
        assert!(matches!(config.validate(), Err(DomainError::ConfigError(_))));

        let mut config = AppConfig::default();
        config.preview.max_duration = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ffmpeg.ffmpeg_bin = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let mut config = AppConfig::default();
        config.preview.temp_root = Some(PathBuf::from("/var/tmp"));
        let text = config.to_toml_string().unwrap();
        assert_eq!(AppConfig::parse_str(&text, "generated").unwrap(), config);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ffmpeg]\nffmpeg_bin = \"/opt/ffmpeg\"").unwrap();
        let config = AppConfig::load_file(file.path()).unwrap();
        assert_eq!(config.ffmpeg.ffmpeg_bin, PathBuf::from("/opt/ffmpeg"));
        assert!(AppConfig::load_file(Path::new("/missing/reelpick.toml")).is_err());
    }

    #[test]
    fn test_preview_dir_under_temp_root() {
        let mut preview = PreviewConfig::default();
        preview.temp_root = Some(PathBuf::from("/scratch"));
        assert_eq!(preview.preview_dir(), PathBuf::from("/scratch/video_previews"));
    }
}
