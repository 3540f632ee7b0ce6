// Preview interactor - Short muted preview encodes, one per source

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::PreviewRules;
use crate::ports::*;

/// Where and how previews are encoded
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSettings {
    pub preview_dir: PathBuf,
    pub max_duration: f64,
    pub stem_chars: usize,
    pub codec: String,
    pub preset: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            preview_dir: std::env::temp_dir().join("video_previews"),
            max_duration: 5.0,
            stem_chars: 30,
            codec: "libx264".to_string(),
            preset: "ultrafast".to_string(),
        }
    }
}

/// Interactor for preview rendering
pub struct PreviewInteractor {
    probe_port: Arc<dyn ProbePort>,
    render_port: Arc<dyn RenderPort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
    settings: PreviewSettings,
}

impl PreviewInteractor {
    /// Create new preview interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        render_port: Arc<dyn RenderPort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
        settings: PreviewSettings,
    ) -> Self {
        Self {
            probe_port,
            render_port,
            fs_port,
            log_port,
            settings,
        }
    }

    pub fn settings(&self) -> &PreviewSettings {
        &self.settings
    }

    /// Path of the preview for `source`, existing or freshly encoded.
    /// Failures are logged and reported as `None`.
    pub async fn create_video_preview(&self, source: &Path) -> Option<PathBuf> {
        match self.try_create_preview(source).await {
            Ok(path) => Some(path),
            Err(e) => {
                self.log_port
                    .error(&format!(
                        "Failed to create preview for {}: {}",
                        source.display(),
                        e
                    ))
                    .await;
                None
            }
        }
    }

    /// Same as `create_video_preview` but keeps the error
    pub async fn try_create_preview(&self, source: &Path) -> Result<PathBuf, DomainError> {
        let file_name = PreviewRules::preview_file_name(source, self.settings.stem_chars)?;
        let output = self.settings.preview_dir.join(file_name);

        if self.fs_port.file_exists(&output).await? {
            self.log_port
                .debug(&format!("Reusing preview {}", output.display()))
                .await;
            return Ok(output);
        }

        self.fs_port
            .create_directory(&self.settings.preview_dir)
            .await?;

        let info = self.probe_port.probe_clip(source).await?;
        let duration = PreviewRules::preview_duration(info.duration, self.settings.max_duration)?;

        let job = PreviewJob {
            source: source.to_path_buf(),
            output: output.clone(),
            duration,
            codec: self.settings.codec.clone(),
            preset: self.settings.preset.clone(),
        };

        self.log_port
            .info(&format!(
                "Encoding {:.2}s preview of {} to {}",
                duration,
                source.display(),
                output.display()
            ))
            .await;

        if let Err(e) = self.render_port.render_preview(&job).await {
            // A partial file would pass the existence check next time
            if let Err(cleanup) = self.fs_port.remove_file(&output).await {
                self.log_port
                    .warn(&format!(
                        "Could not remove partial preview {}: {}",
                        output.display(),
                        cleanup
                    ))
                    .await;
            }
            return Err(e);
        }

        Ok(output)
    }
}
