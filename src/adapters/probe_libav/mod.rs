// Probe LibAV adapter - In-process media probing through ffmpeg-next

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ffmpeg_next::media::Type;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// LibAV-based media probing adapter
pub struct ProbeLibavAdapter;

impl ProbeLibavAdapter {
    /// Create new LibAV probing adapter
    pub fn new() -> Result<Self, DomainError> {
        ffmpeg_next::init()
            .map_err(|e| DomainError::ProbeFail(format!("Failed to initialize libav: {}", e)))?;
        Ok(Self)
    }

    fn probe_blocking(path: PathBuf) -> Result<ClipInfo, DomainError> {
        let fail = |e: ffmpeg_next::Error| {
            DomainError::ProbeFail(format!("{}: {}", path.display(), e))
        };

        // The input context is dropped at the end of this scope
        let input_ctx = ffmpeg_next::format::input(&path).map_err(fail)?;
        let stream = input_ctx.streams().best(Type::Video).ok_or_else(|| {
            DomainError::ProbeFail(format!("No video stream found in {}", path.display()))
        })?;

        let decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
            .map_err(fail)?
            .decoder()
            .video()
            .map_err(fail)?;

        let mut duration = input_ctx.duration() as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE);
        if duration <= 0.0 {
            let time_base = stream.time_base();
            duration = stream.duration() as f64 * f64::from(time_base.numerator())
                / f64::from(time_base.denominator());
        }

        ClipInfo::new(path.clone(), duration, decoder.width(), decoder.height())
    }
}

#[async_trait]
impl ProbePort for ProbeLibavAdapter {
    async fn probe_clip(&self, file_path: &Path) -> Result<ClipInfo, DomainError> {
        if !file_path.is_file() {
            return Err(DomainError::FileNotFound(file_path.display().to_string()));
        }
        let path = file_path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::probe_blocking(path))
            .await
            .map_err(|e| DomainError::InternalError(format!("Probe task failed: {}", e)))?
    }
}
