// Transition interactor - Probe a clip, attach a transition, render it

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::transitions::{apply_transition, Clip};

/// Transition request
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: TransitionKind,
    pub duration: f64,
    pub side: Option<Side>,
    /// Build the filter graph without encoding
    pub dry_run: bool,
}

/// Transition response
#[derive(Debug, Clone)]
pub struct TransitionResponse {
    pub clip: Clip,
    pub filter_graph: String,
    /// `None` for dry runs
    pub output: Option<PathBuf>,
}

/// Interactor for single-clip transitions
pub struct TransitionInteractor {
    probe_port: Arc<dyn ProbePort>,
    render_port: Arc<dyn RenderPort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
    encode_settings: EncodeSettings,
}

impl TransitionInteractor {
    /// Create new transition interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        render_port: Arc<dyn RenderPort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
        encode_settings: EncodeSettings,
    ) -> Self {
        Self {
            probe_port,
            render_port,
            fs_port,
            log_port,
            encode_settings,
        }
    }

    /// Execute the transition
    pub async fn execute(&self, request: TransitionRequest) -> Result<TransitionResponse, DomainError> {
        if request.input == request.output {
            return Err(DomainError::BadArgs(
                "Output must differ from the input file".to_string(),
            ));
        }
        if !self.fs_port.file_exists(&request.input).await? {
            return Err(DomainError::FileNotFound(request.input.display().to_string()));
        }

        let info = self.probe_port.probe_clip(&request.input).await?;
        let clip = apply_transition(
            Clip::from_info(&info),
            request.kind,
            request.duration,
            request.side,
        )?;
        let filter_graph = clip.filter_graph();

        self.log_port
            .info(&format!(
                "Applying {} ({:.2}s) to {} [{}x{}, {}]",
                request.kind,
                request.duration,
                request.input.display(),
                info.width,
                info.height,
                TimeSpec::from_seconds(info.duration)
            ))
            .await;
        self.log_port
            .debug(&format!("Filter graph: {}", filter_graph))
            .await;

        if request.dry_run {
            return Ok(TransitionResponse {
                clip,
                filter_graph,
                output: None,
            });
        }

        if let Some(parent) = request.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.fs_port.create_directory(parent).await?;
        }
        self.render_port
            .render_clip(&clip, &request.output, &self.encode_settings)
            .await?;

        self.log_port
            .info(&format!("Wrote {}", request.output.display()))
            .await;
        Ok(TransitionResponse {
            clip,
            filter_graph,
            output: Some(request.output),
        })
    }
}
