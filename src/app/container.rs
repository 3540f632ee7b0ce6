use std::sync::Arc;

use crate::adapters::toml_config::{AppConfig, PreviewConfig, ProbeBackend, SelectionConfig};
use crate::adapters::{
    FFmpegAdapter, FFprobeAdapter, FsLocalAdapter, JsonSessionStore, LocalMaterialAdapter,
    TaskDirAdapter, TracingLogAdapter,
};
use crate::app::{
    preview_interactor::{PreviewInteractor, PreviewSettings},
    selection_interactor::{SelectionInteractor, SelectionSettings},
    transition_interactor::TransitionInteractor,
};
use crate::domain::errors::DomainError;
use crate::ports::{
    FsPort, LogPort, MaterialPort, ProbePort, RenderPort, SessionStorePort, TaskDirPort,
};

pub trait AppContainer: Send + Sync {
    fn preview_interactor(&self) -> Arc<PreviewInteractor>;
    fn selection_interactor(&self) -> Arc<SelectionInteractor>;
    fn transition_interactor(&self) -> Arc<TransitionInteractor>;
    fn session_store(&self) -> Arc<dyn SessionStorePort>;
}

/// The adapters behind every port
#[derive(Clone)]
pub struct PortSet {
    pub probe: Arc<dyn ProbePort>,
    pub render: Arc<dyn RenderPort>,
    pub fs: Arc<dyn FsPort>,
    pub material: Arc<dyn MaterialPort>,
    pub sessions: Arc<dyn SessionStorePort>,
    pub log: Arc<dyn LogPort>,
}

impl From<&PreviewConfig> for PreviewSettings {
    fn from(config: &PreviewConfig) -> Self {
        Self {
            preview_dir: config.preview_dir(),
            max_duration: config.max_duration,
            stem_chars: config.stem_chars,
            codec: config.codec.clone(),
            preset: config.preset.clone(),
        }
    }
}

impl From<&SelectionConfig> for SelectionSettings {
    fn from(config: &SelectionConfig) -> Self {
        Self {
            download_audio_duration: config.download_audio_duration,
            default_selected: config.default_selected,
        }
    }
}

pub struct DefaultAppContainer {
    preview_interactor: Arc<PreviewInteractor>,
    selection_interactor: Arc<SelectionInteractor>,
    transition_interactor: Arc<TransitionInteractor>,
    session_store: Arc<dyn SessionStorePort>,
}

impl DefaultAppContainer {
    /// Wire the production adapters from configuration
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let probe_port = Self::probe_port(config)?;
        let fs_port: Arc<dyn FsPort> = Arc::new(FsLocalAdapter::new());
        let task_dirs: Arc<dyn TaskDirPort> = Arc::new(TaskDirAdapter::new(&config.storage.dir));
        let material_port: Arc<dyn MaterialPort> = Arc::new(LocalMaterialAdapter::new(
            &config.material.library_dir,
            Arc::clone(&probe_port),
            task_dirs,
            Arc::clone(&fs_port),
        ));

        let ports = PortSet {
            probe: probe_port,
            render: Arc::new(FFmpegAdapter::new(
                &config.ffmpeg.ffmpeg_bin,
                config.ffmpeg.threads,
            )),
            fs: fs_port,
            material: material_port,
            sessions: Arc::new(JsonSessionStore::new(config.storage.sessions_dir())),
            log: Arc::new(TracingLogAdapter::new("reelpick")),
        };
        Ok(Self::with_ports(ports, config))
    }

    #[cfg(feature = "libav")]
    fn probe_port(config: &AppConfig) -> Result<Arc<dyn ProbePort>, DomainError> {
        let probe: Arc<dyn ProbePort> = match config.ffmpeg.probe_backend {
            ProbeBackend::Ffprobe => Arc::new(FFprobeAdapter::new(&config.ffmpeg.ffprobe_bin)),
            ProbeBackend::Libav => Arc::new(crate::adapters::ProbeLibavAdapter::new()?),
        };
        Ok(probe)
    }

    #[cfg(not(feature = "libav"))]
    fn probe_port(config: &AppConfig) -> Result<Arc<dyn ProbePort>, DomainError> {
        match config.ffmpeg.probe_backend {
            ProbeBackend::Ffprobe => Ok(Arc::new(FFprobeAdapter::new(&config.ffmpeg.ffprobe_bin))),
            ProbeBackend::Libav => Err(DomainError::ConfigError(
                "probe_backend = \"libav\" needs a build with the `libav` feature".to_string(),
            )),
        }
    }

    /// Wire the interactors over an explicit set of ports
    pub fn with_ports(ports: PortSet, config: &AppConfig) -> Self {
        let preview_interactor = Arc::new(PreviewInteractor::new(
            Arc::clone(&ports.probe),
            Arc::clone(&ports.render),
            Arc::clone(&ports.fs),
            Arc::clone(&ports.log),
            PreviewSettings::from(&config.preview),
        ));

        let selection_interactor = Arc::new(SelectionInteractor::new(
            Arc::clone(&ports.material),
            Arc::clone(&preview_interactor),
            Arc::clone(&ports.fs),
            Arc::clone(&ports.log),
            SelectionSettings::from(&config.selection),
        ));

        let transition_interactor = Arc::new(TransitionInteractor::new(
            Arc::clone(&ports.probe),
            Arc::clone(&ports.render),
            Arc::clone(&ports.fs),
            Arc::clone(&ports.log),
            config.ffmpeg.encode_settings(),
        ));

        Self {
            preview_interactor,
            selection_interactor,
            transition_interactor,
            session_store: ports.sessions,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn preview_interactor(&self) -> Arc<PreviewInteractor> {
        Arc::clone(&self.preview_interactor)
    }

    fn selection_interactor(&self) -> Arc<SelectionInteractor> {
        Arc::clone(&self.selection_interactor)
    }

    fn transition_interactor(&self) -> Arc<TransitionInteractor> {
        Arc::clone(&self.transition_interactor)
    }

    fn session_store(&self) -> Arc<dyn SessionStorePort> {
        Arc::clone(&self.session_store)
    }
}
