//! In-memory port doubles shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use reelpick_cli::adapters::FsLocalAdapter;
use reelpick_cli::app::{
    PreviewInteractor, PreviewSettings, SelectionInteractor, SelectionSettings,
};
use reelpick_cli::ports::*;
use reelpick_cli::transitions::Clip;
use reelpick_cli::*;

/// Probe answering from a duration table; unknown paths fail
#[derive(Default)]
pub struct MockProbe {
    durations: Mutex<HashMap<PathBuf, f64>>,
    pub calls: AtomicUsize,
}

impl MockProbe {
    pub fn with(entries: &[(&Path, f64)]) -> Self {
        let probe = Self::default();
        for (path, duration) in entries {
            probe.set(path, *duration);
        }
        probe
    }

    pub fn set(&self, path: &Path, duration: f64) {
        self.durations
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), duration);
    }
}

#[async_trait]
impl ProbePort for MockProbe {
    async fn probe_clip(&self, file_path: &Path) -> Result<ClipInfo, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let duration = self
            .durations
            .lock()
            .unwrap()
            .get(file_path)
            .copied()
            .ok_or_else(|| DomainError::ProbeFail(format!("corrupt: {}", file_path.display())))?;
        ClipInfo::new(file_path.to_path_buf(), duration, 1280, 720)
    }
}

/// Renderer writing a small placeholder file, or failing for chosen sources
#[derive(Default)]
pub struct MockRender {
    pub previews: Mutex<Vec<PreviewJob>>,
    pub clips: Mutex<Vec<(Clip, PathBuf)>>,
    pub failing: Mutex<HashSet<PathBuf>>,
    /// Write a partial file before failing
    pub leave_partial: bool,
}

impl MockRender {
    pub fn fail_for(&self, source: &Path) {
        self.failing.lock().unwrap().insert(source.to_path_buf());
    }

    pub fn preview_count(&self) -> usize {
        self.previews.lock().unwrap().len()
    }
}

#[async_trait]
impl RenderPort for MockRender {
    async fn render_preview(&self, job: &PreviewJob) -> Result<(), DomainError> {
        self.previews.lock().unwrap().push(job.clone());
        if self.failing.lock().unwrap().contains(&job.source) {
            if self.leave_partial {
                std::fs::write(&job.output, b"partial").unwrap();
            }
            return Err(DomainError::ProcessingError("encoder crashed".to_string()));
        }
        std::fs::write(&job.output, b"preview-bytes").unwrap();
        Ok(())
    }

    async fn render_clip(
        &self,
        clip: &Clip,
        output: &Path,
        _settings: &EncodeSettings,
    ) -> Result<(), DomainError> {
        self.clips
            .lock()
            .unwrap()
            .push((clip.clone(), output.to_path_buf()));
        std::fs::write(output, b"rendered").unwrap();
        Ok(())
    }
}

/// Material collaborator returning a fixed list
pub struct MockMaterial {
    pub paths: Mutex<Vec<PathBuf>>,
    pub fail: Mutex<bool>,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<DownloadRequest>>,
}

impl MockMaterial {
    pub fn returning(paths: Vec<PathBuf>) -> Self {
        Self {
            paths: Mutex::new(paths),
            fail: Mutex::new(false),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MaterialPort for MockMaterial {
    async fn download_videos(&self, request: &DownloadRequest) -> Result<Vec<PathBuf>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if *self.fail.lock().unwrap() {
            return Err(DomainError::ProcessingError("network down".to_string()));
        }
        Ok(self.paths.lock().unwrap().clone())
    }
}

/// Session store kept in memory, serialized like the JSON store
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl SessionStorePort for MemorySessionStore {
    async fn load(&self, task_id: &str) -> Result<Option<SelectionSession>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(task_id)
            .map(|raw| serde_json::from_str(raw).unwrap()))
    }

    async fn save(&self, session: &SelectionSession) -> Result<(), DomainError> {
        let raw = serde_json::to_string(session).unwrap();
        self.sessions
            .lock()
            .unwrap()
            .insert(session.task_id.clone(), raw);
        Ok(())
    }

    async fn remove(&self, task_id: &str) -> Result<bool, DomainError> {
        Ok(self.sessions.lock().unwrap().remove(task_id).is_some())
    }

    async fn list(&self) -> Result<Vec<SelectionSession>, DomainError> {
        let mut sessions: Vec<SelectionSession> = self
            .sessions
            .lock()
            .unwrap()
            .values()
            .map(|raw| serde_json::from_str(raw).unwrap())
            .collect();
        sessions.sort_by(|a, b| a.task_id.cmp(&b.task_id));
        Ok(sessions)
    }
}

/// Log port recording every message
#[derive(Default)]
pub struct RecordingLog {
    pub lines: Mutex<Vec<(String, String)>>,
}

impl RecordingLog {
    pub fn errors(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| level == "error")
            .map(|(_, message)| message.clone())
            .collect()
    }

    fn push(&self, level: &str, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((level.to_string(), message.to_string()));
    }
}

#[async_trait]
impl LogPort for RecordingLog {
    async fn info(&self, message: &str) {
        self.push("info", message);
    }

    async fn warn(&self, message: &str) {
        self.push("warn", message);
    }

    async fn error(&self, message: &str) {
        self.push("error", message);
    }

    async fn debug(&self, message: &str) {
        self.push("debug", message);
    }
}

/// Source clips on disk plus a preview directory, all under one temp dir
pub struct Fixture {
    pub dir: TempDir,
    pub probe: Arc<MockProbe>,
    pub render: Arc<MockRender>,
    pub log: Arc<RecordingLog>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_render(MockRender::default())
    }

    pub fn with_render(render: MockRender) -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            probe: Arc::new(MockProbe::default()),
            render: Arc::new(render),
            log: Arc::new(RecordingLog::default()),
        }
    }

    /// Create a source file and register its duration with the probe
    pub fn source(&self, name: &str, duration: f64) -> PathBuf {
        let path = self.dir.path().join("sources").join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"source").unwrap();
        self.probe.set(&path, duration);
        path
    }

    pub fn preview_dir(&self) -> PathBuf {
        self.dir.path().join("video_previews")
    }

    pub fn preview_interactor(&self) -> PreviewInteractor {
        PreviewInteractor::new(
            self.probe.clone(),
            self.render.clone(),
            Arc::new(FsLocalAdapter::new()),
            self.log.clone(),
            PreviewSettings {
                preview_dir: self.preview_dir(),
                ..PreviewSettings::default()
            },
        )
    }

    pub fn selection_interactor(&self, material: Arc<MockMaterial>) -> SelectionInteractor {
        SelectionInteractor::new(
            material,
            Arc::new(self.preview_interactor()),
            Arc::new(FsLocalAdapter::new()),
            self.log.clone(),
            SelectionSettings::default(),
        )
    }
}

pub fn request(task_id: &str, terms: &[&str]) -> DownloadRequest {
    DownloadRequest {
        task_id: task_id.to_string(),
        search_terms: terms.iter().map(|t| t.to_string()).collect(),
        source: VideoSource::Local,
        aspect: VideoAspect::Portrait,
        concat_mode: ConcatMode::Random,
        audio_duration: 300.0,
        max_clip_duration: 5.0,
    }
}
