// Selection interactor - Download, preview, checkbox and confirm handlers
//
// Every handler is idempotent: applying an event twice leaves the session as
// applying it once would, and never repeats a download or a preview encode.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::preview_interactor::PreviewInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::SelectionRules;
use crate::domain::session::*;
use crate::ports::*;

/// Workflow settings
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSettings {
    /// Target seconds of material per download, oversized on purpose
    pub download_audio_duration: f64,
    pub default_selected: bool,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            download_audio_duration: 300.0,
            default_selected: true,
        }
    }
}

/// User events. Indices are zero-based.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Start(DownloadRequest),
    RenderPreviews,
    SetSelected { index: usize, selected: bool },
    Toggle { index: usize },
    SelectAll,
    SelectNone,
    Refresh,
    Confirm,
    Reopen,
}

/// What an event did
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    Downloaded { clips: usize },
    AlreadyDownloaded,
    PreviewsRendered { rendered: usize, failed: usize },
    SelectionChanged { index: usize, selected: bool, changed: bool },
    AllSet { selected: bool },
    Refreshed { generation: u64 },
    Confirmed(Vec<PathBuf>),
    Reopened,
}

/// Interactor for the clip selection workflow
pub struct SelectionInteractor {
    material_port: Arc<dyn MaterialPort>,
    preview: Arc<PreviewInteractor>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
    settings: SelectionSettings,
}

impl SelectionInteractor {
    /// Create new selection interactor with injected ports
    pub fn new(
        material_port: Arc<dyn MaterialPort>,
        preview: Arc<PreviewInteractor>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
        settings: SelectionSettings,
    ) -> Self {
        Self {
            material_port,
            preview,
            fs_port,
            log_port,
            settings,
        }
    }

    /// Download request for a task with the configured target duration
    pub fn download_request(
        &self,
        task_id: &str,
        search_terms: &[String],
        params: &VideoParams,
    ) -> Result<DownloadRequest, DomainError> {
        params.validate()?;
        Ok(DownloadRequest {
            task_id: task_id.to_string(),
            search_terms: SelectionRules::normalize_terms(search_terms),
            source: params.video_source,
            aspect: params.video_aspect,
            concat_mode: params.video_concat_mode,
            audio_duration: self.settings.download_audio_duration,
            max_clip_duration: params.video_clip_duration,
        })
    }

    /// Apply one event to the session
    pub async fn handle(
        &self,
        session: &mut SelectionSession,
        event: SelectionEvent,
    ) -> Result<SelectionOutcome, DomainError> {
        match event {
            SelectionEvent::Start(request) => {
                if self.ensure_downloaded(session, &request).await? {
                    Ok(SelectionOutcome::Downloaded {
                        clips: session.entries.len(),
                    })
                } else {
                    Ok(SelectionOutcome::AlreadyDownloaded)
                }
            }
            SelectionEvent::RenderPreviews => {
                let (rendered, failed) = self.ensure_previews(session).await;
                Ok(SelectionOutcome::PreviewsRendered { rendered, failed })
            }
            SelectionEvent::SetSelected { index, selected } => {
                let changed = session.set_selected(index, selected)?;
                Ok(SelectionOutcome::SelectionChanged {
                    index,
                    selected,
                    changed,
                })
            }
            SelectionEvent::Toggle { index } => {
                let selected = session.toggle(index)?;
                Ok(SelectionOutcome::SelectionChanged {
                    index,
                    selected,
                    changed: true,
                })
            }
            SelectionEvent::SelectAll => {
                session.set_all(true)?;
                Ok(SelectionOutcome::AllSet { selected: true })
            }
            SelectionEvent::SelectNone => {
                session.set_all(false)?;
                Ok(SelectionOutcome::AllSet { selected: false })
            }
            SelectionEvent::Refresh => Ok(SelectionOutcome::Refreshed {
                generation: session.refresh(),
            }),
            SelectionEvent::Confirm => self.confirm(session).await.map(SelectionOutcome::Confirmed),
            SelectionEvent::Reopen => {
                session.reopen()?;
                Ok(SelectionOutcome::Reopened)
            }
        }
    }

    /// Download candidates once. Returns whether a download happened.
    pub async fn ensure_downloaded(
        &self,
        session: &mut SelectionSession,
        request: &DownloadRequest,
    ) -> Result<bool, DomainError> {
        if session.state != SelectionState::NoSession {
            self.log_port
                .debug(&format!(
                    "Session {} already {}, skipping download",
                    session.task_id,
                    session.state.as_str()
                ))
                .await;
            return Ok(false);
        }
        if request.task_id != session.task_id {
            return Err(DomainError::BadArgs(format!(
                "Download request for task {} applied to session {}",
                request.task_id, session.task_id
            )));
        }

        session.begin_download()?;
        self.log_port
            .info(&format!(
                "Downloading clips for task {} (terms: {})",
                request.task_id,
                request.search_terms.join(", ")
            ))
            .await;

        let paths = match self.material_port.download_videos(request).await {
            Ok(paths) if !paths.is_empty() => paths,
            Ok(_) => {
                session.abort_download();
                return Err(DomainError::DownloadFailed(
                    "no usable clips were found".to_string(),
                ));
            }
            Err(e) => {
                session.abort_download();
                self.log_port
                    .error(&format!("Download for task {} failed: {}", request.task_id, e))
                    .await;
                return Err(match e {
                    DomainError::DownloadFailed(_) => e,
                    other => DomainError::DownloadFailed(other.to_string()),
                });
            }
        };

        session.complete_download(paths, self.settings.default_selected)?;
        self.log_port
            .info(&format!(
                "Task {} has {} candidate clips",
                session.task_id,
                session.entries.len()
            ))
            .await;
        Ok(true)
    }

    /// Render every preview not attempted yet. Returns (rendered, failed).
    pub async fn ensure_previews(&self, session: &mut SelectionSession) -> (usize, usize) {
        let mut rendered = 0;
        let mut failed = 0;
        for index in session.pending_previews() {
            let source = session.entries[index].path.clone();
            let status = match self.preview.create_video_preview(&source).await {
                Some(path) => {
                    rendered += 1;
                    PreviewStatus::Ready(path)
                }
                None => {
                    failed += 1;
                    PreviewStatus::Unavailable(preview_error_message(index))
                }
            };
            if let Err(e) = session.record_preview(index, status) {
                self.log_port
                    .error(&format!("Could not record preview {}: {}", index + 1, e))
                    .await;
            }
        }
        (rendered, failed)
    }

    /// Grid of the candidates with `columns` cells per row
    pub async fn render_grid(
        &self,
        session: &mut SelectionSession,
        columns: usize,
    ) -> Result<SelectionGrid, DomainError> {
        if columns == 0 {
            return Err(DomainError::BadArgs(
                "Grid needs at least one column".to_string(),
            ));
        }
        if let Some(grid) = session.cached_grid(columns) {
            return Ok(grid.clone());
        }

        let mut cells = Vec::with_capacity(session.entries.len());
        for index in 0..session.entries.len() {
            let entry = session.entries[index].clone();
            let preview = match &entry.preview {
                PreviewStatus::Pending => CellPreview::Pending,
                PreviewStatus::Unavailable(_) => CellPreview::Error {
                    message: preview_error_message(index),
                },
                PreviewStatus::Ready(path) => match self.preview_bytes(session, path).await {
                    Ok(len) => CellPreview::Ready {
                        path: path.clone(),
                        bytes_len: len,
                    },
                    Err(e) => {
                        self.log_port
                            .error(&format!(
                                "Could not read preview {} for {}: {}",
                                path.display(),
                                entry.path.display(),
                                e
                            ))
                            .await;
                        CellPreview::Error {
                            message: preview_error_message(index),
                        }
                    }
                },
            };
            cells.push(GridCell {
                index,
                path: entry.path,
                selected: entry.selected,
                preview,
            });
        }

        let rows = cells.chunks(columns).map(|row| row.to_vec()).collect();
        let grid = SelectionGrid {
            generation: session.grid_generation,
            columns,
            rows,
        };
        session.store_grid(grid.clone());
        Ok(grid)
    }

    async fn preview_bytes(
        &self,
        session: &mut SelectionSession,
        path: &Path,
    ) -> Result<usize, DomainError> {
        if let Some(bytes) = session.cached_preview_bytes(path) {
            return Ok(bytes.len());
        }
        let bytes = Arc::new(self.fs_port.read_file(path).await?);
        let len = bytes.len();
        session.cache_preview_bytes(path.to_path_buf(), bytes);
        Ok(len)
    }

    /// Confirm the checked clips, in candidate order
    pub async fn confirm(&self, session: &mut SelectionSession) -> Result<Vec<PathBuf>, DomainError> {
        match session.confirm() {
            Ok(selected) => {
                self.log_port
                    .info(&format!(
                        "Task {} confirmed {} of {} clips",
                        session.task_id,
                        selected.len(),
                        session.entries.len()
                    ))
                    .await;
                Ok(selected)
            }
            Err(e) => {
                self.log_port.warn(&e.to_string()).await;
                Err(e)
            }
        }
    }
}

/// User-facing message for a candidate whose preview is unavailable
pub fn preview_error_message(index: usize) -> String {
    format!("Could not preview video {}", index + 1)
}
