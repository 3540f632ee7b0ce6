// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::session::SelectionSession;
use crate::transitions::Clip;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe duration and frame size. The decoder is released before returning.
    async fn probe_clip(&self, file_path: &Path) -> Result<ClipInfo, DomainError>;
}

/// Port for encoding through the external video tool
#[async_trait]
pub trait RenderPort: Send + Sync {
    /// Encode a short muted preview
    async fn render_preview(&self, job: &PreviewJob) -> Result<(), DomainError>;

    /// Encode a clip with its transition effects applied
    async fn render_clip(
        &self,
        clip: &Clip,
        output: &Path,
        settings: &EncodeSettings,
    ) -> Result<(), DomainError>;
}

/// Port for the material collaborator that gathers candidate clips
#[async_trait]
pub trait MaterialPort: Send + Sync {
    /// Local paths of the gathered clips. An empty list means nothing usable was found.
    async fn download_videos(&self, request: &DownloadRequest) -> Result<Vec<PathBuf>, DomainError>;
}

/// Port resolving a task identifier to its storage directory
#[async_trait]
pub trait TaskDirPort: Send + Sync {
    /// Directory for the task, created if missing
    async fn task_dir(&self, task_id: &str) -> Result<PathBuf, DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError>;

    /// Read a whole file
    async fn read_file(&self, file_path: &Path) -> Result<Vec<u8>, DomainError>;

    /// Delete file. A missing file is not an error.
    async fn remove_file(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Copy file
    async fn copy_file(&self, from: &Path, to: &Path) -> Result<(), DomainError>;
}

/// Port owning the lifecycle of selection sessions
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Load the session for a task, if one exists
    async fn load(&self, task_id: &str) -> Result<Option<SelectionSession>, DomainError>;

    /// Persist the session
    async fn save(&self, session: &SelectionSession) -> Result<(), DomainError>;

    /// Tear the session down. Returns whether one existed.
    async fn remove(&self, task_id: &str) -> Result<bool, DomainError>;

    /// All stored sessions, ordered by task id
    async fn list(&self) -> Result<Vec<SelectionSession>, DomainError>;
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);
}
