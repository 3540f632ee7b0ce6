// Local filesystem adapter - File system operations through tokio::fs

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
#[derive(Debug, Default, Clone)]
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        match fs::metadata(file_path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to stat {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn create_directory(&self, dir_path: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(dir_path).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create directory {}: {}",
                dir_path.display(),
                e
            ))
        })
    }

    async fn read_file(&self, file_path: &Path) -> Result<Vec<u8>, DomainError> {
        fs::read(file_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainError::FileNotFound(file_path.display().to_string()),
            _ => DomainError::FsFail(format!("Failed to read {}: {}", file_path.display(), e)),
        })
    }

    async fn remove_file(&self, file_path: &Path) -> Result<(), DomainError> {
        match fs::remove_file(file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to delete {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        fs::copy(from, to).await.map(|_| ()).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to copy {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_lifecycle() {
        let dir = TempDir::new().unwrap();
        let fs_port = FsLocalAdapter::new();
        let nested = dir.path().join("a").join("b");
        let file = nested.join("clip.mp4");

        fs_port.create_directory(&nested).await.unwrap();
        assert!(!fs_port.file_exists(&file).await.unwrap());

        std::fs::write(&file, b"data").unwrap();
        assert!(fs_port.file_exists(&file).await.unwrap());
        assert_eq!(fs_port.read_file(&file).await.unwrap(), b"data");

        let copy = nested.join("copy.mp4");
        fs_port.copy_file(&file, &copy).await.unwrap();
        assert!(fs_port.file_exists(&copy).await.unwrap());

        fs_port.remove_file(&file).await.unwrap();
        fs_port.remove_file(&file).await.unwrap();
        assert!(!fs_port.file_exists(&file).await.unwrap());
    }

    #[tokio::test]
    async fn test_directories_are_not_files() {
        let dir = TempDir::new().unwrap();
        assert!(!FsLocalAdapter::new().file_exists(dir.path()).await.unwrap());
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = FsLocalAdapter::new()
            .read_file(&dir.path().join("missing.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::FileNotFound(_)));
    }
}
