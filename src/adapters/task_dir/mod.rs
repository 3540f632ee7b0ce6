// Task directory adapter - Per-task storage under the configured root

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::rules::TaskIdRules;
use crate::ports::*;

/// Resolves `<storage_root>/tasks/<task_id>`
pub struct TaskDirAdapter {
    storage_root: PathBuf,
}

impl TaskDirAdapter {
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
        }
    }
}

#[async_trait]
impl TaskDirPort for TaskDirAdapter {
    async fn task_dir(&self, task_id: &str) -> Result<PathBuf, DomainError> {
        TaskIdRules::validate(task_id)?;
        let dir = self.storage_root.join("tasks").join(task_id);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create task directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_task_dir_is_created() {
        let root = TempDir::new().unwrap();
        let adapter = TaskDirAdapter::new(root.path());
        let dir = adapter.task_dir("job-7").await.unwrap();
        assert_eq!(dir, root.path().join("tasks").join("job-7"));
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_task_dir_rejects_traversal() {
        let root = TempDir::new().unwrap();
        let adapter = TaskDirAdapter::new(root.path());
        assert!(adapter.task_dir("../outside").await.is_err());
    }
}
