// JSON session store - One pretty-printed JSON file per task

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::rules::TaskIdRules;
use crate::domain::session::SelectionSession;
use crate::ports::*;

/// Stores sessions as `<sessions_dir>/<task_id>.json`
pub struct JsonSessionStore {
    sessions_dir: PathBuf,
}

impl JsonSessionStore {
    pub fn new(sessions_dir: impl Into<PathBuf>) -> Self {
        Self {
            sessions_dir: sessions_dir.into(),
        }
    }

    fn session_path(&self, task_id: &str) -> Result<PathBuf, DomainError> {
        TaskIdRules::validate(task_id)?;
        Ok(self.sessions_dir.join(format!("{}.json", task_id)))
    }

    fn write_atomic(dir: &Path, target: &Path, contents: &[u8]) -> Result<(), DomainError> {
        let fs_fail = |e: std::io::Error| {
            DomainError::FsFail(format!("Failed to write session {}: {}", target.display(), e))
        };
        std::fs::create_dir_all(dir).map_err(fs_fail)?;
        let mut temp = NamedTempFile::new_in(dir).map_err(fs_fail)?;
        temp.write_all(contents).map_err(fs_fail)?;
        temp.as_file().sync_all().map_err(fs_fail)?;
        temp.persist(target).map_err(|e| fs_fail(e.error))?;
        Ok(())
    }
}

fn parse_session(path: &Path, raw: &[u8]) -> Result<SelectionSession, DomainError> {
    serde_json::from_slice(raw).map_err(|e| {
        DomainError::FsFail(format!("Corrupt session file {}: {}", path.display(), e))
    })
}

#[async_trait]
impl SessionStorePort for JsonSessionStore {
    async fn load(&self, task_id: &str) -> Result<Option<SelectionSession>, DomainError> {
        let path = self.session_path(task_id)?;
        match tokio::fs::read(&path).await {
            Ok(raw) => parse_session(&path, &raw).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to read session {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn save(&self, session: &SelectionSession) -> Result<(), DomainError> {
        let path = self.session_path(&session.task_id)?;
        let contents = serde_json::to_vec_pretty(session)
            .map_err(|e| DomainError::InternalError(format!("Failed to encode session: {}", e)))?;
        let dir = self.sessions_dir.clone();
        debug!(path = %path.display(), "Saving session");
        tokio::task::spawn_blocking(move || Self::write_atomic(&dir, &path, &contents))
            .await
            .map_err(|e| DomainError::InternalError(format!("Session write task failed: {}", e)))?
    }

    async fn remove(&self, task_id: &str) -> Result<bool, DomainError> {
        let path = self.session_path(task_id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to delete session {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn list(&self) -> Result<Vec<SelectionSession>, DomainError> {
        let mut dir = match tokio::fs::read_dir(&self.sessions_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DomainError::FsFail(format!(
                    "Failed to list sessions in {}: {}",
                    self.sessions_dir.display(),
                    e
                )))
            }
        };

        let mut sessions = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to list sessions: {}", e)))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let raw = match tokio::fs::read(&path).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(path = %path.display(), "Skipping unreadable session: {}", e);
                    continue;
                }
            };
            match parse_session(&path, &raw) {
                Ok(session) => sessions.push(session),
                Err(e) => warn!("{}", e),
            }
        }
        sessions.sort_by(|a, b| a.task_id.cmp(&b.task_id));
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{PreviewStatus, SelectionState};
    use tempfile::TempDir;

    fn awaiting(task_id: &str) -> SelectionSession {
        let mut session = SelectionSession::new(task_id);
        session.begin_download().unwrap();
        session
            .complete_download(vec![PathBuf::from("/a.mp4"), PathBuf::from("/b.mp4")], true)
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonSessionStore::new(dir.path().join("sessions"));
        let mut session = awaiting("t-1");
        session.toggle(1).unwrap();
        session
            .record_preview(0, PreviewStatus::Ready(PathBuf::from("/tmp/p.mp4")))
            .unwrap();
        store.save(&session).await.unwrap();

        let loaded = store.load("t-1").await.unwrap().unwrap();
        assert_eq!(loaded.state, SelectionState::AwaitingSelection);
        assert_eq!(loaded.entries, session.entries);
        assert_eq!(loaded.grid_generation, session.grid_generation);
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonSessionStore::new(dir.path());
        assert!(store.load("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_and_list() {
        let dir = TempDir::new().unwrap();
        let store = JsonSessionStore::new(dir.path());
        store.save(&awaiting("b")).await.unwrap();
        store.save(&awaiting("a")).await.unwrap();
        std::fs::write(dir.path().join("broken.json"), b"{").unwrap();

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|s| s.task_id).collect();
        assert_eq!(ids, vec!["a", "b"]);

        assert!(store.remove("a").await.unwrap());
        assert!(!store.remove("a").await.unwrap());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_task_id_rejected() {
        let dir = TempDir::new().unwrap();
        let store = JsonSessionStore::new(dir.path());
        assert!(matches!(
            store.load("../escape").await,
            Err(DomainError::BadArgs(_))
        ));
        assert!(store.save(&SelectionSession::new("bad id")).await.is_err());
    }

    #[tokio::test]
    async fn test_list_without_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonSessionStore::new(dir.path().join("missing"));
        assert!(store.list().await.unwrap().is_empty());
    }
}
