//! Local material library adapter
//!
//! Serves the material port from a directory of video files. Candidates are
//! matched against the search terms by file stem, ordered per the concat
//! mode, and gathered until their usable length covers the target duration.
//! The chosen files are copied into the task directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::SelectionRules;
use crate::ports::*;
use crate::utils::path::{get_extension, is_video_file};

/// Material adapter over a local directory tree
pub struct LocalMaterialAdapter {
    library_dir: PathBuf,
    probe: Arc<dyn ProbePort>,
    task_dirs: Arc<dyn TaskDirPort>,
    fs: Arc<dyn FsPort>,
}

impl LocalMaterialAdapter {
    pub fn new(
        library_dir: impl Into<PathBuf>,
        probe: Arc<dyn ProbePort>,
        task_dirs: Arc<dyn TaskDirPort>,
        fs: Arc<dyn FsPort>,
    ) -> Self {
        Self {
            library_dir: library_dir.into(),
            probe,
            task_dirs,
            fs,
        }
    }

    /// Video files under the library whose stem contains any of the terms
    async fn scan(&self, terms: Vec<String>) -> Result<Vec<PathBuf>, DomainError> {
        let root = self.library_dir.clone();
        tokio::task::spawn_blocking(move || scan_library(&root, &terms))
            .await
            .map_err(|e| DomainError::InternalError(format!("Library scan failed: {}", e)))?
    }
}

fn scan_library(root: &Path, terms: &[String]) -> Result<Vec<PathBuf>, DomainError> {
    if !root.is_dir() {
        return Err(DomainError::DownloadFailed(format!(
            "material library {} is not a directory",
            root.display()
        )));
    }

    let lowered: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable library entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_video_file(path) {
            continue;
        }
        if matches_terms(path, &lowered) {
            found.push(path.to_path_buf());
        }
    }
    found.sort();
    Ok(found)
}

fn matches_terms(path: &Path, lowered_terms: &[String]) -> bool {
    if lowered_terms.is_empty() {
        return true;
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    lowered_terms.iter().any(|term| stem.contains(term.as_str()))
}

/// First 8 bytes of SHA-256 over `seed`, a NUL separator and the path
fn stable_hash(seed: &str, path: &Path) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update([0u8]);
    hasher.update(path.to_string_lossy().as_bytes());
    let digest = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Sorted for `Sequential`, shuffled by a hash keyed on the task id for `Random`
pub fn order_candidates(mut paths: Vec<PathBuf>, mode: ConcatMode, task_id: &str) -> Vec<PathBuf> {
    match mode {
        ConcatMode::Sequential => paths.sort(),
        ConcatMode::Random => paths.sort_by_cached_key(|p| (stable_hash(task_id, p), p.clone())),
    }
    paths
}

/// Name of the copy inside the task directory
fn task_file_name(source: &Path) -> String {
    let ext = get_extension(source).unwrap_or_else(|| "mp4".to_string());
    format!("vid-{:016x}.{}", stable_hash("", source), ext)
}

#[async_trait]
impl MaterialPort for LocalMaterialAdapter {
    async fn download_videos(&self, request: &DownloadRequest) -> Result<Vec<PathBuf>, DomainError> {
        if request.source != VideoSource::Local {
            warn!(
                source = %request.source,
                "Only the local material library is available; returning no clips"
            );
            return Ok(Vec::new());
        }

        let terms = SelectionRules::normalize_terms(&request.search_terms);
        let candidates = order_candidates(
            self.scan(terms).await?,
            request.concat_mode,
            &request.task_id,
        );
        debug!(count = candidates.len(), "Library candidates found");

        let task_dir = self.task_dirs.task_dir(&request.task_id).await?;
        let mut gathered = Vec::new();
        let mut total = 0.0;

        for source in candidates {
            if total >= request.audio_duration {
                break;
            }
            let info = match self.probe.probe_clip(&source).await {
                Ok(info) => info,
                Err(e) => {
                    warn!(path = %source.display(), "Skipping unusable clip: {}", e);
                    continue;
                }
            };

            let target = task_dir.join(task_file_name(&source));
            if !self.fs.file_exists(&target).await? {
                self.fs.copy_file(&source, &target).await?;
            }

            total += info.duration.min(request.max_clip_duration);
            gathered.push(target);
        }

        info!(
            task_id = %request.task_id,
            clips = gathered.len(),
            seconds = total,
            "Gathered material clips"
        );
        Ok(gathered)
    }
}
