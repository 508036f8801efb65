use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use crate::error::AppError;

/// The single on-disk MP3 holding the most recently synthesized speech.
///
/// Writes land in a temporary file next to the artifact and are renamed over
/// it, so readers see either the previous file or the new one in full.
pub struct AudioStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl AudioStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the artifact with `audio`.
    pub async fn save(&self, audio: Vec<u8>) -> Result<(), AppError> {
        let _guard = self.lock.write().await;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || persist(&path, &audio))
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;

        tracing::debug!("Audio written to {}", self.path.display());
        Ok(())
    }

    pub async fn load(&self) -> Result<Vec<u8>, AppError> {
        let _guard = self.lock.read().await;

        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AppError::AudioNotFound),
            Err(e) => Err(e.into()),
        }
    }
}

fn persist(path: &Path, audio: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    // Dropped (and deleted) on any early return
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(audio)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
