// ABOUTME: File-backed persistence of the issued auth session across process restarts
// ABOUTME: Lets bootstrap recover a signed-in user on cold start
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Session;
use crate::errors::AppResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Directory name under the platform data dir
const APP_DIR: &str = "fit28";

/// Session file name
const SESSION_FILE: &str = "session.json";

/// JSON file holding the last issued session
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    /// Storage at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data_dir>/fit28/session.json`, or the working
    /// directory when the platform has no data dir
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(SESSION_FILE)
    }

    /// Path of the session file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session
    ///
    /// A missing file means "no session". A corrupt file is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read
    pub async fn load(&self) -> AppResult<Option<Session>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Session>(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable session file");
                self.clear().await?;
                Ok(None)
            }
        }
    }

    /// Write the session, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub async fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(session)?;
        fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), "Session persisted");
        Ok(())
    }

    /// Remove the stored session
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed
    pub async fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AuthUser, UserMetadata};
    use uuid::Uuid;

    fn session() -> Session {
        Session {
            access_token: "access".to_owned(),
            refresh_token: Some("refresh".to_owned()),
            expires_at: None,
            user: AuthUser {
                id: Uuid::new_v4(),
                email: "jane@example.com".to_owned(),
                metadata: UserMetadata {
                    full_name: Some("Jane".to_owned()),
                    phone: None,
                },
            },
        }
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path().join("nested").join("session.json"));

        assert!(storage.load().await.unwrap().is_none());

        let original = session();
        storage.save(&original).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), Some(original));

        storage.clear().await.unwrap();
        assert!(storage.load().await.unwrap().is_none());
        storage.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path().join("session.json"));
        fs::write(storage.path(), b"{not json").await.unwrap();

        assert!(storage.load().await.unwrap().is_none());
        assert!(!storage.path().exists());
    }
}
