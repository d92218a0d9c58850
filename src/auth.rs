// src/auth.rs
//! Bearer-token storage - authentication itself happens out of band

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// File-backed store for the opaque API bearer token.
///
/// The token is obtained from the login flow outside this tool and pasted
/// into `linkscout login`. A 401 from the backend invalidates it: callers
/// clear the store and tell the user to log in again.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub async fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read token file: {}", self.path.display()))?;
        let token = content.trim();
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token.to_string()))
        }
    }

    pub async fn store(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, token.trim())
            .await
            .with_context(|| format!("Failed to write token file: {}", self.path.display()))?;
        info!("Stored API token");
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            tokio::fs::remove_file(&self.path)
                .await
                .with_context(|| format!("Failed to remove token file: {}", self.path.display()))?;
            info!("Cleared stored API token");
        }
        Ok(())
    }
}
