// src/session.rs
//! Persists the working list between CLI invocations

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::CompanyRecord;

/// The session: everything currently selected plus the active keywords.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub companies: Vec<CompanyRecord>,
    #[serde(default)]
    pub keywords: String,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the stored session; a missing file is an empty session.
    pub async fn load(&self) -> Result<SessionState> {
        if !self.path.exists() {
            return Ok(SessionState::default());
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Corrupt session file: {}", self.path.display()))
    }

    /// Write the session back. Called only after an operation succeeded so a
    /// failed operation never leaves a half-updated session behind.
    pub async fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let content =
            serde_json::to_string_pretty(state).context("Failed to serialize session")?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))
    }

    pub async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            tokio::fs::remove_file(&self.path)
                .await
                .with_context(|| format!("Failed to remove session file: {}", self.path.display()))?;
        }
        Ok(())
    }
}

async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}
