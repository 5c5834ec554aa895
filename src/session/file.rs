use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use super::BearerToken;

#[derive(Serialize, Deserialize)]
struct SessionFileContent {
    token: BearerToken,
}

/// Keeps the session token between invocations.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns Ok(None) if nobody is logged in
    pub async fn load(&self) -> Result<Option<BearerToken>> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(None);
        }
        let content = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read session file {}", self.path.display()))?;
        let content: SessionFileContent = serde_json::from_slice(&content)
            .with_context(|| format!("Session file {} is corrupted", self.path.display()))?;
        Ok(Some(content.token))
    }

    pub async fn save(&self, token: &BearerToken) -> Result<()> {
        log::info!("Saving session...");
        let content = serde_json::to_vec(&SessionFileContent {
            token: token.clone(),
        })?;

        // Write to a temporary file first so a failed write doesn't leave a half written session behind
        let filename = self
            .path
            .file_name()
            .ok_or_else(|| anyhow!("Path has no filename"))?
            .to_str()
            .ok_or_else(|| anyhow!("Filename isn't valid utf-8"))?;
        let tmppath = self.path.with_file_name(format!("{}.temp", filename));
        let mut file = owner_only()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmppath)
            .await
            .with_context(|| format!("Failed to create {}", tmppath.display()))?;
        file.write_all(&content).await?;
        file.sync_all().await?;
        drop(file);
        // A leftover temp file keeps the mode it was created with
        restrict_permissions(&tmppath).await?;
        tokio::fs::rename(&tmppath, &self.path).await?;

        log::info!("Saving session...done");
        Ok(())
    }

    /// Forgets the stored token. Not being logged in is fine.
    pub async fn clear(&self) -> Result<()> {
        if tokio::fs::try_exists(&self.path).await? {
            tokio::fs::remove_file(&self.path)
                .await
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn owner_only() -> tokio::fs::OpenOptions {
    let mut options = tokio::fs::OpenOptions::new();
    options.mode(0o600);
    options
}

#[cfg(not(unix))]
fn owner_only() -> tokio::fs::OpenOptions {
    tokio::fs::OpenOptions::new()
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
