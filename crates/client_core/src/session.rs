use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// A bearer credential for the admin API. The token is issued by the
/// backend at login and treated as opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// File-backed session persistence. `login` writes the file, `logout`
/// removes it; a missing file simply means nobody is logged in.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Platform config location, e.g. `~/.config/cineops/session.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cineops").join("session.toml"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>, ClientError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))
            .map_err(|source| ClientError::Store { source })?;
        let session = toml::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))
            .map_err(|source| ClientError::Store { source })?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))
                .map_err(|source| ClientError::Store { source })?;
        }
        let raw = toml::to_string_pretty(session)
            .context("serializing session")
            .map_err(|source| ClientError::Store { source })?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing {}", self.path.display()))
            .map_err(|source| ClientError::Store { source })?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("removing {}", self.path.display()))
            .map_err(|source| ClientError::Store { source })
    }
}
