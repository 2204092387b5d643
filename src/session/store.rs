use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{model::entity::UserProfile, session::SessionResult};

/// What the client keeps between runs: the bearer token and who it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    user: UserProfile,
}

impl Session {
    pub fn new<S: Into<String>>(token: S, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }
}

/// JSON file backing the session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> SessionResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(&self.path)?;
        let session: Session = serde_json::from_slice(&bytes)?;
        if session.token.is_empty() {
            return Ok(None);
        }

        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!("session saved to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> SessionResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("session removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
