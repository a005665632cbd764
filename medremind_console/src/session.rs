use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use medremind_models::session::Session;
use thiserror::Error;
use tokio::{fs, sync::RwLock};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>, SessionError>;
    async fn save(&self, session: &Session) -> Result<(), SessionError>;
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Session persisted as JSON, readable only by the owner on unix.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, contents).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.session.write().await = None;
        Ok(())
    }
}

/// The signed-in doctor, if any, handed explicitly to whatever needs it.
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: Option<Session>,
}

impl SessionContext {
    /// Restores a previous session. Expired or unreadable ones are dropped.
    pub async fn initialize(store: Arc<dyn SessionStore>, now: DateTime<Utc>) -> Self {
        let current = match store.load().await {
            Ok(Some(session)) if session.is_expired(now) => {
                log::info!("Session for {} has expired", session.doctor_email);
                discard(store.as_ref()).await;
                None
            }
            Ok(session) => session,
            Err(SessionError::Corrupt(error)) => {
                log::warn!("Discarding unreadable session: {error}");
                discard(store.as_ref()).await;
                None
            }
            Err(error) => {
                log::warn!("Could not restore session: {error}");
                None
            }
        };

        if let Some(session) = &current {
            log::debug!("Restored session for {}", session.doctor_email);
        }

        Self { store, current }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    pub async fn sign_in(&mut self, session: Session) -> Result<(), SessionError> {
        self.store.save(&session).await?;
        log::info!("Signed in as {}", session.doctor_email);
        self.current = Some(session);
        Ok(())
    }

    pub async fn sign_out(&mut self) -> Result<(), SessionError> {
        if let Some(session) = self.current.take() {
            log::info!("Signing out {}", session.doctor_email);
        }
        self.store.clear().await
    }
}

async fn discard(store: &dyn SessionStore) {
    if let Err(error) = store.clear().await {
        log::warn!("Could not clear stale session: {error}");
    }
}
