//! Session lifecycle: created by login or registration, read by views, destroyed by logout.

mod error;
pub use error::{SessionError, SessionResult};

mod store;
pub use store::{Session, SessionStore};

use crate::{
    api::{AuthGrant, PortalApi},
    model::entity::{Credentials, Registration},
};

/// Explicit session context handed to every view.
#[derive(Debug)]
pub struct SessionContext {
    store: SessionStore,
    current: Option<Session>,
}

impl SessionContext {
    /// Opens the persisted session. An unreadable file counts as logged out.
    pub fn open(store: SessionStore) -> Self {
        let current = match store.load() {
            Ok(session) => session,
            Err(e) => {
                crate::error::log_error(&e);
                tracing::warn!("ignoring session at {}", store.path().display());
                None
            }
        };

        Self { store, current }
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn require(&self) -> SessionResult<&Session> {
        self.current.as_ref().ok_or(SessionError::NotLoggedIn)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    #[tracing::instrument(skip_all)]
    pub async fn login<A>(&mut self, api: &A, credentials: &Credentials) -> SessionResult<&Session>
    where
        A: PortalApi + ?Sized,
    {
        let grant = api.login(credentials).await?;
        self.establish(grant)
    }

    #[tracing::instrument(skip_all)]
    pub async fn register<A>(
        &mut self,
        api: &A,
        registration: &Registration,
    ) -> SessionResult<&Session>
    where
        A: PortalApi + ?Sized,
    {
        let grant = api.register(registration).await?;
        self.establish(grant)
    }

    /// Tells the backend, then forgets the session whatever the backend answered.
    #[tracing::instrument(skip_all)]
    pub async fn logout<A>(&mut self, api: &A) -> SessionResult<()>
    where
        A: PortalApi + ?Sized,
    {
        if let Some(session) = self.current.take() {
            if let Err(e) = api.logout(session.token()).await {
                tracing::warn!("logout not acknowledged by backend: {}", e);
            }
        }

        self.store.clear()
    }

    fn establish(&mut self, grant: AuthGrant) -> SessionResult<&Session> {
        let session = Session::new(grant.token, grant.user);
        self.store.save(&session)?;
        tracing::info!("logged in as {}", session.user().display_name());

        Ok(self.current.insert(session))
    }
}
