use super::model::{CredentialRecord, Session};
use crate::error::{FilmshelfError, Result};
use crate::storage::{keys, load_json, save_json, StorageBackend};
use std::collections::BTreeMap;

/// Credential registry plus the current session
///
/// The registry and any remembered session are loaded once in
/// [`SessionStore::open`]. Signup and logout write through immediately;
/// login persists the session only when asked to remember it.
#[derive(Debug)]
pub struct SessionStore<B: StorageBackend> {
    backend: B,
    users: BTreeMap<String, CredentialRecord>,
    current: Option<Session>,
}

impl<B: StorageBackend> SessionStore<B> {
    /// Load the credential registry and restore a remembered session
    pub fn open(backend: B) -> Result<Self> {
        let users: BTreeMap<String, CredentialRecord> =
            load_json(&backend, keys::USERS)?.unwrap_or_default();
        let current: Option<Session> = load_json(&backend, keys::USER)?;

        tracing::debug!(
            users = users.len(),
            restored = current.is_some(),
            "Loaded session store"
        );

        Ok(Self {
            backend,
            users,
            current,
        })
    }

    /// Register a new user and log them in
    ///
    /// Both the registry and the session are persisted, regardless of any
    /// remember preference.
    ///
    /// # Errors
    ///
    /// `FilmshelfError::UserAlreadyExists` if the username is taken
    /// (exact, case-sensitive match), or a storage error.
    pub fn signup(&mut self, username: &str, password: &str) -> Result<Session> {
        if self.users.contains_key(username) {
            return Err(FilmshelfError::UserAlreadyExists(username.to_string()).into());
        }

        // persist first so a failed write leaves the username free
        let mut users = self.users.clone();
        users.insert(
            username.to_string(),
            CredentialRecord {
                password: password.to_string(),
            },
        );
        save_json(&self.backend, keys::USERS, &users)?;
        self.users = users;

        let session = Session::new(username);
        save_json(&self.backend, keys::USER, &session)?;
        self.current = Some(session.clone());

        tracing::info!(username, "Signed up");
        Ok(session)
    }

    /// Log in with an existing username and password
    ///
    /// With `remember` the session is persisted and survives a restart.
    /// Without it the session lives in memory only, and any previously
    /// remembered session is dropped from storage so a restart comes up
    /// logged out.
    ///
    /// # Errors
    ///
    /// `FilmshelfError::InvalidCredentials` unless both values match exactly.
    pub fn login(&mut self, username: &str, password: &str, remember: bool) -> Result<Session> {
        let matches = self
            .users
            .get(username)
            .is_some_and(|record| record.password == password);
        if !matches {
            tracing::debug!(username, "Rejected login");
            return Err(FilmshelfError::InvalidCredentials.into());
        }

        let session = Session::new(username);
        if remember {
            save_json(&self.backend, keys::USER, &session)?;
        } else {
            self.backend.remove(keys::USER)?;
        }
        self.current = Some(session.clone());

        tracing::info!(username, remember, "Logged in");
        Ok(session)
    }

    /// End the current session, in memory and in storage. Safe to repeat.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(session) = self.current.take() {
            tracing::info!(username = %session.username, "Logged out");
        }
        self.backend.remove(keys::USER)
    }

    pub fn current_user(&self) -> Option<Session> {
        self.current.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// The current session, or `FilmshelfError::NotLoggedIn`
    pub fn require_user(&self) -> Result<Session> {
        self.current
            .clone()
            .ok_or_else(|| FilmshelfError::NotLoggedIn.into())
    }
}
