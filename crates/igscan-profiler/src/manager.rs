//! Session lifecycle: seed, load, and the login fallback.
//!
//! Order of preference is fixed: an externally supplied blob (written to the
//! store first), then whatever the store holds, then an interactive login.
//! Login is the last resort and is never retried, because repeated logins
//! are what trigger challenges and throttling upstream.

use chrono::{DateTime, Utc};
use igscan_client::{ClientError, Session};
use igscan_core::Credentials;
use thiserror::Error;

use crate::api::InstagramApi;
use crate::error::{ProfileError, StoreError};
use crate::store::SessionStore;

/// Outcome of reading the store for one account.
#[derive(Debug)]
pub enum SessionLoad {
    Loaded(Session),
    Unavailable(SessionUnavailable),
}

/// Why the store could not provide a usable session. Never surfaced to the
/// caller; each reason leads to the login fallback.
#[derive(Debug, Error)]
pub enum SessionUnavailable {
    #[error("no stored session")]
    Missing,

    #[error("session store unreadable: {0}")]
    Storage(#[source] StoreError),

    #[error("stored session is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("stored session belongs to {found}")]
    WrongAccount { found: String },

    #[error("stored session has no session cookie")]
    NoSessionCookie,

    #[error("stored session expired at {0}")]
    Expired(DateTime<Utc>),
}

/// Reads and validates the stored session for `username` as of `now`.
pub fn load_session<S>(store: &S, username: &str, now: DateTime<Utc>) -> SessionLoad
where
    S: SessionStore + ?Sized,
{
    let blob = match store.load(username) {
        Ok(Some(blob)) => blob,
        Ok(None) => return SessionLoad::Unavailable(SessionUnavailable::Missing),
        Err(e) => return SessionLoad::Unavailable(SessionUnavailable::Storage(e)),
    };

    let session = match Session::from_blob(&blob) {
        Ok(session) => session,
        Err(e) => return SessionLoad::Unavailable(SessionUnavailable::Corrupt(e)),
    };

    if !session.is_bound_to(username) {
        return SessionLoad::Unavailable(SessionUnavailable::WrongAccount {
            found: session.username().to_owned(),
        });
    }
    if !session.has_session_cookie() {
        return SessionLoad::Unavailable(SessionUnavailable::NoSessionCookie);
    }
    if let Some(expired_at) = session.expires_at().filter(|_| session.is_expired_at(now)) {
        return SessionLoad::Unavailable(SessionUnavailable::Expired(expired_at));
    }

    SessionLoad::Loaded(session)
}

/// Returns a session bound to `credentials.username()`.
///
/// Seeding and saving are best-effort: their failures are logged and the
/// run continues.
///
/// # Errors
///
/// Returns [`ProfileError::Login`] if the login fallback fails or returns a
/// session for a different account.
pub async fn obtain_session<A, S>(
    api: &A,
    store: &S,
    credentials: &Credentials,
    seed_blob: Option<&str>,
) -> Result<Session, ProfileError>
where
    A: InstagramApi + ?Sized,
    S: SessionStore + ?Sized,
{
    let username = credentials.username();

    if let Some(blob) = seed_blob {
        match store.save(username, blob) {
            Ok(()) => tracing::info!(username, "seeded session store from supplied session"),
            Err(e) => tracing::warn!(username, error = %e, "could not seed session store"),
        }
    }

    match load_session(store, username, Utc::now()) {
        SessionLoad::Loaded(session) => {
            tracing::info!(username, "session loaded from store");
            return Ok(session);
        }
        SessionLoad::Unavailable(reason) => {
            tracing::info!(username, %reason, "no usable stored session, logging in");
        }
    }

    let session = api
        .login(credentials)
        .await
        .map_err(ProfileError::Login)?;

    if !session.is_bound_to(username) {
        return Err(ProfileError::Login(ClientError::LoginRejected {
            message: format!(
                "login for {username} returned a session for {}",
                session.username()
            ),
        }));
    }

    tracing::info!(username, "logged in");
    persist(store, &session);
    Ok(session)
}

fn persist<S: SessionStore + ?Sized>(store: &S, session: &Session) {
    let username = session.username();
    let saved = session
        .to_blob()
        .map_err(|e| e.to_string())
        .and_then(|blob| store.save(username, &blob).map_err(|e| e.to_string()));
    match saved {
        Ok(()) => tracing::info!(username, "session saved"),
        Err(error) => tracing::warn!(username, %error, "could not save session"),
    }
}
