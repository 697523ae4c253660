//! Serializable authenticated session.
//!
//! A session is the cookie set returned by a successful login, bound to the
//! account that produced it. The serialized form is a small JSON document so
//! it can be stored on disk or passed around as an opaque blob.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "sessionid";
pub const CSRF_COOKIE: &str = "csrftoken";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    username: String,
    cookies: BTreeMap<String, String>,
    /// Expiry of the `sessionid` cookie when the server advertised one.
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(
        username: &str,
        cookies: BTreeMap<String, String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            username: username.to_owned(),
            cookies,
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// Account this session is bound to.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Case-insensitive, since account names are case-insensitive upstream.
    #[must_use]
    pub fn is_bound_to(&self, username: &str) -> bool {
        self.username.eq_ignore_ascii_case(username)
    }

    #[must_use]
    pub fn csrf_token(&self) -> Option<&str> {
        self.cookies.get(CSRF_COOKIE).map(String::as_str)
    }

    /// A session without a `sessionid` cookie cannot authenticate anything.
    #[must_use]
    pub fn has_session_cookie(&self) -> bool {
        self.cookies
            .get(SESSION_COOKIE)
            .is_some_and(|v| !v.is_empty())
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// Value for the `Cookie` request header.
    #[must_use]
    pub fn cookie_header(&self) -> String {
        cookie_header(&self.cookies)
    }

    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_blob(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// # Errors
    ///
    /// Returns the `serde_json` error if `blob` is not a serialized session.
    pub fn from_blob(blob: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(blob.trim())
    }
}

pub(crate) fn cookie_header(cookies: &BTreeMap<String, String>) -> String {
    cookies
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("cookies", &self.cookies.keys().collect::<Vec<_>>())
            .field("expires_at", &self.expires_at)
            .field("created_at", &self.created_at)
            .finish()
    }
}
