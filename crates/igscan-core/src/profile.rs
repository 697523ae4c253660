use serde::{Deserialize, Serialize};

/// Login credentials for the account that owns the authenticated session.
///
/// Constructed only through [`Credentials::new`], which rejects empty values,
/// so holding a `Credentials` means both halves are present.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Returns `None` when either value is empty or whitespace-only.
    #[must_use]
    pub fn new(username: &str, password: &str) -> Option<Self> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Profile attributes as reported by the remote service.
///
/// Nullable upstream strings are normalised to empty strings by the client
/// before a `RawProfile` is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProfile {
    pub username: String,
    pub full_name: String,
    pub biography: String,
    pub external_url: String,
    pub is_private: bool,
    pub has_profile_pic: bool,
    pub media_count: u64,
    pub follower_count: u64,
    pub followee_count: u64,
}
