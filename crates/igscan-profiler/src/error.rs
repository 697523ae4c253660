use std::path::PathBuf;

use igscan_client::ClientError;
use thiserror::Error;

use crate::classify::{classify, ErrorCategory};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The username cannot be used as a store key (empty or contains path
    /// characters).
    #[error("invalid session key \"{0}\"")]
    InvalidKey(String),
}

/// Failure of one profile-features run.
///
/// Every variant is terminal for the run. Use [`ProfileError::category`] for
/// programmatic dispatch and [`ProfileError::user_message`] for display.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("no login credentials provided")]
    MissingCredentials,

    #[error("target username is empty")]
    EmptyTarget,

    /// The interactive login (the last-resort session source) failed.
    #[error("login failed: {0}")]
    Login(#[source] ClientError),

    #[error("profile lookup failed: {0}")]
    Fetch(#[source] ClientError),
}

pub const MISSING_CREDENTIALS_MESSAGE: &str = "No login credentials provided. Please set \
     IG_USERNAME and IG_PASSWORD environment variables for reliable analysis.";
pub const LOGIN_CHALLENGE_MESSAGE: &str =
    "Login challenge required. Please complete the login challenge manually and try again.";
pub const RATE_LIMITED_MESSAGE: &str = "Rate limit reached. Please try again in a few minutes.";
pub const PROFILE_NOT_FOUND_MESSAGE: &str = "Profile not found";

impl ProfileError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        classify(self)
    }

    /// Human-readable message naming the category of the failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.category() {
            ErrorCategory::MissingCredentials => MISSING_CREDENTIALS_MESSAGE.to_owned(),
            ErrorCategory::LoginChallengeRequired => LOGIN_CHALLENGE_MESSAGE.to_owned(),
            ErrorCategory::RateLimited => RATE_LIMITED_MESSAGE.to_owned(),
            ErrorCategory::ProfileNotFound => PROFILE_NOT_FOUND_MESSAGE.to_owned(),
            ErrorCategory::LoginFailed => match self {
                Self::Login(source) => format!("Login failed: {source}"),
                other => format!("Login failed: {other}"),
            },
            ErrorCategory::Unknown(message) => message,
        }
    }
}
