//! Maps pipeline failures onto the caller-facing [`ErrorCategory`] set.
//!
//! Typed client errors are matched first. Anything the client could not type
//! falls back to substring markers on the upstream message text; those
//! markers live only in this module. Unmatched failures are
//! [`ErrorCategory::Unknown`].

use igscan_client::ClientError;

use crate::error::ProfileError;

/// Upstream text meaning the service wants interactive verification.
const CHALLENGE_MARKERS: &[&str] = &[
    "challenge_required",
    "checkpoint_required",
    "Could not find \"window._sharedData\"",
];

/// Upstream text meaning the account or client is being throttled.
const RATE_LIMIT_MARKERS: &[&str] = &["Please wait a few minutes", "Too Many Requests"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    MissingCredentials,
    LoginChallengeRequired,
    RateLimited,
    ProfileNotFound,
    LoginFailed,
    /// Catch-all; carries the original message for diagnosis.
    Unknown(String),
}

impl ErrorCategory {
    /// Stable snake_case code for programmatic dispatch.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_credentials",
            Self::LoginChallengeRequired => "login_challenge_required",
            Self::RateLimited => "rate_limited",
            Self::ProfileNotFound => "profile_not_found",
            Self::LoginFailed => "login_failed",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[must_use]
pub fn classify(err: &ProfileError) -> ErrorCategory {
    match err {
        ProfileError::MissingCredentials => ErrorCategory::MissingCredentials,
        ProfileError::EmptyTarget => ErrorCategory::Unknown(err.to_string()),
        ProfileError::Login(source) => {
            classify_client(source).unwrap_or(ErrorCategory::LoginFailed)
        }
        ProfileError::Fetch(source) => {
            classify_client(source).unwrap_or_else(|| ErrorCategory::Unknown(source.to_string()))
        }
    }
}

fn classify_client(err: &ClientError) -> Option<ErrorCategory> {
    match err {
        ClientError::ProfileNotFound { .. } => Some(ErrorCategory::ProfileNotFound),
        ClientError::RateLimited { .. } => Some(ErrorCategory::RateLimited),
        ClientError::CheckpointRequired { .. }
        | ClientError::TwoFactorRequired
        | ClientError::MissingCsrfToken
        | ClientError::UnexpectedHtml { .. } => Some(ErrorCategory::LoginChallengeRequired),
        other => classify_message(&other.to_string()),
    }
}

/// Marker-based classification of free upstream text.
#[must_use]
pub fn classify_message(message: &str) -> Option<ErrorCategory> {
    if CHALLENGE_MARKERS.iter().any(|m| message.contains(m)) {
        return Some(ErrorCategory::LoginChallengeRequired);
    }
    if RATE_LIMIT_MARKERS.iter().any(|m| message.contains(m)) {
        return Some(ErrorCategory::RateLimited);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, message: &str) -> ClientError {
        ClientError::Api {
            status,
            message: message.to_owned(),
        }
    }

    #[test]
    fn missing_credentials() {
        assert_eq!(
            classify(&ProfileError::MissingCredentials),
            ErrorCategory::MissingCredentials
        );
    }

    #[test]
    fn profile_not_found_on_fetch() {
        let err = ProfileError::Fetch(ClientError::ProfileNotFound {
            username: "ghost".to_owned(),
        });
        assert_eq!(classify(&err), ErrorCategory::ProfileNotFound);
    }

    #[test]
    fn http_429_is_rate_limited_at_either_stage() {
        let limited = || ClientError::RateLimited {
            retry_after_secs: None,
        };
        assert_eq!(
            classify(&ProfileError::Login(limited())),
            ErrorCategory::RateLimited
        );
        assert_eq!(
            classify(&ProfileError::Fetch(limited())),
            ErrorCategory::RateLimited
        );
    }

    #[test]
    fn throttle_message_is_rate_limited() {
        let err = ProfileError::Login(ClientError::LoginRejected {
            message: "Please wait a few minutes before you try again.".to_owned(),
        });
        assert_eq!(classify(&err), ErrorCategory::RateLimited);

        let err = ProfileError::Fetch(api(400, "Please wait a few minutes before you try again."));
        assert_eq!(classify(&err), ErrorCategory::RateLimited);
    }

    #[test]
    fn checkpoint_and_two_factor_are_challenges() {
        let checkpoint = ProfileError::Login(ClientError::CheckpointRequired { url: None });
        let two_factor = ProfileError::Login(ClientError::TwoFactorRequired);
        let no_csrf = ProfileError::Login(ClientError::MissingCsrfToken);
        for err in [checkpoint, two_factor, no_csrf] {
            assert_eq!(classify(&err), ErrorCategory::LoginChallengeRequired);
        }
    }

    #[test]
    fn challenge_marker_in_api_message() {
        let err = ProfileError::Fetch(api(400, "challenge_required"));
        assert_eq!(classify(&err), ErrorCategory::LoginChallengeRequired);
    }

    #[test]
    fn shared_data_marker_is_challenge() {
        assert_eq!(
            classify_message("Could not find \"window._sharedData\" in html response."),
            Some(ErrorCategory::LoginChallengeRequired)
        );
    }

    #[test]
    fn rejected_login_is_login_failed() {
        let err = ProfileError::Login(ClientError::LoginRejected {
            message: "wrong password".to_owned(),
        });
        assert_eq!(classify(&err), ErrorCategory::LoginFailed);
    }

    #[test]
    fn unrecognised_fetch_failure_is_unknown_with_message() {
        let err = ProfileError::Fetch(api(500, "upstream exploded"));
        assert_eq!(
            classify(&err),
            ErrorCategory::Unknown("HTTP 500: upstream exploded".to_owned())
        );
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorCategory::RateLimited.code(), "rate_limited");
        assert_eq!(ErrorCategory::Unknown("x".to_owned()).to_string(), "unknown");
    }
}
