use thiserror::Error;

/// Errors returned by [`crate::InstagramClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// The landing page did not set a `csrftoken` cookie. Seen when the
    /// service serves an interstitial instead of its normal page.
    #[error("Could not find \"csrftoken\" cookie on the landing page")]
    MissingCsrfToken,

    /// An endpoint that should return JSON returned an HTML document, which
    /// happens when the request is redirected to a login or challenge page.
    #[error("expected JSON from {url} but received an HTML page")]
    UnexpectedHtml { url: String },

    #[error("rate limited (HTTP 429)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("checkpoint required: {}", .url.as_deref().unwrap_or("no checkpoint url"))]
    CheckpointRequired { url: Option<String> },

    #[error("two-factor authentication required")]
    TwoFactorRequired,

    /// Login completed but was not authenticated.
    #[error("login rejected: {message}")]
    LoginRejected { message: String },

    #[error("profile {username} does not exist")]
    ProfileNotFound { username: String },

    /// Any other non-2xx status. `message` is the upstream `message` field
    /// when the body carried one, otherwise a prefix of the raw body.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },
}
