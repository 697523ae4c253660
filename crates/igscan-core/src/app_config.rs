use std::path::PathBuf;

use crate::profile::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://www.instagram.com";

/// Desktop browser identifier sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36";

/// Public web-app identifier expected in the `X-IG-App-ID` header.
pub const DEFAULT_IG_APP_ID: &str = "936619743392459";

#[derive(Clone)]
pub struct AppConfig {
    /// `None` unless both `IG_USERNAME` and `IG_PASSWORD` are set and non-empty.
    pub credentials: Option<Credentials>,
    /// Raw `IG_USERNAME`, kept separately so session commands can run without a password.
    pub login_username: Option<String>,
    pub session_blob: Option<String>,
    pub session_dir: PathBuf,
    pub base_url: String,
    pub user_agent: String,
    pub ig_app_id: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("credentials", &self.credentials)
            .field("login_username", &self.login_username)
            .field(
                "session_blob",
                &self.session_blob.as_ref().map(|_| "[redacted]"),
            )
            .field("session_dir", &self.session_dir)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("ig_app_id", &self.ig_app_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
