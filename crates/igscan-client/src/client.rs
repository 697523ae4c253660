//! HTTP client for the Instagram web API.
//!
//! Wraps `reqwest` with the headers the web endpoints expect, explicit
//! cookie handling through [`Session`], and typed errors for the failure
//! shapes the service produces (throttling, checkpoints, unknown profiles).
//! The client never retries: repeated attempts against a throttled or
//! challenged account make the condition worse.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use igscan_core::{AppConfig, RawProfile, DEFAULT_BASE_URL};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE, REFERER, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode, Url};

use crate::error::ClientError;
use crate::normalize::normalize_profile;
use crate::session::{cookie_header, Session, CSRF_COOKIE, SESSION_COOKIE};
use crate::types::{ErrorEnvelope, LoginResponse, WebProfileInfoResponse};

const LOGIN_PATH: &str = "api/v1/web/accounts/login/ajax/";
const PROFILE_PATH: &str = "api/v1/users/web_profile_info/";

/// Longest slice of a non-JSON error body carried into [`ClientError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Client for the Instagram web API.
///
/// Use [`InstagramClient::new`] for production or
/// [`InstagramClient::with_base_url`] to point at a mock server in tests.
pub struct InstagramClient {
    client: Client,
    base_url: Url,
    app_id: String,
}

impl InstagramClient {
    /// Creates a client pointed at the production service.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, app_id: &str) -> Result<Self, ClientError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent, app_id)
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`InstagramClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
            &config.ig_app_id,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        app_id: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            app_id: app_id.to_owned(),
        })
    }

    /// Logs in with `username`/`password` and returns the resulting session.
    ///
    /// Two requests: the landing page (for the CSRF cookie) and the login
    /// form post.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingCsrfToken`] if the landing page set no CSRF cookie.
    /// - [`ClientError::RateLimited`] on HTTP 429.
    /// - [`ClientError::CheckpointRequired`] / [`ClientError::TwoFactorRequired`]
    ///   when the service asks for interactive verification.
    /// - [`ClientError::LoginRejected`] when the login is not authenticated.
    /// - [`ClientError::Http`] on network failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let mut cookies = self.landing_cookies().await?;
        let csrf = cookies
            .get(CSRF_COOKIE)
            .cloned()
            .ok_or(ClientError::MissingCsrfToken)?;

        let url = self.endpoint(LOGIN_PATH)?;
        let enc_password = format!(
            "#PWD_INSTAGRAM_BROWSER:0:{}:{password}",
            Utc::now().timestamp()
        );

        tracing::debug!(%url, username, "submitting login form");
        let response = self
            .client
            .post(url.clone())
            .headers(self.base_headers())
            .header(COOKIE, cookie_header(&cookies))
            .header("X-CSRFToken", &csrf)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&[
                ("username", username),
                ("enc_password", enc_password.as_str()),
                ("queryParams", "{}"),
                ("optIntoOneTap", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(rate_limited(&response));
        }

        let (issued, expires_at) = collect_cookies(&response);
        let body = response.text().await?;
        let parsed: LoginResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if looks_like_html(&body) => {
                return Err(ClientError::UnexpectedHtml {
                    url: url.to_string(),
                })
            }
            Err(source) if status.is_success() => {
                return Err(ClientError::Deserialize {
                    context: "login response".to_owned(),
                    source,
                })
            }
            Err(_) => return Err(api_error(status, &body)),
        };

        if parsed.checkpoint_url.is_some()
            || parsed.message.as_deref() == Some("checkpoint_required")
        {
            return Err(ClientError::CheckpointRequired {
                url: parsed.checkpoint_url,
            });
        }
        if parsed.two_factor_required == Some(true) {
            return Err(ClientError::TwoFactorRequired);
        }
        if parsed.authenticated != Some(true) {
            let message = parsed
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| match (parsed.user, parsed.status.as_deref()) {
                    (Some(false), _) => format!("user {username} does not exist"),
                    (Some(true), _) => "wrong password".to_owned(),
                    (None, Some(s)) => format!("unexpected login status \"{s}\""),
                    (None, None) => "unexpected login response".to_owned(),
                });
            return Err(ClientError::LoginRejected { message });
        }

        cookies.extend(issued);
        if !cookies.contains_key(SESSION_COOKIE) {
            return Err(ClientError::LoginRejected {
                message: "authenticated response carried no session cookie".to_owned(),
            });
        }

        tracing::info!(username, "login succeeded");
        Ok(Session::new(username, cookies, expires_at))
    }

    /// Looks up `username` using `session` and returns its raw profile.
    ///
    /// # Errors
    ///
    /// - [`ClientError::ProfileNotFound`] on HTTP 404 or a `null` user.
    /// - [`ClientError::RateLimited`] on HTTP 429.
    /// - [`ClientError::UnexpectedHtml`] if the service answered with a page.
    /// - [`ClientError::Api`] on any other non-2xx status.
    /// - [`ClientError::Deserialize`] if the JSON does not match the expected shape.
    /// - [`ClientError::Http`] on network failure.
    pub async fn fetch_profile(
        &self,
        session: &Session,
        username: &str,
    ) -> Result<RawProfile, ClientError> {
        let mut url = self.endpoint(PROFILE_PATH)?;
        url.query_pairs_mut().append_pair("username", username);

        tracing::debug!(%url, "fetching profile");
        let mut request = self
            .client
            .get(url.clone())
            .headers(self.base_headers())
            .header(COOKIE, session.cookie_header());
        if let Some(csrf) = session.csrf_token() {
            request = request.header("X-CSRFToken", csrf);
        }
        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(rate_limited(&response));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::ProfileNotFound {
                username: username.to_owned(),
            });
        }

        let body = response.text().await?;
        if looks_like_html(&body) {
            return Err(ClientError::UnexpectedHtml {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let parsed: WebProfileInfoResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: format!("web_profile_info(username={username})"),
                source: e,
            })?;

        parsed
            .data
            .user
            .map(normalize_profile)
            .ok_or_else(|| ClientError::ProfileNotFound {
                username: username.to_owned(),
            })
    }

    /// Fetches the landing page and returns the cookies it sets.
    async fn landing_cookies(&self) -> Result<BTreeMap<String, String>, ClientError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .header(ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8")
            .send()
            .await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(rate_limited(&response));
        }
        let (cookies, _) = collect_cookies(&response);
        Ok(cookies)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    fn base_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        if let Ok(referer) = HeaderValue::from_str(self.base_url.as_str()) {
            headers.insert(REFERER, referer);
        }
        if let Ok(app_id) = HeaderValue::from_str(&self.app_id) {
            headers.insert("X-IG-App-ID", app_id);
        }
        headers
    }
}

/// Cookies set by `response`, plus the expiry of the session cookie if one
/// was issued.
fn collect_cookies(response: &Response) -> (BTreeMap<String, String>, Option<DateTime<Utc>>) {
    let mut cookies = BTreeMap::new();
    let mut expires_at = None;
    for cookie in response.cookies() {
        // Deletions arrive as empty values.
        if cookie.value().is_empty() || cookie.value() == "\"\"" {
            continue;
        }
        if cookie.name() == SESSION_COOKIE {
            expires_at = cookie
                .max_age()
                .and_then(|age| chrono::Duration::from_std(age).ok())
                .map(|age| Utc::now() + age)
                .or_else(|| cookie.expires().map(DateTime::<Utc>::from));
        }
        cookies.insert(cookie.name().to_owned(), cookie.value().to_owned());
    }
    (cookies, expires_at)
}

fn rate_limited(response: &Response) -> ClientError {
    let retry_after_secs = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok());
    ClientError::RateLimited { retry_after_secs }
}

fn api_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect());
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    head.starts_with("<!DOCTYPE") || head.starts_with("<!doctype") || head.starts_with("<html")
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
