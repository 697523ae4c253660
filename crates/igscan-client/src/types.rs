//! Response shapes for the Instagram web endpoints used by the client.
//!
//! ### Login (`POST /api/v1/web/accounts/login/ajax/`)
//! Always a JSON object, also on HTTP 400. `authenticated` is `true` only on
//! success. `user` is `false` when the account does not exist. A checkpoint
//! is signalled by `message: "checkpoint_required"` plus `checkpoint_url`;
//! two-factor by `two_factor_required: true`. Throttling arrives as
//! `status: "fail"` with a "Please wait a few minutes" message.
//!
//! ### Profile (`GET /api/v1/users/web_profile_info/?username=`)
//! `{"data": {"user": {...}}, "status": "ok"}`. `user` is `null` (or the
//! response is 404) for unknown accounts. Counts are nested as
//! `edge_*: {"count": n}`. `full_name`, `biography` and `external_url` may be
//! `null` or absent.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub authenticated: Option<bool>,
    #[serde(default)]
    pub user: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub checkpoint_url: Option<String>,
    #[serde(default)]
    pub two_factor_required: Option<bool>,
}

/// Generic error envelope returned by most endpoints on failure.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WebProfileInfoResponse {
    pub data: WebProfileData,
}

#[derive(Debug, Deserialize)]
pub struct WebProfileData {
    #[serde(default)]
    pub user: Option<WebUser>,
}

#[derive(Debug, Deserialize)]
pub struct WebUser {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub edge_owner_to_timeline_media: EdgeCount,
    #[serde(default)]
    pub edge_followed_by: EdgeCount,
    #[serde(default)]
    pub edge_follow: EdgeCount,
}

#[derive(Debug, Default, Deserialize)]
pub struct EdgeCount {
    #[serde(default)]
    pub count: u64,
}
