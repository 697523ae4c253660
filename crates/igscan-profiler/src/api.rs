//! The remote-service seam used by the session manager and pipeline.

use async_trait::async_trait;
use igscan_client::{ClientError, InstagramClient, Session};
use igscan_core::{Credentials, RawProfile};

/// Operations the pipeline needs from the remote service.
///
/// Implemented by [`InstagramClient`]; tests substitute fakes.
#[async_trait]
pub trait InstagramApi: Send + Sync {
    /// Performs an interactive login and returns a session bound to
    /// `credentials.username()`.
    async fn login(&self, credentials: &Credentials) -> Result<Session, ClientError>;

    /// Exactly one lookup of `username`; implementations must not retry.
    async fn fetch_profile(
        &self,
        session: &Session,
        username: &str,
    ) -> Result<RawProfile, ClientError>;
}

#[async_trait]
impl InstagramApi for InstagramClient {
    async fn login(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        InstagramClient::login(self, credentials.username(), credentials.password()).await
    }

    async fn fetch_profile(
        &self,
        session: &Session,
        username: &str,
    ) -> Result<RawProfile, ClientError> {
        InstagramClient::fetch_profile(self, session, username).await
    }
}
