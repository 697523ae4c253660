//! HTTP adapter for the Instagram web API: login and profile lookup.

pub mod client;
pub mod error;
pub mod normalize;
pub mod session;
pub mod types;

pub use client::InstagramClient;
pub use error::ClientError;
pub use normalize::normalize_profile;
pub use session::Session;
