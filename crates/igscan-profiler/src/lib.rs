//! Profile feature pipeline: session lifecycle, profile fetch, feature
//! extraction and error classification.

pub mod api;
pub mod classify;
pub mod error;
pub mod manager;
pub mod output;
pub mod pipeline;
pub mod store;

#[cfg(test)]
mod testing;

pub use api::InstagramApi;
pub use classify::{classify, ErrorCategory};
pub use error::{ProfileError, StoreError};
pub use manager::{load_session, obtain_session, SessionLoad, SessionUnavailable};
pub use output::ProfileOutput;
pub use pipeline::get_profile_features;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
