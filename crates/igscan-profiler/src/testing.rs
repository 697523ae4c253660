//! Test doubles for the remote service and the session store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use igscan_client::{ClientError, Session};
use igscan_core::{Credentials, RawProfile};

use crate::api::InstagramApi;
use crate::error::StoreError;
use crate::store::{MemorySessionStore, SessionStore};

pub(crate) fn credentials(username: &str) -> Credentials {
    Credentials::new(username, "hunter2").expect("valid test credentials")
}

pub(crate) fn session_for(username: &str) -> Session {
    let cookies: BTreeMap<String, String> = [
        ("csrftoken".to_owned(), "csrf".to_owned()),
        ("sessionid".to_owned(), format!("sess-{username}")),
    ]
    .into_iter()
    .collect();
    Session::new(username, cookies, None)
}

pub(crate) fn bob123() -> RawProfile {
    RawProfile {
        username: "bob123".to_owned(),
        full_name: "Bob Bob".to_owned(),
        biography: "hi".to_owned(),
        external_url: String::new(),
        is_private: false,
        has_profile_pic: true,
        media_count: 10,
        follower_count: 5,
        followee_count: 20,
    }
}

type LoginFn = Box<dyn Fn(&Credentials) -> Result<Session, ClientError> + Send + Sync>;
type FetchFn = Box<dyn Fn(&str) -> Result<RawProfile, ClientError> + Send + Sync>;

/// Scripted [`InstagramApi`] that records what it was asked to do.
pub(crate) struct FakeApi {
    login: LoginFn,
    fetch: FetchFn,
    pub login_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub fetched_with: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            login: Box::new(|c| Ok(session_for(c.username()))),
            fetch: Box::new(|_| Ok(bob123())),
            login_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            fetched_with: Mutex::new(Vec::new()),
        }
    }

    pub fn with_login(
        mut self,
        f: impl Fn(&Credentials) -> Result<Session, ClientError> + Send + Sync + 'static,
    ) -> Self {
        self.login = Box::new(f);
        self
    }

    pub fn with_fetch(
        mut self,
        f: impl Fn(&str) -> Result<RawProfile, ClientError> + Send + Sync + 'static,
    ) -> Self {
        self.fetch = Box::new(f);
        self
    }

    pub fn logins(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InstagramApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        (self.login)(credentials)
    }

    async fn fetch_profile(
        &self,
        session: &Session,
        username: &str,
    ) -> Result<RawProfile, ClientError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetched_with
            .lock()
            .expect("fetched_with lock")
            .push(session.username().to_owned());
        (self.fetch)(username)
    }
}

/// [`MemorySessionStore`] that counts operations and can be told to fail.
#[derive(Default)]
pub(crate) struct CountingStore {
    inner: MemorySessionStore,
    pub loads: AtomicUsize,
    pub saves: AtomicUsize,
    pub fail_saves: bool,
    pub fail_loads: bool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn failing_loads() -> Self {
        Self {
            fail_loads: true,
            ..Self::default()
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn io_error() -> StoreError {
        StoreError::Io {
            path: "memory".into(),
            source: std::io::Error::other("injected failure"),
        }
    }
}

impl SessionStore for CountingStore {
    fn load(&self, username: &str) -> Result<Option<String>, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads {
            return Err(Self::io_error());
        }
        self.inner.load(username)
    }

    fn save(&self, username: &str, blob: &str) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            return Err(Self::io_error());
        }
        self.inner.save(username, blob)
    }

    fn remove(&self, username: &str) -> Result<bool, StoreError> {
        self.inner.remove(username)
    }
}
