use igscan_core::{extract, Credentials, FeatureRecord};

use crate::api::InstagramApi;
use crate::error::ProfileError;
use crate::manager::obtain_session;
use crate::store::SessionStore;

/// Fetch `target`'s profile and derive its [`FeatureRecord`].
///
/// Runs strictly in order: credential check, session (seed, store, login),
/// one profile lookup, feature extraction. Missing credentials or an empty
/// target fail before any store or network access.
///
/// # Errors
///
/// Returns [`ProfileError`]; see [`ProfileError::category`] for the
/// caller-facing classification.
pub async fn get_profile_features<A, S>(
    api: &A,
    store: &S,
    credentials: Option<&Credentials>,
    session_blob: Option<&str>,
    target: &str,
) -> Result<FeatureRecord, ProfileError>
where
    A: InstagramApi + ?Sized,
    S: SessionStore + ?Sized,
{
    let credentials = credentials.ok_or(ProfileError::MissingCredentials)?;
    let target = target.trim();
    if target.is_empty() {
        return Err(ProfileError::EmptyTarget);
    }

    let session = obtain_session(api, store, credentials, session_blob).await?;

    let profile = api
        .fetch_profile(&session, target)
        .await
        .map_err(ProfileError::Fetch)?;

    let record = extract(&profile);
    tracing::info!(
        target_username = %record.username,
        followers = record.followers,
        "profile features extracted"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use igscan_client::ClientError;

    use super::*;
    use crate::classify::ErrorCategory;
    use crate::store::MemorySessionStore;
    use crate::testing::{credentials, session_for, CountingStore, FakeApi};

    #[tokio::test]
    async fn happy_path_produces_bob123_record() {
        let api = FakeApi::new();
        let store = MemorySessionStore::new();
        let creds = credentials("alice");

        let record = get_profile_features(&api, &store, Some(&creds), None, "bob123")
            .await
            .unwrap();

        assert_eq!(record.username, "bob123");
        assert!((record.nums_length_username - 0.5).abs() < f64::EPSILON);
        assert_eq!(record.fullname_words, 2);
        assert_eq!(record.profile_pic, 1);
        assert_eq!(record.posts, 10);
        assert_eq!(api.fetches(), 1);
        assert_eq!(*api.fetched_with.lock().unwrap(), vec!["alice".to_owned()]);
    }

    #[tokio::test]
    async fn missing_credentials_touch_nothing() {
        let api = FakeApi::new();
        let store = CountingStore::new();

        let err = get_profile_features(&api, &store, None, Some("blob"), "bob123")
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::MissingCredentials);
        assert_eq!(api.logins(), 0);
        assert_eq!(api.fetches(), 0);
        assert_eq!(store.loads(), 0);
        assert_eq!(store.saves(), 0);
    }

    #[tokio::test]
    async fn empty_target_touches_nothing() {
        let api = FakeApi::new();
        let store = CountingStore::new();
        let creds = credentials("alice");

        let err = get_profile_features(&api, &store, Some(&creds), None, "   ")
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::EmptyTarget));
        assert_eq!(store.loads(), 0);
        assert_eq!(api.logins(), 0);
    }

    #[tokio::test]
    async fn absent_profile_is_not_found_with_stored_session() {
        let api = FakeApi::new().with_fetch(|u| {
            Err(ClientError::ProfileNotFound {
                username: u.to_owned(),
            })
        });
        let store = MemorySessionStore::new();
        store
            .save("alice", &session_for("alice").to_blob().unwrap())
            .unwrap();
        let creds = credentials("alice");

        let err = get_profile_features(&api, &store, Some(&creds), None, "ghost")
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::ProfileNotFound);
        assert_eq!(api.logins(), 0);
    }

    #[tokio::test]
    async fn absent_profile_is_not_found_after_fresh_login() {
        let api = FakeApi::new().with_fetch(|u| {
            Err(ClientError::ProfileNotFound {
                username: u.to_owned(),
            })
        });
        let store = MemorySessionStore::new();
        let creds = credentials("alice");

        let err = get_profile_features(&api, &store, Some(&creds), None, "ghost")
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::ProfileNotFound);
        assert_eq!(api.logins(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_is_not_retried() {
        let api = FakeApi::new().with_fetch(|_| {
            Err(ClientError::RateLimited {
                retry_after_secs: Some(60),
            })
        });
        let store = MemorySessionStore::new();
        let creds = credentials("alice");

        let err = get_profile_features(&api, &store, Some(&creds), None, "bob123")
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::RateLimited);
        assert_eq!(api.fetches(), 1);
    }

    #[tokio::test]
    async fn login_challenge_stops_before_fetch() {
        let api = FakeApi::new().with_login(|_| Err(ClientError::CheckpointRequired { url: None }));
        let store = MemorySessionStore::new();
        let creds = credentials("alice");

        let err = get_profile_features(&api, &store, Some(&creds), None, "bob123")
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::LoginChallengeRequired);
        assert_eq!(api.fetches(), 0);
    }
}
