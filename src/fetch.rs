//! Loading the profile behind a view: verify the session, then fetch.

use std::future::Future;

use crate::api::{self, ApiClient, ApiError, Identity};
use crate::model::UserProfile;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    /// Something went wrong. Holds the message to show, the cause is only logged.
    Error(String),
    /// There is no session or the Record Store rejected it.
    Unauthenticated,
}

#[allow(async_fn_in_trait)]
pub trait ProfileSource {
    async fn verify(&self) -> Result<Option<Identity>, ApiError>;
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError>;
}

impl ProfileSource for ApiClient {
    async fn verify(&self) -> Result<Option<Identity>, ApiError> {
        api::verify(self).await
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        api::profile(self).await
    }
}

/// Fetches the profile once per instance. A view creates its own fetcher, so
/// re-entering a view fetches again while repeated loads within it don't.
pub struct ProfileFetcher<S> {
    source: S,
    state: FetchState<UserProfile>,
    error_message: &'static str,
}

impl<S: ProfileSource> ProfileFetcher<S> {
    pub fn new(source: S, error_message: &'static str) -> Self {
        Self {
            source,
            state: FetchState::Loading,
            error_message,
        }
    }

    pub fn state(&self) -> &FetchState<UserProfile> {
        &self.state
    }

    pub fn into_state(self) -> FetchState<UserProfile> {
        self.state
    }

    pub async fn load(&mut self) -> &FetchState<UserProfile> {
        self.run(std::future::pending()).await;
        &self.state
    }

    /// Like [Self::load], but gives up as soon as `cancelled` completes. In that
    /// case the in-flight request is dropped, the state is left as it was and
    /// `None` is returned.
    pub async fn load_until(
        &mut self,
        cancelled: impl Future<Output = ()>,
    ) -> Option<&FetchState<UserProfile>> {
        if self.run(cancelled).await {
            Some(&self.state)
        } else {
            None
        }
    }

    async fn run(&mut self, cancelled: impl Future<Output = ()>) -> bool {
        if matches!(self.state, FetchState::Ready(_)) {
            return true;
        }
        let state = tokio::select! {
            state = fetch(&self.source, self.error_message) => state,
            () = cancelled => {
                log::info!("Loading profile...cancelled");
                return false;
            }
        };
        self.state = state;
        true
    }
}

/// The profile is only requested once the session is known to be good.
async fn verify_then_fetch<S: ProfileSource>(source: &S) -> Result<Option<UserProfile>, ApiError> {
    if source.verify().await?.is_none() {
        return Ok(None);
    }
    source.fetch_profile().await.map(Some)
}

async fn fetch<S: ProfileSource>(source: &S, error_message: &str) -> FetchState<UserProfile> {
    match verify_then_fetch(source).await {
        Ok(Some(profile)) => FetchState::Ready(profile),
        Ok(None) | Err(ApiError::Unauthorized) => FetchState::Unauthenticated,
        Err(err) => {
            log::error!("Failed to load profile: {err}");
            FetchState::Error(error_message.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const ERROR: &str = "Failed to load dashboard. Please try again later.";

    enum Verify {
        Identity,
        Nobody,
        Hang,
        Fail,
    }

    struct FakeSource {
        verify: Verify,
        profile_fails: bool,
        verify_calls: AtomicUsize,
        profile_calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(verify: Verify) -> Self {
            Self {
                verify,
                profile_fails: false,
                verify_calls: AtomicUsize::new(0),
                profile_calls: AtomicUsize::new(0),
            }
        }
    }

    fn profile() -> UserProfile {
        serde_json::from_value(json!({"username": "alice", "email": "alice@example.com"})).unwrap()
    }

    impl ProfileSource for &FakeSource {
        async fn verify(&self) -> Result<Option<Identity>, ApiError> {
            self.verify_calls.fetch_add(1, Ordering::SeqCst);
            match self.verify {
                Verify::Identity => Ok(Some(Identity {
                    id: "u1".to_string(),
                    username: None,
                    email: None,
                })),
                Verify::Nobody => Ok(None),
                Verify::Hang => std::future::pending().await,
                Verify::Fail => Err(ApiError::Status {
                    status: 500,
                    message: "boom".to_string(),
                }),
            }
        }

        async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            if self.profile_fails {
                Err(ApiError::Parse("garbage".to_string()))
            } else {
                Ok(profile())
            }
        }
    }

    #[tokio::test]
    async fn given_valid_session_then_profile_is_ready() {
        let source = FakeSource::new(Verify::Identity);
        let mut fetcher = ProfileFetcher::new(&source, ERROR);
        assert_eq!(&FetchState::Loading, fetcher.state());
        assert_eq!(&FetchState::Ready(profile()), fetcher.load().await);
        assert_eq!(1, source.verify_calls.load(Ordering::SeqCst));
        assert_eq!(1, source.profile_calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn given_profile_is_held_then_it_is_not_fetched_again() {
        let source = FakeSource::new(Verify::Identity);
        let mut fetcher = ProfileFetcher::new(&source, ERROR);
        fetcher.load().await;
        fetcher.load().await;
        assert_eq!(1, source.profile_calls.load(Ordering::SeqCst));

        // a new view instance fetches again
        let mut fetcher = ProfileFetcher::new(&source, ERROR);
        fetcher.load().await;
        assert_eq!(2, source.profile_calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn given_no_identity_then_unauthenticated_without_profile_call() {
        let source = FakeSource::new(Verify::Nobody);
        let mut fetcher = ProfileFetcher::new(&source, ERROR);
        assert_eq!(&FetchState::Unauthenticated, fetcher.load().await);
        assert_eq!(0, source.profile_calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn given_verify_fails_then_static_error_message() {
        let source = FakeSource::new(Verify::Fail);
        let mut fetcher = ProfileFetcher::new(&source, ERROR);
        assert_eq!(&FetchState::Error(ERROR.to_string()), fetcher.load().await);
        assert_eq!(0, source.profile_calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn given_profile_fails_then_error_and_retry_on_next_load() {
        let source = FakeSource {
            profile_fails: true,
            ..FakeSource::new(Verify::Identity)
        };
        let mut fetcher = ProfileFetcher::new(&source, ERROR);
        assert_eq!(&FetchState::Error(ERROR.to_string()), fetcher.load().await);
        fetcher.load().await;
        assert_eq!(2, source.profile_calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn given_cancellation_then_state_is_untouched() {
        let source = FakeSource::new(Verify::Hang);
        let mut fetcher = ProfileFetcher::new(&source, ERROR);
        assert_eq!(None, fetcher.load_until(async {}).await);
        assert_eq!(&FetchState::Loading, fetcher.state());
        assert_eq!(0, source.profile_calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn given_profile_is_held_then_cancellation_is_irrelevant() {
        let source = FakeSource::new(Verify::Identity);
        let mut fetcher = ProfileFetcher::new(&source, ERROR);
        fetcher.load().await;
        assert_eq!(
            Some(&FetchState::Ready(profile())),
            fetcher.load_until(async {}).await
        );
        assert_eq!(1, source.verify_calls.load(Ordering::SeqCst));
    }
}
