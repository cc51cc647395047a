//! Profile loader: one fetch per page load, resolved into a three-way state.

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::models::profile::Profile;
use crate::store::{ProfileSource, StoreError};

/// Why the page shows an error banner instead of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// The query succeeded but returned no row.
    NoData,
    /// The query itself failed. Details go to the log, not to the page.
    LoadFailed,
}

impl LoadError {
    /// User-facing message (es-CO).
    pub fn message(self) -> &'static str {
        match self {
            LoadError::NoData => "No hay datos de perfil.",
            LoadError::LoadFailed => "Error cargando perfil.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Error(LoadError),
    Populated(Box<Profile>),
}

/// Owns the load state for one rendering surface.
///
/// Starts in `Loading`; `load` issues exactly one fetch. If the cancellation
/// token fires first, the in-flight fetch is dropped and the state is left
/// untouched.
pub struct ProfileLoader {
    state: LoadState,
    cancel: CancellationToken,
    fetched: bool,
}

impl ProfileLoader {
    pub fn new() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            state: LoadState::Loading,
            cancel,
            fetched: false,
        }
    }

    /// Handle the owning view fires on teardown.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn into_state(self) -> LoadState {
        self.state
    }

    pub async fn load(&mut self, source: &dyn ProfileSource) -> &LoadState {
        if self.fetched {
            return &self.state;
        }
        self.fetched = true;

        let cancel = self.cancel.clone();
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Profile fetch discarded: view torn down");
                return &self.state;
            }
            outcome = source.newest_profile() => outcome,
        };

        self.state = settle(outcome);
        &self.state
    }
}

impl Default for ProfileLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a fetch outcome to the state it produces.
pub fn settle(outcome: Result<Option<Profile>, StoreError>) -> LoadState {
    match outcome {
        Ok(Some(profile)) => LoadState::Populated(Box::new(profile)),
        Ok(None) => {
            warn!("Profile store returned no rows");
            LoadState::Error(LoadError::NoData)
        }
        Err(e) => {
            error!("Error loading profile: {e}");
            LoadState::Error(LoadError::LoadFailed)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    /// In-memory source that replays a fixed outcome and counts fetches.
    pub(crate) struct FakeSource {
        profile: Option<Profile>,
        fail: bool,
        pub(crate) calls: AtomicUsize,
    }

    impl FakeSource {
        pub(crate) fn with(profile: Profile) -> Self {
            Self { profile: Some(profile), fail: false, calls: AtomicUsize::new(0) }
        }

        pub(crate) fn empty() -> Self {
            Self { profile: None, fail: false, calls: AtomicUsize::new(0) }
        }

        pub(crate) fn failing() -> Self {
            Self { profile: None, fail: true, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl ProfileSource for FakeSource {
        async fn newest_profile(&self) -> Result<Option<Profile>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Api {
                    status: 500,
                    message: "connection reset".to_string(),
                });
            }
            Ok(self.profile.clone())
        }
    }

    /// Never resolves.
    struct HangingSource;

    #[async_trait]
    impl ProfileSource for HangingSource {
        async fn newest_profile(&self) -> Result<Option<Profile>, StoreError> {
            std::future::pending().await
        }
    }

    fn profile() -> Profile {
        Profile {
            id: "p1".to_string(),
            full_name: "Ana Gómez".to_string(),
            ..Profile::default()
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        assert_eq!(ProfileLoader::new().state(), &LoadState::Loading);
    }

    #[tokio::test]
    async fn test_record_populates() {
        let source = FakeSource::with(profile());
        let mut loader = ProfileLoader::new();
        let state = loader.load(&source).await;
        assert_eq!(state, &LoadState::Populated(Box::new(profile())));
    }

    #[tokio::test]
    async fn test_empty_result_is_no_data() {
        let mut loader = ProfileLoader::new();
        loader.load(&FakeSource::empty()).await;
        assert_eq!(loader.state(), &LoadState::Error(LoadError::NoData));
    }

    #[tokio::test]
    async fn test_failure_is_load_failed_without_detail() {
        let mut loader = ProfileLoader::new();
        loader.load(&FakeSource::failing()).await;
        assert_eq!(loader.state(), &LoadState::Error(LoadError::LoadFailed));
        assert!(!LoadError::LoadFailed.message().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_exactly_one_fetch() {
        let source = FakeSource::with(profile());
        let mut loader = ProfileLoader::new();
        loader.load(&source).await;
        loader.load(&source).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_fetch_leaves_state_untouched() {
        let source = FakeSource::with(profile());
        let mut loader = ProfileLoader::new();
        loader.cancellation().cancel();
        loader.load(&source).await;
        assert_eq!(loader.state(), &LoadState::Loading);
    }

    #[tokio::test]
    async fn test_cancel_discards_in_flight_fetch() {
        let token = CancellationToken::new();
        let mut loader = ProfileLoader::with_cancellation(token.clone());
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            token.cancel();
        });
        loader.load(&HangingSource).await;
        assert_eq!(loader.into_state(), LoadState::Loading);
    }

    #[test]
    fn test_messages_are_distinct() {
        assert_ne!(LoadError::NoData.message(), LoadError::LoadFailed.message());
    }
}
