//! Process-wide session token cache.
//!
//! Lifecycle: empty at startup, filled by the first successful fetch,
//! invalidated when the backend rejects the token, cleared when the
//! session ends. The lock is held across the fetch so concurrent first
//! callers share one request.

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{ApiError, Backend};

/// Logical storage key of the cached token.
pub const SESSION_TOKEN_KEY: &str = "sessionToken";

#[derive(Debug, Default)]
pub struct SessionTokenCache {
    slot: Mutex<Option<String>>,
}

impl SessionTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, fetching and caching it on first use.
    pub async fn get_or_fetch(&self, backend: &dyn Backend) -> Result<String, ApiError> {
        let mut slot = self.slot.lock().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }

        let token = backend.fetch_session_token().await?;
        info!(key = SESSION_TOKEN_KEY, "Session token cached");
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Current token without fetching.
    pub async fn cached(&self) -> Option<String> {
        self.slot.lock().await.clone()
    }

    /// Drop `stale` if it is still the cached value. A token that was
    /// already replaced by another caller is left alone.
    pub async fn invalidate(&self, stale: &str) {
        let mut slot = self.slot.lock().await;
        if slot.as_deref() == Some(stale) {
            debug!(key = SESSION_TOKEN_KEY, "Session token invalidated");
            *slot = None;
        }
    }

    /// Forget the token at session end.
    pub async fn clear(&self) {
        *self.slot.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{Call, FakeBackend};

    #[tokio::test]
    async fn test_fetches_once_and_reuses_value() {
        let backend = FakeBackend::new();
        let cache = SessionTokenCache::new();

        let first = cache.get_or_fetch(&backend).await.unwrap();
        for _ in 0..5 {
            assert_eq!(cache.get_or_fetch(&backend).await.unwrap(), first);
        }

        assert_eq!(backend.count(|c| matches!(c, Call::FetchToken)), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let backend = FakeBackend::new();
        backend.set_fail_token(true);
        let cache = SessionTokenCache::new();

        assert!(cache.get_or_fetch(&backend).await.is_err());
        assert_eq!(cache.cached().await, None);

        backend.set_fail_token(false);
        assert!(cache.get_or_fetch(&backend).await.is_ok());
        assert_eq!(backend.count(|c| matches!(c, Call::FetchToken)), 2);
    }

    #[tokio::test]
    async fn test_invalidate_ignores_replaced_token() {
        let backend = FakeBackend::new();
        let cache = SessionTokenCache::new();
        let token = cache.get_or_fetch(&backend).await.unwrap();

        cache.invalidate("some-older-token").await;
        assert_eq!(cache.cached().await, Some(token.clone()));

        cache.invalidate(&token).await;
        assert_eq!(cache.cached().await, None);
    }

    #[tokio::test]
    async fn test_clear_forces_new_fetch() {
        let backend = FakeBackend::new();
        let cache = SessionTokenCache::new();

        let first = cache.get_or_fetch(&backend).await.unwrap();
        cache.clear().await;
        let second = cache.get_or_fetch(&backend).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(backend.count(|c| matches!(c, Call::FetchToken)), 2);
    }
}
