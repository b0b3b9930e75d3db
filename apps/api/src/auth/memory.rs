use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auth::{AuthError, AuthProvider, UserId, UserMetadata};

/// In-process identity provider for tests: session tokens map to users,
/// users carry their metadata. Reads and writes can be made to fail.
#[derive(Default)]
pub struct MemoryAuthProvider {
    sessions: RwLock<HashMap<String, UserId>>,
    users: RwLock<HashMap<UserId, UserMetadata>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user with an active session and an optional tier.
    pub async fn add_user(&self, token: &str, user_id: &str, tier: Option<&str>) -> UserId {
        let id = UserId(user_id.to_string());
        self.sessions
            .write()
            .await
            .insert(token.to_string(), id.clone());
        self.users.write().await.insert(
            id.clone(),
            UserMetadata {
                tier: tier.map(str::to_string),
            },
        );
        id
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set_tier` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn stored_tier(&self, user_id: &UserId) -> Option<String> {
        self.users
            .read()
            .await
            .get(user_id)
            .and_then(|m| m.tier.clone())
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn resolve_session(&self, token: &str) -> Result<Option<UserId>, AuthError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AuthError::Unavailable("session lookup disabled".into()));
        }
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn get_tier(&self, user_id: &UserId) -> Result<Option<String>, AuthError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AuthError::Unavailable("user lookup disabled".into()));
        }
        self.users
            .read()
            .await
            .get(user_id)
            .map(|m| m.tier.clone())
            .ok_or_else(|| AuthError::UserNotFound(user_id.0.clone()))
    }

    async fn set_tier(&self, user_id: &UserId, tier: &str) -> Result<(), AuthError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AuthError::Unavailable("metadata writes disabled".into()));
        }
        let mut users = self.users.write().await;
        let meta = users
            .get_mut(user_id)
            .ok_or_else(|| AuthError::UserNotFound(user_id.0.clone()))?;
        meta.tier = Some(tier.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_resolution() {
        let provider = MemoryAuthProvider::new();
        let id = provider.add_user("tok", "user_1", None).await;
        assert_eq!(provider.resolve_session("tok").await.unwrap(), Some(id));
        assert_eq!(provider.resolve_session("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_tier_unknown_user() {
        let provider = MemoryAuthProvider::new();
        let err = provider
            .set_tier(&UserId("ghost".into()), "free")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound(_)));
        assert_eq!(provider.write_count(), 0);
    }
}
