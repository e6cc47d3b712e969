//! Process-local identity cache.
//!
//! Caches the resolved [`Identity`] for a user id so that token-guarded
//! requests do not hit the users table on every call. Entries expire after a
//! TTL and are removed lazily on read; any mutation of a user (role change,
//! activation, deletion, password change) must call
//! [`IdentityCache::invalidate`] so the next request observes fresh state.
//!
//! The cache is deliberately per-process. Each instance of the API resolves
//! and caches independently, and a restart starts cold.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use crate::modules::users::model::Identity;

struct CachedIdentity {
    identity: Identity,
    expires_at: Instant,
}

/// Shared handle to the identity cache. Cloning is cheap; all clones observe
/// the same entries.
#[derive(Clone)]
pub struct IdentityCache {
    entries: Arc<DashMap<Uuid, CachedIdentity>>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Returns the cached identity if present and not yet expired.
    ///
    /// Expired entries are dropped on the way out. The removal re-checks the
    /// deadline so a concurrent `put` that just renewed the entry is not
    /// discarded.
    pub fn get(&self, user_id: &Uuid) -> Option<Identity> {
        let entry = self.entries.get(user_id)?;

        if Instant::now() >= entry.expires_at {
            drop(entry);
            self.entries
                .remove_if(user_id, |_, cached| Instant::now() >= cached.expires_at);
            return None;
        }

        Some(entry.identity.clone())
    }

    /// Stores an identity, overwriting any existing entry and its deadline.
    pub fn put(&self, identity: Identity, ttl: Duration) {
        self.entries.insert(
            identity.id,
            CachedIdentity {
                identity,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Drops the entry for a user. A miss is fine; invalidation is
    /// idempotent.
    pub fn invalidate(&self, user_id: &Uuid) {
        self.entries.remove(user_id);
    }
}

impl Default for IdentityCache {
    fn default() -> Self {
        Self::new()
    }
}
