//! View Cache: per-language `{question, answer}` lists with a fixed expiry.
//!
//! Each language's view is stored as JSON under `faqs_<lang>`. Any write
//! flushes every language at once (`faqs_*`); there is no per-record or
//! per-language invalidation.
//!
//! The cache is an optimization only. Backend failures are logged and turn
//! into misses (on read) or no-ops (on write/flush); they never reach callers.

mod memory;
mod provider;
mod redis;

pub use memory::MemoryCacheStore;
pub use provider::{CacheError, CacheProvider, CacheResult};
pub use self::redis::RedisCacheStore;

use crate::faq::FaqView;
use std::time::Duration;
use tracing::{debug, warn};

/// Default lifetime of a cached view.
pub const DEFAULT_VIEW_TTL: Duration = Duration::from_secs(3600);

const KEY_PREFIX: &str = "faqs_";

fn view_key(lang: &str) -> String {
    format!("{}{}", KEY_PREFIX, lang)
}

#[derive(Clone)]
pub struct ViewCache {
    provider: CacheProvider,
    ttl: Duration,
}

impl ViewCache {
    pub fn new(provider: CacheProvider, ttl: Duration) -> Self {
        Self { provider, ttl }
    }

    /// Cached view for `lang`, or `None` on miss, expiry, or backend failure.
    pub async fn get(&self, lang: &str) -> Option<Vec<FaqView>> {
        let key = view_key(lang);
        let raw = match self.provider.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("View cache read failed for {}, rebuilding from store: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(views) => Some(views),
            Err(e) => {
                warn!("Discarding undecodable cached view {}: {}", key, e);
                None
            }
        }
    }

    /// Store the view for `lang`, replacing any prior entry.
    pub async fn put(&self, lang: &str, views: &[FaqView]) {
        let key = view_key(lang);
        let raw = match serde_json::to_string(views) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode view {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.provider.set_ex(&key, &raw, self.ttl).await {
            warn!("View cache write failed for {}: {}", key, e);
        }
    }

    /// Drop every cached language view.
    pub async fn invalidate_all(&self) {
        let pattern = format!("{}*", KEY_PREFIX);
        match self.provider.delete_pattern(&pattern).await {
            Ok(removed) => debug!("Invalidated {} cached views", removed),
            Err(e) => warn!("View cache flush failed: {}", e),
        }
    }
}
