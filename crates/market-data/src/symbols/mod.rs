//! Time-bounded symbol-list cache.
//!
//! Symbol lists change rarely but are consulted on every validation, so each
//! provider's list is cached with an explicit expiry instant. An expired
//! entry is refreshed through the provider (with the shared retry policy);
//! when the refresh fails the stale list is served instead, because a stale
//! symbol list beats no symbol list for validation purposes.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::errors::{fetch_with_retry, MarketDataError, RetryPolicy};
use crate::provider::CandleProvider;

/// Default time-to-live for a cached symbol list.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct CacheEntry {
    symbols: Vec<String>,
    expires_at: Instant,
}

/// Per-provider symbol-list cache with explicit expiry timestamps.
pub struct SymbolCache {
    ttl: Duration,
    retry: RetryPolicy,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl Default for SymbolCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolCache {
    /// Cache with the default 24h TTL and retry policy.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Cache with a caller-chosen TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            retry: RetryPolicy::default(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The symbol list for `provider`, served from cache while fresh.
    ///
    /// A failed refresh falls back to the stale entry when one exists; a
    /// failed first fetch propagates the provider error.
    pub async fn symbols(
        &self,
        provider: &dyn CandleProvider,
    ) -> Result<Vec<String>, MarketDataError> {
        let id = provider.id().to_string();

        {
            let entries = self.entries.read().expect("symbol cache lock poisoned");
            if let Some(entry) = entries.get(&id) {
                if entry.expires_at > Instant::now() {
                    debug!("symbol cache hit for {}", id);
                    return Ok(entry.symbols.clone());
                }
            }
        }

        match fetch_with_retry(&self.retry, || provider.fetch_symbols()).await {
            Ok(symbols) => {
                debug!("fetched {} symbols from {}", symbols.len(), id);
                let mut entries = self.entries.write().expect("symbol cache lock poisoned");
                entries.insert(
                    id,
                    CacheEntry {
                        symbols: symbols.clone(),
                        expires_at: Instant::now() + self.ttl,
                    },
                );
                Ok(symbols)
            }
            Err(err) => {
                let entries = self.entries.read().expect("symbol cache lock poisoned");
                if let Some(stale) = entries.get(&id) {
                    warn!(
                        "symbol refresh failed for {} ({}), serving stale list",
                        id, err
                    );
                    Ok(stale.symbols.clone())
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Whether `symbol` is currently tradable on `provider`.
    pub async fn contains(
        &self,
        provider: &dyn CandleProvider,
        symbol: &str,
    ) -> Result<bool, MarketDataError> {
        let symbols = self.symbols(provider).await?;
        Ok(symbols.iter().any(|s| s == symbol))
    }
}
