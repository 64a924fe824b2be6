//! Provider registry: exchange identifier -> implementation table.
//!
//! Strategy-per-exchange as data. Callers look an exchange up by name and
//! get back a shared [`CandleProvider`] handle; there is no failover chain
//! or priority ordering, because candle series are exchange-specific and
//! mixing exchanges would splice incompatible series together.

use std::collections::HashMap;
use std::sync::Arc;

use crate::provider::binance::BinanceProvider;
use crate::provider::CandleProvider;

/// Table of registered exchanges, keyed by uppercase identifier.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn CandleProvider>>,
}

impl ProviderRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every implemented exchange: Binance and Binance.US.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BinanceProvider::binance()));
        registry.register(Arc::new(BinanceProvider::binance_us()));
        registry
    }

    /// Add a provider under its own id. Re-registering an id replaces the
    /// previous instance.
    pub fn register(&mut self, provider: Arc<dyn CandleProvider>) {
        self.providers
            .insert(provider.id().to_uppercase(), provider);
    }

    /// Look up a provider by exchange id, case-insensitively.
    pub fn get(&self, id: &str) -> Option<Arc<dyn CandleProvider>> {
        self.providers.get(&id.to_uppercase()).cloned()
    }

    /// Registered exchange ids, sorted for stable output.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.keys().cloned().collect();
        ids.sort();
        ids
    }
}
