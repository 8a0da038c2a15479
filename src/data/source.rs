//! Market data source abstraction
//!
//! The collector only needs two read-only requests from a provider, so any
//! backend (live HTTP, recorded fixture, test fake) plugs in behind this trait.

use std::collections::HashMap;

use crate::core::{Expiration, OptionChain, SurfaceError, SurfaceResult};

/// Read-only option data provider
pub trait OptionDataSource {
    /// Listed expirations for `ticker`, in provider order
    fn list_expirations(&self, ticker: &str) -> SurfaceResult<Vec<Expiration>>;

    /// Full chain for one listed expiration
    fn get_option_chain(&self, ticker: &str, expiration: &Expiration) -> SurfaceResult<OptionChain>;
}

/// Fixed in-memory chains, served in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    chains: HashMap<String, Vec<OptionChain>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chain for `ticker`; expirations list in the order chains are added
    pub fn add_chain(&mut self, ticker: &str, chain: OptionChain) {
        self.chains
            .entry(ticker.to_uppercase())
            .or_default()
            .push(chain);
    }

    /// Register `ticker` with no listed expirations
    pub fn add_ticker(&mut self, ticker: &str) {
        self.chains.entry(ticker.to_uppercase()).or_default();
    }

    /// Builder form of [`add_chain`](Self::add_chain)
    pub fn with_chain(mut self, ticker: &str, chain: OptionChain) -> Self {
        self.add_chain(ticker, chain);
        self
    }

    fn chains_for(&self, ticker: &str) -> SurfaceResult<&[OptionChain]> {
        self.chains
            .get(&ticker.to_uppercase())
            .map(Vec::as_slice)
            .ok_or_else(|| SurfaceError::data(format!("unknown ticker: {}", ticker)))
    }
}

impl OptionDataSource for InMemorySource {
    fn list_expirations(&self, ticker: &str) -> SurfaceResult<Vec<Expiration>> {
        Ok(self.chains_for(ticker)?.iter().map(|c| c.expiration).collect())
    }

    fn get_option_chain(&self, ticker: &str, expiration: &Expiration) -> SurfaceResult<OptionChain> {
        self.chains_for(ticker)?
            .iter()
            .find(|c| c.expiration == *expiration)
            .cloned()
            .ok_or_else(|| {
                SurfaceError::data(format!("no chain for {} expiring {}", ticker, expiration))
            })
    }
}
