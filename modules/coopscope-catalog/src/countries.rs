//! Buyer → country resolution.
//!
//! Records carry a buyer name but no country. The country is looked up by
//! buyer name through a single directory so every consumer (filter, hubs,
//! vocabularies) resolves the same way.

use std::collections::{BTreeMap, BTreeSet};

use coopscope_common::{CatalogError, Cooperative, ExplorerConfig};

pub trait BuyerCountryLookup {
    fn country_for(&self, buyer: &str) -> Option<&str>;

    fn resolve(&self, buyer: &str) -> Result<&str, CatalogError> {
        self.country_for(buyer)
            .ok_or_else(|| CatalogError::UnresolvedBuyerCountry {
                buyer: buyer.to_string(),
            })
    }
}

/// Table-backed buyer directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuyerCountries {
    by_buyer: BTreeMap<String, String>,
}

impl BuyerCountries {
    pub fn new(by_buyer: BTreeMap<String, String>) -> Self {
        Self { by_buyer }
    }

    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self::new(config.buyer_countries.clone())
    }

    /// Countries resolvable from the buyers present in `records`, ascending.
    /// Buyers without an entry contribute nothing.
    pub fn countries_for<'a, I>(&'a self, records: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a Cooperative>,
    {
        let countries: BTreeSet<&str> = records
            .into_iter()
            .filter_map(|record| self.country_for(&record.buyer))
            .collect();
        countries.into_iter().collect()
    }
}

impl BuyerCountryLookup for BuyerCountries {
    fn country_for(&self, buyer: &str) -> Option<&str> {
        self.by_buyer.get(buyer).map(String::as_str)
    }
}
