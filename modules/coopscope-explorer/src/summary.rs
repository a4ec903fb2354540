//! Display aggregates over the filtered record set.
//!
//! Recomputed from scratch on every call. Capacities are summed as raw
//! numbers; units are never converted.

use std::collections::{BTreeMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use coopscope_common::Cooperative;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub coop_count: usize,
    pub total_members: u64,
    pub total_capacity: f64,
    pub distinct_buyers: usize,
    pub by_sector: BTreeMap<String, usize>,
    pub by_value_chain: BTreeMap<String, usize>,
    pub by_district: BTreeMap<String, usize>,
    pub capacity_by_district: BTreeMap<String, f64>,
}

/// Summarize `records`. An empty input yields all-zero aggregates.
pub fn aggregates<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a Cooperative>,
{
    let mut summary = Summary::default();
    let mut buyers: HashSet<&str> = HashSet::new();

    for record in records {
        summary.coop_count += 1;
        summary.total_members += u64::from(record.members);
        summary.total_capacity += record.capacity;
        buyers.insert(record.buyer.as_str());

        *summary.by_sector.entry(record.sector.clone()).or_default() += 1;
        *summary
            .by_value_chain
            .entry(record.value_chain.to_string())
            .or_default() += 1;
        *summary.by_district.entry(record.district.clone()).or_default() += 1;
        *summary
            .capacity_by_district
            .entry(record.district.clone())
            .or_default() += record.capacity;
    }

    summary.distinct_buyers = buyers.len();
    summary
}
