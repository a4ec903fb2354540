//! Filter engine.
//!
//! A record passes a `FilterSpec` iff every active predicate holds: free-text
//! match, exact equality for scalar selectors, membership for list selectors,
//! inclusive numeric ranges, and buyer-country resolution. There is no OR/NOT.
//! Filtering is stable: output keeps the relative order of the input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use coopscope_common::config::{RangesConfig, DEFAULT_CAPACITY_MAX, DEFAULT_MEMBERS_MAX};
use coopscope_common::{Cooperative, FieldKind, Selector};

use crate::countries::BuyerCountryLookup;
use crate::search::matches_query;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` range. An inverted range contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumericRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> NumericRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Everything the user currently wants to see. A plain value: clone it,
/// compare it, replace it wholesale.
///
/// `None` selectors are skipped, not "match nothing". Ranges are always set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FilterSpec {
    /// Free-text query. Empty matches everything.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub value_chain: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub certification: Option<String>,
    #[serde(default)]
    pub fdi_priority: Option<String>,
    #[serde(default)]
    pub esg_tag: Option<String>,
    #[serde(default)]
    pub export_history: Option<String>,
    #[serde(default)]
    pub buyer_country: Option<String>,
    pub members: NumericRange<u32>,
    pub capacity: NumericRange<f64>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::with_bounds(DEFAULT_MEMBERS_MAX, DEFAULT_CAPACITY_MAX)
    }
}

impl FilterSpec {
    /// Default spec with ranges `[0, members_max]` and `[0, capacity_max]`.
    pub fn with_bounds(members_max: u32, capacity_max: f64) -> Self {
        Self {
            query: String::new(),
            sector: None,
            value_chain: None,
            district: None,
            buyer: None,
            certification: None,
            fdi_priority: None,
            esg_tag: None,
            export_history: None,
            buyer_country: None,
            members: NumericRange::new(0, members_max),
            capacity: NumericRange::new(0.0, capacity_max),
        }
    }

    pub fn from_ranges(ranges: &RangesConfig) -> Self {
        Self::with_bounds(ranges.members_max, ranges.capacity_max)
    }

    pub fn selector(&self, selector: Selector) -> Option<&str> {
        self.selector_slot(selector).as_deref()
    }

    pub fn set_selector(&mut self, selector: Selector, value: Option<String>) {
        *self.selector_slot_mut(selector) = value;
    }

    /// Builder-style `set_selector`.
    pub fn with_selector(mut self, selector: Selector, value: impl Into<String>) -> Self {
        self.set_selector(selector, Some(value.into()));
        self
    }

    /// Reset every single-choice selector. Query and ranges are untouched.
    pub fn clear_selectors(&mut self) {
        for selector in Selector::ALL {
            self.set_selector(selector, None);
        }
    }

    /// Selectors currently set, with their values.
    pub fn active_selectors(&self) -> impl Iterator<Item = (Selector, &str)> + '_ {
        Selector::ALL
            .into_iter()
            .filter_map(move |selector| self.selector(selector).map(|value| (selector, value)))
    }

    fn selector_slot(&self, selector: Selector) -> &Option<String> {
        match selector {
            Selector::Sector => &self.sector,
            Selector::ValueChain => &self.value_chain,
            Selector::District => &self.district,
            Selector::Buyer => &self.buyer,
            Selector::Certification => &self.certification,
            Selector::FdiPriority => &self.fdi_priority,
            Selector::EsgTag => &self.esg_tag,
            Selector::ExportHistory => &self.export_history,
            Selector::BuyerCountry => &self.buyer_country,
        }
    }

    fn selector_slot_mut(&mut self, selector: Selector) -> &mut Option<String> {
        match selector {
            Selector::Sector => &mut self.sector,
            Selector::ValueChain => &mut self.value_chain,
            Selector::District => &mut self.district,
            Selector::Buyer => &mut self.buyer,
            Selector::Certification => &mut self.certification,
            Selector::FdiPriority => &mut self.fdi_priority,
            Selector::EsgTag => &mut self.esg_tag,
            Selector::ExportHistory => &mut self.export_history,
            Selector::BuyerCountry => &mut self.buyer_country,
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Does a single record satisfy every active predicate of `spec`?
pub fn matches<L>(record: &Cooperative, spec: &FilterSpec, countries: &L) -> bool
where
    L: BuyerCountryLookup + ?Sized,
{
    if !spec.query.is_empty() && !matches_query(record, &spec.query) {
        return false;
    }

    for (selector, wanted) in spec.active_selectors() {
        let passes = match selector.field() {
            Some(field) => field_matches(record, field, wanted),
            None => buyer_country_matches(record, wanted, countries),
        };
        if !passes {
            return false;
        }
    }

    spec.members.contains(record.members) && spec.capacity.contains(record.capacity)
}

/// Scalar fields compare by exact equality, list fields by membership.
fn field_matches(record: &Cooperative, field: FieldKind, wanted: &str) -> bool {
    let values = record.values(field);
    if field.is_list() {
        values.contains(&wanted)
    } else {
        values.first().is_some_and(|value| *value == wanted)
    }
}

/// Fails closed: a buyer missing from the directory never matches.
fn buyer_country_matches<L>(record: &Cooperative, wanted: &str, countries: &L) -> bool
where
    L: BuyerCountryLookup + ?Sized,
{
    match countries.resolve(&record.buyer) {
        Ok(country) => country == wanted,
        Err(e) => {
            debug!(id = %record.id, error = %e, "Excluding record from buyer-country filter");
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Records of `records` passing `spec`, in input order.
pub fn apply<'a, I, L>(records: I, spec: &FilterSpec, countries: &L) -> Vec<&'a Cooperative>
where
    I: IntoIterator<Item = &'a Cooperative>,
    L: BuyerCountryLookup + ?Sized,
{
    let mut considered = 0usize;
    let passed: Vec<&Cooperative> = records
        .into_iter()
        .inspect(|_| considered += 1)
        .filter(|record| matches(record, spec, countries))
        .collect();

    debug!(
        considered,
        passed = passed.len(),
        active_selectors = spec.active_selectors().count(),
        has_query = !spec.query.is_empty(),
        "Filter applied"
    );

    passed
}

// ===========================================================================
// Unit tests
// ===========================================================================
