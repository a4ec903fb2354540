//! Selection & derivation layer.
//!
//! `ExplorerSession` is the single writer of the filter spec and the
//! selection. Every mutation builds a complete new `FilterSpec` and swaps it
//! in; readers only ever see whole specs. The catalog is shared read-only.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use coopscope_catalog::{filter, BuyerCountries, CatalogStore, FilterSpec, NumericRange};
use coopscope_common::{CatalogError, Cooperative, ExplorerConfig, FieldKind, Selector};

use crate::events::ExplorerEvent;
use crate::export::{export_csv, CsvExport};
use crate::hubs::{self, HubGraph, HubKind};
use crate::selection::Selection;
use crate::summary::{aggregates, Summary};

/// Distinguishes "nothing applied yet" from "applied, zero matches".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", content = "count", rename_all = "snake_case")]
pub enum ResultState {
    NotApplied,
    Results(usize),
}

#[derive(Debug)]
pub struct ExplorerSession {
    catalog: Arc<CatalogStore>,
    countries: BuyerCountries,
    defaults: FilterSpec,
    spec: FilterSpec,
    selection: Selection,
    applied: bool,
    export_file_name: String,
}

impl ExplorerSession {
    pub fn new(catalog: Arc<CatalogStore>, config: &ExplorerConfig) -> Self {
        Self::from_parts(
            catalog,
            BuyerCountries::from_config(config),
            FilterSpec::from_ranges(&config.ranges),
            config.export.file_name.clone(),
        )
    }

    pub fn from_parts(
        catalog: Arc<CatalogStore>,
        countries: BuyerCountries,
        defaults: FilterSpec,
        export_file_name: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            countries,
            spec: defaults.clone(),
            defaults,
            selection: Selection::Idle,
            applied: false,
            export_file_name: export_file_name.into(),
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn countries(&self) -> &BuyerCountries {
        &self.countries
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn defaults(&self) -> &FilterSpec {
        &self.defaults
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // --- Selection ---

    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        debug!(from = %self.selection, id = %id, "Selection changed");
        self.selection = Selection::Viewing(id);
    }

    pub fn clear_selection(&mut self) {
        debug!(from = %self.selection, "Selection cleared");
        self.selection = Selection::Idle;
    }

    /// The selected record, if the id resolves. A dangling id yields `None`.
    pub fn selected_record(&self) -> Option<&Cooperative> {
        let id = self.selection.selected_id()?;
        let record = self.catalog.get(id);
        if record.is_none() {
            warn!(id, "Selected cooperative not found in catalog");
        }
        record
    }

    // --- Focus ---

    /// Set exactly one selector and drop the selection.
    pub fn focus_category(&mut self, selector: Selector, value: impl Into<String>) {
        let value = value.into();
        debug!(selector = %selector, value = %value, "Category focused");
        let spec = self.spec.clone().with_selector(selector, value);
        self.replace_spec(spec);
        self.selection = Selection::Idle;
    }

    /// `focus_category` keyed by selector name, e.g. `"fdiPriority"`.
    pub fn focus_category_by_name(
        &mut self,
        selector: &str,
        value: impl Into<String>,
    ) -> Result<(), CatalogError> {
        let selector: Selector = selector.parse()?;
        self.focus_category(selector, value);
        Ok(())
    }

    /// Unset every selector. Query and ranges are kept.
    pub fn clear_focus(&mut self) {
        debug!(
            active = self.spec.active_selectors().count(),
            "Category focus cleared"
        );
        let mut spec = self.spec.clone();
        spec.clear_selectors();
        self.replace_spec(spec);
    }

    /// Restore the default spec and drop the selection.
    pub fn reset_all(&mut self) {
        debug!("Explorer reset");
        self.replace_spec(self.defaults.clone());
        self.selection = Selection::Idle;
    }

    // --- Filter mutations ---

    pub fn set_query(&mut self, query: impl Into<String>) {
        let spec = FilterSpec {
            query: query.into(),
            ..self.spec.clone()
        };
        self.replace_spec(spec);
    }

    pub fn set_selector(&mut self, selector: Selector, value: impl Into<String>) {
        let spec = self.spec.clone().with_selector(selector, value);
        self.replace_spec(spec);
    }

    pub fn clear_selector(&mut self, selector: Selector) {
        let mut spec = self.spec.clone();
        spec.set_selector(selector, None);
        self.replace_spec(spec);
    }

    pub fn set_member_range(&mut self, min: u32, max: u32) {
        let spec = FilterSpec {
            members: NumericRange::new(min, max),
            ..self.spec.clone()
        };
        self.replace_spec(spec);
    }

    pub fn set_capacity_range(&mut self, min: f64, max: f64) {
        let spec = FilterSpec {
            capacity: NumericRange::new(min, max),
            ..self.spec.clone()
        };
        self.replace_spec(spec);
    }

    /// Swap in a whole new spec. Marks the results as applied.
    pub fn replace_spec(&mut self, spec: FilterSpec) {
        self.spec = spec;
        self.applied = true;
    }

    pub fn handle(&mut self, event: ExplorerEvent) {
        debug!(event_type = event.event_type(), "Handling explorer event");
        match event {
            ExplorerEvent::CoopActivated { id } => self.select(id),
            ExplorerEvent::SectorActivated { sector } => {
                self.focus_category(Selector::Sector, sector)
            }
            ExplorerEvent::FdiActivated { priority } => {
                self.focus_category(Selector::FdiPriority, priority)
            }
            ExplorerEvent::BuyerActivated { buyer } => self.focus_category(Selector::Buyer, buyer),
            ExplorerEvent::CountryActivated { country } => {
                self.focus_category(Selector::BuyerCountry, country)
            }
            ExplorerEvent::SelectionCleared => self.clear_selection(),
            ExplorerEvent::FocusCleared => self.clear_focus(),
            ExplorerEvent::ResetRequested => self.reset_all(),
        }
    }

    // --- Derived views ---

    /// Mark the current spec as applied without changing it.
    pub fn apply(&mut self) {
        self.applied = true;
    }

    /// The filtered set for the current spec.
    ///
    /// Empty until the session is first applied, which looks the same as an
    /// applied spec with no matches. Use `result_state` to tell them apart.
    pub fn filtered(&self) -> Vec<&Cooperative> {
        if !self.applied {
            return Vec::new();
        }
        filter::apply(self.catalog.all_records(), &self.spec, &self.countries)
    }

    pub fn result_state(&self) -> ResultState {
        if self.applied {
            ResultState::Results(self.filtered().len())
        } else {
            ResultState::NotApplied
        }
    }

    /// Aggregates over `filtered`. All zero before the first apply.
    pub fn summary(&self) -> Summary {
        aggregates(self.filtered())
    }

    /// Sorted values of `field` across the whole catalog, for selector options.
    pub fn vocabulary(&self, field: FieldKind) -> Vec<&str> {
        self.catalog.sorted_values(field)
    }

    /// Sorted values of `field` across the filtered set only. Empty before
    /// the first apply.
    pub fn filtered_vocabulary(&self, field: FieldKind) -> Vec<&str> {
        coopscope_catalog::sorted_values(self.filtered(), field)
    }

    /// Countries reachable through the catalog's buyers, ascending.
    pub fn buyer_country_choices(&self) -> Vec<&str> {
        self.countries.countries_for(self.catalog.all_records())
    }

    /// CSV of `filtered`. Header only before the first apply.
    pub fn export(&self) -> CsvExport {
        CsvExport {
            file_name: self.export_file_name.clone(),
            body: export_csv(self.filtered()),
        }
    }

    /// Hub graph over `filtered`. Empty before the first apply.
    pub fn hub_graph(&self, kind: HubKind) -> HubGraph {
        hubs::hub_graph(self.filtered(), kind, &self.countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ExplorerSession {
        let catalog = Arc::new(CatalogStore::bundled().unwrap());
        let mut session = ExplorerSession::new(catalog, &ExplorerConfig::default());
        session.apply();
        session
    }

    fn ids(session: &ExplorerSession) -> Vec<&str> {
        session.filtered().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn new_session_is_not_applied() {
        let catalog = Arc::new(CatalogStore::bundled().unwrap());
        let session = ExplorerSession::new(catalog, &ExplorerConfig::default());
        assert_eq!(session.result_state(), ResultState::NotApplied);
        assert!(session.filtered().is_empty());
    }

    #[test]
    fn views_are_empty_until_applied() {
        let catalog = Arc::new(CatalogStore::bundled().unwrap());
        let mut session = ExplorerSession::new(catalog, &ExplorerConfig::default());

        assert_eq!(session.summary().coop_count, 0);
        assert_eq!(session.export().body.lines().count(), 1);
        assert!(session.hub_graph(HubKind::Sector).nodes.is_empty());
        assert!(session.filtered_vocabulary(FieldKind::Sector).is_empty());
        assert_eq!(session.result_state(), ResultState::NotApplied);

        session.apply();
        assert_eq!(session.summary().coop_count, 8);
        assert_eq!(session.export().body.lines().count(), 9);
        assert_eq!(session.hub_graph(HubKind::Sector).links.len(), 8);
        assert_eq!(session.result_state(), ResultState::Results(8));
    }

    #[test]
    fn result_state_serializes_with_state_tag() {
        let json = serde_json::to_value(ResultState::Results(3)).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "results", "count": 3 }));
        let json = serde_json::to_value(ResultState::NotApplied).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "not_applied" }));
    }

    #[test]
    fn session_debug_shows_state() {
        let mut session = session();
        session.select("co4");
        let debug = format!("{session:?}");
        assert!(debug.contains("ExplorerSession"));
        assert!(debug.contains("co4"));
    }

    #[test]
    fn zero_results_differs_from_not_applied() {
        let mut session = session();
        session.set_query("no such cooperative");
        assert_eq!(session.result_state(), ResultState::Results(0));
    }

    #[test]
    fn select_resolves_record() {
        let mut session = session();
        session.select("co2");
        assert_eq!(session.selected_record().unwrap().sector, "Cacao");
    }

    #[test]
    fn dangling_selection_resolves_to_none() {
        let mut session = session();
        session.select("co99");
        assert_eq!(session.selection().selected_id(), Some("co99"));
        assert!(session.selected_record().is_none());
    }

    #[test]
    fn focus_by_name_rejects_unknown_selector() {
        let mut session = session();
        let err = session.focus_category_by_name("partners", "WWF").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFieldKind(_)));
        assert_eq!(session.spec(), session.defaults());
    }

    #[test]
    fn focus_by_name_accepts_camel_case() {
        let mut session = session();
        session.focus_category_by_name("fdiPriority", "Nearshoring").unwrap();
        assert_eq!(ids(&session), vec!["co8"]);
    }

    #[test]
    fn clear_focus_keeps_query_and_ranges() {
        let mut session = session();
        session.set_query("organic");
        session.set_member_range(20, 500);
        session.focus_category(Selector::District, "Cayo");
        session.clear_focus();

        assert_eq!(session.spec().query, "organic");
        assert_eq!(session.spec().members, NumericRange::new(20, 500));
        assert_eq!(session.spec().active_selectors().count(), 0);
        assert_eq!(ids(&session), vec!["co2", "co5"]);
    }

    #[test]
    fn clear_selector_only_drops_that_selector() {
        let mut session = session();
        session.set_selector(Selector::Sector, "Aquaculture");
        session.set_selector(Selector::District, "Corozal");
        assert_eq!(ids(&session), vec!["co8"]);

        session.clear_selector(Selector::District);
        assert_eq!(ids(&session), vec!["co7", "co8"]);
    }

    #[test]
    fn country_event_fails_closed_for_unmapped_buyers() {
        let mut session = session();
        session.handle(ExplorerEvent::CountryActivated {
            country: "Belize".into(),
        });
        assert_eq!(ids(&session), vec!["co4", "co6"]);

        session.handle(ExplorerEvent::CountryActivated {
            country: "Honduras".into(),
        });
        assert_eq!(session.result_state(), ResultState::Results(0));
    }

    #[test]
    fn events_drive_selection_and_focus() {
        let mut session = session();
        session.handle(ExplorerEvent::CoopActivated { id: "co1".into() });
        assert_eq!(session.selection(), &Selection::Viewing("co1".into()));

        session.handle(ExplorerEvent::SectorActivated {
            sector: "Aquaculture".into(),
        });
        assert!(session.selection().is_idle());
        assert_eq!(session.spec().sector.as_deref(), Some("Aquaculture"));

        session.handle(ExplorerEvent::FocusCleared);
        assert_eq!(session.spec().sector, None);

        session.handle(ExplorerEvent::CoopActivated { id: "co3".into() });
        session.handle(ExplorerEvent::SelectionCleared);
        assert!(session.selection().is_idle());
    }

    #[test]
    fn export_uses_configured_file_name() {
        let catalog = Arc::new(CatalogStore::bundled().unwrap());
        let config = coopscope_common::parse_config("[export]\nfile_name = \"coops.csv\"\n").unwrap();
        let mut session = ExplorerSession::new(catalog, &config);
        session.apply();
        session.set_selector(Selector::Sector, "Honey");

        let export = session.export();
        assert_eq!(export.file_name, "coops.csv");
        assert_eq!(export.body.lines().count(), 2);
    }

    #[test]
    fn filtered_vocabulary_narrows_with_spec() {
        let mut session = session();
        session.set_selector(Selector::FdiPriority, "Blue Economy");
        assert_eq!(
            session.filtered_vocabulary(FieldKind::District),
            vec!["Belize", "Corozal", "Stann Creek"]
        );
        assert_eq!(session.vocabulary(FieldKind::District).len(), 6);
    }

    #[test]
    fn buyer_country_choices_come_from_catalog_buyers() {
        let session = session();
        assert_eq!(
            session.buyer_country_choices(),
            vec!["Belize", "Canada", "Mexico", "United Kingdom", "United States"]
        );
    }

    #[test]
    fn hub_graph_follows_filtered_set() {
        let mut session = session();
        session.set_selector(Selector::District, "Stann Creek");
        let graph = session.hub_graph(HubKind::Sector);
        assert_eq!(graph.links.len(), 2);
        assert_eq!(graph.hubs().count(), 2);
    }
}
