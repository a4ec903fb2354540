use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::info;

use coopscope_common::{CatalogError, Cooperative, FieldKind};

use crate::vocabulary;

const BUNDLED_CATALOG: &str = include_str!("../data/cooperatives.json");

/// The fixed, read-only cooperative catalog.
///
/// Built once per session and shared by reference. Records keep their
/// insertion order; `record_by_id` indexes into `records`.
#[derive(Debug)]
pub struct CatalogStore {
    records: Vec<Cooperative>,
    record_by_id: HashMap<String, usize>,
    loaded_at: DateTime<Utc>,
}

impl CatalogStore {
    /// Build a catalog from records. Fails if two records share an id.
    pub fn new(records: Vec<Cooperative>) -> Result<Self, CatalogError> {
        let start = std::time::Instant::now();

        let mut record_by_id: HashMap<String, usize> = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if record_by_id.insert(record.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }

        info!(
            records = records.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Cooperative catalog loaded"
        );

        Ok(Self {
            records,
            record_by_id,
            loaded_at: Utc::now(),
        })
    }

    /// Build a catalog from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<Cooperative> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// The dataset shipped with this crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Every record, in insertion order.
    pub fn all_records(&self) -> &[Cooperative] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Cooperative> {
        self.record_by_id.get(id).map(|&idx| &self.records[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.record_by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Distinct values of a categorical field across the whole catalog.
    /// List fields are flattened.
    pub fn distinct_values(&self, field: FieldKind) -> HashSet<&str> {
        vocabulary::distinct_values(&self.records, field)
    }

    /// Same as `distinct_values`, keyed by field name.
    pub fn distinct_values_by_name(&self, name: &str) -> Result<HashSet<&str>, CatalogError> {
        let field: FieldKind = name.parse()?;
        Ok(self.distinct_values(field))
    }

    /// Distinct values in ascending order, for populating selector choices.
    pub fn sorted_values(&self, field: FieldKind) -> Vec<&str> {
        vocabulary::sorted_values(&self.records, field)
    }
}
