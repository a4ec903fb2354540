//! Derived vocabularies: the distinct values a categorical field takes across
//! a record collection. Always recomputed, never cached.

use std::collections::{BTreeSet, HashSet};

use coopscope_common::{Cooperative, FieldKind};

/// Distinct non-empty values of `field` across `records`. List fields are
/// flattened, so a value counts once however many records carry it.
pub fn distinct_values<'a, I>(records: I, field: FieldKind) -> HashSet<&'a str>
where
    I: IntoIterator<Item = &'a Cooperative>,
{
    records
        .into_iter()
        .flat_map(|record| record.values(field))
        .filter(|value| !value.is_empty())
        .collect()
}

/// Distinct values in ascending order.
pub fn sorted_values<'a, I>(records: I, field: FieldKind) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Cooperative>,
{
    let sorted: BTreeSet<&str> = distinct_values(records, field).into_iter().collect();
    sorted.into_iter().collect()
}
