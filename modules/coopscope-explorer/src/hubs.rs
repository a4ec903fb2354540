//! Hub graph: node/link data for the force-directed graph collaborator.
//!
//! One node per cooperative, one hub per distinct category value, and one
//! link from each cooperative to its hub. Layout and drawing live elsewhere.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use coopscope_catalog::BuyerCountryLookup;
use coopscope_common::{Cooperative, Selector};

/// The category cooperatives are grouped around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HubKind {
    Sector,
    FdiPriority,
    Buyer,
    BuyerCountry,
}

impl HubKind {
    /// The selector a hub activation focuses.
    pub fn selector(&self) -> Selector {
        match self {
            HubKind::Sector => Selector::Sector,
            HubKind::FdiPriority => Selector::FdiPriority,
            HubKind::Buyer => Selector::Buyer,
            HubKind::BuyerCountry => Selector::BuyerCountry,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GraphNodeKind {
    Cooperative,
    Hub,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphNode {
    pub id: String,
    pub kind: GraphNodeKind,
    pub label: String,
    /// Membership count for a cooperative, linked cooperatives for a hub.
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HubGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl HubGraph {
    pub fn hubs(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.kind == GraphNodeKind::Hub)
    }
}

pub fn hub_id(kind: HubKind, value: &str) -> String {
    format!("hub:{}:{value}", kind.selector())
}

/// Build the hub graph over `records`. Hubs appear in first-seen order after
/// all cooperative nodes. Records with an empty category value, or whose
/// buyer has no known country, stay unlinked.
pub fn hub_graph<'a, I, L>(records: I, kind: HubKind, countries: &L) -> HubGraph
where
    I: IntoIterator<Item = &'a Cooperative>,
    L: BuyerCountryLookup + ?Sized,
{
    let mut graph = HubGraph::default();
    let mut hubs: Vec<GraphNode> = Vec::new();
    let mut hub_index: HashMap<String, usize> = HashMap::new();

    for record in records {
        graph.nodes.push(GraphNode {
            id: record.id.clone(),
            kind: GraphNodeKind::Cooperative,
            label: record.name.clone(),
            weight: record.members,
        });

        let value = match kind {
            HubKind::Sector => Some(record.sector.as_str()),
            HubKind::FdiPriority => Some(record.fdi_priority.as_str()),
            HubKind::Buyer => Some(record.buyer.as_str()),
            HubKind::BuyerCountry => countries.country_for(&record.buyer),
        };
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            continue;
        };

        let idx = *hub_index.entry(value.to_string()).or_insert_with(|| {
            hubs.push(GraphNode {
                id: hub_id(kind, value),
                kind: GraphNodeKind::Hub,
                label: value.to_string(),
                weight: 0,
            });
            hubs.len() - 1
        });
        hubs[idx].weight += 1;

        graph.links.push(GraphLink {
            source: record.id.clone(),
            target: hubs[idx].id.clone(),
        });
    }

    graph.nodes.extend(hubs);
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use coopscope_catalog::{BuyerCountries, CatalogStore};
    use coopscope_common::ExplorerConfig;

    #[test]
    fn sector_hubs_count_members() {
        let store = CatalogStore::bundled().unwrap();
        let graph = hub_graph(store.all_records(), HubKind::Sector, &BuyerCountries::default());

        assert_eq!(graph.links.len(), 8);
        let aquaculture = graph
            .hubs()
            .find(|h| h.label == "Aquaculture")
            .unwrap();
        assert_eq!(aquaculture.weight, 2);
        assert_eq!(aquaculture.id, "hub:sector:Aquaculture");
        // 8 cooperatives + 7 distinct sectors
        assert_eq!(graph.nodes.len(), 15);
    }

    #[test]
    fn hubs_follow_cooperatives_in_first_seen_order() {
        let store = CatalogStore::bundled().unwrap();
        let graph = hub_graph(store.all_records(), HubKind::FdiPriority, &BuyerCountries::default());
        let labels: Vec<&str> = graph.hubs().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["Blue Economy", "Agro-processing", "Nearshoring"]);
        assert!(graph.nodes[..8]
            .iter()
            .all(|n| n.kind == GraphNodeKind::Cooperative));
    }

    #[test]
    fn unmapped_buyers_stay_unlinked_for_country_hubs() {
        let store = CatalogStore::bundled().unwrap();
        let countries = BuyerCountries::from_config(&ExplorerConfig::default());
        let graph = hub_graph(store.all_records(), HubKind::BuyerCountry, &countries);

        // co7 sells to "Local Markets", which has no country
        assert_eq!(graph.links.len(), 7);
        assert!(graph.links.iter().all(|l| l.source != "co7"));
        let belize = graph.hubs().find(|h| h.label == "Belize").unwrap();
        assert_eq!(belize.weight, 2);
    }

    #[test]
    fn hub_kind_maps_to_selector() {
        assert_eq!(HubKind::BuyerCountry.selector(), Selector::BuyerCountry);
        assert_eq!(hub_id(HubKind::BuyerCountry, "Canada"), "hub:buyer_country:Canada");
    }
}
