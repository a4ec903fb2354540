use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Interaction events emitted by the chart, graph, table and filter
/// collaborators. The session is their only consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExplorerEvent {
    /// A cooperative node or table row was activated.
    CoopActivated { id: String },
    /// A sector hub or chart bar was activated.
    SectorActivated { sector: String },
    /// An FDI-priority hub was activated.
    FdiActivated { priority: String },
    BuyerActivated { buyer: String },
    CountryActivated { country: String },
    /// The detail view was closed.
    SelectionCleared,
    /// Category focus dropped; text query and ranges kept.
    FocusCleared,
    /// The "Reset" action.
    ResetRequested,
}

impl ExplorerEvent {
    /// The serde tag for this variant.
    pub fn event_type(&self) -> &'static str {
        match self {
            ExplorerEvent::CoopActivated { .. } => "coop_activated",
            ExplorerEvent::SectorActivated { .. } => "sector_activated",
            ExplorerEvent::FdiActivated { .. } => "fdi_activated",
            ExplorerEvent::BuyerActivated { .. } => "buyer_activated",
            ExplorerEvent::CountryActivated { .. } => "country_activated",
            ExplorerEvent::SelectionCleared => "selection_cleared",
            ExplorerEvent::FocusCleared => "focus_cleared",
            ExplorerEvent::ResetRequested => "reset_requested",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_type_matches_serde_tag() {
        let events = vec![
            ExplorerEvent::CoopActivated { id: "co1".into() },
            ExplorerEvent::SectorActivated { sector: "Honey".into() },
            ExplorerEvent::FdiActivated { priority: "Blue Economy".into() },
            ExplorerEvent::BuyerActivated { buyer: "Maya Gold Chocolate".into() },
            ExplorerEvent::CountryActivated { country: "Canada".into() },
            ExplorerEvent::SelectionCleared,
            ExplorerEvent::FocusCleared,
            ExplorerEvent::ResetRequested,
        ];
        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["type"], event.event_type());
        }
    }

    #[test]
    fn deserializes_from_front_end_payload() {
        let event: ExplorerEvent =
            serde_json::from_value(json!({ "type": "sector_activated", "sector": "Cacao" })).unwrap();
        assert_eq!(event, ExplorerEvent::SectorActivated { sector: "Cacao".into() });
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let result: Result<ExplorerEvent, _> =
            serde_json::from_value(json!({ "type": "district_activated", "district": "Cayo" }));
        assert!(result.is_err());
    }
}
