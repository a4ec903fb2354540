use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::CatalogError;

// --- Enums ---

/// Position of a cooperative in its value chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ValueChain {
    Producer,
    Processor,
    Exporter,
}

impl ValueChain {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueChain::Producer => "Producer",
            ValueChain::Processor => "Processor",
            ValueChain::Exporter => "Exporter",
        }
    }
}

impl std::fmt::Display for ValueChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How far a cooperative's products travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ExportReach {
    Local,
    Regional,
    International,
}

impl ExportReach {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportReach::Local => "Local",
            ExportReach::Regional => "Regional",
            ExportReach::International => "International",
        }
    }
}

impl std::fmt::Display for ExportReach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// --- Cooperative record ---

/// One cooperative in the catalog. Immutable once loaded.
///
/// List fields are always present; an absent list in source data
/// deserializes to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, TypedBuilder)]
pub struct Cooperative {
    #[builder(setter(into))]
    pub id: String,
    #[builder(setter(into))]
    pub name: String,
    #[builder(default, setter(into))]
    pub official_name: String,
    #[builder(setter(into))]
    pub district: String,
    /// Coordinate pair as written in the source. Never parsed.
    #[builder(default, setter(into))]
    pub gps: String,
    #[builder(setter(into))]
    pub sector: String,
    pub value_chain: ValueChain,
    #[builder(setter(into))]
    pub buyer: String,
    pub members: u32,
    pub capacity: f64,
    #[builder(default, setter(into))]
    pub capacity_unit: String,
    #[builder(default, setter(into))]
    pub product_focus: String,
    #[serde(default)]
    #[builder(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    #[builder(default)]
    pub export_history: Vec<ExportReach>,
    #[builder(default, setter(into))]
    pub fdi_priority: String,
    #[serde(default)]
    #[builder(default)]
    pub esg_tags: Vec<String>,
    #[serde(default)]
    #[builder(default)]
    pub partners: Vec<String>,
    #[builder(default, setter(into))]
    pub contact: String,
}

impl Cooperative {
    /// Values this record holds for a categorical field. Scalar fields yield
    /// exactly one value, list fields yield their entries in source order.
    pub fn values(&self, field: FieldKind) -> Vec<&str> {
        match field {
            FieldKind::Sector => vec![self.sector.as_str()],
            FieldKind::ValueChain => vec![self.value_chain.as_str()],
            FieldKind::District => vec![self.district.as_str()],
            FieldKind::Buyer => vec![self.buyer.as_str()],
            FieldKind::FdiPriority => vec![self.fdi_priority.as_str()],
            FieldKind::CapacityUnit => vec![self.capacity_unit.as_str()],
            FieldKind::Certification => self.certifications.iter().map(String::as_str).collect(),
            FieldKind::EsgTag => self.esg_tags.iter().map(String::as_str).collect(),
            FieldKind::ExportHistory => self.export_history.iter().map(|r| r.as_str()).collect(),
            FieldKind::Partner => self.partners.iter().map(String::as_str).collect(),
        }
    }
}

// --- Field kinds ---

/// Categorical fields of a cooperative record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Sector,
    ValueChain,
    District,
    Buyer,
    FdiPriority,
    CapacityUnit,
    Certification,
    EsgTag,
    ExportHistory,
    Partner,
}

impl FieldKind {
    pub const ALL: [FieldKind; 10] = [
        FieldKind::Sector,
        FieldKind::ValueChain,
        FieldKind::District,
        FieldKind::Buyer,
        FieldKind::FdiPriority,
        FieldKind::CapacityUnit,
        FieldKind::Certification,
        FieldKind::EsgTag,
        FieldKind::ExportHistory,
        FieldKind::Partner,
    ];

    /// True for fields stored as a list on the record.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            FieldKind::Certification
                | FieldKind::EsgTag
                | FieldKind::ExportHistory
                | FieldKind::Partner
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Sector => "sector",
            FieldKind::ValueChain => "value_chain",
            FieldKind::District => "district",
            FieldKind::Buyer => "buyer",
            FieldKind::FdiPriority => "fdi_priority",
            FieldKind::CapacityUnit => "capacity_unit",
            FieldKind::Certification => "certification",
            FieldKind::EsgTag => "esg_tag",
            FieldKind::ExportHistory => "export_history",
            FieldKind::Partner => "partner",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FieldKind {
    type Err = CatalogError;

    /// Accepts both the snake_case names and the camelCase names used by the
    /// dashboard front end.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sector" => Ok(FieldKind::Sector),
            "value_chain" | "valueChain" => Ok(FieldKind::ValueChain),
            "district" => Ok(FieldKind::District),
            "buyer" => Ok(FieldKind::Buyer),
            "fdi_priority" | "fdiPriority" => Ok(FieldKind::FdiPriority),
            "capacity_unit" | "capacityUnit" => Ok(FieldKind::CapacityUnit),
            "certification" | "certifications" => Ok(FieldKind::Certification),
            "esg_tag" | "esgTag" | "esg_tags" | "esgTags" => Ok(FieldKind::EsgTag),
            "export_history" | "exportHistory" => Ok(FieldKind::ExportHistory),
            "partner" | "partners" => Ok(FieldKind::Partner),
            other => Err(CatalogError::InvalidFieldKind(other.to_string())),
        }
    }
}

// --- Selectors ---

/// Single-choice selectors of a `FilterSpec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    Sector,
    ValueChain,
    District,
    Buyer,
    Certification,
    FdiPriority,
    EsgTag,
    ExportHistory,
    BuyerCountry,
}

impl Selector {
    pub const ALL: [Selector; 9] = [
        Selector::Sector,
        Selector::ValueChain,
        Selector::District,
        Selector::Buyer,
        Selector::Certification,
        Selector::FdiPriority,
        Selector::EsgTag,
        Selector::ExportHistory,
        Selector::BuyerCountry,
    ];

    /// The record field this selector tests. `BuyerCountry` is resolved
    /// through the buyer name and has no field of its own.
    pub fn field(&self) -> Option<FieldKind> {
        match self {
            Selector::Sector => Some(FieldKind::Sector),
            Selector::ValueChain => Some(FieldKind::ValueChain),
            Selector::District => Some(FieldKind::District),
            Selector::Buyer => Some(FieldKind::Buyer),
            Selector::Certification => Some(FieldKind::Certification),
            Selector::FdiPriority => Some(FieldKind::FdiPriority),
            Selector::EsgTag => Some(FieldKind::EsgTag),
            Selector::ExportHistory => Some(FieldKind::ExportHistory),
            Selector::BuyerCountry => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Selector::BuyerCountry => "buyer_country",
            other => other
                .field()
                .map(|f| f.as_str())
                .unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Selector {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if matches!(s, "buyer_country" | "buyerCountry") {
            return Ok(Selector::BuyerCountry);
        }
        match s.parse::<FieldKind>()? {
            FieldKind::Sector => Ok(Selector::Sector),
            FieldKind::ValueChain => Ok(Selector::ValueChain),
            FieldKind::District => Ok(Selector::District),
            FieldKind::Buyer => Ok(Selector::Buyer),
            FieldKind::Certification => Ok(Selector::Certification),
            FieldKind::FdiPriority => Ok(Selector::FdiPriority),
            FieldKind::EsgTag => Ok(Selector::EsgTag),
            FieldKind::ExportHistory => Ok(Selector::ExportHistory),
            FieldKind::CapacityUnit | FieldKind::Partner => {
                Err(CatalogError::InvalidFieldKind(s.to_string()))
            }
        }
    }
}
