use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// A field or selector name outside the fixed record schema.
    #[error("Invalid field kind: {0}")]
    InvalidFieldKind(String),

    /// The buyer→country directory has no entry for this buyer.
    #[error("No country known for buyer: {buyer}")]
    UnresolvedBuyerCountry { buyer: String },

    #[error("Duplicate cooperative id: {0}")]
    DuplicateId(String),

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
