pub mod types;
pub mod config;
pub mod error;

pub use types::*;
pub use config::{load_config, parse_config, ExplorerConfig};
pub use error::CatalogError;
