pub mod countries;
pub mod filter;
pub mod search;
pub mod store;
pub mod vocabulary;

pub use countries::{BuyerCountries, BuyerCountryLookup};
pub use filter::{apply, matches, FilterSpec, NumericRange};
pub use search::{matches_query, search_text};
pub use store::CatalogStore;
pub use vocabulary::{distinct_values, sorted_values};
