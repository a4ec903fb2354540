pub mod events;
pub mod export;
pub mod hubs;
pub mod selection;
pub mod session;
pub mod summary;

pub use events::ExplorerEvent;
pub use export::{export_csv, CsvExport, CSV_HEADER};
pub use hubs::{hub_graph, GraphLink, GraphNode, GraphNodeKind, HubGraph, HubKind};
pub use selection::Selection;
pub use session::{ExplorerSession, ResultState};
pub use summary::{aggregates, Summary};
