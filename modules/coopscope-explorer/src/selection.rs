use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which single record, if any, is open in the detail view.
///
/// `select` moves to `Viewing` from either state; clearing or focusing a
/// category moves to `Idle`. The id is not validated against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Idle,
    Viewing(String),
}

impl Selection {
    pub fn selected_id(&self) -> Option<&str> {
        match self {
            Selection::Idle => None,
            Selection::Viewing(id) => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Idle => write!(f, "idle"),
            Selection::Viewing(id) => write!(f, "viewing({id})"),
        }
    }
}
