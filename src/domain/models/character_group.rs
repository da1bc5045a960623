//! Character group domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named set of item lists shared by every character assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterGroup {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub item_list_ids: Vec<Uuid>,
}

impl CharacterGroup {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            item_list_ids: Vec::new(),
        }
    }
}
