//! Item list (demand list) domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Replenishment mode of an item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListType {
    /// Collect a fixed quantity once; entries count down to zero.
    #[default]
    CollectOneTime,
    /// Keep a running stock topped up; entries are target stock levels.
    KeepStocked,
}

impl ListType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CollectOneTime => "collect_one_time",
            Self::KeepStocked => "keep_stocked",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "collect_one_time" | "one_time" | "onetime" => Some(Self::CollectOneTime),
            "keep_stocked" | "restock" | "stock" => Some(Self::KeepStocked),
            _ => None,
        }
    }
}

/// Candidate ordering for [`ListType::KeepStocked`] lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListPriority {
    /// Always attempt items top to bottom.
    #[default]
    InOrder,
    /// Attempt the item with the least current stock first.
    Balanced,
}

impl ListPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InOrder => "in_order",
            Self::Balanced => "balanced",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "in_order" | "inorder" => Some(Self::InOrder),
            "balanced" => Some(Self::Balanced),
            _ => None,
        }
    }
}

/// A single line of an item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedItem {
    /// Stable id used for reordering; never interpreted otherwise.
    #[serde(default = "Uuid::new_v4")]
    pub internal_id: Uuid,
    pub item_id: u32,
    /// Remaining quantity for one-time lists, target stock for restock lists.
    pub remaining_quantity: i32,
}

impl QueuedItem {
    pub fn new(item_id: u32, remaining_quantity: i32) -> Self {
        Self {
            internal_id: Uuid::new_v4(),
            item_id,
            remaining_quantity,
        }
    }
}

/// A named, user-authored queue of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemList {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type", default)]
    pub list_type: ListType,
    #[serde(default)]
    pub priority: ListPriority,
    /// Count third-party retainer inventory toward stock.
    #[serde(default)]
    pub check_retainer_inventory: bool,
    #[serde(default)]
    pub items: Vec<QueuedItem>,
}

impl ItemList {
    pub fn new(name: String, list_type: ListType, priority: ListPriority) -> Self {
        let mut list = Self {
            id: Uuid::new_v4(),
            name,
            list_type,
            priority,
            check_retainer_inventory: false,
            items: Vec::new(),
        };
        list.normalize_priority();
        list
    }

    /// One-time lists are always worked in order.
    pub fn normalize_priority(&mut self) {
        if self.list_type == ListType::CollectOneTime {
            self.priority = ListPriority::InOrder;
        }
    }

    /// Short glyph shown next to the list name in notifications.
    pub fn icon(&self) -> &'static str {
        match self.list_type {
            ListType::CollectOneTime => "\u{2192}",
            ListType::KeepStocked => "\u{27f3}",
        }
    }

    pub fn find_item_mut(&mut self, internal_id: Uuid) -> Option<&mut QueuedItem> {
        self.items.iter_mut().find(|i| i.internal_id == internal_id)
    }
}
