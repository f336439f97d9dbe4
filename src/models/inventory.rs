//! Inventory items (hotels, tickets, transfers, activities).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Bookable sub-unit of an item (room type, ticket class, vehicle class...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// Type-specific fields of an inventory item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "item_type", rename_all = "snake_case")]
pub enum ItemKind {
    Hotel {
        #[serde(default)]
        star_rating: Option<u8>,
        #[serde(default)]
        check_in_time: Option<NaiveTime>,
        #[serde(default)]
        check_out_time: Option<NaiveTime>,
    },
    Ticket {
        venue: String,
        #[serde(default)]
        event_date: Option<NaiveDate>,
    },
    Transfer {
        vehicle_type: String,
        max_passengers: u32,
    },
    Activity {
        #[serde(default)]
        duration_minutes: Option<u32>,
        #[serde(default)]
        meeting_point: Option<String>,
    },
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Hotel { .. } => "hotel",
            ItemKind::Ticket { .. } => "ticket",
            ItemKind::Transfer { .. } => "transfer",
            ItemKind::Activity { .. } => "activity",
        }
    }

    /// Whether stays on this item are priced per night
    pub fn is_nightly(&self) -> bool {
        matches!(self, ItemKind::Hotel { .. })
    }
}

/// Inventory item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub categories: Vec<ItemCategory>,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl InventoryItem {
    pub fn category(&self, id: &str) -> Option<&ItemCategory> {
        self.categories.iter().find(|c| c.id == id)
    }
}
