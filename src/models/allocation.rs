//! Allocations: quantity commitments from a contract against an item.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Committed quantity of an item's categories
///
/// Allocations sharing an `allocation_pool_id` pool their capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub id: String,
    #[serde(default)]
    pub contract_id: Option<String>,
    pub inventory_item_id: String,
    #[serde(default)]
    pub category_ids: Vec<String>,
    pub quantity: u32,
    #[serde(default)]
    pub allocation_pool_id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

impl Allocation {
    /// Pool key, if the allocation belongs to a pool
    pub fn pool_key(&self) -> Option<&str> {
        self.allocation_pool_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
