//! Entity store.
//!
//! Calculations read collections through [`CatalogView`]; commands go through
//! [`DataStore`], which persists every change via a [`KeyValueStore`].

pub mod collections;
pub mod kv;

pub use collections::DataStore;
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};

use serde::{Deserialize, Serialize};

use crate::models::{
    Allocation, Contract, InventoryItem, PoolBooking, PoolCapacity, Rate, Supplier,
};

/// Read-only access to the back-office collections
pub trait CatalogView {
    fn suppliers(&self) -> &[Supplier];
    fn contracts(&self) -> &[Contract];
    fn rates(&self) -> &[Rate];
    fn inventory_items(&self) -> &[InventoryItem];
    fn allocations(&self) -> &[Allocation];
    fn pool_capacities(&self) -> &[PoolCapacity];
    fn pool_bookings(&self) -> &[PoolBooking];

    fn supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers().iter().find(|s| s.id == id)
    }

    fn contract(&self, id: &str) -> Option<&Contract> {
        self.contracts().iter().find(|c| c.id == id)
    }

    fn rate(&self, id: &str) -> Option<&Rate> {
        self.rates().iter().find(|r| r.id == id)
    }

    fn inventory_item(&self, id: &str) -> Option<&InventoryItem> {
        self.inventory_items().iter().find(|i| i.id == id)
    }

    fn pool_capacity(&self, pool_id: &str) -> Option<&PoolCapacity> {
        self.pool_capacities().iter().find(|p| p.pool_id == pool_id)
    }

    fn pool_booking(&self, id: &str) -> Option<&PoolBooking> {
        self.pool_bookings().iter().find(|b| b.id == id)
    }
}

/// In-memory copy of every collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub rates: Vec<Rate>,
    #[serde(default)]
    pub inventory_items: Vec<InventoryItem>,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
    #[serde(default)]
    pub pool_capacities: Vec<PoolCapacity>,
    #[serde(default)]
    pub pool_bookings: Vec<PoolBooking>,
}

impl CatalogView for Snapshot {
    fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    fn rates(&self) -> &[Rate] {
        &self.rates
    }

    fn inventory_items(&self) -> &[InventoryItem] {
        &self.inventory_items
    }

    fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    fn pool_capacities(&self) -> &[PoolCapacity] {
        &self.pool_capacities
    }

    fn pool_bookings(&self) -> &[PoolBooking] {
        &self.pool_bookings
    }
}
