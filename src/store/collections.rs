//! Typed collection store on top of a key-value backend.
//!
//! Each collection lives under its own key as a JSON array and is rewritten
//! after every command.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::kv::KeyValueStore;
use super::{CatalogView, Snapshot};
use crate::error::StoreError;
use crate::models::{
    generate_id, Allocation, Contract, Entity, InventoryItem, PoolBooking, PoolCapacity, Rate,
    Supplier,
};

pub const SUPPLIERS_KEY: &str = "suppliers";
pub const CONTRACTS_KEY: &str = "contracts";
pub const RATES_KEY: &str = "rates";
pub const INVENTORY_ITEMS_KEY: &str = "inventory_items";
pub const ALLOCATIONS_KEY: &str = "allocations";
pub const POOL_CAPACITIES_KEY: &str = "pool_capacities";
pub const POOL_BOOKINGS_KEY: &str = "pool_bookings";

const ALL_KEYS: [&str; 7] = [
    SUPPLIERS_KEY,
    CONTRACTS_KEY,
    RATES_KEY,
    INVENTORY_ITEMS_KEY,
    ALLOCATIONS_KEY,
    POOL_CAPACITIES_KEY,
    POOL_BOOKINGS_KEY,
];

/// Entity collections with persistent add/update commands
#[derive(Debug)]
pub struct DataStore<S: KeyValueStore> {
    backend: S,
    data: Snapshot,
}

macro_rules! collection_commands {
    ($add:ident, $update:ident, $field:ident, $key:expr, $ty:ty) => {
        pub fn $add(&mut self, item: $ty) -> Result<String, StoreError> {
            insert(&mut self.backend, $key, &mut self.data.$field, item)
        }

        pub fn $update(&mut self, item: $ty) -> Result<(), StoreError> {
            replace(&mut self.backend, $key, &mut self.data.$field, item)
        }
    };
}

impl<S: KeyValueStore> DataStore<S> {
    /// Load every collection from the backend; missing keys are empty
    pub fn open(backend: S) -> Result<Self, StoreError> {
        let data = Snapshot {
            suppliers: load_collection(&backend, SUPPLIERS_KEY)?,
            contracts: load_collection(&backend, CONTRACTS_KEY)?,
            rates: load_collection(&backend, RATES_KEY)?,
            inventory_items: load_collection(&backend, INVENTORY_ITEMS_KEY)?,
            allocations: load_collection(&backend, ALLOCATIONS_KEY)?,
            pool_capacities: load_collection(&backend, POOL_CAPACITIES_KEY)?,
            pool_bookings: load_collection(&backend, POOL_BOOKINGS_KEY)?,
        };

        info!(
            "Store opened: {} contracts, {} rates, {} allocations, {} pools, {} bookings",
            data.contracts.len(),
            data.rates.len(),
            data.allocations.len(),
            data.pool_capacities.len(),
            data.pool_bookings.len()
        );

        Ok(Self { backend, data })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.data
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    collection_commands!(add_supplier, update_supplier, suppliers, SUPPLIERS_KEY, Supplier);
    collection_commands!(add_contract, update_contract, contracts, CONTRACTS_KEY, Contract);
    collection_commands!(add_rate, update_rate, rates, RATES_KEY, Rate);
    collection_commands!(
        add_inventory_item,
        update_inventory_item,
        inventory_items,
        INVENTORY_ITEMS_KEY,
        InventoryItem
    );
    collection_commands!(
        add_allocation,
        update_allocation,
        allocations,
        ALLOCATIONS_KEY,
        Allocation
    );
    collection_commands!(
        add_pool_capacity,
        update_pool_capacity,
        pool_capacities,
        POOL_CAPACITIES_KEY,
        PoolCapacity
    );
    collection_commands!(
        add_pool_booking,
        update_pool_booking,
        pool_bookings,
        POOL_BOOKINGS_KEY,
        PoolBooking
    );

    /// Drop every collection, in memory and in the backend
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        for key in ALL_KEYS {
            self.backend.clear(key)?;
        }
        self.data = Snapshot::default();
        info!("All collections cleared");
        Ok(())
    }
}

impl<S: KeyValueStore> CatalogView for DataStore<S> {
    fn suppliers(&self) -> &[Supplier] {
        &self.data.suppliers
    }

    fn contracts(&self) -> &[Contract] {
        &self.data.contracts
    }

    fn rates(&self) -> &[Rate] {
        &self.data.rates
    }

    fn inventory_items(&self) -> &[InventoryItem] {
        &self.data.inventory_items
    }

    fn allocations(&self) -> &[Allocation] {
        &self.data.allocations
    }

    fn pool_capacities(&self) -> &[PoolCapacity] {
        &self.data.pool_capacities
    }

    fn pool_bookings(&self) -> &[PoolBooking] {
        &self.data.pool_bookings
    }
}

fn load_collection<T, B>(backend: &B, key: &str) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    B: KeyValueStore,
{
    match backend.load(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

fn persist<T, B>(backend: &mut B, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    B: KeyValueStore,
{
    let raw = serde_json::to_string_pretty(items)?;
    backend.save(key, &raw)
}

/// Append an entity; a blank id is replaced with a generated one
fn insert<T, B>(backend: &mut B, key: &str, items: &mut Vec<T>, mut item: T) -> Result<String, StoreError>
where
    T: Entity + Serialize,
    B: KeyValueStore,
{
    if item.id().trim().is_empty() {
        item.set_id(generate_id(T::ID_PREFIX));
    } else if items.iter().any(|existing| existing.id() == item.id()) {
        return Err(StoreError::Duplicate {
            entity: T::NAME,
            id: item.id().to_string(),
        });
    }

    let id = item.id().to_string();
    items.push(item);
    if let Err(e) = persist(backend, key, items) {
        items.pop();
        return Err(e);
    }

    debug!("Added {} {}", T::NAME, id);
    Ok(id)
}

/// Replace the entity with the same id
fn replace<T, B>(backend: &mut B, key: &str, items: &mut [T], item: T) -> Result<(), StoreError>
where
    T: Entity + Serialize,
    B: KeyValueStore,
{
    let index = items
        .iter()
        .position(|existing| existing.id() == item.id())
        .ok_or_else(|| StoreError::NotFound {
            entity: T::NAME,
            id: item.id().to_string(),
        })?;

    let previous = std::mem::replace(&mut items[index], item);
    if let Err(e) = persist(backend, key, items) {
        items[index] = previous;
        return Err(e);
    }

    debug!("Updated {} {}", T::NAME, items[index].id());
    Ok(())
}
