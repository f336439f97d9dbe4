//! Back-office entities.

pub mod allocation;
pub mod contract;
pub mod inventory;
pub mod pool;
pub mod rate;

pub use allocation::Allocation;
pub use contract::{Contract, Supplier};
pub use inventory::{InventoryItem, ItemCategory, ItemKind};
pub use pool::{
    night_count, stay_dates, BookingStatus, DailyCapacity, PoolBooking, PoolCapacity, PoolStatus,
    StatusThresholds,
};
pub use rate::{BoardType, Occupancy, Rate};

use uuid::Uuid;

pub(crate) fn default_currency() -> String {
    "EUR".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}

/// Stored entity with a string id
pub trait Entity {
    /// Name used in store errors and logs
    const NAME: &'static str;
    /// Prefix of generated ids
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// Generate a new id such as `contract-6f1c...`
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

macro_rules! impl_entity {
    ($ty:ty, $name:literal, $prefix:literal, $field:ident) => {
        impl Entity for $ty {
            const NAME: &'static str = $name;
            const ID_PREFIX: &'static str = $prefix;

            fn id(&self) -> &str {
                &self.$field
            }

            fn set_id(&mut self, id: String) {
                self.$field = id;
            }
        }
    };
}

impl_entity!(Supplier, "supplier", "supplier", id);
impl_entity!(Contract, "contract", "contract", id);
impl_entity!(Rate, "rate", "rate", id);
impl_entity!(InventoryItem, "inventory item", "item", id);
impl_entity!(Allocation, "allocation", "allocation", id);
impl_entity!(PoolCapacity, "pool capacity", "pool", pool_id);
impl_entity!(PoolBooking, "pool booking", "booking", id);
