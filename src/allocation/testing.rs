//! Shared fixtures for allocation tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Allocation, Contract, InventoryItem, ItemCategory, ItemKind, Rate, Supplier};
use crate::store::Snapshot;

pub fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, day).unwrap()
}

pub fn allocation(
    id: &str,
    contract_id: Option<&str>,
    item_id: &str,
    quantity: u32,
    pool: Option<&str>,
) -> Allocation {
    Allocation {
        id: id.to_string(),
        contract_id: contract_id.map(str::to_string),
        inventory_item_id: item_id.to_string(),
        category_ids: vec!["dbl".to_string()],
        quantity,
        allocation_pool_id: pool.map(str::to_string),
        label: None,
        valid_from: d(6, 1),
        valid_to: d(8, 31),
    }
}

pub fn contract(id: &str, supplier_id: &str, name: &str) -> Contract {
    Contract {
        id: id.to_string(),
        supplier_id: supplier_id.to_string(),
        name: name.to_string(),
        tax_rate: Some(dec!(0.1)),
        city_tax_per_person_per_night: Some(dec!(2)),
        resort_fee_per_night: None,
        supplier_commission_rate: Some(dec!(0.15)),
        valid_from: d(1, 1),
        valid_to: d(12, 31),
        currency: "EUR".to_string(),
        active: true,
    }
}

pub fn hotel(id: &str, name: &str) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        location: None,
        categories: vec![ItemCategory {
            id: "dbl".to_string(),
            name: "Double room".to_string(),
            capacity: Some(2),
        }],
        kind: ItemKind::Hotel {
            star_rating: Some(4),
            check_in_time: None,
            check_out_time: None,
        },
    }
}

pub fn rate(
    id: &str,
    contract_id: Option<&str>,
    item_id: &str,
    pool: Option<&str>,
    selling_price: Decimal,
) -> Rate {
    let mut rate: Rate = serde_json::from_value(serde_json::json!({
        "id": id,
        "name": format!("Rate {}", id),
        "inventory_item_id": item_id,
        "occupancy": "double",
        "base_rate": "100"
    }))
    .unwrap();
    rate.contract_id = contract_id.map(str::to_string);
    rate.allocation_pool_id = pool.map(str::to_string);
    rate.selling_price = selling_price;
    rate
}

/// Two pools on two hotels:
/// - `pool-beach` on h-1: c-1 (6 + 4) and c-2 (5, supplier missing)
/// - `pool-city` on h-2: c-3 (8)
///
/// plus an unpooled and a blank-pool allocation.
pub fn catalog() -> Snapshot {
    let mut a2 = allocation("a-2", Some("c-1"), "h-1", 4, Some("pool-beach"));
    a2.valid_from = d(7, 1);
    a2.valid_to = d(9, 30);
    let mut a3 = allocation("a-3", Some("c-2"), "h-1", 5, Some("pool-beach"));
    a3.valid_from = d(6, 15);
    a3.valid_to = d(9, 15);

    Snapshot {
        suppliers: vec![Supplier {
            id: "s-1".to_string(),
            name: "Playa Group".to_string(),
            email: None,
            active: true,
        }],
        contracts: vec![
            contract("c-1", "s-1", "Playa Summer"),
            contract("c-2", "s-missing", "Playa Extra"),
            contract("c-3", "s-1", "City Breaks"),
        ],
        rates: vec![
            rate("r-1", Some("c-1"), "h-1", Some("pool-beach"), dec!(120)),
            rate("r-2", Some("c-3"), "h-2", Some("pool-city"), dec!(90)),
            rate("r-3", None, "h-2", None, dec!(110)),
        ],
        inventory_items: vec![hotel("h-1", "Hotel Playa"), hotel("h-2", "Hotel Centro")],
        allocations: vec![
            allocation("a-1", Some("c-1"), "h-1", 6, Some("pool-beach")),
            a2,
            a3,
            allocation("a-4", Some("c-3"), "h-2", 8, Some("pool-city")),
            allocation("a-5", Some("c-3"), "h-2", 3, None),
            allocation("a-6", Some("c-1"), "h-1", 2, Some("  ")),
        ],
        pool_capacities: vec![],
        pool_bookings: vec![],
    }
}
