//! Allocation pool aggregation.
//!
//! Pools are never stored: they are derived on every call from allocations
//! sharing an `allocation_pool_id`, joined with items, contracts, suppliers
//! and rates. Records whose references do not resolve are left out.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::{Allocation, PoolStatus, StatusThresholds};
use crate::pricing::round_money;
use crate::store::CatalogView;

/// Contract taking part in a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolContract {
    pub contract_id: String,
    pub contract_name: String,
    pub supplier_name: String,
    /// Quantity this contract commits to the pool
    pub quantity: u64,
}

/// Rate drawing from a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolRate {
    pub rate_id: String,
    pub rate_name: String,
    pub selling_price: Decimal,
}

/// Derived view of one allocation pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationPoolSummary {
    pub pool_id: String,
    pub item_id: String,
    pub item_name: String,
    pub item_type: String,
    pub total_allocated: u64,
    pub total_booked: u32,
    /// `total_allocated - total_booked`, negative when overbooked
    pub total_available: i64,
    pub utilization_percentage: Decimal,
    pub status: PoolStatus,
    pub contracts: Vec<PoolContract>,
    pub rates: Vec<PoolRate>,
    pub allocation_count: usize,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
}

/// Utilization in percent, rounded to 2 places; zero when nothing is allocated
pub fn utilization_percentage(booked: u64, allocated: u64) -> Decimal {
    round_money(utilization_ratio(booked, allocated), 2)
}

fn utilization_ratio(booked: u64, allocated: u64) -> Decimal {
    if allocated == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(booked) / Decimal::from(allocated) * Decimal::ONE_HUNDRED
}

/// Pool status; anything booked beyond the allocation is overbooked
fn pool_status(booked: u64, allocated: u64, thresholds: &StatusThresholds) -> PoolStatus {
    if booked > allocated {
        PoolStatus::Overbooked
    } else {
        thresholds.classify(utilization_ratio(booked, allocated))
    }
}

/// Sum of allocated quantities, widened so large stored values cannot overflow
pub(crate) fn sum_quantities(allocations: &[&Allocation]) -> u64 {
    allocations.iter().map(|a| u64::from(a.quantity)).sum()
}

pub(crate) fn signed_quantity(quantity: u64) -> i64 {
    i64::try_from(quantity).unwrap_or(i64::MAX)
}

/// Group pooled allocations and compute one summary per pool, ordered by pool id.
///
/// Booked quantity is the peak nightly booked quantity of the pool's capacity
/// record. A pool without a capacity record reports nothing booked.
pub fn aggregate_allocation_pools<V>(
    view: &V,
    thresholds: &StatusThresholds,
) -> Vec<AllocationPoolSummary>
where
    V: CatalogView + ?Sized,
{
    let mut groups: BTreeMap<&str, Vec<&Allocation>> = BTreeMap::new();
    for allocation in view.allocations() {
        if let Some(key) = allocation.pool_key() {
            groups.entry(key).or_default().push(allocation);
        }
    }

    groups
        .into_iter()
        .filter_map(|(pool_id, allocations)| summarize_pool(view, pool_id, &allocations, thresholds))
        .collect()
}

fn summarize_pool<V>(
    view: &V,
    pool_id: &str,
    allocations: &[&Allocation],
    thresholds: &StatusThresholds,
) -> Option<AllocationPoolSummary>
where
    V: CatalogView + ?Sized,
{
    let first = allocations.first()?;
    let Some(item) = view.inventory_item(&first.inventory_item_id) else {
        debug!(
            "Dropping pool {}: inventory item {} not found",
            pool_id, first.inventory_item_id
        );
        return None;
    };

    let rates = view
        .rates()
        .iter()
        .filter(|r| r.allocation_pool_id.as_deref().map(str::trim) == Some(pool_id))
        .map(|r| PoolRate {
            rate_id: r.id.clone(),
            rate_name: r.name.clone(),
            selling_price: r.selling_price,
        })
        .collect();

    let mut contracts: Vec<PoolContract> = Vec::new();
    for allocation in allocations {
        let Some(contract_id) = allocation.contract_id.as_deref() else {
            continue;
        };
        let Some(contract) = view.contract(contract_id) else {
            debug!(
                "Pool {}: allocation {} references unknown contract {}",
                pool_id, allocation.id, contract_id
            );
            continue;
        };

        match contracts.iter_mut().find(|c| c.contract_id == contract.id) {
            Some(existing) => existing.quantity += u64::from(allocation.quantity),
            None => contracts.push(PoolContract {
                contract_id: contract.id.clone(),
                contract_name: contract.name.clone(),
                supplier_name: view
                    .supplier(&contract.supplier_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_default(),
                quantity: u64::from(allocation.quantity),
            }),
        }
    }

    let total_allocated = sum_quantities(allocations);
    let total_booked = view
        .pool_capacity(pool_id)
        .map(|capacity| capacity.peak_booked())
        .unwrap_or(0);

    let booked = u64::from(total_booked);
    let utilization = utilization_percentage(booked, total_allocated);
    let status = pool_status(booked, total_allocated, thresholds);

    let valid_from = allocations.iter().map(|a| a.valid_from).min()?;
    let valid_to = allocations.iter().map(|a| a.valid_to).max()?;

    Some(AllocationPoolSummary {
        pool_id: pool_id.to_string(),
        item_id: item.id.clone(),
        item_name: item.name.clone(),
        item_type: item.kind.label().to_string(),
        total_allocated,
        total_booked,
        total_available: signed_quantity(total_allocated) - i64::from(total_booked),
        utilization_percentage: utilization,
        status,
        contracts,
        rates,
        allocation_count: allocations.len(),
        valid_from,
        valid_to,
    })
}
