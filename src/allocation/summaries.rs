//! Per-contract allocation summaries.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::pools::{signed_quantity, sum_quantities};
use crate::models::Allocation;
use crate::store::CatalogView;

/// Allocation totals of one contract
///
/// Bookings are tracked per pool, not per contract, so `total_booked` stays at
/// zero and `total_available` equals `total_allocated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractAllocationSummary {
    pub contract_id: String,
    pub contract_name: String,
    pub supplier_name: String,
    pub total_allocated: u64,
    pub total_booked: u32,
    pub total_available: i64,
    pub utilization_percentage: Decimal,
    pub allocation_count: usize,
    pub pool_ids: Vec<String>,
    pub rate_count: usize,
}

/// One summary per contract that has allocations, ordered by contract id
pub fn contract_allocation_summaries<V>(view: &V) -> Vec<ContractAllocationSummary>
where
    V: CatalogView + ?Sized,
{
    let mut groups: BTreeMap<&str, Vec<&Allocation>> = BTreeMap::new();
    for allocation in view.allocations() {
        if let Some(contract_id) = allocation.contract_id.as_deref() {
            groups.entry(contract_id).or_default().push(allocation);
        }
    }

    let mut summaries = Vec::with_capacity(groups.len());
    for (contract_id, allocations) in groups {
        let Some(contract) = view.contract(contract_id) else {
            debug!(
                "Skipping {} allocations of unknown contract {}",
                allocations.len(),
                contract_id
            );
            continue;
        };

        let total_allocated = sum_quantities(&allocations);

        let mut pool_ids: Vec<String> = allocations
            .iter()
            .filter_map(|a| a.pool_key())
            .map(str::to_string)
            .collect();
        pool_ids.sort();
        pool_ids.dedup();

        let rate_count = view
            .rates()
            .iter()
            .filter(|r| r.contract_id.as_deref() == Some(contract_id))
            .count();

        summaries.push(ContractAllocationSummary {
            contract_id: contract.id.clone(),
            contract_name: contract.name.clone(),
            supplier_name: view
                .supplier(&contract.supplier_id)
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            total_allocated,
            total_booked: 0,
            total_available: signed_quantity(total_allocated),
            utilization_percentage: Decimal::ZERO,
            allocation_count: allocations.len(),
            pool_ids,
            rate_count,
        });
    }

    summaries
}
