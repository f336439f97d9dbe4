//! Portfolio statistics and conflict detection over pool summaries.

use rust_decimal::Decimal;
use serde::Serialize;

use super::pools::AllocationPoolSummary;
use crate::models::PoolStatus;
use crate::pricing::round_money;

/// Totals across all pools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllocationStats {
    pub total_pools: usize,
    pub total_allocated: u64,
    pub total_booked: u64,
    pub total_available: i64,
    /// Mean of per-pool utilization, zero without pools
    pub avg_utilization: Decimal,
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    pub overbooked: usize,
}

pub fn allocation_stats(pools: &[AllocationPoolSummary]) -> AllocationStats {
    let mut stats = AllocationStats {
        total_pools: pools.len(),
        ..AllocationStats::default()
    };

    let mut utilization_sum = Decimal::ZERO;
    for pool in pools {
        stats.total_allocated += pool.total_allocated;
        stats.total_booked += u64::from(pool.total_booked);
        stats.total_available += pool.total_available;
        utilization_sum += pool.utilization_percentage;

        match pool.status {
            PoolStatus::Healthy => stats.healthy += 1,
            PoolStatus::Warning => stats.warning += 1,
            PoolStatus::Critical => stats.critical += 1,
            PoolStatus::Overbooked => stats.overbooked += 1,
        }
    }

    if !pools.is_empty() {
        stats.avg_utilization = round_money(utilization_sum / Decimal::from(pools.len()), 2);
    }

    stats
}

/// Pools that are critical or overbooked
pub fn find_allocation_conflicts(pools: &[AllocationPoolSummary]) -> Vec<&AllocationPoolSummary> {
    pools.iter().filter(|p| p.status.is_conflict()).collect()
}
