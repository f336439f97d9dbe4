//! Allocation pools and pool capacity.

pub mod capacity;
pub mod pools;
pub mod reference;
pub mod services;
pub mod stats;
pub mod summaries;

#[cfg(test)]
pub(crate) mod testing;

pub use capacity::{
    cancel_pool_booking, check_pool_availability, create_pool_booking, recompute_pool_capacity,
    update_pool_capacity_after_booking, BookingAction, BookingRequest, PoolAvailability,
};
pub use pools::{aggregate_allocation_pools, AllocationPoolSummary, PoolContract, PoolRate};
pub use services::{
    book_pool, build_report, cancel_booking, quote_rate, quote_rate_response, rebuild_pool_capacity,
    AllocationReport,
};
pub use stats::{allocation_stats, find_allocation_conflicts, AllocationStats};
pub use summaries::{contract_allocation_summaries, ContractAllocationSummary};
