//! Store-backed allocation and booking services.
//!
//! These functions read through the store, run the pure calculations and
//! write the results back.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use super::capacity::{
    cancel_pool_booking, create_pool_booking, recompute_pool_capacity,
    update_pool_capacity_after_booking, BookingAction, BookingRequest,
};
use super::pools::{aggregate_allocation_pools, AllocationPoolSummary};
use super::stats::{allocation_stats, find_allocation_conflicts, AllocationStats};
use super::summaries::{contract_allocation_summaries, ContractAllocationSummary};
use crate::config::Settings;
use crate::error::{BookingError, Result, StoreError};
use crate::models::{PoolBooking, PoolCapacity, StatusThresholds};
use crate::pricing::{calculate_price_breakdown, PriceBreakdown, PriceBreakdownResponse};
use crate::store::{CatalogView, DataStore, KeyValueStore};

/// Everything the allocation dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct AllocationReport {
    pub generated_at: DateTime<Utc>,
    pub stats: AllocationStats,
    pub pools: Vec<AllocationPoolSummary>,
    pub conflicts: Vec<AllocationPoolSummary>,
    pub contracts: Vec<ContractAllocationSummary>,
}

pub fn build_report<V>(
    view: &V,
    thresholds: &StatusThresholds,
    generated_at: DateTime<Utc>,
) -> AllocationReport
where
    V: CatalogView + ?Sized,
{
    let pools = aggregate_allocation_pools(view, thresholds);
    let stats = allocation_stats(&pools);
    let conflicts = find_allocation_conflicts(&pools)
        .into_iter()
        .cloned()
        .collect();

    AllocationReport {
        generated_at,
        stats,
        pools,
        conflicts,
        contracts: contract_allocation_summaries(view),
    }
}

/// Cost breakdown of a stay on a stored rate, using its contract terms
pub fn quote_rate<V>(view: &V, rate_id: &str, nights: u32) -> Result<PriceBreakdown>
where
    V: CatalogView + ?Sized,
{
    let rate = view.rate(rate_id).ok_or_else(|| StoreError::NotFound {
        entity: "rate",
        id: rate_id.to_string(),
    })?;
    let contract = rate.contract_id.as_deref().and_then(|id| view.contract(id));

    Ok(calculate_price_breakdown(
        rate.base_rate,
        contract,
        &rate.occupancy,
        nights,
        rate.board_cost_per_night.unwrap_or_default(),
        Some(rate),
    ))
}

/// Quote priced in the contract's currency, `default_currency` for buy-to-order rates
pub fn quote_rate_response<V>(
    view: &V,
    rate_id: &str,
    nights: u32,
    default_currency: &str,
) -> Result<PriceBreakdownResponse>
where
    V: CatalogView + ?Sized,
{
    let breakdown = quote_rate(view, rate_id, nights)?;
    let currency = view
        .rate(rate_id)
        .and_then(|r| r.contract_id.as_deref())
        .and_then(|id| view.contract(id))
        .map_or(default_currency, |c| c.currency.as_str());
    Ok(PriceBreakdownResponse::from_breakdown(&breakdown, currency))
}

/// Book a pool: validate, store the booking and hold its capacity
pub fn book_pool<S: KeyValueStore>(
    store: &mut DataStore<S>,
    request: &BookingRequest,
    settings: &Settings,
    created_at: DateTime<Utc>,
) -> Result<PoolBooking> {
    let booking = create_pool_booking(
        request,
        store.pool_capacities(),
        &settings.reference_prefix,
        created_at,
        &mut rand::thread_rng(),
    )?;

    let previous = store
        .pool_capacity(&booking.pool_id)
        .ok_or_else(|| BookingError::PoolNotFound(booking.pool_id.clone()))?
        .clone();
    let updated = update_pool_capacity_after_booking(
        &previous,
        &booking,
        BookingAction::Add,
        &settings.thresholds,
    );

    store.update_pool_capacity(updated)?;
    if let Err(e) = store.add_pool_booking(booking.clone()) {
        restore_pool_capacity(store, previous);
        return Err(e.into());
    }

    info!(
        "Booked pool {} ({} x{}, {} nights): {}",
        booking.pool_id, booking.guest_name, booking.quantity, booking.nights, booking.reference
    );
    Ok(booking)
}

/// Cancel a stored booking and release its capacity
pub fn cancel_booking<S: KeyValueStore>(
    store: &mut DataStore<S>,
    booking_id: &str,
    thresholds: &StatusThresholds,
) -> Result<PoolBooking> {
    let booking = store
        .pool_booking(booking_id)
        .ok_or_else(|| StoreError::NotFound {
            entity: "pool booking",
            id: booking_id.to_string(),
        })?;
    let cancelled = cancel_pool_booking(booking)?;

    let previous = store.pool_capacity(&cancelled.pool_id).cloned();
    if let Some(pool) = &previous {
        let updated =
            update_pool_capacity_after_booking(pool, &cancelled, BookingAction::Remove, thresholds);
        store.update_pool_capacity(updated)?;
    }
    if let Err(e) = store.update_pool_booking(cancelled.clone()) {
        if let Some(pool) = previous {
            restore_pool_capacity(store, pool);
        }
        return Err(e.into());
    }

    info!("Cancelled booking {}", cancelled.reference);
    Ok(cancelled)
}

/// Put back a pool's capacity after the booking write that followed it failed
fn restore_pool_capacity<S: KeyValueStore>(store: &mut DataStore<S>, previous: PoolCapacity) {
    let pool_id = previous.pool_id.clone();
    match store.update_pool_capacity(previous) {
        Ok(()) => warn!("Booking write failed, capacity of pool {} restored", pool_id),
        Err(e) => error!(
            "Booking write failed and capacity of pool {} could not be restored: {}",
            pool_id, e
        ),
    }
}

/// Rebuild a pool's nightly records from its stored bookings
pub fn rebuild_pool_capacity<S: KeyValueStore>(
    store: &mut DataStore<S>,
    pool_id: &str,
    thresholds: &StatusThresholds,
) -> Result<()> {
    let pool = store
        .pool_capacity(pool_id)
        .ok_or_else(|| BookingError::PoolNotFound(pool_id.to_string()))?;
    let rebuilt = recompute_pool_capacity(pool, store.pool_bookings(), thresholds);
    store.update_pool_capacity(rebuilt)?;
    Ok(())
}
