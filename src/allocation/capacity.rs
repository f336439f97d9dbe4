//! Pool capacity tracking: availability checks, booking creation and
//! per-night capacity updates.
//!
//! Functions here never mutate their inputs. Updated pools and new bookings
//! are returned for the caller to store.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::reference::{generate_booking_id, generate_booking_reference};
use crate::error::BookingError;
use crate::models::{
    night_count, stay_dates, BookingStatus, DailyCapacity, PoolBooking, PoolCapacity,
    PoolStatus, StatusThresholds,
};
use crate::pricing::round_money;

/// Outcome of an availability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolAvailability {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub nights: u32,
    /// Lowest remaining quantity over the stay
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_available: Option<u32>,
}

impl PoolAvailability {
    fn unavailable(reason: impl Into<String>, nights: u32) -> Self {
        Self {
            available: false,
            reason: Some(reason.into()),
            nights,
            min_available: None,
        }
    }
}

/// Capacity change to apply for a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingAction {
    Add,
    Remove,
    /// Leaves nightly records as they are; rebuild with [`recompute_pool_capacity`]
    Update,
}

/// Data needed to book a pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub pool_id: String,
    #[serde(default)]
    pub rate_id: Option<String>,
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub total_price: Decimal,
}

fn default_quantity() -> u32 {
    1
}

/// Check whether `quantity` units of a pool can be held for a stay.
///
/// A night without a capacity record is fully available.
pub fn check_pool_availability(
    pool_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    quantity: u32,
    pools: &[PoolCapacity],
) -> PoolAvailability {
    let nights = night_count(check_in, check_out);

    let Some(pool) = pools.iter().find(|p| p.pool_id == pool_id) else {
        return PoolAvailability::unavailable("Pool not found", nights);
    };

    if nights == 0 {
        return PoolAvailability::unavailable("Check-out must be after check-in", nights);
    }
    if quantity == 0 {
        return PoolAvailability::unavailable("Quantity must be at least 1", nights);
    }
    if nights < pool.minimum_nights {
        return PoolAvailability::unavailable(
            format!(
                "Minimum stay is {} nights, {} requested",
                pool.minimum_nights, nights
            ),
            nights,
        );
    }
    if let Some(maximum) = pool.maximum_nights {
        if nights > maximum {
            return PoolAvailability::unavailable(
                format!("Maximum stay is {} nights, {} requested", maximum, nights),
                nights,
            );
        }
    }

    let mut min_available = u32::MAX;
    for date in stay_dates(check_in, check_out) {
        let left = pool.available_on(date);
        if left < quantity {
            return PoolAvailability::unavailable(
                format!(
                    "No availability on {}: {} left, {} requested",
                    date, left, quantity
                ),
                nights,
            );
        }
        min_available = min_available.min(left);
    }

    PoolAvailability {
        available: true,
        reason: None,
        nights,
        min_available: Some(min_available),
    }
}

/// Validate a request and build the confirmed booking.
///
/// The pool itself is not touched; apply the booking with
/// [`update_pool_capacity_after_booking`].
pub fn create_pool_booking<R: Rng + ?Sized>(
    request: &BookingRequest,
    pools: &[PoolCapacity],
    reference_prefix: &str,
    created_at: DateTime<Utc>,
    rng: &mut R,
) -> Result<PoolBooking, BookingError> {
    if !pools.iter().any(|p| p.pool_id == request.pool_id) {
        warn!("Booking rejected, pool {} not found", request.pool_id);
        return Err(BookingError::PoolNotFound(request.pool_id.clone()));
    }
    if request.check_out <= request.check_in {
        return Err(BookingError::InvalidStay {
            check_in: request.check_in,
            check_out: request.check_out,
        });
    }

    let availability = check_pool_availability(
        &request.pool_id,
        request.check_in,
        request.check_out,
        request.quantity,
        pools,
    );
    if !availability.available {
        let reason = availability
            .reason
            .unwrap_or_else(|| "Pool unavailable".to_string());
        warn!("Booking rejected for pool {}: {}", request.pool_id, reason);
        return Err(BookingError::Unavailable(reason));
    }

    Ok(PoolBooking {
        id: generate_booking_id(created_at, rng),
        reference: generate_booking_reference(reference_prefix, created_at, rng),
        pool_id: request.pool_id.clone(),
        rate_id: request.rate_id.clone(),
        guest_name: request.guest_name.clone(),
        check_in: request.check_in,
        check_out: request.check_out,
        nights: availability.nights,
        quantity: request.quantity,
        total_price: request.total_price,
        status: BookingStatus::Confirmed,
        created_at,
    })
}

/// Cancelled copy of a booking
pub fn cancel_pool_booking(booking: &PoolBooking) -> Result<PoolBooking, BookingError> {
    if booking.status == BookingStatus::Cancelled {
        return Err(BookingError::AlreadyCancelled(booking.id.clone()));
    }
    Ok(PoolBooking {
        status: BookingStatus::Cancelled,
        ..booking.clone()
    })
}

/// Apply a booking event to a pool and recompute its derived fields.
///
/// `Add` holds the booking's quantity on each night once (a night already
/// listing the booking id is left alone). `Remove` releases it from nights
/// that list the id, never going below zero.
pub fn update_pool_capacity_after_booking(
    pool: &PoolCapacity,
    booking: &PoolBooking,
    action: BookingAction,
    thresholds: &StatusThresholds,
) -> PoolCapacity {
    let mut next = pool.clone();

    match action {
        BookingAction::Add => hold_booking(&mut next, booking),
        BookingAction::Remove => release_booking(&mut next, booking),
        BookingAction::Update => {
            debug!(
                "Update of booking {} leaves pool {} nights unchanged",
                booking.id, pool.pool_id
            );
        }
    }

    refresh_derived(&mut next, thresholds);
    debug!(
        "Pool {} after {:?} {}: status {:?}, current bookings {}",
        next.pool_id, action, booking.id, next.status, next.current_bookings
    );
    next
}

/// Rebuild every nightly record from the pool's confirmed bookings.
///
/// Existing nights keep their own `total_capacity`.
pub fn recompute_pool_capacity(
    pool: &PoolCapacity,
    bookings: &[PoolBooking],
    thresholds: &StatusThresholds,
) -> PoolCapacity {
    let mut next = pool.clone();
    for day in next.daily_availability.values_mut() {
        *day = DailyCapacity::empty(day.total_capacity);
    }

    bookings
        .iter()
        .filter(|b| b.pool_id == pool.pool_id && b.status == BookingStatus::Confirmed)
        .for_each(|b| hold_booking(&mut next, b));

    refresh_derived(&mut next, thresholds);
    next
}

fn hold_booking(pool: &mut PoolCapacity, booking: &PoolBooking) {
    if booking.status == BookingStatus::Cancelled {
        debug!("Skipping cancelled booking {}", booking.id);
        return;
    }

    let total_capacity = pool.total_capacity;
    for date in booking.stay_dates() {
        let day = pool
            .daily_availability
            .entry(date)
            .or_insert_with(|| DailyCapacity::empty(total_capacity));
        if day.booking_ids.contains(&booking.id) {
            continue;
        }
        day.booked_quantity = day.booked_quantity.saturating_add(booking.quantity);
        day.available_quantity = day.total_capacity.saturating_sub(day.booked_quantity);
        day.booking_ids.push(booking.id.clone());
    }
}

fn release_booking(pool: &mut PoolCapacity, booking: &PoolBooking) {
    for date in booking.stay_dates() {
        let Some(day) = pool.daily_availability.get_mut(&date) else {
            continue;
        };
        let Some(position) = day.booking_ids.iter().position(|id| id == &booking.id) else {
            continue;
        };
        day.booking_ids.remove(position);
        day.booked_quantity = day.booked_quantity.saturating_sub(booking.quantity);
        day.available_quantity = day.total_capacity.saturating_sub(day.booked_quantity);
    }
}

fn refresh_derived(pool: &mut PoolCapacity, thresholds: &StatusThresholds) {
    let days = pool.daily_availability.len();
    if days == 0 {
        pool.current_bookings = Decimal::ZERO;
        pool.available_spots = pool.total_capacity;
        pool.status = PoolStatus::Healthy;
        pool.peak_occupancy_date = None;
        return;
    }

    let booked: u64 = pool
        .daily_availability
        .values()
        .map(|day| u64::from(day.booked_quantity))
        .sum();
    let mean = Decimal::from(booked) / Decimal::from(days);

    let whole_units = mean
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(u32::MAX);

    pool.current_bookings = round_money(mean, 2);
    pool.available_spots = pool.total_capacity.saturating_sub(whole_units);
    pool.status = if pool.total_capacity == 0 {
        if mean.is_zero() {
            PoolStatus::Healthy
        } else {
            PoolStatus::Overbooked
        }
    } else {
        thresholds.classify(mean / Decimal::from(pool.total_capacity) * Decimal::ONE_HUNDRED)
    };

    let mut peak: Option<(NaiveDate, u32)> = None;
    for (date, day) in &pool.daily_availability {
        if day.booked_quantity > peak.map_or(0, |(_, q)| q) {
            peak = Some((*date, day.booked_quantity));
        }
    }
    pool.peak_occupancy_date = peak.map(|(date, _)| date);
}
