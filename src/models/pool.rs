//! Pool capacity records, pool bookings and utilization status.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Utilization status of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolStatus {
    #[default]
    Healthy,
    Warning,
    Critical,
    Overbooked,
}

impl PoolStatus {
    /// Statuses reported as allocation conflicts
    pub fn is_conflict(self) -> bool {
        matches!(self, PoolStatus::Critical | PoolStatus::Overbooked)
    }
}

/// Utilization cutoffs, in percent.
///
/// Above 100% a pool is overbooked, from `critical` up it is critical, from
/// `warning` up it is a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusThresholds {
    pub warning: Decimal,
    pub critical: Decimal,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            warning: dec!(75),
            critical: dec!(90),
        }
    }
}

impl StatusThresholds {
    pub fn classify(&self, utilization_percentage: Decimal) -> PoolStatus {
        if utilization_percentage > dec!(100) {
            PoolStatus::Overbooked
        } else if utilization_percentage >= self.critical {
            PoolStatus::Critical
        } else if utilization_percentage >= self.warning {
            PoolStatus::Warning
        } else {
            PoolStatus::Healthy
        }
    }
}

/// Booked vs available quantity of a pool for one night
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCapacity {
    pub total_capacity: u32,
    pub booked_quantity: u32,
    pub available_quantity: u32,
    #[serde(default)]
    pub booking_ids: Vec<String>,
}

impl DailyCapacity {
    pub fn empty(total_capacity: u32) -> Self {
        Self {
            total_capacity,
            booked_quantity: 0,
            available_quantity: total_capacity,
            booking_ids: Vec::new(),
        }
    }
}

/// Stateful capacity record of an allocation pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolCapacity {
    pub pool_id: String,
    pub name: String,
    pub total_capacity: u32,
    #[serde(default = "default_minimum_nights")]
    pub minimum_nights: u32,
    #[serde(default)]
    pub maximum_nights: Option<u32>,
    #[serde(default)]
    pub daily_availability: BTreeMap<NaiveDate, DailyCapacity>,
    /// Mean booked quantity across dated entries
    #[serde(default)]
    pub current_bookings: Decimal,
    #[serde(default)]
    pub available_spots: u32,
    #[serde(default)]
    pub status: PoolStatus,
    #[serde(default)]
    pub peak_occupancy_date: Option<NaiveDate>,
}

fn default_minimum_nights() -> u32 {
    1
}

impl PoolCapacity {
    pub fn new(pool_id: impl Into<String>, name: impl Into<String>, total_capacity: u32) -> Self {
        Self {
            pool_id: pool_id.into(),
            name: name.into(),
            total_capacity,
            minimum_nights: default_minimum_nights(),
            maximum_nights: None,
            daily_availability: BTreeMap::new(),
            current_bookings: Decimal::ZERO,
            available_spots: total_capacity,
            status: PoolStatus::Healthy,
            peak_occupancy_date: None,
        }
    }

    /// Quantity still bookable on `date`; a night without a record is fully open
    pub fn available_on(&self, date: NaiveDate) -> u32 {
        self.daily_availability
            .get(&date)
            .map(|day| day.available_quantity)
            .unwrap_or(self.total_capacity)
    }

    /// Highest booked quantity over all dated entries
    pub fn peak_booked(&self) -> u32 {
        self.daily_availability
            .values()
            .map(|day| day.booked_quantity)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
}

/// Reservation against a pool for a date range
///
/// `check_out` is exclusive: a booking from the 1st to the 4th holds the
/// nights of the 1st, 2nd and 3rd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolBooking {
    pub id: String,
    pub reference: String,
    pub pool_id: String,
    #[serde(default)]
    pub rate_id: Option<String>,
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
    pub quantity: u32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl PoolBooking {
    /// Nights held by the booking
    pub fn stay_dates(&self) -> impl Iterator<Item = NaiveDate> {
        stay_dates(self.check_in, self.check_out)
    }
}

/// Nights of a stay: `check_in` up to but excluding `check_out`
pub fn stay_dates(check_in: NaiveDate, check_out: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    check_in.iter_days().take_while(move |date| *date < check_out)
}

/// Night count of a stay, zero when check-out is not after check-in
pub fn night_count(check_in: NaiveDate, check_out: NaiveDate) -> u32 {
    u32::try_from((check_out - check_in).num_days()).unwrap_or(0)
}
