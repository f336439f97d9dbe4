//! Stay pricing across several candidate rates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{stay_dates, Rate};

/// Price of one night and the rate that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NightlyPrice {
    pub date: NaiveDate,
    pub rate_id: String,
    pub selling_price: Decimal,
}

/// Result of multi-rate stay pricing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MultiRatePricing {
    pub nightly: Vec<NightlyPrice>,
    pub uncovered_dates: Vec<NaiveDate>,
    pub total: Decimal,
}

impl MultiRatePricing {
    /// Every night of the stay found a rate
    pub fn is_complete(&self) -> bool {
        self.uncovered_dates.is_empty()
    }
}

/// Price each night of a stay from the requested rates.
///
/// For every night the first id in `requested_rate_ids` whose rate covers
/// that night wins, so a stay crossing a season change picks up each
/// season's rate. Nights no requested rate covers are reported in
/// `uncovered_dates` and contribute nothing to the total.
pub fn calculate_multi_rate_pricing(
    rates: &[Rate],
    requested_rate_ids: &[String],
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> MultiRatePricing {
    let candidates: Vec<&Rate> = requested_rate_ids
        .iter()
        .filter_map(|id| rates.iter().find(|r| &r.id == id))
        .collect();

    let mut pricing = MultiRatePricing::default();
    for date in stay_dates(check_in, check_out) {
        match candidates.iter().find(|r| r.covers(date)) {
            Some(rate) => {
                pricing.total += rate.selling_price;
                pricing.nightly.push(NightlyPrice {
                    date,
                    rate_id: rate.id.clone(),
                    selling_price: rate.selling_price,
                });
            }
            None => pricing.uncovered_dates.push(date),
        }
    }

    if !pricing.is_complete() {
        tracing::debug!(
            "{} of {} nights uncovered by rates {:?}",
            pricing.uncovered_dates.len(),
            pricing.nightly.len() + pricing.uncovered_dates.len(),
            requested_rate_ids
        );
    }

    pricing
}
