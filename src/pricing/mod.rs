//! Pricing engine module for tour operations.
//!
//! Stay cost breakdowns, selling price and margin math, and nightly pricing
//! across several rates.

pub mod calculators;
pub mod dynamic;
pub mod responses;

// Re-export commonly used items
pub use calculators::{
    calculate_markup_price, calculate_price_breakdown, calculate_profit, calculate_profit_margin,
    calculate_selling_price, round_money, EffectiveTerms, PriceBreakdown,
};
pub use dynamic::{calculate_multi_rate_pricing, MultiRatePricing, NightlyPrice};
pub use responses::{MoneyResponse, PriceBreakdownResponse, ProfitResponse};
