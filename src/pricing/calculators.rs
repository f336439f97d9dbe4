//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no store access.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Contract, Occupancy, Rate};

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use tourops::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Tax, fee and commission terms after applying rate overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectiveTerms {
    pub tax_rate: Decimal,
    pub city_tax_per_person_per_night: Decimal,
    pub resort_fee_per_night: Decimal,
    pub supplier_commission_rate: Decimal,
}

impl EffectiveTerms {
    /// Rate value when set, else the contract's, else zero.
    pub fn resolve(contract: Option<&Contract>, rate: Option<&Rate>) -> Self {
        fn pick(
            rate_value: Option<Decimal>,
            contract_value: Option<Decimal>,
        ) -> Decimal {
            rate_value.or(contract_value).unwrap_or(Decimal::ZERO)
        }

        Self {
            tax_rate: pick(
                rate.and_then(|r| r.tax_rate),
                contract.and_then(|c| c.tax_rate),
            ),
            city_tax_per_person_per_night: pick(
                rate.and_then(|r| r.city_tax_per_person_per_night),
                contract.and_then(|c| c.city_tax_per_person_per_night),
            ),
            resort_fee_per_night: pick(
                rate.and_then(|r| r.resort_fee_per_night),
                contract.and_then(|c| c.resort_fee_per_night),
            ),
            supplier_commission_rate: pick(
                rate.and_then(|r| r.supplier_commission_rate),
                contract.and_then(|c| c.supplier_commission_rate),
            ),
        }
    }
}

/// Cost breakdown of a stay
///
/// `base_rate` is the gross amount shown to the user (rate plus board, before
/// commission). The remaining fields are the cost components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub base_rate: Decimal,
    pub city_tax: Decimal,
    pub resort_fee: Decimal,
    pub vat: Decimal,
    pub supplier_commission: Decimal,
    pub net_rate: Decimal,
    pub subtotal: Decimal,
    pub total_cost: Decimal,
}

/// Calculate the cost breakdown of a stay.
///
/// City tax is charged per person and kept out of the VAT base:
/// `subtotal = net + board + resort fee`, `total = subtotal + vat + city tax`.
///
/// # Arguments
/// * `base_rate_per_night` - Gross rate for one night
/// * `contract` - Contract supplying default terms (none for buy-to-order)
/// * `occupancy` - Guests sharing the unit, drives city tax
/// * `nights` - Length of stay
/// * `board_cost_per_night` - Meal plan cost added on top of the rate
/// * `rate` - Rate whose overrides win over the contract terms
pub fn calculate_price_breakdown(
    base_rate_per_night: Decimal,
    contract: Option<&Contract>,
    occupancy: &Occupancy,
    nights: u32,
    board_cost_per_night: Decimal,
    rate: Option<&Rate>,
) -> PriceBreakdown {
    let persons = Decimal::from(occupancy.person_count());
    let nights = Decimal::from(nights);
    let terms = EffectiveTerms::resolve(contract, rate);

    let commission_per_night = base_rate_per_night * terms.supplier_commission_rate;
    let net_rate_per_night = base_rate_per_night - commission_per_night;

    let total_base_rate = base_rate_per_night * nights;
    let total_board_cost = board_cost_per_night * nights;
    let supplier_commission = commission_per_night * nights;
    let net_rate = net_rate_per_night * nights;
    let city_tax = terms.city_tax_per_person_per_night * persons * nights;
    let resort_fee = terms.resort_fee_per_night * nights;

    let subtotal = net_rate + total_board_cost + resort_fee;
    let vat = subtotal * terms.tax_rate;
    let total_cost = subtotal + vat + city_tax;

    PriceBreakdown {
        base_rate: total_base_rate + total_board_cost,
        city_tax,
        resort_fee,
        vat,
        supplier_commission,
        net_rate,
        subtotal,
        total_cost,
    }
}

/// Selling price from cost and commission rate: `cost * (1 + rate)`
pub fn calculate_selling_price(cost_price: Decimal, commission_rate: Decimal) -> Decimal {
    cost_price * (Decimal::ONE + commission_rate)
}

/// Profit of a sale
pub fn calculate_profit(selling_price: Decimal, cost_price: Decimal) -> Decimal {
    selling_price - cost_price
}

/// Profit as a percentage of the selling price; zero for a zero selling price.
pub fn calculate_profit_margin(selling_price: Decimal, cost_price: Decimal) -> Decimal {
    if selling_price.is_zero() {
        return Decimal::ZERO;
    }
    (selling_price - cost_price) / selling_price * Decimal::ONE_HUNDRED
}

/// Selling price from a base rate and a markup in percent (`20` is 20%)
pub fn calculate_markup_price(base_rate: Decimal, markup_percentage: Decimal) -> Decimal {
    base_rate * (Decimal::ONE + markup_percentage / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn contract() -> Contract {
        Contract {
            id: "c-1".to_string(),
            supplier_id: "s-1".to_string(),
            name: "Hotel Playa 2026".to_string(),
            tax_rate: Some(dec!(0.1)),
            city_tax_per_person_per_night: Some(dec!(2)),
            resort_fee_per_night: Some(dec!(5)),
            supplier_commission_rate: Some(dec!(0.15)),
            valid_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            valid_to: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            currency: "EUR".to_string(),
            active: true,
        }
    }

    fn rate() -> Rate {
        serde_json::from_value(serde_json::json!({
            "id": "r-1",
            "name": "Double RO",
            "contract_id": "c-1",
            "inventory_item_id": "h-1",
            "occupancy": "double",
            "base_rate": "100"
        }))
        .unwrap()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.25), 1), dec!(2.2));
        assert_eq!(round_money(dec!(2.35), 1), dec!(2.4));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(-1.234), 2), dec!(-1.23));
    }

    // ==================== EffectiveTerms tests ====================

    #[test]
    fn test_terms_fall_back_to_contract() {
        let terms = EffectiveTerms::resolve(Some(&contract()), Some(&rate()));
        assert_eq!(terms.tax_rate, dec!(0.1));
        assert_eq!(terms.city_tax_per_person_per_night, dec!(2));
        assert_eq!(terms.resort_fee_per_night, dec!(5));
        assert_eq!(terms.supplier_commission_rate, dec!(0.15));
    }

    #[test]
    fn test_terms_prefer_rate_overrides() {
        let mut r = rate();
        r.tax_rate = Some(dec!(0.21));
        r.supplier_commission_rate = Some(dec!(0));

        let terms = EffectiveTerms::resolve(Some(&contract()), Some(&r));
        assert_eq!(terms.tax_rate, dec!(0.21));
        assert_eq!(terms.supplier_commission_rate, dec!(0)); // zero override still wins
        assert_eq!(terms.resort_fee_per_night, dec!(5));
    }

    #[test]
    fn test_terms_default_to_zero() {
        assert_eq!(EffectiveTerms::resolve(None, None), EffectiveTerms::default());

        let mut c = contract();
        c.city_tax_per_person_per_night = None;
        let terms = EffectiveTerms::resolve(Some(&c), None);
        assert_eq!(terms.city_tax_per_person_per_night, dec!(0));
    }

    // ==================== calculate_price_breakdown tests ====================

    #[test]
    fn test_price_breakdown_reference_case() {
        let b = calculate_price_breakdown(
            dec!(100),
            Some(&contract()),
            &Occupancy::Double,
            4,
            dec!(0),
            None,
        );

        assert_eq!(b.supplier_commission, dec!(60));
        assert_eq!(b.net_rate, dec!(340));
        assert_eq!(b.resort_fee, dec!(20));
        assert_eq!(b.subtotal, dec!(360));
        assert_eq!(b.vat, dec!(36));
        assert_eq!(b.city_tax, dec!(16));
        assert_eq!(b.total_cost, dec!(412));
        assert_eq!(b.base_rate, dec!(400));
    }

    #[test]
    fn test_price_breakdown_with_board() {
        let b = calculate_price_breakdown(
            dec!(100),
            Some(&contract()),
            &Occupancy::Double,
            2,
            dec!(15),
            None,
        );

        // board is added to the gross rate and to the VAT base, never commissioned
        assert_eq!(b.base_rate, dec!(230));
        assert_eq!(b.supplier_commission, dec!(30));
        assert_eq!(b.subtotal, dec!(170) + dec!(30) + dec!(10));
        assert_eq!(b.vat, dec!(21));
        assert_eq!(b.total_cost, dec!(210) + dec!(21) + dec!(8));
    }

    #[test]
    fn test_price_breakdown_city_tax_scales_with_occupancy() {
        let c = contract();
        let single = calculate_price_breakdown(dec!(100), Some(&c), &Occupancy::Single, 3, dec!(0), None);
        let triple = calculate_price_breakdown(dec!(100), Some(&c), &Occupancy::Triple, 3, dec!(0), None);
        let other = calculate_price_breakdown(
            dec!(100),
            Some(&c),
            &Occupancy::from("family"),
            3,
            dec!(0),
            None,
        );

        assert_eq!(single.city_tax, dec!(6));
        assert_eq!(triple.city_tax, dec!(18));
        assert_eq!(other.city_tax, dec!(24));
        // city tax never touches VAT
        assert_eq!(single.vat, triple.vat);
    }

    #[test]
    fn test_price_breakdown_rate_overrides() {
        let mut r = rate();
        r.supplier_commission_rate = Some(dec!(0.1));
        r.resort_fee_per_night = Some(dec!(0));

        let b = calculate_price_breakdown(
            dec!(200),
            Some(&contract()),
            &Occupancy::Double,
            1,
            dec!(0),
            Some(&r),
        );

        assert_eq!(b.supplier_commission, dec!(20));
        assert_eq!(b.resort_fee, dec!(0));
        assert_eq!(b.subtotal, dec!(180));
        assert_eq!(b.vat, dec!(18));
        assert_eq!(b.total_cost, dec!(202));
    }

    #[test]
    fn test_price_breakdown_buy_to_order_without_contract() {
        let b = calculate_price_breakdown(dec!(80), None, &Occupancy::Single, 2, dec!(0), None);
        assert_eq!(b.base_rate, dec!(160));
        assert_eq!(b.total_cost, dec!(160));
        assert_eq!(b.vat, dec!(0));
    }

    #[test]
    fn test_price_breakdown_zero_nights() {
        let b = calculate_price_breakdown(dec!(100), Some(&contract()), &Occupancy::Double, 0, dec!(10), None);
        assert_eq!(b.base_rate, dec!(0));
        assert_eq!(b.total_cost, dec!(0));
    }

    // ==================== selling price / profit tests ====================

    #[test]
    fn test_calculate_selling_price() {
        assert_eq!(calculate_selling_price(dec!(100), dec!(0.2)), dec!(120));
        assert_eq!(calculate_selling_price(dec!(100), dec!(0)), dec!(100));
    }

    #[test]
    fn test_calculate_profit() {
        assert_eq!(calculate_profit(dec!(120), dec!(100)), dec!(20));
        assert_eq!(calculate_profit(dec!(90), dec!(100)), dec!(-10));
    }

    #[test]
    fn test_calculate_profit_margin() {
        assert_eq!(round_money(calculate_profit_margin(dec!(120), dec!(100)), 2), dec!(16.67));
        assert_eq!(calculate_profit_margin(dec!(200), dec!(150)), dec!(25));
    }

    #[test]
    fn test_calculate_profit_margin_zero_selling_price() {
        assert_eq!(calculate_profit_margin(dec!(0), dec!(0)), dec!(0));
        assert_eq!(calculate_profit_margin(dec!(0), dec!(50)), dec!(0));
    }

    #[test]
    fn test_calculate_markup_price() {
        assert_eq!(calculate_markup_price(dec!(100), dec!(20)), dec!(120));
        assert_eq!(calculate_markup_price(dec!(80), dec!(12.5)), dec!(90));
        assert_eq!(calculate_markup_price(dec!(80), dec!(0)), dec!(80));
    }
}
