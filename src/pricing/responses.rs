//! Display DTOs for pricing results.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{
    calculate_profit, calculate_profit_margin, calculate_selling_price, round_money,
    PriceBreakdown,
};

/// Money value for JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    /// Money rounded to cents
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount: round_money(amount, 2),
            currency: currency.to_string(),
        }
    }
}

/// Price breakdown as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct PriceBreakdownResponse {
    pub base_rate: MoneyResponse,
    pub city_tax: MoneyResponse,
    pub resort_fee: MoneyResponse,
    pub vat: MoneyResponse,
    pub supplier_commission: MoneyResponse,
    pub subtotal: MoneyResponse,
    pub total_cost: MoneyResponse,
}

impl PriceBreakdownResponse {
    pub fn from_breakdown(breakdown: &PriceBreakdown, currency: &str) -> Self {
        Self {
            base_rate: MoneyResponse::new(breakdown.base_rate, currency),
            city_tax: MoneyResponse::new(breakdown.city_tax, currency),
            resort_fee: MoneyResponse::new(breakdown.resort_fee, currency),
            vat: MoneyResponse::new(breakdown.vat, currency),
            supplier_commission: MoneyResponse::new(breakdown.supplier_commission, currency),
            subtotal: MoneyResponse::new(breakdown.subtotal, currency),
            total_cost: MoneyResponse::new(breakdown.total_cost, currency),
        }
    }
}

/// Selling price, profit and margin of a cost price
#[derive(Debug, Clone, Serialize)]
pub struct ProfitResponse {
    pub cost_price: MoneyResponse,
    pub selling_price: MoneyResponse,
    pub profit: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub profit_margin: Decimal,
}

impl ProfitResponse {
    /// Price a cost with a commission rate; the margin is rounded to 2 places
    pub fn from_cost(cost_price: Decimal, commission_rate: Decimal, currency: &str) -> Self {
        let selling_price = calculate_selling_price(cost_price, commission_rate);
        Self {
            cost_price: MoneyResponse::new(cost_price, currency),
            selling_price: MoneyResponse::new(selling_price, currency),
            profit: MoneyResponse::new(calculate_profit(selling_price, cost_price), currency),
            profit_margin: round_money(calculate_profit_margin(selling_price, cost_price), 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Occupancy;
    use crate::pricing::calculators::calculate_price_breakdown;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_response_rounds_to_cents() {
        let money = MoneyResponse::new(dec!(10.005), "EUR");
        assert_eq!(money.amount, dec!(10.00)); // banker's rounding
        assert_eq!(money.currency, "EUR");
    }

    #[test]
    fn test_money_serializes_amount_as_string() {
        let json = serde_json::to_value(MoneyResponse::new(dec!(12.345), "MXN")).unwrap();
        assert_eq!(json["amount"], "12.34");
        assert_eq!(json["currency"], "MXN");
    }

    #[test]
    fn test_breakdown_response() {
        let breakdown = calculate_price_breakdown(
            dec!(99.99),
            None,
            &Occupancy::Single,
            3,
            dec!(0),
            None,
        );
        let response = PriceBreakdownResponse::from_breakdown(&breakdown, "EUR");
        assert_eq!(response.base_rate.amount, dec!(299.97));
        assert_eq!(response.total_cost.amount, dec!(299.97));
        assert_eq!(response.vat.amount, dec!(0));
    }

    #[test]
    fn test_profit_response() {
        let response = ProfitResponse::from_cost(dec!(100), dec!(0.2), "EUR");
        assert_eq!(response.selling_price.amount, dec!(120));
        assert_eq!(response.profit.amount, dec!(20));
        assert_eq!(response.profit_margin, dec!(16.67));

        let free = ProfitResponse::from_cost(dec!(0), dec!(0.2), "EUR");
        assert_eq!(free.profit_margin, dec!(0));
    }
}
