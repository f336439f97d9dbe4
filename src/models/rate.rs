//! Rates: priced offerings, optionally tied to a contract.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::pricing::calculators::calculate_markup_price;

/// Guests sharing one unit of inventory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Occupancy {
    Single,
    Double,
    Triple,
    Quad,
    Other(String),
}

impl Occupancy {
    /// Person count used for per-person charges.
    ///
    /// Unknown values count as four guests so per-person taxes are never
    /// under-charged.
    pub fn person_count(&self) -> u32 {
        match self {
            Occupancy::Single => 1,
            Occupancy::Double => 2,
            Occupancy::Triple => 3,
            Occupancy::Quad | Occupancy::Other(_) => 4,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Occupancy::Single => "single",
            Occupancy::Double => "double",
            Occupancy::Triple => "triple",
            Occupancy::Quad => "quad",
            Occupancy::Other(value) => value,
        }
    }
}

impl From<String> for Occupancy {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "single" => Occupancy::Single,
            "double" => Occupancy::Double,
            "triple" => Occupancy::Triple,
            "quad" => Occupancy::Quad,
            _ => Occupancy::Other(value),
        }
    }
}

impl From<&str> for Occupancy {
    fn from(value: &str) -> Self {
        Occupancy::from(value.to_string())
    }
}

impl From<Occupancy> for String {
    fn from(value: Occupancy) -> Self {
        value.as_str().to_string()
    }
}

/// Meal plan included in a rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardType {
    #[default]
    RoomOnly,
    BedAndBreakfast,
    HalfBoard,
    FullBoard,
    AllInclusive,
}

/// Priced offering
///
/// Tax, fee and commission fields override the contract's terms when set.
/// A rate without `contract_id` is buy-to-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contract_id: Option<String>,
    pub inventory_item_id: String,
    #[serde(default)]
    pub category_id: Option<String>,
    pub occupancy: Occupancy,
    #[serde(default)]
    pub board_type: BoardType,
    pub base_rate: Decimal,
    #[serde(default)]
    pub markup_percentage: Decimal,
    #[serde(default)]
    pub selling_price: Decimal,
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub city_tax_per_person_per_night: Option<Decimal>,
    #[serde(default)]
    pub resort_fee_per_night: Option<Decimal>,
    #[serde(default)]
    pub supplier_commission_rate: Option<Decimal>,
    #[serde(default)]
    pub board_cost_per_night: Option<Decimal>,
    #[serde(default)]
    pub allocation_pool_id: Option<String>,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Rate {
    pub fn is_buy_to_order(&self) -> bool {
        self.contract_id.is_none()
    }

    /// Check if the rate can price the night of `date`
    pub fn covers(&self, date: NaiveDate) -> bool {
        if !self.active {
            return false;
        }
        if self.valid_from.is_some_and(|from| date < from) {
            return false;
        }
        !self.valid_to.is_some_and(|to| date > to)
    }

    /// Copy with `selling_price` derived from `base_rate` and `markup_percentage`
    pub fn with_computed_selling_price(mut self) -> Self {
        self.selling_price = calculate_markup_price(self.base_rate, self.markup_percentage);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_person_count() {
        assert_eq!(Occupancy::Single.person_count(), 1);
        assert_eq!(Occupancy::Double.person_count(), 2);
        assert_eq!(Occupancy::Triple.person_count(), 3);
        assert_eq!(Occupancy::Quad.person_count(), 4);
        assert_eq!(Occupancy::from("family").person_count(), 4);
        assert_eq!(Occupancy::from("").person_count(), 4);
    }

    #[test]
    fn test_occupancy_parsing_is_case_insensitive() {
        assert_eq!(Occupancy::from("Double"), Occupancy::Double);
        assert_eq!(Occupancy::from(" TRIPLE "), Occupancy::Triple);
        assert_eq!(
            Occupancy::from("suite"),
            Occupancy::Other("suite".to_string())
        );
    }

    #[test]
    fn test_occupancy_serde() {
        let json = serde_json::to_string(&Occupancy::Quad).unwrap();
        assert_eq!(json, "\"quad\"");
        let parsed: Occupancy = serde_json::from_str("\"single\"").unwrap();
        assert_eq!(parsed, Occupancy::Single);
        let other: Occupancy = serde_json::from_str("\"dorm\"").unwrap();
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"dorm\"");
    }

    fn rate() -> Rate {
        serde_json::from_value(serde_json::json!({
            "id": "r-1",
            "name": "Double BB",
            "contract_id": "c-1",
            "inventory_item_id": "h-1",
            "occupancy": "double",
            "board_type": "bed_and_breakfast",
            "base_rate": "100",
            "markup_percentage": "20",
            "valid_from": "2026-06-01",
            "valid_to": "2026-06-30"
        }))
        .unwrap()
    }

    #[test]
    fn test_rate_defaults_and_buy_to_order() {
        let mut r = rate();
        assert_eq!(r.board_type, BoardType::BedAndBreakfast);
        assert_eq!(r.selling_price, dec!(0));
        assert!(r.active);
        assert!(!r.is_buy_to_order());

        r.contract_id = None;
        assert!(r.is_buy_to_order());
    }

    #[test]
    fn test_rate_covers_window() {
        let r = rate();
        let d = |day| NaiveDate::from_ymd_opt(2026, 6, day).unwrap();
        assert!(r.covers(d(1)));
        assert!(r.covers(d(30)));
        assert!(!r.covers(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()));
        assert!(!r.covers(NaiveDate::from_ymd_opt(2026, 5, 31).unwrap()));
    }

    #[test]
    fn test_open_ended_rate_covers_everything() {
        let mut r = rate();
        r.valid_from = None;
        r.valid_to = None;
        assert!(r.covers(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
        r.active = false;
        assert!(!r.covers(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
    }

    #[test]
    fn test_with_computed_selling_price() {
        let r = rate().with_computed_selling_price();
        assert_eq!(r.selling_price, dec!(120));
    }
}
