//! Suppliers and the contracts they sign.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{default_currency, default_true};

/// Supplier that contracts inventory to the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Supplier agreement terms
///
/// Tax and commission rates are fractions (`0.10` is 10%). City tax is charged
/// per person per night, the resort fee per unit per night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub supplier_id: String,
    pub name: String,
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    #[serde(default)]
    pub city_tax_per_person_per_night: Option<Decimal>,
    #[serde(default)]
    pub resort_fee_per_night: Option<Decimal>,
    #[serde(default)]
    pub supplier_commission_rate: Option<Decimal>,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Contract {
    /// Check if the contract applies on the given date (both ends inclusive)
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        if !self.active {
            return false;
        }
        self.valid_from <= date && date <= self.valid_to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn contract() -> Contract {
        Contract {
            id: "c-1".to_string(),
            supplier_id: "s-1".to_string(),
            name: "Summer 2026".to_string(),
            tax_rate: None,
            city_tax_per_person_per_night: None,
            resort_fee_per_night: None,
            supplier_commission_rate: None,
            valid_from: d(2026, 5, 1),
            valid_to: d(2026, 9, 30),
            currency: "EUR".to_string(),
            active: true,
        }
    }

    #[test]
    fn test_is_valid_on_window() {
        let c = contract();
        assert!(c.is_valid_on(d(2026, 5, 1)));
        assert!(c.is_valid_on(d(2026, 9, 30)));
        assert!(!c.is_valid_on(d(2026, 4, 30)));
        assert!(!c.is_valid_on(d(2026, 10, 1)));
    }

    #[test]
    fn test_inactive_contract_is_never_valid() {
        let mut c = contract();
        c.active = false;
        assert!(!c.is_valid_on(d(2026, 6, 15)));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let c: Contract = serde_json::from_value(serde_json::json!({
            "id": "c-9",
            "supplier_id": "s-1",
            "name": "Winter",
            "tax_rate": "0.1",
            "valid_from": "2026-12-01",
            "valid_to": "2027-02-28"
        }))
        .unwrap();
        assert_eq!(c.tax_rate, Some(Decimal::new(1, 1)));
        assert_eq!(c.supplier_commission_rate, None);
        assert_eq!(c.currency, "EUR");
        assert!(c.active);
    }
}
