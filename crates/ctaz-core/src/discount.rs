//! Customer discounts. At most one applies to a quote.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discount {
    Veteran,
    Student,
}

impl Discount {
    /// Fraction taken off the subtotal.
    #[must_use]
    pub fn rate(self) -> Decimal {
        match self {
            Discount::Veteran => Decimal::new(10, 2),
            Discount::Student => Decimal::new(8, 2),
        }
    }
}

impl std::fmt::Display for Discount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discount::Veteran => write!(f, "Veteran discount (10% off)"),
            Discount::Student => write!(f, "Student discount (8% off)"),
        }
    }
}

/// Discount toggles as submitted with a quote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscountInfo {
    pub is_veteran: bool,
    pub is_student: bool,
}

impl DiscountInfo {
    /// Switches a discount on or off. Turning one on turns the other off.
    pub fn toggle(&mut self, discount: Discount, checked: bool) {
        match (discount, checked) {
            (Discount::Veteran, true) => {
                self.is_veteran = true;
                self.is_student = false;
            }
            (Discount::Student, true) => {
                self.is_student = true;
                self.is_veteran = false;
            }
            (Discount::Veteran, false) => self.is_veteran = false,
            (Discount::Student, false) => self.is_student = false,
        }
    }

    /// The discount in effect. Veteran takes precedence if both flags arrive set.
    #[must_use]
    pub fn active(self) -> Option<Discount> {
        if self.is_veteran {
            Some(Discount::Veteran)
        } else if self.is_student {
            Some(Discount::Student)
        } else {
            None
        }
    }

    /// Applies the active discount to `subtotal`, rounded to cents.
    #[must_use]
    pub fn apply(self, subtotal: Decimal) -> Decimal {
        let total = match self.active() {
            Some(discount) => subtotal - subtotal * discount.rate(),
            None => subtotal,
        };
        total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}
