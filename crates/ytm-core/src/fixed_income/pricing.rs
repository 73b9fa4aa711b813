use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Money;

/// Price must differ from face value by at least this much (in currency
/// units) to count as a premium or discount.
pub const PAR_TOLERANCE: Decimal = dec!(0.01);

/// Whether the bond trades at, above, or below its face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingClass {
    Par,
    Premium,
    Discount,
}

impl PricingClass {
    pub fn label(self) -> &'static str {
        match self {
            PricingClass::Par => "Par",
            PricingClass::Premium => "Premium",
            PricingClass::Discount => "Discount",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PricingClass::Par => {
                "Bond trades at face value; yield to maturity equals the coupon rate"
            }
            PricingClass::Premium => {
                "Bond trades above face value; yield to maturity is below the coupon rate"
            }
            PricingClass::Discount => {
                "Bond trades below face value; yield to maturity is above the coupon rate"
            }
        }
    }
}

impl fmt::Display for PricingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification plus the display strings that go with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingAnalysis {
    pub classification: PricingClass,
    pub label: String,
    pub description: String,
    /// bond_price − face_value
    pub price_difference: Money,
}

/// Classify a bond as par, premium, or discount from price against face.
pub fn classify_pricing(bond_price: Money, face_value: Money) -> PricingAnalysis {
    let price_difference = bond_price - face_value;

    let classification = if price_difference.abs() < PAR_TOLERANCE {
        PricingClass::Par
    } else if price_difference > Decimal::ZERO {
        PricingClass::Premium
    } else {
        PricingClass::Discount
    };

    PricingAnalysis {
        classification,
        label: classification.label().to_string(),
        description: classification.description().to_string(),
        price_difference,
    }
}
