use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::YtmError;
use crate::fixed_income::yields::BondParameters;
use crate::types::{Money, Years};
use crate::YtmResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper limit on coupon periods: 100 years of daily coupons.
pub const MAX_PERIODS: u32 = 36_500;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Input for the cash-flow schedule. `coupon_payment` is the periodic
/// (already divided by frequency) coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowScheduleInput {
    /// Price paid for the bond; the period 0 outflow.
    pub bond_price: Money,
    /// Redemption value paid with the final coupon.
    pub face_value: Money,
    /// Coupon payments per year.
    pub frequency: u32,
    /// Years remaining until maturity.
    pub years: Years,
    /// Coupon paid each period.
    pub coupon_payment: Money,
}

impl CashFlowScheduleInput {
    /// Schedule input for a bond quoted with an annual coupon.
    pub fn from_bond(params: &BondParameters) -> YtmResult<Self> {
        period_count(params.years, params.frequency)?;
        Ok(Self {
            bond_price: params.bond_price,
            face_value: params.face_value,
            frequency: params.frequency,
            years: params.years,
            coupon_payment: params.coupon_payment / Decimal::from(params.frequency),
        })
    }
}

/// A single row of the bond's cash-flow schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub period: u32,
    pub time_years: Years,
    pub coupon_payment: Money,
    pub principal_payment: Money,
    pub total_cash_flow: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the ordered schedule for periods `0..=n`, where `n = years * frequency`.
///
/// Period 0 is the purchase (`-bond_price`), periods `1..n` carry the coupon
/// and period `n` carries the coupon plus the face value.
pub fn build_cash_flows(input: &CashFlowScheduleInput) -> YtmResult<Vec<CashFlow>> {
    validate_schedule_input(input)?;

    let periods = period_count(input.years, input.frequency)?;
    let freq = Decimal::from(input.frequency);

    let mut flows = Vec::with_capacity(periods as usize + 1);
    flows.push(CashFlow {
        period: 0,
        time_years: Decimal::ZERO,
        coupon_payment: Decimal::ZERO,
        principal_payment: -input.bond_price,
        total_cash_flow: -input.bond_price,
    });

    for period in 1..=periods {
        let principal_payment = if period == periods {
            input.face_value
        } else {
            Decimal::ZERO
        };
        flows.push(CashFlow {
            period,
            time_years: Decimal::from(period) / freq,
            coupon_payment: input.coupon_payment,
            principal_payment,
            total_cash_flow: input.coupon_payment + principal_payment,
        });
    }

    Ok(flows)
}

/// Number of coupon periods for a bond, `years * frequency`.
///
/// Shared by the solver and the schedule builder so both always agree on the
/// period count. The product must be a whole number in `1..=MAX_PERIODS`.
pub fn period_count(years: Years, frequency: u32) -> YtmResult<u32> {
    if frequency == 0 {
        return Err(YtmError::InvalidInput {
            field: "frequency".into(),
            reason: "Frequency must be at least one payment per year".into(),
        });
    }
    if years <= Decimal::ZERO {
        return Err(YtmError::InvalidInput {
            field: "years".into(),
            reason: "Years to maturity must be positive".into(),
        });
    }

    let periods = years
        .checked_mul(Decimal::from(frequency))
        .ok_or_else(|| YtmError::InvalidInput {
            field: "years".into(),
            reason: "Years to maturity is too large".into(),
        })?;

    if !periods.fract().is_zero() {
        return Err(YtmError::InvalidInput {
            field: "years".into(),
            reason: format!(
                "Years × frequency must be a whole number of coupon periods (got {periods})"
            ),
        });
    }

    match periods.to_u32() {
        Some(n) if n <= MAX_PERIODS => Ok(n),
        _ => Err(YtmError::InvalidInput {
            field: "years".into(),
            reason: format!("Bond may have at most {MAX_PERIODS} coupon periods (got {periods})"),
        }),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_schedule_input(input: &CashFlowScheduleInput) -> YtmResult<()> {
    if input.bond_price <= Decimal::ZERO {
        return Err(YtmError::InvalidInput {
            field: "bond_price".into(),
            reason: "Bond price must be positive".into(),
        });
    }
    if input.face_value <= Decimal::ZERO {
        return Err(YtmError::InvalidInput {
            field: "face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    if input.coupon_payment < Decimal::ZERO {
        return Err(YtmError::InvalidInput {
            field: "coupon_payment".into(),
            reason: "Coupon payment cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn five_year_semi_annual() -> CashFlowScheduleInput {
        CashFlowScheduleInput {
            bond_price: dec!(95),
            face_value: dec!(100),
            frequency: 2,
            years: dec!(5),
            coupon_payment: dec!(3),
        }
    }

    #[test]
    fn test_schedule_length_is_periods_plus_one() {
        let flows = build_cash_flows(&five_year_semi_annual()).unwrap();
        assert_eq!(flows.len(), 11);
        assert_eq!(flows.first().unwrap().period, 0);
        assert_eq!(flows.last().unwrap().period, 10);
    }

    #[test]
    fn test_period_zero_is_purchase_outflow() {
        let flows = build_cash_flows(&five_year_semi_annual()).unwrap();
        let first = &flows[0];
        assert_eq!(first.coupon_payment, Decimal::ZERO);
        assert_eq!(first.principal_payment, dec!(-95));
        assert_eq!(first.total_cash_flow, dec!(-95));
        assert_eq!(first.time_years, Decimal::ZERO);
    }

    #[test]
    fn test_final_period_carries_redemption() {
        let flows = build_cash_flows(&five_year_semi_annual()).unwrap();
        let last = flows.last().unwrap();
        assert_eq!(last.coupon_payment, dec!(3));
        assert_eq!(last.principal_payment, dec!(100));
        assert_eq!(last.total_cash_flow, dec!(103));
        assert_eq!(last.time_years, dec!(5));
    }

    #[test]
    fn test_interior_periods_are_coupon_only() {
        let flows = build_cash_flows(&five_year_semi_annual()).unwrap();
        for cf in &flows[1..flows.len() - 1] {
            assert_eq!(cf.principal_payment, Decimal::ZERO);
            assert_eq!(cf.total_cash_flow, dec!(3));
        }
        assert_eq!(flows[3].time_years, dec!(1.5));
    }

    #[test]
    fn test_principal_sums_to_face_minus_price() {
        let flows = build_cash_flows(&five_year_semi_annual()).unwrap();
        let principal: Decimal = flows.iter().map(|cf| cf.principal_payment).sum();
        assert_eq!(principal, dec!(5));
    }

    #[test]
    fn test_single_period_bond() {
        let input = CashFlowScheduleInput {
            years: dec!(1),
            frequency: 1,
            coupon_payment: dec!(6),
            ..five_year_semi_annual()
        };
        let flows = build_cash_flows(&input).unwrap();
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[1].total_cash_flow, dec!(106));
    }

    #[test]
    fn test_period_count_fractional_rejected() {
        let err = period_count(dec!(2.3), 2).unwrap_err();
        match err {
            YtmError::InvalidInput { field, .. } => assert_eq!(field, "years"),
            other => panic!("Expected InvalidInput for years, got {other:?}"),
        }
    }

    #[test]
    fn test_period_count_accepts_half_years() {
        assert_eq!(period_count(dec!(2.5), 2).unwrap(), 5);
        assert_eq!(period_count(dec!(0.25), 4).unwrap(), 1);
    }

    #[test]
    fn test_period_count_rejects_bad_frequency() {
        match period_count(dec!(5), 0).unwrap_err() {
            YtmError::InvalidInput { field, .. } => assert_eq!(field, "frequency"),
            other => panic!("Expected InvalidInput for frequency, got {other:?}"),
        }
    }

    #[test]
    fn test_period_count_weekly_and_daily() {
        assert_eq!(period_count(dec!(1), 52).unwrap(), 52);
        assert_eq!(period_count(dec!(5), 365).unwrap(), 1825);
    }

    #[test]
    fn test_period_count_limit() {
        assert_eq!(period_count(dec!(100), 365).unwrap(), MAX_PERIODS);
        assert!(period_count(dec!(101), 365).is_err());
    }

    #[test]
    fn test_from_bond_divides_annual_coupon() {
        let params = BondParameters {
            bond_price: dec!(98),
            coupon_payment: dec!(8),
            years: dec!(3),
            face_value: dec!(100),
            frequency: 4,
        };
        let input = CashFlowScheduleInput::from_bond(&params).unwrap();
        assert_eq!(input.coupon_payment, dec!(2));
        assert_eq!(build_cash_flows(&input).unwrap().len(), 13);
    }

    #[test]
    fn test_from_bond_rejects_zero_frequency() {
        let params = BondParameters {
            bond_price: dec!(98),
            coupon_payment: dec!(8),
            years: dec!(3),
            face_value: dec!(100),
            frequency: 0,
        };
        assert!(CashFlowScheduleInput::from_bond(&params).is_err());
    }

    #[test]
    fn test_negative_coupon_rejected() {
        let mut input = five_year_semi_annual();
        input.coupon_payment = dec!(-1);
        assert!(build_cash_flows(&input).is_err());
    }
}
