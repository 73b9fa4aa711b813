use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::YtmError;
use crate::fixed_income::cashflows::period_count;
use crate::types::{Money, Rate, Years};
use crate::YtmResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum bisection iterations for the YTM solve.
pub const MAX_ITERATIONS: u32 = 200;

/// Bracket width at which the bisection stops (1e-7).
pub const TOLERANCE: Decimal = dec!(0.0000001);

/// Lowest periodic rate searched (0%).
pub const SEARCH_LOWER_BOUND: Rate = Decimal::ZERO;

/// Highest periodic rate searched (100% per period).
pub const SEARCH_UPPER_BOUND: Rate = Decimal::ONE;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Parameters of a standard fixed-coupon bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondParameters {
    /// Market price of the bond.
    pub bond_price: Money,
    /// Annual coupon in currency units (not a rate).
    pub coupon_payment: Money,
    /// Years remaining until maturity.
    pub years: Years,
    /// Redemption (par) value.
    pub face_value: Money,
    /// Coupon payments per year.
    #[serde(default = "default_frequency")]
    pub frequency: u32,
}

fn default_frequency() -> u32 {
    2
}

impl BondParameters {
    /// Parse bond parameters from a JSON document.
    pub fn from_json(input: &str) -> YtmResult<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Which end of the search interval the solved rate ended up against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchBound {
    Lower,
    Upper,
}

/// Output of the bisection solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YtmSolution {
    /// Periodic discount rate equating PV of the cash flows to the price.
    pub yield_per_period: Rate,
    /// yield_per_period × frequency.
    pub bond_equivalent_yield: Rate,
    /// (1 + yield_per_period)^frequency − 1.
    pub effective_annual_yield: Rate,
    pub periods: u32,
    /// Coupon paid each period.
    pub coupon_payment: Money,
    /// Cash flow received at the end of periods 1..=n.
    pub cash_flows: Vec<Money>,
    pub iterations: u32,
    /// Set when the true yield lies outside the search interval and the
    /// solve collapsed onto one of its ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound_hit: Option<SearchBound>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Solve for the periodic yield to maturity by bisection on the bond's
/// present-value function over `[0, 1]`.
///
/// Each step halves the bracket: if the PV at the midpoint is above the
/// price the yield is too low, so the floor moves up; otherwise the ceiling
/// moves down. The loop stops after `MAX_ITERATIONS` or once the bracket is
/// no wider than `TOLERANCE`. Yields outside the bracket converge onto the
/// nearer end and are reported through `bound_hit`, not as an error.
pub fn solve_ytm(params: &BondParameters) -> YtmResult<YtmSolution> {
    validate_bond_parameters(params)?;

    let periods = period_count(params.years, params.frequency)?;
    let freq = Decimal::from(params.frequency);
    let coupon_per_period = params.coupon_payment / freq;
    let cash_flows = periodic_cash_flows(coupon_per_period, params.face_value, periods);

    let two = dec!(2);
    let mut low = SEARCH_LOWER_BOUND;
    let mut high = SEARCH_UPPER_BOUND;
    let mut iterations: u32 = 0;

    while iterations < MAX_ITERATIONS && (high - low) > TOLERANCE {
        let mid = (low + high) / two;
        if present_value(mid, &cash_flows)? > params.bond_price {
            low = mid;
        } else {
            high = mid;
        }
        iterations += 1;
    }

    let rate = (low + high) / two;
    let effective_annual_yield = compound(Decimal::ONE + rate, params.frequency)
        .ok_or_else(|| {
            YtmError::FinancialImpossibility(format!(
                "Effective annual yield overflows at {rate} per period compounded {} times a year",
                params.frequency
            ))
        })?
        - Decimal::ONE;

    let bound_hit = if rate - SEARCH_LOWER_BOUND < TOLERANCE {
        Some(SearchBound::Lower)
    } else if SEARCH_UPPER_BOUND - rate < TOLERANCE {
        Some(SearchBound::Upper)
    } else {
        None
    };

    tracing::debug!(
        periods,
        iterations,
        yield_per_period = %rate,
        "YTM bisection finished"
    );
    if let Some(bound) = bound_hit {
        tracing::warn!(
            ?bound,
            bond_price = %params.bond_price,
            "YTM solve collapsed onto the search bound"
        );
    }

    Ok(YtmSolution {
        yield_per_period: rate,
        bond_equivalent_yield: rate * freq,
        effective_annual_yield,
        periods,
        coupon_payment: coupon_per_period,
        cash_flows,
        iterations,
        bound_hit,
    })
}

/// Present value of flows received at the end of periods 1, 2, ..., n:
///   PV = sum_{t=1}^{n} CF_t / (1+r)^t
///
/// Discount factors are built by repeated division so that long, high-rate
/// schedules underflow towards zero instead of overflowing.
pub fn present_value(rate: Rate, cash_flows: &[Money]) -> YtmResult<Money> {
    if rate < dec!(-1) {
        return Err(YtmError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must not be below -100%".into(),
        });
    }

    let one_plus_r = Decimal::ONE + rate;
    if one_plus_r.is_zero() {
        return Err(YtmError::DivisionByZero {
            context: "present value discount factor at rate -100%".into(),
        });
    }

    let mut discount = Decimal::ONE;
    let mut pv = Decimal::ZERO;
    for cf in cash_flows {
        discount /= one_plus_r;
        pv += cf * discount;
    }

    Ok(pv)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_bond_parameters(params: &BondParameters) -> YtmResult<()> {
    if params.bond_price <= Decimal::ZERO {
        return Err(YtmError::InvalidInput {
            field: "bond_price".into(),
            reason: "Bond price must be positive".into(),
        });
    }
    if params.coupon_payment < Decimal::ZERO {
        return Err(YtmError::InvalidInput {
            field: "coupon_payment".into(),
            reason: "Coupon payment cannot be negative".into(),
        });
    }
    if params.face_value <= Decimal::ZERO {
        return Err(YtmError::InvalidInput {
            field: "face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    Ok(())
}

/// Per-period flows: the coupon each period, plus face value in the last.
fn periodic_cash_flows(coupon: Money, face_value: Money, periods: u32) -> Vec<Money> {
    (1..=periods)
        .map(|t| if t == periods { coupon + face_value } else { coupon })
        .collect()
}

/// Integer power by repeated squaring (avoids powd precision drift).
/// None if the result does not fit in a Decimal.
fn compound(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    let mut exp = n;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        exp >>= 1;
        if exp > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
