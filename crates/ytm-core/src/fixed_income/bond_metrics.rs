use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::fixed_income::cashflows::{build_cash_flows, CashFlow, CashFlowScheduleInput};
use crate::fixed_income::pricing::{classify_pricing, PricingAnalysis, PAR_TOLERANCE};
use crate::fixed_income::yields::{
    solve_ytm, BondParameters, SearchBound, MAX_ITERATIONS, SEARCH_LOWER_BOUND,
    SEARCH_UPPER_BOUND, TOLERANCE,
};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::YtmResult;

/// Everything a presentation layer needs for one bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondMetricsOutput {
    pub yield_per_period: Rate,
    pub bond_equivalent_yield: Rate,
    pub effective_annual_yield: Rate,
    /// Annual coupon / market price.
    pub current_yield: Rate,
    pub periods: u32,
    /// Coupon paid each period.
    pub coupon_payment: Money,
    pub cash_flows: Vec<CashFlow>,
    pub iterations: u32,
    pub pricing_analysis: PricingAnalysis,
}

/// Solve the yield, build the schedule, and classify the price of a bond.
///
/// The schedule is built from the solver's periodic coupon, so the two share
/// one period count and coupon figure.
pub fn calculate_bond_metrics(
    params: &BondParameters,
) -> YtmResult<ComputationOutput<BondMetricsOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let solution = solve_ytm(params)?;

    let cash_flows = build_cash_flows(&CashFlowScheduleInput {
        bond_price: params.bond_price,
        face_value: params.face_value,
        frequency: params.frequency,
        years: params.years,
        coupon_payment: solution.coupon_payment,
    })?;

    let pricing_analysis = classify_pricing(params.bond_price, params.face_value);
    let current_yield = params.coupon_payment / params.bond_price;

    match solution.bound_hit {
        Some(SearchBound::Lower) => warnings.push(format!(
            "Solved yield sits on the search floor ({SEARCH_LOWER_BOUND} per period); the price implies a yield at or below zero"
        )),
        Some(SearchBound::Upper) => warnings.push(format!(
            "Solved yield sits on the search ceiling ({SEARCH_UPPER_BOUND} per period); the true yield may be higher"
        )),
        None => {}
    }

    let output = BondMetricsOutput {
        yield_per_period: solution.yield_per_period,
        bond_equivalent_yield: solution.bond_equivalent_yield,
        effective_annual_yield: solution.effective_annual_yield,
        current_yield,
        periods: solution.periods,
        coupon_payment: solution.coupon_payment,
        cash_flows,
        iterations: solution.iterations,
        pricing_analysis,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "ytm_method": "bisection",
        "search_interval": [SEARCH_LOWER_BOUND.to_string(), SEARCH_UPPER_BOUND.to_string()],
        "max_iterations": MAX_ITERATIONS,
        "convergence_eps": TOLERANCE.to_string(),
        "par_tolerance": PAR_TOLERANCE.to_string(),
        "coupon_schedule": "uniform periodic coupons, principal at maturity"
    });

    Ok(with_metadata(
        "Yield to Maturity (bisection)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}
