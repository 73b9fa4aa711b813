use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use ytm_core::fixed_income::{bond_metrics, cashflows, pricing, BondParameters};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, raw: &str) -> NapiResult<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| napi::Error::from_reason(format!("Invalid {field} '{raw}': {e}")))
}

/// Full yield-to-maturity result for a bond given as JSON `BondParameters`.
#[napi]
pub fn calculate_ytm(input_json: String) -> NapiResult<String> {
    let input = BondParameters::from_json(&input_json).map_err(to_napi_error)?;
    let output = bond_metrics::calculate_bond_metrics(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Cash-flow schedule for a bond given as JSON `BondParameters` (annual coupon).
#[napi]
pub fn bond_cash_flows(input_json: String) -> NapiResult<String> {
    let input = BondParameters::from_json(&input_json).map_err(to_napi_error)?;
    let schedule_input =
        cashflows::CashFlowScheduleInput::from_bond(&input).map_err(to_napi_error)?;
    let flows = cashflows::build_cash_flows(&schedule_input).map_err(to_napi_error)?;
    serde_json::to_string(&flows).map_err(to_napi_error)
}

/// Par / premium / discount classification. Amounts are decimal strings.
#[napi]
pub fn classify_bond_pricing(bond_price: String, face_value: String) -> NapiResult<String> {
    let price = parse_decimal("bond_price", &bond_price)?;
    let face = parse_decimal("face_value", &face_value)?;
    let analysis = pricing::classify_pricing(price, face);
    serde_json::to_string(&analysis).map_err(to_napi_error)
}
