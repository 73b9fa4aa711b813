use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use ytm_core::fixed_income::{
    bond_metrics, cashflows, pricing, BondParameters, CashFlowScheduleInput,
};

use crate::input;

/// Bond description shared by the calculate and cash-flows commands
#[derive(Args)]
pub struct BondArgs {
    /// Market price of the bond (e.g. 95.50)
    #[arg(long)]
    pub bond_price: Option<Decimal>,

    /// Annual coupon in currency units (e.g. 6 for a 6% coupon on 100 face)
    #[arg(long)]
    pub coupon_payment: Option<Decimal>,

    /// Years remaining until maturity
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Face (redemption) value
    #[arg(long, default_value = "100")]
    pub face_value: Decimal,

    /// Coupon payments per year
    #[arg(long, default_value = "2")]
    pub frequency: u32,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the full yield-to-maturity calculation
#[derive(Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub bond: BondArgs,
}

/// Arguments for the cash-flow schedule
#[derive(Args)]
pub struct CashFlowArgs {
    #[command(flatten)]
    pub bond: BondArgs,
}

/// Arguments for par/premium/discount classification
#[derive(Args)]
pub struct ClassifyArgs {
    /// Market price of the bond
    #[arg(long)]
    pub bond_price: Decimal,

    /// Face (redemption) value
    #[arg(long, default_value = "100")]
    pub face_value: Decimal,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_bond(args.bond)?;
    let result = bond_metrics::calculate_bond_metrics(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cash_flows(args: CashFlowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_bond(args.bond)?;
    let schedule_input = CashFlowScheduleInput::from_bond(&params)?;
    let flows = cashflows::build_cash_flows(&schedule_input)?;
    Ok(serde_json::to_value(flows)?)
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis = pricing::classify_pricing(args.bond_price, args.face_value);
    Ok(serde_json::to_value(analysis)?)
}

/// Bond parameters from `--input`, then individual flags, then piped stdin.
fn resolve_bond(args: BondArgs) -> Result<BondParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }

    if let Some(bond_price) = args.bond_price {
        return Ok(BondParameters {
            bond_price,
            coupon_payment: args
                .coupon_payment
                .ok_or("--coupon-payment is required (or provide --input)")?,
            years: args
                .years
                .ok_or("--years is required (or provide --input)")?,
            face_value: args.face_value,
            frequency: args.frequency,
        });
    }

    input::stdin::read_stdin()?
        .ok_or_else(|| "--bond-price, --input <file> or JSON on stdin required".into())
}
