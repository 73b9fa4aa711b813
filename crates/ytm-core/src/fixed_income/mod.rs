//! Fixed-coupon bond analytics: yield solver, cash-flow schedule, pricing
//! classification and the aggregate bond metrics entry point.

pub mod bond_metrics;
pub mod cashflows;
pub mod pricing;
pub mod yields;

pub use bond_metrics::{calculate_bond_metrics, BondMetricsOutput};
pub use cashflows::{build_cash_flows, CashFlow, CashFlowScheduleInput};
pub use pricing::{classify_pricing, PricingAnalysis, PricingClass};
pub use yields::{present_value, solve_ytm, BondParameters, SearchBound, YtmSolution};
