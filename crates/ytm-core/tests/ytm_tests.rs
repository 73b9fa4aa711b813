use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use ytm_core::fixed_income::{
    build_cash_flows, calculate_bond_metrics, classify_pricing, present_value, solve_ytm,
    BondParameters, CashFlowScheduleInput, PricingClass,
};
use ytm_core::fixed_income::yields::TOLERANCE;

fn bond(price: Decimal) -> BondParameters {
    BondParameters {
        bond_price: price,
        coupon_payment: dec!(6),
        years: dec!(5),
        face_value: dec!(100),
        frequency: 2,
    }
}

// ===========================================================================
// Yield tests
// ===========================================================================

#[test]
fn test_par_bond_bey_equals_coupon_rate() {
    let out = calculate_bond_metrics(&bond(dec!(100))).unwrap();
    assert!(
        (out.result.bond_equivalent_yield - dec!(0.06)).abs() < dec!(0.0001),
        "Expected BEY ~6%, got {}",
        out.result.bond_equivalent_yield
    );
    assert_eq!(out.result.pricing_analysis.classification, PricingClass::Par);
}

#[test]
fn test_par_property_across_frequencies() {
    for frequency in [1u32, 2, 4, 12, 52] {
        let params = BondParameters {
            bond_price: dec!(1000),
            coupon_payment: dec!(45),
            years: dec!(10),
            face_value: dec!(1000),
            frequency,
        };
        let sol = solve_ytm(&params).unwrap();
        assert!(
            (sol.bond_equivalent_yield - dec!(0.045)).abs() < dec!(0.0001),
            "frequency {frequency}: BEY {}",
            sol.bond_equivalent_yield
        );
    }
}

#[test]
fn test_yield_strictly_decreasing_in_price() {
    let prices = [dec!(90), dec!(95), dec!(100), dec!(105), dec!(110)];
    let yields: Vec<Decimal> = prices
        .iter()
        .map(|p| solve_ytm(&bond(*p)).unwrap().bond_equivalent_yield)
        .collect();

    for w in yields.windows(2) {
        assert!(w[0] > w[1], "yields not decreasing: {yields:?}");
    }
    assert!(yields[1] > dec!(0.06));
    assert!(yields[3] < dec!(0.06));
}

#[test]
fn test_present_value_round_trip() {
    for price in [dec!(88.5), dec!(95), dec!(100), dec!(112.25)] {
        let sol = solve_ytm(&bond(price)).unwrap();
        let pv = present_value(sol.yield_per_period, &sol.cash_flows).unwrap();

        // The final bracket is narrower than TOLERANCE around the solved rate.
        let pv_below = present_value(sol.yield_per_period - TOLERANCE, &sol.cash_flows).unwrap();
        let pv_above = present_value(sol.yield_per_period + TOLERANCE, &sol.cash_flows).unwrap();
        assert!(pv_below > price && price > pv_above);

        // PV error is the rate error (< TOLERANCE) scaled by price × periods.
        let scale = price * Decimal::from(sol.periods);
        assert!(
            (pv - price).abs() < scale * TOLERANCE,
            "PV {pv} should reproduce price {price}"
        );
    }
}

#[test]
fn test_deterministic() {
    let a = calculate_bond_metrics(&bond(dec!(97.3))).unwrap().result;
    let b = calculate_bond_metrics(&bond(dec!(97.3))).unwrap().result;
    assert_eq!(a.iterations, b.iterations);
    assert_eq!(a.yield_per_period, b.yield_per_period);
    assert_eq!(a, b);
}

// ===========================================================================
// Cash-flow schedule tests
// ===========================================================================

#[test]
fn test_schedule_invariants() {
    let cases = [
        (dec!(95), dec!(100), 2u32, dec!(5), dec!(3)),
        (dec!(100), dec!(100), 365, dec!(2), dec!(0.01)),
        (dec!(1020), dec!(1000), 4, dec!(2.5), dec!(12.5)),
        (dec!(60), dec!(100), 1, dec!(7), Decimal::ZERO),
        (dec!(99), dec!(100), 12, dec!(1), dec!(0.5)),
    ];

    for (price, face, frequency, years, coupon) in cases {
        let flows = build_cash_flows(&CashFlowScheduleInput {
            bond_price: price,
            face_value: face,
            frequency,
            years,
            coupon_payment: coupon,
        })
        .unwrap();

        let periods = (years * Decimal::from(frequency)).trunc();
        assert_eq!(Decimal::from(flows.len() as u64), periods + Decimal::ONE);
        assert_eq!(flows[0].total_cash_flow, -price);
        assert_eq!(flows.last().unwrap().total_cash_flow, coupon + face);
        for cf in &flows[1..flows.len() - 1] {
            assert_eq!(cf.total_cash_flow, coupon);
        }
        let principal: Decimal = flows.iter().map(|cf| cf.principal_payment).sum();
        assert_eq!(principal, face - price);
    }
}

// ===========================================================================
// Classifier tests
// ===========================================================================

#[test]
fn test_classifier_boundaries() {
    let face = dec!(100);
    assert_eq!(classify_pricing(face + dec!(0.009), face).classification, PricingClass::Par);
    assert_eq!(classify_pricing(face - dec!(0.009), face).classification, PricingClass::Par);
    assert_eq!(
        classify_pricing(face + dec!(0.011), face).classification,
        PricingClass::Premium
    );
    assert_eq!(
        classify_pricing(face - dec!(0.011), face).classification,
        PricingClass::Discount
    );
}

// ===========================================================================
// Serialization
// ===========================================================================

#[test]
fn test_output_json_shape() {
    let out = calculate_bond_metrics(&bond(dec!(105))).unwrap();
    let value = serde_json::to_value(&out).unwrap();

    assert_eq!(value["result"]["periods"], 10);
    assert_eq!(value["result"]["pricing_analysis"]["classification"], "premium");
    assert_eq!(value["result"]["cash_flows"].as_array().unwrap().len(), 11);
    assert!(value["metadata"]["version"].is_string());
}
