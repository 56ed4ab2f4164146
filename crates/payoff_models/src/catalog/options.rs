//! Options table.
//!
//! Payoffs are net profit at expiry in percent of the initial level, after
//! the illustrative premium.

use payoff_core::formula::{
    Annotation, CatalogKind, Family, PayoffFormula, PayoffFormulaBuilder, ProductInfo, Tone, Zone,
};
use payoff_core::shape::{
    BarrierDirection, Knock, Leg, LegKind, OptionKind, PayoffShape, Settlement,
};
use payoff_core::types::FormulaError;

const DOMAIN: (f64, f64) = (50.0, 150.0);

fn info(family: Family, risk_level: u8) -> ProductInfo {
    ProductInfo::new(family, CatalogKind::Option, risk_level)
}

fn strategy(legs: Vec<Leg>, premium: f64) -> PayoffShape {
    PayoffShape::Strategy { legs, premium }
}

fn option(name: &str, shape: PayoffShape) -> PayoffFormulaBuilder {
    PayoffFormula::builder(name, shape)
        .domain(DOMAIN.0, DOMAIN.1)
        .display_range(-40.0, 40.0)
        .annotation(Annotation::horizontal(0.0, "Breakeven", Tone::Neutral))
}

/// Builds every option formula in declaration order.
///
/// # Errors
/// Propagates builder validation errors.
pub fn formulas() -> Result<Vec<PayoffFormula>, FormulaError> {
    let mut out = Vec::with_capacity(40);
    out.extend(vanilla()?);
    out.extend(spreads()?);
    out.extend(volatility()?);
    out.extend(digitals()?);
    out.extend(barriers()?);
    out.extend(path_dependent()?);
    out.extend(arbitrage()?);
    Ok(out)
}

fn vanilla() -> Result<Vec<PayoffFormula>, FormulaError> {
    let strike = Annotation::vertical(100.0, "Strike", Tone::Strike);
    Ok(vec![
        option("Long Call", strategy(vec![Leg::long_call(100.0)], 5.0))
            .annotation(strike.clone())
            .info(info(Family::Vanilla, 5).summary("Right to buy at 100, loss limited to the premium"))
            .build()?,
        option("Long Put", strategy(vec![Leg::long_put(100.0)], 5.0))
            .annotation(strike.clone())
            .info(info(Family::Vanilla, 5).summary("Right to sell at 100, loss limited to the premium"))
            .build()?,
        option("Short Call", strategy(vec![Leg::short_call(100.0)], -5.0))
            .annotation(strike.clone())
            .info(info(Family::Vanilla, 7).summary("Premium collected against unlimited upside risk"))
            .build()?,
        option("Short Put", strategy(vec![Leg::short_put(100.0)], -5.0))
            .annotation(strike)
            .info(info(Family::Vanilla, 6).summary("Premium collected against the obligation to buy at 100"))
            .build()?,
    ])
}

fn spreads() -> Result<Vec<PayoffFormula>, FormulaError> {
    Ok(vec![
        option(
            "Bull Call Spread",
            strategy(vec![Leg::long_call(100.0), Leg::short_call(120.0)], 6.0),
        )
        .annotation(Annotation::vertical(100.0, "Long call", Tone::Strike))
        .annotation(Annotation::vertical(120.0, "Short call", Tone::Cap))
        .zone(Zone::new(100.0, 120.0, "Profit zone", Tone::Gain))
        .info(info(Family::Spread, 4).summary("Moderately bullish, gain capped at the spread width"))
        .build()?,
        option(
            "Bear Put Spread",
            strategy(vec![Leg::long_put(100.0), Leg::short_put(80.0)], 6.0),
        )
        .annotation(Annotation::vertical(100.0, "Long put", Tone::Strike))
        .annotation(Annotation::vertical(80.0, "Short put", Tone::Floor))
        .info(info(Family::Spread, 4).summary("Moderately bearish, gain capped at the spread width"))
        .build()?,
        option(
            "Bull Put Spread",
            strategy(vec![Leg::short_put(100.0), Leg::long_put(90.0)], -4.0),
        )
        .annotation(Annotation::vertical(100.0, "Short put", Tone::Strike))
        .annotation(Annotation::vertical(90.0, "Long put", Tone::Floor))
        .info(info(Family::Spread, 4).summary("Credit collected while the level stays above 100"))
        .build()?,
        option(
            "Bear Call Spread",
            strategy(vec![Leg::short_call(100.0), Leg::long_call(110.0)], -4.0),
        )
        .annotation(Annotation::vertical(100.0, "Short call", Tone::Strike))
        .annotation(Annotation::vertical(110.0, "Long call", Tone::Cap))
        .info(info(Family::Spread, 4).summary("Credit collected while the level stays below 100"))
        .build()?,
        option(
            "Ratio Call Spread",
            strategy(
                vec![Leg::long_call(100.0), Leg::new(LegKind::Call, 110.0, -2.0)],
                1.0,
            ),
        )
        .annotation(Annotation::vertical(100.0, "Long call", Tone::Strike))
        .annotation(Annotation::vertical(110.0, "Short calls x2", Tone::Cap))
        .info(info(Family::Spread, 6).summary("Cheap bullish view with open-ended risk above 120"))
        .build()?,
        option(
            "Covered Call",
            strategy(vec![Leg::underlying(100.0), Leg::short_call(110.0)], -3.0),
        )
        .annotation(Annotation::vertical(110.0, "Short call", Tone::Cap))
        .info(info(Family::Spread, 4).summary("Stock held with upside sold above 110 for income"))
        .build()?,
        option(
            "Protective Put",
            strategy(vec![Leg::underlying(100.0), Leg::long_put(95.0)], 3.0),
        )
        .annotation(Annotation::vertical(95.0, "Long put", Tone::Floor))
        .info(info(Family::Spread, 3).summary("Stock held with losses floored below 95"))
        .build()?,
        option(
            "Collar",
            strategy(
                vec![
                    Leg::underlying(100.0),
                    Leg::long_put(90.0),
                    Leg::short_call(110.0),
                ],
                0.0,
            ),
        )
        .annotation(Annotation::vertical(90.0, "Put floor", Tone::Floor))
        .annotation(Annotation::vertical(110.0, "Call cap", Tone::Cap))
        .zone(Zone::new(90.0, 110.0, "Collar band", Tone::Neutral))
        .info(info(Family::Spread, 3).summary("Zero-cost band between 90 and 110"))
        .build()?,
    ])
}

fn volatility() -> Result<Vec<PayoffFormula>, FormulaError> {
    Ok(vec![
        option(
            "Long Straddle",
            strategy(vec![Leg::long_call(100.0), Leg::long_put(100.0)], 10.0),
        )
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .info(info(Family::Volatility, 5).summary("Profits from a large move in either direction"))
        .build()?,
        option(
            "Short Straddle",
            strategy(vec![Leg::short_call(100.0), Leg::short_put(100.0)], -10.0),
        )
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .info(info(Family::Volatility, 7).summary("Premium collected on a quiet market, unlimited risk"))
        .build()?,
        option(
            "Long Strangle",
            strategy(vec![Leg::long_call(110.0), Leg::long_put(90.0)], 6.0),
        )
        .annotation(Annotation::vertical(90.0, "Put strike", Tone::Strike))
        .annotation(Annotation::vertical(110.0, "Call strike", Tone::Strike))
        .info(info(Family::Volatility, 5).summary("Cheaper straddle needing a bigger move"))
        .build()?,
        option(
            "Short Strangle",
            strategy(vec![Leg::short_call(110.0), Leg::short_put(90.0)], -6.0),
        )
        .annotation(Annotation::vertical(90.0, "Put strike", Tone::Strike))
        .annotation(Annotation::vertical(110.0, "Call strike", Tone::Strike))
        .zone(Zone::new(90.0, 110.0, "Premium kept", Tone::Gain))
        .info(info(Family::Volatility, 7).summary("Premium collected while the level stays in range"))
        .build()?,
        option(
            "Long Butterfly",
            strategy(
                vec![
                    Leg::long_call(90.0),
                    Leg::new(LegKind::Call, 100.0, -2.0),
                    Leg::long_call(110.0),
                ],
                2.0,
            ),
        )
        .display_range(-10.0, 15.0)
        .annotation(Annotation::vertical(100.0, "Body", Tone::Strike))
        .zone(Zone::new(90.0, 110.0, "Profit zone", Tone::Gain))
        .info(info(Family::Volatility, 3).summary("Bets on the level pinning at 100"))
        .build()?,
        option(
            "Short Butterfly",
            strategy(
                vec![
                    Leg::short_call(90.0),
                    Leg::new(LegKind::Call, 100.0, 2.0),
                    Leg::short_call(110.0),
                ],
                -2.0,
            ),
        )
        .display_range(-15.0, 10.0)
        .annotation(Annotation::vertical(100.0, "Body", Tone::Strike))
        .info(info(Family::Volatility, 3).summary("Small capped gain from a move away from 100"))
        .build()?,
        option(
            "Iron Condor",
            strategy(
                vec![
                    Leg::long_put(80.0),
                    Leg::short_put(90.0),
                    Leg::short_call(110.0),
                    Leg::long_call(120.0),
                ],
                -4.0,
            ),
        )
        .display_range(-10.0, 10.0)
        .annotation(Annotation::vertical(90.0, "Short put", Tone::Strike))
        .annotation(Annotation::vertical(110.0, "Short call", Tone::Strike))
        .zone(Zone::new(90.0, 110.0, "Max profit", Tone::Gain))
        .info(info(Family::Volatility, 4).summary("Range-bound credit with both wings protected"))
        .build()?,
        option(
            "Iron Butterfly",
            strategy(
                vec![
                    Leg::long_put(90.0),
                    Leg::short_put(100.0),
                    Leg::short_call(100.0),
                    Leg::long_call(110.0),
                ],
                -7.0,
            ),
        )
        .display_range(-10.0, 10.0)
        .annotation(Annotation::vertical(100.0, "Body", Tone::Strike))
        .info(info(Family::Volatility, 4).summary("Short straddle with protective wings"))
        .build()?,
        option(
            "Calendar Spread",
            PayoffShape::Calendar {
                strike: 100.0,
                width: 20.0,
                peak: 8.0,
                premium: 3.0,
            },
        )
        .display_range(-10.0, 10.0)
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .info(info(Family::Volatility, 3).summary("Front month sold, back month bought at the same strike"))
        .build()?,
    ])
}

fn digitals() -> Result<Vec<PayoffFormula>, FormulaError> {
    Ok(vec![
        option(
            "Digital Call",
            PayoffShape::Digital {
                option: OptionKind::Call,
                strike: 100.0,
                settlement: Settlement::Cash { payout: 10.0 },
                premium: 4.0,
            },
        )
        .display_range(-10.0, 10.0)
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .info(info(Family::Digital, 5).summary("Fixed payout of 10 above the strike"))
        .build()?,
        option(
            "Digital Put",
            PayoffShape::Digital {
                option: OptionKind::Put,
                strike: 100.0,
                settlement: Settlement::Cash { payout: 10.0 },
                premium: 4.0,
            },
        )
        .display_range(-10.0, 10.0)
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .info(info(Family::Digital, 5).summary("Fixed payout of 10 below the strike"))
        .build()?,
        option(
            "Asset-or-Nothing Call",
            PayoffShape::Digital {
                option: OptionKind::Call,
                strike: 100.0,
                settlement: Settlement::Asset,
                premium: 55.0,
            },
        )
        .display_range(-60.0, 100.0)
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .info(info(Family::Digital, 6).summary("Delivers the asset value above the strike"))
        .build()?,
    ])
}

fn barrier(
    option_kind: OptionKind,
    barrier: f64,
    direction: BarrierDirection,
    knock: Knock,
    premium: f64,
) -> PayoffShape {
    PayoffShape::Barrier {
        option: option_kind,
        strike: 100.0,
        barrier,
        direction,
        knock,
        rebate: 0.0,
        premium,
    }
}

fn barriers() -> Result<Vec<PayoffFormula>, FormulaError> {
    Ok(vec![
        option(
            "Up-and-Out Call",
            barrier(OptionKind::Call, 130.0, BarrierDirection::Up, Knock::Out, 4.0),
        )
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .annotation(Annotation::vertical(130.0, "Knock-out", Tone::Barrier))
        .zone(Zone::new(130.0, 150.0, "Knocked out", Tone::Loss))
        .info(info(Family::Barrier, 5).summary("Cheaper call that dies at 130"))
        .build()?,
        option(
            "Up-and-In Call",
            barrier(OptionKind::Call, 120.0, BarrierDirection::Up, Knock::In, 3.0),
        )
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .annotation(Annotation::vertical(120.0, "Knock-in", Tone::Barrier))
        .info(info(Family::Barrier, 5).summary("Call that only comes alive above 120"))
        .build()?,
        option(
            "Down-and-Out Put",
            barrier(OptionKind::Put, 70.0, BarrierDirection::Down, Knock::Out, 3.0),
        )
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .annotation(Annotation::vertical(70.0, "Knock-out", Tone::Barrier))
        .zone(Zone::new(50.0, 70.0, "Knocked out", Tone::Loss))
        .info(info(Family::Barrier, 5).summary("Cheaper put that dies at 70"))
        .build()?,
        option(
            "Down-and-In Put",
            barrier(OptionKind::Put, 80.0, BarrierDirection::Down, Knock::In, 3.0),
        )
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .annotation(Annotation::vertical(80.0, "Knock-in", Tone::Barrier))
        .info(info(Family::Barrier, 5).summary("Put that only comes alive below 80"))
        .build()?,
    ])
}

fn path_dependent() -> Result<Vec<PayoffFormula>, FormulaError> {
    Ok(vec![
        option(
            "Asian Call",
            PayoffShape::Asian {
                option: OptionKind::Call,
                strike: 100.0,
                damping: 0.5,
                premium: 3.0,
            },
        )
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .info(info(Family::PathDependent, 4).summary("Call on the average level, smoother and cheaper"))
        .build()?,
        option(
            "Asian Put",
            PayoffShape::Asian {
                option: OptionKind::Put,
                strike: 100.0,
                damping: 0.5,
                premium: 3.0,
            },
        )
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .info(info(Family::PathDependent, 4).summary("Put on the average level"))
        .build()?,
        option(
            "Lookback Call",
            PayoffShape::Lookback {
                option: OptionKind::Call,
                strike: 100.0,
                premium: 8.0,
            },
        )
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .info(info(Family::PathDependent, 4).summary("Call on the best level reached"))
        .build()?,
        option(
            "Lookback Put",
            PayoffShape::Lookback {
                option: OptionKind::Put,
                strike: 100.0,
                premium: 8.0,
            },
        )
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .info(info(Family::PathDependent, 4).summary("Put on the lowest level reached"))
        .build()?,
    ])
}

fn arbitrage() -> Result<Vec<PayoffFormula>, FormulaError> {
    Ok(vec![
        option(
            "Box Spread",
            strategy(
                vec![
                    Leg::long_call(90.0),
                    Leg::short_call(110.0),
                    Leg::long_put(110.0),
                    Leg::short_put(90.0),
                ],
                19.5,
            ),
        )
        .display_range(-2.0, 2.0)
        .info(info(Family::Arbitrage, 1).protected().summary("Locks in the strike gap whatever the level"))
        .build()?,
        option(
            "Conversion",
            strategy(
                vec![
                    Leg::underlying(100.0),
                    Leg::long_put(100.0),
                    Leg::short_call(100.0),
                ],
                -1.0,
            ),
        )
        .display_range(-2.0, 2.0)
        .info(info(Family::Arbitrage, 1).protected().summary("Long stock hedged by a synthetic short"))
        .build()?,
        option("Reversal", PayoffShape::Locked { value: 1.0 })
            .display_range(-2.0, 2.0)
            .info(info(Family::Arbitrage, 1).protected().summary("Short stock hedged by a synthetic long"))
            .build()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn find(name: &str) -> PayoffFormula {
        formulas()
            .unwrap()
            .into_iter()
            .find(|f| f.name() == name)
            .unwrap()
    }

    #[test]
    fn test_table_builds() {
        assert_eq!(formulas().unwrap().len(), 35);
    }

    #[test]
    fn test_bull_call_spread_known_values() {
        let spread = find("Bull Call Spread");
        assert_eq!(spread.evaluate(90.0, 100.0, None), -6.0);
        assert_eq!(spread.evaluate(110.0, 100.0, None), 4.0);
        assert_eq!(spread.evaluate(130.0, 100.0, None), 14.0);
    }

    #[test]
    fn test_up_and_out_call_known_values() {
        let call = find("Up-and-Out Call");
        assert_eq!(call.evaluate(135.0, 100.0, None), -4.0);
        assert_eq!(call.evaluate(110.0, 100.0, None), 6.0);
    }

    #[test]
    fn test_arbitrage_positions_are_flat() {
        for name in ["Box Spread", "Conversion", "Reversal"] {
            let formula = find(name);
            let low = formula.evaluate(60.0, 100.0, None);
            let high = formula.evaluate(140.0, 100.0, None);
            assert_relative_eq!(low, high, epsilon = 1e-12);
            assert!(low > 0.0, "{} locks in a gain", name);
        }
    }

    #[test]
    fn test_long_butterfly_peaks_at_body() {
        let fly = find("Long Butterfly");
        assert_eq!(fly.evaluate(100.0, 100.0, None), 8.0);
        assert_eq!(fly.evaluate(80.0, 100.0, None), -2.0);
        assert_eq!(fly.evaluate(120.0, 100.0, None), -2.0);
    }

    #[test]
    fn test_collar_band() {
        let collar = find("Collar");
        assert_eq!(collar.evaluate(70.0, 100.0, None), -10.0);
        assert_eq!(collar.evaluate(140.0, 100.0, None), 10.0);
    }
}
