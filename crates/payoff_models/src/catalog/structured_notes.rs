//! Structured-notes table.
//!
//! Payoffs are redemption amounts in percent of notional, evaluated on the
//! terminal level in percent of the initial level. All constants are
//! illustrative defaults.

use payoff_core::formula::{
    Annotation, CatalogKind, Family, PayoffFormula, ProductInfo, ReferenceCurve, Tone, Zone,
};
use payoff_core::shape::{Direction, PayoffShape};
use payoff_core::types::FormulaError;

fn info(family: Family, risk_level: u8) -> ProductInfo {
    ProductInfo::new(family, CatalogKind::StructuredNote, risk_level)
}

/// Builds every structured-note formula in declaration order.
///
/// # Errors
/// Propagates builder validation errors.
pub fn formulas() -> Result<Vec<PayoffFormula>, FormulaError> {
    let mut out = Vec::with_capacity(32);
    out.extend(capital_protection()?);
    out.extend(income()?);
    out.extend(participation()?);
    out.extend(leverage()?);
    out.extend(fx_structured()?);
    Ok(out)
}

fn capital_protection() -> Result<Vec<PayoffFormula>, FormulaError> {
    Ok(vec![
        PayoffFormula::builder(
            "Capital Protected Note",
            PayoffShape::LinearWithFloor {
                strike: 100.0,
                floor: 100.0,
                participation: 0.8,
                cap: None,
            },
        )
        .domain(40.0, 160.0)
        .display_range(30.0, 160.0)
        .annotation(Annotation::horizontal(100.0, "Capital floor", Tone::Floor))
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .zone(Zone::new(40.0, 100.0, "Capital protected", Tone::Floor))
        .zone(Zone::new(100.0, 160.0, "80% participation", Tone::Gain))
        .reference_curve(ReferenceCurve::direct_investment())
        .info(
            info(Family::CapitalProtection, 1)
                .protected()
                .summary("Full capital at maturity plus 80% of the upside"),
        )
        .build()?,
        PayoffFormula::builder(
            "Capped Capital Protected Note",
            PayoffShape::LinearWithFloor {
                strike: 100.0,
                floor: 100.0,
                participation: 1.0,
                cap: Some(130.0),
            },
        )
        .domain(40.0, 170.0)
        .display_range(80.0, 150.0)
        .annotation(Annotation::horizontal(100.0, "Capital floor", Tone::Floor))
        .annotation(Annotation::horizontal(130.0, "Cap", Tone::Cap))
        .info(
            info(Family::CapitalProtection, 1)
                .protected()
                .summary("Full participation up to a 130% cap, capital guaranteed"),
        )
        .build()?,
        PayoffFormula::builder(
            "Partial Capital Protection Note",
            PayoffShape::LinearWithFloor {
                strike: 100.0,
                floor: 90.0,
                participation: 1.2,
                cap: None,
            },
        )
        .domain(40.0, 160.0)
        .display_range(70.0, 180.0)
        .annotation(Annotation::horizontal(90.0, "90% floor", Tone::Floor))
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .info(
            info(Family::CapitalProtection, 2)
                .summary("90% capital floor in exchange for 120% participation"),
        )
        .build()?,
        PayoffFormula::builder(
            "Shark Fin Note",
            PayoffShape::KnockOutParticipation {
                strike: 100.0,
                floor: 100.0,
                participation: 1.0,
                barrier: 130.0,
                rebate: 105.0,
            },
        )
        .domain(50.0, 160.0)
        .display_range(90.0, 140.0)
        .annotation(Annotation::vertical(130.0, "Knock-out barrier", Tone::Barrier))
        .annotation(Annotation::horizontal(105.0, "Rebate", Tone::Coupon))
        .zone(Zone::new(100.0, 130.0, "Participation", Tone::Gain))
        .zone(Zone::new(130.0, 160.0, "Knocked out", Tone::Neutral))
        .info(
            info(Family::CapitalProtection, 2)
                .protected()
                .summary("Protected participation that falls back to a rebate above 130%"),
        )
        .build()?,
        PayoffFormula::builder(
            "Himalaya Note",
            PayoffShape::LinearWithFloor {
                strike: 100.0,
                floor: 100.0,
                participation: 0.6,
                cap: None,
            },
        )
        .domain(40.0, 180.0)
        .display_range(80.0, 160.0)
        .annotation(Annotation::horizontal(100.0, "Capital floor", Tone::Floor))
        .info(
            info(Family::CapitalProtection, 2)
                .protected()
                .summary("Basket note locking in the best performer each period (single-underlying view)"),
        )
        .build()?,
        PayoffFormula::builder(
            "Captibasket Note",
            PayoffShape::LinearWithFloor {
                strike: 100.0,
                floor: 100.0,
                participation: 0.7,
                cap: Some(140.0),
            },
        )
        .domain(40.0, 200.0)
        .display_range(80.0, 160.0)
        .annotation(Annotation::horizontal(100.0, "Capital floor", Tone::Floor))
        .annotation(Annotation::horizontal(140.0, "Cap", Tone::Cap))
        .info(
            info(Family::CapitalProtection, 2)
                .protected()
                .summary("Capped basket participation with capital guarantee (single-underlying view)"),
        )
        .build()?,
        PayoffFormula::builder(
            "Magic Asian Note",
            PayoffShape::AveragedProtection {
                strike: 100.0,
                floor: 100.0,
                participation: 1.0,
                damping: 0.6,
            },
        )
        .domain(40.0, 180.0)
        .display_range(80.0, 160.0)
        .annotation(Annotation::horizontal(100.0, "Capital floor", Tone::Floor))
        .reference_curve(ReferenceCurve::direct_investment())
        .info(
            info(Family::PathDependent, 2)
                .protected()
                .summary("Protected participation in the averaged basket level"),
        )
        .build()?,
    ])
}

fn income() -> Result<Vec<PayoffFormula>, FormulaError> {
    Ok(vec![
        PayoffFormula::builder(
            "Athena Autocall",
            PayoffShape::Autocall {
                par: 100.0,
                trigger: 100.0,
                coupon_barrier: None,
                protection: 60.0,
                coupon: 8.0,
            },
        )
        .domain(20.0, 160.0)
        .display_range(0.0, 160.0)
        .annotation(Annotation::vertical(100.0, "Autocall trigger", Tone::Trigger))
        .annotation(Annotation::vertical(60.0, "Protection barrier", Tone::Barrier))
        .zone(Zone::new(20.0, 60.0, "Capital loss", Tone::Loss))
        .zone(Zone::new(60.0, 100.0, "Capital returned", Tone::Neutral))
        .zone(Zone::new(100.0, 160.0, "Redeemed with coupons", Tone::Gain))
        .per_year(Vec::new())
        .info(
            info(Family::Income, 4)
                .summary("Redeems early with 8% per year once the trigger is reached"),
        )
        .build()?,
        PayoffFormula::builder(
            "Phoenix Memory Autocall",
            PayoffShape::Autocall {
                par: 100.0,
                trigger: 100.0,
                coupon_barrier: Some(70.0),
                protection: 60.0,
                coupon: 7.0,
            },
        )
        .domain(20.0, 160.0)
        .display_range(0.0, 160.0)
        .annotation(Annotation::vertical(100.0, "Autocall trigger", Tone::Trigger))
        .annotation(Annotation::vertical(70.0, "Coupon barrier", Tone::Coupon))
        .annotation(Annotation::vertical(60.0, "Protection barrier", Tone::Barrier))
        .zone(Zone::new(70.0, 100.0, "Memory coupons paid", Tone::Coupon))
        .per_year(Vec::new())
        .info(
            info(Family::Income, 4)
                .summary("Conditional memory coupons above 70%, protection down to 60%"),
        )
        .build()?,
        PayoffFormula::builder(
            "Express Certificate",
            PayoffShape::Autocall {
                par: 100.0,
                trigger: 100.0,
                coupon_barrier: None,
                protection: 70.0,
                coupon: 6.0,
            },
        )
        .domain(20.0, 160.0)
        .display_range(0.0, 140.0)
        .annotation(Annotation::vertical(100.0, "Autocall trigger", Tone::Trigger))
        .annotation(Annotation::vertical(70.0, "Protection barrier", Tone::Barrier))
        .per_year(vec![1, 2, 3])
        .info(
            info(Family::Income, 4)
                .summary("Three-year autocall paying 6% per elapsed year"),
        )
        .build()?,
        PayoffFormula::builder(
            "Reverse Convertible",
            PayoffShape::ReverseConvertible {
                par: 100.0,
                strike: 100.0,
                barrier: 100.0,
                coupon: 10.0,
            },
        )
        .domain(20.0, 160.0)
        .display_range(20.0, 130.0)
        .annotation(Annotation::vertical(100.0, "Conversion strike", Tone::Strike))
        .annotation(Annotation::horizontal(110.0, "Par + coupon", Tone::Coupon))
        .info(
            info(Family::Income, 5)
                .summary("High fixed coupon, capital converted into shares below the strike"),
        )
        .build()?,
        PayoffFormula::builder(
            "Barrier Reverse Convertible",
            PayoffShape::ReverseConvertible {
                par: 100.0,
                strike: 100.0,
                barrier: 70.0,
                coupon: 8.0,
            },
        )
        .domain(20.0, 160.0)
        .display_range(20.0, 130.0)
        .annotation(Annotation::vertical(70.0, "Barrier", Tone::Barrier))
        .annotation(Annotation::horizontal(108.0, "Par + coupon", Tone::Coupon))
        .zone(Zone::new(20.0, 70.0, "Converted", Tone::Loss))
        .info(
            info(Family::Barrier, 4)
                .summary("Fixed coupon, capital intact while the level stays above 70%"),
        )
        .build()?,
    ])
}

fn participation() -> Result<Vec<PayoffFormula>, FormulaError> {
    Ok(vec![
        PayoffFormula::builder(
            "Bonus Certificate",
            PayoffShape::Bonus {
                strike: 100.0,
                barrier: 70.0,
                bonus: 120.0,
                cap: None,
                airbag: false,
            },
        )
        .domain(20.0, 180.0)
        .display_range(20.0, 180.0)
        .annotation(Annotation::vertical(70.0, "Barrier", Tone::Barrier))
        .annotation(Annotation::horizontal(120.0, "Bonus level", Tone::Coupon))
        .reference_curve(ReferenceCurve::direct_investment())
        .info(
            info(Family::Participation, 4)
                .summary("At least 120% while the 70% barrier holds, full upside above"),
        )
        .build()?,
        PayoffFormula::builder(
            "Capped Bonus Certificate",
            PayoffShape::Bonus {
                strike: 100.0,
                barrier: 70.0,
                bonus: 120.0,
                cap: Some(135.0),
                airbag: false,
            },
        )
        .domain(20.0, 180.0)
        .display_range(20.0, 150.0)
        .annotation(Annotation::vertical(70.0, "Barrier", Tone::Barrier))
        .annotation(Annotation::horizontal(120.0, "Bonus level", Tone::Coupon))
        .annotation(Annotation::horizontal(135.0, "Cap", Tone::Cap))
        .info(
            info(Family::Participation, 4)
                .summary("Bonus certificate with the upside capped at 135%"),
        )
        .build()?,
        PayoffFormula::builder(
            "Airbag Certificate",
            PayoffShape::Bonus {
                strike: 100.0,
                barrier: 70.0,
                bonus: 115.0,
                cap: None,
                airbag: true,
            },
        )
        .domain(20.0, 180.0)
        .display_range(20.0, 180.0)
        .annotation(Annotation::vertical(70.0, "Airbag level", Tone::Barrier))
        .annotation(Annotation::horizontal(115.0, "Bonus level", Tone::Coupon))
        .zone(Zone::new(20.0, 70.0, "Cushioned losses", Tone::Loss))
        .reference_curve(ReferenceCurve::direct_investment())
        .info(
            info(Family::Participation, 3)
                .summary("Bonus payoff with losses cushioned below the airbag level"),
        )
        .build()?,
        PayoffFormula::builder(
            "Twin Win Certificate",
            PayoffShape::TwinWin {
                strike: 100.0,
                participation: 1.0,
                barrier: 70.0,
            },
        )
        .domain(20.0, 180.0)
        .display_range(20.0, 180.0)
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .annotation(Annotation::vertical(70.0, "Barrier", Tone::Barrier))
        .zone(Zone::new(70.0, 100.0, "Losses turned into gains", Tone::Gain))
        .info(
            info(Family::Participation, 4)
                .summary("Gains in both directions while the barrier holds"),
        )
        .build()?,
        PayoffFormula::builder(
            "Discount Certificate",
            PayoffShape::Discount {
                cap: 110.0,
                barrier: None,
            },
        )
        .domain(20.0, 160.0)
        .display_range(20.0, 130.0)
        .annotation(Annotation::horizontal(110.0, "Cap", Tone::Cap))
        .reference_curve(ReferenceCurve::direct_investment())
        .info(
            info(Family::Participation, 4)
                .summary("Underlying bought at a discount, upside capped at 110%"),
        )
        .build()?,
        PayoffFormula::builder(
            "Barrier Discount Certificate",
            PayoffShape::Discount {
                cap: 110.0,
                barrier: Some(70.0),
            },
        )
        .domain(20.0, 160.0)
        .display_range(20.0, 130.0)
        .annotation(Annotation::horizontal(110.0, "Cap", Tone::Cap))
        .annotation(Annotation::vertical(70.0, "Barrier", Tone::Barrier))
        .info(
            info(Family::Barrier, 3)
                .summary("Pays the cap whenever the level ends above the 70% barrier"),
        )
        .build()?,
        PayoffFormula::builder(
            "Trigger Barrier Discount Certificate",
            PayoffShape::TriggerDiscount {
                cap: 105.0,
                barrier: 70.0,
                trigger: 100.0,
                trigger_payout: 115.0,
            },
        )
        .domain(20.0, 160.0)
        .display_range(20.0, 130.0)
        .annotation(Annotation::vertical(70.0, "Barrier", Tone::Barrier))
        .annotation(Annotation::vertical(100.0, "Trigger", Tone::Trigger))
        .annotation(Annotation::horizontal(115.0, "Trigger payout", Tone::Coupon))
        .info(
            info(Family::Barrier, 3)
                .summary("Barrier discount with a higher payout above the trigger"),
        )
        .build()?,
        PayoffFormula::builder(
            "Outperformance Certificate",
            PayoffShape::Outperformance {
                strike: 100.0,
                participation: 1.5,
                cap: None,
            },
        )
        .domain(20.0, 160.0)
        .display_range(20.0, 200.0)
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .reference_curve(ReferenceCurve::direct_investment())
        .info(
            info(Family::Participation, 5)
                .summary("150% of the upside, one-for-one on the downside"),
        )
        .build()?,
        PayoffFormula::builder(
            "Sprint Certificate",
            PayoffShape::Outperformance {
                strike: 100.0,
                participation: 2.0,
                cap: Some(120.0),
            },
        )
        .domain(20.0, 160.0)
        .display_range(20.0, 150.0)
        .annotation(Annotation::vertical(100.0, "Strike", Tone::Strike))
        .annotation(Annotation::vertical(120.0, "Cap level", Tone::Cap))
        .info(
            info(Family::Participation, 5)
                .summary("Double participation between 100% and 120%"),
        )
        .build()?,
    ])
}

fn leverage() -> Result<Vec<PayoffFormula>, FormulaError> {
    Ok(vec![
        PayoffFormula::builder(
            "Turbo Long",
            PayoffShape::Turbo {
                strike: 80.0,
                ratio: 1.0,
                knock_out: 85.0,
                direction: Direction::Long,
            },
        )
        .domain(50.0, 150.0)
        .display_range(0.0, 80.0)
        .annotation(Annotation::vertical(85.0, "Knock-out", Tone::Barrier))
        .annotation(Annotation::vertical(80.0, "Financing level", Tone::Strike))
        .info(info(Family::Leverage, 7).summary("Leveraged long position, worthless below 85%"))
        .build()?,
        PayoffFormula::builder(
            "Turbo Short",
            PayoffShape::Turbo {
                strike: 120.0,
                ratio: 1.0,
                knock_out: 115.0,
                direction: Direction::Short,
            },
        )
        .domain(50.0, 150.0)
        .display_range(0.0, 80.0)
        .annotation(Annotation::vertical(115.0, "Knock-out", Tone::Barrier))
        .annotation(Annotation::vertical(120.0, "Financing level", Tone::Strike))
        .info(info(Family::Leverage, 7).summary("Leveraged short position, worthless above 115%"))
        .build()?,
        PayoffFormula::builder(
            "Mini Future Long",
            PayoffShape::Turbo {
                strike: 75.0,
                ratio: 1.0,
                knock_out: 80.0,
                direction: Direction::Long,
            },
        )
        .domain(50.0, 150.0)
        .display_range(0.0, 80.0)
        .annotation(Annotation::vertical(80.0, "Stop-loss", Tone::Barrier))
        .annotation(Annotation::vertical(75.0, "Financing level", Tone::Strike))
        .info(info(Family::Leverage, 6).summary("Open-ended leverage with a stop-loss at 80%"))
        .build()?,
    ])
}

fn fx_structured() -> Result<Vec<PayoffFormula>, FormulaError> {
    Ok(vec![
        PayoffFormula::builder(
            "Dual Currency Note",
            PayoffShape::ReverseConvertible {
                par: 100.0,
                strike: 100.0,
                barrier: 100.0,
                coupon: 6.0,
            },
        )
        .domain(70.0, 130.0)
        .display_range(60.0, 120.0)
        .annotation(Annotation::vertical(100.0, "Conversion rate", Tone::Strike))
        .info(
            info(Family::FxStructured, 4)
                .summary("Enhanced deposit repaid in the alternate currency below the strike"),
        )
        .build()?,
        PayoffFormula::builder(
            "FX Range Accrual Note",
            PayoffShape::RangeAccrual {
                par: 100.0,
                lower: 95.0,
                upper: 105.0,
                coupon: 5.0,
            },
        )
        .domain(80.0, 120.0)
        .display_range(95.0, 110.0)
        .annotation(Annotation::vertical(95.0, "Range low", Tone::Barrier))
        .annotation(Annotation::vertical(105.0, "Range high", Tone::Barrier))
        .zone(Zone::new(95.0, 105.0, "Accrual range", Tone::Coupon))
        .info(
            info(Family::FxStructured, 2)
                .protected()
                .summary("Coupon earned while the rate stays inside the range"),
        )
        .build()?,
        PayoffFormula::builder(
            "Target Redemption Forward",
            PayoffShape::LeveragedForward {
                strike: 100.0,
                leverage: 2.0,
            },
        )
        .domain(70.0, 130.0)
        .display_range(-60.0, 30.0)
        .annotation(Annotation::vertical(100.0, "Forward strike", Tone::Strike))
        .annotation(Annotation::horizontal(0.0, "Breakeven", Tone::Neutral))
        .zone(Zone::new(70.0, 100.0, "Double exposure", Tone::Loss))
        .info(
            info(Family::FxStructured, 6)
                .summary("Forward gains until the target, losses doubled below the strike"),
        )
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
        let table = formulas().unwrap();
        assert_eq!(table.len(), 27);
    }

    #[test]
    fn test_capital_protected_known_values() {
        let note = find("Capital Protected Note");
        assert_relative_eq!(note.evaluate(120.0, 100.0, None), 116.0, epsilon = 1e-12);
        assert_eq!(note.evaluate(90.0, 100.0, None), 100.0);
        assert_eq!(note.reference_curves().len(), 1);
    }

    #[test]
    fn test_athena_known_values() {
        let note = find("Athena Autocall");
        assert_eq!(note.evaluate(105.0, 100.0, Some(3.0)), 124.0);
        assert_eq!(note.evaluate(70.0, 100.0, Some(3.0)), 100.0);
        assert_eq!(note.evaluate(40.0, 100.0, Some(3.0)), 40.0);
        assert!(note.variant().is_per_year());
    }

    #[test]
    fn test_airbag_cushions_below_barrier() {
        let airbag = find("Airbag Certificate");
        let bonus = find("Bonus Certificate");
        assert!(airbag.evaluate(50.0, 100.0, None) > bonus.evaluate(50.0, 100.0, None));
    }

    #[test]
    fn test_protected_flags_match_floors() {
        for formula in formulas().unwrap() {
            if formula.info().capital_protected {
                let low = formula.domain().min();
                assert!(
                    formula.evaluate(low, 100.0, None) >= 100.0,
                    "{} is flagged protected",
                    formula.name()
                );
            }
        }
    }
}
