//! Terminal payoff shapes.
//!
//! Each [`PayoffShape`] variant is a value object that owns its parameter set
//! and is evaluated by static dispatch. Levels are in percent of the initial
//! level (see [`crate::normalise_level`]).
//!
//! # Shape families
//!
//! - Capital protection: [`PayoffShape::LinearWithFloor`], [`PayoffShape::AveragedProtection`],
//!   [`PayoffShape::KnockOutParticipation`]
//! - Income: [`PayoffShape::Autocall`], [`PayoffShape::ReverseConvertible`],
//!   [`PayoffShape::RangeAccrual`]
//! - Participation: [`PayoffShape::TwinWin`], [`PayoffShape::Bonus`],
//!   [`PayoffShape::Discount`], [`PayoffShape::TriggerDiscount`],
//!   [`PayoffShape::Outperformance`]
//! - Leverage: [`PayoffShape::Turbo`], [`PayoffShape::LeveragedForward`]
//! - Options: [`PayoffShape::Strategy`], [`PayoffShape::Digital`],
//!   [`PayoffShape::Barrier`], [`PayoffShape::Asian`], [`PayoffShape::Lookback`],
//!   [`PayoffShape::Calendar`]
//! - Other: [`PayoffShape::Locked`], [`PayoffShape::Underlying`]
//!
//! Path-dependent products (barriers, Asian, lookback, twin win) are
//! approximated from the terminal level alone.

mod option;

pub use option::{BarrierDirection, Direction, Knock, Leg, LegKind, OptionKind, Settlement};

use crate::types::FormulaError;
use crate::BASE_LEVEL;

/// Elapsed years used when the caller supplies none.
pub const DEFAULT_ELAPSED_YEARS: f64 = 1.0;

/// Named numeric constant of a shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    /// Parameter name (e.g. `strike`, `leg2.weight`)
    pub name: String,
    /// Current value
    pub value: f64,
}

/// Payoff shape with its own parameters.
///
/// # Examples
/// ```
/// use payoff_core::shape::{Leg, PayoffShape};
///
/// let bull_call = PayoffShape::Strategy {
///     legs: vec![Leg::long_call(100.0), Leg::short_call(120.0)],
///     premium: 6.0,
/// };
/// assert_eq!(bull_call.evaluate(90.0, None), -6.0);
/// assert_eq!(bull_call.evaluate(110.0, None), 4.0);
/// assert_eq!(bull_call.evaluate(130.0, None), 14.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "shape", rename_all = "snake_case"))]
pub enum PayoffShape {
    /// `floor` at or below strike, then `floor + participation * (S - strike)`,
    /// optionally capped.
    LinearWithFloor {
        /// Level where participation starts
        strike: f64,
        /// Guaranteed redemption
        floor: f64,
        /// Upside participation rate
        participation: f64,
        /// Maximum redemption
        cap: Option<f64>,
    },

    /// Protected note on a damped (averaged) level.
    AveragedProtection {
        /// Level where participation starts
        strike: f64,
        /// Guaranteed redemption
        floor: f64,
        /// Upside participation rate
        participation: f64,
        /// Fraction of the terminal move retained by averaging
        damping: f64,
    },

    /// Protected participation that pays a fixed rebate once the upper barrier is hit.
    KnockOutParticipation {
        /// Level where participation starts
        strike: f64,
        /// Guaranteed redemption
        floor: f64,
        /// Upside participation rate
        participation: f64,
        /// Knock-out level
        barrier: f64,
        /// Redemption once knocked out
        rebate: f64,
    },

    /// Upside participation, absolute return down to the barrier, raw level below it.
    TwinWin {
        /// Initial strike
        strike: f64,
        /// Upside participation rate
        participation: f64,
        /// Knock-in level (judged on the terminal level)
        barrier: f64,
    },

    /// Autocall / phoenix note with memory coupons.
    ///
    /// - `S >= trigger`: `par + years * coupon`
    /// - `coupon_barrier <= S < trigger`: `par + years * coupon` (phoenix only)
    /// - `protection <= S`: `par`
    /// - below protection: `S`
    Autocall {
        /// Redemption amount
        par: f64,
        /// Autocall trigger
        trigger: f64,
        /// Conditional coupon barrier (phoenix variant)
        coupon_barrier: Option<f64>,
        /// Capital protection barrier
        protection: f64,
        /// Coupon per elapsed year
        coupon: f64,
    },

    /// Fixed coupon with capital converted into the underlying below the barrier.
    ReverseConvertible {
        /// Redemption amount
        par: f64,
        /// Conversion strike
        strike: f64,
        /// Protection barrier (equal to strike for the plain variant)
        barrier: f64,
        /// Coupon paid in every scenario
        coupon: f64,
    },

    /// Coupon when the level ends inside `[lower, upper]`, par otherwise.
    RangeAccrual {
        /// Redemption amount
        par: f64,
        /// Lower range bound
        lower: f64,
        /// Upper range bound
        upper: f64,
        /// Coupon earned inside the range
        coupon: f64,
    },

    /// Bonus certificate, optionally capped, with an optional airbag cushion below the barrier.
    Bonus {
        /// Initial strike
        strike: f64,
        /// Knock-in barrier
        barrier: f64,
        /// Minimum redemption while the barrier holds
        bonus: f64,
        /// Maximum redemption
        cap: Option<f64>,
        /// Below the barrier pay `S * strike / barrier` instead of `S`
        airbag: bool,
    },

    /// `min(S, cap)`; with a barrier, pays `cap` whenever `S >= barrier`.
    Discount {
        /// Maximum redemption
        cap: f64,
        /// Optional protection barrier
        barrier: Option<f64>,
    },

    /// Barrier discount with an extra payout step at the trigger.
    TriggerDiscount {
        /// Redemption between barrier and trigger
        cap: f64,
        /// Protection barrier
        barrier: f64,
        /// Trigger level
        trigger: f64,
        /// Redemption at or above the trigger
        trigger_payout: f64,
    },

    /// Raw level below strike, leveraged (optionally capped) upside above it.
    Outperformance {
        /// Initial strike
        strike: f64,
        /// Upside participation rate
        participation: f64,
        /// Level beyond which the upside stops
        cap: Option<f64>,
    },

    /// Turbo / mini-future certificate, worthless once knocked out.
    Turbo {
        /// Financing level
        strike: f64,
        /// Certificates per unit of underlying
        ratio: f64,
        /// Stop-loss level
        knock_out: f64,
        /// Long or short
        direction: Direction,
    },

    /// Forward above strike, geared losses below it (TARF-style).
    LeveragedForward {
        /// Forward strike
        strike: f64,
        /// Multiplier applied to losses below strike
        leverage: f64,
    },

    /// Sum of signed option legs minus net premium.
    Strategy {
        /// Strategy legs
        legs: Vec<Leg>,
        /// Net premium paid (negative for a credit)
        premium: f64,
    },

    /// Cash-or-nothing / asset-or-nothing digital, minus premium.
    Digital {
        /// Call or put
        option: OptionKind,
        /// Digital strike
        strike: f64,
        /// Settlement style
        settlement: Settlement,
        /// Premium paid
        premium: f64,
    },

    /// Single-barrier option judged on the terminal level.
    Barrier {
        /// Call or put
        option: OptionKind,
        /// Option strike
        strike: f64,
        /// Barrier level
        barrier: f64,
        /// Up or down
        direction: BarrierDirection,
        /// In or out
        knock: Knock,
        /// Paid while the option is not alive
        rebate: f64,
        /// Premium paid
        premium: f64,
    },

    /// Option on a damped level standing in for the path average.
    Asian {
        /// Call or put
        option: OptionKind,
        /// Option strike
        strike: f64,
        /// Fraction of the terminal move retained by averaging
        damping: f64,
        /// Premium paid
        premium: f64,
    },

    /// Fixed-strike lookback with best level `max(S, initial)` (calls) or
    /// `min(S, initial)` (puts).
    Lookback {
        /// Call or put
        option: OptionKind,
        /// Option strike
        strike: f64,
        /// Premium paid
        premium: f64,
    },

    /// Calendar spread at front expiry: tent centred on the strike.
    Calendar {
        /// Common strike
        strike: f64,
        /// Half-width of the profitable zone
        width: f64,
        /// Value of the back-month option at the strike
        peak: f64,
        /// Net debit
        premium: f64,
    },

    /// Locked-in value independent of the level (box spread, conversion).
    Locked {
        /// Payoff
        value: f64,
    },

    /// The underlying level itself.
    Underlying,
}

impl PayoffShape {
    /// Evaluate the shape at normalised level `s`.
    ///
    /// `elapsed_years` only affects [`PayoffShape::Autocall`]; `None` and
    /// non-finite values use [`DEFAULT_ELAPSED_YEARS`], negative values count as zero.
    pub fn evaluate(&self, s: f64, elapsed_years: Option<f64>) -> f64 {
        match self {
            PayoffShape::LinearWithFloor {
                strike,
                floor,
                participation,
                cap,
            } => {
                let y = if s <= *strike {
                    *floor
                } else {
                    floor + participation * (s - strike)
                };
                apply_cap(y, *cap)
            }
            PayoffShape::AveragedProtection {
                strike,
                floor,
                participation,
                damping,
            } => {
                let averaged = strike + damping * (s - strike);
                floor + participation * (averaged - strike).max(0.0)
            }
            PayoffShape::KnockOutParticipation {
                strike,
                floor,
                participation,
                barrier,
                rebate,
            } => {
                if s >= *barrier {
                    *rebate
                } else {
                    floor + participation * (s - strike).max(0.0)
                }
            }
            PayoffShape::TwinWin {
                strike,
                participation,
                barrier,
            } => {
                if s >= *strike {
                    strike + participation * (s - strike)
                } else if s >= *barrier {
                    strike + (strike - s)
                } else {
                    s
                }
            }
            PayoffShape::Autocall {
                par,
                trigger,
                coupon_barrier,
                protection,
                coupon,
            } => {
                let years = elapsed_years
                    .filter(|y| y.is_finite())
                    .unwrap_or(DEFAULT_ELAPSED_YEARS)
                    .max(0.0);
                let pays_coupon = s >= *trigger || coupon_barrier.is_some_and(|cb| s >= cb);
                if pays_coupon {
                    par + years * coupon
                } else if s >= *protection {
                    *par
                } else {
                    s
                }
            }
            PayoffShape::ReverseConvertible {
                par,
                strike,
                barrier,
                coupon,
            } => {
                if s >= *barrier {
                    par + coupon
                } else {
                    s * par / strike + coupon
                }
            }
            PayoffShape::RangeAccrual {
                par,
                lower,
                upper,
                coupon,
            } => {
                if s >= *lower && s <= *upper {
                    par + coupon
                } else {
                    *par
                }
            }
            PayoffShape::Bonus {
                strike,
                barrier,
                bonus,
                cap,
                airbag,
            } => {
                let y = if s >= *barrier {
                    s.max(*bonus)
                } else if *airbag {
                    s * strike / barrier
                } else {
                    s
                };
                apply_cap(y, *cap)
            }
            PayoffShape::Discount { cap, barrier } => match barrier {
                Some(b) if s >= *b => *cap,
                _ => s.min(*cap),
            },
            PayoffShape::TriggerDiscount {
                cap,
                barrier,
                trigger,
                trigger_payout,
            } => {
                if s >= *trigger {
                    *trigger_payout
                } else if s >= *barrier {
                    *cap
                } else {
                    s.min(*cap)
                }
            }
            PayoffShape::Outperformance {
                strike,
                participation,
                cap,
            } => {
                if s <= *strike {
                    s
                } else {
                    let capped = cap.map_or(s, |c| s.min(c));
                    strike + participation * (capped - strike)
                }
            }
            PayoffShape::Turbo {
                strike,
                ratio,
                knock_out,
                direction,
            } => match direction {
                Direction::Long if s > *knock_out => ratio * (s - strike).max(0.0),
                Direction::Short if s < *knock_out => ratio * (strike - s).max(0.0),
                _ => 0.0,
            },
            PayoffShape::LeveragedForward { strike, leverage } => {
                if s >= *strike {
                    s - strike
                } else {
                    leverage * (s - strike)
                }
            }
            PayoffShape::Strategy { legs, premium } => {
                legs.iter().map(|leg| leg.value(s)).sum::<f64>() - premium
            }
            PayoffShape::Digital {
                option,
                strike,
                settlement,
                premium,
            } => {
                let paid = if option.is_in_the_money(s, *strike) {
                    match settlement {
                        Settlement::Cash { payout } => *payout,
                        Settlement::Asset => s,
                    }
                } else {
                    0.0
                };
                paid - premium
            }
            PayoffShape::Barrier {
                option,
                strike,
                barrier,
                direction,
                knock,
                rebate,
                premium,
            } => {
                let breached = direction.is_breached(s, *barrier);
                let alive = match knock {
                    Knock::Out => !breached,
                    Knock::In => breached,
                };
                let gross = if alive {
                    option.intrinsic(s, *strike)
                } else {
                    *rebate
                };
                gross - premium
            }
            PayoffShape::Asian {
                option,
                strike,
                damping,
                premium,
            } => {
                let averaged = BASE_LEVEL + damping * (s - BASE_LEVEL);
                option.intrinsic(averaged, *strike) - premium
            }
            PayoffShape::Lookback {
                option,
                strike,
                premium,
            } => {
                let best = match option {
                    OptionKind::Call => s.max(BASE_LEVEL),
                    OptionKind::Put => s.min(BASE_LEVEL),
                };
                option.intrinsic(best, *strike) - premium
            }
            PayoffShape::Calendar {
                strike,
                width,
                peak,
                premium,
            } => {
                let distance = (s - strike).abs() / width;
                peak * (1.0 - distance).max(0.0) - premium
            }
            PayoffShape::Locked { value } => *value,
            PayoffShape::Underlying => s,
        }
    }

    /// Short snake_case tag of the shape family.
    pub fn tag(&self) -> &'static str {
        match self {
            PayoffShape::LinearWithFloor { .. } => "linear_with_floor",
            PayoffShape::AveragedProtection { .. } => "averaged_protection",
            PayoffShape::KnockOutParticipation { .. } => "knock_out_participation",
            PayoffShape::TwinWin { .. } => "twin_win",
            PayoffShape::Autocall { .. } => "autocall",
            PayoffShape::ReverseConvertible { .. } => "reverse_convertible",
            PayoffShape::RangeAccrual { .. } => "range_accrual",
            PayoffShape::Bonus { .. } => "bonus",
            PayoffShape::Discount { .. } => "discount",
            PayoffShape::TriggerDiscount { .. } => "trigger_discount",
            PayoffShape::Outperformance { .. } => "outperformance",
            PayoffShape::Turbo { .. } => "turbo",
            PayoffShape::LeveragedForward { .. } => "leveraged_forward",
            PayoffShape::Strategy { .. } => "strategy",
            PayoffShape::Digital { .. } => "digital",
            PayoffShape::Barrier { .. } => "barrier",
            PayoffShape::Asian { .. } => "asian",
            PayoffShape::Lookback { .. } => "lookback",
            PayoffShape::Calendar { .. } => "calendar",
            PayoffShape::Locked { .. } => "locked",
            PayoffShape::Underlying => "underlying",
        }
    }

    /// Whether the output depends on the elapsed-years argument.
    #[inline]
    pub fn depends_on_elapsed_years(&self) -> bool {
        matches!(self, PayoffShape::Autocall { .. })
    }

    /// Named numeric constants of the shape, in declaration order.
    ///
    /// # Examples
    /// ```
    /// use payoff_core::shape::PayoffShape;
    ///
    /// let shape = PayoffShape::Discount { cap: 110.0, barrier: None };
    /// let params = shape.parameters();
    /// assert_eq!(params.len(), 1);
    /// assert_eq!(params[0].name, "cap");
    /// ```
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut scratch = self.clone();
        let params = scratch
            .slots_mut()
            .into_iter()
            .map(|(name, value)| Parameter {
                name,
                value: *value,
            })
            .collect();
        params
    }

    /// Value of one named parameter.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }

    /// Override one named parameter.
    ///
    /// # Errors
    /// - `FormulaError::NonFiniteParameter` if `value` is NaN or infinite
    /// - `FormulaError::UnknownParameter` if the shape has no such parameter
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), FormulaError> {
        if !value.is_finite() {
            return Err(FormulaError::NonFiniteParameter {
                name: name.to_string(),
                value,
            });
        }
        match self.slots_mut().into_iter().find(|(slot, _)| slot == name) {
            Some((_, target)) => {
                *target = value;
                Ok(())
            }
            None => Err(FormulaError::UnknownParameter {
                name: name.to_string(),
            }),
        }
    }

    fn slots_mut(&mut self) -> Vec<(String, &mut f64)> {
        let mut slots: Vec<(String, &mut f64)> = Vec::new();
        match self {
            PayoffShape::LinearWithFloor {
                strike,
                floor,
                participation,
                cap,
            } => {
                slots.push(slot("strike", strike));
                slots.push(slot("floor", floor));
                slots.push(slot("participation", participation));
                if let Some(cap) = cap.as_mut() {
                    slots.push(slot("cap", cap));
                }
            }
            PayoffShape::AveragedProtection {
                strike,
                floor,
                participation,
                damping,
            } => {
                slots.push(slot("strike", strike));
                slots.push(slot("floor", floor));
                slots.push(slot("participation", participation));
                slots.push(slot("damping", damping));
            }
            PayoffShape::KnockOutParticipation {
                strike,
                floor,
                participation,
                barrier,
                rebate,
            } => {
                slots.push(slot("strike", strike));
                slots.push(slot("floor", floor));
                slots.push(slot("participation", participation));
                slots.push(slot("barrier", barrier));
                slots.push(slot("rebate", rebate));
            }
            PayoffShape::TwinWin {
                strike,
                participation,
                barrier,
            } => {
                slots.push(slot("strike", strike));
                slots.push(slot("participation", participation));
                slots.push(slot("barrier", barrier));
            }
            PayoffShape::Autocall {
                par,
                trigger,
                coupon_barrier,
                protection,
                coupon,
            } => {
                slots.push(slot("par", par));
                slots.push(slot("trigger", trigger));
                if let Some(cb) = coupon_barrier.as_mut() {
                    slots.push(slot("coupon_barrier", cb));
                }
                slots.push(slot("protection", protection));
                slots.push(slot("coupon", coupon));
            }
            PayoffShape::ReverseConvertible {
                par,
                strike,
                barrier,
                coupon,
            } => {
                slots.push(slot("par", par));
                slots.push(slot("strike", strike));
                slots.push(slot("barrier", barrier));
                slots.push(slot("coupon", coupon));
            }
            PayoffShape::RangeAccrual {
                par,
                lower,
                upper,
                coupon,
            } => {
                slots.push(slot("par", par));
                slots.push(slot("lower", lower));
                slots.push(slot("upper", upper));
                slots.push(slot("coupon", coupon));
            }
            PayoffShape::Bonus {
                strike,
                barrier,
                bonus,
                cap,
                airbag: _,
            } => {
                slots.push(slot("strike", strike));
                slots.push(slot("barrier", barrier));
                slots.push(slot("bonus", bonus));
                if let Some(cap) = cap.as_mut() {
                    slots.push(slot("cap", cap));
                }
            }
            PayoffShape::Discount { cap, barrier } => {
                slots.push(slot("cap", cap));
                if let Some(b) = barrier.as_mut() {
                    slots.push(slot("barrier", b));
                }
            }
            PayoffShape::TriggerDiscount {
                cap,
                barrier,
                trigger,
                trigger_payout,
            } => {
                slots.push(slot("cap", cap));
                slots.push(slot("barrier", barrier));
                slots.push(slot("trigger", trigger));
                slots.push(slot("trigger_payout", trigger_payout));
            }
            PayoffShape::Outperformance {
                strike,
                participation,
                cap,
            } => {
                slots.push(slot("strike", strike));
                slots.push(slot("participation", participation));
                if let Some(cap) = cap.as_mut() {
                    slots.push(slot("cap", cap));
                }
            }
            PayoffShape::Turbo {
                strike,
                ratio,
                knock_out,
                direction: _,
            } => {
                slots.push(slot("strike", strike));
                slots.push(slot("ratio", ratio));
                slots.push(slot("knock_out", knock_out));
            }
            PayoffShape::LeveragedForward { strike, leverage } => {
                slots.push(slot("strike", strike));
                slots.push(slot("leverage", leverage));
            }
            PayoffShape::Strategy { legs, premium } => {
                for (i, leg) in legs.iter_mut().enumerate() {
                    slots.push(slot(&format!("leg{}.strike", i + 1), &mut leg.strike));
                    slots.push(slot(&format!("leg{}.weight", i + 1), &mut leg.weight));
                }
                slots.push(slot("premium", premium));
            }
            PayoffShape::Digital {
                option: _,
                strike,
                settlement,
                premium,
            } => {
                slots.push(slot("strike", strike));
                if let Settlement::Cash { payout } = settlement {
                    slots.push(slot("payout", payout));
                }
                slots.push(slot("premium", premium));
            }
            PayoffShape::Barrier {
                option: _,
                strike,
                barrier,
                direction: _,
                knock: _,
                rebate,
                premium,
            } => {
                slots.push(slot("strike", strike));
                slots.push(slot("barrier", barrier));
                slots.push(slot("rebate", rebate));
                slots.push(slot("premium", premium));
            }
            PayoffShape::Asian {
                option: _,
                strike,
                damping,
                premium,
            } => {
                slots.push(slot("strike", strike));
                slots.push(slot("damping", damping));
                slots.push(slot("premium", premium));
            }
            PayoffShape::Lookback {
                option: _,
                strike,
                premium,
            } => {
                slots.push(slot("strike", strike));
                slots.push(slot("premium", premium));
            }
            PayoffShape::Calendar {
                strike,
                width,
                peak,
                premium,
            } => {
                slots.push(slot("strike", strike));
                slots.push(slot("width", width));
                slots.push(slot("peak", peak));
                slots.push(slot("premium", premium));
            }
            PayoffShape::Locked { value } => slots.push(slot("value", value)),
            PayoffShape::Underlying => {}
        }
        slots
    }
}

fn slot<'a>(name: &str, value: &'a mut f64) -> (String, &'a mut f64) {
    (name.to_string(), value)
}

#[inline]
fn apply_cap(y: f64, cap: Option<f64>) -> f64 {
    cap.map_or(y, |c| y.min(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn protected_note() -> PayoffShape {
        PayoffShape::LinearWithFloor {
            strike: 100.0,
            floor: 100.0,
            participation: 0.8,
            cap: None,
        }
    }

    fn athena() -> PayoffShape {
        PayoffShape::Autocall {
            par: 100.0,
            trigger: 100.0,
            coupon_barrier: None,
            protection: 60.0,
            coupon: 8.0,
        }
    }

    #[test]
    fn test_linear_with_floor_known_values() {
        let shape = protected_note();
        assert_relative_eq!(shape.evaluate(120.0, None), 116.0, epsilon = 1e-12);
        assert_eq!(shape.evaluate(90.0, None), 100.0);
        assert_eq!(shape.evaluate(100.0, None), 100.0);
    }

    #[test]
    fn test_linear_with_floor_cap() {
        let shape = PayoffShape::LinearWithFloor {
            strike: 100.0,
            floor: 100.0,
            participation: 1.0,
            cap: Some(130.0),
        };
        assert_eq!(shape.evaluate(125.0, None), 125.0);
        assert_eq!(shape.evaluate(170.0, None), 130.0);
    }

    #[test]
    fn test_averaged_protection_damps_upside() {
        let shape = PayoffShape::AveragedProtection {
            strike: 100.0,
            floor: 100.0,
            participation: 1.0,
            damping: 0.5,
        };
        assert_relative_eq!(shape.evaluate(140.0, None), 120.0, epsilon = 1e-12);
        assert_eq!(shape.evaluate(60.0, None), 100.0);
    }

    #[test]
    fn test_shark_fin_rebate_beyond_barrier() {
        let shape = PayoffShape::KnockOutParticipation {
            strike: 100.0,
            floor: 100.0,
            participation: 1.0,
            barrier: 130.0,
            rebate: 105.0,
        };
        assert_eq!(shape.evaluate(80.0, None), 100.0);
        assert_eq!(shape.evaluate(125.0, None), 125.0);
        assert_eq!(shape.evaluate(130.0, None), 105.0);
        assert_eq!(shape.evaluate(160.0, None), 105.0);
    }

    #[test]
    fn test_twin_win_regions() {
        let shape = PayoffShape::TwinWin {
            strike: 100.0,
            participation: 1.0,
            barrier: 70.0,
        };
        assert_eq!(shape.evaluate(120.0, None), 120.0);
        assert_eq!(shape.evaluate(80.0, None), 120.0);
        assert_eq!(shape.evaluate(60.0, None), 60.0);
    }

    #[test]
    fn test_autocall_known_values() {
        let shape = athena();
        assert_eq!(shape.evaluate(105.0, Some(3.0)), 124.0);
        assert_eq!(shape.evaluate(70.0, Some(3.0)), 100.0);
        assert_eq!(shape.evaluate(40.0, Some(3.0)), 40.0);
    }

    #[test]
    fn test_autocall_default_and_bad_years() {
        let shape = athena();
        assert_eq!(shape.evaluate(105.0, None), 108.0);
        assert_eq!(shape.evaluate(105.0, Some(f64::NAN)), 108.0);
        assert_eq!(shape.evaluate(105.0, Some(-2.0)), 100.0);
    }

    #[test]
    fn test_phoenix_coupon_barrier_pays_memory() {
        let shape = PayoffShape::Autocall {
            par: 100.0,
            trigger: 100.0,
            coupon_barrier: Some(70.0),
            protection: 60.0,
            coupon: 7.0,
        };
        assert_eq!(shape.evaluate(80.0, Some(4.0)), 128.0);
        assert_eq!(shape.evaluate(65.0, Some(4.0)), 100.0);
        assert_eq!(shape.evaluate(50.0, Some(4.0)), 50.0);
    }

    #[test]
    fn test_reverse_convertible() {
        let shape = PayoffShape::ReverseConvertible {
            par: 100.0,
            strike: 100.0,
            barrier: 70.0,
            coupon: 9.0,
        };
        assert_eq!(shape.evaluate(75.0, None), 109.0);
        assert_eq!(shape.evaluate(60.0, None), 69.0);
    }

    #[test]
    fn test_bonus_and_airbag() {
        let bonus = PayoffShape::Bonus {
            strike: 100.0,
            barrier: 70.0,
            bonus: 120.0,
            cap: None,
            airbag: false,
        };
        assert_eq!(bonus.evaluate(90.0, None), 120.0);
        assert_eq!(bonus.evaluate(150.0, None), 150.0);
        assert_eq!(bonus.evaluate(63.0, None), 63.0);

        let airbag = PayoffShape::Bonus {
            strike: 100.0,
            barrier: 70.0,
            bonus: 115.0,
            cap: None,
            airbag: true,
        };
        assert_relative_eq!(airbag.evaluate(63.0, None), 90.0, epsilon = 1e-12);
        assert!(airbag.evaluate(63.0, None) > bonus.evaluate(63.0, None));
    }

    #[test]
    fn test_capped_bonus() {
        let shape = PayoffShape::Bonus {
            strike: 100.0,
            barrier: 70.0,
            bonus: 120.0,
            cap: Some(140.0),
            airbag: false,
        };
        assert_eq!(shape.evaluate(170.0, None), 140.0);
        assert_eq!(shape.evaluate(50.0, None), 50.0);
    }

    #[test]
    fn test_discount_variants() {
        let plain = PayoffShape::Discount {
            cap: 110.0,
            barrier: None,
        };
        assert_eq!(plain.evaluate(80.0, None), 80.0);
        assert_eq!(plain.evaluate(150.0, None), 110.0);

        let barrier = PayoffShape::Discount {
            cap: 110.0,
            barrier: Some(70.0),
        };
        assert_eq!(barrier.evaluate(80.0, None), 110.0);
        assert_eq!(barrier.evaluate(60.0, None), 60.0);

        let trigger = PayoffShape::TriggerDiscount {
            cap: 105.0,
            barrier: 70.0,
            trigger: 100.0,
            trigger_payout: 115.0,
        };
        assert_eq!(trigger.evaluate(100.0, None), 115.0);
        assert_eq!(trigger.evaluate(80.0, None), 105.0);
        assert_eq!(trigger.evaluate(50.0, None), 50.0);
    }

    #[test]
    fn test_turbo_knock_out() {
        let long = PayoffShape::Turbo {
            strike: 80.0,
            ratio: 1.0,
            knock_out: 85.0,
            direction: Direction::Long,
        };
        assert_eq!(long.evaluate(120.0, None), 40.0);
        assert_eq!(long.evaluate(85.0, None), 0.0);

        let short = PayoffShape::Turbo {
            strike: 120.0,
            ratio: 1.0,
            knock_out: 115.0,
            direction: Direction::Short,
        };
        assert_eq!(short.evaluate(90.0, None), 30.0);
        assert_eq!(short.evaluate(116.0, None), 0.0);
    }

    #[test]
    fn test_knock_out_call_known_values() {
        let shape = PayoffShape::Barrier {
            option: OptionKind::Call,
            strike: 100.0,
            barrier: 130.0,
            direction: BarrierDirection::Up,
            knock: Knock::Out,
            rebate: 0.0,
            premium: 4.0,
        };
        assert_eq!(shape.evaluate(135.0, None), -4.0);
        assert_eq!(shape.evaluate(110.0, None), 6.0);
        assert_eq!(shape.evaluate(90.0, None), -4.0);
    }

    #[test]
    fn test_knock_in_put_dormant_until_breach() {
        let shape = PayoffShape::Barrier {
            option: OptionKind::Put,
            strike: 100.0,
            barrier: 80.0,
            direction: BarrierDirection::Down,
            knock: Knock::In,
            rebate: 0.0,
            premium: 3.0,
        };
        assert_eq!(shape.evaluate(85.0, None), -3.0);
        assert_eq!(shape.evaluate(70.0, None), 27.0);
    }

    #[test]
    fn test_digitals() {
        let cash = PayoffShape::Digital {
            option: OptionKind::Call,
            strike: 100.0,
            settlement: Settlement::Cash { payout: 10.0 },
            premium: 4.0,
        };
        assert_eq!(cash.evaluate(99.0, None), -4.0);
        assert_eq!(cash.evaluate(101.0, None), 6.0);

        let asset = PayoffShape::Digital {
            option: OptionKind::Call,
            strike: 100.0,
            settlement: Settlement::Asset,
            premium: 50.0,
        };
        assert_eq!(asset.evaluate(120.0, None), 70.0);
    }

    #[test]
    fn test_asian_and_lookback() {
        let asian = PayoffShape::Asian {
            option: OptionKind::Call,
            strike: 100.0,
            damping: 0.5,
            premium: 3.0,
        };
        assert_eq!(asian.evaluate(140.0, None), 17.0);

        let lookback = PayoffShape::Lookback {
            option: OptionKind::Call,
            strike: 95.0,
            premium: 8.0,
        };
        assert_eq!(lookback.evaluate(70.0, None), -3.0);
        assert_eq!(lookback.evaluate(120.0, None), 17.0);
    }

    #[test]
    fn test_calendar_tent() {
        let shape = PayoffShape::Calendar {
            strike: 100.0,
            width: 20.0,
            peak: 8.0,
            premium: 3.0,
        };
        assert_eq!(shape.evaluate(100.0, None), 5.0);
        assert_eq!(shape.evaluate(110.0, None), 1.0);
        assert_eq!(shape.evaluate(140.0, None), -3.0);
    }

    #[test]
    fn test_parameters_in_declaration_order() {
        let names: Vec<String> = athena().parameters().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["par", "trigger", "protection", "coupon"]);
    }

    #[test]
    fn test_strategy_parameters_are_indexed() {
        let shape = PayoffShape::Strategy {
            legs: vec![Leg::long_call(100.0), Leg::short_call(120.0)],
            premium: 6.0,
        };
        assert_eq!(shape.parameter("leg2.strike"), Some(120.0));
        assert_eq!(shape.parameter("leg1.weight"), Some(1.0));
        assert_eq!(shape.parameter("premium"), Some(6.0));
    }

    #[test]
    fn test_set_parameter_changes_evaluation() {
        let mut shape = protected_note();
        shape.set_parameter("participation", 1.0).unwrap();
        assert_eq!(shape.evaluate(120.0, None), 120.0);
    }

    #[test]
    fn test_set_parameter_errors() {
        let mut shape = protected_note();
        assert!(matches!(
            shape.set_parameter("cap", 120.0),
            Err(FormulaError::UnknownParameter { .. })
        ));
        assert!(matches!(
            shape.set_parameter("floor", f64::NAN),
            Err(FormulaError::NonFiniteParameter { .. })
        ));
        assert_eq!(shape, protected_note());
    }

    #[test]
    fn test_tag_and_elapsed_dependency() {
        assert_eq!(athena().tag(), "autocall");
        assert!(athena().depends_on_elapsed_years());
        assert!(!protected_note().depends_on_elapsed_years());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_evaluate_is_deterministic(s in 0.0..250.0_f64, years in 0.0..10.0_f64) {
                let shape = athena();
                prop_assert_eq!(shape.evaluate(s, Some(years)), shape.evaluate(s, Some(years)));
            }

            #[test]
            fn test_protected_note_never_below_floor(s in 0.0..250.0_f64) {
                prop_assert!(protected_note().evaluate(s, None) >= 100.0);
            }

            #[test]
            fn test_bull_spread_bounded(s in 0.0..250.0_f64) {
                let shape = PayoffShape::Strategy {
                    legs: vec![Leg::long_call(100.0), Leg::short_call(120.0)],
                    premium: 6.0,
                };
                let y = shape.evaluate(s, None);
                prop_assert!((-6.0..=14.0).contains(&y));
            }
        }
    }
}
