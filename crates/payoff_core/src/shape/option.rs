//! Option building blocks: call/put intrinsic values, strategy legs,
//! barrier conventions, and digital settlement.

/// Call or put.
///
/// # Examples
/// ```
/// use payoff_core::shape::OptionKind;
///
/// assert_eq!(OptionKind::Call.intrinsic(110.0, 100.0), 10.0);
/// assert_eq!(OptionKind::Put.intrinsic(110.0, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionKind {
    /// max(S - K, 0)
    Call,
    /// max(K - S, 0)
    Put,
}

impl OptionKind {
    /// Intrinsic value at `level` for the given strike.
    #[inline]
    pub fn intrinsic(&self, level: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (level - strike).max(0.0),
            OptionKind::Put => (strike - level).max(0.0),
        }
    }

    /// Whether `level` is strictly in the money (calls at the strike count as in).
    #[inline]
    pub fn is_in_the_money(&self, level: f64, strike: f64) -> bool {
        match self {
            OptionKind::Call => level >= strike,
            OptionKind::Put => level < strike,
        }
    }
}

/// Instrument held in a strategy leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegKind {
    /// Vanilla call
    Call,
    /// Vanilla put
    Put,
    /// The underlying itself, entered at `strike`
    Underlying,
}

/// One signed leg of a multi-leg strategy.
///
/// `weight` is +1 for a long leg, -1 for a short leg, and may be scaled
/// (e.g. -2 for the body of a butterfly).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// Instrument type
    pub kind: LegKind,
    /// Strike (or entry level for `Underlying`)
    pub strike: f64,
    /// Signed quantity
    pub weight: f64,
}

impl Leg {
    /// Creates a leg.
    #[inline]
    pub fn new(kind: LegKind, strike: f64, weight: f64) -> Self {
        Self {
            kind,
            strike,
            weight,
        }
    }

    /// Long one call.
    #[inline]
    pub fn long_call(strike: f64) -> Self {
        Self::new(LegKind::Call, strike, 1.0)
    }

    /// Short one call.
    #[inline]
    pub fn short_call(strike: f64) -> Self {
        Self::new(LegKind::Call, strike, -1.0)
    }

    /// Long one put.
    #[inline]
    pub fn long_put(strike: f64) -> Self {
        Self::new(LegKind::Put, strike, 1.0)
    }

    /// Short one put.
    #[inline]
    pub fn short_put(strike: f64) -> Self {
        Self::new(LegKind::Put, strike, -1.0)
    }

    /// Long the underlying entered at `entry`.
    #[inline]
    pub fn underlying(entry: f64) -> Self {
        Self::new(LegKind::Underlying, entry, 1.0)
    }

    /// Same leg with a different signed quantity.
    #[inline]
    pub fn times(self, weight: f64) -> Self {
        Self { weight, ..self }
    }

    /// Signed value of the leg at `level`.
    #[inline]
    pub fn value(&self, level: f64) -> f64 {
        let unit = match self.kind {
            LegKind::Call => OptionKind::Call.intrinsic(level, self.strike),
            LegKind::Put => OptionKind::Put.intrinsic(level, self.strike),
            LegKind::Underlying => level - self.strike,
        };
        self.weight * unit
    }
}

/// Side of the barrier relative to the initial level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarrierDirection {
    /// Barrier above the initial level, breached when `S >= B`
    Up,
    /// Barrier below the initial level, breached when `S <= B`
    Down,
}

impl BarrierDirection {
    /// Whether the terminal level counts as a barrier breach.
    #[inline]
    pub fn is_breached(&self, level: f64, barrier: f64) -> bool {
        match self {
            BarrierDirection::Up => level >= barrier,
            BarrierDirection::Down => level <= barrier,
        }
    }
}

/// Knock-in or knock-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Knock {
    /// Option comes alive on breach
    In,
    /// Option dies on breach
    Out,
}

/// Digital option settlement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Settlement {
    /// Cash-or-nothing: fixed payout
    Cash {
        /// Amount paid when in the money
        payout: f64,
    },
    /// Asset-or-nothing: pays the terminal level
    Asset,
}

/// Long or short trade direction for leverage products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Profits when the underlying rises
    Long,
    /// Profits when the underlying falls
    Short,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_intrinsic() {
        assert_eq!(OptionKind::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionKind::Put.intrinsic(100.0, 100.0), 0.0);
    }

    #[test]
    fn test_in_the_money_boundaries() {
        assert!(OptionKind::Call.is_in_the_money(100.0, 100.0));
        assert!(!OptionKind::Put.is_in_the_money(100.0, 100.0));
        assert!(OptionKind::Put.is_in_the_money(99.9, 100.0));
    }

    #[test]
    fn test_leg_values() {
        assert_eq!(Leg::short_call(110.0).value(130.0), -20.0);
        assert_eq!(Leg::long_put(90.0).value(70.0), 20.0);
        assert_eq!(Leg::underlying(100.0).value(85.0), -15.0);
        assert_eq!(Leg::short_call(100.0).times(-2.0).value(110.0), -20.0);
    }

    #[test]
    fn test_barrier_breach() {
        assert!(BarrierDirection::Up.is_breached(130.0, 130.0));
        assert!(!BarrierDirection::Up.is_breached(129.9, 130.0));
        assert!(BarrierDirection::Down.is_breached(70.0, 70.0));
        assert!(!BarrierDirection::Down.is_breached(70.1, 70.0));
    }
}
