use std::fmt::{Debug, Display};
use std::num::NonZeroU32;
use std::ops::BitOr;

/// Outcome value for a successful exit. Only `Condition::Always` actions fire for it.
pub const SUCCESS: u32 = 0;

/// Outcome bit conventionally used for "an error occurred".
pub const ERROR: u32 = 1;

/// When a registered `CleanupAction` should fire during unwind.
///
/// The outcome passed to unwind is a plain bitmask chosen by the caller. An `OnBits` action
/// fires if it shares at least one bit with that outcome, so a single action can be tagged
/// for several outcome categories at once.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Fires for every outcome, including `SUCCESS`.
    Always,
    /// Fires when `outcome & mask != 0`.
    OnBits(NonZeroU32),
}

impl Condition {
    /// Shorthand for `Condition::OnBits(ERROR)`.
    pub const ERROR: Condition = Condition::OnBits(unsafe { NonZeroU32::new_unchecked(ERROR) });

    /// Builds a condition from raw bits, treating `0` as `Always`.
    #[inline(always)]
    pub const fn from_bits(bits: u32) -> Condition {
        match NonZeroU32::new(bits) {
            Some(mask) => Condition::OnBits(mask),
            None => Condition::Always,
        }
    }

    /// Raw bit representation, `0` for `Always`.
    #[inline(always)]
    pub const fn bits(&self) -> u32 {
        match *self {
            Condition::Always => 0,
            Condition::OnBits(mask) => mask.get(),
        }
    }

    #[inline(always)]
    pub const fn matches(&self, outcome: u32) -> bool {
        match *self {
            Condition::Always => true,
            Condition::OnBits(mask) => outcome & mask.get() != 0,
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Always
    }
}

impl From<u32> for Condition {
    fn from(bits: u32) -> Self {
        Condition::from_bits(bits)
    }
}

impl BitOr for Condition {
    type Output = Condition;

    /// Combining with `Always` stays `Always`; otherwise the masks are merged.
    fn bitor(self, rhs: Condition) -> Condition {
        match (self, rhs) {
            (Condition::OnBits(a), Condition::OnBits(b)) => Condition::OnBits(a | b),
            _ => Condition::Always,
        }
    }
}

impl Debug for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Always => f.write_str("Always"),
            Condition::OnBits(mask) => write!(f, "OnBits({:#b})", mask.get()),
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Always => Display::fmt("always", f),
            Condition::OnBits(mask) => write!(f, "on {:#x}", mask.get()),
        }
    }
}

#[cfg(test)]
mod condition_tests {
    use super::{Condition, ERROR, SUCCESS};

    #[test]
    fn zero_bits_mean_always() {
        assert_eq!(Condition::Always, Condition::from_bits(0));
        assert_eq!(Condition::Always, Condition::from(0));
        assert_eq!(0, Condition::Always.bits());
        assert_eq!(Condition::Always, Condition::default());
    }

    #[test]
    fn always_matches_every_outcome() {
        for outcome in [SUCCESS, ERROR, 2, 4, 0xffff_ffff].iter() {
            assert!(Condition::Always.matches(*outcome), "outcome {}", outcome);
        }
    }

    #[test]
    fn bits_match_on_intersection() {
        let both = Condition::from_bits(6);
        assert!(both.matches(2));
        assert!(both.matches(4));
        assert!(!both.matches(1));
        assert!(!both.matches(SUCCESS));
        assert!(!Condition::ERROR.matches(2));
        assert!(Condition::ERROR.matches(3));
    }

    #[test]
    fn or_merges_masks() {
        assert_eq!(Condition::from_bits(6), Condition::from_bits(2) | Condition::from_bits(4));
        assert_eq!(Condition::Always, Condition::ERROR | Condition::Always);
    }

    #[test]
    fn bits_round_trip_keeps_meaning() {
        for bits in [0u32, 1, 2, 6, 0x8000_0000, 0xffff_ffff].iter() {
            let condition = Condition::from_bits(*bits);
            assert_eq!(*bits, condition.bits());
            assert_eq!(condition, Condition::from_bits(condition.bits()));
        }
        for condition in [Condition::from_bits(1), Condition::from_bits(0x10)].iter() {
            assert!(condition.matches(0xffff_ffff), "{:?}", condition);
            assert_ne!(0, condition.bits());
        }
    }
}
