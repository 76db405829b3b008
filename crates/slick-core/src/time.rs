//! Simulated time and validity ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in simulated time, in seconds from the model epoch.
///
/// The epoch is whatever the caller chose as `t = 0` (usually the model
/// start time). Only differences and ordering matter to the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelTime(pub f64);

impl ModelTime {
    /// The model epoch.
    pub const ZERO: ModelTime = ModelTime(0.0);

    /// Seconds since the epoch.
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// The time `dt` seconds after `self`.
    pub fn advance(self, dt: f64) -> Self {
        Self(self.0 + dt)
    }
}

impl fmt::Display for ModelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}s", self.0)
    }
}

impl From<f64> for ModelTime {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

/// A half-open interval `[start, end)` of simulated time.
///
/// A missing bound is unbounded on that side, so `TimeRange::ALWAYS`
/// contains every finite time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive lower bound, or `None` for unbounded.
    pub start: Option<ModelTime>,
    /// Exclusive upper bound, or `None` for unbounded.
    pub end: Option<ModelTime>,
}

impl TimeRange {
    /// The range containing all times.
    pub const ALWAYS: TimeRange = TimeRange {
        start: None,
        end: None,
    };

    /// A bounded range `[start, end)`.
    pub fn new(start: ModelTime, end: ModelTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether `t` lies inside the range.
    pub fn contains(&self, t: ModelTime) -> bool {
        self.start.is_none_or(|s| t >= s) && self.end.is_none_or(|e| t < e)
    }

    /// Whether `t` lies inside the range, treating the end bound as inclusive.
    ///
    /// Environment records are valid up to and including their last sample.
    pub fn contains_inclusive(&self, t: ModelTime) -> bool {
        self.start.is_none_or(|s| t >= s) && self.end.is_none_or(|e| t <= e)
    }

    /// Whether `other` lies entirely within `self` (inclusive end).
    pub fn covers(&self, other: &TimeRange) -> bool {
        let start_ok = match (self.start, other.start) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(a), Some(b)) => b >= a,
        };
        let end_ok = match (self.end, other.end) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(a), Some(b)) => b <= a,
        };
        start_ok && end_ok
    }

    /// The overlap of two ranges.
    pub fn intersect(&self, other: &TimeRange) -> TimeRange {
        let start = match (self.start, other.start) {
            (Some(a), Some(b)) => Some(if a >= b { a } else { b }),
            (a, b) => a.or(b),
        };
        let end = match (self.end, other.end) {
            (Some(a), Some(b)) => Some(if a <= b { a } else { b }),
            (a, b) => a.or(b),
        };
        TimeRange { start, end }
    }

    /// Whether the range is well formed (`start < end` when both are set,
    /// and every bound is finite).
    pub fn is_valid(&self) -> bool {
        let finite = self.start.is_none_or(|s| s.0.is_finite())
            && self.end.is_none_or(|e| e.0.is_finite());
        match (self.start, self.end) {
            (Some(s), Some(e)) => finite && s < e,
            _ => finite,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Some(s) => write!(f, "[{}s, ", s.0)?,
            None => write!(f, "(-inf, ")?,
        }
        match self.end {
            Some(e) => write!(f, "{}s)", e.0),
            None => write!(f, "+inf)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_contains_everything() {
        assert!(TimeRange::ALWAYS.contains(ModelTime(-1.0e9)));
        assert!(TimeRange::ALWAYS.contains(ModelTime(1.0e9)));
    }

    #[test]
    fn half_open_bounds() {
        let r = TimeRange::new(ModelTime(10.0), ModelTime(20.0));
        assert!(!r.contains(ModelTime(9.9)));
        assert!(r.contains(ModelTime(10.0)));
        assert!(r.contains(ModelTime(19.9)));
        assert!(!r.contains(ModelTime(20.0)));
        assert!(r.contains_inclusive(ModelTime(20.0)));
    }

    #[test]
    fn covers_and_intersect() {
        let outer = TimeRange::new(ModelTime(0.0), ModelTime(100.0));
        let inner = TimeRange::new(ModelTime(10.0), ModelTime(90.0));
        assert!(outer.covers(&inner));
        assert!(!inner.covers(&outer));
        assert!(TimeRange::ALWAYS.covers(&outer));
        assert!(!outer.covers(&TimeRange::ALWAYS));

        let half = TimeRange {
            start: Some(ModelTime(50.0)),
            end: None,
        };
        let both = outer.intersect(&half);
        assert_eq!(both, TimeRange::new(ModelTime(50.0), ModelTime(100.0)));
    }

    #[test]
    fn validity() {
        assert!(TimeRange::ALWAYS.is_valid());
        assert!(TimeRange::new(ModelTime(0.0), ModelTime(1.0)).is_valid());
        assert!(!TimeRange::new(ModelTime(1.0), ModelTime(1.0)).is_valid());
        assert!(!TimeRange::new(ModelTime(2.0), ModelTime(1.0)).is_valid());
        assert!(!TimeRange {
            start: Some(ModelTime(f64::NAN)),
            end: None
        }
        .is_valid());
    }

    #[test]
    fn model_time_advance() {
        assert_eq!(ModelTime(900.0).advance(900.0), ModelTime(1800.0));
        assert_eq!(ModelTime::ZERO.to_string(), "t=0s");
    }

    use proptest::prelude::*;

    fn arb_range() -> impl Strategy<Value = TimeRange> {
        (
            proptest::option::of(-1.0e6f64..1.0e6),
            proptest::option::of(0.0f64..1.0e6),
        )
            .prop_map(|(start, len)| TimeRange {
                start: start.map(ModelTime),
                end: match (start, len) {
                    (Some(s), Some(l)) => Some(ModelTime(s + l + 1.0)),
                    (None, Some(l)) => Some(ModelTime(l)),
                    (_, None) => None,
                },
            })
    }

    proptest! {
        #[test]
        fn intersection_is_covered_by_both(a in arb_range(), b in arb_range()) {
            let both = a.intersect(&b);
            prop_assert!(a.covers(&both));
            prop_assert!(b.covers(&both));
        }

        #[test]
        fn contained_point_is_in_covering_range(r in arb_range(), t in -2.0e6f64..2.0e6) {
            if r.contains(ModelTime(t)) {
                prop_assert!(TimeRange::ALWAYS.covers(&r));
                prop_assert!(r.contains_inclusive(ModelTime(t)));
            }
        }
    }
}
