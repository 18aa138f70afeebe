//! Controller policy and timing constants.

use crate::{SignalError, SignalResult};

/// How a controller picks and holds its Green phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalPolicy {
    /// Groups take turns for `fixed_green_secs` each.
    FixedCycle,
    /// Demand-driven selection and early yield.
    #[default]
    Adaptive,
}

impl SignalPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalPolicy::FixedCycle => "fixed_cycle",
            SignalPolicy::Adaptive   => "adaptive",
        }
    }
}

/// Every tunable of the signal state machine.  All durations in seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SignalTiming {
    /// Green duration under `FixedCycle`.
    pub fixed_green_secs:          f32,
    /// Adaptive: the active group keeps Green at least this long.
    pub min_green_secs:            f32,
    /// Adaptive: Green never lasts longer than this.
    pub max_green_secs:            f32,
    pub yellow_secs:               f32,
    /// All groups Red between one Green and the next.
    pub all_red_secs:              f32,
    pub weight_per_car:            f32,
    pub weight_per_second_waited:  f32,
    /// Scores at or below this count as no demand.
    pub idle_threshold:            f32,
    /// Adaptive: a rival scoring above this may end Green early.
    pub competing_score_threshold: f32,
    /// Adaptive: yield to a rival only while the active group holds fewer
    /// vehicles than this.
    pub yield_below_occupants:     usize,
}

impl Default for SignalTiming {
    fn default() -> Self {
        Self {
            fixed_green_secs:          20.0,
            min_green_secs:            5.0,
            max_green_secs:            30.0,
            yellow_secs:               3.0,
            all_red_secs:              1.0,
            weight_per_car:            1.0,
            weight_per_second_waited:  0.5,
            idle_threshold:            0.1,
            competing_score_threshold: 10.0,
            yield_below_occupants:     3,
        }
    }
}

impl SignalTiming {
    pub fn validate(&self) -> SignalResult<()> {
        let durations = [
            ("fixed_green_secs", self.fixed_green_secs),
            ("min_green_secs", self.min_green_secs),
            ("max_green_secs", self.max_green_secs),
            ("yellow_secs", self.yellow_secs),
            ("all_red_secs", self.all_red_secs),
        ];
        for (name, v) in durations {
            if !(v.is_finite() && v >= 0.0) {
                return Err(SignalError::InvalidTiming(format!("{name} must be finite and >= 0, got {v}")));
            }
        }
        if self.min_green_secs > self.max_green_secs {
            return Err(SignalError::InvalidTiming(format!(
                "min_green_secs ({}) exceeds max_green_secs ({})",
                self.min_green_secs, self.max_green_secs
            )));
        }
        Ok(())
    }
}
