//! Tunable vehicle constants.

use crate::{VehicleError, VehicleResult};

/// Driving parameters shared by every vehicle in a run.
///
/// Distances are metres, speeds metres per second, durations seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleParams {
    pub max_speed:               f32,
    /// Orientation slerp rate (fraction of the remaining angle per second).
    pub rotation_speed:          f32,
    /// Look-ahead for local avoidance.  A vehicle this far ahead starts
    /// damping speed.
    pub detection_distance:      f32,
    /// A vehicle this close ahead (or closer) forces speed to zero.
    pub stopping_distance:       f32,
    /// Half the width of the avoidance ray; vehicles further off the ray are
    /// ignored.
    pub half_width:              f32,
    /// Turn local avoidance off entirely (vehicles drive through each other).
    pub avoidance:               bool,
    /// Lane parameter from which a Red next lane stops the vehicle.
    pub signal_stop_t:           f32,
    /// Base speed above which a vehicle is expected to move.
    pub moving_speed:            f32,
    /// Effective speed under which a moving vehicle counts as stuck.
    pub stuck_speed:             f32,
    pub stuck_secs_intersection: f32,
    pub stuck_secs_road:         f32,
    /// How long damping is ignored once a vehicle is declared stuck.
    pub override_secs:           f32,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            max_speed:               15.0,
            rotation_speed:          5.0,
            detection_distance:      10.0,
            stopping_distance:       3.0,
            half_width:              1.25,
            avoidance:               true,
            signal_stop_t:           0.8,
            moving_speed:            0.1,
            stuck_speed:             0.5,
            stuck_secs_intersection: 10.0,
            stuck_secs_road:         50.0,
            override_secs:           1.0,
        }
    }
}

impl VehicleParams {
    /// Reject negative or non-finite values and a stopping distance beyond
    /// the detection distance.
    pub fn validate(&self) -> VehicleResult<()> {
        let fields = [
            ("max_speed", self.max_speed),
            ("rotation_speed", self.rotation_speed),
            ("detection_distance", self.detection_distance),
            ("stopping_distance", self.stopping_distance),
            ("half_width", self.half_width),
            ("signal_stop_t", self.signal_stop_t),
            ("moving_speed", self.moving_speed),
            ("stuck_speed", self.stuck_speed),
            ("stuck_secs_intersection", self.stuck_secs_intersection),
            ("stuck_secs_road", self.stuck_secs_road),
            ("override_secs", self.override_secs),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v < 0.0 {
                return Err(VehicleError::InvalidParams(format!("{name} = {v}")));
            }
        }
        if self.stopping_distance > self.detection_distance {
            return Err(VehicleError::InvalidParams(format!(
                "stopping_distance {} exceeds detection_distance {}",
                self.stopping_distance, self.detection_distance
            )));
        }
        Ok(())
    }

    /// Stuck threshold for a lane.
    #[inline]
    pub fn stuck_secs(&self, on_intersection: bool) -> f32 {
        if on_intersection { self.stuck_secs_intersection } else { self.stuck_secs_road }
    }

    /// Speed after damping for a vehicle `distance` metres ahead: `base` at
    /// the detection distance, falling linearly to zero at the stopping
    /// distance.
    pub fn damped_speed(&self, base: f32, distance: f32) -> f32 {
        let span = self.detection_distance - self.stopping_distance;
        let proximity = if span > 0.0 {
            ((self.detection_distance - distance) / span).clamp(0.0, 1.0)
        } else if distance <= self.stopping_distance {
            1.0
        } else {
            0.0
        };
        base * (1.0 - proximity)
    }
}
