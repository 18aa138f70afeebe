//! Signal colours, physical indicators, and lane groups.

use std::fmt;

use ls_core::{IndicatorId, LaneId, WaitSource};
use ls_network::LaneNetwork;

/// Colour shown by a signal group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightColor {
    Red,
    Yellow,
    Green,
}

impl LightColor {
    /// Vehicles must hold at the stop line.  Yellow still lets traffic through.
    #[inline]
    pub fn stops_traffic(self) -> bool {
        self == LightColor::Red
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LightColor::Red    => "red",
            LightColor::Yellow => "yellow",
            LightColor::Green  => "green",
        }
    }
}

impl fmt::Display for LightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical signal head.  Mirrors the colour of its group.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Indicator {
    pub id:    IndicatorId,
    pub color: LightColor,
}

/// A named set of incoming lanes that receive right-of-way together.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalGroup {
    pub name:       String,
    pub lanes:      Vec<LaneId>,
    pub indicators: Vec<Indicator>,
    pub color:      LightColor,
    /// Demand score from the most recent controller update.
    pub score:      f32,
}

impl SignalGroup {
    pub fn new(name: impl Into<String>, lanes: Vec<LaneId>, indicators: Vec<IndicatorId>) -> Self {
        Self {
            name: name.into(),
            lanes,
            indicators: indicators
                .into_iter()
                .map(|id| Indicator { id, color: LightColor::Red })
                .collect(),
            color: LightColor::Red,
            score: 0.0,
        }
    }

    /// Vehicles currently on any of the group's lanes.
    pub fn occupant_count(&self, network: &LaneNetwork) -> usize {
        self.lanes.iter().map(|&l| network.occupant_count(l)).sum()
    }

    /// `cars × weight_per_car + Σ current wait × weight_per_second`, over
    /// every occupant of every lane in the group.
    pub fn demand_score(
        &self,
        network: &LaneNetwork,
        waits: &(impl WaitSource + ?Sized),
        weight_per_car: f32,
        weight_per_second: f32,
    ) -> f32 {
        let mut cars = 0usize;
        let mut waited = 0.0f32;
        for lane in self.lanes.iter().filter_map(|&l| network.lane(l)) {
            cars += lane.occupants.len();
            waited += lane.occupants.iter().map(|&v| waits.current_wait_secs(v)).sum::<f32>();
        }
        cars as f32 * weight_per_car + waited * weight_per_second
    }

    /// Change colour, propagating to indicators and the lanes' stop flags.
    pub fn set_color(&mut self, color: LightColor, network: &mut LaneNetwork) {
        self.color = color;
        for ind in &mut self.indicators {
            ind.color = color;
        }
        for &lane in &self.lanes {
            let set = network.set_stop_signal(lane, color.stops_traffic());
            debug_assert!(set.is_ok(), "group {} governs lane {lane}, missing from the network", self.name);
        }
    }
}
