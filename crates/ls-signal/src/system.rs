//! All controllers of a network, plus their builder.

use std::collections::BTreeMap;

use tracing::warn;

use ls_core::{ControllerId, IndicatorId, LaneId, SimRng, WaitSource};
use ls_network::LaneNetwork;

use crate::controller::{PhaseChange, SignalController};
use crate::light::SignalGroup;
use crate::timing::{SignalPolicy, SignalTiming};
use crate::{SignalError, SignalResult};

// ── SignalSystem ──────────────────────────────────────────────────────────────

/// Every signal controller in the simulation, updated in ascending id order.
#[derive(Clone, Debug, Default)]
pub struct SignalSystem {
    controllers: Vec<SignalController>,
}

impl SignalSystem {
    /// A system with no controllers.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn controllers(&self) -> &[SignalController] {
        &self.controllers
    }

    pub fn controllers_mut(&mut self) -> &mut [SignalController] {
        &mut self.controllers
    }

    pub fn controller(&self, id: ControllerId) -> Option<&SignalController> {
        self.controllers.get(id.index())
    }

    /// Advance every controller by `dt`, appending colour changes to `out`.
    pub fn update(
        &mut self,
        dt: f32,
        network: &mut LaneNetwork,
        waits: &(impl WaitSource + ?Sized),
        out: &mut Vec<PhaseChange>,
    ) {
        for c in &mut self.controllers {
            if let Some(change) = c.update(dt, network, waits) {
                out.push(change);
            }
        }
    }

    /// Switch every controller to `policy`, restarting each from all-Red.
    pub fn set_policy(&mut self, policy: SignalPolicy, network: &mut LaneNetwork) {
        for c in &mut self.controllers {
            c.set_policy(policy, network);
        }
    }

    /// Sum of wasted Green seconds across controllers.
    pub fn total_wasted_green_secs(&self) -> f32 {
        self.controllers.iter().map(SignalController::wasted_green_secs).sum()
    }

    pub fn reset_stats(&mut self) {
        for c in &mut self.controllers {
            c.reset_stats();
        }
    }
}

// ── SignalSystemBuilder ───────────────────────────────────────────────────────

struct PendingController {
    name:   String,
    groups: Vec<(String, Vec<LaneId>, usize)>,
}

/// Fluent construction of a [`SignalSystem`].
///
/// ```ignore
/// let mut b = SignalSystemBuilder::new(SignalPolicy::Adaptive, SignalTiming::default());
/// let c = b.add_controller("main_st");
/// b.add_group(c, "north_south", [north_in, south_in], 2)?;
/// b.add_group(c, "east_west", [east_in, west_in], 2)?;
/// let signals = b.build(&mut network, &mut rng)?;
/// ```
pub struct SignalSystemBuilder {
    policy:         SignalPolicy,
    timing:         SignalTiming,
    startup_offset: (f32, f32),
    pending:        Vec<PendingController>,
}

impl SignalSystemBuilder {
    pub fn new(policy: SignalPolicy, timing: SignalTiming) -> Self {
        Self {
            policy,
            timing,
            startup_offset: (0.0, 10.0),
            pending: Vec::new(),
        }
    }

    /// Range (seconds) each controller's startup offset is drawn from.
    /// Default: `[0, 10)`.
    pub fn startup_offsets(mut self, min_secs: f32, max_secs: f32) -> Self {
        self.startup_offset = (min_secs, max_secs);
        self
    }

    /// Register an intersection and return its id (sequential from 0).
    pub fn add_controller(&mut self, name: impl Into<String>) -> ControllerId {
        let id = ControllerId(self.pending.len() as u32);
        self.pending.push(PendingController { name: name.into(), groups: Vec::new() });
        id
    }

    /// Add a group of `lanes` with `indicators` signal heads to `controller`.
    pub fn add_group(
        &mut self,
        controller: ControllerId,
        name: impl Into<String>,
        lanes: impl IntoIterator<Item = LaneId>,
        indicators: usize,
    ) -> SignalResult<()> {
        let c = self
            .pending
            .get_mut(controller.index())
            .ok_or(SignalError::ControllerNotFound(controller))?;
        c.groups.push((name.into(), lanes.into_iter().collect(), indicators));
        Ok(())
    }

    /// Validate, draw startup offsets, set every governed lane to Red, and
    /// produce the system.
    ///
    /// Fails if timing is invalid, a group names an unknown lane, or a lane
    /// belongs to more than one group.  A controller without groups is kept
    /// but inert (logged once here).
    pub fn build(self, network: &mut LaneNetwork, rng: &mut SimRng) -> SignalResult<SignalSystem> {
        self.timing.validate()?;
        let (lo, hi) = self.startup_offset;
        if !(lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo <= hi) {
            return Err(SignalError::InvalidTiming(format!("bad startup offset range [{lo}, {hi})")));
        }

        // Lane → owning controller, to reject overlaps.
        let mut owner: BTreeMap<LaneId, ControllerId> = BTreeMap::new();
        let mut next_indicator = 0u32;
        let mut controllers = Vec::with_capacity(self.pending.len());

        for (i, pending) in self.pending.into_iter().enumerate() {
            let id = ControllerId(i as u32);
            let mut groups = Vec::with_capacity(pending.groups.len());
            for (name, lanes, indicator_count) in pending.groups {
                for &lane in &lanes {
                    if !network.contains(lane) {
                        return Err(SignalError::UnknownLane { group: name, lane });
                    }
                    if let Some(&first) = owner.get(&lane) {
                        return Err(SignalError::LaneInTwoGroups { lane, first, second: id });
                    }
                    owner.insert(lane, id);
                }
                let indicators = (0..indicator_count)
                    .map(|_| {
                        let ind = IndicatorId(next_indicator);
                        next_indicator += 1;
                        ind
                    })
                    .collect();
                groups.push(SignalGroup::new(name, lanes, indicators));
            }

            if groups.is_empty() {
                warn!(controller = %id, name = %pending.name, "signal controller has no groups; it will never schedule");
            }

            let offset = if hi > lo { rng.gen_range(lo..hi) } else { lo };
            let mut c = SignalController::new(id, pending.name, groups, self.policy, self.timing.clone(), offset);
            c.init_red(network);
            controllers.push(c);
        }

        Ok(SignalSystem { controllers })
    }
}
