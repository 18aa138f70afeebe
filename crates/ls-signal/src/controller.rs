//! Per-intersection phase state machine.

use tracing::debug;

use ls_core::{ControllerId, WaitSource};
use ls_network::LaneNetwork;

use crate::light::{LightColor, SignalGroup};
use crate::timing::{SignalPolicy, SignalTiming};

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Where a controller is in its cycle.  Group indices refer to
/// [`SignalController::groups`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Waiting out the randomized startup offset; every group Red.
    Startup,
    Green { group: usize },
    Yellow { group: usize },
    /// Clearance between two Greens; every group Red.
    AllRed,
}

/// A group changed colour during [`SignalController::update`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhaseChange {
    pub controller: ControllerId,
    pub group:      usize,
    pub color:      LightColor,
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Pick the next group to receive Green from per-group `scores`.
///
/// - Every score `<= idle` → round-robin after `active`.
/// - Otherwise the highest score wins.  Among tied top groups the first in
///   cyclic order after `active` wins, so `active` never wins a tie.
/// - If `active` is the unique top scorer, the best other group scoring above
///   `idle` wins instead; `active` keeps Green only when nobody else has
///   demand.
///
/// With no previous Green (`active == None`) the cyclic scan starts at 0.
pub fn select_next(scores: &[f32], active: Option<usize>, idle: f32) -> usize {
    let n = scores.len();
    if n == 0 {
        return 0;
    }
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if max <= idle {
        return active.map_or(0, |a| (a + 1) % n);
    }

    // Indices in cyclic order after `active` (ending with `active` itself).
    let start = active.map_or(0, |a| a + 1);
    let cyclic = (0..n).map(|k| (start + k) % n);

    let mut best: Option<usize> = None;
    for i in cyclic {
        if Some(i) == active {
            continue;
        }
        // Strictly greater keeps the earliest in cyclic order on ties.
        if best.is_none_or(|b| scores[i] > scores[b]) {
            best = Some(i);
        }
    }

    match (best, active) {
        (Some(b), Some(a)) if scores[b] >= scores[a] => b,
        (Some(b), Some(_)) if scores[b] > idle => b,
        (Some(_), Some(a)) => a,
        (Some(b), None) => b,
        (None, a) => a.unwrap_or(0),
    }
}

// ── SignalController ──────────────────────────────────────────────────────────

/// One intersection's signal state machine.
#[derive(Clone, Debug)]
pub struct SignalController {
    pub id:     ControllerId,
    pub name:   String,
    pub groups: Vec<SignalGroup>,

    policy:         SignalPolicy,
    timing:         SignalTiming,
    phase:          Phase,
    /// Seconds spent in `phase`.
    elapsed:        f32,
    startup_offset: f32,
    /// Group that most recently held Green.
    last_active:    Option<usize>,
    pain_score:     f32,
    wasted_green:   f32,
}

impl SignalController {
    pub(crate) fn new(
        id: ControllerId,
        name: String,
        groups: Vec<SignalGroup>,
        policy: SignalPolicy,
        timing: SignalTiming,
        startup_offset: f32,
    ) -> Self {
        Self {
            id,
            name,
            groups,
            policy,
            timing,
            phase: Phase::Startup,
            elapsed: 0.0,
            startup_offset,
            last_active: None,
            pain_score: 0.0,
            wasted_green: 0.0,
        }
    }

    // ── Read accessors ────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase { self.phase }
    pub fn policy(&self) -> SignalPolicy { self.policy }
    pub fn timing(&self) -> &SignalTiming { &self.timing }
    pub fn startup_offset(&self) -> f32 { self.startup_offset }
    pub fn elapsed_in_phase(&self) -> f32 { self.elapsed }

    /// Sum of every group's demand score at the last update.
    pub fn pain_score(&self) -> f32 { self.pain_score }

    /// Seconds of Green shown to an empty group since the last reset.
    pub fn wasted_green_secs(&self) -> f32 { self.wasted_green }

    /// A controller with no groups never schedules anything.
    pub fn is_inert(&self) -> bool { self.groups.is_empty() }

    /// The group currently showing Green, if any.
    pub fn green_group(&self) -> Option<usize> {
        match self.phase {
            Phase::Green { group } => Some(group),
            _ => None,
        }
    }

    pub fn reset_stats(&mut self) {
        self.wasted_green = 0.0;
    }

    // ── Mutators ──────────────────────────────────────────────────────────

    /// Switch policy and restart the cycle from Red on every group.
    pub fn set_policy(&mut self, policy: SignalPolicy, network: &mut LaneNetwork) {
        self.policy = policy;
        for g in &mut self.groups {
            g.set_color(LightColor::Red, network);
        }
        if !self.is_inert() {
            self.phase = Phase::AllRed;
            self.elapsed = 0.0;
        }
    }

    /// Put every group on Red.  Called once at build.
    pub(crate) fn init_red(&mut self, network: &mut LaneNetwork) {
        for g in &mut self.groups {
            g.set_color(LightColor::Red, network);
        }
    }

    /// Advance by `dt` seconds.  Returns the colour change made this tick, if
    /// any (at most one group changes per tick).
    pub fn update(
        &mut self,
        dt: f32,
        network: &mut LaneNetwork,
        waits: &(impl WaitSource + ?Sized),
    ) -> Option<PhaseChange> {
        if self.is_inert() {
            return None;
        }

        let mut pain = 0.0;
        for g in &mut self.groups {
            g.score = g.demand_score(
                network,
                waits,
                self.timing.weight_per_car,
                self.timing.weight_per_second_waited,
            );
            pain += g.score;
        }
        self.pain_score = pain;

        self.elapsed += dt;
        match self.phase {
            Phase::Startup => {
                if self.elapsed >= self.startup_offset {
                    return Some(self.start_green(network));
                }
            }
            Phase::Green { group } => {
                let occupants = self.groups[group].occupant_count(network);
                if occupants == 0 {
                    self.wasted_green += dt;
                }
                if self.green_is_over(group, occupants) {
                    return Some(self.enter(Phase::Yellow { group }, group, LightColor::Yellow, network));
                }
            }
            Phase::Yellow { group } => {
                if self.elapsed >= self.timing.yellow_secs {
                    return Some(self.enter(Phase::AllRed, group, LightColor::Red, network));
                }
            }
            Phase::AllRed => {
                if self.elapsed >= self.timing.all_red_secs {
                    return Some(self.start_green(network));
                }
            }
        }
        None
    }

    fn green_is_over(&self, group: usize, occupants: usize) -> bool {
        let t = &self.timing;
        match self.policy {
            SignalPolicy::FixedCycle => self.elapsed >= t.fixed_green_secs,
            SignalPolicy::Adaptive => {
                if self.elapsed >= t.max_green_secs {
                    return true;
                }
                if self.elapsed < t.min_green_secs {
                    return false;
                }
                if occupants == 0 {
                    return true;
                }
                occupants < t.yield_below_occupants
                    && self
                        .groups
                        .iter()
                        .enumerate()
                        .any(|(i, g)| i != group && g.score > t.competing_score_threshold)
            }
        }
    }

    fn start_green(&mut self, network: &mut LaneNetwork) -> PhaseChange {
        let n = self.groups.len();
        let next = match self.policy {
            SignalPolicy::FixedCycle => self.last_active.map_or(0, |a| (a + 1) % n),
            SignalPolicy::Adaptive => {
                let scores: Vec<f32> = self.groups.iter().map(|g| g.score).collect();
                select_next(&scores, self.last_active, self.timing.idle_threshold)
            }
        };
        self.last_active = Some(next);
        self.enter(Phase::Green { group: next }, next, LightColor::Green, network)
    }

    fn enter(&mut self, phase: Phase, group: usize, color: LightColor, network: &mut LaneNetwork) -> PhaseChange {
        debug!(controller = %self.id, group = %self.groups[group].name, %color, "signal phase change");
        self.groups[group].set_color(color, network);
        self.phase = phase;
        self.elapsed = 0.0;
        PhaseChange { controller: self.id, group, color }
    }
}
