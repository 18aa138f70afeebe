//! Simulation time model.
//!
//! # Design
//!
//! Time advances in fixed steps.  A `Tick` counts steps; `SimClock` maps a
//! tick to simulated seconds:
//!
//!   elapsed_secs = tick * tick_secs
//!
//! Every duration in the simulation (stuck timers, green/yellow/all-red
//! phases, incident windows) is accumulated from `tick_secs`, never from a
//! tick count, so behavior does not depend on the chosen step size beyond
//! one step of quantisation.

use std::fmt;

use crate::{LsError, LsResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds per tick (the Δt handed to every update).
    pub tick_secs: f32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_secs: f32) -> Self {
        Self { tick_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    ///
    /// Computed in `f64` from the tick count so long runs do not drift.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.secs_at(self.current_tick)
    }

    /// Simulated seconds at an arbitrary tick.
    #[inline]
    pub fn secs_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.tick_secs as f64
    }

    /// Break elapsed time into (minutes, seconds) for log lines.
    pub fn elapsed_ms(&self) -> (u64, f64) {
        let secs = self.elapsed_secs().max(0.0);
        let minutes = (secs / 60.0).floor();
        (minutes as u64, secs - minutes * 60.0)
    }

    /// How many ticks span `secs` seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        if self.tick_secs <= 0.0 {
            return 0;
        }
        (secs / self.tick_secs as f64).ceil().max(0.0) as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s) = self.elapsed_ms();
        write!(f, "{} ({}m {:05.2}s)", self.current_tick, m, s)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Tick-loop configuration.
///
/// Typically embedded in a larger application config loaded from JSON and
/// passed to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated seconds per tick.  Default: 0.05 (20 Hz).
    pub tick_secs: f32,

    /// Total ticks to simulate.  Five minutes at 20 Hz: 6000.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Emit a vehicle snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Simulated duration of the whole run in seconds.
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.total_ticks as f64 * self.tick_secs as f64
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_secs)
    }

    /// Reject a non-positive or non-finite step.
    pub fn validate(&self) -> LsResult<()> {
        if !(self.tick_secs.is_finite() && self.tick_secs > 0.0) {
            return Err(LsError::Config(format!(
                "tick_secs must be positive and finite, got {}",
                self.tick_secs
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_secs:             0.05,
            total_ticks:           6_000,
            seed:                  42,
            num_threads:           None,
            output_interval_ticks: 20,
        }
    }
}
