//! `ls-sim` — tick loop orchestrator for the lanesim traffic simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Signals   : controllers score groups and advance phases; colour
//!                 changes set/clear lane stop flags.
//!   ② Incidents : reopen expired closures; maybe close a random lane.
//!   ③ Motion    : every vehicle moves against a read-only network
//!                 (parallel with the `parallel` feature).
//!   ④ Apply     : occupancy changes in ascending VehicleId.
//!   ⑤ Drain     : events → TrafficStats, SimObserver, Dispatcher.
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`sim`]        | `Sim<R, D>`: state and the tick loop                      |
//! | [`builder`]    | `SimBuilder`: validation, placement, RNG streams          |
//! | [`config`]     | `TrafficConfig`: every tunable in one (serde) struct      |
//! | [`event`]      | `SimEvent`, `TickSummary`                                 |
//! | [`observer`]   | `SimObserver` hooks, `NoopObserver`                       |
//! | [`stats`]      | `TrafficStats`, `StatsSnapshot`                           |
//! | [`dispatch`]   | `Dispatcher`, `RandomDispatcher`, `random_fleet`          |
//! | [`incident`]   | `IncidentScheduler`, `IncidentConfig`                     |
//! | [`error`]      | `SimError`, `SimResult<T>`                                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the motion phase on Rayon's thread pool.          |
//! | `fx-hash`  | FxHash for the per-lane incident map.                  |
//! | `serde`    | Serde derives on `TrafficConfig` and its parts.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ls_core::SimRng;
//! use ls_network::AStarRouter;
//! use ls_sim::{NoopObserver, RandomDispatcher, SimBuilder, TrafficConfig};
//!
//! let config = TrafficConfig { vehicle_count: 40, ..TrafficConfig::default() };
//! let dispatcher = RandomDispatcher::new(SimRng::new(config.sim.seed ^ 0xD15));
//! let mut sim = SimBuilder::new(config, network, AStarRouter, dispatcher)
//!     .random_fleet()
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod incident;
pub mod observer;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::TrafficConfig;
pub use dispatch::{Dispatcher, Parked, RandomDispatcher, random_destination, random_fleet};
pub use error::{SimError, SimResult};
pub use event::{SimEvent, TickSummary};
pub use incident::{Incident, IncidentConfig, IncidentScheduler};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use stats::{StatsSnapshot, TrafficStats};
