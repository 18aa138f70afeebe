//! `ls-vehicle` — vehicles driving along lane curves.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`tracker`]   | `WaitTracker`: current, total, and accumulated wait             |
//! | [`params`]    | `VehicleParams`: speeds, distances, stuck thresholds            |
//! | [`state`]     | `Vehicle`, `MotionState`                                        |
//! | [`avoidance`] | `AvoidanceIndex`: per-tick R*-tree of vehicle positions         |
//! | [`motion`]    | `step`: one vehicle, one tick; `Step` occupancy commands        |
//! | [`store`]     | `VehicleStore`: `Vec<Vehicle>`, implements `WaitSource`         |
//! | [`engine`]    | `TrafficEngine<R>`: placement, destinations, two-phase tick     |
//! | [`error`]     | `VehicleError`, `VehicleResult<T>`                              |
//!
//! # Movement model
//!
//! A vehicle sits at curve parameter `t ∈ [0, 1]` on one lane and advances
//! by `speed · Δt / |tangent(t)|` each tick, so it covers roughly `speed`
//! metres per second on any curve.  Its route is the list of lanes from the
//! current one to the destination.  At `t = 1` it either commits to the next
//! route lane, holds (Red or closed next lane, no route), or arrives.
//!
//! Speed is the lane's base speed damped by the nearest vehicle ahead,
//! forced to zero near a Red stop line or while held at the lane end, and
//! restored by a short override when damping alone has kept a vehicle
//! stuck too long.  Wait time is charged on the speed actually applied.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the motion phase on Rayon's thread pool.          |
//! | `serde`    | Serde derives on `VehicleParams` and `WaitTracker`.    |

pub mod avoidance;
pub mod engine;
pub mod error;
pub mod motion;
pub mod params;
pub mod state;
pub mod store;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use avoidance::AvoidanceIndex;
pub use engine::TrafficEngine;
pub use error::{VehicleError, VehicleResult};
pub use motion::Step;
pub use params::VehicleParams;
pub use state::{MotionState, Vehicle};
pub use store::VehicleStore;
pub use tracker::WaitTracker;
