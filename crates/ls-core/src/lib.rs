//! `ls-core` — foundational types for the `lanesim` traffic simulator.
//!
//! This crate is a dependency of every other `ls-*` crate.  It intentionally
//! has no `ls-*` dependencies and minimal external ones (`glam`, `rand`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `LaneId`, `VehicleId`, `ControllerId`, `IndicatorId`  |
//! | [`geom`]        | `Placement`, `look_rotation`, re-exported `Vec3`/`Quat` |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (global, splittable)                         |
//! | [`wait`]        | `WaitSource` — read access to per-vehicle wait times  |
//! | [`error`]       | `LsError`, `LsResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;
pub mod wait;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{LsError, LsResult};
pub use geom::{Placement, Quat, Vec3, look_rotation};
pub use ids::{ControllerId, IndicatorId, LaneId, VehicleId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
pub use wait::WaitSource;
