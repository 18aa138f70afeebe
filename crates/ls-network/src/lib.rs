//! `ls-network` — lane geometry, the lane graph, and routing.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`geometry`]  | `CubicBezier`: point, tangent, sampled arc length         |
//! | [`lane`]      | `Lane`, `Congestion`, speed-limit classification          |
//! | [`network`]   | `LaneNetwork`, `LaneNetworkBuilder`                       |
//! | [`router`]    | `Router` trait, `Route`, `AStarRouter`                    |
//! | [`analysis`]  | `analyze`: dead ends, orphans, connected components       |
//! | [`error`]     | `NetworkError`, `NetworkResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod analysis;
pub mod error;
pub mod geometry;
pub mod lane;
pub mod network;
pub mod router;


pub use analysis::{NetworkReport, analyze};
pub use error::{NetworkError, NetworkResult};
pub use geometry::{CubicBezier, TANGENT_FLOOR};
pub use lane::{Congestion, Lane, speed_limit_for_length};
pub use network::{LaneNetwork, LaneNetworkBuilder};
pub use router::{AStarRouter, Route, Router};
