//! `ls-signal` — intersection signal controllers.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`light`]      | `LightColor`, `Indicator`, `SignalGroup`                    |
//! | [`timing`]     | `SignalTiming` (every tunable constant), `SignalPolicy`     |
//! | [`controller`] | `SignalController` phase state machine, `select_next`       |
//! | [`system`]     | `SignalSystem`, `SignalSystemBuilder`                       |
//! | [`error`]      | `SignalError`, `SignalResult<T>`                            |
//!
//! # Design notes
//!
//! Each controller is an explicit `(phase, elapsed_in_phase)` state machine
//! advanced once per tick by `Δt` seconds:
//!
//! ```text
//! Startup(offset) ─► Green(g) ─► Yellow(g) ─► AllRed ─► Green(next) ─► …
//! ```
//!
//! During `Startup` and `AllRed` every group is Red.  A group's colour drives
//! its indicators and the `stop_signal` flag of its lanes (set only on Red).
//! Controllers never read vehicle state directly: queue pressure comes from
//! lane occupants plus a [`WaitSource`](ls_core::WaitSource).

pub mod controller;
pub mod error;
pub mod light;
pub mod system;
pub mod timing;


pub use controller::{Phase, PhaseChange, SignalController, select_next};
pub use error::{SignalError, SignalResult};
pub use light::{Indicator, LightColor, SignalGroup};
pub use system::{SignalSystem, SignalSystemBuilder};
pub use timing::{SignalPolicy, SignalTiming};
