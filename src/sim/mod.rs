//! Rally simulation module
//!
//! All time-stepped logic lives here. This module must stay free of any
//! drawing API:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only
//! - Renderers read [`SceneSnapshot`] between ticks

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod walkers;

pub use snapshot::{BallPose, CompanionPose, PlayerPose, SceneSnapshot, WalkerPose};
pub use state::{
    Ball, Companion, Gait, PathSegment, PlayerAgent, RallyEvent, RallyState, Side, WalkerAgent,
    WalkerGait, WalkerRole,
};
pub use tick::{HostCommand, RallySimulator};
