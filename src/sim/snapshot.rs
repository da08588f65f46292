//! Read-only pose data for renderers
//!
//! Sampled between ticks. Angles are in degrees, ground positions are
//! split into `x`/`z` so consumers never have to remember which `Vec2`
//! component is which.

use glam::Vec3;
use serde::Serialize;

use super::state::{Ball, Companion, PlayerAgent, Side, WalkerAgent};
use crate::environment::LightingPhase;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallPose {
    pub pos: Vec3,
}

impl From<&Ball> for BallPose {
    fn from(ball: &Ball) -> Self {
        Self { pos: ball.pos }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerPose {
    pub side: Side,
    pub x: f32,
    pub z: f32,
    pub jump_height: f32,
    pub body_tilt: f32,
    pub leg_angle1: f32,
    pub leg_angle2: f32,
    pub arm_swing: f32,
    /// Body yaw turned toward the ball
    pub facing: f32,
    pub paddle: Vec3,
}

impl PlayerPose {
    pub fn new(player: &PlayerAgent, ball_pos: Vec3) -> Self {
        Self {
            side: player.side,
            x: player.pos.x,
            z: player.pos.y,
            jump_height: player.jump_height,
            body_tilt: player.body_tilt,
            leg_angle1: player.leg_angle1,
            leg_angle2: player.leg_angle2,
            arm_swing: player.arm_swing,
            facing: player.facing(ball_pos),
            paddle: player.paddle_position(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WalkerPose {
    pub x: f32,
    pub z: f32,
    pub facing: f32,
    pub leg_angle1: f32,
    pub leg_angle2: f32,
    pub arm_swing1: f32,
    pub arm_swing2: f32,
}

impl From<&WalkerAgent> for WalkerPose {
    fn from(walker: &WalkerAgent) -> Self {
        Self {
            x: walker.pos.x,
            z: walker.pos.y,
            facing: walker.angle,
            leg_angle1: walker.leg_angle1,
            leg_angle2: walker.leg_angle2,
            arm_swing1: walker.arm_swing1,
            arm_swing2: walker.arm_swing2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompanionPose {
    pub x: f32,
    pub z: f32,
    pub facing: f32,
}

impl From<&Companion> for CompanionPose {
    fn from(companion: &Companion) -> Self {
        Self {
            x: companion.pos.x,
            z: companion.pos.y,
            facing: companion.angle,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub tick: u64,
    pub ball: BallPose,
    pub players: [PlayerPose; 2],
    pub walkers: Vec<WalkerPose>,
    pub companions: Vec<CompanionPose>,
    pub rally_count: u32,
    /// Serving player number (1 = left, 2 = right)
    pub server: u8,
    pub paused: bool,
    pub time_of_day: f32,
    pub wind_strength: f32,
    pub wind_time: f32,
    pub lighting: LightingPhase,
    pub sun_position: Vec3,
    pub lamps_lit: bool,
}
