//! Pickleball Park - rally and park-walker simulation
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (ball flight, paddle hits, player steering, walkers)
//! - `environment`: Time of day and wind scalars driving cosmetic scene state
//! - `settings`: Run configuration loaded from JSON
//!
//! Nothing in this crate draws. A renderer samples [`sim::SceneSnapshot`]
//! between ticks.

pub mod environment;
pub mod settings;
pub mod sim;

pub use environment::{Environment, LightingPhase};
pub use settings::Settings;
pub use sim::{HostCommand, RallySimulator, SceneSnapshot};

use glam::Vec2;

/// Simulation tuning constants
///
/// Velocities are in meters per tick and angles in degrees. The values are
/// tuned for one tick per ~16 ms frame; changing the cadence means rescaling
/// all of them together.
pub mod consts {
    /// Nominal frame cadence the constants were tuned for (seconds)
    pub const FRAME_DT: f32 = 0.016;
    /// Animation clock advance per tick
    pub const ANIM_TIME_STEP: f32 = 0.016;

    /// Court dimensions (meters)
    pub const COURT_LENGTH: f32 = 20.115;
    pub const COURT_WIDTH: f32 = 9.15;
    pub const HALF_LENGTH: f32 = COURT_LENGTH / 2.0;
    pub const HALF_WIDTH: f32 = COURT_WIDTH / 2.0;

    /// Ball flight
    pub const GRAVITY: f32 = 0.008;
    pub const FLOOR: f32 = 0.15;
    pub const RESTITUTION: f32 = 0.6;

    /// Net slab at x = 0
    pub const NET_HEIGHT: f32 = 0.914;
    pub const NET_THRESHOLD: f32 = 0.2;
    pub const NET_SNAP_X: f32 = 0.25;
    pub const NET_DAMPING: f32 = -0.5;
    pub const NET_POP_VY: f32 = 0.12;

    /// Side walls (z) keep the ball inside the court width
    pub const SIDE_WALL_MARGIN: f32 = 0.3;
    pub const SIDE_WALL_DAMPING: f32 = -0.8;

    /// End-wall rescue bounce (x)
    pub const END_WALL_INSET: f32 = 0.3;
    pub const END_WALL_DAMPING: f32 = 0.8;
    pub const END_WALL_POP_VY: f32 = 0.15;

    /// Emergency reset bounds on ball height
    pub const EMERGENCY_MAX_Y: f32 = 6.0;
    pub const EMERGENCY_MIN_Y: f32 = -0.5;

    /// Serve position (x sign follows the server's side)
    pub const SERVE_X: f32 = 3.0;
    pub const SERVE_Y: f32 = 1.5;
    pub const SERVE_VX: f32 = 0.08;
    pub const SERVE_VY: f32 = 0.03;
    /// Ball position at program start
    pub const START_BALL_X: f32 = -3.5;

    /// Player steering
    pub const PLAYER_STANDOFF: f32 = 0.8;
    pub const PLAYER_SMOOTH: f32 = 0.12;
    /// Closest a player target may get to the net
    pub const PLAYER_NET_CLEARANCE: f32 = 1.0;
    /// Margin from baselines and sidelines for player targets
    pub const PLAYER_COURT_MARGIN: f32 = 0.5;

    /// Paddle geometry relative to the player
    pub const ARM_EXTENSION: f32 = 0.6;
    pub const PADDLE_HEIGHT: f32 = 1.2;
    pub const PADDLE_SWING_LIFT: f32 = 0.3;

    /// Paddle hit detection and response
    pub const PADDLE_HIT_RADIUS: f32 = 0.5;
    /// Ball must be past this |x| on the receiver's side to be hittable
    pub const HIT_GATE_X: f32 = 0.5;
    /// Ball is placed this far in front of the paddle after a hit
    pub const HIT_CLEARANCE: f32 = 0.5;
    pub const HIT_VX_BASE: f32 = 0.09;
    pub const HIT_VX_STEP: f32 = 0.001;
    pub const HIT_VX_STEPS: u32 = 20;
    pub const HIT_VY_BASE: f32 = 0.18;
    pub const HIT_VY_STEP: f32 = 0.005;
    pub const HIT_VY_STEPS: u32 = 10;
    pub const HIT_VZ_STEP: f32 = 0.01;
    /// Lateral jitter draws k in 0..HIT_VZ_STEPS and uses (k - HIT_VZ_CENTER)
    pub const HIT_VZ_STEPS: i32 = 5;
    pub const HIT_VZ_CENTER: i32 = 2;

    /// Hit-triggered pose impulses
    pub const HIT_ARM_SWING: f32 = 70.0;
    pub const HIT_JUMP: f32 = 0.2;
    pub const HIT_TILT: f32 = 15.0;

    /// Animation blending
    pub const ARM_SMOOTH: f32 = 0.15;
    pub const ARM_TARGET_DECAY: f32 = 0.90;
    pub const POSE_DECAY: f32 = 0.85;

    /// Gait selection thresholds on distance to target
    pub const RUN_THRESHOLD: f32 = 0.08;
    pub const WALK_THRESHOLD: f32 = 0.03;
    pub const RUN_FREQ: f32 = 20.0;
    pub const RUN_AMPLITUDE: f32 = 35.0;
    pub const WALK_FREQ: f32 = 12.0;
    pub const WALK_AMPLITUDE: f32 = 20.0;
    pub const IDLE_FREQ: f32 = 2.0;
    pub const IDLE_AMPLITUDE: f32 = 5.0;
    pub const IDLE_COUNTER_RATIO: f32 = 0.5;

    /// Running track around the court
    pub const TRACK_OFFSET: f32 = 9.0;
    pub const TRACK_WIDTH: f32 = 3.0;
    pub const TRACK_MIDDLE: f32 = TRACK_OFFSET + TRACK_WIDTH / 2.0;
    pub const TRACK_HALF_LENGTH: f32 = HALF_LENGTH + TRACK_MIDDLE;
    pub const TRACK_HALF_WIDTH: f32 = HALF_WIDTH + TRACK_MIDDLE;

    /// Walkers
    pub const WALKER_SPEED: f32 = 0.04;
    pub const WALK_ANIM_FREQ: f32 = 10.0;
    pub const WALK_LEG_MAX: f32 = 25.0;
    pub const WALK_ARM_MAX: f32 = 20.0;
    pub const JOG_ANIM_FREQ: f32 = 15.0;
    pub const JOG_LEG_MAX: f32 = 40.0;
    pub const JOG_ARM_MAX: f32 = 30.0;
    /// Side-by-side spacing of a walking couple
    pub const COUPLE_OFFSET: f32 = 0.5;
    /// Dog trails its owner at this distance, rotated off the heading
    pub const DOG_DISTANCE: f32 = 1.5;
    pub const DOG_BEARING: f32 = 45.0;

    /// Environment
    pub const TIME_OF_DAY_STEP: f32 = 0.02;
    pub const DEFAULT_TIME_OF_DAY: f32 = 0.5;
    pub const WIND_STEP: f32 = 0.1;
    pub const WIND_MIN: f32 = 0.0;
    pub const WIND_MAX: f32 = 3.0;
    pub const DEFAULT_WIND: f32 = 1.0;
    pub const WIND_CLOCK_RATE: f32 = 0.02;
    pub const SUN_DISTANCE: f32 = 30.0;
    /// Night outside [NIGHT_END, NIGHT_START]
    pub const NIGHT_END: f32 = 0.3;
    pub const NIGHT_START: f32 = 0.7;
    /// Dawn/dusk outside [DAWN_END, DUSK_START] (and not night)
    pub const DAWN_END: f32 = 0.35;
    pub const DUSK_START: f32 = 0.65;
    /// Park lamps lit before LAMPS_OFF and after LAMPS_ON
    pub const LAMPS_OFF: f32 = 0.25;
    pub const LAMPS_ON: f32 = 0.75;
    /// Tree sway: sin(wind_time + x * TREE_SWAY_X + z * TREE_SWAY_Z) * wind * TREE_SWAY_DEG
    pub const TREE_SWAY_X: f32 = 0.5;
    pub const TREE_SWAY_Z: f32 = 0.3;
    pub const TREE_SWAY_DEG: f32 = 3.0;
    /// Bush sway: sin(wind_time + x * BUSH_SWAY_X) * wind * BUSH_SWAY_DEG
    pub const BUSH_SWAY_X: f32 = 0.3;
    pub const BUSH_SWAY_DEG: f32 = 2.0;
}

/// Offset on the ground plane for a heading in degrees
///
/// `Vec2::x` is world x and `Vec2::y` is world z throughout the crate.
#[inline]
pub fn heading_offset(distance: f32, degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos() * distance, rad.sin() * distance)
}

/// Sine oscillator sample: `sin(time * freq) * amplitude`
#[inline]
pub fn oscillate(time: f32, freq: f32, amplitude: f32) -> f32 {
    (time * freq).sin() * amplitude
}
