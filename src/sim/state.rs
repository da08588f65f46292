//! Simulation state types
//!
//! Ball, players, walkers and rally bookkeeping. Everything here is plain
//! data owned by [`super::RallySimulator`]; the update rules live in
//! `tick`, `collision` and `walkers`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::oscillate;

/// Court side. The left player defends negative x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign of x on this side of the net
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Player number as shown to users (1 = left, 2 = right)
    pub fn number(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }

    /// True when a ball with this horizontal velocity is travelling toward this side
    pub fn is_incoming(self, vx: f32) -> bool {
        match self {
            Side::Left => vx < 0.0,
            Side::Right => vx > 0.0,
        }
    }

    /// Yaw (degrees) that faces the net from this side
    pub fn net_facing(self) -> f32 {
        -self.sign() * 90.0
    }

    /// Ready position x at the quarter-court mark
    pub fn ready_x(self) -> f32 {
        self.sign() * COURT_LENGTH / 4.0
    }

    /// Allowed x range for player targets on this side (min, max)
    pub fn x_bounds(self) -> (f32, f32) {
        match self {
            Side::Left => (-HALF_LENGTH + PLAYER_COURT_MARGIN, -PLAYER_NET_CLEARANCE),
            Side::Right => (PLAYER_NET_CLEARANCE, HALF_LENGTH - PLAYER_COURT_MARGIN),
        }
    }
}

/// The single rally ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec3::new(START_BALL_X, SERVE_Y, 0.0),
            vel: Vec3::new(SERVE_VX, SERVE_VY, 0.0),
        }
    }
}

impl Ball {
    /// Place the ball at `server`'s serve position with serve velocity
    pub fn serve_from(&mut self, server: Side) {
        self.pos = Vec3::new(server.sign() * SERVE_X, SERVE_Y, 0.0);
        self.vel = Vec3::new(-server.sign() * SERVE_VX, SERVE_VY, 0.0);
    }

    /// One explicit Euler step followed by gravity on vy
    pub fn integrate(&mut self) {
        self.pos += self.vel;
        self.vel.y -= GRAVITY;
    }
}

/// Leg gait chosen from how far a player still has to travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gait {
    Idle,
    Walk,
    Run,
}

impl Gait {
    pub fn from_distance(distance: f32) -> Self {
        if distance > RUN_THRESHOLD {
            Gait::Run
        } else if distance > WALK_THRESHOLD {
            Gait::Walk
        } else {
            Gait::Idle
        }
    }

    /// Leg angles (front, back) at animation time `t`
    pub fn leg_angles(self, t: f32) -> (f32, f32) {
        match self {
            Gait::Run => {
                let leg = oscillate(t, RUN_FREQ, RUN_AMPLITUDE);
                (leg, -leg)
            }
            Gait::Walk => {
                let leg = oscillate(t, WALK_FREQ, WALK_AMPLITUDE);
                (leg, -leg)
            }
            Gait::Idle => {
                let leg = oscillate(t, IDLE_FREQ, IDLE_AMPLITUDE);
                (leg, -leg * IDLE_COUNTER_RATIO)
            }
        }
    }
}

/// A rally player. Positions are on the ground plane (`x`, `y` = world z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerAgent {
    pub side: Side,
    pub pos: Vec2,
    pub target: Vec2,
    pub leg_angle1: f32,
    pub leg_angle2: f32,
    /// Paddle arm swing (degrees)
    pub arm_swing: f32,
    /// Swing the arm is easing toward; decays back to rest after a hit
    pub target_arm_swing: f32,
    pub body_tilt: f32,
    pub jump_height: f32,
    pub gait: Gait,
}

impl PlayerAgent {
    pub fn new(side: Side) -> Self {
        let ready = Vec2::new(side.ready_x(), 0.0);
        Self {
            side,
            pos: ready,
            target: ready,
            leg_angle1: 0.0,
            leg_angle2: 0.0,
            arm_swing: 0.0,
            target_arm_swing: 0.0,
            body_tilt: 0.0,
            jump_height: 0.0,
            gait: Gait::Idle,
        }
    }

    /// Pick a target from the ball and ease toward it
    pub fn steer(&mut self, ball: &Ball) {
        self.target = if self.side.is_incoming(ball.vel.x) {
            let (min_x, max_x) = self.side.x_bounds();
            let z_limit = HALF_WIDTH - PLAYER_COURT_MARGIN;
            let x = ball.pos.x + self.side.sign() * PLAYER_STANDOFF;
            let mut z = ball.pos.z;
            if z.abs() > z_limit {
                z = z.signum() * z_limit;
            }
            Vec2::new(x.clamp(min_x, max_x), z)
        } else {
            Vec2::new(self.side.ready_x(), 0.0)
        };
        self.pos += (self.target - self.pos) * PLAYER_SMOOTH;
    }

    /// World position of the paddle face
    ///
    /// The paddle sits in front of the player (toward the net) and traces an
    /// arc as the arm swings.
    pub fn paddle_position(&self) -> Vec3 {
        let swing = self.arm_swing.to_radians();
        Vec3::new(
            self.pos.x - self.side.sign() * ARM_EXTENSION * swing.cos(),
            PADDLE_HEIGHT + self.jump_height + PADDLE_SWING_LIFT * swing.sin(),
            self.pos.y,
        )
    }

    /// Extra yaw (degrees) on top of the net-facing yaw that turns the body toward the ball
    pub fn ball_turn(&self, ball_pos: Vec3) -> f32 {
        let bearing = (ball_pos.z - self.pos.y)
            .atan2(ball_pos.x - self.pos.x)
            .to_degrees();
        bearing + self.side.sign() * 90.0
    }

    /// Body yaw (degrees): net-facing yaw plus the turn toward the ball
    pub fn facing(&self, ball_pos: Vec3) -> f32 {
        self.side.net_facing() + self.ball_turn(ball_pos)
    }

    /// Start the hit swing, jump and lean
    pub fn trigger_hit(&mut self) {
        self.target_arm_swing = HIT_ARM_SWING;
        self.jump_height = HIT_JUMP;
        self.body_tilt = self.side.sign() * HIT_TILT;
    }

    /// Per-tick animation blending at animation time `t`
    pub fn animate(&mut self, t: f32) {
        self.arm_swing += (self.target_arm_swing - self.arm_swing) * ARM_SMOOTH;
        self.target_arm_swing *= ARM_TARGET_DECAY;

        self.gait = Gait::from_distance(self.pos.distance(self.target));
        let (front, back) = self.gait.leg_angles(t);
        self.leg_angle1 = front;
        self.leg_angle2 = back;

        self.body_tilt *= POSE_DECAY;
        self.jump_height *= POSE_DECAY;
    }
}

/// Segment of the rectangular walking track, in travel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathSegment {
    /// z = -half width, moving +x
    Bottom,
    /// x = +half length, moving +z
    Right,
    /// z = +half width, moving -x
    Top,
    /// x = -half length, moving -z
    Left,
}

impl PathSegment {
    pub fn next(self) -> Self {
        match self {
            PathSegment::Bottom => PathSegment::Right,
            PathSegment::Right => PathSegment::Top,
            PathSegment::Top => PathSegment::Left,
            PathSegment::Left => PathSegment::Bottom,
        }
    }

    /// Facing angle while on this segment (degrees)
    pub fn facing(self) -> f32 {
        match self {
            PathSegment::Bottom => 90.0,
            PathSegment::Right => 0.0,
            PathSegment::Top => 270.0,
            PathSegment::Left => 180.0,
        }
    }
}

/// Walking pace, selects limb swing constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WalkerGait {
    #[default]
    Walking,
    Jogging,
}

impl WalkerGait {
    /// (frequency, leg amplitude, arm amplitude)
    pub fn swing(self) -> (f32, f32, f32) {
        match self {
            WalkerGait::Walking => (WALK_ANIM_FREQ, WALK_LEG_MAX, WALK_ARM_MAX),
            WalkerGait::Jogging => (JOG_ANIM_FREQ, JOG_LEG_MAX, JOG_ARM_MAX),
        }
    }
}

/// How a walker's position is driven
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WalkerRole {
    /// Follows the track by itself
    Lead,
    /// Walks beside walker `leader` at a fixed sideways offset
    Beside { leader: usize, offset: f32 },
}

/// A decorative person on the running track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkerAgent {
    pub pos: Vec2,
    /// Facing angle (degrees)
    pub angle: f32,
    pub speed: f32,
    pub leg_angle1: f32,
    pub leg_angle2: f32,
    pub arm_swing1: f32,
    pub arm_swing2: f32,
    pub segment: PathSegment,
    /// Fraction of the current segment covered, 0..=1
    pub progress: f32,
    pub gait: WalkerGait,
    pub role: WalkerRole,
}

impl WalkerAgent {
    pub fn new(pos: Vec2, segment: PathSegment) -> Self {
        Self {
            pos,
            angle: segment.facing(),
            speed: WALKER_SPEED,
            leg_angle1: 0.0,
            leg_angle2: 0.0,
            arm_swing1: 0.0,
            arm_swing2: 0.0,
            segment,
            progress: 0.0,
            gait: WalkerGait::default(),
            role: WalkerRole::Lead,
        }
    }

    pub fn with_role(mut self, role: WalkerRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_gait(mut self, gait: WalkerGait) -> Self {
        self.gait = gait;
        self
    }
}

/// A dog that trails a walker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    /// Index of the walker being followed
    pub owner: usize,
    pub pos: Vec2,
    /// Facing angle (degrees), copied from the owner
    pub angle: f32,
}

/// Rally bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RallyState {
    pub rally_count: u32,
    pub server: Side,
    pub paused: bool,
    /// Number of emergency ball resets so far
    pub emergency_resets: u32,
}

impl Default for RallyState {
    fn default() -> Self {
        Self {
            rally_count: 0,
            server: Side::Left,
            paused: false,
            emergency_resets: 0,
        }
    }
}

/// Things that happened during a tick, for hosts that want to react
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RallyEvent {
    PaddleHit { side: Side, rally_count: u32 },
    NetTouch,
    /// Ball rescued off the end wall behind `side`
    WallRescue { side: Side },
    /// Ball left the height bounds and was re-served by `server`
    EmergencyReset { server: Side },
}
