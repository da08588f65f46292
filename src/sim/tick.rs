//! Fixed timestep simulation tick
//!
//! One call to [`RallySimulator::tick`] per rendered frame. The tuned
//! constants assume a ~16 ms cadence; hosts must not scale steps by wall
//! clock time.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision;
use super::snapshot::{BallPose, CompanionPose, PlayerPose, SceneSnapshot, WalkerPose};
use super::state::{
    Ball, Companion, PlayerAgent, RallyEvent, RallyState, Side, WalkerAgent, WalkerGait,
};
use super::walkers;
use crate::consts::*;
use crate::environment::Environment;
use crate::settings::Settings;

/// Host commands (keyboard or UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    TogglePause,
    WindUp,
    WindDown,
    TimeForward,
    TimeBack,
}

/// Owns the ball, both players, the track walkers and the rally bookkeeping
#[derive(Debug, Clone)]
pub struct RallySimulator {
    pub ball: Ball,
    /// Left player first, then right
    pub players: [PlayerAgent; 2],
    pub walkers: Vec<WalkerAgent>,
    pub companions: Vec<Companion>,
    pub rally: RallyState,
    pub environment: Environment,
    /// Oscillator phase for limb animation
    pub anim_time: f32,
    /// Unpaused ticks so far
    pub time_ticks: u64,
    /// Events from the most recent unpaused tick
    pub events: Vec<RallyEvent>,
    rng: Pcg32,
}

impl RallySimulator {
    /// A park with the default walkers and a seeded rally
    pub fn new(seed: u64) -> Self {
        let (walkers, companions) = walkers::default_roster(WalkerGait::Walking);
        Self {
            ball: Ball::default(),
            players: [PlayerAgent::new(Side::Left), PlayerAgent::new(Side::Right)],
            walkers,
            companions,
            rally: RallyState::default(),
            environment: Environment::default(),
            anim_time: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut sim = Self::new(settings.seed);
        if settings.jogging_walkers {
            for walker in &mut sim.walkers {
                walker.gait = WalkerGait::Jogging;
            }
        }
        sim.environment = Environment::new(settings.time_of_day, settings.wind_strength);
        sim.rally.paused = settings.start_paused;
        sim
    }

    /// Replace the track population
    pub fn with_walkers(mut self, walkers: Vec<WalkerAgent>, companions: Vec<Companion>) -> Self {
        self.walkers = walkers;
        self.companions = companions;
        self
    }

    pub fn player(&self, side: Side) -> &PlayerAgent {
        match side {
            Side::Left => &self.players[0],
            Side::Right => &self.players[1],
        }
    }

    pub fn is_paused(&self) -> bool {
        self.rally.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.rally.paused != paused {
            log::info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.rally.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.rally.paused);
    }

    /// Apply a host command. Works while paused.
    pub fn apply(&mut self, command: HostCommand) {
        match command {
            HostCommand::TogglePause => self.toggle_pause(),
            HostCommand::WindUp => {
                self.environment.wind_up();
                log::info!("Wind strength: {:.1}", self.environment.wind_strength);
            }
            HostCommand::WindDown => {
                self.environment.wind_down();
                log::info!("Wind strength: {:.1}", self.environment.wind_strength);
            }
            HostCommand::TimeForward => {
                self.environment.advance_time();
                log::info!("Time of day: {:.2}", self.environment.time_of_day);
            }
            HostCommand::TimeBack => {
                self.environment.retreat_time();
                log::info!("Time of day: {:.2}", self.environment.time_of_day);
            }
        }
    }

    /// Advance everything by one fixed step. Does nothing while paused.
    pub fn tick(&mut self) {
        if self.rally.paused {
            return;
        }

        self.events.clear();
        self.time_ticks += 1;
        self.anim_time += ANIM_TIME_STEP;
        self.environment.tick();

        self.ball.integrate();
        for player in &mut self.players {
            player.steer(&self.ball);
        }
        self.check_paddle_hits();
        self.resolve_boundaries();

        let t = self.anim_time;
        for player in &mut self.players {
            player.animate(t);
        }

        walkers::update_walkers(&mut self.walkers, &mut self.companions, t);
    }

    /// Hit checks for both players against paddle positions taken before either fires
    fn check_paddle_hits(&mut self) {
        let paddles = [
            self.players[0].paddle_position(),
            self.players[1].paddle_position(),
        ];

        for (player, paddle) in self.players.iter_mut().zip(paddles) {
            let side = player.side;
            let approaching = side.is_incoming(self.ball.vel.x)
                && self.ball.pos.x * side.sign() > HIT_GATE_X;
            if !approaching || !collision::paddle_contact(&self.ball, paddle) {
                continue;
            }

            self.ball.pos.x = paddle.x - side.sign() * HIT_CLEARANCE;
            self.ball.vel = return_velocity(&mut self.rng, side);
            self.rally.rally_count += 1;
            player.trigger_hit();

            log::debug!("Player {} hit, rally {}", side.number(), self.rally.rally_count);
            self.events.push(RallyEvent::PaddleHit {
                side,
                rally_count: self.rally.rally_count,
            });
        }
    }

    fn resolve_boundaries(&mut self) {
        collision::ground_bounce(&mut self.ball);

        if collision::net_collision(&mut self.ball) {
            log::debug!("Net touch, rally continues");
            self.events.push(RallyEvent::NetTouch);
        }

        collision::side_wall_bounce(&mut self.ball);

        if let Some(side) = collision::end_wall_rescue(&mut self.ball) {
            log::debug!("Ball rescued off the {:?} end wall", side);
            self.events.push(RallyEvent::WallRescue { side });
        }

        if collision::out_of_height_bounds(&self.ball) {
            self.emergency_reset();
        }
    }

    /// Re-serve from the current server and hand the serve to the other side
    fn emergency_reset(&mut self) {
        let server = self.rally.server;
        log::warn!(
            "Emergency reset: ball at height {:.2}, re-serving from player {}",
            self.ball.pos.y,
            server.number()
        );
        self.ball.serve_from(server);
        self.rally.server = server.opponent();
        self.rally.emergency_resets += 1;
        self.events.push(RallyEvent::EmergencyReset { server });
    }

    /// Pose data for the current frame
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            tick: self.time_ticks,
            ball: BallPose::from(&self.ball),
            players: [
                PlayerPose::new(&self.players[0], self.ball.pos),
                PlayerPose::new(&self.players[1], self.ball.pos),
            ],
            walkers: self.walkers.iter().map(WalkerPose::from).collect(),
            companions: self.companions.iter().map(CompanionPose::from).collect(),
            rally_count: self.rally.rally_count,
            server: self.rally.server.number(),
            paused: self.rally.paused,
            time_of_day: self.environment.time_of_day,
            wind_strength: self.environment.wind_strength,
            wind_time: self.environment.wind_time,
            lighting: self.environment.lighting_phase(),
            sun_position: self.environment.sun_position(),
            lamps_lit: self.environment.lamps_lit(),
        }
    }
}

/// Velocity for a ball hit by `hitter`, aimed at the other side with jitter
fn return_velocity(rng: &mut Pcg32, hitter: Side) -> Vec3 {
    let toward = -hitter.sign();
    let vx = HIT_VX_BASE + rng.random_range(0..HIT_VX_STEPS) as f32 * HIT_VX_STEP;
    let vy = HIT_VY_BASE + rng.random_range(0..HIT_VY_STEPS) as f32 * HIT_VY_STEP;
    let vz = (rng.random_range(0..HIT_VZ_STEPS) - HIT_VZ_CENTER) as f32 * HIT_VZ_STEP;
    Vec3::new(toward * vx, vy, vz)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ball placed so the left player's paddle meets it this tick
    fn sim_with_ball_at_left_paddle() -> RallySimulator {
        let mut sim = RallySimulator::new(12345);
        sim.ball = Ball {
            pos: Vec3::new(-4.3, 1.2, 0.0),
            vel: Vec3::new(-0.05, 0.0, 0.0),
        };
        sim
    }

    #[test]
    fn test_paddle_hit_returns_ball() {
        let mut sim = sim_with_ball_at_left_paddle();
        sim.tick();

        assert_eq!(sim.rally.rally_count, 1);
        assert!(sim.ball.vel.x >= HIT_VX_BASE);
        assert!(sim.ball.vel.x < HIT_VX_BASE + HIT_VX_STEPS as f32 * HIT_VX_STEP);
        assert!(sim.ball.vel.y >= HIT_VY_BASE);
        assert!(sim.ball.vel.z.abs() <= 0.02 + 1e-6);
        assert_eq!(
            sim.events,
            vec![RallyEvent::PaddleHit {
                side: Side::Left,
                rally_count: 1
            }]
        );

        // Ball sits in front of the paddle, toward the net
        let left = sim.player(Side::Left);
        assert!(sim.ball.pos.x > left.pos.x);
        // Swing, jump and lean were triggered and have blended for one tick
        assert!((left.target_arm_swing - HIT_ARM_SWING * ARM_TARGET_DECAY).abs() < 1e-3);
        assert!((left.jump_height - HIT_JUMP * POSE_DECAY).abs() < 1e-6);
        assert!(left.body_tilt < 0.0);
    }

    #[test]
    fn test_right_paddle_hit_returns_ball() {
        let mut sim = RallySimulator::new(12345);
        sim.ball = Ball {
            pos: Vec3::new(4.3, 1.2, 0.0),
            vel: Vec3::new(0.05, 0.0, 0.0),
        };
        sim.tick();

        assert_eq!(sim.rally.rally_count, 1);
        assert!(sim.ball.vel.x <= -HIT_VX_BASE);
        assert_eq!(
            sim.events,
            vec![RallyEvent::PaddleHit {
                side: Side::Right,
                rally_count: 1
            }]
        );

        let right = sim.player(Side::Right);
        assert!(sim.ball.pos.x < right.pos.x);
        assert!(right.body_tilt > 0.0);
    }

    #[test]
    fn test_no_hit_before_ball_crosses_gate() {
        let mut sim = RallySimulator::new(1);
        sim.players[0].pos.x = -1.0;
        sim.ball = Ball {
            pos: Vec3::new(-0.3, 1.2, 0.0),
            vel: Vec3::new(-0.01, 0.0, 0.0),
        };
        sim.tick();
        assert_eq!(sim.rally.rally_count, 0);
        assert!(sim.ball.vel.x < 0.0);
    }

    #[test]
    fn test_outgoing_ball_not_hit() {
        let mut sim = sim_with_ball_at_left_paddle();
        sim.ball.vel.x = 0.05;
        sim.tick();
        assert_eq!(sim.rally.rally_count, 0);
    }

    #[test]
    fn test_emergency_reset_alternates_server() {
        let mut sim = RallySimulator::new(1);
        sim.ball = Ball {
            pos: Vec3::new(-3.0, 7.0, 0.0),
            vel: Vec3::new(0.01, 0.0, 0.0),
        };
        sim.tick();
        assert_eq!(sim.rally.emergency_resets, 1);
        assert_eq!(sim.rally.server, Side::Right);
        assert_eq!(sim.ball.pos, Vec3::new(-SERVE_X, SERVE_Y, 0.0));
        assert_eq!(sim.ball.vel, Vec3::new(SERVE_VX, SERVE_VY, 0.0));
        assert_eq!(
            sim.events,
            vec![RallyEvent::EmergencyReset { server: Side::Left }]
        );

        sim.ball.pos.y = 8.0;
        sim.ball.vel = Vec3::ZERO;
        sim.tick();
        assert_eq!(sim.rally.emergency_resets, 2);
        assert_eq!(sim.rally.server, Side::Left);
        assert_eq!(sim.ball.pos, Vec3::new(SERVE_X, SERVE_Y, 0.0));
        assert!(sim.ball.vel.x < 0.0);
    }

    #[test]
    fn test_events_cleared_each_tick() {
        let mut sim = RallySimulator::new(1);
        sim.ball = Ball {
            pos: Vec3::new(-3.0, 7.0, 0.0),
            vel: Vec3::ZERO,
        };
        sim.tick();
        assert_eq!(sim.events.len(), 1);
        sim.tick();
        assert!(sim.events.is_empty());
    }

    #[test]
    fn test_end_wall_rescue_event() {
        let mut sim = RallySimulator::new(1);
        sim.ball = Ball {
            pos: Vec3::new(10.0, 3.0, 0.0),
            vel: Vec3::new(0.2, 0.0, 0.0),
        };
        sim.tick();
        assert_eq!(sim.ball.pos.x, HALF_LENGTH - END_WALL_INSET);
        assert!(sim.ball.vel.x < 0.0);
        assert!(sim
            .events
            .contains(&RallyEvent::WallRescue { side: Side::Right }));
    }

    #[test]
    fn test_host_commands() {
        let mut sim = RallySimulator::new(1);
        sim.apply(HostCommand::TogglePause);
        assert!(sim.is_paused());

        // Cosmetic scalars still respond while paused
        sim.apply(HostCommand::WindUp);
        assert!((sim.environment.wind_strength - 1.1).abs() < 1e-5);
        sim.apply(HostCommand::WindDown);
        sim.apply(HostCommand::WindDown);
        assert!((sim.environment.wind_strength - 0.9).abs() < 1e-5);
        sim.apply(HostCommand::TimeForward);
        assert!((sim.environment.time_of_day - 0.52).abs() < 1e-5);
        sim.apply(HostCommand::TimeBack);
        assert!((sim.environment.time_of_day - 0.5).abs() < 1e-5);

        sim.apply(HostCommand::TogglePause);
        assert!(!sim.is_paused());
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            seed: 3,
            wind_strength: 2.0,
            time_of_day: 0.1,
            start_paused: true,
            jogging_walkers: true,
        };
        let sim = RallySimulator::from_settings(&settings);
        assert!(sim.is_paused());
        assert_eq!(sim.environment.wind_strength, 2.0);
        assert_eq!(sim.snapshot().lighting, crate::LightingPhase::Night);
        assert!(sim.walkers.iter().all(|w| w.gait == WalkerGait::Jogging));
    }

    #[test]
    fn test_determinism() {
        // Two simulators with the same seed produce identical frames
        let mut sim1 = RallySimulator::new(99999);
        let mut sim2 = RallySimulator::new(99999);

        for _ in 0..2_000 {
            sim1.tick();
            sim2.tick();
        }

        assert_eq!(sim1.snapshot(), sim2.snapshot());
        assert_eq!(sim1.rally, sim2.rally);
    }

    #[test]
    fn test_walkers_and_wind_advance_with_ticks() {
        let mut sim = RallySimulator::new(1);
        let before = sim.snapshot();
        sim.tick();
        let after = sim.snapshot();
        assert_ne!(before.walkers, after.walkers);
        assert!(after.wind_time > before.wind_time);
        assert_eq!(after.tick, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let sim = RallySimulator::new(1);
        let json = serde_json::to_string(&sim.snapshot()).unwrap();
        assert!(json.contains("\"rally_count\":0"));
        assert!(json.contains("\"companions\""));
        assert!(json.contains("\"facing\""));
    }

    #[test]
    fn test_snapshot_carries_scene_state() {
        let mut sim = RallySimulator::from_settings(&Settings {
            time_of_day: 0.9,
            ..Default::default()
        });
        sim.tick();
        let snap = sim.snapshot();

        assert!(snap.lamps_lit);
        assert_eq!(snap.sun_position, sim.environment.sun_position());
        assert_eq!(snap.players[0].facing, sim.players[0].facing(sim.ball.pos));
        assert_eq!(snap.players[1].facing, sim.players[1].facing(sim.ball.pos));

        sim.environment = Environment::new(0.5, 1.0);
        assert!(!sim.snapshot().lamps_lit);
    }
}
