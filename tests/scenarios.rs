use glam::{Vec2, Vec3};
use pickleball_park::consts::*;
use pickleball_park::sim::{Ball, Gait, PathSegment, WalkerAgent};
use pickleball_park::RallySimulator;

fn sim_with_ball(pos: Vec3, vel: Vec3) -> RallySimulator {
    let mut sim = RallySimulator::new(42);
    sim.ball = Ball { pos, vel };
    sim
}

#[test]
fn test_first_tick_from_start_position() {
    let mut sim = RallySimulator::new(42);
    assert_eq!(sim.ball.pos, Vec3::new(-3.5, 1.5, 0.0));

    sim.tick();

    assert!((sim.ball.pos.x - (-3.42)).abs() < 1e-5);
    assert!((sim.ball.pos.y - 1.53).abs() < 1e-5);
    assert_eq!(sim.ball.pos.z, 0.0);
    assert!((sim.ball.vel.y - 0.022).abs() < 1e-6);
}

#[test]
fn test_ground_bounce_clamps_to_floor() {
    let mut sim = sim_with_ball(Vec3::new(-3.0, 0.1, 0.0), Vec3::new(0.0, -0.05, 0.0));
    sim.tick();

    assert_eq!(sim.ball.pos.y, FLOOR);
    // Gravity is applied before the bounce, so the reflected speed is
    // (0.05 + GRAVITY) * RESTITUTION.
    let falling = 0.05 + GRAVITY;
    assert!(sim.ball.vel.y > 0.0);
    assert!((sim.ball.vel.y - falling * RESTITUTION).abs() < 1e-6);
}

#[test]
fn test_net_touch_knocks_ball_back() {
    let mut sim = sim_with_ball(Vec3::new(-0.1, 0.5, 0.0), Vec3::new(0.02, 0.0, 0.0));
    sim.tick();

    assert!((sim.ball.vel.x - (-0.01)).abs() < 1e-6);
    assert_eq!(sim.ball.vel.y, NET_POP_VY);
    assert_eq!(sim.ball.pos.x, -NET_SNAP_X);
}

#[test]
fn test_player_settles_into_idle_sway() {
    // Ball parked deep on the right, drifting away from the left player
    let mut sim = sim_with_ball(Vec3::new(8.0, 3.0, 3.0), Vec3::new(0.0001, 0.0, 0.0));
    sim.players[0].pos = Vec2::new(-3.0, 0.0);

    sim.tick();
    assert_ne!(sim.players[0].gait, Gait::Idle);

    let mut settled = false;
    for _ in 0..60 {
        sim.tick();
        let left = &sim.players[0];
        if left.pos.distance(left.target) < WALK_THRESHOLD {
            assert_eq!(left.gait, Gait::Idle);
            assert!(left.leg_angle1.abs() <= IDLE_AMPLITUDE);
            assert!((left.leg_angle2 + left.leg_angle1 * IDLE_COUNTER_RATIO).abs() < 1e-5);
            settled = true;
            break;
        }
    }
    assert!(settled, "left player never reached the ready position");
}

#[test]
fn test_player_at_target_is_idle() {
    let mut sim = sim_with_ball(Vec3::new(8.0, 3.0, 3.0), Vec3::new(0.0001, 0.0, 0.0));
    sim.tick();
    let left = &sim.players[0];
    assert_eq!(left.pos, left.target);
    assert_eq!(left.gait, Gait::Idle);
}

#[test]
fn test_paused_ticks_change_nothing() {
    let mut sim = RallySimulator::new(7);
    for _ in 0..37 {
        sim.tick();
    }
    sim.set_paused(true);

    let before = sim.clone();
    let snapshot = sim.snapshot();
    for _ in 0..10 {
        sim.tick();
    }

    assert_eq!(sim.snapshot(), snapshot);
    assert_eq!(sim.ball, before.ball);
    assert_eq!(sim.players, before.players);
    assert_eq!(sim.walkers, before.walkers);
    assert_eq!(sim.companions, before.companions);
    assert_eq!(sim.rally, before.rally);
    assert_eq!(sim.environment, before.environment);
    assert_eq!(sim.anim_time, before.anim_time);
    assert_eq!(sim.time_ticks, before.time_ticks);
    assert_eq!(sim.events, before.events);
}

#[test]
fn test_walker_turns_the_corner_without_overshoot() {
    let walker = WalkerAgent::new(
        Vec2::new(TRACK_HALF_LENGTH - 1.0, -TRACK_HALF_WIDTH),
        PathSegment::Bottom,
    );
    let mut sim = RallySimulator::new(1).with_walkers(vec![walker], Vec::new());

    let mut ticks = 0;
    while sim.walkers[0].segment == PathSegment::Bottom {
        sim.tick();
        ticks += 1;
        assert!(ticks <= 30);
    }
    assert_eq!(sim.walkers[0].segment, PathSegment::Right);
    assert_eq!(sim.walkers[0].pos.x, TRACK_HALF_LENGTH);
}
