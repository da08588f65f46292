//! Ball collision response
//!
//! Each check mutates the ball in place and reports whether it fired. The
//! responses are arcade rescues rather than physical contacts: the rally is
//! never allowed to end, so every boundary pushes the ball back into play.

use glam::Vec3;

use super::state::{Ball, Side};
use crate::consts::*;

/// Bounce off the court surface. Fires only while the ball is falling.
pub fn ground_bounce(ball: &mut Ball) -> bool {
    if ball.pos.y < FLOOR && ball.vel.y < 0.0 {
        ball.pos.y = FLOOR;
        ball.vel.y = -ball.vel.y * RESTITUTION;
        return true;
    }
    false
}

/// Knock the ball back off the net slab at x = 0
///
/// The ball is snapped to the side of the net it is currently on, so the
/// net touch always returns it to that court half.
pub fn net_collision(ball: &mut Ball) -> bool {
    if ball.pos.x.abs() < NET_THRESHOLD && ball.pos.y < NET_HEIGHT && ball.pos.y > 0.0 {
        ball.vel.x *= NET_DAMPING;
        ball.vel.y = NET_POP_VY;
        ball.pos.x = if ball.pos.x > 0.0 { NET_SNAP_X } else { -NET_SNAP_X };
        return true;
    }
    false
}

/// Keep the ball inside the court width with a soft inward bounce
pub fn side_wall_bounce(ball: &mut Ball) -> bool {
    let limit = HALF_WIDTH - SIDE_WALL_MARGIN;
    if ball.pos.z.abs() > limit {
        let sign = if ball.pos.z > 0.0 { 1.0 } else { -1.0 };
        ball.pos.z = sign * limit;
        ball.vel.z *= SIDE_WALL_DAMPING;
        return true;
    }
    false
}

/// Send a ball that got past a baseline back toward the middle
///
/// Returns the side whose end wall was hit.
pub fn end_wall_rescue(ball: &mut Ball) -> Option<Side> {
    if ball.pos.x < -HALF_LENGTH {
        ball.pos.x = -HALF_LENGTH + END_WALL_INSET;
        ball.vel.x = ball.vel.x.abs() * END_WALL_DAMPING;
        ball.vel.y = END_WALL_POP_VY;
        return Some(Side::Left);
    }
    if ball.pos.x > HALF_LENGTH {
        ball.pos.x = HALF_LENGTH - END_WALL_INSET;
        ball.vel.x = -ball.vel.x.abs() * END_WALL_DAMPING;
        ball.vel.y = END_WALL_POP_VY;
        return Some(Side::Right);
    }
    None
}

/// Ball height is outside anything the tuning can produce
pub fn out_of_height_bounds(ball: &Ball) -> bool {
    ball.pos.y > EMERGENCY_MAX_Y || ball.pos.y < EMERGENCY_MIN_Y
}

/// Ball is within hitting distance of a paddle
pub fn paddle_contact(ball: &Ball, paddle: Vec3) -> bool {
    ball.pos.distance(paddle) < PADDLE_HIT_RADIUS
}
