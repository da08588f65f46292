//! Running-track walkers
//!
//! Walkers move along a rectangle around the court at a fixed offset. Lead
//! walkers drive themselves; `Beside` walkers copy their leader every tick;
//! companions trail a walker.

use glam::Vec2;

use super::state::{Companion, PathSegment, WalkerAgent, WalkerGait, WalkerRole};
use crate::consts::*;
use crate::{heading_offset, oscillate};

/// Limb swing for the walker's gait at animation time `t`
pub fn swing_limbs(walker: &mut WalkerAgent, t: f32) {
    let (freq, leg_max, arm_max) = walker.gait.swing();
    walker.leg_angle1 = oscillate(t, freq, leg_max);
    walker.leg_angle2 = -walker.leg_angle1;
    walker.arm_swing1 = oscillate(t, freq, arm_max);
    walker.arm_swing2 = -walker.arm_swing1;
}

/// Move a walker along its current segment by its speed
///
/// Crossing the far end of a segment switches to the next one and snaps the
/// travel coordinate to the corner.
pub fn advance_on_track(walker: &mut WalkerAgent) {
    walker.angle = walker.segment.facing();
    match walker.segment {
        PathSegment::Bottom => {
            walker.pos.x += walker.speed;
            if walker.pos.x >= TRACK_HALF_LENGTH {
                walker.segment = PathSegment::Right;
                walker.pos.x = TRACK_HALF_LENGTH;
            }
        }
        PathSegment::Right => {
            walker.pos.y += walker.speed;
            if walker.pos.y >= TRACK_HALF_WIDTH {
                walker.segment = PathSegment::Top;
                walker.pos.y = TRACK_HALF_WIDTH;
            }
        }
        PathSegment::Top => {
            walker.pos.x -= walker.speed;
            if walker.pos.x <= -TRACK_HALF_LENGTH {
                walker.segment = PathSegment::Left;
                walker.pos.x = -TRACK_HALF_LENGTH;
            }
        }
        PathSegment::Left => {
            walker.pos.y -= walker.speed;
            if walker.pos.y <= -TRACK_HALF_WIDTH {
                walker.segment = PathSegment::Bottom;
                walker.pos.y = -TRACK_HALF_WIDTH;
            }
        }
    }
    walker.progress = segment_progress(walker.segment, walker.pos);
}

/// Fraction of `segment` covered at `pos`, 0..=1
pub fn segment_progress(segment: PathSegment, pos: Vec2) -> f32 {
    let fraction = match segment {
        PathSegment::Bottom => (pos.x + TRACK_HALF_LENGTH) / (2.0 * TRACK_HALF_LENGTH),
        PathSegment::Right => (pos.y + TRACK_HALF_WIDTH) / (2.0 * TRACK_HALF_WIDTH),
        PathSegment::Top => (TRACK_HALF_LENGTH - pos.x) / (2.0 * TRACK_HALF_LENGTH),
        PathSegment::Left => (TRACK_HALF_WIDTH - pos.y) / (2.0 * TRACK_HALF_WIDTH),
    };
    fraction.clamp(0.0, 1.0)
}

/// Sideways offset for a walker beside a leader on `segment`
///
/// Each segment has its own case; the offset flips axis at the corners
/// instead of rotating through them.
pub fn beside_offset(segment: PathSegment, offset: f32) -> Vec2 {
    match segment {
        PathSegment::Bottom => Vec2::new(0.0, offset),
        PathSegment::Right => Vec2::new(offset, 0.0),
        PathSegment::Top => Vec2::new(0.0, -offset),
        PathSegment::Left => Vec2::new(-offset, 0.0),
    }
}

/// Snap `follower` beside `leader`, matching segment and heading
pub fn follow_beside(follower: &mut WalkerAgent, leader: &WalkerAgent, offset: f32) {
    follower.segment = leader.segment;
    follower.angle = leader.angle;
    follower.pos = leader.pos + beside_offset(leader.segment, offset);
    follower.progress = leader.progress;
}

/// Place a companion behind and to the side of its owner
pub fn follow_owner(companion: &mut Companion, owner: &WalkerAgent) {
    companion.pos = owner.pos - heading_offset(DOG_DISTANCE, owner.angle - DOG_BEARING);
    companion.angle = owner.angle;
}

/// Advance every walker and companion by one tick
pub fn update_walkers(walkers: &mut [WalkerAgent], companions: &mut [Companion], t: f32) {
    for walker in walkers.iter_mut() {
        swing_limbs(walker, t);
        if walker.role == WalkerRole::Lead {
            advance_on_track(walker);
        }
    }

    for i in 0..walkers.len() {
        if let WalkerRole::Beside { leader, offset } = walkers[i].role {
            if let Some(lead) = walkers.get(leader).copied() {
                follow_beside(&mut walkers[i], &lead, offset);
            }
        }
    }

    for companion in companions.iter_mut() {
        if let Some(owner) = walkers.get(companion.owner) {
            follow_owner(companion, owner);
        }
    }
}

/// The park's regular visitors: a dog walker, a couple and a solo walker
pub fn default_roster(gait: WalkerGait) -> (Vec<WalkerAgent>, Vec<Companion>) {
    let walkers = vec![
        WalkerAgent::new(
            Vec2::new(-TRACK_HALF_LENGTH, -TRACK_HALF_WIDTH),
            PathSegment::Left,
        )
        .with_gait(gait),
        WalkerAgent::new(
            Vec2::new(TRACK_HALF_LENGTH, -HALF_WIDTH - TRACK_MIDDLE + COUPLE_OFFSET),
            PathSegment::Bottom,
        )
        .with_gait(gait),
        WalkerAgent::new(
            Vec2::new(TRACK_HALF_LENGTH, -HALF_WIDTH - TRACK_MIDDLE - COUPLE_OFFSET),
            PathSegment::Bottom,
        )
        .with_gait(gait)
        .with_role(WalkerRole::Beside {
            leader: 1,
            offset: COUPLE_OFFSET,
        }),
        WalkerAgent::new(
            Vec2::new(-TRACK_HALF_LENGTH, TRACK_HALF_WIDTH),
            PathSegment::Top,
        )
        .with_gait(gait),
    ];

    let owner = &walkers[0];
    let companions = vec![Companion {
        owner: 0,
        pos: owner.pos + Vec2::new(DOG_DISTANCE, 0.0),
        angle: owner.angle,
    }];

    (walkers, companions)
}
