use crate::config::MatchConfig;
use crate::engine::FieldSize;
use crate::player::{MatchPlayer, PlayerRole};
use nalgebra::Vector2;
use rand::Rng;

/// Scripted targeting for AI-controlled players, kept as a pure function
/// over (role, team, world state). Priority order:
///   1. a teammate is on the ball -> run a fixed offset toward the opposing
///      goal from the player's own position (spreads support without
///      crowding the carrier);
///   2. goalkeeper -> hold the own goal line, tracking the ball vertically
///      inside a band around mid-height;
///   3. otherwise -> chase the ball.
///
/// The returned vector is the normalized direction scaled by the AI control
/// cost: slower while dribbling than while chasing. A zero offset to the
/// target normalizes to zero rather than NaN.
pub fn desired_velocity(
    player: &MatchPlayer,
    ball_position: Vector2<f32>,
    teammate_has_ball: bool,
    size: &FieldSize,
    config: &MatchConfig,
) -> Vector2<f32> {
    let target = if teammate_has_ball {
        Vector2::new(
            player.position.x + player.team.attack_sign() * config.support_offset,
            player.position.y,
        )
    } else if player.role == PlayerRole::Goalkeeper {
        let line_x = match player.team.attack_sign() {
            sign if sign > 0.0 => config.keeper_line_inset,
            _ => size.width - config.keeper_line_inset,
        };
        let mid = size.height / 2.0;

        Vector2::new(
            line_x,
            ball_position.y.clamp(mid - config.keeper_band, mid + config.keeper_band),
        )
    } else {
        ball_position
    };

    let direction = (target - player.position)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector2::zeros);

    let scale = if player.has_ball {
        config.ai_dribble_scale
    } else {
        config.ai_chase_scale
    };

    direction * scale
}

/// Per-tick shot attempt for an AI ball carrier: a uniform draw, taken only
/// inside shooting range of the opposing goal mouth.
pub fn wants_shot<R: Rng>(
    player: &MatchPlayer,
    goal_target: Vector2<f32>,
    config: &MatchConfig,
    rng: &mut R,
) -> bool {
    player.distance_to(goal_target) < config.ai_shot_range
        && rng.gen_range(0.0..1.0) < config.ai_shot_probability
}
