use crate::ball::events::BallEvent;
use crate::config::MatchConfig;
use crate::engine::{FieldSize, GoalMouths};
use crate::events::EventCollection;
use crate::player::MatchPlayer;
use nalgebra::Vector2;

/// The match ball. While a player holds it, `follow` glues it ahead of the
/// holder and it does not integrate on its own.
#[derive(Debug, Clone)]
pub struct Ball {
    pub position: Vector2<f32>,
    pub start_position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub radius: f32,
    /// Multiplicative per-tick velocity decay, < 1.
    pub friction: f32,
    /// 0 = grounded. Reserved for aerial play; ground-only physics never
    /// raises it.
    pub height: f32,
}

impl Ball {
    pub fn with_coord(config: &MatchConfig) -> Self {
        let center = Vector2::new(config.field_width / 2.0, config.field_height / 2.0);

        Ball {
            position: center,
            start_position: center,
            velocity: Vector2::zeros(),
            radius: config.ball_radius,
            friction: config.ball_friction,
            height: 0.0,
        }
    }

    /// Free-ball kinematics for one tick: integrate, decay, then resolve the
    /// field boundary. A goal inside the mouth band emits `BallEvent::Goal`
    /// and leaves the ball where it crossed; a wall contact reflects the
    /// offending velocity component.
    pub fn update(&mut self, goals: &GoalMouths, size: &FieldSize, events: &mut EventCollection) {
        self.position += self.velocity;
        self.velocity *= self.friction;

        if self.position.y < 0.0 || self.position.y > size.height {
            self.velocity.y = -self.velocity.y;
        }

        if self.position.x <= 0.0 || self.position.x >= size.width {
            if let Some(team) = goals.scoring_team(self.position) {
                events.add_ball_event(BallEvent::Goal(team));
                return;
            }

            self.velocity.x = -self.velocity.x;
        }
    }

    /// Dribble glue: ride a small lead ahead of the holder along their
    /// velocity, inheriting it.
    pub fn follow(&mut self, holder: &MatchPlayer, lead: f32) {
        self.position = holder.position + holder.velocity * lead;
        self.velocity = holder.velocity;
    }

    pub fn reset(&mut self) {
        self.position = self.start_position;
        self.velocity = Vector2::zeros();
        self.height = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Ball, GoalMouths, FieldSize) {
        let config = MatchConfig::default();
        (
            Ball::with_coord(&config),
            GoalMouths::from_config(&config),
            FieldSize::new(config.field_width, config.field_height),
        )
    }

    #[test]
    fn test_friction_decays_velocity() {
        let (mut ball, goals, size) = setup();
        let mut events = EventCollection::new();
        ball.velocity = Vector2::new(10.0, 0.0);

        ball.update(&goals, &size, &mut events);

        assert_eq!(ball.position.x, 610.0);
        assert!((ball.velocity.x - 9.7).abs() < 1e-4);
    }

    #[test]
    fn test_vertical_wall_reflects() {
        let (mut ball, goals, size) = setup();
        let mut events = EventCollection::new();
        ball.position = Vector2::new(600.0, 2.0);
        ball.velocity = Vector2::new(0.0, -5.0);

        ball.update(&goals, &size, &mut events);

        assert!(ball.velocity.y > 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_goal_line_inside_band_scores() {
        let (mut ball, goals, size) = setup();
        let mut events = EventCollection::new();
        // Lands exactly on the away goal line at mid-height.
        ball.position = Vector2::new(1195.0, 400.0);
        ball.velocity = Vector2::new(5.0, 0.0);

        ball.update(&goals, &size, &mut events);

        assert!(events.has_goal());
    }

    #[test]
    fn test_outside_band_reflects_instead() {
        let (mut ball, goals, size) = setup();
        let mut events = EventCollection::new();
        // One unit above the goal mouth band (band is 300..=500 in y).
        ball.position = Vector2::new(1195.0, 299.0);
        ball.velocity = Vector2::new(6.0, 0.0);

        ball.update(&goals, &size, &mut events);

        assert!(events.is_empty());
        assert!(ball.velocity.x < 0.0);
    }

    #[test]
    fn test_follow_leads_the_holder() {
        let config = MatchConfig::default();
        let mut ball = Ball::with_coord(&config);
        let mut holder = MatchPlayer::new(
            1,
            crate::player::Team::Home,
            crate::player::PlayerRole::Striker,
            Vector2::new(100.0, 100.0),
            18.0,
            true,
        );
        holder.velocity = Vector2::new(3.0, 0.0);

        ball.follow(&holder, config.dribble_lead);

        assert_eq!(ball.position, Vector2::new(106.0, 100.0));
        assert_eq!(ball.velocity, holder.velocity);
    }
}
