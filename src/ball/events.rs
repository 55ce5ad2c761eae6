use crate::player::Team;

/// Side-effect requests raised during the ball phase. A goal suspends the
/// rest of the tick: no player physics, AI or clock runs after one fires.
#[derive(Debug, Clone, Copy)]
pub enum BallEvent {
    /// The ball crossed a goal line inside the goal mouth; carries the
    /// scoring team.
    Goal(Team),
}
