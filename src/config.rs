use serde::Deserialize;
use thiserror::Error;

/// Players per side. The engine always fields two of these squads.
pub const SQUAD_SIZE: usize = 5;

pub const ROSTER_SIZE: usize = SQUAD_SIZE * 2;

/// Tunables for a single match instance. Externally overridable (the whole
/// struct deserializes), but frozen once the engine is constructed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub goal_width: f32,

    pub player_radius: f32,
    pub ball_radius: f32,

    pub ball_friction: f32,
    pub player_friction: f32,
    pub player_accel: f32,
    pub player_max_speed: f32,
    pub sprint_multiplier: f32,

    pub kick_power: f32,
    pub kick_cooldown: u32,
    /// Ball rides this many velocity-lengths ahead of the dribbling player.
    pub dribble_lead: f32,
    /// Below this speed a human kick aims at the goal mouth instead of
    /// following the kicker's heading.
    pub min_heading_speed: f32,

    pub ai_dribble_scale: f32,
    pub ai_chase_scale: f32,
    pub ai_shot_range: f32,
    pub ai_shot_probability: f32,
    /// How far ahead of their own position supporting AI players run when a
    /// teammate is on the ball.
    pub support_offset: f32,
    /// Goalkeeper holding line, measured from the own goal line.
    pub keeper_line_inset: f32,
    /// Goalkeepers track the ball vertically within mid-height plus/minus
    /// this band.
    pub keeper_band: f32,

    /// Kickoff layout: first line (goalkeeper) inset from the goal line and
    /// spacing between successive lines.
    pub formation_inset: f32,
    pub formation_spacing: f32,
    /// Outfield players slide this far toward their own half after a goal.
    pub post_goal_nudge: f32,

    /// Match length in seconds of simulated time.
    pub match_duration: f32,
    /// Goal celebration length before play resumes, in ticks.
    pub goal_reset_delay_ticks: u64,

    pub particle_burst: usize,
    pub particle_decay: f32,
    pub particle_spread: f32,

    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            field_width: 1200.0,
            field_height: 800.0,
            goal_width: 200.0,
            player_radius: 18.0,
            ball_radius: 8.0,
            ball_friction: 0.97,
            player_friction: 0.9,
            player_accel: 0.8,
            player_max_speed: 6.0,
            sprint_multiplier: 1.2,
            kick_power: 18.0,
            kick_cooldown: 30,
            dribble_lead: 2.0,
            min_heading_speed: 0.1,
            ai_dribble_scale: 0.8,
            ai_chase_scale: 0.9,
            ai_shot_range: 250.0,
            ai_shot_probability: 0.05,
            support_offset: 100.0,
            keeper_line_inset: 50.0,
            keeper_band: 100.0,
            formation_inset: 100.0,
            formation_spacing: 150.0,
            post_goal_nudge: 50.0,
            match_duration: 180.0,
            goal_reset_delay_ticks: 120,
            particle_burst: 5,
            particle_decay: 0.05,
            particle_spread: 5.0,
            seed: 0,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "field dimensions must be positive",
            ));
        }

        if self.goal_width <= 0.0 || self.goal_width > self.field_height {
            return Err(EngineError::InvalidConfig(
                "goal mouth must be positive and fit the field height",
            ));
        }

        if self.player_radius <= 0.0 || self.ball_radius <= 0.0 {
            return Err(EngineError::InvalidConfig("entity radii must be positive"));
        }

        if !(0.0..1.0).contains(&self.ball_friction)
            || !(0.0..1.0).contains(&self.player_friction)
        {
            return Err(EngineError::InvalidConfig(
                "friction coefficients must lie in [0, 1)",
            ));
        }

        if self.player_max_speed <= 0.0 || self.player_accel <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "player acceleration and max speed must be positive",
            ));
        }

        if self.kick_power <= 0.0 {
            return Err(EngineError::InvalidConfig("kick power must be positive"));
        }

        if !(0.0..=1.0).contains(&self.ai_shot_probability) {
            return Err(EngineError::InvalidConfig(
                "shot probability must lie in [0, 1]",
            ));
        }

        if self.match_duration <= 0.0 {
            return Err(EngineError::InvalidConfig("match duration must be positive"));
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("roster must contain {expected} players, got {actual}")]
    RosterSize { expected: usize, actual: usize },
}
