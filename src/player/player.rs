use crate::engine::FieldSize;
use nalgebra::Vector2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }

    /// Attack direction along the x axis: Home plays left-to-right.
    pub fn attack_sign(self) -> f32 {
        match self {
            Team::Home => 1.0,
            Team::Away => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerRole {
    Goalkeeper,
    Defender,
    Midfielder,
    Striker,
}

/// One roster entry. Built in batches of five per team at kickoff and never
/// destroyed mid-match; physics and AI mutate it every tick.
#[derive(Debug, Clone)]
pub struct MatchPlayer {
    pub id: u32,
    pub team: Team,
    pub role: PlayerRole,

    pub position: Vector2<f32>,
    pub start_position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub radius: f32,

    // Attribute multipliers carried in the roster data; strikers run at 1.1.
    pub speed: f32,
    pub control: f32,
    pub power: f32,

    pub has_ball: bool,
    pub kick_cooldown: u32,
    pub is_human: bool,
}

impl MatchPlayer {
    pub fn new(
        id: u32,
        team: Team,
        role: PlayerRole,
        position: Vector2<f32>,
        radius: f32,
        is_human: bool,
    ) -> Self {
        MatchPlayer {
            id,
            team,
            role,
            position,
            start_position: position,
            velocity: Vector2::zeros(),
            radius,
            speed: if role == PlayerRole::Striker { 1.1 } else { 1.0 },
            control: 1.0,
            power: 1.0,
            has_ball: false,
            kick_cooldown: 0,
            is_human,
        }
    }

    /// Steering input for one tick: accelerate along `direction`, cap the
    /// resulting speed, integrate, then bleed velocity through friction.
    pub fn apply_steering(
        &mut self,
        direction: Vector2<f32>,
        accel: f32,
        max_speed: f32,
        friction: f32,
    ) {
        self.velocity += direction * accel;
        self.velocity = self.velocity.cap_magnitude(max_speed);

        self.position += self.velocity;
        self.velocity *= friction;
    }

    /// Keep the player on the pitch, inset by their own radius.
    pub fn clamp_to_field(&mut self, size: &FieldSize) {
        self.position.x = self.position.x.clamp(self.radius, size.width - self.radius);
        self.position.y = self.position.y.clamp(self.radius, size.height - self.radius);
    }

    pub fn tick_cooldown(&mut self) {
        if self.kick_cooldown > 0 {
            self.kick_cooldown -= 1;
        }
    }

    pub fn current_speed(&self) -> f32 {
        self.velocity.norm()
    }

    pub fn distance_to(&self, point: Vector2<f32>) -> f32 {
        (self.position - point).norm()
    }
}
