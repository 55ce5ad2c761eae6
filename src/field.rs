use crate::ball::Ball;
use crate::config::{EngineError, MatchConfig, ROSTER_SIZE};
use crate::engine::FieldSize;
use crate::particles::ParticleField;
use crate::player::{MatchPlayer, PlayerRole, Team};
use nalgebra::Vector2;

/// Everything the simulation step owns and mutates each tick: the ball, the
/// fixed ten-player roster, and the cosmetic particle list.
pub struct MatchField {
    pub size: FieldSize,
    pub ball: Ball,
    pub players: Vec<MatchPlayer>,
    pub particles: ParticleField,
}

impl MatchField {
    pub fn new(config: &MatchConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let players = setup_players(config);
        if players.len() != ROSTER_SIZE {
            return Err(EngineError::RosterSize {
                expected: ROSTER_SIZE,
                actual: players.len(),
            });
        }

        Ok(MatchField {
            size: FieldSize::new(config.field_width, config.field_height),
            ball: Ball::with_coord(config),
            players,
            particles: ParticleField::new(),
        })
    }

    /// Full kickoff layout: fresh roster, centered ball, no leftover effects.
    pub fn reset_kickoff(&mut self, config: &MatchConfig) {
        self.players = setup_players(config);
        self.ball.reset();
        self.particles.clear();
    }

    /// Post-goal restart: goalkeepers snap back to their line, everyone else
    /// is nudged toward their own half rather than fully re-forming.
    pub fn reset_after_goal(&mut self, config: &MatchConfig) {
        self.ball.reset();

        let mid = config.field_height / 2.0;
        for player in &mut self.players {
            player.has_ball = false;
            player.velocity = Vector2::zeros();

            match player.role {
                PlayerRole::Goalkeeper => {
                    let x = match player.team {
                        Team::Home => config.formation_inset,
                        Team::Away => config.field_width - config.formation_inset,
                    };
                    player.position = Vector2::new(x, mid);
                }
                _ => {
                    player.position.x -= player.team.attack_sign() * config.post_goal_nudge;
                }
            }
        }
    }

    /// True when anyone on `team` holds the ball, the carrier included. The
    /// AI uses this to switch into support runs (and, for the carrier, to
    /// dribble forward instead of chasing the glued ball).
    pub fn team_has_ball(&self, team: Team) -> bool {
        self.players.iter().any(|p| p.team == team && p.has_ball)
    }

    pub fn ball_holder(&self) -> Option<&MatchPlayer> {
        self.players.iter().find(|p| p.has_ball)
    }
}

fn setup_players(config: &MatchConfig) -> Vec<MatchPlayer> {
    let mut players = Vec::with_capacity(ROSTER_SIZE);
    let mut next_id = 1;

    for team in [Team::Home, Team::Away] {
        setup_squad(team, config, &mut next_id, &mut players);
    }

    players
}

fn setup_squad(team: Team, config: &MatchConfig, next_id: &mut u32, out: &mut Vec<MatchPlayer>) {
    let line_x = match team {
        Team::Home => config.formation_inset,
        Team::Away => config.field_width - config.formation_inset,
    };
    let dir = team.attack_sign();
    let h = config.field_height;
    let spacing = config.formation_spacing;

    let layout = [
        (PlayerRole::Goalkeeper, line_x, h / 2.0),
        (PlayerRole::Defender, line_x + spacing * dir, h / 3.0),
        (PlayerRole::Defender, line_x + spacing * dir, h / 3.0 * 2.0),
        (PlayerRole::Midfielder, line_x + spacing * 2.0 * dir, h / 2.0),
        (PlayerRole::Striker, line_x + spacing * 3.0 * dir, h / 2.0),
    ];

    for (role, x, y) in layout {
        // The human starts on the home striker; control migrates from there.
        let is_human = team == Team::Home && role == PlayerRole::Striker;

        out.push(MatchPlayer::new(
            *next_id,
            team,
            role,
            Vector2::new(x, y),
            config.player_radius,
            is_human,
        ));
        *next_id += 1;
    }
}
