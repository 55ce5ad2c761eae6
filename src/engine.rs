use crate::config::{EngineError, MatchConfig};
use crate::context::{MatchContext, Score};
use crate::events::{EventCollection, EventDispatcher, MatchEvent};
use crate::field::MatchField;
use crate::input::{InputAction, InputState};
use crate::particles::Particle;
use crate::player::{MatchPlayer, PlayerEvent, PlayerRole, Team, ai};
use crate::state::{MatchCommand, MatchState, StateManager};
use itertools::Itertools;
use log::debug;
use nalgebra::Vector2;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSize {
    pub width: f32,
    pub height: f32,
}

impl FieldSize {
    pub fn new(width: f32, height: f32) -> Self {
        FieldSize { width, height }
    }
}

/// The two goal mouths, centered on mid-height at either end of the field.
#[derive(Debug, Clone, Copy)]
pub struct GoalMouths {
    left: Vector2<f32>,
    right: Vector2<f32>,
    half_band: f32,
}

impl GoalMouths {
    pub fn from_config(config: &MatchConfig) -> Self {
        let mid = config.field_height / 2.0;

        GoalMouths {
            left: Vector2::new(0.0, mid),
            right: Vector2::new(config.field_width, mid),
            half_band: config.goal_width / 2.0,
        }
    }

    /// The mouth center `team` attacks. Home plays left-to-right.
    pub fn target(&self, team: Team) -> Vector2<f32> {
        match team {
            Team::Home => self.right,
            Team::Away => self.left,
        }
    }

    /// Which team scores for a ball at `position`, if it has reached a goal
    /// line inside the mouth band. Goal lines and band edges are inclusive.
    pub fn scoring_team(&self, position: Vector2<f32>) -> Option<Team> {
        if (position.y - self.left.y).abs() > self.half_band {
            return None;
        }

        if position.x <= self.left.x {
            Some(Team::Away)
        } else if position.x >= self.right.x {
            Some(Team::Home)
        } else {
            None
        }
    }
}

/// Pure control selection: index of the home player nearest the ball, first
/// minimum winning ties. Returns None when the roster has no home players.
pub fn select_human_index(players: &[MatchPlayer], ball_position: Vector2<f32>) -> Option<usize> {
    players
        .iter()
        .map(|p| {
            if p.team == Team::Home {
                (p.position - ball_position).norm()
            } else {
                f32::INFINITY
            }
        })
        .position_min_by(|a, b| a.total_cmp(b))
        .filter(|&idx| players[idx].team == Team::Home)
}

/// The match engine: one `tick` per display refresh, commands through
/// `apply`, read-only world via `snapshot`. Rendering happens strictly
/// after `tick` returns.
pub struct MatchEngine {
    config: MatchConfig,
    pub field: MatchField,
    pub context: MatchContext,
    pub state: StateManager,
    kick_was_held: bool,
}

impl MatchEngine {
    pub fn new(config: MatchConfig) -> Result<Self, EngineError> {
        let field = MatchField::new(&config)?;
        let context = MatchContext::new(&config);

        Ok(MatchEngine {
            config,
            field,
            context,
            state: StateManager::new(),
            kick_was_held: false,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn apply(&mut self, command: MatchCommand) -> Vec<MatchEvent> {
        self.state
            .apply(command, &mut self.field, &mut self.context, &self.config)
    }

    /// Advance the simulation by one frame against the sampled input set.
    /// Runs the ball phase, control reassignment, the per-player phase,
    /// particle maintenance and the clock - but only while Playing; every
    /// other mode freezes the world and only the deferred-transition queue
    /// is polled.
    pub fn tick(&mut self, input: &InputState) -> Vec<MatchEvent> {
        self.context.tick += 1;
        self.state
            .poll(self.context.tick, &mut self.field, &self.config);

        // The latch tracks the key across every mode so a press held through
        // a pause cannot fire on resume.
        let kick_pressed = input.is_held(InputAction::Kick) && !self.kick_was_held;
        self.kick_was_held = input.is_held(InputAction::Kick);

        if self.state.current() != MatchState::Playing {
            return Vec::new();
        }

        let mut events = EventCollection::new();

        self.field
            .ball
            .update(&self.context.goals, &self.field.size, &mut events);

        if events.has_goal() {
            // A goal ends the tick: no player physics, AI, particles or
            // clock run on this frame.
            return EventDispatcher::dispatch(events, &mut self.context, &mut self.state, &self.config);
        }

        Self::reassign_control(&mut self.field);
        self.play_players(input, kick_pressed, &mut events);
        self.field.particles.update(self.config.particle_decay);

        let full_time = self.context.clock.tick();

        let mut notifications =
            EventDispatcher::dispatch(events, &mut self.context, &mut self.state, &self.config);

        if full_time {
            notifications.extend(self.state.on_full_time());
        }

        notifications
    }

    /// Hand control to the home player closest to the ball, unless the
    /// current human already has it. A roster with no human flag is left
    /// alone rather than crashed on.
    fn reassign_control(field: &mut MatchField) {
        let Some(current) = field.players.iter().position(|p| p.is_human) else {
            return;
        };

        if field.players[current].has_ball {
            return;
        }

        let Some(closest) = select_human_index(&field.players, field.ball.position) else {
            return;
        };

        if closest != current {
            for player in &mut field.players {
                player.is_human = false;
            }
            field.players[closest].is_human = true;

            debug!("control switched to player {}", field.players[closest].id);
        }
    }

    fn play_players(&mut self, input: &InputState, kick_pressed: bool, events: &mut EventCollection) {
        for idx in 0..self.field.players.len() {
            let (direction, max_speed) = {
                let player = &self.field.players[idx];

                if player.is_human {
                    let max = if input.is_held(InputAction::Sprint) {
                        self.config.player_max_speed * self.config.sprint_multiplier
                    } else {
                        self.config.player_max_speed
                    };
                    (input.movement_axis(), max)
                } else {
                    let teammate_has_ball = self.field.team_has_ball(player.team);
                    let direction = ai::desired_velocity(
                        player,
                        self.field.ball.position,
                        teammate_has_ball,
                        &self.field.size,
                        &self.config,
                    );
                    (direction, self.config.player_max_speed)
                }
            };

            let size = self.field.size;
            let player = &mut self.field.players[idx];
            player.apply_steering(
                direction,
                self.config.player_accel,
                max_speed,
                self.config.player_friction,
            );
            player.clamp_to_field(&size);

            let takes_possession = {
                let player = &self.field.players[idx];
                !player.has_ball
                    && player.kick_cooldown == 0
                    && player.distance_to(self.field.ball.position)
                        < player.radius + self.field.ball.radius
            };

            if takes_possession {
                // Clearing everyone first keeps the at-most-one-owner
                // invariant even when two players overlap the ball.
                for player in &mut self.field.players {
                    player.has_ball = false;
                }
                self.field.players[idx].has_ball = true;
            }

            if self.field.players[idx].has_ball {
                self.field
                    .ball
                    .follow(&self.field.players[idx], self.config.dribble_lead);
            }

            self.field.players[idx].tick_cooldown();

            let wants_kick = {
                let player = &self.field.players[idx];

                if !player.has_ball {
                    false
                } else if player.is_human {
                    kick_pressed
                } else {
                    let target = self.context.goals.target(player.team);
                    ai::wants_shot(player, target, &self.config, &mut self.context.rng)
                }
            };

            if wants_kick {
                self.resolve_kick(idx, events);
            }
        }
    }

    /// Release the ball toward the opposing goal mouth. A human kicker who
    /// is actually moving shoots along their heading instead - aim is
    /// expressed through movement timing, not a cursor.
    fn resolve_kick(&mut self, idx: usize, events: &mut EventCollection) {
        let target = self.context.goals.target(self.field.players[idx].team);

        let player = &mut self.field.players[idx];
        player.has_ball = false;
        player.kick_cooldown = self.config.kick_cooldown;

        let mut direction = (target - player.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector2::zeros);

        if player.is_human && player.current_speed() > self.config.min_heading_speed {
            direction = player
                .velocity
                .try_normalize(f32::EPSILON)
                .unwrap_or(direction);
        }

        let kicker_id = player.id;

        self.field.ball.velocity = direction * self.config.kick_power;
        self.field.particles.spawn_burst(
            self.field.ball.position,
            self.config.particle_burst,
            self.config.particle_spread,
            &mut self.context.rng,
        );

        events.add_player_event(PlayerEvent::Kick(kicker_id));
    }

    /// Read-only world view for the renderer, valid after each tick.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            state: self.state.current(),
            score: self.context.score,
            time_remaining: self.context.clock.remaining,
            ball: BallSnapshot {
                position: self.field.ball.position,
                velocity: self.field.ball.velocity,
                radius: self.field.ball.radius,
                height: self.field.ball.height,
            },
            players: self
                .field
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id,
                    team: p.team,
                    role: p.role,
                    position: p.position,
                    velocity: p.velocity,
                    radius: p.radius,
                    has_ball: p.has_ball,
                    is_human: p.is_human,
                })
                .collect(),
            particles: self.field.particles.as_slice().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSnapshot {
    pub state: MatchState,
    pub score: Score,
    pub time_remaining: f32,
    pub ball: BallSnapshot,
    pub players: Vec<PlayerSnapshot>,
    pub particles: Vec<Particle>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BallSnapshot {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub radius: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlayerSnapshot {
    pub id: u32,
    pub team: Team,
    pub role: PlayerRole,
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub radius: f32,
    pub has_ball: bool,
    pub is_human: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TICK_SECONDS;
    use crate::events::WhistleKind;

    fn started_engine(seed: u64) -> MatchEngine {
        let config = MatchConfig {
            seed,
            ..MatchConfig::default()
        };
        let mut engine = MatchEngine::new(config).unwrap();
        engine.apply(MatchCommand::Start);
        engine
    }

    /// Stash the whole roster along the top edge, spaced wider than any
    /// possession radius, so a scripted ball can travel undisturbed.
    fn park_roster(engine: &mut MatchEngine) {
        for (i, player) in engine.field.players.iter_mut().enumerate() {
            player.position = Vector2::new(40.0 + i as f32 * 60.0, 40.0);
            player.velocity = Vector2::zeros();
            player.has_ball = false;
        }
    }

    fn world_fingerprint(engine: &MatchEngine) -> Vec<(f32, f32, f32, f32)> {
        let mut points: Vec<(f32, f32, f32, f32)> = engine
            .field
            .players
            .iter()
            .map(|p| (p.position.x, p.position.y, p.velocity.x, p.velocity.y))
            .collect();

        let ball = &engine.field.ball;
        points.push((ball.position.x, ball.position.y, ball.velocity.x, ball.velocity.y));
        points
    }

    #[test]
    fn test_at_most_one_ball_owner_over_time() {
        let mut engine = started_engine(7);
        let mut input = InputState::new();
        input.press(InputAction::MoveRight);

        for _ in 0..600 {
            engine.tick(&input);
            let owners = engine.field.players.iter().filter(|p| p.has_ball).count();
            assert!(owners <= 1, "multiple ball owners in one tick");
        }
    }

    #[test]
    fn test_exactly_one_human_while_playing() {
        let mut engine = started_engine(11);
        let input = InputState::new();

        for _ in 0..300 {
            engine.tick(&input);
            let humans = engine.field.players.iter().filter(|p| p.is_human).count();
            assert_eq!(humans, 1);
            assert!(
                engine
                    .field
                    .players
                    .iter()
                    .find(|p| p.is_human)
                    .is_some_and(|p| p.team == Team::Home)
            );
        }
    }

    #[test]
    fn test_pause_toggles_leave_world_untouched() {
        let mut engine = started_engine(3);
        let input = InputState::new();
        for _ in 0..30 {
            engine.tick(&input);
        }

        let before = world_fingerprint(&engine);
        let score_before = engine.context.score;

        for _ in 0..4 {
            engine.apply(MatchCommand::TogglePause);
            assert_eq!(engine.state.current(), MatchState::Paused);
            for _ in 0..10 {
                engine.tick(&input);
            }
            engine.apply(MatchCommand::TogglePause);
            assert_eq!(engine.state.current(), MatchState::Playing);
        }

        assert_eq!(world_fingerprint(&engine), before);
        assert_eq!(engine.context.score.home, score_before.home);
        assert_eq!(engine.context.score.away, score_before.away);
    }

    #[test]
    fn test_determinism_with_same_seed_and_inputs() {
        let mut a = started_engine(99);
        let mut b = started_engine(99);

        let mut input = InputState::new();
        for step in 0..400u32 {
            // A varied but identical input schedule for both runs.
            if step % 50 == 0 {
                input.press(InputAction::MoveRight);
            }
            if step % 70 == 0 {
                input.press(InputAction::Kick);
            } else {
                input.release(InputAction::Kick);
            }
            if step == 200 {
                input.press(InputAction::MoveUp);
            }

            let events_a = a.tick(&input);
            let events_b = b.tick(&input);
            assert_eq!(events_a, events_b);
        }

        assert_eq!(world_fingerprint(&a), world_fingerprint(&b));
    }

    #[test]
    fn test_straight_shot_scores_once() {
        let mut engine = started_engine(1);
        park_roster(&mut engine);

        engine.field.ball.position = Vector2::new(900.0, 400.0);
        engine.field.ball.velocity = Vector2::new(18.0, 0.0);

        let input = InputState::new();
        let mut goals = Vec::new();

        for _ in 0..120 {
            let events = engine.tick(&input);
            goals.extend(
                events
                    .iter()
                    .filter(|e| matches!(e, MatchEvent::GoalScored(_)))
                    .copied(),
            );
            // Straight line: no vertical drift on the way in.
            assert_eq!(engine.field.ball.position.y, 400.0);
            if engine.state.current() == MatchState::Goal {
                break;
            }
        }

        assert_eq!(goals, vec![MatchEvent::GoalScored(Team::Home)]);
        assert_eq!(engine.context.score.home, 1);
        assert_eq!(engine.context.score.away, 0);
        assert_eq!(engine.state.current(), MatchState::Goal);
    }

    #[test]
    fn test_band_edge_scores_but_one_unit_outside_reflects() {
        let config = MatchConfig::default();
        let goals = GoalMouths::from_config(&config);

        // Exactly on the line, exactly on the band edge.
        assert_eq!(
            goals.scoring_team(Vector2::new(1200.0, 500.0)),
            Some(Team::Home)
        );
        assert_eq!(
            goals.scoring_team(Vector2::new(0.0, 300.0)),
            Some(Team::Away)
        );

        // One unit outside the band: no goal.
        assert_eq!(goals.scoring_team(Vector2::new(1200.0, 501.0)), None);
        assert_eq!(goals.scoring_team(Vector2::new(0.0, 299.0)), None);
    }

    #[test]
    fn test_clock_expiry_ends_match_next_tick() {
        let mut engine = started_engine(5);
        engine.context.clock.remaining = TICK_SECONDS;
        let input = InputState::new();

        let events = engine.tick(&input);
        assert_eq!(engine.context.clock.remaining, 0.0);
        assert_eq!(engine.state.current(), MatchState::Playing);
        assert!(!events.contains(&MatchEvent::Whistle(WhistleKind::FullTime)));

        let events = engine.tick(&input);
        assert_eq!(engine.state.current(), MatchState::GameOver);
        assert!(events.contains(&MatchEvent::Whistle(WhistleKind::FullTime)));
        assert_eq!(engine.context.clock.remaining, 0.0);
    }

    #[test]
    fn test_restart_during_goal_cancels_resume() {
        let mut engine = started_engine(2);
        park_roster(&mut engine);
        engine.field.ball.position = Vector2::new(1199.0, 400.0);
        engine.field.ball.velocity = Vector2::new(5.0, 0.0);

        let input = InputState::new();
        engine.tick(&input);
        assert_eq!(engine.state.current(), MatchState::Goal);
        assert!(engine.state.resume_pending());

        let events = engine.apply(MatchCommand::Restart);
        assert_eq!(engine.state.current(), MatchState::Playing);
        assert!(!engine.state.resume_pending());
        assert_eq!(engine.context.score.home, 0);
        assert_eq!(events, vec![MatchEvent::Whistle(WhistleKind::Kickoff)]);

        // Well past the superseded deadline nothing tries to resume again.
        // Freeze the pitch so no fresh goal can muddy the assertion.
        park_roster(&mut engine);
        for _ in 0..(engine.config().goal_reset_delay_ticks + 10) {
            engine.tick(&input);
            assert_eq!(engine.state.current(), MatchState::Playing);
        }
    }

    #[test]
    fn test_human_kick_is_edge_triggered() {
        let mut engine = started_engine(4);
        park_roster(&mut engine);

        // Hand the parked human the ball, well away from the AI shot range.
        let human = engine.field.players.iter().position(|p| p.is_human).unwrap();
        engine.field.players[human].has_ball = true;
        engine.field.ball.position = engine.field.players[human].position;
        engine.field.ball.velocity = Vector2::zeros();

        let mut input = InputState::new();
        input.press(InputAction::Kick);

        let events = engine.tick(&input);
        assert!(events.contains(&MatchEvent::KickPerformed));
        assert!(!engine.field.players[human].has_ball);
        // Cooldown is set by the kick, after the per-tick decrement ran.
        assert_eq!(
            engine.field.players[human].kick_cooldown,
            engine.config().kick_cooldown
        );
        assert!(
            (engine.field.ball.velocity.norm() - engine.config().kick_power).abs() < 1e-3
        );
        assert_eq!(engine.field.particles.len(), engine.config().particle_burst);

        // Still held: no second kick even if the ball came straight back.
        engine.field.players[human].has_ball = true;
        engine.field.players[human].kick_cooldown = 0;
        let events = engine.tick(&input);
        assert!(!events.contains(&MatchEvent::KickPerformed));
    }

    #[test]
    fn test_select_human_prefers_first_on_tie() {
        let config = MatchConfig::default();
        let mut field = MatchField::new(&config).unwrap();

        // Put both home defenders at exactly 100 units from a corner ball,
        // well inside everyone else.
        field.players[1].position = Vector2::new(0.0, 100.0);
        field.players[2].position = Vector2::new(100.0, 0.0);
        let ball = Vector2::new(0.0, 0.0);

        let picked = select_human_index(&field.players, ball).unwrap();

        assert_eq!(picked, 1, "first of the tied defenders wins");
    }

    #[test]
    fn test_select_human_ignores_away_players() {
        let config = MatchConfig::default();
        let field = MatchField::new(&config).unwrap();

        // Ball parked on the away goalkeeper.
        let ball = field.players[5].position;
        let picked = select_human_index(&field.players, ball).unwrap();

        assert!(field.players[picked].team == Team::Home);
    }
}
