use crate::config::MatchConfig;
use crate::engine::{FieldSize, GoalMouths};
use crate::player::Team;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

/// Simulated seconds that elapse per tick (~60 Hz, unclamped to wall clock).
pub const TICK_SECONDS: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn add(&mut self, team: Team) {
        match team {
            Team::Home => self.home += 1,
            Team::Away => self.away += 1,
        }
    }

    pub fn get(&self, team: Team) -> u8 {
        match team {
            Team::Home => self.home,
            Team::Away => self.away,
        }
    }
}

/// Countdown match clock. Decreases only while the match is being played and
/// clamps at zero; `tick` reports full time only once the counter has already
/// reached zero, so the final frame is still simulated.
#[derive(Debug, Clone, Copy)]
pub struct MatchClock {
    pub remaining: f32,
}

impl MatchClock {
    pub fn new(duration: f32) -> Self {
        MatchClock { remaining: duration }
    }

    /// Advance one playing tick. Returns true when full time is reached.
    pub fn tick(&mut self) -> bool {
        if self.remaining <= 0.0 {
            return true;
        }

        self.remaining = (self.remaining - TICK_SECONDS).max(0.0);
        false
    }
}

/// Per-match bookkeeping shared across the tick phases: score, clock, tick
/// counter, field geometry, and the seeded RNG behind every stochastic draw.
pub struct MatchContext {
    pub score: Score,
    pub clock: MatchClock,
    pub tick: u64,
    pub field_size: FieldSize,
    pub goals: GoalMouths,
    pub rng: StdRng,
}

impl MatchContext {
    pub fn new(config: &MatchConfig) -> Self {
        MatchContext {
            score: Score::default(),
            clock: MatchClock::new(config.match_duration),
            tick: 0,
            field_size: FieldSize::new(config.field_width, config.field_height),
            goals: GoalMouths::from_config(config),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Kickoff bookkeeping reset. The tick counter and RNG stream carry on;
    /// determinism is anchored to the construction seed, not to restarts.
    pub fn reset(&mut self, config: &MatchConfig) {
        self.score = Score::default();
        self.clock = MatchClock::new(config.match_duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_per_team() {
        let mut score = Score::default();
        score.add(Team::Home);
        score.add(Team::Home);
        score.add(Team::Away);

        assert_eq!(score.get(Team::Home), 2);
        assert_eq!(score.get(Team::Away), 1);
    }

    #[test]
    fn test_clock_counts_down_and_clamps() {
        let mut clock = MatchClock::new(TICK_SECONDS);

        // One frame left: this tick consumes it without expiring.
        assert!(!clock.tick());
        assert_eq!(clock.remaining, 0.0);

        // Now at zero: the next tick reports full time, never negative.
        assert!(clock.tick());
        assert_eq!(clock.remaining, 0.0);
    }

    #[test]
    fn test_same_seed_same_stream() {
        use rand::Rng;

        let config = MatchConfig::default();
        let mut a = MatchContext::new(&config);
        let mut b = MatchContext::new(&config);

        let draws_a: Vec<f32> = (0..32).map(|_| a.rng.gen_range(0.0..1.0)).collect();
        let draws_b: Vec<f32> = (0..32).map(|_| b.rng.gen_range(0.0..1.0)).collect();

        assert_eq!(draws_a, draws_b);
    }
}
