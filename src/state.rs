use crate::config::MatchConfig;
use crate::context::MatchContext;
use crate::events::{MatchEvent, WhistleKind};
use crate::field::MatchField;
use crate::player::Team;
use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchState {
    Menu,
    Playing,
    /// Transient celebration window after a goal; play resumes automatically.
    Goal,
    Paused,
    /// Terminal until an explicit restart.
    GameOver,
}

/// External user commands. Applied through the same transition path the
/// simulation uses for its own requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCommand {
    Start,
    TogglePause,
    Restart,
}

/// Sole owner and writer of the match mode. The goal-celebration delay is a
/// tick deadline polled every tick, not a background timer, so an explicit
/// restart deterministically wins over a pending resume.
pub struct StateManager {
    current: MatchState,
    resume_at: Option<u64>,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager {
    pub fn new() -> Self {
        StateManager {
            current: MatchState::Menu,
            resume_at: None,
        }
    }

    pub fn current(&self) -> MatchState {
        self.current
    }

    pub fn resume_pending(&self) -> bool {
        self.resume_at.is_some()
    }

    fn set(&mut self, next: MatchState) {
        if next != self.current {
            info!("match state: {:?} -> {:?}", self.current, next);
            self.current = next;
        }
    }

    /// Goal request from the ball phase: score immediately on the
    /// Playing -> Goal transition, then schedule the automatic resume.
    pub fn on_goal(&mut self, team: Team, context: &mut MatchContext, config: &MatchConfig) {
        if self.current != MatchState::Playing {
            return;
        }

        context.score.add(team);
        self.set(MatchState::Goal);
        self.resume_at = Some(context.tick + config.goal_reset_delay_ticks);
    }

    /// Clock expiry request from the clock phase.
    pub fn on_full_time(&mut self) -> Vec<MatchEvent> {
        if self.current != MatchState::Playing {
            return Vec::new();
        }

        self.set(MatchState::GameOver);
        vec![MatchEvent::Whistle(WhistleKind::FullTime)]
    }

    /// Run deferred transitions that have come due. Called at the top of
    /// every tick, before the mode gate.
    pub fn poll(&mut self, tick: u64, field: &mut MatchField, config: &MatchConfig) {
        if self.current != MatchState::Goal {
            return;
        }

        if let Some(resume_at) = self.resume_at {
            if tick >= resume_at {
                self.resume_at = None;
                field.reset_after_goal(config);
                self.set(MatchState::Playing);
            }
        }
    }

    pub fn apply(
        &mut self,
        command: MatchCommand,
        field: &mut MatchField,
        context: &mut MatchContext,
        config: &MatchConfig,
    ) -> Vec<MatchEvent> {
        match command {
            MatchCommand::Start => {
                if self.current != MatchState::Menu {
                    return Vec::new();
                }
                self.kickoff(field, context, config)
            }
            MatchCommand::TogglePause => {
                match self.current {
                    MatchState::Playing => self.set(MatchState::Paused),
                    MatchState::Paused => self.set(MatchState::Playing),
                    _ => {}
                }
                Vec::new()
            }
            // Accepted from any state; supersedes a pending goal resume.
            MatchCommand::Restart => self.kickoff(field, context, config),
        }
    }

    fn kickoff(
        &mut self,
        field: &mut MatchField,
        context: &mut MatchContext,
        config: &MatchConfig,
    ) -> Vec<MatchEvent> {
        self.resume_at = None;
        field.reset_kickoff(config);
        context.reset(config);
        self.set(MatchState::Playing);

        vec![MatchEvent::Whistle(WhistleKind::Kickoff)]
    }
}
