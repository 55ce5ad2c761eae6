use crate::ball::BallEvent;
use crate::config::MatchConfig;
use crate::context::MatchContext;
use crate::player::{PlayerEvent, Team};
use crate::state::StateManager;
use log::debug;
use serde::Serialize;

/// Outward notifications, consumed by the host's audio/UI collaborators.
/// Fire-and-forget: the engine never waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchEvent {
    KickPerformed,
    GoalScored(Team),
    Whistle(WhistleKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WhistleKind {
    Kickoff,
    FullTime,
}

/// Intra-tick buffer for side-effect requests raised by the simulation
/// phases. Collected while the phases run, applied once by the dispatcher.
#[derive(Default)]
pub struct EventCollection {
    ball_events: Vec<BallEvent>,
    player_events: Vec<PlayerEvent>,
}

impl EventCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_ball_event(&mut self, event: BallEvent) {
        self.ball_events.push(event);
    }

    pub fn add_player_event(&mut self, event: PlayerEvent) {
        self.player_events.push(event);
    }

    pub fn has_goal(&self) -> bool {
        self.ball_events
            .iter()
            .any(|event| matches!(event, BallEvent::Goal(_)))
    }

    pub fn is_empty(&self) -> bool {
        self.ball_events.is_empty() && self.player_events.is_empty()
    }
}

pub struct EventDispatcher;

impl EventDispatcher {
    /// Apply buffered requests to the world and translate them into outward
    /// notifications. Goal requests go through the state machine's own
    /// transition path; the simulation never assigns the mode directly.
    pub fn dispatch(
        events: EventCollection,
        context: &mut MatchContext,
        state: &mut StateManager,
        config: &MatchConfig,
    ) -> Vec<MatchEvent> {
        let mut notifications = Vec::new();

        for event in events.ball_events {
            debug!("ball event: {:?}", event);

            match event {
                BallEvent::Goal(team) => {
                    state.on_goal(team, context, config);
                    notifications.push(MatchEvent::GoalScored(team));
                }
            }
        }

        for event in events.player_events {
            debug!("player event: {:?}", event);

            match event {
                PlayerEvent::Kick(_) => notifications.push(MatchEvent::KickPerformed),
            }
        }

        notifications
    }
}
