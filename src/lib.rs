pub mod ball;
pub mod config;
pub mod context;
pub mod engine;
pub mod events;
pub mod field;
pub mod input;
pub mod particles;
pub mod player;
pub mod state;

pub use ball::{Ball, BallEvent};
pub use config::{EngineError, MatchConfig, ROSTER_SIZE, SQUAD_SIZE};
pub use context::{MatchClock, MatchContext, Score, TICK_SECONDS};
pub use engine::{
    BallSnapshot, FieldSize, GoalMouths, MatchEngine, MatchSnapshot, PlayerSnapshot,
    select_human_index,
};
pub use events::{EventCollection, EventDispatcher, MatchEvent, WhistleKind};
pub use field::MatchField;
pub use input::{InputAction, InputState};
pub use particles::{Particle, ParticleField};
pub use player::{MatchPlayer, PlayerEvent, PlayerRole, Team};
pub use state::{MatchCommand, MatchState, StateManager};
