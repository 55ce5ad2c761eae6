pub mod ai;
pub mod events;
pub mod player;

pub use events::PlayerEvent;
pub use player::{MatchPlayer, PlayerRole, Team};
