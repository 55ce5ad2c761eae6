pub mod ball;
pub mod events;

pub use ball::Ball;
pub use events::BallEvent;
