/// Side-effect requests raised during the per-player phase, applied by the
/// event dispatcher after the phase completes.
#[derive(Debug, Clone, Copy)]
pub enum PlayerEvent {
    /// A player (by id) resolved a kick this tick.
    Kick(u32),
}
