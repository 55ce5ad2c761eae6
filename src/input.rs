use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Logical actions the engine understands. The host maps raw key/touch
/// events onto these; the engine only ever sees held/released booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Sprint,
    Kick,
}

const ACTION_COUNT: usize = 6;

impl InputAction {
    fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Sprint => 4,
            InputAction::Kick => 5,
        }
    }
}

/// Currently-held action set. The input handler writes via press/release as
/// host events arrive; the simulation samples it once per tick. Kick edge
/// detection is the engine's responsibility, not this layer's.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; ACTION_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: InputAction) {
        self.held[action.index()] = true;
    }

    pub fn release(&mut self, action: InputAction) {
        self.held[action.index()] = false;
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.held[action.index()]
    }

    /// Unit-per-axis movement input: each axis contributes -1, 0 or +1, so
    /// diagonals come out as (±1, ±1) before any scaling.
    pub fn movement_axis(&self) -> Vector2<f32> {
        let mut axis = Vector2::zeros();

        if self.is_held(InputAction::MoveUp) {
            axis.y = -1.0;
        }
        if self.is_held(InputAction::MoveDown) {
            axis.y = 1.0;
        }
        if self.is_held(InputAction::MoveLeft) {
            axis.x = -1.0;
        }
        if self.is_held(InputAction::MoveRight) {
            axis.x = 1.0;
        }

        axis
    }
}
