//! Pointer input for the button surface.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Phase of a single-pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Pointer event in the widget's coordinate space (padding included).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    /// Build an event from a phase and raw coordinates.
    pub fn new(phase: PointerPhase, x: f64, y: f64) -> Self {
        let position = Point::new(x, y);
        match phase {
            PointerPhase::Down => PointerEvent::Down { position },
            PointerPhase::Move => PointerEvent::Move { position },
            PointerPhase::Up => PointerEvent::Up { position },
        }
    }

    pub fn phase(&self) -> PointerPhase {
        match self {
            PointerEvent::Down { .. } => PointerPhase::Down,
            PointerEvent::Move { .. } => PointerPhase::Move,
            PointerEvent::Up { .. } => PointerPhase::Up,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => *position,
        }
    }
}
