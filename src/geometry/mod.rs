mod evasion;
mod placement;
mod rect;

pub use evasion::{EvasionOutcome, EvasionState, GeometrySource, PositionSink, evade};
pub use placement::{LayoutSnapshot, Placement, PlacementConfig, PlacementKind, Placer};
pub use rect::Rect;
