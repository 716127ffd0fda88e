use crate::{BoundaryMode, Position};

/// Classify a candidate head position as fatal or safe.
///
/// Wall collisions only exist under [`BoundaryMode::Walls`]; pass-through
/// coordinates arrive already wrapped and are never fatal on range grounds.
/// Self-collision checks the body from index 1 — the tail cell counts as an
/// obstacle even on a non-growing move where it is about to vacate.
pub fn is_fatal(candidate: Position, body: &[Position], grid_size: u32, mode: BoundaryMode) -> bool {
    if mode == BoundaryMode::Walls {
        let n = grid_size as i32;
        if candidate.x < 0 || candidate.x >= n || candidate.y < 0 || candidate.y >= n {
            return true;
        }
    }

    body.iter().skip(1).any(|&segment| segment == candidate)
}
