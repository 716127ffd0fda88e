use crate::{BoundaryMode, Direction, Position};

/// Project the head one cell in `direction`.
///
/// Under [`BoundaryMode::PassThrough`] coordinates wrap with a floor-style
/// modulo, so a step off the low edge lands on `grid_size - 1`. Under
/// [`BoundaryMode::Walls`] the raw coordinate is returned unchanged, even
/// when out of range, so the collision check can classify it.
pub fn next_head(
    head: Position,
    direction: Direction,
    grid_size: u32,
    mode: BoundaryMode,
) -> Position {
    let (dx, dy) = direction.offset();
    let mut x = head.x + dx;
    let mut y = head.y + dy;

    if mode == BoundaryMode::PassThrough {
        let n = grid_size as i32;
        x = x.rem_euclid(n);
        y = y.rem_euclid(n);
    }

    Position { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: u32 = 10;

    #[test]
    fn unit_steps() {
        let head = Position { x: 5, y: 5 };
        assert_eq!(
            next_head(head, Direction::Up, GRID, BoundaryMode::Walls),
            Position { x: 5, y: 4 }
        );
        assert_eq!(
            next_head(head, Direction::Down, GRID, BoundaryMode::Walls),
            Position { x: 5, y: 6 }
        );
        assert_eq!(
            next_head(head, Direction::Left, GRID, BoundaryMode::Walls),
            Position { x: 4, y: 5 }
        );
        assert_eq!(
            next_head(head, Direction::Right, GRID, BoundaryMode::Walls),
            Position { x: 6, y: 5 }
        );
    }

    #[test]
    fn wraps_on_all_four_edges() {
        let m = BoundaryMode::PassThrough;
        assert_eq!(
            next_head(Position { x: 5, y: 0 }, Direction::Up, GRID, m),
            Position { x: 5, y: 9 }
        );
        assert_eq!(
            next_head(Position { x: 5, y: 9 }, Direction::Down, GRID, m),
            Position { x: 5, y: 0 }
        );
        assert_eq!(
            next_head(Position { x: 0, y: 5 }, Direction::Left, GRID, m),
            Position { x: 9, y: 5 }
        );
        assert_eq!(
            next_head(Position { x: 9, y: 5 }, Direction::Right, GRID, m),
            Position { x: 0, y: 5 }
        );
    }

    #[test]
    fn walls_mode_returns_out_of_range_unclamped() {
        let probe = next_head(Position { x: 0, y: 5 }, Direction::Left, GRID, BoundaryMode::Walls);
        assert_eq!(probe, Position { x: -1, y: 5 });
        let probe = next_head(Position { x: 9, y: 5 }, Direction::Right, GRID, BoundaryMode::Walls);
        assert_eq!(probe, Position { x: 10, y: 5 });
    }
}
