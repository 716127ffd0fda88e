use std::collections::HashSet;

use rand::Rng;

use crate::Position;

/// Place food on a uniformly random unoccupied cell.
///
/// Scans the whole board, O(grid_size²). When the body fills every cell the
/// defined fallback is `(0, 0)`; that state is unreachable during normal
/// play but must not panic.
pub fn generate_food<R: Rng>(body: &[Position], grid_size: u32, rng: &mut R) -> Position {
    let occupied: HashSet<Position> = body.iter().copied().collect();
    let mut free = Vec::new();

    for x in 0..grid_size as i32 {
        for y in 0..grid_size as i32 {
            let cell = Position { x, y };
            if !occupied.contains(&cell) {
                free.push(cell);
            }
        }
    }

    if free.is_empty() {
        return Position { x: 0, y: 0 };
    }
    free[rng.random_range(0..free.len())]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn pos(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    #[test]
    fn never_lands_on_body() {
        let body = [pos(5, 5), pos(4, 5), pos(3, 5)];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let food = generate_food(&body, 10, &mut rng);
            assert!(!body.contains(&food), "food {food:?} landed on the body");
        }
    }

    #[test]
    fn stays_within_bounds() {
        let body = [pos(5, 5)];
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let food = generate_food(&body, 10, &mut rng);
            assert!((0..10).contains(&food.x));
            assert!((0..10).contains(&food.y));
        }
    }

    #[test]
    fn full_board_falls_back_to_origin() {
        let mut body = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                body.push(pos(x, y));
            }
        }
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_food(&body, 3, &mut rng), pos(0, 0));
    }

    #[test]
    fn same_seed_same_placement() {
        let body = [pos(2, 2), pos(1, 2)];
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            generate_food(&body, 8, &mut a),
            generate_food(&body, 8, &mut b)
        );
    }

    #[test]
    fn single_free_cell_is_chosen() {
        let mut body = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                if !(x == 1 && y == 1) {
                    body.push(pos(x, y));
                }
            }
        }
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(generate_food(&body, 3, &mut rng), pos(1, 1));
    }
}
