use rand::Rng;

use crate::{Direction, SnakeState, collision, grid};

/// Score assigned to a candidate that would end the game.
const FATAL_SCORE: i32 = -1000;

/// Scores above this are considered viable for the jitter pick.
const NEAR_FATAL_SCORE: i32 = -100;

/// Probability of taking the second-best candidate instead of the best.
const JITTER_CHANCE: f64 = 0.1;

/// Pick a direction for a spectated game.
///
/// Greedy pursuit: each legal candidate (everything but the reversal of the
/// current heading) is scored by projecting the head one step and taking the
/// negative Manhattan distance to the food, with a fatal sentinel for moves
/// the collision check rejects. Candidates are ranked descending; ties keep
/// the Up/Down/Left/Right enumeration order so the choice is reproducible.
///
/// With a small probability the second-ranked candidate is chosen instead,
/// as long as it is not a near-fatal move. Spectated play is meant to wobble;
/// do not "fix" the randomness.
pub fn choose_direction<R: Rng>(state: &SnakeState, rng: &mut R) -> Direction {
    let ranked = score_candidates(state);

    if ranked.len() > 1 && ranked[1].1 > NEAR_FATAL_SCORE && rng.random_bool(JITTER_CHANCE) {
        return ranked[1].0;
    }

    ranked.first().map(|&(d, _)| d).unwrap_or(state.heading)
}

/// Rank the legal candidate directions, best first.
fn score_candidates(state: &SnakeState) -> Vec<(Direction, i32)> {
    let head = state.head();
    let reversal = state.heading.opposite();

    let mut ranked: Vec<(Direction, i32)> = Direction::ALL
        .into_iter()
        .filter(|&d| d != reversal)
        .map(|d| {
            let probe = grid::next_head(head, d, state.grid_size, state.mode);
            let score = if collision::is_fatal(probe, &state.body, state.grid_size, state.mode) {
                FATAL_SCORE
            } else {
                -((probe.x - state.food.x).abs() + (probe.y - state.food.y).abs())
            };
            (d, score)
        })
        .collect();

    // Stable sort: equal scores preserve enumeration order.
    ranked.sort_by_key(|&(_, score)| std::cmp::Reverse(score));
    ranked
}
