use super::options::BestMovesSearchOptions;
use super::traits::TwoPlayerMove;

/// Value of a move as seen by the player making it.
#[inline]
pub(crate) fn mover_value<M: TwoPlayerMove>(game_move: &M, player1: bool) -> i32 {
    if player1 {
        game_move.value()
    } else {
        -game_move.value()
    }
}

/// Stable best-first sort for the side to move.
pub(crate) fn order_moves<M: TwoPlayerMove>(moves: &mut [M], player1: bool) {
    moves.sort_by_key(|m| std::cmp::Reverse(mover_value(m, player1)));
}

/// Orders `moves` best-first for the side to move and keeps the most
/// promising ones. Equally valued moves stay in generation order.
pub(crate) fn select_best_moves<M: TwoPlayerMove>(
    mut moves: Vec<M>,
    player1: bool,
    options: &BestMovesSearchOptions,
) -> Vec<M> {
    order_moves(&mut moves, player1);

    let total = moves.len();
    if total == 0 {
        return moves;
    }

    let by_percentage = options.percentage_best_moves as usize * total / 100 + 1;
    let mut keep = by_percentage
        .max(options.min_best_moves.min(total))
        .min(total);

    if options.percent_less_than_best_thresh > 0 {
        let best = mover_value(&moves[0], player1) as i64;
        let worst = mover_value(&moves[total - 1], player1) as i64;
        let spread = best - worst;
        let cutoff = best - spread * options.percent_less_than_best_thresh as i64 / 100;
        while keep < total && mover_value(&moves[keep], player1) as i64 >= cutoff {
            keep += 1;
        }
    }

    moves.truncate(keep);
    moves
}
