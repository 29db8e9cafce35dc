use std::sync::mpsc;

use super::*;
use crate::search::{
    create_strategy, request_move, SearchError, SearchOptions, SearchResult, Searchable,
    StrategyType, TwoPlayerMove, Weights, WINNING_VALUE,
};

const BRUTE_FORCE_STRATEGIES: [StrategyType; 5] = [
    StrategyType::MiniMax,
    StrategyType::NegaMax,
    StrategyType::NegaMaxMemory,
    StrategyType::NegaScout,
    StrategyType::NegaScoutMemory,
];

fn board(position: &str) -> TicTacToeBoard {
    position.parse().unwrap()
}

fn options(strategy: StrategyType, depth: i32) -> SearchOptions {
    SearchOptions::new(strategy)
        .with_look_ahead(depth)
        .with_weights(default_weights())
}

fn search(position: &str, options: SearchOptions) -> SearchResult<TicTacToeMove> {
    let mut board = board(position);
    let mut strategy = create_strategy::<TicTacToeBoard>(options).unwrap();
    let result = strategy.search(&mut board, None).unwrap();
    assert_eq!(board.notation(), position.to_string(), "board was not restored");
    result
}

fn best_index(result: &SearchResult<TicTacToeMove>) -> usize {
    result.best_move.location().index()
}

#[test]
fn test_move_values() {
    let moves = TicTacToeBoard::new().generate_moves(None, &default_weights());
    let values: Vec<i32> = moves.iter().map(|m| m.value()).collect();
    // corners sit on three lines, edges on two, the center on four
    assert_eq!(values, vec![3, 2, 3, 2, 4, 2, 3, 2, 3]);
    assert!(moves.iter().all(|m| m.player() == Player::X && !m.is_urgent()));
}

#[test]
fn test_worth() {
    let weights = default_weights();
    assert_eq!(board("xxx/oo./...").worth(None, &weights), WINNING_VALUE);
    assert_eq!(board("ooo/xx./x..").worth(None, &weights), -WINNING_VALUE);
    // o's center piece is on more open lines than x's corner
    assert_eq!(board("x...o....").worth(None, &weights), -1);
    assert_eq!(board("x..o.....").worth(None, &weights), 1);
    assert_eq!(TicTacToeBoard::new().worth(None, &weights), 0);
}

#[test]
fn test_done_and_recorded_winner() {
    let mut won = board("xxx/oo./...");
    assert!(won.done(None, false));
    assert_eq!(won.recorded_winner(), None);
    assert!(won.done(None, true));
    assert_eq!(won.recorded_winner(), Some(Player::X));

    let mut drawn = board("xox/xoo/oxx");
    assert!(drawn.done(None, true));
    assert_eq!(drawn.recorded_winner(), None);
    assert_eq!(drawn.worth(None, &default_weights()), 0);

    assert!(!TicTacToeBoard::new().done(None, false));
}

#[test]
fn test_urgent_moves() {
    let weights = default_weights();
    let position = board("xx.oo....");
    assert!(position.in_jeopardy(None, &weights));

    let urgent: Vec<usize> = position
        .generate_urgent_moves(None, &weights)
        .iter()
        .map(|m| m.location().index())
        .collect();
    assert_eq!(urgent, vec![2, 5]);

    let quiet = board("x...o....");
    assert!(!quiet.in_jeopardy(None, &weights));
    assert!(quiet.generate_urgent_moves(None, &weights).is_empty());
}

#[test]
fn test_make_undo_restores_board_and_hash() {
    let weights = default_weights();
    let mut position = TicTacToeBoard::new();
    let initial = position.clone();
    let mut played = Vec::new();

    while !position.done(None, false) {
        let moves = position.generate_moves(None, &weights);
        let game_move = moves[played.len() % moves.len()].clone();
        position.make_internal_move(&game_move).unwrap();
        played.push((game_move, position.hash_key()));
    }

    for (game_move, hash) in played.iter().rev() {
        assert_eq!(position.hash_key(), *hash);
        position.undo_internal_move(game_move).unwrap();
    }
    assert_eq!(position, initial);
    assert_eq!(position.hash_key(), initial.hash_key());
    assert_eq!(position.verification_key(), initial.verification_key());
}

#[test]
fn test_empty_board_takes_center() {
    for depth in 1..=9 {
        let result = search(".........", options(StrategyType::NegaMax, depth));
        assert_eq!(best_index(&result), 4, "depth {}", depth);
    }
}

#[test]
fn test_moves_considered() {
    let result = search(".........", options(StrategyType::NegaMax, 4));
    assert_eq!(result.value, 0);
    assert_eq!(result.stats.moves_considered, 259);

    let result = search(".........", options(StrategyType::NegaMax, 9));
    assert_eq!(result.value, 0);
    assert_eq!(result.stats.moves_considered, 1939);
}

#[test]
fn test_takes_the_win() {
    for strategy in BRUTE_FORCE_STRATEGIES {
        for depth in 1..=3 {
            for quiescence in [false, true] {
                let result = search(
                    "xx.oo....",
                    options(strategy, depth).with_quiescence(quiescence),
                );
                assert_eq!(best_index(&result), 2, "{} depth {}", strategy, depth);
                assert_eq!(result.value, WINNING_VALUE);
            }
        }
    }
}

#[test]
fn test_player_two_takes_the_win() {
    for strategy in BRUTE_FORCE_STRATEGIES {
        let result = search("oo.xx.x..", options(strategy, 2));
        assert_eq!(best_index(&result), 2, "{}", strategy);
        assert_eq!(result.best_move.player(), Player::O);
        assert_eq!(result.value, -WINNING_VALUE);
    }
}

#[test]
fn test_quiescence_sees_the_block() {
    // (depth, quiescence, best cell, value)
    let expectations = [
        (1, false, 2, 10),
        (1, true, 5, 0),
        (2, false, 5, -10),
        (2, true, 5, 0),
        (3, false, 5, 9),
        (3, true, 5, 0),
    ];
    for strategy in BRUTE_FORCE_STRATEGIES {
        for (depth, quiescence, cell, value) in expectations {
            let result = search(
                "x..oo...x",
                options(strategy, depth).with_quiescence(quiescence),
            );
            let context = format!("{} depth {} quiescence {}", strategy, depth, quiescence);
            assert_eq!(best_index(&result), cell, "{}", context);
            assert_eq!(result.value, value, "{}", context);
        }
    }
}

#[test]
fn test_quiescence_changes_the_choice() {
    let expectations = [
        (1, false, 2, 10),
        (1, true, 2, 2),
        (2, false, 2, -9),
        (3, false, 8, 10),
        (3, true, 2, 2),
    ];
    for (depth, quiescence, cell, value) in expectations {
        let result = search(
            "x...o....",
            options(StrategyType::NegaScout, depth).with_quiescence(quiescence),
        );
        assert_eq!(best_index(&result), cell, "depth {} quiescence {}", depth, quiescence);
        assert_eq!(result.value, value);
    }
}

#[test]
fn test_principal_variation() {
    let result = search("xx.oo....", options(StrategyType::NegaScout, 3));
    assert_eq!(result.principal_variation[0], result.best_move);
    assert_eq!(result.principal_variation.len(), 1);

    let result = search("x..oo...x", options(StrategyType::NegaMax, 3));
    let cells: Vec<usize> = result
        .principal_variation
        .iter()
        .map(|m| m.location().index())
        .collect();
    assert_eq!(cells[0], 5);
    assert_eq!(cells.len(), 3);
    for (ply, game_move) in result.principal_variation.iter().enumerate() {
        assert_eq!(game_move.is_player1(), ply % 2 == 0);
    }
}

#[test]
fn test_weights_drive_move_order() {
    // with no positional weights every quiet move ties and the first cell wins
    let options = SearchOptions::new(StrategyType::NegaMax)
        .with_look_ahead(1)
        .with_weights(Weights::new(vec![0.0, 0.0]));
    let result = search(".........", options);
    assert_eq!(best_index(&result), 0);
    assert_eq!(result.value, 0);
}

#[test]
fn test_self_play_is_a_draw() {
    for strategy in [StrategyType::NegaScout, StrategyType::NegaMaxMemory] {
        let mut position = TicTacToeBoard::new();
        let mut strategy = create_strategy::<TicTacToeBoard>(options(strategy, 9)).unwrap();
        while !position.done(None, true) {
            let last_move = position.last_move().cloned();
            let result = strategy.search(&mut position, last_move.as_ref()).unwrap();
            position.make_internal_move(&result.best_move).unwrap();
        }
        assert!(position.is_full());
        assert_eq!(position.recorded_winner(), None);
    }
}

#[test]
fn test_uct_takes_the_win() {
    let mut options = SearchOptions::new(StrategyType::Uct).with_weights(default_weights());
    options.monte_carlo.max_simulations = 1_000;
    options.monte_carlo.seed = 3;

    let result = search("xx.oo....", options);
    assert_eq!(best_index(&result), 2);
    assert!(result.value > 0);
}

#[test]
fn test_pause_and_continue_matches_uninterrupted_search() {
    let uninterrupted = search(".........", options(StrategyType::NegaMax, 9));

    let mut strategy =
        create_strategy::<TicTacToeBoard>(options(StrategyType::NegaMax, 9)).unwrap();
    let progress = strategy.progress();
    let (paused_tx, paused_rx) = mpsc::channel();
    strategy.set_observer(Box::new(move |report| {
        if report.percent_done < 100 && !progress.is_paused() {
            progress.pause();
            let _ = paused_tx.send(report.percent_done);
        }
    }));

    let pending = request_move(TicTacToeBoard::new(), strategy, None).unwrap();
    let percent = paused_rx.recv().unwrap();
    assert_eq!(percent, 11);
    assert!(pending.is_paused());
    pending.continue_processing().unwrap();

    // every later report pauses again until the search completes
    for _ in 0..7 {
        paused_rx.recv().unwrap();
        pending.continue_processing().unwrap();
    }

    let completed = pending.join().unwrap();
    let result = completed.result.unwrap();
    assert_eq!(best_index(&result), best_index(&uninterrupted));
    assert_eq!(
        result.stats.moves_considered,
        uninterrupted.stats.moves_considered
    );
    assert_eq!(completed.searchable, TicTacToeBoard::new());
}

#[test]
fn test_cancel_paused_search_leaves_board_unchanged() {
    let mut strategy =
        create_strategy::<TicTacToeBoard>(options(StrategyType::NegaScout, 9)).unwrap();
    let progress = strategy.progress();
    let (paused_tx, paused_rx) = mpsc::channel();
    strategy.set_observer(Box::new(move |_| {
        progress.pause();
        let _ = paused_tx.send(());
    }));

    let start = board("x...o....");
    let pending = request_move(start.clone(), strategy, None).unwrap();
    paused_rx.recv().unwrap();
    pending.cancel();

    let completed = pending.join().unwrap();
    assert!(matches!(completed.result, Err(SearchError::Cancelled)));
    assert_eq!(completed.searchable, start);
    assert_eq!(completed.searchable.hash_key(), start.hash_key());
}
