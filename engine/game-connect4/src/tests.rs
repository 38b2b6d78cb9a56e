use crate::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn board_from(moves: &[usize]) -> Board {
    let mut board = Board::new();
    for &col in moves {
        board.apply(col).unwrap();
    }
    board
}

#[test]
fn initial_state() {
    let board = Board::new();
    assert_eq!(board.side_to_move(), Side::X);
    assert_eq!(board.moves_played(), 0);
    assert_eq!(board.status(), Status::InProgress);
    assert_eq!(board.legal_moves(), (0..COLS).collect::<Vec<_>>());
    assert_eq!(board.last_move(), None);
}

#[test]
fn apply_places_disc_at_bottom() {
    let board = board_from(&[3]);
    assert_eq!(board.cell(3, 0), Some(Side::X));
    assert_eq!(board.side_to_move(), Side::O);
    assert_eq!(board.last_move(), Some(3));
}

#[test]
fn apply_rejects_out_of_range_column() {
    let mut board = Board::new();
    assert_eq!(board.apply(7), Err(BoardError::ColumnOutOfRange(7)));
}

#[test]
fn apply_rejects_full_column() {
    let mut board = Board::new();
    for _ in 0..ROWS {
        board.apply(2).unwrap();
    }
    assert!(!board.is_legal(2));
    assert!(!board.legal_moves().contains(&2));
    assert_eq!(board.apply(2), Err(BoardError::ColumnFull(2)));
}

#[test]
fn undo_rejects_empty_history() {
    let mut board = Board::new();
    assert_eq!(board.undo(), Err(BoardError::EmptyHistory));
}

#[test]
fn apply_undo_round_trip() {
    let mut board = board_from(&[3, 3, 2, 4, 1, 5]);
    let snapshot = board.clone();
    for col in board.legal_moves() {
        board.apply(col).unwrap();
        assert_eq!(board.undo().unwrap(), col);
        assert_eq!(board, snapshot);
    }
}

#[test]
fn horizontal_win_detected() {
    // X on the bottom row at 0-3, O stacked above.
    let board = board_from(&[0, 0, 1, 1, 2, 2, 3]);
    assert_eq!(board.status(), Status::Won(Side::X));
    assert!(board.status().is_terminal());
    assert_eq!(board.status().winner(), Some(Side::X));
}

#[test]
fn vertical_win_detected() {
    let board = board_from(&[0, 1, 0, 1, 0, 1, 0]);
    assert_eq!(board.status(), Status::Won(Side::X));
}

#[test]
fn rising_diagonal_win_detected() {
    // X at (0,0), (1,1), (2,2), (3,3).
    let board = board_from(&[0, 1, 1, 2, 2, 3, 2, 3, 3, 5, 3]);
    assert_eq!(board.status(), Status::Won(Side::X));
}

#[test]
fn falling_diagonal_win_detected() {
    // X at (3,0), (2,1), (1,2), (0,3).
    let board = board_from(&[3, 2, 2, 1, 1, 0, 1, 0, 0, 4, 0]);
    assert_eq!(board.status(), Status::Won(Side::X));
}

#[test]
fn three_in_a_row_with_gap_is_not_a_win() {
    // X at columns 0, 1, 2 and 4 on the bottom row: a gap at 3.
    let board = board_from(&[0, 0, 1, 1, 2, 2, 4]);
    assert_eq!(board.status(), Status::InProgress);
}

#[test]
fn stacked_column_wins_despite_side_play() {
    // X drops 3, 3, 3; O drops 4, 4; X drops 3 -> vertical X win.
    let board = board_from(&[3, 4, 3, 4, 3, 5, 3]);
    assert_eq!(board.status(), Status::Won(Side::X));
}

#[test]
fn draw_on_full_board() {
    // Fill column pairs so each ends up as three of one side below
    // three of the other (col 0: XXXOOO, col 1: OOOXXX, and so on),
    // then alternate down column 6. The finished grid has no line of
    // four, and since discs are never removed, no intermediate
    // position can contain a line the final grid lacks.
    let mut moves = Vec::new();
    for pair in [(0, 1), (2, 3), (4, 5)] {
        for _ in 0..3 {
            moves.push(pair.0);
            moves.push(pair.1);
        }
        for _ in 0..3 {
            moves.push(pair.1);
            moves.push(pair.0);
        }
    }
    moves.extend([6; ROWS]);

    let mut board = Board::new();
    for &col in &moves {
        assert_eq!(board.status(), Status::InProgress);
        board.apply(col).unwrap();
    }
    assert_eq!(board.moves_played(), BOARD_SIZE);
    assert_eq!(board.status(), Status::Draw);
    assert!(board.legal_moves().is_empty());
}

#[test]
fn legal_moves_and_heights_stay_consistent() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    for _ in 0..50 {
        let mut board = Board::new();
        let mut per_column = [0usize; COLS];
        while board.status() == Status::InProgress {
            let legal = board.legal_moves();
            assert!(!legal.is_empty(), "in-progress game must have legal moves");
            for &c in &legal {
                assert!(per_column[c] < ROWS);
            }
            let col = legal[rng.gen_range(0..legal.len())];
            board.apply(col).unwrap();
            per_column[col] += 1;
        }
        assert_eq!(per_column.iter().sum::<usize>(), board.moves_played());
        if board.status() == Status::Draw {
            assert_eq!(board.moves_played(), BOARD_SIZE);
        }
    }
}

#[test]
fn random_games_round_trip_through_undo() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    for _ in 0..20 {
        let mut board = Board::new();
        let mut snapshots = vec![board.clone()];
        while board.status() == Status::InProgress {
            let legal = board.legal_moves();
            let col = legal[rng.gen_range(0..legal.len())];
            board.apply(col).unwrap();
            snapshots.push(board.clone());
        }
        while board.moves_played() > 0 {
            board.undo().unwrap();
            snapshots.pop();
            assert_eq!(&board, snapshots.last().unwrap());
        }
        assert_eq!(board, Board::new());
    }
}

#[test]
fn key_collapses_transpositions() {
    // Transposed move orders reaching the same discs produce one key.
    let a = board_from(&[0, 1, 2, 3]);
    let b = board_from(&[2, 3, 0, 1]);
    assert_eq!(a.key(), b.key());

    // Different discs, different key.
    let c = board_from(&[0, 1, 2, 4]);
    assert_ne!(a.key(), c.key());
}

#[test]
fn key_swaps_perspective_each_ply() {
    let a = board_from(&[3]);
    let key = a.key();
    assert_eq!(key.opponent, a.bitboard(Side::X));
    assert_eq!(key.mover, a.bitboard(Side::O));
}

#[test]
fn winning_move_probe_matches_apply() {
    let mut rng = ChaCha20Rng::seed_from_u64(11);
    for _ in 0..30 {
        let mut board = Board::new();
        while board.status() == Status::InProgress {
            let mover = board.side_to_move();
            let legal = board.legal_moves();
            for &c in &legal {
                let predicted = board.is_winning_move(mover, c);
                board.apply(c).unwrap();
                let actual = board.status() == Status::Won(mover);
                board.undo().unwrap();
                assert_eq!(predicted, actual, "probe disagrees with apply at col {c}");
            }
            let col = legal[rng.gen_range(0..legal.len())];
            board.apply(col).unwrap();
        }
    }
}
