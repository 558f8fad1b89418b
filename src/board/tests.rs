use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_pos_index_roundtrip_uses_fixed_stride() {
    let pos = Pos::new(7, 7);
    assert_eq!(pos.to_index(), 7 * 16 + 7);
    assert_eq!(Pos::from_index(pos.to_index()), pos);
}

#[test]
fn test_pos_ordering_is_row_major() {
    assert!(Pos::new(0, 0) < Pos::new(0, 1));
    assert!(Pos::new(0, 14) < Pos::new(1, 0));
}

#[test]
fn test_pos_offset_respects_size() {
    let pos = Pos::new(0, 4);
    assert_eq!(pos.offset(0, 1, 1, 5), None);
    assert_eq!(pos.offset(1, -1, 2, 5), Some(Pos::new(2, 2)));
    assert_eq!(pos.offset(-1, 0, 1, 5), None);
}

#[test]
fn test_new_board_is_empty() {
    let board = Board::new();
    assert_eq!(board.size(), BOARD_SIZE);
    assert!(board.is_board_empty());
    assert_eq!(board.stone_count(), 0);
    assert_eq!(board.empty_count(), 225);
    assert_eq!(board.center(), Pos::new(7, 7));
}

#[test]
fn test_with_size_clamps() {
    assert_eq!(Board::with_size(3).size(), MIN_BOARD_SIZE);
    assert_eq!(Board::with_size(19).size(), MAX_BOARD_SIZE);
    assert_eq!(Board::with_size(9).center(), Pos::new(4, 4));
}

#[test]
fn test_place_and_remove() {
    let mut board = Board::new();
    let pos = Pos::new(3, 4);
    board.place_stone(pos, Stone::Black);
    assert_eq!(board.get(pos), Stone::Black);
    assert!(!board.is_empty(pos));
    board.remove_stone(pos);
    assert!(board.is_empty(pos));
    assert!(board.is_board_empty());
}

#[test]
fn test_try_place_rejects_without_mutation() {
    let mut board = Board::new();
    assert_eq!(board.try_place(7, 7, Stone::Black), Ok(Pos::new(7, 7)));

    let snapshot = board.clone();
    assert_eq!(
        board.try_place(7, 7, Stone::White),
        Err(MoveError::Occupied(Pos::new(7, 7)))
    );
    assert!(matches!(
        board.try_place(-1, 3, Stone::White),
        Err(MoveError::OutOfBounds { .. })
    ));
    assert!(matches!(
        board.try_place(3, 15, Stone::White),
        Err(MoveError::OutOfBounds { .. })
    ));
    assert_eq!(board.try_place(0, 0, Stone::Empty), Err(MoveError::EmptyStone));
    assert_eq!(board, snapshot);
}

#[test]
fn test_occupied_iterates_row_major() {
    let mut board = Board::new();
    board.place_stone(Pos::new(9, 2), Stone::White);
    board.place_stone(Pos::new(1, 8), Stone::Black);
    board.place_stone(Pos::new(1, 3), Stone::White);

    let order: Vec<Pos> = board.occupied().iter_ones().collect();
    assert_eq!(order, vec![Pos::new(1, 3), Pos::new(1, 8), Pos::new(9, 2)]);
}

#[test]
fn test_diagram_roundtrip() {
    let text = "\
.....
.XO..
..X..
.....
....O
";
    let board: Board = text.parse().unwrap();
    assert_eq!(board.size(), 5);
    assert_eq!(board.get(Pos::new(1, 1)), Stone::Black);
    assert_eq!(board.get(Pos::new(1, 2)), Stone::White);
    assert_eq!(board.get(Pos::new(4, 4)), Stone::White);
    assert_eq!(board.to_string(), text);
}

#[test]
fn test_diagram_errors() {
    assert_eq!("...\n...\n...".parse::<Board>(), Err(ParseBoardError::BadSize(3)));
    assert!(matches!(
        ".....\n....\n.....\n.....\n.....".parse::<Board>(),
        Err(ParseBoardError::RaggedRow { row: 1, found: 4, expected: 5 })
    ));
    assert!(matches!(
        ".....\n..?..\n.....\n.....\n.....".parse::<Board>(),
        Err(ParseBoardError::BadChar { row: 1, ch: '?' })
    ));
}
