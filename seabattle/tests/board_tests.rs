use seabattle::board::{
    Board, CannotPlaceReason, CannotShootReason, Cell, Coordinate, ShotOutcome,
};
use seabattle::ships::ShipClass;

fn coord(s: &str) -> Coordinate {
    s.parse().unwrap()
}

fn ship_cell_count(board: &Board) -> usize {
    board
        .iter_rows()
        .flatten()
        .filter(|&cell| cell == Cell::Ship)
        .count()
}

fn grid_is_empty(board: &Board) -> bool {
    board.iter_rows().flatten().all(|cell| cell == Cell::Empty)
}

#[test]
fn place_marks_exactly_the_run() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Carrier, coord("A1"), coord("A5"))
        .unwrap();
    for col in 0..5 {
        assert_eq!(board.cell(Coordinate::new(0, col)), Some(Cell::Ship));
    }
    assert_eq!(board.cell(coord("A6")), Some(Cell::Empty));
    assert_eq!(ship_cell_count(&board), ShipClass::Carrier.len());
}

#[test]
fn place_accepts_endpoints_in_either_order() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Battleship, coord("D5"), coord("D2"))
        .unwrap();
    for col in 1..5 {
        assert_eq!(board.cell(Coordinate::new(3, col)), Some(Cell::Ship));
    }
}

#[test]
fn place_vertical_run() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Submarine, coord("A1"), coord("C1"))
        .unwrap();
    for row in 0..3 {
        assert_eq!(board.cell(Coordinate::new(row, 0)), Some(Cell::Ship));
    }
}

#[test]
fn diagonal_placement_rejected() {
    let mut board = Board::new();
    assert_eq!(
        board
            .place_ship(ShipClass::Destroyer, coord("A1"), coord("B2"))
            .unwrap_err(),
        CannotPlaceReason::Misaligned
    );
    assert!(grid_is_empty(&board));
}

#[test]
fn equal_endpoints_rejected() {
    let mut board = Board::new();
    assert_eq!(
        board
            .place_ship(ShipClass::Destroyer, coord("A1"), coord("A1"))
            .unwrap_err(),
        CannotPlaceReason::Misaligned
    );
    assert!(grid_is_empty(&board));
}

#[test]
fn wrong_length_rejected() {
    let mut board = Board::new();
    assert_eq!(
        board
            .place_ship(ShipClass::Destroyer, coord("A1"), coord("A4"))
            .unwrap_err(),
        CannotPlaceReason::WrongLength {
            expected: 2,
            actual: 4
        }
    );
    assert!(grid_is_empty(&board));
}

#[test]
fn out_of_bounds_placement_rejected() {
    let mut board = Board::new();
    // The parser can never produce these, but the board re-validates raw
    // coordinates before mutating.
    assert_eq!(
        board
            .place_ship(
                ShipClass::Carrier,
                Coordinate::new(0, 8),
                Coordinate::new(0, 12)
            )
            .unwrap_err(),
        CannotPlaceReason::OutOfBounds
    );
    assert!(grid_is_empty(&board));
}

#[test]
fn overlapping_placement_rejected() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Carrier, coord("A1"), coord("A5"))
        .unwrap();
    assert_eq!(
        board
            .place_ship(ShipClass::Cruiser, coord("A3"), coord("C3"))
            .unwrap_err(),
        CannotPlaceReason::TooClose
    );
    assert_eq!(ship_cell_count(&board), ShipClass::Carrier.len());
}

#[test]
fn adjacent_placement_rejected() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Carrier, coord("A1"), coord("A5"))
        .unwrap();
    // Row B borders row A, so any cell of this run is inside the buffer.
    assert_eq!(
        board
            .place_ship(ShipClass::Cruiser, coord("B1"), coord("B3"))
            .unwrap_err(),
        CannotPlaceReason::TooClose
    );
}

#[test]
fn diagonally_adjacent_placement_rejected() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Destroyer, coord("A1"), coord("A2"))
        .unwrap();
    // B3 touches A2 corner to corner.
    assert_eq!(
        board
            .place_ship(ShipClass::Submarine, coord("B3"), coord("D3"))
            .unwrap_err(),
        CannotPlaceReason::TooClose
    );
}

#[test]
fn one_cell_gap_is_enough() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Destroyer, coord("A1"), coord("A2"))
        .unwrap();
    // Row B stays open water between the two ships.
    board
        .place_ship(ShipClass::Cruiser, coord("C1"), coord("C3"))
        .unwrap();
    assert_eq!(
        ship_cell_count(&board),
        ShipClass::Destroyer.len() + ShipClass::Cruiser.len()
    );
}

#[test]
fn shot_on_open_water_is_a_miss_both_times() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Destroyer, coord("A1"), coord("A2"))
        .unwrap();
    assert_eq!(board.receive_shot(coord("E5")).unwrap(), ShotOutcome::Miss);
    assert_eq!(board.cell(coord("E5")), Some(Cell::Miss));
    assert_eq!(board.receive_shot(coord("E5")).unwrap(), ShotOutcome::Miss);
}

#[test]
fn shot_on_ship_is_a_hit_both_times() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Carrier, coord("A1"), coord("A5"))
        .unwrap();
    assert_eq!(board.receive_shot(coord("A3")).unwrap(), ShotOutcome::Hit);
    assert_eq!(board.cell(coord("A3")), Some(Cell::Hit));
    assert_eq!(board.receive_shot(coord("A3")).unwrap(), ShotOutcome::Hit);
}

#[test]
fn sinking_the_only_ship_is_victory() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Destroyer, coord("A1"), coord("A2"))
        .unwrap();
    assert_eq!(board.receive_shot(coord("A1")).unwrap(), ShotOutcome::Hit);
    assert!(board.has_remaining_ships());
    assert_eq!(
        board.receive_shot(coord("A2")).unwrap(),
        ShotOutcome::Victory
    );
    assert!(!board.has_remaining_ships());
}

#[test]
fn sinking_with_fleet_remaining_is_sunk() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Destroyer, coord("A1"), coord("A2"))
        .unwrap();
    board
        .place_ship(ShipClass::Cruiser, coord("C4"), coord("C6"))
        .unwrap();
    assert_eq!(board.receive_shot(coord("A1")).unwrap(), ShotOutcome::Hit);
    assert_eq!(board.receive_shot(coord("A2")).unwrap(), ShotOutcome::Sunk);
    assert!(board.has_remaining_ships());
}

#[test]
fn reshooting_a_sunk_ship_reports_sunk_again() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Destroyer, coord("A1"), coord("A2"))
        .unwrap();
    board
        .place_ship(ShipClass::Cruiser, coord("C4"), coord("C6"))
        .unwrap();
    board.receive_shot(coord("A1")).unwrap();
    assert_eq!(board.receive_shot(coord("A2")).unwrap(), ShotOutcome::Sunk);
    // Classification looks at the shot cell's neighbors, not at ship
    // identity, so the destroyed ship reads as freshly sunk once more.
    assert_eq!(board.receive_shot(coord("A2")).unwrap(), ShotOutcome::Sunk);
}

#[test]
fn out_of_grid_shot_changes_nothing() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Destroyer, coord("A1"), coord("A2"))
        .unwrap();
    assert_eq!(
        board.receive_shot(Coordinate::new(11, 0)).unwrap_err(),
        CannotShootReason::OutOfBounds
    );
    assert_eq!(
        board.receive_shot(Coordinate::new(0, 10)).unwrap_err(),
        CannotShootReason::OutOfBounds
    );
    assert_eq!(board.cell(coord("A1")), Some(Cell::Ship));
    assert_eq!(ship_cell_count(&board), ShipClass::Destroyer.len());
}

#[test]
fn masked_view_hides_intact_ships_only() {
    let mut board = Board::new();
    board
        .place_ship(ShipClass::Destroyer, coord("A1"), coord("A2"))
        .unwrap();
    board.receive_shot(coord("A1")).unwrap();
    board.receive_shot(coord("B5")).unwrap();
    let masked: Vec<Vec<Cell>> = board
        .iter_rows()
        .map(|row| row.map(Cell::masked).collect())
        .collect();
    assert_eq!(masked[0][0], Cell::Hit);
    assert_eq!(masked[0][1], Cell::Empty);
    assert_eq!(masked[1][4], Cell::Miss);
    assert_eq!(board.cell(coord("A2")), Some(Cell::Ship));
}

#[test]
fn empty_board_has_no_remaining_ships() {
    let board = Board::new();
    assert!(!board.has_remaining_ships());
    assert!(grid_is_empty(&board));
}

#[test]
fn check_placement_never_mutates() {
    let board = Board::new();
    board
        .check_placement(ShipClass::Carrier, coord("A1"), coord("A5"))
        .unwrap();
    assert!(grid_is_empty(&board));
}
