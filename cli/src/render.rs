// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use goban_core::{Board, BoardSize, Color, Coord, GameState};

/// Render the board, including territory and dead stone marks once scoring
/// has started
pub fn render_board(board: &Board) -> String {
    let height = board.height();
    let mut output = String::new();

    let columns = board.column_names().join(" ");
    output.push_str(&format!("    {}\n", columns));

    for (y, row_name) in (0..height).zip(board.row_names()) {
        output.push_str(&format!("{:>2} ", row_name));
        for x in 0..board.width() {
            let coord = Coord::new(x, y);
            output.push(' ');
            output.push(symbol(board, coord));
        }
        output.push_str(&format!(" {}\n", row_name));
    }

    output.push_str(&format!("    {}\n", columns));
    output
}

/// One character per cell
fn symbol(board: &Board, coord: Coord) -> char {
    match (board.get(coord), board.owner(coord)) {
        (Color::Black, Color::None) => '●',
        (Color::White, Color::None) => '○',
        // Dead stones
        (Color::Black, _) | (Color::White, _) => 'x',
        (Color::None, Color::Black) => '#',
        (Color::None, Color::White) => '=',
        (Color::None, Color::None) if is_star_point(coord, board.size()) => '+',
        (Color::None, Color::None) => '·',
    }
}

/// Star points: every ordinal pair on 19x19, corners and centre otherwise
fn is_star_point(coord: Coord, size: BoardSize) -> bool {
    let ordinals = size.star_ordinals();
    if !ordinals.contains(&coord.x) || !ordinals.contains(&coord.y) {
        return false;
    }
    if size == BoardSize::Nineteen {
        return true;
    }
    let middle = ordinals[1];
    (coord.x == middle) == (coord.y == middle)
}

/// Status lines shown under the board
pub fn render_status(state: &GameState) -> String {
    let mut output = format!(
        "Move {} | captured: black {} white {}",
        state.move_number(),
        state.black_stones_captured(),
        state.white_stones_captured()
    );
    if let (Some(black), Some(white)) = (state.black_territory(), state.white_territory()) {
        output.push_str(&format!(" | score: black {} white {}", black, white));
    }
    if let Some(at) = state.last_move() {
        if !state.last_move_was_pass() {
            output.push_str(&format!(
                " | last: {}",
                at.label(state.board().height())
            ));
        }
    }
    output
}
