// ═══════════════════════════════════════════════════════════════════════
// Text rendering — board glyphs and human-readable square descriptions.
// Pure queries; presentation layers print the results.
// ═══════════════════════════════════════════════════════════════════════

use crate::board::{COLS, ROWS};
use crate::types::{GameState, Square};

/// The single-character glyph for a square:
///   Normal   — occupant initial or blank
///   Wall     — 'X'
///   entrance — 'e'
///   side     — '|' (left/right) or '-' (top/bottom)
///   corner   — the estate's code letter
///   interior — initial of the estate content at its slot, or blank
pub fn square_glyph(state: &GameState, row: usize, col: usize) -> char {
    match state.square_at(row as i16, col as i16) {
        None => ' ',
        Some(Square::Wall) => 'X',
        Some(Square::Normal { occupant }) => occupant.map_or(' ', |c| c.initial()),
        Some(Square::Estate(tile)) => {
            if tile.entrance {
                return 'e';
            }
            if let Some(side) = tile.side {
                return match side {
                    crate::types::Side::Left | crate::types::Side::Right => '|',
                    crate::types::Side::Top | crate::types::Side::Bottom => '-',
                };
            }
            match tile.slot {
                // Interior display tile: show the content at this index.
                Some(i) => state
                    .estate(tile.estate)
                    .contents
                    .get(i as usize)
                    .map_or(' ', |card| card.initial()),
                // Corner.
                None => tile.estate.code(),
            }
        }
    }
}

/// Render the whole grid with row/column rulers.
pub fn board_text(state: &GameState) -> String {
    let mut out = String::new();
    out.push_str("   ");
    for col in 0..COLS {
        out.push(char::from_digit((col % 10) as u32, 10).unwrap());
        out.push(' ');
    }
    out.push('\n');
    for row in 0..ROWS {
        out.push_str(&format!("{row:02} "));
        for col in 0..COLS {
            out.push(square_glyph(state, row, col));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// Human-readable description of one square, for the "look" query.
pub fn describe_square(state: &GameState, row: i16, col: i16) -> String {
    match state.square_at(row, col) {
        None => "Out of bounds.".to_string(),
        Some(Square::Wall) => "A wall square. Blocks movement.".to_string(),
        Some(Square::Normal { occupant: Some(c) }) => format!("{c} on a normal square."),
        Some(Square::Normal { occupant: None }) => {
            "A normal square. Can be walked on.".to_string()
        }
        Some(Square::Estate(tile)) => {
            let contents = state
                .estate(tile.estate)
                .contents
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} estate. Contents: {}", tile.estate, contents)
        }
    }
}
