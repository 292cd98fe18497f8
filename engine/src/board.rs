// ═══════════════════════════════════════════════════════════════════════
// Board construction — parses the fixed 24×24 layout into squares,
// estate topology (entrances, sides, display slots), and starting
// character positions.
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::{CharacterName, EstateName};
use crate::types::{CharacterPlace, EstateState, EstateTile, Pos, Side, Square};
use std::collections::HashMap;

pub const ROWS: usize = 24;
pub const COLS: usize = 24;

// Layout legend:
//   ' '        normal square
//   'x'        wall
//   'h m v c p' interior tile of the estate keyed by that letter
//   'e'        entrance; owning estate inferred from the tile to its
//              left, else the tile above (left takes priority)
//   'L B M P'  normal square pre-occupied by that character
const LAYOUT: [&str; ROWS] = [
    "                        ",
    "           L            ",
    "  hhhhh          mmmmm  ",
    "  hhhhe          mmmmm  ",
    "  hhhhh          mmmmm  ",
    "  hhhhh    xx    emmmm  ",
    "  hhheh    xx    mmmem  ",
    "                        ",
    "                        ",
    " B                      ",
    "         vvvevv         ",
    "     xx  vvvvve  xx     ",
    "     xx  evvvvv  xx     ",
    "         vvevvv         ",
    "                      P ",
    "                        ",
    "                        ",
    "  ceccc    xx    peppp  ",
    "  cccce    xx    ppppp  ",
    "  ccccc          ppppp  ",
    "  ccccc          epppp  ",
    "  ccccc          ppppp  ",
    "         M              ",
    "                        ",
];

/// Everything the layout determines: the square grid, per-estate
/// topology, and where each character token starts.
pub struct BuiltBoard {
    pub squares: Vec<Square>,
    pub estates: HashMap<EstateName, EstateState>,
    pub positions: HashMap<CharacterName, CharacterPlace>,
}

/// Build the board from the fixed layout. Cells are processed row-major
/// so that an entrance's left/up owner inference always finds an
/// already-constructed neighbour.
pub fn build_board() -> BuiltBoard {
    let mut squares: Vec<Square> = Vec::with_capacity(ROWS * COLS);
    let mut estates: HashMap<EstateName, EstateState> = EstateName::ALL
        .iter()
        .map(|&e| {
            (
                e,
                EstateState {
                    entrances: Vec::new(),
                    capacity: 0,
                    contents: Vec::new(),
                },
            )
        })
        .collect();
    let mut positions = HashMap::new();

    // First pass: construct every square.
    for (row, line) in LAYOUT.iter().enumerate() {
        for (col, token) in line.chars().enumerate() {
            let pos = Pos::new(row as u8, col as u8);
            let square = match token {
                ' ' => Square::Normal { occupant: None },
                'x' => Square::Wall,
                'e' => {
                    // Owning estate: the tile to the left if it is an
                    // estate tile, else the tile above.
                    let left = col
                        .checked_sub(1)
                        .and_then(|c| squares.get(row * COLS + c));
                    let above = row
                        .checked_sub(1)
                        .and_then(|r| squares.get(r * COLS + col));
                    let owner = match (left, above) {
                        (Some(Square::Estate(t)), _) => t.estate,
                        (_, Some(Square::Estate(t))) => t.estate,
                        _ => panic!("entrance at ({row},{col}) has no estate neighbour"),
                    };
                    estates.get_mut(&owner).unwrap().entrances.push(pos);
                    Square::Estate(EstateTile {
                        estate: owner,
                        entrance: true,
                        slot: None,
                        side: None,
                        outer: None,
                    })
                }
                c if c.is_ascii_lowercase() => {
                    let estate = EstateName::from_code(c)
                        .unwrap_or_else(|| panic!("unknown estate code '{c}'"));
                    Square::Estate(EstateTile {
                        estate,
                        entrance: false,
                        slot: None,
                        side: None,
                        outer: None,
                    })
                }
                c => {
                    let character = CharacterName::from_initial(c)
                        .unwrap_or_else(|| panic!("unknown layout token '{c}'"));
                    positions.insert(character, CharacterPlace::OnSquare(pos));
                    Square::Normal {
                        occupant: Some(character),
                    }
                }
            };
            squares.push(square);
        }
    }

    // Second pass: classify every estate tile by its non-estate
    // neighbours. 0 → interior display slot, 1 → side tile, 2 → corner.
    for row in 0..ROWS {
        for col in 0..COLS {
            let tile = match squares[row * COLS + col] {
                Square::Estate(t) => t,
                _ => continue,
            };

            let is_foreign = |r: i16, c: i16| -> bool {
                if r < 0 || r >= ROWS as i16 || c < 0 || c >= COLS as i16 {
                    return true;
                }
                match squares[r as usize * COLS + c as usize] {
                    Square::Estate(other) => other.estate != tile.estate,
                    _ => true,
                }
            };

            let on_board = |r: i16, c: i16| -> Option<Pos> {
                (r >= 0 && r < ROWS as i16 && c >= 0 && c < COLS as i16)
                    .then(|| Pos::new(r as u8, c as u8))
            };

            let (r, c) = (row as i16, col as i16);
            let mut sides = 0u8;
            let mut side = None;
            let mut outer = None;

            // Left else right, then top else bottom. A tile matching on
            // both axes keeps the second axis's side/outer, same as the
            // original board; with two matches it is a corner and the
            // side is discarded anyway. An off-board neighbour counts
            // as foreign but yields no outer square.
            if is_foreign(r, c - 1) {
                sides += 1;
                side = Some(Side::Left);
                outer = on_board(r, c - 1);
            } else if is_foreign(r, c + 1) {
                sides += 1;
                side = Some(Side::Right);
                outer = on_board(r, c + 1);
            }
            if is_foreign(r - 1, c) {
                sides += 1;
                side = Some(Side::Top);
                outer = on_board(r - 1, c);
            } else if is_foreign(r + 1, c) {
                sides += 1;
                side = Some(Side::Bottom);
                outer = on_board(r + 1, c);
            }

            let mut updated = tile;
            match sides {
                0 => {
                    // Interior display tile: next free index in this estate.
                    let estate = estates.get_mut(&tile.estate).unwrap();
                    updated.slot = Some(estate.capacity);
                    estate.capacity += 1;
                }
                1 => updated.side = side,
                _ => {} // corner: rendered via the estate's code letter
            }
            if tile.entrance {
                updated.outer = outer;
            }
            squares[row * COLS + col] = Square::Estate(updated);
        }
    }

    BuiltBoard {
        squares,
        estates,
        positions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cell_has_exactly_one_square() {
        let built = build_board();
        assert_eq!(built.squares.len(), ROWS * COLS);
    }

    #[test]
    fn estate_topology_matches_layout() {
        let built = build_board();

        // The four 5×5 estates show 9 interior tiles; Villa Celia (4×6) shows 8.
        assert_eq!(built.estates[&EstateName::HauntedHouse].capacity, 9);
        assert_eq!(built.estates[&EstateName::ManicManor].capacity, 9);
        assert_eq!(built.estates[&EstateName::CalamityCastle].capacity, 9);
        assert_eq!(built.estates[&EstateName::PerilPalace].capacity, 9);
        assert_eq!(built.estates[&EstateName::VillaCelia].capacity, 8);

        // Haunted House has entrances at (3,6) and (6,5); Villa Celia one
        // per side.
        assert_eq!(
            built.estates[&EstateName::HauntedHouse].entrances,
            vec![Pos::new(3, 6), Pos::new(6, 5)]
        );
        assert_eq!(built.estates[&EstateName::VillaCelia].entrances.len(), 4);
    }

    #[test]
    fn entrances_record_their_outer_square() {
        let built = build_board();
        for estate in EstateName::ALL {
            for &pos in &built.estates[&estate].entrances {
                match built.squares[pos.row as usize * COLS + pos.col as usize] {
                    Square::Estate(tile) => {
                        assert!(tile.entrance);
                        assert_eq!(tile.estate, estate);
                        let outer = tile.outer.expect("entrance without outer square");
                        // The outer square is walkable floor.
                        let idx = outer.row as usize * COLS + outer.col as usize;
                        assert!(matches!(built.squares[idx], Square::Normal { .. }));
                    }
                    _ => panic!("entrance position is not an estate tile"),
                }
            }
        }
    }

    #[test]
    fn all_four_characters_start_on_the_board() {
        let built = build_board();
        assert_eq!(built.positions.len(), 4);
        assert_eq!(
            built.positions[&CharacterName::Lucilla],
            CharacterPlace::OnSquare(Pos::new(1, 11))
        );
        assert_eq!(
            built.positions[&CharacterName::Bert],
            CharacterPlace::OnSquare(Pos::new(9, 1))
        );
        assert_eq!(
            built.positions[&CharacterName::Malina],
            CharacterPlace::OnSquare(Pos::new(22, 9))
        );
        assert_eq!(
            built.positions[&CharacterName::Percy],
            CharacterPlace::OnSquare(Pos::new(14, 22))
        );
    }
}
