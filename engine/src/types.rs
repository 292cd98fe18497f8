// ═══════════════════════════════════════════════════════════════════════
// Core types — grid squares, placement, players, turn machine, GameState
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::{Card, CharacterName, EstateName, Guess, WeaponName};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Positions and directions ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub fn new(row: u8, col: u8) -> Pos {
        Pos { row, col }
    }

    /// The cell one step in `dir`, as signed coordinates. May be off-board.
    pub fn step(self, dir: Direction) -> (i16, i16) {
        let (dr, dc) = dir.offset();
        (self.row as i16 + dr, self.col as i16 + dc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn offset(self) -> (i16, i16) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Which side of an estate a boundary tile sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Top, Side::Right, Side::Bottom];
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "Left"),
            Side::Top => write!(f, "Top"),
            Side::Right => write!(f, "Right"),
            Side::Bottom => write!(f, "Bottom"),
        }
    }
}

// ── Squares ────────────────────────────────────────────────────────────

/// A tile belonging to an estate. Entrances are walkable and funnel
/// characters into the estate's contents; every other estate tile is
/// display-only and blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstateTile {
    pub estate: EstateName,
    pub entrance: bool,
    /// Display index into the estate's contents. Interior tiles only.
    pub slot: Option<u8>,
    /// Which side of the estate this tile is on, if exactly one.
    pub side: Option<Side>,
    /// The square directly outside. Entrances only; used for exit checks.
    pub outer: Option<Pos>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Square {
    /// Walkable floor, holding at most one character token.
    Normal { occupant: Option<CharacterName> },
    /// Always blocked, never holds anything.
    Wall,
    Estate(EstateTile),
}

impl Square {
    /// The sole movement gate: true if a character cannot step here.
    pub fn is_blocked(&self) -> bool {
        match self {
            Square::Normal { occupant } => occupant.is_some(),
            Square::Wall => true,
            Square::Estate(tile) => !tile.entrance,
        }
    }
}

// ── Character placement ────────────────────────────────────────────────

/// Where a character token is. A character is always in exactly one of
/// these two places; the type makes "both" and "neither" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterPlace {
    OnSquare(Pos),
    InEstate(EstateName),
}

// ── Estates ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstateState {
    /// Entrance tiles, in board row-major order.
    pub entrances: Vec<Pos>,
    /// Number of interior display tiles. Bounds what is shown, not how
    /// many cards the estate can actually hold.
    pub capacity: u8,
    /// Cards currently inside, in insertion order.
    pub contents: Vec<Card>,
}

// ── Players ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// 1-based player number in seating order.
    pub number: u8,
    pub nickname: String,
    pub character: CharacterName,
    /// Private. Populated once at deal time.
    pub hand: Vec<Card>,
    /// Flips once, permanently, on any solve attempt. An eliminated
    /// player still takes turns and still refutes.
    pub solve_attempted: bool,
}

impl PlayerState {
    pub fn holds(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }
}

// ── Turn machine ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// On a square, dice not yet rolled.
    AwaitingRoll,
    /// Rolled; `moves_left` successful steps remain.
    Moving { moves_left: u8 },
    /// Inside an estate: may guess, solve, leave, or end.
    InEstate,
    /// A guess is on the table and `refuter` (a seat index) must reveal.
    AwaitingRefute { guess: Guess, refuter: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The player at `seat` solved the murder.
    Won { seat: usize },
    /// Every player attempted a solve and failed.
    AllEliminated,
}

// ── Game state ─────────────────────────────────────────────────────────

/// The whole game in one owned aggregate. All transition functions take
/// this explicitly; there are no ambient singletons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// 24×24 grid in row-major order.
    pub squares: Vec<Square>,
    pub estates: HashMap<EstateName, EstateState>,
    /// Placement table for every character token, seated or not.
    pub positions: HashMap<CharacterName, CharacterPlace>,
    /// Which estate each weapon token is in.
    pub weapons: HashMap<WeaponName, EstateName>,
    /// Players in seating order.
    pub players: Vec<PlayerState>,
    /// The secret triple. Disjoint from every hand.
    pub solution: Guess,
    pub current_seat: usize,
    pub turn: TurnState,
    pub outcome: Option<Outcome>,
    pub turn_count: u32,

    // Deterministic RNG: each roll derives a fresh stream from these.
    pub seed: u64,
    pub rng_counter: u64,
}

impl GameState {
    pub fn rows(&self) -> usize {
        crate::board::ROWS
    }

    pub fn cols(&self) -> usize {
        crate::board::COLS
    }

    /// Square lookup, None out of bounds. Signed coordinates so callers
    /// can probe neighbours without their own bounds checks.
    pub fn square_at(&self, row: i16, col: i16) -> Option<&Square> {
        if row < 0 || row >= crate::board::ROWS as i16 || col < 0 || col >= crate::board::COLS as i16
        {
            return None;
        }
        Some(&self.squares[row as usize * crate::board::COLS + col as usize])
    }

    pub(crate) fn square_at_mut(&mut self, pos: Pos) -> &mut Square {
        &mut self.squares[pos.row as usize * crate::board::COLS + pos.col as usize]
    }

    pub fn player(&self, seat: usize) -> &PlayerState {
        &self.players[seat]
    }

    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.current_seat]
    }

    /// The character token of the player whose turn it is.
    pub fn active_character(&self) -> CharacterName {
        self.players[self.current_seat].character
    }

    /// The seat expected to act next: the pending refuter if a guess is
    /// waiting, otherwise the current player.
    pub fn acting_seat(&self) -> usize {
        match self.turn {
            TurnState::AwaitingRefute { refuter, .. } => refuter,
            _ => self.current_seat,
        }
    }

    pub fn seat_of(&self, character: CharacterName) -> Option<usize> {
        self.players.iter().position(|p| p.character == character)
    }

    pub fn estate(&self, name: EstateName) -> &EstateState {
        &self.estates[&name]
    }

    pub(crate) fn estate_mut(&mut self, name: EstateName) -> &mut EstateState {
        self.estates.get_mut(&name).unwrap()
    }

    pub fn place(&self, character: CharacterName) -> CharacterPlace {
        self.positions[&character]
    }

    pub fn game_over(&self) -> bool {
        self.outcome.is_some()
    }
}
