// ═══════════════════════════════════════════════════════════════════════
// Turn engine — the per-player state machine and command application
//
// Architecture:
//   The engine is a pure state machine. It never does I/O and never
//   calls agents. Shells and harnesses loop: read a command from the
//   acting player, call `apply_command()`, report the returned Event
//   (or ActionError) back to them.
//
//   Suspension is simply "awaiting the next command". A pending guess
//   parks the turn in TurnState::AwaitingRefute until the refuter
//   reveals; every other state waits on the current player.
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::{Card, CharacterName, EstateName, Guess, WeaponName};
use crate::types::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ── Commands ───────────────────────────────────────────────────────────

/// Everything a player can ask the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Roll the dice to start moving.
    Roll,
    /// Step one square in a direction.
    Move(Direction),
    /// Leave the current estate through an exit on the chosen side.
    LeaveEstate(Side),
    /// Guess from inside an estate; the estate card is implied.
    Guess {
        character: CharacterName,
        weapon: WeaponName,
    },
    /// One-shot solve attempt; all three cards freely chosen.
    Solve {
        character: CharacterName,
        estate: EstateName,
        weapon: WeaponName,
    },
    /// Reveal a card to the guesser (pending refuter only).
    RefuteWith(Card),
    /// Explicitly end the turn.
    EndTurn,
}

// ── Events ─────────────────────────────────────────────────────────────

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Rolled { value: u8 },
    Moved { to: Pos, moves_left: u8 },
    EnteredEstate { estate: EstateName },
    LeftEstate { side: Side, to: Pos },
    /// A guess was made and `refuter` holds at least one of its cards.
    /// The turn is suspended until they reveal.
    GuessRefutable { guess: Guess, refuter: usize },
    /// A guess was made and nobody could refute it. Turn over.
    GuessUnrefuted { guess: Guess },
    /// The refuter privately revealed `card` to the guesser. Turn over.
    CardRevealed { card: Card, refuter: usize },
    /// Correct solve attempt: game over, the acting player wins.
    SolveWon { solution: Guess },
    /// Failed solve attempt: the player is eliminated. The solution is
    /// shown only to them. `all_eliminated` means the game is over too.
    SolveFailed { solution: Guess, all_eliminated: bool },
    TurnEnded { next_seat: usize },
}

// ── Errors ─────────────────────────────────────────────────────────────

/// A rejected command. Nothing was mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// The game has ended; no further commands are accepted.
    GameOver,
    /// It is not this character's player's turn to act.
    NotYourTurn,
    /// Move target is off the board.
    OutOfBounds,
    /// Move target square is blocked.
    Blocked,
    /// The command does not fit the current turn state (rolling twice,
    /// moving before rolling, guessing outside an estate, ...).
    WrongState,
    /// Out of movement budget for this turn.
    NoMovesLeft,
    /// Guessing after a solve attempt is forbidden.
    Eliminated,
    /// Solve attempts are once per player, ever.
    AlreadyAttempted,
    /// The estate has no entrance on the chosen side.
    NoExitOnSide,
    /// The square outside the chosen exit is occupied.
    ExitBlocked,
    /// A guess is pending; only the refuter's reveal is accepted.
    RefutePending,
    /// RefuteWith outside a pending guess.
    NoGuessPending,
    /// The revealed card is not one of the three guessed cards.
    CardNotInGuess,
    /// The revealed card is not in the refuter's hand.
    CardNotHeld,
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::GameOver => write!(f, "the game is over"),
            ActionError::NotYourTurn => write!(f, "it is not your turn"),
            ActionError::OutOfBounds => write!(f, "that square is off the board"),
            ActionError::Blocked => write!(f, "that square is blocked"),
            ActionError::WrongState => write!(f, "that action is not available right now"),
            ActionError::NoMovesLeft => write!(f, "out of moves"),
            ActionError::Eliminated => write!(f, "eliminated players cannot guess"),
            ActionError::AlreadyAttempted => write!(f, "you have already made your solve attempt"),
            ActionError::NoExitOnSide => write!(f, "the estate has no exit on that side"),
            ActionError::ExitBlocked => write!(f, "that exit is blocked"),
            ActionError::RefutePending => write!(f, "waiting for a refutation"),
            ActionError::NoGuessPending => write!(f, "there is no guess to refute"),
            ActionError::CardNotInGuess => write!(f, "that card was not guessed"),
            ActionError::CardNotHeld => write!(f, "you do not hold that card"),
        }
    }
}

impl std::error::Error for ActionError {}

// ── Command application ────────────────────────────────────────────────

/// Apply one command on behalf of `actor` (the acting player's
/// character). Returns the resulting event, or rejects the command with
/// no state change.
pub fn apply_command(
    state: &mut GameState,
    actor: CharacterName,
    command: Command,
) -> Result<Event, ActionError> {
    if state.game_over() {
        return Err(ActionError::GameOver);
    }

    // A pending refutation locks everyone else out, and the refuter may
    // only reveal.
    if let TurnState::AwaitingRefute { guess, refuter } = state.turn {
        if state.players[refuter].character != actor {
            return Err(ActionError::NotYourTurn);
        }
        return match command {
            Command::RefuteWith(card) => apply_refute(state, guess, refuter, card),
            _ => Err(ActionError::RefutePending),
        };
    }

    if state.active_character() != actor {
        return Err(ActionError::NotYourTurn);
    }

    match command {
        Command::Roll => apply_roll(state),
        Command::Move(dir) => apply_move(state, dir),
        Command::LeaveEstate(side) => apply_leave(state, side),
        Command::Guess { character, weapon } => apply_guess(state, character, weapon),
        Command::Solve {
            character,
            estate,
            weapon,
        } => apply_solve(state, character, estate, weapon),
        Command::RefuteWith(_) => Err(ActionError::NoGuessPending),
        Command::EndTurn => Ok(end_turn(state)),
    }
}

// ── Dice ───────────────────────────────────────────────────────────────

/// One uniform draw over [2, 12] — deliberately NOT the sum of two d6,
/// matching the original game's dice.
fn apply_roll(state: &mut GameState) -> Result<Event, ActionError> {
    if state.turn != TurnState::AwaitingRoll {
        return Err(ActionError::WrongState);
    }
    let mut rng =
        ChaCha8Rng::seed_from_u64(state.seed.wrapping_add(state.rng_counter.wrapping_mul(999961)));
    state.rng_counter += 1;
    let value: u8 = rng.gen_range(2..=12);
    state.turn = TurnState::Moving { moves_left: value };
    Ok(Event::Rolled { value })
}

// ── Movement ───────────────────────────────────────────────────────────

fn apply_move(state: &mut GameState, dir: Direction) -> Result<Event, ActionError> {
    let moves_left = match state.turn {
        TurnState::Moving { moves_left } => moves_left,
        _ => return Err(ActionError::WrongState),
    };
    if moves_left == 0 {
        return Err(ActionError::NoMovesLeft);
    }

    let character = state.active_character();
    let from = match state.place(character) {
        CharacterPlace::OnSquare(pos) => pos,
        // Moving state implies the character is on a square.
        CharacterPlace::InEstate(_) => return Err(ActionError::WrongState),
    };

    let (row, col) = from.step(dir);
    let target = match state.square_at(row, col) {
        Some(sq) => *sq,
        None => return Err(ActionError::OutOfBounds),
    };
    if target.is_blocked() {
        return Err(ActionError::Blocked);
    }
    let to = Pos::new(row as u8, col as u8);

    match target {
        Square::Normal { .. } => {
            vacate(state, from);
            *state.square_at_mut(to) = Square::Normal {
                occupant: Some(character),
            };
            state
                .positions
                .insert(character, CharacterPlace::OnSquare(to));
            let left = moves_left - 1;
            state.turn = TurnState::Moving { moves_left: left };
            Ok(Event::Moved {
                to,
                moves_left: left,
            })
        }
        Square::Estate(tile) => {
            // Unblocked estate tiles are always entrances. Entering
            // consumes the whole remaining move budget.
            vacate(state, from);
            state
                .positions
                .insert(character, CharacterPlace::InEstate(tile.estate));
            state
                .estate_mut(tile.estate)
                .contents
                .push(Card::Character(character));
            state.turn = TurnState::InEstate;
            Ok(Event::EnteredEstate {
                estate: tile.estate,
            })
        }
        Square::Wall => unreachable!("walls are always blocked"),
    }
}

fn vacate(state: &mut GameState, pos: Pos) {
    *state.square_at_mut(pos) = Square::Normal { occupant: None };
}

// ── Estate exit ────────────────────────────────────────────────────────

/// Exits currently usable from an estate: one `(side, outer square)`
/// pair per entrance whose outer square is unblocked.
pub fn available_exits(state: &GameState, estate: EstateName) -> Vec<(Side, Pos)> {
    let mut exits = Vec::new();
    for &pos in &state.estate(estate).entrances {
        let tile = match state.square_at(pos.row as i16, pos.col as i16) {
            Some(Square::Estate(t)) => *t,
            _ => continue,
        };
        let (side, outer) = match (tile.side, tile.outer) {
            (Some(s), Some(o)) => (s, o),
            _ => continue,
        };
        let blocked = state
            .square_at(outer.row as i16, outer.col as i16)
            .map_or(true, |sq| sq.is_blocked());
        if !blocked {
            exits.push((side, outer));
        }
    }
    exits
}

fn apply_leave(state: &mut GameState, side: Side) -> Result<Event, ActionError> {
    if state.turn != TurnState::InEstate {
        return Err(ActionError::WrongState);
    }
    let character = state.active_character();
    let estate = match state.place(character) {
        CharacterPlace::InEstate(e) => e,
        CharacterPlace::OnSquare(_) => return Err(ActionError::WrongState),
    };

    // Distinguish "no such exit" from "exit exists but is blocked".
    let has_side = state.estate(estate).entrances.iter().any(|&pos| {
        matches!(
            state.square_at(pos.row as i16, pos.col as i16),
            Some(Square::Estate(t)) if t.side == Some(side)
        )
    });
    if !has_side {
        return Err(ActionError::NoExitOnSide);
    }
    let outer = match available_exits(state, estate)
        .into_iter()
        .find(|&(s, _)| s == side)
    {
        Some((_, outer)) => outer,
        None => return Err(ActionError::ExitBlocked),
    };

    let estate_state = state.estate_mut(estate);
    if let Some(i) = estate_state
        .contents
        .iter()
        .position(|&c| c == Card::Character(character))
    {
        estate_state.contents.remove(i);
    }
    *state.square_at_mut(outer) = Square::Normal {
        occupant: Some(character),
    };
    state
        .positions
        .insert(character, CharacterPlace::OnSquare(outer));
    // Leaving costs the pre-exit movement opportunity; the player rolls
    // afresh for the rest of the turn.
    state.turn = TurnState::AwaitingRoll;
    Ok(Event::LeftEstate { side, to: outer })
}

// ── Guess / refute ─────────────────────────────────────────────────────

fn apply_guess(
    state: &mut GameState,
    character: CharacterName,
    weapon: WeaponName,
) -> Result<Event, ActionError> {
    if state.turn != TurnState::InEstate {
        return Err(ActionError::WrongState);
    }
    if state.current_player().solve_attempted {
        return Err(ActionError::Eliminated);
    }
    let estate = match state.place(state.active_character()) {
        CharacterPlace::InEstate(e) => e,
        CharacterPlace::OnSquare(_) => return Err(ActionError::WrongState),
    };
    let guess = Guess {
        character,
        estate,
        weapon,
    };

    // Token relocation happens immediately, win or lose the refutation.
    move_character_to_estate(state, character, estate);
    move_weapon_to_estate(state, weapon, estate);

    // Walk seats after the guesser, wrapping; stop at the first holder.
    let n = state.players.len();
    for delta in 1..n {
        let seat = (state.current_seat + delta) % n;
        if guess.cards().iter().any(|&c| state.players[seat].holds(c)) {
            state.turn = TurnState::AwaitingRefute {
                guess,
                refuter: seat,
            };
            return Ok(Event::GuessRefutable {
                guess,
                refuter: seat,
            });
        }
    }

    // Nobody holds any of the three cards; the guess stands and the
    // turn is over.
    end_turn(state);
    Ok(Event::GuessUnrefuted { guess })
}

fn apply_refute(
    state: &mut GameState,
    guess: Guess,
    refuter: usize,
    card: Card,
) -> Result<Event, ActionError> {
    if !guess.contains(card) {
        return Err(ActionError::CardNotInGuess);
    }
    if !state.players[refuter].holds(card) {
        return Err(ActionError::CardNotHeld);
    }
    end_turn(state);
    Ok(Event::CardRevealed { card, refuter })
}

/// Relocate a character token into an estate, wherever it currently is.
/// No-op if it is already there.
fn move_character_to_estate(state: &mut GameState, character: CharacterName, estate: EstateName) {
    match state.place(character) {
        CharacterPlace::InEstate(current) if current == estate => {}
        CharacterPlace::InEstate(current) => {
            let contents = &mut state.estate_mut(current).contents;
            if let Some(i) = contents.iter().position(|&c| c == Card::Character(character)) {
                contents.remove(i);
            }
            state
                .estate_mut(estate)
                .contents
                .push(Card::Character(character));
            state
                .positions
                .insert(character, CharacterPlace::InEstate(estate));
        }
        CharacterPlace::OnSquare(pos) => {
            vacate(state, pos);
            state
                .estate_mut(estate)
                .contents
                .push(Card::Character(character));
            state
                .positions
                .insert(character, CharacterPlace::InEstate(estate));
        }
    }
}

/// Relocate a weapon token between estates. No-op if already there.
fn move_weapon_to_estate(state: &mut GameState, weapon: WeaponName, estate: EstateName) {
    let current = state.weapons[&weapon];
    if current == estate {
        return;
    }
    let contents = &mut state.estate_mut(current).contents;
    if let Some(i) = contents.iter().position(|&c| c == Card::Weapon(weapon)) {
        contents.remove(i);
    }
    state.estate_mut(estate).contents.push(Card::Weapon(weapon));
    state.weapons.insert(weapon, estate);
}

// ── Solve ──────────────────────────────────────────────────────────────

fn apply_solve(
    state: &mut GameState,
    character: CharacterName,
    estate: EstateName,
    weapon: WeaponName,
) -> Result<Event, ActionError> {
    if state.current_player().solve_attempted {
        return Err(ActionError::AlreadyAttempted);
    }

    // The flag flips unconditionally, win or lose.
    state.players[state.current_seat].solve_attempted = true;

    let attempt = Guess {
        character,
        estate,
        weapon,
    };
    if attempt == state.solution {
        state.outcome = Some(Outcome::Won {
            seat: state.current_seat,
        });
        return Ok(Event::SolveWon {
            solution: state.solution,
        });
    }

    let all_eliminated = state.players.iter().all(|p| p.solve_attempted);
    if all_eliminated {
        state.outcome = Some(Outcome::AllEliminated);
    } else {
        end_turn(state);
    }
    Ok(Event::SolveFailed {
        solution: state.solution,
        all_eliminated,
    })
}

// ── Turn rotation ──────────────────────────────────────────────────────

/// Rotate to the next seat and re-initialize the turn state from that
/// character's location.
fn end_turn(state: &mut GameState) -> Event {
    state.turn_count += 1;
    state.current_seat = (state.current_seat + 1) % state.players.len();
    state.turn = initial_turn_state(state, state.current_seat);
    Event::TurnEnded {
        next_seat: state.current_seat,
    }
}

/// The state a turn starts in: InEstate if the character is inside one,
/// else AwaitingRoll.
pub fn initial_turn_state(state: &GameState, seat: usize) -> TurnState {
    match state.place(state.players[seat].character) {
        CharacterPlace::InEstate(_) => TurnState::InEstate,
        CharacterPlace::OnSquare(_) => TurnState::AwaitingRoll,
    }
}
