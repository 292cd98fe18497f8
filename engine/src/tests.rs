// ═══════════════════════════════════════════════════════════════════════
// Comprehensive test suite for the Murder Madness engine
// ═══════════════════════════════════════════════════════════════════════

use crate::board::{COLS, ROWS};
use crate::cards::*;
use crate::engine::{apply_command, available_exits, ActionError, Command, Event};
use crate::setup::{new_game, PlayerConfig};
use crate::text::{board_text, describe_square, square_glyph};
use crate::types::*;
use crate::visibility::player_view;

// ── Helpers ────────────────────────────────────────────────────────────

fn configs(n: usize) -> Vec<PlayerConfig> {
    CharacterName::ALL
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, &c)| PlayerConfig {
            nickname: format!("player{}", i + 1),
            character: c,
        })
        .collect()
}

fn game(seed: u64) -> GameState {
    new_game(&configs(4), seed).unwrap()
}

/// Pull a character off wherever it is and stand it on `pos`.
fn place_on(state: &mut GameState, character: CharacterName, pos: Pos) {
    remove_token(state, character);
    *state.square_at_mut(pos) = Square::Normal {
        occupant: Some(character),
    };
    state
        .positions
        .insert(character, CharacterPlace::OnSquare(pos));
}

/// Pull a character off wherever it is and drop it inside `estate`.
fn put_in_estate(state: &mut GameState, character: CharacterName, estate: EstateName) {
    remove_token(state, character);
    state
        .estates
        .get_mut(&estate)
        .unwrap()
        .contents
        .push(Card::Character(character));
    state
        .positions
        .insert(character, CharacterPlace::InEstate(estate));
}

fn remove_token(state: &mut GameState, character: CharacterName) {
    match state.place(character) {
        CharacterPlace::OnSquare(p) => {
            *state.square_at_mut(p) = Square::Normal { occupant: None };
        }
        CharacterPlace::InEstate(e) => {
            let contents = &mut state.estates.get_mut(&e).unwrap().contents;
            if let Some(i) = contents.iter().position(|&c| c == Card::Character(character)) {
                contents.remove(i);
            }
        }
    }
}

/// Make it `seat`'s turn, in the state a fresh turn would start in.
fn start_turn(state: &mut GameState, seat: usize) {
    state.current_seat = seat;
    state.turn = crate::engine::initial_turn_state(state, seat);
}

fn snapshot(state: &GameState) -> serde_json::Value {
    serde_json::to_value(state).unwrap()
}

// ── Grid ───────────────────────────────────────────────────────────────

#[test]
fn square_at_covers_exactly_the_grid() {
    let state = game(1);
    for row in 0..ROWS as i16 {
        for col in 0..COLS as i16 {
            assert!(state.square_at(row, col).is_some());
        }
    }
    assert!(state.square_at(-1, 0).is_none());
    assert!(state.square_at(0, -1).is_none());
    assert!(state.square_at(ROWS as i16, 0).is_none());
    assert!(state.square_at(0, COLS as i16).is_none());
}

#[test]
fn walls_and_interior_tiles_are_blocked_entrances_are_not() {
    let state = game(1);
    // Wall cluster at rows 5–6, cols 11–12.
    assert!(state.square_at(5, 11).unwrap().is_blocked());
    // Haunted House interior tile.
    assert!(state.square_at(3, 3).unwrap().is_blocked());
    // Haunted House entrance at (3,6).
    assert!(!state.square_at(3, 6).unwrap().is_blocked());
}

// ── Placement invariant ────────────────────────────────────────────────

#[test]
fn occupancy_and_contents_stay_consistent_with_positions() {
    let mut state = game(3);
    // Walk a few tokens around, then audit the tables.
    put_in_estate(&mut state, CharacterName::Bert, EstateName::VillaCelia);
    place_on(&mut state, CharacterName::Percy, Pos::new(8, 8));

    for &character in &CharacterName::ALL {
        match state.place(character) {
            CharacterPlace::OnSquare(pos) => {
                assert_eq!(
                    state.square_at(pos.row as i16, pos.col as i16),
                    Some(&Square::Normal {
                        occupant: Some(character)
                    })
                );
                for estate in EstateName::ALL {
                    assert!(!state
                        .estate(estate)
                        .contents
                        .contains(&Card::Character(character)));
                }
            }
            CharacterPlace::InEstate(estate) => {
                assert!(state
                    .estate(estate)
                    .contents
                    .contains(&Card::Character(character)));
            }
        }
    }
}

// ── Dealing ────────────────────────────────────────────────────────────

#[test]
fn hands_plus_solution_partition_the_deck() {
    for seed in [0u64, 9, 42, 777] {
        for n in [3usize, 4] {
            let state = new_game(&configs(n), seed).unwrap();
            let mut seen: Vec<Card> = state.solution.cards().to_vec();
            for p in &state.players {
                assert!(!p.hand.is_empty());
                for &c in &p.hand {
                    assert!(!state.solution.contains(c), "solution card dealt to a hand");
                    assert!(!seen.contains(&c), "card dealt twice");
                    seen.push(c);
                }
            }
            assert_eq!(seen.len(), 14);
        }
    }
}

#[test]
fn four_player_deal_is_three_three_three_two() {
    let state = game(11);
    let mut sizes: Vec<usize> = state.players.iter().map(|p| p.hand.len()).collect();
    assert_eq!(sizes.iter().sum::<usize>(), 11);
    sizes.sort_unstable();
    assert_eq!(sizes, vec![2, 3, 3, 3]);
}

// ── Dice ───────────────────────────────────────────────────────────────

#[test]
fn rolls_are_in_range_and_seed_deterministic() {
    let mut values = Vec::new();
    for counter in 0..50 {
        let mut state = game(5);
        start_turn(&mut state, 0);
        state.rng_counter = counter;
        let me = state.active_character();
        match apply_command(&mut state, me, Command::Roll).unwrap() {
            Event::Rolled { value } => {
                assert!((2..=12).contains(&value));
                values.push(value);
            }
            other => panic!("expected Rolled, got {other:?}"),
        }
    }
    // Same seed and counter reproduce the same roll.
    let mut a = game(5);
    let mut b = game(5);
    start_turn(&mut a, 0);
    start_turn(&mut b, 0);
    let actor = a.active_character();
    assert_eq!(
        apply_command(&mut a, actor, Command::Roll).unwrap(),
        apply_command(&mut b, actor, Command::Roll).unwrap()
    );
    // And the range is actually exercised at both ends somewhere.
    assert!(values.iter().any(|&v| v <= 4));
    assert!(values.iter().any(|&v| v >= 10));
}

#[test]
fn rolling_twice_is_rejected() {
    let mut state = game(5);
    start_turn(&mut state, 0);
    let me = state.active_character();
    apply_command(&mut state, me, Command::Roll).unwrap();
    assert_eq!(
        apply_command(&mut state, me, Command::Roll),
        Err(ActionError::WrongState)
    );
}

// ── Movement ───────────────────────────────────────────────────────────

#[test]
fn moves_consume_budget_and_update_both_squares() {
    let mut state = game(2);
    start_turn(&mut state, 0);
    let me = state.active_character();
    place_on(&mut state, me, Pos::new(8, 8));
    state.turn = TurnState::Moving { moves_left: 3 };

    let event = apply_command(&mut state, me, Command::Move(Direction::Right)).unwrap();
    assert_eq!(
        event,
        Event::Moved {
            to: Pos::new(8, 9),
            moves_left: 2
        }
    );
    assert_eq!(
        state.square_at(8, 8),
        Some(&Square::Normal { occupant: None })
    );
    assert_eq!(
        state.square_at(8, 9),
        Some(&Square::Normal {
            occupant: Some(me)
        })
    );
    assert_eq!(state.place(me), CharacterPlace::OnSquare(Pos::new(8, 9)));
}

#[test]
fn rejected_moves_mutate_nothing() {
    let mut state = game(2);
    start_turn(&mut state, 0);
    let me = state.active_character();
    // Stand at the top edge next to another character.
    place_on(&mut state, me, Pos::new(0, 5));
    let other = state.players[1].character;
    place_on(&mut state, other, Pos::new(0, 6));
    state.turn = TurnState::Moving { moves_left: 4 };

    let before = snapshot(&state);
    assert_eq!(
        apply_command(&mut state, me, Command::Move(Direction::Up)),
        Err(ActionError::OutOfBounds)
    );
    assert_eq!(
        apply_command(&mut state, me, Command::Move(Direction::Right)),
        Err(ActionError::Blocked)
    );
    assert_eq!(snapshot(&state), before);
    assert_eq!(state.turn, TurnState::Moving { moves_left: 4 });
}

#[test]
fn exhausted_budget_does_not_auto_end_the_turn() {
    let mut state = game(2);
    start_turn(&mut state, 0);
    let me = state.active_character();
    place_on(&mut state, me, Pos::new(8, 8));
    state.turn = TurnState::Moving { moves_left: 0 };

    assert_eq!(
        apply_command(&mut state, me, Command::Move(Direction::Left)),
        Err(ActionError::NoMovesLeft)
    );
    assert_eq!(state.turn, TurnState::Moving { moves_left: 0 });
    // The turn only ends on the explicit command.
    let event = apply_command(&mut state, me, Command::EndTurn).unwrap();
    assert_eq!(event, Event::TurnEnded { next_seat: 1 });
}

#[test]
fn entering_an_estate_consumes_the_whole_budget() {
    let mut state = game(2);
    start_turn(&mut state, 0);
    let me = state.active_character();
    // Stand just outside the Haunted House entrance at (3,6).
    place_on(&mut state, me, Pos::new(3, 7));
    state.turn = TurnState::Moving { moves_left: 9 };

    let event = apply_command(&mut state, me, Command::Move(Direction::Left)).unwrap();
    assert_eq!(
        event,
        Event::EnteredEstate {
            estate: EstateName::HauntedHouse
        }
    );
    assert_eq!(
        state.place(me),
        CharacterPlace::InEstate(EstateName::HauntedHouse)
    );
    assert!(state
        .estate(EstateName::HauntedHouse)
        .contents
        .contains(&Card::Character(me)));
    // No moves remain: the character is in the estate, not on a square.
    assert_eq!(state.turn, TurnState::InEstate);
    assert_eq!(
        state.square_at(3, 7),
        Some(&Square::Normal { occupant: None })
    );
}

// ── Estate exit ────────────────────────────────────────────────────────

#[test]
fn leaving_places_the_character_on_the_outer_square() {
    let mut state = game(2);
    start_turn(&mut state, 0);
    let me = state.active_character();
    put_in_estate(&mut state, me, EstateName::HauntedHouse);
    state.turn = TurnState::InEstate;

    // (3,6) is the right-side entrance; its outer square is (3,7).
    let event = apply_command(&mut state, me, Command::LeaveEstate(Side::Right)).unwrap();
    assert_eq!(
        event,
        Event::LeftEstate {
            side: Side::Right,
            to: Pos::new(3, 7)
        }
    );
    assert_eq!(state.place(me), CharacterPlace::OnSquare(Pos::new(3, 7)));
    assert!(!state
        .estate(EstateName::HauntedHouse)
        .contents
        .contains(&Card::Character(me)));
    // Leaving grants a fresh roll for the remainder of the turn.
    assert_eq!(state.turn, TurnState::AwaitingRoll);
}

#[test]
fn leaving_through_a_missing_side_is_rejected() {
    let mut state = game(2);
    start_turn(&mut state, 0);
    let me = state.active_character();
    put_in_estate(&mut state, me, EstateName::HauntedHouse);
    state.turn = TurnState::InEstate;

    // Haunted House only has Right and Bottom entrances.
    assert_eq!(
        apply_command(&mut state, me, Command::LeaveEstate(Side::Top)),
        Err(ActionError::NoExitOnSide)
    );
}

#[test]
fn all_exits_blocked_fails_without_mutation() {
    let mut state = game(2);
    start_turn(&mut state, 0);
    let me = state.active_character();
    put_in_estate(&mut state, me, EstateName::HauntedHouse);
    state.turn = TurnState::InEstate;

    // Park the other characters on both outer squares: (3,7) and (7,5).
    let others: Vec<CharacterName> = CharacterName::ALL
        .iter()
        .copied()
        .filter(|&c| c != me)
        .collect();
    place_on(&mut state, others[0], Pos::new(3, 7));
    place_on(&mut state, others[1], Pos::new(7, 5));

    assert!(available_exits(&state, EstateName::HauntedHouse).is_empty());
    let before = snapshot(&state);
    for side in Side::ALL {
        assert!(apply_command(&mut state, me, Command::LeaveEstate(side)).is_err());
    }
    assert_eq!(snapshot(&state), before);
}

// ── Guess and refute ───────────────────────────────────────────────────

#[test]
fn guessing_outside_an_estate_is_rejected() {
    let mut state = game(4);
    start_turn(&mut state, 0);
    let me = state.active_character();
    assert_eq!(
        apply_command(
            &mut state,
            me,
            Command::Guess {
                character: CharacterName::Bert,
                weapon: WeaponName::Knife
            }
        ),
        Err(ActionError::WrongState)
    );
}

#[test]
fn refutation_stops_at_the_first_holder_in_seating_order() {
    // Scenario: Lucilla's player at the Haunted House guesses
    // {Bert, Haunted House, Knife}. Bert's player (seated next) holds
    // Knife; Malina's player also holds a guessed card but is never
    // consulted.
    let mut state = game(6);
    start_turn(&mut state, 0);
    put_in_estate(&mut state, CharacterName::Lucilla, EstateName::HauntedHouse);
    state.turn = TurnState::InEstate;
    state.players[0].hand = vec![Card::Weapon(WeaponName::Broom)];
    state.players[1].hand = vec![Card::Weapon(WeaponName::Knife)];
    state.players[2].hand = vec![Card::Character(CharacterName::Bert)];
    state.players[3].hand = vec![Card::Estate(EstateName::PerilPalace)];

    let event = apply_command(
        &mut state,
        CharacterName::Lucilla,
        Command::Guess {
            character: CharacterName::Bert,
            weapon: WeaponName::Knife,
        },
    )
    .unwrap();

    let guess = Guess {
        character: CharacterName::Bert,
        estate: EstateName::HauntedHouse,
        weapon: WeaponName::Knife,
    };
    assert_eq!(event, Event::GuessRefutable { guess, refuter: 1 });
    assert_eq!(state.turn, TurnState::AwaitingRefute { guess, refuter: 1 });

    // The refuter must reveal a guessed card they actually hold.
    assert_eq!(
        apply_command(
            &mut state,
            CharacterName::Bert,
            Command::RefuteWith(Card::Weapon(WeaponName::Broom))
        ),
        Err(ActionError::CardNotInGuess)
    );
    assert_eq!(
        apply_command(
            &mut state,
            CharacterName::Bert,
            Command::RefuteWith(Card::Character(CharacterName::Bert))
        ),
        Err(ActionError::CardNotHeld)
    );
    let event = apply_command(
        &mut state,
        CharacterName::Bert,
        Command::RefuteWith(Card::Weapon(WeaponName::Knife)),
    )
    .unwrap();
    assert_eq!(
        event,
        Event::CardRevealed {
            card: Card::Weapon(WeaponName::Knife),
            refuter: 1
        }
    );
    // The reveal ends the guesser's turn.
    assert_eq!(state.current_seat, 1);
}

#[test]
fn guessed_tokens_relocate_immediately() {
    let mut state = game(6);
    start_turn(&mut state, 0);
    put_in_estate(&mut state, CharacterName::Lucilla, EstateName::VillaCelia);
    state.turn = TurnState::InEstate;
    // Nobody can refute, so the guess also ends the turn.
    for p in &mut state.players {
        p.hand.clear();
    }

    let bert_square = match state.place(CharacterName::Bert) {
        CharacterPlace::OnSquare(p) => p,
        CharacterPlace::InEstate(_) => panic!("Bert starts on a square"),
    };
    let knife_home = state.weapons[&WeaponName::Knife];

    let event = apply_command(
        &mut state,
        CharacterName::Lucilla,
        Command::Guess {
            character: CharacterName::Bert,
            weapon: WeaponName::Knife,
        },
    )
    .unwrap();
    assert!(matches!(event, Event::GuessUnrefuted { .. }));

    // Bert vacated his square and is now inside Villa Celia.
    assert_eq!(
        state.place(CharacterName::Bert),
        CharacterPlace::InEstate(EstateName::VillaCelia)
    );
    assert_eq!(
        state.square_at(bert_square.row as i16, bert_square.col as i16),
        Some(&Square::Normal { occupant: None })
    );
    // The knife transferred between estates.
    assert_eq!(state.weapons[&WeaponName::Knife], EstateName::VillaCelia);
    if knife_home != EstateName::VillaCelia {
        assert!(!state
            .estate(knife_home)
            .contents
            .contains(&Card::Weapon(WeaponName::Knife)));
    }
    assert!(state
        .estate(EstateName::VillaCelia)
        .contents
        .contains(&Card::Weapon(WeaponName::Knife)));
    // Unrefuted: the turn passed on.
    assert_eq!(state.current_seat, 1);
}

#[test]
fn unclaimed_characters_block_squares_and_follow_guesses() {
    // Three players: Percy has no player, but his token stays on the
    // board and behaves like any other.
    let mut state = new_game(&configs(3), 7).unwrap();
    assert_eq!(
        state.place(CharacterName::Percy),
        CharacterPlace::OnSquare(Pos::new(14, 22))
    );

    start_turn(&mut state, 0);
    let me = state.active_character();
    place_on(&mut state, me, Pos::new(14, 21));
    state.turn = TurnState::Moving { moves_left: 2 };
    assert_eq!(
        apply_command(&mut state, me, Command::Move(Direction::Right)),
        Err(ActionError::Blocked)
    );

    // A guess naming him drags the token into the estate.
    put_in_estate(&mut state, me, EstateName::HauntedHouse);
    state.turn = TurnState::InEstate;
    for p in &mut state.players {
        p.hand.clear();
    }
    apply_command(
        &mut state,
        me,
        Command::Guess {
            character: CharacterName::Percy,
            weapon: WeaponName::Shovel,
        },
    )
    .unwrap();
    assert_eq!(
        state.place(CharacterName::Percy),
        CharacterPlace::InEstate(EstateName::HauntedHouse)
    );
    assert_eq!(
        state.square_at(14, 22),
        Some(&Square::Normal { occupant: None })
    );
}

#[test]
fn pending_refutation_locks_out_everyone_else() {
    let mut state = game(6);
    start_turn(&mut state, 0);
    put_in_estate(&mut state, CharacterName::Lucilla, EstateName::HauntedHouse);
    state.turn = TurnState::InEstate;
    state.players[1].hand = vec![Card::Weapon(WeaponName::Knife)];

    apply_command(
        &mut state,
        CharacterName::Lucilla,
        Command::Guess {
            character: CharacterName::Bert,
            weapon: WeaponName::Knife,
        },
    )
    .unwrap();

    // The guesser cannot keep acting, and the refuter can only reveal.
    assert_eq!(
        apply_command(&mut state, CharacterName::Lucilla, Command::EndTurn),
        Err(ActionError::NotYourTurn)
    );
    assert_eq!(
        apply_command(&mut state, CharacterName::Bert, Command::Roll),
        Err(ActionError::RefutePending)
    );
    // A bystander cannot jump the queue either.
    assert_eq!(
        apply_command(
            &mut state,
            CharacterName::Malina,
            Command::RefuteWith(Card::Weapon(WeaponName::Knife))
        ),
        Err(ActionError::NotYourTurn)
    );
}

// ── Solve ──────────────────────────────────────────────────────────────

#[test]
fn correct_solve_wins_and_leaves_other_flags_alone() {
    let mut state = game(8);
    start_turn(&mut state, 2);
    let me = state.active_character();
    let solution = state.solution;

    let event = apply_command(
        &mut state,
        me,
        Command::Solve {
            character: solution.character,
            estate: solution.estate,
            weapon: solution.weapon,
        },
    )
    .unwrap();
    assert_eq!(event, Event::SolveWon { solution });
    assert_eq!(state.outcome, Some(Outcome::Won { seat: 2 }));
    assert!(state.players[2].solve_attempted);
    for (seat, p) in state.players.iter().enumerate() {
        if seat != 2 {
            assert!(!p.solve_attempted);
        }
    }
    // Game over: nothing further is accepted.
    assert_eq!(
        apply_command(&mut state, me, Command::EndTurn),
        Err(ActionError::GameOver)
    );
}

fn wrong_triple(solution: Guess) -> (CharacterName, EstateName, WeaponName) {
    let character = CharacterName::ALL
        .iter()
        .copied()
        .find(|&c| c != solution.character)
        .unwrap();
    (character, solution.estate, solution.weapon)
}

#[test]
fn failed_solve_eliminates_but_keeps_the_player_in_rotation() {
    let mut state = game(8);
    start_turn(&mut state, 0);
    let me = state.active_character();
    let (character, estate, weapon) = wrong_triple(state.solution);

    let event = apply_command(
        &mut state,
        me,
        Command::Solve {
            character,
            estate,
            weapon,
        },
    )
    .unwrap();
    assert_eq!(
        event,
        Event::SolveFailed {
            solution: state.solution,
            all_eliminated: false
        }
    );
    assert!(state.players[0].solve_attempted);
    assert!(state.outcome.is_none());
    // The failed attempt ended the turn.
    assert_eq!(state.current_seat, 1);

    // On their next turn they still move, but can never guess or solve.
    start_turn(&mut state, 0);
    state.turn = TurnState::InEstate;
    put_in_estate(&mut state, me, EstateName::HauntedHouse);
    assert_eq!(
        apply_command(
            &mut state,
            me,
            Command::Guess {
                character: CharacterName::Bert,
                weapon: WeaponName::Knife
            }
        ),
        Err(ActionError::Eliminated)
    );
    assert_eq!(
        apply_command(
            &mut state,
            me,
            Command::Solve {
                character,
                estate,
                weapon
            }
        ),
        Err(ActionError::AlreadyAttempted)
    );
}

#[test]
fn last_failed_solve_ends_the_game_with_no_winner() {
    let mut state = game(8);
    for seat in 0..3 {
        state.players[seat].solve_attempted = true;
    }
    start_turn(&mut state, 3);
    let me = state.active_character();
    let (character, estate, weapon) = wrong_triple(state.solution);

    let event = apply_command(
        &mut state,
        me,
        Command::Solve {
            character,
            estate,
            weapon,
        },
    )
    .unwrap();
    assert_eq!(
        event,
        Event::SolveFailed {
            solution: state.solution,
            all_eliminated: true
        }
    );
    assert_eq!(state.outcome, Some(Outcome::AllEliminated));
}

#[test]
fn eliminated_players_still_refute() {
    let mut state = game(6);
    start_turn(&mut state, 0);
    put_in_estate(&mut state, CharacterName::Lucilla, EstateName::HauntedHouse);
    state.turn = TurnState::InEstate;
    state.players[1].solve_attempted = true;
    state.players[1].hand = vec![Card::Weapon(WeaponName::Knife)];

    let event = apply_command(
        &mut state,
        CharacterName::Lucilla,
        Command::Guess {
            character: CharacterName::Bert,
            weapon: WeaponName::Knife,
        },
    )
    .unwrap();
    assert!(matches!(event, Event::GuessRefutable { refuter: 1, .. }));
}

// ── Acting out of turn ─────────────────────────────────────────────────

#[test]
fn only_the_current_player_may_act() {
    let mut state = game(9);
    start_turn(&mut state, 0);
    let bystander = state.players[2].character;
    let me = state.active_character();
    assert_eq!(
        apply_command(&mut state, bystander, Command::Roll),
        Err(ActionError::NotYourTurn)
    );
    assert_eq!(
        apply_command(
            &mut state,
            me,
            Command::RefuteWith(Card::Weapon(WeaponName::Broom))
        ),
        Err(ActionError::NoGuessPending)
    );
}

#[test]
fn ending_a_turn_rotates_and_reinitializes() {
    let mut state = new_game(&configs(3), 9).unwrap();
    start_turn(&mut state, 2);
    let seat0 = state.players[0].character;
    put_in_estate(&mut state, seat0, EstateName::PerilPalace);
    let me = state.active_character();
    let event = apply_command(&mut state, me, Command::EndTurn).unwrap();
    // Three players: seat 2 wraps to seat 0, who starts inside an estate.
    assert_eq!(event, Event::TurnEnded { next_seat: 0 });
    assert_eq!(state.turn, TurnState::InEstate);
}

// ── Visibility ─────────────────────────────────────────────────────────

#[test]
fn views_carry_private_hands_only_for_the_viewer() {
    let state = game(10);
    for seat in 0..state.players.len() {
        let view = player_view(&state, seat);
        assert_eq!(view.my_hand, state.players[seat].hand);
        assert_eq!(view.solution, None);
        assert_eq!(view.refute_options, None);
        for (i, info) in view.seats.iter().enumerate() {
            assert_eq!(info.hand_size as usize, state.players[i].hand.len());
        }
    }
}

#[test]
fn refute_options_are_shown_only_to_the_refuter() {
    let mut state = game(10);
    start_turn(&mut state, 0);
    put_in_estate(&mut state, CharacterName::Lucilla, EstateName::HauntedHouse);
    state.turn = TurnState::InEstate;
    state.players[2].hand = vec![
        Card::Weapon(WeaponName::Knife),
        Card::Character(CharacterName::Bert),
    ];
    state.players[1].hand = vec![Card::Weapon(WeaponName::Shovel)];
    state.players[3].hand = vec![Card::Estate(EstateName::VillaCelia)];

    apply_command(
        &mut state,
        CharacterName::Lucilla,
        Command::Guess {
            character: CharacterName::Bert,
            weapon: WeaponName::Knife,
        },
    )
    .unwrap();

    let refuter_view = player_view(&state, 2);
    let options = refuter_view.refute_options.unwrap();
    assert_eq!(options.len(), 2);
    assert!(options.contains(&Card::Character(CharacterName::Bert)));
    assert!(options.contains(&Card::Weapon(WeaponName::Knife)));
    for seat in [0, 1, 3] {
        assert_eq!(player_view(&state, seat).refute_options, None);
    }
}

#[test]
fn solution_becomes_visible_once_the_game_ends() {
    let mut state = game(10);
    start_turn(&mut state, 0);
    let solution = state.solution;
    let me = state.active_character();
    apply_command(
        &mut state,
        me,
        Command::Solve {
            character: solution.character,
            estate: solution.estate,
            weapon: solution.weapon,
        },
    )
    .unwrap();
    for seat in 0..state.players.len() {
        assert_eq!(player_view(&state, seat).solution, Some(solution));
    }
}

// ── Text rendering ─────────────────────────────────────────────────────

#[test]
fn square_descriptions_match_their_contents() {
    let mut state = game(12);
    assert_eq!(describe_square(&state, 5, 11), "A wall square. Blocks movement.");
    assert_eq!(
        describe_square(&state, 1, 11),
        "Lucilla on a normal square."
    );
    assert_eq!(
        describe_square(&state, 0, 0),
        "A normal square. Can be walked on."
    );

    put_in_estate(&mut state, CharacterName::Percy, EstateName::HauntedHouse);
    let description = describe_square(&state, 3, 3);
    assert!(description.starts_with("Haunted House estate. Contents: "));
    assert!(description.contains("Percy"));
}

#[test]
fn glyphs_follow_the_display_rules() {
    let mut state = game(12);
    assert_eq!(square_glyph(&state, 5, 11), 'X');
    assert_eq!(square_glyph(&state, 1, 11), 'L');
    assert_eq!(square_glyph(&state, 3, 6), 'e');
    assert_eq!(square_glyph(&state, 2, 2), 'h'); // corner
    assert_eq!(square_glyph(&state, 3, 2), '|'); // left side
    assert_eq!(square_glyph(&state, 2, 3), '-'); // top side

    // Interior tiles show the estate contents by slot index. Slot 0 of
    // the Haunted House is (3,3); make its first content deterministic.
    state
        .estates
        .get_mut(&EstateName::HauntedHouse)
        .unwrap()
        .contents
        .clear();
    put_in_estate(&mut state, CharacterName::Percy, EstateName::HauntedHouse);
    assert_eq!(square_glyph(&state, 3, 3), 'P');
    assert_eq!(square_glyph(&state, 3, 4), ' ');
}

#[test]
fn board_text_renders_every_row_with_rulers() {
    let state = game(12);
    let text = board_text(&state);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), ROWS + 1);
    assert!(lines[1].starts_with("00 "));
    assert!(lines[ROWS].starts_with("23 "));
    assert!(text.contains('X'));
    assert!(text.contains('e'));
}
