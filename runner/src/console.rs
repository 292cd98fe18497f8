// ═══════════════════════════════════════════════════════════════════════
// Console — hot-seat interactive shell. Renders the board, reads typed
// commands from each player in turn, and reports events and rejections.
// ═══════════════════════════════════════════════════════════════════════

use madness_engine::cards::{Card, CharacterName, EstateName, WeaponName};
use madness_engine::engine::{apply_command, available_exits, Command, Event};
use madness_engine::setup::{new_game, PlayerConfig};
use madness_engine::text::{board_text, describe_square};
use madness_engine::types::{CharacterPlace, Direction, GameState, Outcome, Side, TurnState};
use madness_engine::visibility::player_view;
use std::io::{self, BufRead, Write};

pub fn play(players: Option<usize>, seed: u64) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("=== Murder Madness === (seed {seed})\n");

    let count = match players {
        Some(n) if (3..=4).contains(&n) => n,
        _ => prompt_player_count(&mut lines),
    };
    let configs = prompt_players(&mut lines, count);

    let mut state = match new_game(&configs, seed) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Could not start the game: {e}");
            return;
        }
    };

    println!("\nCards are dealt. Type 'help' for the command list.\n");
    println!("{}", board_text(&state));

    while !state.game_over() {
        let seat = state.acting_seat();
        print_prompt_banner(&state, seat);

        print!("[{}] > ", state.players[seat].nickname);
        io::stdout().flush().ok();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => return,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Input::Quit => return,
            Input::Help => print_help(),
            Input::Board => println!("{}", board_text(&state)),
            Input::Hand => {
                let view = player_view(&state, seat);
                println!("Your hand: {}", card_list(&view.my_hand));
            }
            Input::Look(row, col) => println!("{}", describe_square(&state, row, col)),
            Input::Exits => print_exits(&state),
            Input::Command(command) => {
                let actor = state.players[seat].character;
                match apply_command(&mut state, actor, command) {
                    Ok(event) => print_event(&state, &event),
                    Err(e) => println!("Rejected: {e}."),
                }
            }
            Input::Unknown(word) => println!("Unknown command '{word}'. Type 'help'."),
        }
    }

    match state.outcome {
        Some(Outcome::Won { seat }) => {
            let winner = &state.players[seat];
            println!(
                "\n{} ({}) solved the murder! It was {}.",
                winner.nickname, winner.character, state.solution
            );
        }
        Some(Outcome::AllEliminated) => {
            println!(
                "\nEveryone guessed wrong. The murder goes unsolved; it was {}.",
                state.solution
            );
        }
        None => {}
    }
}

// ── Setup prompts ──────────────────────────────────────────────────────

fn prompt_player_count(lines: &mut impl Iterator<Item = io::Result<String>>) -> usize {
    loop {
        print!("How many players (3 or 4)? ");
        io::stdout().flush().ok();
        match lines.next() {
            Some(Ok(line)) => match line.trim().parse::<usize>() {
                Ok(n) if (3..=4).contains(&n) => return n,
                _ => println!("Please enter 3 or 4."),
            },
            _ => std::process::exit(0),
        }
    }
}

fn prompt_players(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    count: usize,
) -> Vec<PlayerConfig> {
    let mut available: Vec<CharacterName> = CharacterName::ALL.to_vec();
    let mut configs = Vec::with_capacity(count);
    for number in 1..=count {
        print!("Player {number} nickname: ");
        io::stdout().flush().ok();
        let nickname = match lines.next() {
            Some(Ok(line)) if !line.trim().is_empty() => line.trim().to_string(),
            Some(Ok(_)) => format!("Player {number}"),
            _ => std::process::exit(0),
        };

        let character = loop {
            let names: Vec<String> = available.iter().map(|c| c.to_string()).collect();
            print!("  Character ({}): ", names.join(", "));
            io::stdout().flush().ok();
            match lines.next() {
                Some(Ok(line)) => match line.trim().parse::<CharacterName>() {
                    Ok(c) if available.contains(&c) => break c,
                    Ok(_) => println!("  That character is taken."),
                    Err(()) => println!("  No such character."),
                },
                _ => std::process::exit(0),
            }
        };
        available.retain(|&c| c != character);
        configs.push(PlayerConfig {
            nickname,
            character,
        });
    }
    configs
}

// ── Per-turn banner ────────────────────────────────────────────────────

fn print_prompt_banner(state: &GameState, seat: usize) {
    let player = &state.players[seat];
    match state.turn {
        TurnState::AwaitingRefute { guess, .. } => {
            // Private handoff: only the refuter should read on.
            let guesser = &state.players[state.current_seat];
            println!(
                "\n{} guessed: {}. {}, you must refute.",
                guesser.nickname, guess, player.nickname
            );
            let view = player_view(state, seat);
            if let Some(options) = &view.refute_options {
                println!("(privately) You can reveal: {}", card_list(options));
            }
        }
        TurnState::AwaitingRoll => {
            println!(
                "\n-- Turn {}: {} ({}) -- roll to move.",
                state.turn_count + 1,
                player.nickname,
                player.character
            );
        }
        TurnState::Moving { moves_left } => {
            println!("{} moves left.", moves_left);
        }
        TurnState::InEstate => {
            if let CharacterPlace::InEstate(estate) = state.place(player.character) {
                println!(
                    "\n-- Turn {}: {} ({}) -- inside {}. Guess, solve, leave, or end.",
                    state.turn_count + 1,
                    player.nickname,
                    player.character,
                    estate
                );
            }
        }
    }
}

// ── Command parsing ────────────────────────────────────────────────────

enum Input {
    Command(Command),
    Board,
    Hand,
    Look(i16, i16),
    Exits,
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> Input {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["roll"] => Input::Command(Command::Roll),
        ["move", dir] => match parse_direction(dir) {
            Some(d) => Input::Command(Command::Move(d)),
            None => Input::Unknown(format!("move {dir}")),
        },
        ["leave", side] => match parse_side(side) {
            Some(s) => Input::Command(Command::LeaveEstate(s)),
            None => Input::Unknown(format!("leave {side}")),
        },
        ["guess", character, weapon] => {
            match (
                character.parse::<CharacterName>(),
                weapon.parse::<WeaponName>(),
            ) {
                (Ok(character), Ok(weapon)) => {
                    Input::Command(Command::Guess { character, weapon })
                }
                _ => Input::Unknown(line.to_string()),
            }
        }
        // The estate name comes last because it may be several words.
        ["solve", character, weapon, estate @ ..] if !estate.is_empty() => {
            match (
                character.parse::<CharacterName>(),
                weapon.parse::<WeaponName>(),
                estate.join(" ").parse::<EstateName>(),
            ) {
                (Ok(character), Ok(weapon), Ok(estate)) => Input::Command(Command::Solve {
                    character,
                    estate,
                    weapon,
                }),
                _ => Input::Unknown(line.to_string()),
            }
        }
        ["refute", card @ ..] if !card.is_empty() => match card.join(" ").parse::<Card>() {
            Ok(card) => Input::Command(Command::RefuteWith(card)),
            Err(()) => Input::Unknown(line.to_string()),
        },
        ["end"] => Input::Command(Command::EndTurn),
        ["board"] => Input::Board,
        ["hand"] => Input::Hand,
        ["look", row, col] => match (row.parse(), col.parse()) {
            (Ok(r), Ok(c)) => Input::Look(r, c),
            _ => Input::Unknown(line.to_string()),
        },
        ["exits"] => Input::Exits,
        ["help"] => Input::Help,
        ["quit"] | ["exit"] => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

fn parse_direction(word: &str) -> Option<Direction> {
    match word {
        "up" | "u" => Some(Direction::Up),
        "down" | "d" => Some(Direction::Down),
        "left" | "l" => Some(Direction::Left),
        "right" | "r" => Some(Direction::Right),
        _ => None,
    }
}

fn parse_side(word: &str) -> Option<Side> {
    match word {
        "left" => Some(Side::Left),
        "top" => Some(Side::Top),
        "right" => Some(Side::Right),
        "bottom" => Some(Side::Bottom),
        _ => None,
    }
}

// ── Output ─────────────────────────────────────────────────────────────

fn print_event(state: &GameState, event: &Event) {
    match event {
        Event::Rolled { value } => println!("You rolled {value}."),
        Event::Moved { to, moves_left } => {
            println!("Moved to ({}, {}). {} moves left.", to.row, to.col, moves_left)
        }
        Event::EnteredEstate { estate } => println!("You entered {estate}."),
        Event::LeftEstate { side, to } => println!(
            "You left through the {side} exit onto ({}, {}). Roll again to move.",
            to.row, to.col
        ),
        Event::GuessRefutable { guess, refuter } => println!(
            "Guess announced: {}. {} holds a matching card and must refute.",
            guess, state.players[*refuter].nickname
        ),
        Event::GuessUnrefuted { guess } => {
            println!("Guess announced: {guess}. Nobody could refute it!")
        }
        Event::CardRevealed { card, refuter } => println!(
            "(privately) {} shows you: {}.",
            state.players[*refuter].nickname, card
        ),
        Event::SolveWon { solution } => println!("Correct! It was {solution}."),
        Event::SolveFailed {
            solution,
            all_eliminated,
        } => {
            println!("(privately) Wrong. The envelope reads: {solution}.");
            if !all_eliminated {
                println!("You are out of the running but still play and refute.");
            }
        }
        Event::TurnEnded { next_seat } => {
            println!("Turn over. {} is up.", state.players[*next_seat].nickname)
        }
    }
}

fn print_exits(state: &GameState) {
    let character = state.active_character();
    match state.place(character) {
        CharacterPlace::InEstate(estate) => {
            let exits = available_exits(state, estate);
            if exits.is_empty() {
                println!("Every exit of {estate} is blocked.");
            } else {
                for (side, outer) in exits {
                    println!("{side} exit -> ({}, {})", outer.row, outer.col);
                }
            }
        }
        CharacterPlace::OnSquare(_) => println!("You are not inside an estate."),
    }
}

fn card_list(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_help() {
    println!(
        "\
Commands:
  roll                         roll the dice
  move up|down|left|right      step one square (u/d/l/r also work)
  leave left|top|right|bottom  exit the estate on that side
  guess <character> <weapon>   guess in the current estate
  solve <character> <weapon> <estate>
                               one-shot solve attempt (anywhere)
  refute <card>                reveal a card to the guesser
  end                          end your turn
  hand                         show your cards (privately)
  board                        redraw the board
  exits                        list usable exits of your estate
  look <row> <col>             describe a square
  help, quit"
    );
}
