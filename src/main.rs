use std::io::{self, BufRead, Write};

use tablut::{GameState, Move};

const HELP: &str = "Commands:
  e4-e6      play a move (column letter + row number)
  moves      list the legal moves for the side to play
  undo       take back the last move
  limit N    cap the game at N move pairs
  new        start over
  help       show this message
  quit       exit";

fn main() {
    println!("Tablut");
    println!("======\n");
    println!("{HELP}\n");

    let mut state = GameState::new();
    let stdin = io::stdin();
    print_position(&state);

    loop {
        print!("{}> ", state.turn());
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "new" => {
                state.init();
                print_position(&state);
            }
            "undo" => match state.undo() {
                Ok(()) => print_position(&state),
                Err(e) => println!("{e}"),
            },
            "moves" => {
                let moves = state.legal_moves(state.turn());
                let listed: Vec<String> = moves.iter().map(Move::to_string).collect();
                println!("{} legal moves: {}", listed.len(), listed.join(" "));
            }
            _ if input.starts_with("limit") => {
                match input["limit".len()..].trim().parse::<usize>() {
                    Ok(n) => match state.set_move_limit(n) {
                        Ok(()) => println!("move limit set to {n}"),
                        Err(e) => println!("{e}"),
                    },
                    Err(_) => println!("usage: limit N"),
                }
            }
            _ => match input.parse::<Move>() {
                Ok(mv) => match state.make_move(mv) {
                    Ok(()) => print_position(&state),
                    Err(e) => println!("{e}"),
                },
                Err(e) => println!("{e}"),
            },
        }

        if let Some(winner) = state.winner() {
            if state.repeated_position() {
                println!("Repeated position: {winner} wins.");
            } else {
                println!("{winner} wins.");
            }
            println!("(\"undo\" to take the move back, \"new\" to start over)");
        }
    }
}

fn print_position(state: &GameState) {
    println!("\n{state}");
    println!("Move {}, {} to play", state.move_count() + 1, state.turn());
}
