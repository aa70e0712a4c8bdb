//! CLI round example.
//!
//! Set `RUST_LOG=bjseat=debug` to watch the engine's logs on stderr.

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjseat::{
    Action, Card, GameStateView, MemoryStore, PlayerAction, RoundOptions, Table, UserId,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("Blackjack round example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let table = Table::new(MemoryStore::new(), RoundOptions::default().with_penetration(0.75), seed);

    let assisted = matches!(prompt_line("Show strategy hints? (y/n): ").as_str(), "y" | "yes");
    let round = match table.start_round(UserId(1), assisted) {
        Ok(round) => round,
        Err(err) => {
            println!("Could not start a round: {err}");
            return;
        }
    };

    loop {
        let Ok(view) = table.view(round.id) else {
            break;
        };

        let Some(wager) = prompt_i64(&format!("Wager (stack {}, 0 to quit): ", view.stack)) else {
            break;
        };
        if wager == 0 {
            println!("Goodbye.");
            break;
        }

        let mut view = match table.place_wager(round.id, wager) {
            Ok(view) => view,
            Err(err) => {
                println!("Wager error: {err}");
                continue;
            }
        };

        while let Some(hand) = view.active_player_hand_id {
            print_table(&view);
            println!("{}", format_actions(&view));
            if let Some(hint) = view.ai_suggestion {
                println!("Hint: {hint}");
            }

            let action = match prompt_line("Action: ").as_str() {
                "h" | "hit" => PlayerAction::Hit,
                "s" | "stand" => PlayerAction::Stand,
                "d" | "double" => PlayerAction::Double,
                "p" | "split" => PlayerAction::Split,
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            match table.act(round.id, hand, action) {
                Ok(next) => view = next,
                Err(err) => println!("Action error: {err}"),
            }
        }

        print_table(&view);
        for result in &view.finished_hands {
            let verdict = if result.outcome.is_player_win() {
                colorize("won", "32")
            } else {
                colorize("did not win", "90")
            };
            println!(
                "Hand {}: {:?}, {verdict} ({} vs {}), net {}",
                result.player_hand_id,
                result.outcome,
                result.player_value,
                result.dealer_value,
                result.stack_diff
            );
        }
        println!("Stack: {}\n", view.stack);
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_i64(prompt: &str) -> Option<i64> {
    loop {
        let input = prompt_line(prompt);
        if input.is_empty() || input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<i64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(view: &GameStateView) {
    if let Some(dealer) = &view.dealer_hand {
        let hidden = if dealer.hole_hidden { " ??" } else { "" };
        println!(
            "\nDealer: {}{hidden} (value {})",
            format_cards(&dealer.cards),
            dealer.value
        );
    }

    for hand in &view.player_hands {
        let marker = if view.active_player_hand_id == Some(hand.id) {
            "*"
        } else {
            " "
        };
        let status = hand
            .outcome
            .map_or_else(|| String::from("in play"), |outcome| format!("{outcome:?}"));
        println!(
            "{marker} Hand {}: {} | value {} | wager {} | {status}",
            hand.id,
            format_cards(&hand.cards),
            hand.value,
            hand.wager
        );
    }
    println!();
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_actions(view: &GameStateView) -> String {
    let parts: Vec<String> = [
        ("hit", "h", Action::Hit),
        ("stand", "s", Action::Stand),
        ("double", "d", Action::Double),
        ("split", "p", Action::Split),
    ]
    .into_iter()
    .map(|(label, key, action)| {
        format_action(label, key, view.available_actions.contains(&action))
    })
    .collect();
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
