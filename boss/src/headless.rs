//! Line-oriented frontend for the boss battle.
//!
//! Reads one command per line from stdin and prints the result. Works the
//! same for a person at a terminal or a script driving the game.

use crate::display::{format_reports, render_battle, render_end};
use boss_core::{Battle, BattleSettings, BattleUpdate, Page};
use std::io::{self, BufRead, Write};

/// Startup options for a headless session.
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub topic: String,
    pub settings: BattleSettings,
    /// Glitch the boss's dialogue.
    pub distortion: bool,
}

/// One parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Pick an option, 0-based.
    Answer(usize),
    Tick,
    Status,
    Json,
    Home,
    Topic(String),
    /// Start a battle, optionally on a new topic.
    Start(Option<String>),
    Help,
    Quit,
    Unknown(String),
}

/// Parse a line of input.
///
/// Digits pick an option (1-4). An empty line re-checks the timer.
/// Lines starting with `#` are commands.
pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Tick;
    }

    if let Some(rest) = line.strip_prefix('#') {
        let (command, arg) = match rest.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (rest, ""),
        };
        return match command.to_lowercase().as_str() {
            "tick" => Input::Tick,
            "status" => Input::Status,
            "json" => Input::Json,
            "home" => Input::Home,
            "topic" if !arg.is_empty() => Input::Topic(arg.to_string()),
            "start" => Input::Start((!arg.is_empty()).then(|| arg.to_string())),
            "help" => Input::Help,
            "quit" | "exit" => Input::Quit,
            _ => Input::Unknown(line.to_string()),
        };
    }

    match line.parse::<usize>() {
        Ok(n @ 1..=4) => Input::Answer(n - 1),
        _ => Input::Unknown(line.to_string()),
    }
}

fn print_help() {
    println!("[HELP]");
    println!("  1-4            - Pick an answer");
    println!("  (empty line)   - Check the timer");
    println!("  #tick          - Check the timer");
    println!("  #status        - Show HP and time remaining");
    println!("  #json          - Dump the current state as JSON");
    println!("  #topic <name>  - Change the topic (home screen only)");
    println!("  #start [topic] - Start a new battle");
    println!("  #home          - Return home after a battle");
    println!("  #quit          - Exit");
}

fn print_update(update: &BattleUpdate, distortion: bool) {
    for line in format_reports(&update.reports) {
        println!("{line}");
    }
    if update.view.page.is_end() {
        print!("{}", render_end(&update.view));
        println!("Type #home to return or #start to fight again.");
    } else {
        print!("{}", render_battle(&update.view, distortion));
    }
    println!();
}

async fn start_battle(battle: &mut Battle, topic: &str, settings: BattleSettings, distortion: bool) {
    println!("[LOADING] Summoning a boss for {topic}...");
    match battle.start(topic, settings).await {
        Ok(update) => {
            println!("[BOSS] {} appears!", update.view.boss_name);
            print_update(&update, distortion);
        }
        Err(e) => println!("[ERROR] {e}"),
    }
}

/// Run the battle until stdin closes or the player quits.
pub async fn run_headless(mut battle: Battle, options: HeadlessOptions) -> anyhow::Result<()> {
    let HeadlessOptions {
        topic,
        settings,
        distortion,
    } = options;

    println!("=== Boss Battle ===");
    println!(
        "Time limit: {}s, your damage: {}, boss damage: {}",
        settings.time_limit.as_secs(),
        settings.player_damage,
        settings.boss_damage
    );
    println!("Type #help for commands.");
    println!();

    battle.session_mut().set_topic(topic.clone());
    start_battle(&mut battle, &topic, settings, distortion).await;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %e, "failed to read input");
                break;
            }
        };

        match parse_input(&line) {
            Input::Answer(index) => match battle.select(index).await {
                Ok(update) => print_update(&update, distortion),
                Err(e) => println!("[ERROR] {e}"),
            },
            Input::Tick => match battle.tick().await {
                Ok(update) => print_update(&update, distortion),
                Err(e) => println!("[ERROR] {e}"),
            },
            Input::Status => {
                let view = battle.view();
                println!("[STATUS]");
                println!("  Topic: {}", view.topic);
                println!("  Page: {:?}, Phase: {:?}", view.page, view.phase);
                println!("  HP: {}/{}, Boss HP: {}/{}", view.player_hp, view.max_hp, view.boss_hp, view.max_hp);
                if view.accepts_answers() {
                    println!("  Time remaining: {}s", view.remaining_secs);
                }
                println!("  Questions asked: {}", view.question_id);
            }
            Input::Json => match serde_json::to_string_pretty(&battle.view()) {
                Ok(json) => println!("{json}"),
                Err(e) => println!("[ERROR] {e}"),
            },
            Input::Home => {
                if battle.return_home() {
                    println!("[HOME] Current topic: {}", battle.session().topic());
                    println!("Type #start to begin or #topic <name> to change it.");
                } else {
                    println!("[ERROR] Finish the current battle first.");
                }
            }
            Input::Topic(new_topic) => {
                if battle.view().page == Page::Home {
                    battle.session_mut().set_topic(new_topic);
                    println!("[TOPIC] {}", battle.session().topic());
                } else {
                    println!("[ERROR] The topic can only be changed from home.");
                }
            }
            Input::Start(new_topic) => {
                let page = battle.view().page;
                if page == Page::Game {
                    println!("[ERROR] Finish the current battle first.");
                } else {
                    if page.is_end() {
                        battle.return_home();
                    }
                    if let Some(new_topic) = new_topic {
                        battle.session_mut().set_topic(new_topic);
                    }
                    let topic = battle.session().topic().to_string();
                    start_battle(&mut battle, &topic, settings, distortion).await;
                }
            }
            Input::Help => print_help(),
            Input::Quit => {
                println!("Goodbye!");
                break;
            }
            Input::Unknown(text) => println!("[ERROR] Unknown input {text:?}. Type #help for help."),
        }
        stdout.flush().ok();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answers() {
        assert_eq!(parse_input("1"), Input::Answer(0));
        assert_eq!(parse_input(" 4 "), Input::Answer(3));
        assert!(matches!(parse_input("0"), Input::Unknown(_)));
        assert!(matches!(parse_input("5"), Input::Unknown(_)));
    }

    #[test]
    fn test_parse_tick() {
        assert_eq!(parse_input(""), Input::Tick);
        assert_eq!(parse_input("   "), Input::Tick);
        assert_eq!(parse_input("#tick"), Input::Tick);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_input("#status"), Input::Status);
        assert_eq!(parse_input("#JSON"), Input::Json);
        assert_eq!(parse_input("#home"), Input::Home);
        assert_eq!(parse_input("#quit"), Input::Quit);
        assert_eq!(parse_input("#exit"), Input::Quit);
        assert_eq!(parse_input("#help"), Input::Help);
        assert!(matches!(parse_input("#dance"), Input::Unknown(_)));
    }

    #[test]
    fn test_parse_topic_and_start() {
        assert_eq!(
            parse_input("#topic Ancient Rome"),
            Input::Topic("Ancient Rome".to_string())
        );
        assert!(matches!(parse_input("#topic"), Input::Unknown(_)));
        assert_eq!(parse_input("#start"), Input::Start(None));
        assert_eq!(
            parse_input("#start   Jazz "),
            Input::Start(Some("Jazz".to_string()))
        );
    }
}
