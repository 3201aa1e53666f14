mod config;
mod error;
mod games;
mod input;
mod round;
mod scores;
mod words;

use config::GameConfig;
use crossterm::style::Stylize;
use error::Error;
use games::Category;
use input::{InputSource, TerminalInput};
use scores::ScoreStore;
use std::env;
use std::io::{self, Write};

fn main()
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error>
{
    let (command, rest) = split_command(env::args().skip(1).collect());

    match command.as_deref() {
        None => {
            let config = GameConfig::from_args(&rest)?;
            prepare_score_file(&config);
            interactive_menu(&config, &mut TerminalInput::new())
        }
        Some("list") => {
            list_categories();
            Ok(())
        }
        Some("play") => {
            let (name, options) = rest
                .split_first()
                .ok_or_else(|| Error::Usage("Expected a category after `play`.".to_string()))?;
            let category = games::find_category(name)?;
            let config = GameConfig::from_args(options)?;
            prepare_score_file(&config);
            games::streak::run_category(&category, &config, &mut TerminalInput::new())
        }
        Some("scores") => {
            let config = GameConfig::from_args(&rest)?;
            let table = ScoreStore::new(config.scores_path).load();
            games::write_high_scores(&mut io::stdout(), &table)?;
            Ok(())
        }
        Some("-h") | Some("--help") | Some("help") => {
            print_help();
            Ok(())
        }
        Some(other) => Err(Error::Usage(format!(
            "Unknown command '{other}'. Run with --help."
        ))),
    }
}

/// Finds the command after any leading options. Returns it together with the
/// arguments that follow it, with the leading options appended.
fn split_command(args: Vec<String>) -> (Option<String>, Vec<String>)
{
    let mut leading = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--help" || !arg.starts_with("--") {
            let mut rest: Vec<String> = iter.collect();
            rest.extend(leading);
            return (Some(arg), rest);
        }
        let takes_value = GameConfig::takes_value(&arg);
        leading.push(arg);
        if takes_value {
            if let Some(value) = iter.next() {
                leading.push(value);
            }
        }
    }
    (None, leading)
}

fn prepare_score_file(config: &GameConfig)
{
    let store = ScoreStore::new(config.scores_path.clone());
    if let Err(err) = store.ensure_exists() {
        log::warn!("Could not create score file {}: {err}", store.path().display());
    }
}

fn interactive_menu(config: &GameConfig, input: &mut impl InputSource) -> Result<(), Error>
{
    let mut stdout = io::stdout();
    loop {
        games::clear_screen(&mut stdout)?;
        println!("{}", "=== CLI TYPING GAME ===".cyan().bold());
        println!("{}", "1. Play Game".cyan());
        println!("{}", "2. High Scores".cyan());
        println!("{}", "3. Settings".cyan());
        println!("{}", "4. Quit".cyan());
        println!();

        let Some(choice) = input.read_line("Select an option (1-4): ")? else {
            println!("\nGoodbye!");
            return Ok(());
        };
        match choice.trim() {
            "1" => play_menu(config, input)?,
            "2" => show_high_scores(config, input)?,
            "3" => show_placeholder("Settings", input)?,
            "4" => {
                println!("\nThanks for playing! Goodbye.");
                return Ok(());
            }
            _ => {}
        }
    }
}

fn play_menu(config: &GameConfig, input: &mut impl InputSource) -> Result<(), Error>
{
    let registry = games::registry();
    let back = registry.len() + 1;
    let mut stdout = io::stdout();
    loop {
        games::clear_screen(&mut stdout)?;
        println!("{}", "--- SELECT CATEGORY ---".cyan().bold());
        for (idx, category) in registry.iter().enumerate() {
            println!("{}", format!("{}. {}", idx + 1, category.label).cyan());
        }
        println!("{}", format!("{back}. Back to Main Menu").cyan());
        println!();

        let prompt = format!("Select an option (1-{back}): ");
        let Some(choice) = input.read_line(&prompt)? else {
            return Ok(());
        };
        let Ok(index) = choice.trim().parse::<usize>() else {
            continue;
        };
        if index == back {
            return Ok(());
        }
        if let Some(category) = index.checked_sub(1).and_then(|idx| registry.get(idx)) {
            games::streak::run_category(category, config, input)?;
        }
    }
}

fn show_high_scores(config: &GameConfig, input: &mut impl InputSource) -> Result<(), Error>
{
    let mut stdout = io::stdout();
    games::clear_screen(&mut stdout)?;
    let table = ScoreStore::new(config.scores_path.clone()).load();
    games::write_high_scores(&mut stdout, &table)?;
    pause(input)
}

fn show_placeholder(feature: &str, input: &mut impl InputSource) -> Result<(), Error>
{
    let mut stdout = io::stdout();
    games::clear_screen(&mut stdout)?;
    println!("--- {feature} ---");
    println!("\nComing Soon!\n");
    pause(input)
}

fn pause(input: &mut impl InputSource) -> Result<(), Error>
{
    io::stdout().flush()?;
    input.read_line("\nPress Enter to continue...")?;
    Ok(())
}

fn list_categories()
{
    println!("Available categories:");
    for Category { name, file, label } in games::registry() {
        println!("  {name:<10} - {label} (data/{file})");
    }
}

fn print_help()
{
    println!("streak-typer");
    println!("\nUsage:");
    println!("  streak-typer [options]");
    println!("  streak-typer list");
    println!("  streak-typer play <category> [options]");
    println!("  streak-typer scores [options]");
    println!("  Options may appear before or after the command.");
    println!("\nOptions:");
    println!("  --data-dir <dir>   Directory holding the word lists (default: data)");
    println!("  --scores <file>    High-score file (default: highscores.json)");
    println!("\nNotes:");
    println!("  Each round lasts 30 seconds; one wrong word ends it.");
    println!("  Esc or Ctrl-C at any prompt leaves the current screen.");
    println!("  Set RUST_LOG=info to see round and score diagnostics.");
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn args(values: &[&str]) -> Vec<String>
    {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn command_may_follow_options()
    {
        let (command, rest) = split_command(args(&["--scores=x.json", "play", "foods"]));

        assert_eq!(command.as_deref(), Some("play"));
        assert_eq!(rest, ["foods", "--scores=x.json"]);
        let config = GameConfig::from_args(&rest[1..]).unwrap();
        assert_eq!(config.scores_path, std::path::PathBuf::from("x.json"));
    }

    #[test]
    fn option_values_are_not_mistaken_for_commands()
    {
        let (command, rest) = split_command(args(&["--data-dir", "lists", "scores"]));

        assert_eq!(command.as_deref(), Some("scores"));
        assert_eq!(rest, ["--data-dir", "lists"]);
    }

    #[test]
    fn options_alone_open_the_menu()
    {
        let (command, rest) = split_command(args(&["--scores", "best.json"]));

        assert_eq!(command, None);
        assert_eq!(rest, ["--scores", "best.json"]);
    }

    #[test]
    fn help_flag_is_a_command()
    {
        let (command, rest) = split_command(args(&["--help"]));

        assert_eq!(command.as_deref(), Some("--help"));
        assert!(rest.is_empty());
    }
}
