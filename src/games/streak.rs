use crate::config::GameConfig;
use crate::error::Error;
use crate::games::{Category, clear_screen};
use crate::input::InputSource;
use crate::round::{Clock, EndReason, RoundEngine, RoundOutcome, RoundView, TIME_LIMIT};
use crate::scores::{ScoreStore, ScoreUpdate};
use crate::words::{WordBank, WordSource};
use crossterm::style::Stylize;
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);
const GO_PAUSE: Duration = Duration::from_millis(500);
const FLASH_PAUSE: Duration = Duration::from_millis(200);
const HOLD_PROMPT: &str = "Press Enter to continue...";

/// Draws the round on the real terminal, pacing the countdown and the
/// success flash with short sleeps.
pub struct TerminalView
{
    stdout: Stdout,
    category: &'static str,
}

impl TerminalView
{
    pub fn new(category: &'static str) -> Self
    {
        Self {
            stdout: io::stdout(),
            category,
        }
    }

    fn draw(&mut self, render: impl FnOnce(&mut Stdout) -> io::Result<()>)
    {
        let result = render(&mut self.stdout).and_then(|_| self.stdout.flush());
        if let Err(err) = result {
            log::warn!("Failed to draw round screen: {err}");
        }
    }
}

impl RoundView for TerminalView
{
    fn countdown(&mut self)
    {
        for tick in ["3", "2", "1"] {
            self.draw(|out| {
                clear_screen(out)?;
                writeln!(out, "\n\n\n\t\t{}", tick.cyan().bold())
            });
            thread::sleep(COUNTDOWN_TICK);
        }
        self.draw(|out| {
            clear_screen(out)?;
            writeln!(out, "\n\n\n\t\t{}", "GO!".green().bold())
        });
        thread::sleep(GO_PAUSE);
    }

    fn present(&mut self, word: &str, score: u32, remaining: Duration)
    {
        let category = self.category;
        self.draw(|out| {
            clear_screen(out)?;
            writeln!(
                out,
                "{}",
                format!("--- {} MODE ---", category.to_uppercase()).cyan()
            )?;
            writeln!(
                out,
                "CURRENT SCORE: {}   |   TIME LEFT: {}",
                score.to_string().yellow(),
                format!("~{}s", remaining.as_secs()).yellow()
            )?;
            writeln!(out, "{}", "-".repeat(40))?;
            writeln!(out)?;
            writeln!(out, "Word:  {}", word.to_string().white().bold())?;
            writeln!(out)
        });
    }

    fn accepted(&mut self, word: &str)
    {
        self.draw(|out| writeln!(out, "{}", format!("        {word} OK!").green()));
        thread::sleep(FLASH_PAUSE);
    }

    fn rejected(&mut self, typed: &str, expected: &str)
    {
        self.draw(|out| {
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                format!("Wrong! You typed '{typed}', expected '{expected}'.").red()
            )
        });
    }
}

/// Plays rounds of `category` on the terminal until the player goes back to the menu.
pub fn run_category(
    category: &Category,
    config: &GameConfig,
    input: &mut impl InputSource,
) -> Result<(), Error>
{
    let mut bank = WordBank::load(&config.word_file(category.file), config.fallback_pause);
    log::debug!("{} session with {} candidate words", category.name, bank.words().len());
    let store = ScoreStore::new(config.scores_path.clone());
    let engine = RoundEngine::new(TIME_LIMIT);
    let mut view = TerminalView::new(category.name);
    let mut stdout = io::stdout();
    run_session(
        category.name,
        &mut bank,
        &store,
        &engine,
        input,
        &mut view,
        &mut stdout,
    )
}

/// Round loop shared by every category: play, summarise, record, offer a retry.
pub fn run_session<C: Clock>(
    category: &str,
    words: &mut impl WordSource,
    store: &ScoreStore,
    engine: &RoundEngine<C>,
    input: &mut impl InputSource,
    view: &mut impl RoundView,
    out: &mut impl Write,
) -> Result<(), Error>
{
    loop {
        let outcome = engine.run(words, input, view);
        let update = store.update_if_higher(category, outcome.result.final_score);
        write_summary(out, category, &outcome, update)?;

        if outcome.reason == EndReason::Interrupted {
            out.flush()?;
            if let Err(err) = input.read_line(HOLD_PROMPT) {
                log::warn!("Reading input failed after an interrupted round: {err}");
            }
            return Ok(());
        }

        writeln!(
            out,
            "[{}] or [{}]",
            "Press ENTER for Menu".cyan(),
            "Press 'R' to Retry".cyan()
        )?;
        out.flush()?;
        match input.read_line("") {
            Ok(Some(command)) if command.trim().eq_ignore_ascii_case("r") => continue,
            Ok(_) => return Ok(()),
            Err(err) => {
                log::warn!("Reading input failed, returning to the menu: {err}");
                return Ok(());
            }
        }
    }
}

fn write_summary(
    out: &mut impl Write,
    category: &str,
    outcome: &RoundOutcome,
    update: ScoreUpdate,
) -> io::Result<()>
{
    let result = &outcome.result;
    match outcome.reason {
        EndReason::Timeout => writeln!(out, "\n{}", "Time's up!".yellow())?,
        EndReason::Interrupted => writeln!(out, "\n{}", "Round interrupted.".yellow())?,
        EndReason::Mismatch => {}
    }
    writeln!(out, "\n{}", "GAME OVER".red().bold())?;
    writeln!(out, "Final Score: {}", result.final_score.to_string().yellow())?;
    writeln!(out, "{}", "-".repeat(30))?;
    writeln!(out, "Total Words Typed: {}", result.correct_word_count)?;
    writeln!(
        out,
        "WPM: {}",
        format!("{:.1}", result.words_per_minute).cyan()
    )?;
    writeln!(out, "{}", "-".repeat(30))?;
    if update.updated {
        writeln!(
            out,
            "\n{}",
            format!("NEW HIGH SCORE for {category}: {}!", update.best)
                .green()
                .bold()
        )?;
    } else {
        writeln!(
            out,
            "\n{}",
            format!("High Score for {category}: {}", update.best).cyan()
        )?;
    }
    writeln!(out)?;
    out.flush()
}
