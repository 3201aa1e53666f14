//! One timed, sudden-death round.
//!
//! A round moves through [`RoundState::Countdown`], then [`RoundState::Active`]
//! for as long as the player keeps typing the presented words correctly, and
//! ends in [`RoundState::RoundOver`] with the reason it stopped.
//!
//! Time is only checked right before a word is presented and right after the
//! answer comes back. A word presented before the deadline can therefore be
//! answered at leisure, but the answer is thrown away if the deadline passed
//! while waiting for it.

use crate::input::InputSource;
use crate::words::WordSource;
use std::time::{Duration, Instant};

pub const TIME_LIMIT: Duration = Duration::from_secs(30);
const MIN_ELAPSED: Duration = Duration::from_secs(1);
const CHARS_PER_WORD: f64 = 5.0;
const PROMPT: &str = "Type it: ";

pub trait Clock
{
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock
{
    fn now(&self) -> Instant
    {
        Instant::now()
    }
}

/// Presentation hooks called by the engine as the round progresses.
pub trait RoundView
{
    /// Runs to completion before the round clock starts.
    fn countdown(&mut self);
    fn present(&mut self, word: &str, score: u32, remaining: Duration);
    fn accepted(&mut self, word: &str);
    fn rejected(&mut self, typed: &str, expected: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason
{
    Timeout,
    Mismatch,
    Interrupted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundResult
{
    pub final_score: u32,
    pub elapsed_seconds: f64,
    pub correct_word_count: u32,
    pub total_chars_typed: u32,
    pub words_per_minute: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundOutcome
{
    pub reason: EndReason,
    pub result: RoundResult,
}

/// Counters of a round in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveRound
{
    pub started_at: Instant,
    pub score: u32,
    pub correct_word_count: u32,
    pub total_chars_typed: u32,
}

impl ActiveRound
{
    fn start(started_at: Instant) -> Self
    {
        Self {
            started_at,
            score: 0,
            correct_word_count: 0,
            total_chars_typed: 0,
        }
    }

    fn record_match(&mut self, word: &str)
    {
        let len = word.chars().count() as u32;
        self.score += len;
        self.total_chars_typed += len;
        self.correct_word_count += 1;
    }

    fn end(self, reason: EndReason) -> RoundState
    {
        RoundState::RoundOver {
            reason,
            round: self,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoundState
{
    Countdown,
    Active(ActiveRound),
    RoundOver { reason: EndReason, round: ActiveRound },
}

pub struct RoundEngine<C = SystemClock>
{
    time_limit: Duration,
    clock: C,
}

impl RoundEngine<SystemClock>
{
    pub fn new(time_limit: Duration) -> Self
    {
        Self::with_clock(time_limit, SystemClock)
    }
}

impl<C: Clock> RoundEngine<C>
{
    pub fn with_clock(time_limit: Duration, clock: C) -> Self
    {
        Self { time_limit, clock }
    }

    pub fn run(
        &self,
        words: &mut impl WordSource,
        input: &mut impl InputSource,
        view: &mut impl RoundView,
    ) -> RoundOutcome
    {
        let mut state = RoundState::Countdown;
        loop {
            state = match state {
                RoundState::Countdown => {
                    view.countdown();
                    RoundState::Active(ActiveRound::start(self.clock.now()))
                }
                RoundState::Active(round) => self.step(round, words, input, view),
                RoundState::RoundOver { reason, round } => return self.finish(reason, &round),
            };
        }
    }

    fn step(
        &self,
        mut round: ActiveRound,
        words: &mut impl WordSource,
        input: &mut impl InputSource,
        view: &mut impl RoundView,
    ) -> RoundState
    {
        let elapsed = self.elapsed(&round);
        if elapsed >= self.time_limit {
            return round.end(EndReason::Timeout);
        }

        let word = words.next_word();
        view.present(&word, round.score, self.time_limit - elapsed);

        let typed = match input.read_line(PROMPT) {
            Ok(Some(line)) => line,
            Ok(None) => return round.end(EndReason::Interrupted),
            Err(err) => {
                log::warn!("Reading input failed, ending the round: {err}");
                return round.end(EndReason::Interrupted);
            }
        };

        if self.elapsed(&round) >= self.time_limit {
            return round.end(EndReason::Timeout);
        }

        let typed = typed.trim();
        if typed == word {
            round.record_match(&word);
            view.accepted(&word);
            RoundState::Active(round)
        } else {
            view.rejected(typed, &word);
            round.end(EndReason::Mismatch)
        }
    }

    fn finish(&self, reason: EndReason, round: &ActiveRound) -> RoundOutcome
    {
        let elapsed = self.elapsed(round).max(MIN_ELAPSED).as_secs_f64();
        let result = RoundResult {
            final_score: round.score,
            elapsed_seconds: elapsed,
            correct_word_count: round.correct_word_count,
            total_chars_typed: round.total_chars_typed,
            words_per_minute: words_per_minute(round.total_chars_typed, elapsed),
        };
        log::info!(
            "Round over ({reason:?}): score {}, {} words, {:.1} WPM in {:.1}s",
            result.final_score,
            result.correct_word_count,
            result.words_per_minute,
            result.elapsed_seconds
        );
        RoundOutcome { reason, result }
    }

    fn elapsed(&self, round: &ActiveRound) -> Duration
    {
        self.clock.now().saturating_duration_since(round.started_at)
    }
}

/// Five characters count as one word.
pub fn words_per_minute(total_chars_typed: u32, elapsed_seconds: f64) -> f64
{
    let minutes = elapsed_seconds / 60.0;
    if minutes <= 0.0 {
        return 0.0;
    }
    (total_chars_typed as f64 / CHARS_PER_WORD) / minutes
}
