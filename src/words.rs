use crate::error::Error;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

pub const MIN_WORD_LEN: usize = 3;

pub const FALLBACK_WORDS: [&str; 10] = [
    "apple",
    "banana",
    "cherry",
    "date",
    "elderberry",
    "fig",
    "grape",
    "lemon",
    "lime",
    "mango",
];

/// Something that hands out the next word to type.
pub trait WordSource
{
    fn next_word(&mut self) -> String;
}

/// Candidate words for one category. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordBank
{
    words: Vec<String>,
}

impl WordBank
{
    /// Loads `path`, falling back to [`FALLBACK_WORDS`] when the file is missing,
    /// unreadable or has no usable entries. The fallback warning is left on
    /// screen for `fallback_pause`.
    pub fn load(path: &Path, fallback_pause: Duration) -> Self
    {
        Self::load_with_notice(path, fallback_pause, &mut io::stderr())
    }

    /// Same as [`WordBank::load`], writing the fallback notice to `notice`.
    pub fn load_with_notice(path: &Path, fallback_pause: Duration, notice: &mut impl Write) -> Self
    {
        let words = match read_words(path) {
            Ok(words) => words,
            Err(err) => {
                log::debug!("Could not read word list {}: {err}", path.display());
                Vec::new()
            }
        };

        if words.is_empty() {
            log::warn!("{} not found or empty, using backup list.", path.display());
            let shown = writeln!(
                notice,
                "Warning: {} not found or empty, using backup list.",
                path.display()
            )
            .and_then(|_| notice.flush());
            if let Err(err) = shown {
                log::debug!("Could not show the word list warning: {err}");
            }
            if !fallback_pause.is_zero() {
                std::thread::sleep(fallback_pause);
            }
            return Self::fallback();
        }

        log::info!("Loaded {} words from {}", words.len(), path.display());
        Self { words }
    }

    /// Builds a bank from raw lines, keeping only valid words.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = accepted_words(lines);
        if words.is_empty() {
            Self::fallback()
        } else {
            Self { words }
        }
    }

    pub fn fallback() -> Self
    {
        Self {
            words: FALLBACK_WORDS.iter().map(|word| word.to_string()).collect(),
        }
    }

    pub fn words(&self) -> &[String]
    {
        &self.words
    }

    /// Uniform draw with replacement.
    pub fn draw(&self) -> &str
    {
        self.draw_with(&mut rand::thread_rng())
    }

    pub fn draw_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str
    {
        self.words
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(FALLBACK_WORDS[0])
    }
}

impl WordSource for WordBank
{
    fn next_word(&mut self) -> String
    {
        self.draw().to_string()
    }
}

/// Trims and lowercases `entry`, returning it only if it is a usable word.
pub fn normalize(entry: &str) -> Option<String>
{
    let word = entry.trim().to_lowercase();
    let long_enough = word.chars().count() >= MIN_WORD_LEN;
    if long_enough && word.chars().all(char::is_alphabetic) {
        Some(word)
    } else {
        None
    }
}

fn read_words(path: &Path) -> Result<Vec<String>, Error>
{
    let contents = fs::read_to_string(path)?;
    Ok(accepted_words(contents.lines()))
}

fn accepted_words<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| normalize(line.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Instant;

    #[test]
    fn normalize_accepts_only_long_alphabetic_entries()
    {
        assert_eq!(normalize("  Paris \n"), Some("paris".to_string()));
        assert_eq!(normalize("CAT"), Some("cat".to_string()));
        assert_eq!(normalize("ox"), None);
        assert_eq!(normalize("r2d2"), None);
        assert_eq!(normalize("ice cream"), None);
        assert_eq!(normalize("don't"), None);
        assert_eq!(normalize("   "), None);
    }

    #[test]
    fn load_filters_invalid_lines()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foods.txt");
        fs::write(&path, "Pizza\n  sushi  \nab\n42\nhot dog\n\nTACO\n").unwrap();

        let bank = WordBank::load(&path, Duration::ZERO);

        assert_eq!(bank.words(), ["pizza", "sushi", "taco"]);
    }

    #[test]
    fn load_falls_back_when_file_is_missing()
    {
        let dir = tempfile::tempdir().unwrap();

        let bank = WordBank::load(&dir.path().join("nope.txt"), Duration::ZERO);

        assert_eq!(bank, WordBank::fallback());
        assert_eq!(bank.words().len(), 10);
    }

    #[test]
    fn load_falls_back_when_no_line_is_valid()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lorem.txt");
        fs::write(&path, "a\nb2\n--\n").unwrap();

        let bank = WordBank::load(&path, Duration::ZERO);

        assert_eq!(bank, WordBank::fallback());
    }

    #[test]
    fn fallback_prints_a_notice_and_waits()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capitals.txt");
        let mut notice = Vec::new();

        let started = Instant::now();
        let bank = WordBank::load_with_notice(&path, Duration::from_millis(50), &mut notice);

        assert!(started.elapsed() >= Duration::from_millis(50));
        assert_eq!(bank, WordBank::fallback());
        let text = String::from_utf8(notice).unwrap();
        assert!(text.starts_with("Warning: "));
        assert!(text.contains("capitals.txt not found or empty, using backup list."));
    }

    #[test]
    fn valid_file_loads_without_notice_or_pause()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animals.txt");
        fs::write(&path, "otter
badger
").unwrap();
        let mut notice = Vec::new();

        let started = Instant::now();
        let bank = WordBank::load_with_notice(&path, Duration::from_secs(5), &mut notice);

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(bank.words(), ["otter", "badger"]);
        assert!(notice.is_empty());
    }

    #[test]
    fn from_lines_never_builds_an_empty_bank()
    {
        let bank = WordBank::from_lines(Vec::<String>::new());
        assert_eq!(bank.words().len(), FALLBACK_WORDS.len());
    }

    #[test]
    fn draws_come_from_the_bank_with_repeats()
    {
        let bank = WordBank::from_lines(["cat", "dog"]);
        let mut rng = StdRng::seed_from_u64(7);

        let draws: Vec<&str> = (0..50).map(|_| bank.draw_with(&mut rng)).collect();

        assert!(draws.iter().all(|word| *word == "cat" || *word == "dog"));
        assert!(draws.contains(&"cat"));
        assert!(draws.contains(&"dog"));
    }
}
