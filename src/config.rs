use crate::error::Error;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_SCORES_FILE: &str = "highscores.json";
const DEFAULT_FALLBACK_PAUSE: Duration = Duration::from_secs(2);

/// Locations and pacing shared by every category session.
#[derive(Clone, Debug)]
pub struct GameConfig
{
    pub data_dir: PathBuf,
    pub scores_path: PathBuf,
    /// How long a word-list fallback warning stays on screen.
    pub fallback_pause: Duration,
}

impl GameConfig
{
    pub fn from_args(args: &[String]) -> Result<Self, Error>
    {
        let mut config = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--data-dir" {
                config.data_dir = PathBuf::from(expect_value(&mut iter, "--data-dir")?);
            } else if let Some(rest) = arg.strip_prefix("--data-dir=") {
                config.data_dir = PathBuf::from(non_empty(rest, "--data-dir")?);
            } else if arg == "--scores" {
                config.scores_path = PathBuf::from(expect_value(&mut iter, "--scores")?);
            } else if let Some(rest) = arg.strip_prefix("--scores=") {
                config.scores_path = PathBuf::from(non_empty(rest, "--scores")?);
            } else {
                return Err(Error::Usage(format!("Unknown option '{arg}'")));
            }
        }
        Ok(config)
    }

    /// Whether `flag` consumes the following argument as its value.
    pub fn takes_value(flag: &str) -> bool
    {
        matches!(flag, "--data-dir" | "--scores")
    }

    pub fn word_file(&self, file_name: &str) -> PathBuf
    {
        self.data_dir.join(file_name)
    }
}

impl Default for GameConfig
{
    fn default() -> Self
    {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            scores_path: PathBuf::from(DEFAULT_SCORES_FILE),
            fallback_pause: DEFAULT_FALLBACK_PAUSE,
        }
    }
}

fn expect_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, Error>
{
    let value = iter
        .next()
        .ok_or_else(|| Error::Usage(format!("Expected value after {flag}")))?;
    non_empty(value, flag)
}

fn non_empty<'a>(value: &'a str, flag: &str) -> Result<&'a str, Error>
{
    if value.trim().is_empty() {
        return Err(Error::Usage(format!("{flag} needs a non-empty value")));
    }
    Ok(value)
}
