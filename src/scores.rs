use crate::error::Error;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CATEGORY: &str = "Streak";

/// Best score per category name.
pub type ScoreTable = BTreeMap<String, u32>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreUpdate
{
    pub updated: bool,
    pub best: u32,
}

/// High scores persisted as a pretty-printed JSON object. Every read goes back
/// to disk and every update is written through immediately.
pub struct ScoreStore
{
    path: PathBuf,
}

impl ScoreStore
{
    pub fn new(path: impl Into<PathBuf>) -> Self
    {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path
    {
        &self.path
    }

    pub fn default_table() -> ScoreTable
    {
        ScoreTable::from([(DEFAULT_CATEGORY.to_string(), 0)])
    }

    /// Reads the table, substituting the default for a missing or malformed file.
    pub fn load(&self) -> ScoreTable
    {
        match self.read() {
            Ok(table) => table,
            Err(Error::Io(err)) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No score file at {}, using defaults", self.path.display());
                Self::default_table()
            }
            Err(err) => {
                log::warn!(
                    "Ignoring unreadable score file {}: {err}",
                    self.path.display()
                );
                Self::default_table()
            }
        }
    }

    pub fn read(&self) -> Result<ScoreTable, Error>
    {
        let contents = fs::read_to_string(&self.path)?;
        parse_table(&contents)
    }

    /// Replaces the file contents. The table is written to a sibling file first
    /// and renamed over the target, so a failed write leaves the old file as is.
    pub fn save(&self, table: &ScoreTable) -> Result<(), Error>
    {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        table.serialize(&mut serializer)?;

        let staging = self.staging_path();
        if let Err(err) = fs::write(&staging, &buffer) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        Ok(())
    }

    /// Writes the default table when no score file exists yet.
    pub fn ensure_exists(&self) -> Result<(), Error>
    {
        if self.path.exists() {
            return Ok(());
        }
        log::info!("Creating score file {}", self.path.display());
        self.save(&Self::default_table())
    }

    /// Records `score` for `category` only if it beats the stored best.
    /// A failed save is logged; the reported best still reflects the new score.
    pub fn update_if_higher(&self, category: &str, score: u32) -> ScoreUpdate
    {
        let mut table = self.load();
        let current_best = table.get(category).copied().unwrap_or(0);
        if score <= current_best {
            return ScoreUpdate {
                updated: false,
                best: current_best,
            };
        }

        table.insert(category.to_string(), score);
        if let Err(err) = self.save(&table) {
            log::warn!(
                "Could not save high scores to {}: {err}",
                self.path.display()
            );
        } else {
            log::info!("New high score for {category}: {score} (was {current_best})");
        }
        ScoreUpdate {
            updated: true,
            best: score,
        }
    }

    fn staging_path(&self) -> PathBuf
    {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "highscores.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn parse_table(contents: &str) -> Result<ScoreTable, Error>
{
    let value: Value = serde_json::from_str(contents)?;
    let Value::Object(entries) = value else {
        return Err(Error::InvalidScoreTable("top level is not an object".to_string()));
    };

    let mut table = ScoreTable::new();
    for (category, score) in entries {
        let score = score
            .as_u64()
            .and_then(|score| u32::try_from(score).ok())
            .ok_or_else(|| {
                Error::InvalidScoreTable(format!("'{category}' has a non-integer score {score}"))
            })?;
        table.insert(category, score);
    }
    Ok(table)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ScoreStore
    {
        ScoreStore::new(dir.path().join("highscores.json"))
    }

    #[test]
    fn missing_file_loads_default_table()
    {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load(), ScoreTable::from([("Streak".to_string(), 0)]));
    }

    #[test]
    fn malformed_files_load_default_table()
    {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for contents in [
            "{not json",
            "[1, 2, 3]",
            "\"Streak\"",
            "{\"Streak\": {\"nested\": 1}}",
            "{\"Streak\": -4}",
            "{\"Streak\": \"12\"}",
        ] {
            fs::write(store.path(), contents).unwrap();
            assert_eq!(store.load(), ScoreStore::default_table(), "contents: {contents}");
        }
    }

    #[test]
    fn save_writes_pretty_json_that_loads_back()
    {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let table = ScoreTable::from([("Foods".to_string(), 31), ("Streak".to_string(), 12)]);

        store.save(&table).unwrap();

        let written = fs::read_to_string(store.path()).unwrap();
        assert_eq!(written, "{\n    \"Foods\": 31,\n    \"Streak\": 12\n}");
        assert_eq!(store.load(), table);
        assert!(!dir.path().join("highscores.json.tmp").exists());
    }

    #[test]
    fn ensure_exists_creates_default_but_keeps_existing_file()
    {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.ensure_exists().unwrap();
        assert_eq!(store.read().unwrap(), ScoreStore::default_table());

        fs::write(store.path(), "{\"Animals\": 9}").unwrap();
        store.ensure_exists().unwrap();
        assert_eq!(store.load(), ScoreTable::from([("Animals".to_string(), 9)]));
    }

    #[test]
    fn higher_score_is_persisted()
    {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let update = store.update_if_higher("Capitals", 17);

        assert_eq!(update, ScoreUpdate { updated: true, best: 17 });
        let table = store.read().unwrap();
        assert_eq!(table.get("Capitals"), Some(&17));
        assert_eq!(table.get("Streak"), Some(&0));
    }

    #[test]
    fn non_increasing_scores_leave_the_best_untouched()
    {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.update_if_higher("Streak", 20).updated);
        let before = fs::read_to_string(store.path()).unwrap();

        assert_eq!(store.update_if_higher("Streak", 20), ScoreUpdate { updated: false, best: 20 });
        assert_eq!(store.update_if_higher("Streak", 5), ScoreUpdate { updated: false, best: 20 });

        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn zero_score_never_writes_a_file()
    {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.update_if_higher("Lorem", 0), ScoreUpdate { updated: false, best: 0 });
        assert!(!store.path().exists());
    }

    #[test]
    fn failed_save_is_reported_and_not_fatal()
    {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("missing").join("highscores.json"));

        assert!(store.save(&ScoreStore::default_table()).is_err());

        let update = store.update_if_higher("Streak", 8);
        assert_eq!(update, ScoreUpdate { updated: true, best: 8 });
        assert_eq!(store.load(), ScoreStore::default_table());
    }
}
