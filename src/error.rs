use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error
{
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Score table is not a flat map of names to scores: {0}")]
    InvalidScoreTable(String),
    #[error("{0}")]
    Usage(String),
    #[error("Unknown category '{0}'. Run `list` to see the available ones.")]
    UnknownCategory(String),
}

#[cfg(test)]
mod tests
{
    use super::Error;

    #[test]
    fn usage_error_displays_message_verbatim()
    {
        let err = Error::Usage("Expected value after --scores".to_string());
        assert_eq!(err.to_string(), "Expected value after --scores");
    }

    #[test]
    fn io_errors_convert_with_question_mark()
    {
        fn open_missing() -> Result<(), Error>
        {
            std::fs::File::open("/definitely/not/here/words.txt")?;
            Ok(())
        }

        assert!(matches!(open_missing(), Err(Error::Io(_))));
    }
}
