//! Error types shared across NewsBot crates.

use thiserror::Error;

/// All errors NewsBot can report.
#[derive(Debug, Error)]
pub enum NewsBotError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    #[error("Unknown view: {0}")]
    UnknownView(String),

    #[error("Broadcast already sent: {0}")]
    AlreadySent(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, NewsBotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = NewsBotError::UnknownGroup("vipp".into());
        assert_eq!(e.to_string(), "Unknown group: vipp");

        let e = NewsBotError::AlreadySent("3".into());
        assert_eq!(e.to_string(), "Broadcast already sent: 3");
    }

    #[test]
    fn test_io_conversion() {
        fn read_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here/newsbot.toml")?)
        }
        assert!(matches!(read_missing(), Err(NewsBotError::Io(_))));
    }
}
