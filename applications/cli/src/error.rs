/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid command: {0}")]
    Command(String),

    #[error("Playback error: {0}")]
    Playback(#[from] tempo_playback::PlaybackError),

    #[error("Library error: {0}")]
    Library(#[from] tempo_library::LibraryError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] tempo_core::CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
