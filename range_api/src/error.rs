use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
