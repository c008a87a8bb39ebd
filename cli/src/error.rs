use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", thoughtverse::describe(.0))]
    Client(#[from] thoughtverse::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
