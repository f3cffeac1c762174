use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    /// The transport failed to deliver a message.
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Empty content")]
    EmptyContent,
}

pub type Result<T> = std::result::Result<T, DbotError>;
