#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Telegram request error: {0}")]
    Request(#[from] teloxide::RequestError),

    #[error("Formatting error: {0}")]
    Format(#[from] wlchecker_format::FormatError),
}

pub type BotResult<T> = Result<T, BotError>;
