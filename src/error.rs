use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid calendar month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("full day threshold must be positive, got {0}")]
    InvalidThreshold(u32),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("event source failed: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, Error>;
