//! Error types for Sublet Core

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{ChatId, ChatStatus};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Chat not found: {0}")]
    ChatNotFound(ChatId),

    #[error("Chat id space exhausted")]
    ChatIdsExhausted,

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: ChatStatus, to: ChatStatus },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Unknown billing period: {0}")]
    UnknownPeriod(String),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
