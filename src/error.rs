use thiserror::Error;

use crate::navigator::Level;

/// Crate-wide error taxonomy.
///
/// Fetch failures are scoped to a single drill-down level by the controller;
/// invalid transitions are contract violations and always returned loudly.
#[derive(Debug, Error)]
pub enum Error {
    #[error("fetch failed for {endpoint}: {message}")]
    Fetch {
        endpoint: &'static str,
        message: String,
    },

    #[error("invalid transition: {action} while at {level}")]
    InvalidTransition {
        level: Level,
        action: &'static str,
    },

    #[error("session file error: {0}")]
    Session(#[from] std::io::Error),
}

impl Error {
    pub fn fetch(endpoint: &'static str, message: impl Into<String>) -> Self {
        Error::Fetch {
            endpoint,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
