use sa_core::{CoreError, ErrorLocation};

use std::panic::Location;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("{source}")]
    Core {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Corrupt row: {message} {location}")]
    Corrupt {
        message: String,
        location: ErrorLocation,
    },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("An action for event '{event_type}' already exists for owner {owner_id} {location}")]
    Duplicate {
        owner_id: String,
        event_type: String,
        location: ErrorLocation,
    },

    #[error("Channel name '{name}' is already taken {location}")]
    ChannelNameTaken {
        name: String,
        location: ErrorLocation,
    },

    #[error("Channel '{name}' is still used by {references} event action(s) {location}")]
    ChannelInUse {
        name: String,
        references: u32,
        location: ErrorLocation,
    },

    #[error("The default channel cannot be deleted or renamed {location}")]
    DefaultChannelProtected { location: ErrorLocation },
}

impl DbError {
    #[track_caller]
    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// True for errors caused by the caller's input rather than the store
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Core { .. }
                | Self::NotFound { .. }
                | Self::Duplicate { .. }
                | Self::ChannelNameTaken { .. }
                | Self::ChannelInUse { .. }
                | Self::DefaultChannelProtected { .. }
        )
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for DbError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Core {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// True if the error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

pub type Result<T> = std::result::Result<T, DbError>;
