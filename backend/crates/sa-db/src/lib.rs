pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{connect, run_migrations};
pub use error::{DbError, Result};
pub use repositories::browser_source_channel_repository::BrowserSourceChannelRepository;
pub use repositories::event_action_repository::EventActionRepository;

pub use sqlx::SqlitePool;
