pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

pub use api::error::{ApiError, Result as ApiResult};
pub use api::events::{EventRequest, post_event};
pub use error::{Result, ServerError};
pub use routes::build_router;
pub use state::build_app_state;
