//! Event ingestion
//!
//! Stands in for the platform event source: each posted event is routed
//! through the dispatcher exactly like a live one.

use crate::{ApiError, ApiResult};

use sa_core::{EventOccurrence, EventType};
use sa_ws::{AppState, DispatchOutcome};

use std::collections::HashMap;
use std::panic::Location;
use std::str::FromStr;

use axum::{Json, extract::State};
use error_location::ErrorLocation;
use log::info;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct EventRequest {
    /// Must be the owner this server runs for; blank means the same
    #[serde(default)]
    pub owner_id: Option<String>,
    pub event_type: String,
    #[serde(default)]
    pub context: HashMap<String, String>,
}

/// POST /api/events
pub async fn post_event(
    State(state): State<AppState>,
    Json(request): Json<EventRequest>,
) -> ApiResult<Json<DispatchOutcome>> {
    let event_type = EventType::from_str(request.event_type.trim()).map_err(ApiError::from)?;

    let owner_id = state.session.owner_id().to_string();
    if let Some(requested) = request.owner_id.as_deref().map(str::trim)
        && !requested.is_empty()
        && requested != owner_id
    {
        return Err(ApiError::Validation {
            message: format!("events are only accepted for owner '{owner_id}'"),
            field: Some("owner_id".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let occurrence = EventOccurrence {
        owner_id,
        event_type,
        context: request.context,
    };

    let outcome = state.dispatcher.dispatch(&occurrence).await?;

    info!(
        "Event {} for {}: {}",
        occurrence.event_type.as_str(),
        occurrence.owner_id,
        outcome.as_str()
    );

    Ok(Json(outcome))
}
