use crate::ConnectionId;

use chrono::{DateTime, Utc};

/// Information about an active connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    /// Browser source channel the connection listens on
    pub channel: String,
    pub connected_at: DateTime<Utc>,
}
