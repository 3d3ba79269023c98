use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Identity of the broadcaster this process serves.
///
/// Built once at startup and handed to whatever needs it; there is no
/// process-wide status object.
#[derive(Debug, Clone)]
pub struct SessionState {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    owner_id: String,
    started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                owner_id: owner_id.into(),
                started_at: Utc::now(),
            }),
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.inner.owner_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.inner.started_at
    }
}
