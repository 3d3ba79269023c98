use std::collections::BTreeMap;

use serde::Serialize;

/// Summary of an owner's configured event actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionStats {
    pub total: u32,
    pub enabled: u32,
    pub disabled: u32,
    /// Number of actions targeting each browser source channel
    pub by_channel: BTreeMap<String, u32>,
}
