pub mod action_stats;
pub mod browser_source_channel;
pub mod event_action;
pub mod event_occurrence;
pub mod event_type;
pub mod position;
