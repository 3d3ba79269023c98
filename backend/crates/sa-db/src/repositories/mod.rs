pub mod browser_source_channel_repository;
pub mod event_action_repository;

mod row_helpers;
