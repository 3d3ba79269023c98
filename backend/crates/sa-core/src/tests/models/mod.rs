mod browser_source_channel;
mod event_action;
mod event_type;
mod position;
