pub mod alert_payload;
pub mod composer;
