use crate::{DbError, Result};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| DbError::corrupt(format!("invalid id '{value}': {e}")))
}

pub(crate) fn parse_timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::corrupt(format!("invalid timestamp {secs}")))
}

pub(crate) fn parse_enum<T>(value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(value).map_err(|e| DbError::corrupt(e.to_string()))
}
