use crate::error::is_unique_violation;
use crate::repositories::row_helpers::{parse_enum, parse_timestamp, parse_uuid};
use crate::{DbError, Result};

use sa_core::{
    ActionStats, ErrorLocation, EventAction, EventType, ImageSettings, SoundSettings,
    TextSettings, VideoSettings,
};

use std::panic::Location;

use chrono::Utc;
use log::{debug, info};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};
use uuid::Uuid;

const SELECT_COLUMNS: &str = r#"
    SELECT id, owner_id, event_type, is_enabled, browser_source_channel,
           text_enabled, text_template, text_duration_ms, text_position, text_style,
           sound_enabled, sound_file_path, sound_volume,
           image_enabled, image_file_path, image_duration_ms, image_position, image_width, image_height,
           video_enabled, video_file_path, video_volume, video_position, video_width, video_height,
           created_at, updated_at
    FROM event_actions
"#;

/// Persistent store of event actions (the action registry).
///
/// Every write validates the action first; the `(owner_id, event_type)` pair
/// is unique both by check and by constraint.
pub struct EventActionRepository {
    pool: SqlitePool,
}

impl EventActionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new action, failing with `Duplicate` if the pair already has one
    pub async fn create(&self, action: &EventAction) -> Result<()> {
        action.validate()?;

        let mut tx = self.pool.begin().await?;

        let existing: Option<String> =
            sqlx::query_scalar("SELECT id FROM event_actions WHERE owner_id = ? AND event_type = ?")
                .bind(&action.owner_id)
                .bind(action.event_type.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_some() {
            return Err(duplicate(action));
        }

        let query = sqlx::query(
            r#"
              INSERT INTO event_actions (
                  owner_id, event_type, is_enabled, browser_source_channel,
                  text_enabled, text_template, text_duration_ms, text_position, text_style,
                  sound_enabled, sound_file_path, sound_volume,
                  image_enabled, image_file_path, image_duration_ms, image_position, image_width, image_height,
                  video_enabled, video_file_path, video_volume, video_position, video_width, video_height,
                  updated_at, id, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        );

        bind_columns(query, action)
            .bind(action.id.to_string())
            .bind(action.created_at.timestamp())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique(e, action))?;

        tx.commit().await?;

        info!(
            "Created event action {} ({} for owner {})",
            action.id, action.event_type, action.owner_id
        );
        Ok(())
    }

    /// Replace every configurable field of an existing action, matched by id
    pub async fn update(&self, action: &EventAction) -> Result<()> {
        action.validate()?;

        let query = sqlx::query(
            r#"
              UPDATE event_actions
              SET owner_id = ?, event_type = ?, is_enabled = ?, browser_source_channel = ?,
                  text_enabled = ?, text_template = ?, text_duration_ms = ?, text_position = ?, text_style = ?,
                  sound_enabled = ?, sound_file_path = ?, sound_volume = ?,
                  image_enabled = ?, image_file_path = ?, image_duration_ms = ?, image_position = ?,
                  image_width = ?, image_height = ?,
                  video_enabled = ?, video_file_path = ?, video_volume = ?, video_position = ?,
                  video_width = ?, video_height = ?,
                  updated_at = ?
              WHERE id = ?
              "#,
        );

        let result = bind_columns(query, action)
            .bind(action.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique(e, action))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(format!("event action {}", action.id)));
        }

        debug!("Updated event action {}", action.id);
        Ok(())
    }

    /// Insert the action, or merge it into the existing one for the same
    /// `(owner_id, event_type)`.
    ///
    /// On merge the stored row keeps its id and creation time. Returns the
    /// action as stored.
    pub async fn upsert(&self, action: &EventAction) -> Result<EventAction> {
        action.validate()?;

        let mut tx = self.pool.begin().await?;

        let query = sqlx::query(
            r#"
              INSERT INTO event_actions (
                  owner_id, event_type, is_enabled, browser_source_channel,
                  text_enabled, text_template, text_duration_ms, text_position, text_style,
                  sound_enabled, sound_file_path, sound_volume,
                  image_enabled, image_file_path, image_duration_ms, image_position, image_width, image_height,
                  video_enabled, video_file_path, video_volume, video_position, video_width, video_height,
                  updated_at, id, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              ON CONFLICT (owner_id, event_type) DO UPDATE SET
                  is_enabled = excluded.is_enabled,
                  browser_source_channel = excluded.browser_source_channel,
                  text_enabled = excluded.text_enabled,
                  text_template = excluded.text_template,
                  text_duration_ms = excluded.text_duration_ms,
                  text_position = excluded.text_position,
                  text_style = excluded.text_style,
                  sound_enabled = excluded.sound_enabled,
                  sound_file_path = excluded.sound_file_path,
                  sound_volume = excluded.sound_volume,
                  image_enabled = excluded.image_enabled,
                  image_file_path = excluded.image_file_path,
                  image_duration_ms = excluded.image_duration_ms,
                  image_position = excluded.image_position,
                  image_width = excluded.image_width,
                  image_height = excluded.image_height,
                  video_enabled = excluded.video_enabled,
                  video_file_path = excluded.video_file_path,
                  video_volume = excluded.video_volume,
                  video_position = excluded.video_position,
                  video_width = excluded.video_width,
                  video_height = excluded.video_height,
                  updated_at = excluded.updated_at
              "#,
        );

        bind_columns(query, action)
            .bind(action.id.to_string())
            .bind(action.created_at.timestamp())
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE owner_id = ? AND event_type = ?"
        ))
        .bind(&action.owner_id)
        .bind(action.event_type.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let stored = row_to_action(&row)?;
        debug!(
            "Upserted event action {} ({} for owner {})",
            stored.id, stored.event_type, stored.owner_id
        );
        Ok(stored)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM event_actions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(format!("event action {id}")));
        }

        info!("Deleted event action {id}");
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventAction>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_action).transpose()
    }

    /// The action configured for this owner and event type, enabled or not
    pub async fn get_by_owner_and_type(
        &self,
        owner_id: &str,
        event_type: EventType,
    ) -> Result<Option<EventAction>> {
        let row = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE owner_id = ? AND event_type = ?"
        ))
        .bind(owner_id)
        .bind(event_type.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_action).transpose()
    }

    /// Dispatch-time lookup; same as `get_by_owner_and_type`
    pub async fn lookup(&self, owner_id: &str, event_type: EventType) -> Result<Option<EventAction>> {
        self.get_by_owner_and_type(owner_id, event_type).await
    }

    pub async fn list_all(&self, owner_id: &str) -> Result<Vec<EventAction>> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE owner_id = ? ORDER BY event_type ASC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_action).collect()
    }

    pub async fn list_enabled(&self, owner_id: &str) -> Result<Vec<EventAction>> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE owner_id = ? AND is_enabled = 1 ORDER BY event_type ASC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_action).collect()
    }

    pub async fn stats(&self, owner_id: &str) -> Result<ActionStats> {
        let rows = sqlx::query(
            r#"
              SELECT browser_source_channel, is_enabled, COUNT(*) AS action_count
              FROM event_actions
              WHERE owner_id = ?
              GROUP BY browser_source_channel, is_enabled
              "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        let mut stats = ActionStats::default();
        for row in rows {
            let channel: String = row.try_get("browser_source_channel")?;
            let is_enabled: bool = row.try_get("is_enabled")?;
            let count: i64 = row.try_get("action_count")?;
            let count = count as u32;

            stats.total += count;
            if is_enabled {
                stats.enabled += count;
            } else {
                stats.disabled += count;
            }
            *stats.by_channel.entry(channel).or_default() += count;
        }

        Ok(stats)
    }
}

/// Binds the 25 configurable columns shared by INSERT and UPDATE, in declaration order
fn bind_columns<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    action: &'q EventAction,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(&action.owner_id)
        .bind(action.event_type.as_str())
        .bind(action.is_enabled)
        .bind(&action.browser_source_channel)
        .bind(action.text.enabled)
        .bind(&action.text.template)
        .bind(action.text.duration_ms)
        .bind(action.text.position.as_str())
        .bind(action.text.style.as_deref())
        .bind(action.sound.enabled)
        .bind(action.sound.file_path.as_deref())
        .bind(action.sound.volume)
        .bind(action.image.enabled)
        .bind(action.image.file_path.as_deref())
        .bind(action.image.duration_ms)
        .bind(action.image.position.as_str())
        .bind(action.image.width)
        .bind(action.image.height)
        .bind(action.video.enabled)
        .bind(action.video.file_path.as_deref())
        .bind(action.video.volume)
        .bind(action.video.position.as_str())
        .bind(action.video.width)
        .bind(action.video.height)
        .bind(Utc::now().timestamp())
}

fn row_to_action(row: &SqliteRow) -> Result<EventAction> {
    let id: String = row.try_get("id")?;
    let event_type: String = row.try_get("event_type")?;
    let text_position: String = row.try_get("text_position")?;
    let image_position: String = row.try_get("image_position")?;
    let video_position: String = row.try_get("video_position")?;

    Ok(EventAction {
        id: parse_uuid(&id)?,
        owner_id: row.try_get("owner_id")?,
        event_type: parse_enum(&event_type)?,
        is_enabled: row.try_get("is_enabled")?,
        browser_source_channel: row.try_get("browser_source_channel")?,
        text: TextSettings {
            enabled: row.try_get("text_enabled")?,
            template: row.try_get("text_template")?,
            duration_ms: row.try_get("text_duration_ms")?,
            position: parse_enum(&text_position)?,
            style: row.try_get("text_style")?,
        },
        sound: SoundSettings {
            enabled: row.try_get("sound_enabled")?,
            file_path: row.try_get("sound_file_path")?,
            volume: row.try_get("sound_volume")?,
        },
        image: ImageSettings {
            enabled: row.try_get("image_enabled")?,
            file_path: row.try_get("image_file_path")?,
            duration_ms: row.try_get("image_duration_ms")?,
            position: parse_enum(&image_position)?,
            width: row.try_get("image_width")?,
            height: row.try_get("image_height")?,
        },
        video: VideoSettings {
            enabled: row.try_get("video_enabled")?,
            file_path: row.try_get("video_file_path")?,
            volume: row.try_get("video_volume")?,
            position: parse_enum(&video_position)?,
            width: row.try_get("video_width")?,
            height: row.try_get("video_height")?,
        },
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

#[track_caller]
fn duplicate(action: &EventAction) -> DbError {
    DbError::Duplicate {
        owner_id: action.owner_id.clone(),
        event_type: action.event_type.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn map_unique(error: sqlx::Error, action: &EventAction) -> DbError {
    if is_unique_violation(&error) {
        duplicate(action)
    } else {
        DbError::from(error)
    }
}
