use crate::error::is_unique_violation;
use crate::repositories::row_helpers::{parse_timestamp, parse_uuid};
use crate::{DbError, Result};

use sa_core::{BrowserSourceChannel, CoreError, DEFAULT_CHANNEL_NAME, ErrorLocation};

use std::panic::Location;

use chrono::Utc;
use log::{debug, info};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

const SELECT_COLUMNS: &str = r#"
    SELECT id, owner_id, name, display_name, description, icon, color, is_default,
           created_at, updated_at
    FROM browser_source_channels
"#;

/// Persistent store of browser source channels (the channel router).
///
/// Each owner always has exactly one default channel; it is created the
/// first time anything asks for the owner's channels.
pub struct BrowserSourceChannelRepository {
    pool: SqlitePool,
}

impl BrowserSourceChannelRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The channel alerts for `name` should go to.
    ///
    /// Falls back to the default channel when `name` is absent or unknown.
    pub async fn resolve(&self, owner_id: &str, name: Option<&str>) -> Result<BrowserSourceChannel> {
        if let Some(name) = name
            && let Some(channel) = self.get_by_name(owner_id, name).await?
        {
            return Ok(channel);
        }

        if let Some(name) = name {
            debug!("Channel '{name}' not found for owner {owner_id}, using default");
        }

        self.get_default(owner_id).await
    }

    /// The owner's default channel, created on first use
    pub async fn get_default(&self, owner_id: &str) -> Result<BrowserSourceChannel> {
        let mut conn = self.pool.acquire().await?;
        ensure_default(&mut conn, owner_id).await
    }

    pub async fn get_by_name(&self, owner_id: &str, name: &str) -> Result<Option<BrowserSourceChannel>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE owner_id = ? AND name = ?"))
            .bind(owner_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_channel).transpose()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BrowserSourceChannel>> {
        let mut conn = self.pool.acquire().await?;
        find_by_id(&mut conn, id).await
    }

    /// All of the owner's channels, default first, then by name
    pub async fn list_all(&self, owner_id: &str) -> Result<Vec<BrowserSourceChannel>> {
        let mut conn = self.pool.acquire().await?;
        ensure_default(&mut conn, owner_id).await?;

        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE owner_id = ? ORDER BY is_default DESC, name ASC"
        ))
        .bind(owner_id)
        .fetch_all(&mut *conn)
        .await?;

        rows.iter().map(row_to_channel).collect()
    }

    /// True if no other channel of the owner uses `name`.
    ///
    /// `exclude_id` lets an update keep its own name.
    pub async fn check_name_available(
        &self,
        owner_id: &str,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        name_available(&mut conn, owner_id, name, exclude_id).await
    }

    pub async fn create(&self, channel: &BrowserSourceChannel) -> Result<()> {
        if channel.is_default {
            return Err(CoreError::validation(
                "is_default",
                "the default channel is created automatically",
            )
            .into());
        }
        channel.validate()?;

        let mut tx = self.pool.begin().await?;

        // The default must exist before any other name is handed out
        ensure_default(&mut tx, &channel.owner_id).await?;

        if !name_available(&mut tx, &channel.owner_id, &channel.name, None).await? {
            return Err(name_taken(&channel.name));
        }

        insert(&mut tx, channel).await.map_err(|e| match e {
            DbError::Sqlx { source, .. } if is_unique_violation(&source) => {
                name_taken(&channel.name)
            }
            other => other,
        })?;

        tx.commit().await?;

        info!(
            "Created browser source channel '{}' for owner {}",
            channel.name, channel.owner_id
        );
        Ok(())
    }

    /// Update a channel's name and display metadata.
    ///
    /// Renaming re-points the owner's event actions at the new name in the
    /// same transaction. The default channel keeps its name.
    pub async fn update(&self, channel: &BrowserSourceChannel) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let existing = find_by_id(&mut tx, channel.id)
            .await?
            .ok_or_else(|| DbError::not_found(format!("browser source channel {}", channel.id)))?;

        let mut updated = channel.clone();
        updated.owner_id = existing.owner_id.clone();
        updated.is_default = existing.is_default;

        let renamed = updated.name != existing.name;
        if renamed && existing.is_default {
            return Err(DbError::DefaultChannelProtected {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        updated.validate()?;

        if renamed && !name_available(&mut tx, &updated.owner_id, &updated.name, Some(updated.id)).await? {
            return Err(name_taken(&updated.name));
        }

        sqlx::query(
            r#"
              UPDATE browser_source_channels
              SET name = ?, display_name = ?, description = ?, icon = ?, color = ?, updated_at = ?
              WHERE id = ?
              "#,
        )
        .bind(&updated.name)
        .bind(&updated.display_name)
        .bind(updated.description.as_deref())
        .bind(updated.icon.as_deref())
        .bind(updated.color.as_deref())
        .bind(Utc::now().timestamp())
        .bind(updated.id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                name_taken(&updated.name)
            } else {
                DbError::from(e)
            }
        })?;

        if renamed {
            let moved = sqlx::query(
                r#"
                  UPDATE event_actions
                  SET browser_source_channel = ?, updated_at = ?
                  WHERE owner_id = ? AND browser_source_channel = ?
                  "#,
            )
            .bind(&updated.name)
            .bind(Utc::now().timestamp())
            .bind(&updated.owner_id)
            .bind(&existing.name)
            .execute(&mut *tx)
            .await?;

            info!(
                "Renamed channel '{}' to '{}' ({} action(s) re-pointed)",
                existing.name,
                updated.name,
                moved.rows_affected()
            );
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a channel no event action targets any more
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let channel = find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found(format!("browser source channel {id}")))?;

        if channel.is_default {
            return Err(DbError::DefaultChannelProtected {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let references: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM event_actions WHERE owner_id = ? AND browser_source_channel = ?",
        )
        .bind(&channel.owner_id)
        .bind(&channel.name)
        .fetch_one(&mut *tx)
        .await?;

        if references > 0 {
            return Err(DbError::ChannelInUse {
                name: channel.name,
                references: references as u32,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        sqlx::query("DELETE FROM browser_source_channels WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            "Deleted browser source channel '{}' for owner {}",
            channel.name, channel.owner_id
        );
        Ok(())
    }
}

async fn ensure_default(conn: &mut SqliteConnection, owner_id: &str) -> Result<BrowserSourceChannel> {
    let default = BrowserSourceChannel::new_default(owner_id);

    let result = sqlx::query(
        r#"
          INSERT OR IGNORE INTO browser_source_channels (
              id, owner_id, name, display_name, description, icon, color, is_default,
              created_at, updated_at
          ) VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?, ?)
          "#,
    )
    .bind(default.id.to_string())
    .bind(owner_id)
    .bind(DEFAULT_CHANNEL_NAME)
    .bind(&default.display_name)
    .bind(default.description.as_deref())
    .bind(default.icon.as_deref())
    .bind(default.color.as_deref())
    .bind(default.created_at.timestamp())
    .bind(default.updated_at.timestamp())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() > 0 {
        info!("Created default browser source channel for owner {owner_id}");
    }

    let row = sqlx::query(&format!(
        "{SELECT_COLUMNS} WHERE owner_id = ? AND is_default = 1"
    ))
    .bind(owner_id)
    .fetch_one(&mut *conn)
    .await?;

    row_to_channel(&row)
}

async fn find_by_id(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<BrowserSourceChannel>> {
    let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(row_to_channel).transpose()
}

async fn name_available(
    conn: &mut SqliteConnection,
    owner_id: &str,
    name: &str,
    exclude_id: Option<Uuid>,
) -> Result<bool> {
    let taken_by: Option<String> =
        sqlx::query_scalar("SELECT id FROM browser_source_channels WHERE owner_id = ? AND name = ?")
            .bind(owner_id)
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(match (taken_by, exclude_id) {
        (None, _) => true,
        (Some(id), Some(exclude)) => id == exclude.to_string(),
        (Some(_), None) => false,
    })
}

async fn insert(conn: &mut SqliteConnection, channel: &BrowserSourceChannel) -> Result<()> {
    sqlx::query(
        r#"
          INSERT INTO browser_source_channels (
              id, owner_id, name, display_name, description, icon, color, is_default,
              created_at, updated_at
          ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
          "#,
    )
    .bind(channel.id.to_string())
    .bind(&channel.owner_id)
    .bind(&channel.name)
    .bind(&channel.display_name)
    .bind(channel.description.as_deref())
    .bind(channel.icon.as_deref())
    .bind(channel.color.as_deref())
    .bind(channel.is_default)
    .bind(channel.created_at.timestamp())
    .bind(channel.updated_at.timestamp())
    .execute(&mut *conn)
    .await?;

    Ok(())
}

fn row_to_channel(row: &SqliteRow) -> Result<BrowserSourceChannel> {
    let id: String = row.try_get("id")?;

    Ok(BrowserSourceChannel {
        id: parse_uuid(&id)?,
        owner_id: row.try_get("owner_id")?,
        name: row.try_get("name")?,
        display_name: row.try_get("display_name")?,
        description: row.try_get("description")?,
        icon: row.try_get("icon")?,
        color: row.try_get("color")?,
        is_default: row.try_get("is_default")?,
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

#[track_caller]
fn name_taken(name: &str) -> DbError {
    DbError::ChannelNameTaken {
        name: name.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
