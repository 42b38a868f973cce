//! CRUD operations for mission records.
//!
//! Each mission is one row, keyed by its id, so two writers can touch
//! different missions without racing on a shared blob.  Insert order is
//! preserved through the `position` column.

use rusqlite::{params, OptionalExtension};

use muster_config::MissionConfig;
use muster_shared::MissionId;

use crate::database::Database;
use crate::error::{Result, StoreError};

impl Database {
    // ------------------------------------------------------------------
    // Create / update
    // ------------------------------------------------------------------

    /// Insert a mission, or replace the stored payload when the id already
    /// exists.  A replaced mission keeps its position in the list.
    pub fn upsert_mission(&self, mission: &MissionConfig) -> Result<()> {
        let json = mission.to_json()?;
        self.conn().execute(
            "INSERT INTO missions (id, json, position, updated_at)
             VALUES (
                 ?1, ?2,
                 (SELECT COALESCE(MAX(position), 0) + 1 FROM missions),
                 ?3
             )
             ON CONFLICT(id) DO UPDATE SET
                 json = excluded.json,
                 updated_at = excluded.updated_at",
            params![
                mission.id.as_str(),
                json,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Update an existing mission in place.  Returns `false` (and stores
    /// nothing) when no mission with that id exists.
    pub fn update_mission(&self, mission: &MissionConfig) -> Result<bool> {
        let json = mission.to_json()?;
        let affected = self.conn().execute(
            "UPDATE missions SET json = ?2, updated_at = ?3 WHERE id = ?1",
            params![
                mission.id.as_str(),
                json,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(affected > 0)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single mission by id.
    pub fn get_mission(&self, id: &MissionId) -> Result<Option<MissionConfig>> {
        let json: Option<String> = self
            .conn()
            .query_row(
                "SELECT json FROM missions WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(Some(MissionConfig::from_json(&json)?)),
            None => Ok(None),
        }
    }

    /// List all missions in insert order.
    pub fn list_missions(&self) -> Result<Vec<MissionConfig>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT json FROM missions ORDER BY position ASC")?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut missions = Vec::new();
        for row in rows {
            missions.push(MissionConfig::from_json(&row?)?);
        }
        Ok(missions)
    }

    pub fn mission_count(&self) -> Result<usize> {
        let count: i64 =
            self.conn()
                .query_row("SELECT COUNT(*) FROM missions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a mission by id.  Returns `true` if a row was deleted.
    ///
    /// The active mission (per [`get_active_mission_id`]) is refused with
    /// [`StoreError::MissionActive`] — the caller must switch missions first.
    ///
    /// [`get_active_mission_id`]: Database::get_active_mission_id
    pub fn delete_mission(&self, id: &MissionId) -> Result<bool> {
        if self.get_active_mission_id()?.as_ref() == Some(id) {
            return Err(StoreError::MissionActive(id.clone()));
        }

        let affected = self
            .conn()
            .execute("DELETE FROM missions WHERE id = ?1", params![id.as_str()])?;
        Ok(affected > 0)
    }
}
