//! Small key-value settings: the active mission id and the name of the
//! certificate store the engine should load.

use rusqlite::{params, OptionalExtension};

use muster_shared::MissionId;

use crate::database::Database;
use crate::error::Result;

const KEY_ACTIVE_MISSION: &str = "active_mission_id";
const KEY_CERTSTORE_FILE: &str = "certstore_file";

impl Database {
    fn set_setting(&self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => {
                self.conn().execute(
                    "INSERT INTO settings (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    params![key, value],
                )?;
            }
            None => {
                self.conn()
                    .execute("DELETE FROM settings WHERE key = ?1", params![key])?;
            }
        }
        Ok(())
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn()
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Record which mission the client is currently running, or clear it.
    pub fn set_active_mission_id(&self, id: Option<&MissionId>) -> Result<()> {
        self.set_setting(KEY_ACTIVE_MISSION, id.map(MissionId::as_str))
    }

    pub fn get_active_mission_id(&self) -> Result<Option<MissionId>> {
        Ok(self.get_setting(KEY_ACTIVE_MISSION)?.map(MissionId))
    }

    /// File name of the engine certificate store in use.
    pub fn set_certstore_file(&self, file: Option<&str>) -> Result<()> {
        self.set_setting(KEY_CERTSTORE_FILE, file)
    }

    pub fn get_certstore_file(&self) -> Result<Option<String>> {
        self.get_setting(KEY_CERTSTORE_FILE)
    }
}
