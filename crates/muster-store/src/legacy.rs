//! Import/export of the legacy mission-list layout.
//!
//! Earlier builds kept the whole mission database as one preference-store
//! string: a JSON array whose elements are mission JSON (either embedded
//! objects or stringified objects, both occur in the field).  This module
//! reads that layout for migration and writes it back for sharing with
//! clients that still speak it.
//!
//! Import tolerance matches the old loader: a malformed array entry is
//! dropped with a warning and the loop continues; a malformed top-level
//! document fails the whole import.

use serde_json::Value;
use tracing::warn;

use muster_config::MissionConfig;

use crate::database::Database;
use crate::error::{Result, StoreError};

/// Outcome counters for a legacy import.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped: usize,
}

impl Database {
    /// Import a legacy JSON-array mission list, upserting every entry that
    /// parses.  Returns how many entries were stored and how many dropped.
    pub fn import_legacy_array(&self, json: &str) -> Result<ImportStats> {
        let top: Value = serde_json::from_str(json)?;
        let entries = match top {
            Value::Array(entries) => entries,
            other => {
                return Err(StoreError::LegacyFormat(format!(
                    "expected a JSON array, got {}",
                    kind_of(&other)
                )));
            }
        };

        let mut stats = ImportStats::default();
        for (index, entry) in entries.into_iter().enumerate() {
            let parsed = match entry {
                // Stringified mission object.
                Value::String(inner) => MissionConfig::from_json(&inner),
                // Embedded mission object.
                obj @ Value::Object(_) => MissionConfig::from_json(&obj.to_string()),
                other => {
                    warn!(index, kind = kind_of(&other), "skipping non-object entry");
                    stats.skipped += 1;
                    continue;
                }
            };

            match parsed {
                Ok(mission) => {
                    self.upsert_mission(&mission)?;
                    stats.imported += 1;
                }
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed mission entry");
                    stats.skipped += 1;
                }
            }
        }

        Ok(stats)
    }

    /// Export every stored mission as the legacy array-of-strings layout.
    pub fn export_legacy_array(&self) -> Result<String> {
        let mut entries = Vec::new();
        for mission in self.list_missions()? {
            entries.push(mission.to_json()?);
        }
        Ok(serde_json::to_string(&entries)?)
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
