use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vocab::{EntryId, ListId, VocableEntry};

const SCHEMA_VERSION: u32 = 1;

/// Word material: lists and their entries, independent of any session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LibraryData {
    pub schema_version: u32,
    pub lists: Vec<StoredList>,
}

impl Default for LibraryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            lists: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredList {
    pub id: ListId,
    pub name_a: String,
    pub name_b: String,
    pub entries: Vec<StoredEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: EntryId,
    pub word_a: String,
    pub word_b: String,
    #[serde(default)]
    pub tip: Option<String>,
}

impl StoredEntry {
    /// Materialize with the given session points.
    pub fn to_vocable(&self, list: ListId, points: u32) -> VocableEntry {
        VocableEntry {
            id: self.id,
            list,
            word_a: self.word_a.clone(),
            word_b: self.word_b.clone(),
            tip: self.tip.clone(),
            points,
        }
    }
}

/// Per-session progress, kept in its own file so wiping or deleting a
/// session never touches the word material.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionData {
    pub schema_version: u32,
    /// Entry id → points accumulated this session.
    pub points: HashMap<i64, u32>,
    /// Entry that was being asked when the session was suspended.
    #[serde(default)]
    pub last_entry: Option<VocableEntry>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            points: HashMap::new(),
            last_entry: None,
            updated_at: None,
        }
    }
}

impl SessionData {
    pub fn entry_points(&self, id: EntryId) -> u32 {
        self.points.get(&id.0).copied().unwrap_or(0)
    }
}
