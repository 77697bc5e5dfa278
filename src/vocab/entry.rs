use serde::{Deserialize, Serialize};

use crate::vocab::list::ListId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

/// A single word pair with its session progress.
///
/// The owning list is referenced by id, not held — the entry/list relation
/// is resolved through the trainer's list collection to avoid a cycle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VocableEntry {
    pub id: EntryId,
    pub list: ListId,
    pub word_a: String,
    pub word_b: String,
    #[serde(default)]
    pub tip: Option<String>,
    /// Correct answers accumulated this session. Incremented only by the
    /// engine, only while this entry is the active one.
    #[serde(default)]
    pub points: u32,
}

impl VocableEntry {
    pub fn new(
        id: EntryId,
        list: ListId,
        word_a: impl Into<String>,
        word_b: impl Into<String>,
    ) -> Self {
        Self {
            id,
            list,
            word_a: word_a.into(),
            word_b: word_b.into(),
            tip: None,
            points: 0,
        }
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    pub fn tip_text(&self) -> &str {
        self.tip.as_deref().unwrap_or("")
    }
}
