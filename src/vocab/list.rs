use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub i64);

/// A named collection of entries with aggregate session counts.
///
/// `unsolved` tracks how many entries are still below the solve threshold;
/// it is refreshed from the persistence gateway at session start and
/// decremented by the engine as entries cross the threshold.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VocableList {
    pub id: ListId,
    pub name_a: String,
    pub name_b: String,
    pub total: u32,
    pub unsolved: u32,
}

impl VocableList {
    pub fn new(id: ListId, name_a: impl Into<String>, name_b: impl Into<String>) -> Self {
        Self {
            id,
            name_a: name_a.into(),
            name_b: name_b.into(),
            total: 0,
            unsolved: 0,
        }
    }
}
