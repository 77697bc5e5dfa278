use anyhow::Result;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::gateway::{PersistenceGateway, SessionStateSaver};
use crate::vocab::{EntryId, ListId, SessionSettings, VocableEntry, VocableList};

/// Gateway backend that keeps everything in process memory.
///
/// For ephemeral hosts and tests. Mutating calls are counted so scenarios
/// can assert on them.
pub struct MemoryGateway {
    entries: Vec<VocableEntry>,
    rng: SmallRng,
    pub wipe_calls: u32,
    pub update_calls: u32,
    pub random_calls: u32,
    pub delete_calls: u32,
}

impl MemoryGateway {
    pub fn new(entries: Vec<VocableEntry>) -> Self {
        Self::with_rng(entries, SmallRng::from_entropy())
    }

    pub fn with_rng(entries: Vec<VocableEntry>, rng: SmallRng) -> Self {
        Self {
            entries,
            rng,
            wipe_calls: 0,
            update_calls: 0,
            random_calls: 0,
            delete_calls: 0,
        }
    }

    pub fn entry(&self, id: EntryId) -> Option<&VocableEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

impl PersistenceGateway for MemoryGateway {
    fn wipe_session_progress(&mut self) -> Result<()> {
        self.wipe_calls += 1;
        for entry in &mut self.entries {
            entry.points = 0;
        }
        Ok(())
    }

    fn load_session_data(
        &mut self,
        lists: &mut [VocableList],
        settings: &SessionSettings,
    ) -> Result<Vec<ListId>> {
        let mut pool = Vec::new();
        for list in lists.iter_mut() {
            list.total = self.entries.iter().filter(|e| e.list == list.id).count() as u32;
            list.unsolved = self
                .entries
                .iter()
                .filter(|e| e.list == list.id && e.points < settings.times_to_solve)
                .count() as u32;
            if list.unsolved > 0 {
                pool.push(list.id);
            }
        }
        Ok(pool)
    }

    fn update_entry_progress(&mut self, entry: &VocableEntry) -> Result<()> {
        self.update_calls += 1;
        if let Some(stored) = self.entries.iter_mut().find(|e| e.id == entry.id) {
            stored.points = entry.points;
        }
        Ok(())
    }

    fn random_entry(
        &mut self,
        list: ListId,
        exclude: Option<EntryId>,
        settings: &SessionSettings,
        allow_repetition: bool,
    ) -> Result<Option<VocableEntry>> {
        self.random_calls += 1;
        let candidates: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.list == list && e.points < settings.times_to_solve)
            .filter(|e| allow_repetition || exclude != Some(e.id))
            .collect();
        if candidates.is_empty() {
            return Ok(None);
        }
        let idx = self.rng.gen_range(0..candidates.len());
        Ok(Some(candidates[idx].clone()))
    }

    fn delete_session(&mut self) -> Result<()> {
        self.delete_calls += 1;
        Ok(())
    }
}

/// In-memory counterpart of the session-state saver.
#[derive(Default)]
pub struct MemorySaver {
    pub save_calls: u32,
    /// Outer `Some` once a save happened; inner id is the saved entry.
    pub saved: Option<Option<EntryId>>,
}

impl SessionStateSaver for MemorySaver {
    fn save_last_active_entry(&mut self, entry: Option<&VocableEntry>) -> Result<()> {
        self.save_calls += 1;
        self.saved = Some(entry.map(|e| e.id));
        Ok(())
    }
}
