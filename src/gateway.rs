use anyhow::Result;

use crate::vocab::{EntryId, ListId, SessionSettings, VocableEntry, VocableList};

/// Storage boundary of the session engine.
///
/// All durable mutation is delegated here; the engine treats every call as
/// blocking and degrades gracefully when one fails (the in-memory session
/// keeps going, persistence may lag until the next successful write).
pub trait PersistenceGateway {
    /// Remove all per-entry session points from a previous session.
    fn wipe_session_progress(&mut self) -> Result<()>;

    /// Refresh `total`/`unsolved` on every list in place and return the ids
    /// of lists that still have unsolved entries. `settings` supplies the
    /// solve threshold the unsolved counts are measured against.
    fn load_session_data(
        &mut self,
        lists: &mut [VocableList],
        settings: &SessionSettings,
    ) -> Result<Vec<ListId>>;

    /// Persist the given entry's progress counter.
    fn update_entry_progress(&mut self, entry: &VocableEntry) -> Result<()>;

    /// Draw a uniformly random entry from `list` that is still below
    /// `settings.times_to_solve`. `exclude` is skipped unless
    /// `allow_repetition` is set. `None` means the list has no candidate.
    fn random_entry(
        &mut self,
        list: ListId,
        exclude: Option<EntryId>,
        settings: &SessionSettings,
        allow_repetition: bool,
    ) -> Result<Option<VocableEntry>>;

    /// Drop the session record entirely. Called once, when the last list
    /// leaves the unsolved pool.
    fn delete_session(&mut self) -> Result<()>;
}

/// Persists which entry was being asked, so an interrupted session can be
/// resumed through [`SessionSettings::pending`].
pub trait SessionStateSaver {
    fn save_last_active_entry(&mut self, entry: Option<&VocableEntry>) -> Result<()>;
}
