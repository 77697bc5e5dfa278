use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Serialize, de::DeserializeOwned};

use crate::gateway::{PersistenceGateway, SessionStateSaver};
use crate::store::schema::{LibraryData, SessionData};
use crate::vocab::{EntryId, ListId, SessionSettings, VocableEntry, VocableList};

const LIBRARY_FILE: &str = "lists.json";
const SESSION_FILE: &str = "session.json";

/// File-backed persistence gateway.
///
/// Two JSON files under the base directory: `lists.json` holds the word
/// material, `session.json` the per-entry points of the running session.
/// Writes go through a `.tmp` file and an atomic rename.
pub struct JsonStore {
    base_dir: PathBuf,
    rng: SmallRng,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("voctrain");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            rng: SmallRng::from_entropy(),
        })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_library(&self) -> LibraryData {
        self.load(LIBRARY_FILE)
    }

    pub fn save_library(&self, data: &LibraryData) -> Result<()> {
        self.save(LIBRARY_FILE, data)
    }

    fn session(&self) -> SessionData {
        self.load(SESSION_FILE)
    }

    fn save_session(&self, data: &mut SessionData) -> Result<()> {
        data.updated_at = Some(Utc::now());
        self.save(SESSION_FILE, data)
    }

    /// Lists from the library with zeroed counts; the counts are filled in
    /// by [`PersistenceGateway::load_session_data`].
    pub fn lists(&self) -> Vec<VocableList> {
        self.load_library()
            .lists
            .iter()
            .map(|stored| VocableList::new(stored.id, stored.name_a.clone(), stored.name_b.clone()))
            .collect()
    }

    /// Entry of the interrupted session, if one was saved, for
    /// [`SessionSettings::pending`].
    pub fn pending_entry(&self) -> Option<VocableEntry> {
        self.session().last_entry
    }
}

impl PersistenceGateway for JsonStore {
    fn wipe_session_progress(&mut self) -> Result<()> {
        let mut session = self.session();
        session.points.clear();
        session.last_entry = None;
        self.save_session(&mut session)
    }

    fn load_session_data(
        &mut self,
        lists: &mut [VocableList],
        settings: &SessionSettings,
    ) -> Result<Vec<ListId>> {
        let library = self.load_library();
        let session = self.session();
        let mut pool = Vec::new();

        for list in lists.iter_mut() {
            let Some(stored) = library.lists.iter().find(|l| l.id == list.id) else {
                list.total = 0;
                list.unsolved = 0;
                continue;
            };
            list.total = stored.entries.len() as u32;
            list.unsolved = stored
                .entries
                .iter()
                .filter(|e| session.entry_points(e.id) < settings.times_to_solve)
                .count() as u32;
            if list.unsolved > 0 {
                pool.push(list.id);
            }
        }
        Ok(pool)
    }

    fn update_entry_progress(&mut self, entry: &VocableEntry) -> Result<()> {
        let mut session = self.session();
        session.points.insert(entry.id.0, entry.points);
        self.save_session(&mut session)
    }

    fn random_entry(
        &mut self,
        list: ListId,
        exclude: Option<EntryId>,
        settings: &SessionSettings,
        allow_repetition: bool,
    ) -> Result<Option<VocableEntry>> {
        let library = self.load_library();
        let session = self.session();
        let Some(stored) = library.lists.iter().find(|l| l.id == list) else {
            return Ok(None);
        };

        let candidates: Vec<_> = stored
            .entries
            .iter()
            .filter(|e| session.entry_points(e.id) < settings.times_to_solve)
            .filter(|e| allow_repetition || exclude != Some(e.id))
            .collect();
        if candidates.is_empty() {
            return Ok(None);
        }
        let picked = candidates[self.rng.gen_range(0..candidates.len())];
        Ok(Some(picked.to_vocable(list, session.entry_points(picked.id))))
    }

    fn delete_session(&mut self) -> Result<()> {
        let path = self.file_path(SESSION_FILE);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

impl SessionStateSaver for JsonStore {
    fn save_last_active_entry(&mut self, entry: Option<&VocableEntry>) -> Result<()> {
        let mut session = self.session();
        session.last_entry = entry.cloned();
        self.save_session(&mut session)
    }
}
