use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::diag::{DiagnosticSink, LogSink};
use crate::error::TrainerError;
use crate::gateway::{PersistenceGateway, SessionStateSaver};
use crate::vocab::{ListId, QuestionMode, SessionSettings, VocableEntry, VocableList};

/// Which side of the active entry holds the expected solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    SideA,
    SideB,
}

/// The drill session engine.
///
/// Owns the active entry, the pool of lists that still contain unsolved
/// entries, and all progress accounting. Single-threaded and synchronous:
/// every call runs to completion, and every durable mutation is delegated to
/// the [`PersistenceGateway`]. Gateway failures are reported through the
/// diagnostic sink and degrade the session in place; they never propagate to
/// the caller after construction.
pub struct Trainer<G: PersistenceGateway, S: SessionStateSaver> {
    gateway: G,
    saver: S,
    sink: Box<dyn DiagnosticSink>,
    rng: SmallRng,
    settings: SessionSettings,
    lists: Vec<VocableList>,
    unsolved_lists: Vec<ListId>,
    current: Option<VocableEntry>,
    direction: Direction,
    times_to_solve: u32,
    tips: u32,
    failed: u32,
    total: u32,
    unsolved: u32,
    // TODO: carry this across resumed sessions the way tips/failures are
    times_solution_shown: u32,
    showed_solution: bool,
    resume_pending: bool,
}

impl<G: PersistenceGateway, S: SessionStateSaver> Trainer<G, S> {
    /// Build a session over the given lists. Wipes prior session progress
    /// when `new_session` is set, refreshes list counts from the gateway,
    /// and selects the first entry.
    pub fn new(
        lists: Vec<VocableList>,
        settings: SessionSettings,
        gateway: G,
        saver: S,
        new_session: bool,
    ) -> Result<Self, TrainerError> {
        Self::with_parts(
            lists,
            settings,
            gateway,
            saver,
            new_session,
            SmallRng::from_entropy(),
            Box::new(LogSink),
        )
    }

    /// Like [`Trainer::new`] but with an explicit random source and
    /// diagnostic sink.
    pub fn with_parts(
        mut lists: Vec<VocableList>,
        settings: SessionSettings,
        mut gateway: G,
        saver: S,
        new_session: bool,
        rng: SmallRng,
        sink: Box<dyn DiagnosticSink>,
    ) -> Result<Self, TrainerError> {
        if lists.is_empty() {
            return Err(TrainerError::InvalidArgument(
                "at least one vocable list is required",
            ));
        }

        if new_session && let Err(e) = gateway.wipe_session_progress() {
            sink.warn(&format!(
                "unable to wipe previous session progress: {}",
                TrainerError::Persistence(e)
            ));
        }

        let unsolved_lists = match gateway.load_session_data(&mut lists, &settings) {
            Ok(pool) => pool,
            Err(e) => {
                sink.error(&format!(
                    "unable to load session data: {}",
                    TrainerError::Persistence(e)
                ));
                Vec::new()
            }
        };

        let total = lists.iter().map(|l| l.total).sum();
        let unsolved = lists.iter().map(|l| l.unsolved).sum();
        let resume_pending = settings.pending.is_some();

        let mut trainer = Self {
            gateway,
            saver,
            sink,
            rng,
            times_to_solve: settings.times_to_solve,
            tips: settings.tips_given,
            failed: settings.times_failed,
            settings,
            lists,
            unsolved_lists,
            current: None,
            direction: Direction::SideA,
            total,
            unsolved,
            times_solution_shown: 0,
            showed_solution: false,
            resume_pending,
        };
        trainer.select_next();
        Ok(trainer)
    }

    /// Check a submitted answer against the expected solution.
    ///
    /// A match accounts the entry as correct and advances to a new entry; a
    /// mismatch only bumps the failure counter — the same entry stays active
    /// for another attempt.
    pub fn check_solution(&mut self, answer: &str) -> bool {
        let matched = match self.solution_raw() {
            Some(expected) => {
                if self.settings.case_sensitive {
                    expected == answer
                } else {
                    expected.to_lowercase() == answer.to_lowercase()
                }
            }
            None => {
                self.sink.error(
                    &TrainerError::InconsistentState("no active entry to check an answer against")
                        .to_string(),
                );
                return false;
            }
        };
        if matched {
            self.account(true);
        } else {
            self.failed += 1;
        }
        matched
    }

    /// Account an attempt for modes where free-text comparison does not
    /// apply (self-graded cards). A failed attempt counts as both a failure
    /// and a revealed solution. Always advances to a new entry.
    pub fn update_entry(&mut self, passed: bool) {
        if !passed {
            self.failed += 1;
            self.times_solution_shown += 1;
        }
        self.account(passed);
    }

    /// Shared accounting for both answer paths.
    fn account(&mut self, correct: bool) {
        let (points, list_id) = match self.current.as_mut() {
            Some(entry) => {
                if correct {
                    entry.points += 1;
                }
                (entry.points, entry.list)
            }
            None => {
                self.sink
                    .error(&TrainerError::InconsistentState("no active entry to account").to_string());
                return;
            }
        };

        if points >= self.times_to_solve {
            self.unsolved = self.unsolved.saturating_sub(1);
            if let Some(list) = self.lists.iter_mut().find(|l| l.id == list_id) {
                list.unsolved = list.unsolved.saturating_sub(1);
                if list.unsolved == 0 {
                    self.unsolved_lists.retain(|id| *id != list_id);
                    if self.unsolved_lists.is_empty() {
                        if let Err(e) = self.gateway.delete_session() {
                            self.sink.warn(&format!(
                                "unable to delete finished session: {}",
                                TrainerError::Persistence(e)
                            ));
                        }
                        self.sink.debug("session finished");
                    }
                }
            }
        }

        self.select_next();
    }

    /// Select the next active entry and its direction.
    fn select_next(&mut self) {
        if let Some(current) = &self.current
            && let Err(e) = self.gateway.update_entry_progress(current)
        {
            self.sink.error(&format!(
                "unable to persist entry progress: {}",
                TrainerError::Persistence(e)
            ));
            return;
        }
        self.showed_solution = false;

        if self.unsolved_lists.is_empty() {
            self.sink.debug("no unsolved lists remaining");
            return;
        }

        let mut selected = self.rng.gen_range(0..self.unsolved_lists.len());
        let mut allow_repetition = false;
        if let Some(current) = &self.current {
            let sole_entry_left = self.unsolved_lists.len() == 1
                && self.list_unsolved(self.unsolved_lists[0]) == 1;
            if sole_entry_left {
                // No alternative to re-asking the same entry.
                allow_repetition = true;
                self.sink.debug("single unsolved entry left, repetition allowed");
            } else {
                let chosen = self.unsolved_lists[selected];
                if self.list_unsolved(chosen) == 1 && chosen == current.list {
                    // The chosen list is down to the entry just asked; shift
                    // to a neighbouring pool slot instead. The neighbour's
                    // own single-entry hazard is not re-checked here.
                    if selected + 1 >= self.unsolved_lists.len() {
                        selected -= 1;
                    } else {
                        selected += 1;
                    }
                }
            }
        }
        let chosen = self.unsolved_lists[selected];

        if self.resume_pending {
            // One-shot: the interrupted session's entry takes the first slot.
            self.resume_pending = false;
            self.current = self.settings.pending.clone();
        } else {
            let exclude = self.current.as_ref().map(|e| e.id);
            self.current = match self
                .gateway
                .random_entry(chosen, exclude, &self.settings, allow_repetition)
            {
                Ok(entry) => entry,
                Err(e) => {
                    self.sink.error(&format!(
                        "unable to draw a random entry: {}",
                        TrainerError::Persistence(e)
                    ));
                    None
                }
            };
        }
        if self.current.is_none() {
            self.sink.error(
                &TrainerError::InconsistentState("gateway yielded no entry for a list marked unsolved")
                    .to_string(),
            );
        }

        let solution_on_a = match self.settings.mode {
            QuestionMode::AskA => true,
            QuestionMode::AskB => false,
            QuestionMode::Random => self.rng.gen_bool(0.5),
        };
        self.direction = if solution_on_a {
            Direction::SideA
        } else {
            Direction::SideB
        };
    }

    /// The question side of the active entry, or `""` when none is active.
    pub fn question(&self) -> String {
        match self.current.as_ref() {
            Some(entry) => match self.direction {
                Direction::SideA => entry.word_b.clone(),
                Direction::SideB => entry.word_a.clone(),
            },
            None => String::new(),
        }
    }

    /// The expected solution, counted as a revealed solution.
    pub fn solution(&mut self) -> String {
        self.times_solution_shown += 1;
        match self.solution_raw() {
            Some(s) => s.to_string(),
            None => {
                self.sink.error(
                    &TrainerError::InconsistentState("no active entry to reveal a solution for")
                        .to_string(),
                );
                String::new()
            }
        }
    }

    /// The expected solution without bumping the reveal counter. Still marks
    /// the solution as shown for the active entry.
    pub fn solution_uncounted(&mut self) -> String {
        if self.current.is_none() {
            self.sink.error(
                &TrainerError::InconsistentState("no active entry to reveal a solution for")
                    .to_string(),
            );
            return String::new();
        }
        self.showed_solution = true;
        self.solution_raw().unwrap_or_default().to_string()
    }

    fn solution_raw(&self) -> Option<&str> {
        let entry = self.current.as_ref()?;
        Some(match self.direction {
            Direction::SideA => entry.word_a.as_str(),
            Direction::SideB => entry.word_b.as_str(),
        })
    }

    /// The active entry's tip, counted against the tips-given counter.
    /// Empty when tips are not permitted or no entry is active.
    pub fn tip(&mut self) -> String {
        let Some(entry) = self.current.as_ref() else {
            return String::new();
        };
        if !self.settings.allow_tips {
            return String::new();
        }
        self.tips += 1;
        entry.tip_text().to_string()
    }

    /// Column label for the question side, from the active list's names.
    pub fn question_column(&self) -> String {
        match (self.active_list(), self.direction) {
            (Some(list), Direction::SideA) => list.name_b.clone(),
            (Some(list), Direction::SideB) => list.name_a.clone(),
            (None, _) => String::new(),
        }
    }

    /// Column label for the solution side.
    pub fn solution_column(&self) -> String {
        match (self.active_list(), self.direction) {
            (Some(list), Direction::SideA) => list.name_a.clone(),
            (Some(list), Direction::SideB) => list.name_b.clone(),
            (None, _) => String::new(),
        }
    }

    /// Entries still below the solve threshold.
    pub fn remaining(&self) -> u32 {
        self.unsolved
    }

    /// Entries that crossed the solve threshold. `remaining() + solved()`
    /// always equals `total()`.
    pub fn solved(&self) -> u32 {
        self.total - self.unsolved
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// True once every list has left the unsolved pool.
    pub fn is_finished(&self) -> bool {
        self.unsolved_lists.is_empty()
    }

    /// Persist the active entry so a later session can resume on it.
    pub fn save_session_state(&mut self) {
        if let Err(e) = self.saver.save_last_active_entry(self.current.as_ref()) {
            self.sink.warn(&format!(
                "unable to save session state: {}",
                TrainerError::Persistence(e)
            ));
        }
    }

    /// Settings with the engine's accumulated counters and the active entry
    /// folded back in, for external persistence.
    pub fn settings_snapshot(&self) -> SessionSettings {
        let mut settings = self.settings.clone();
        settings.tips_given = self.tips;
        settings.times_failed = self.failed;
        settings.pending = self.current.clone();
        settings
    }

    pub fn current_entry(&self) -> Option<&VocableEntry> {
        self.current.as_ref()
    }

    pub fn lists(&self) -> &[VocableList] {
        &self.lists
    }

    pub fn tips_given(&self) -> u32 {
        self.tips
    }

    pub fn failures(&self) -> u32 {
        self.failed
    }

    pub fn times_solution_shown(&self) -> u32 {
        self.times_solution_shown
    }

    /// Whether the solution was revealed for the active entry.
    pub fn solution_was_shown(&self) -> bool {
        self.showed_solution
    }

    /// Access to the storage backend, e.g. for hosts that share one store
    /// between the engine and their own bookkeeping.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn active_list(&self) -> Option<&VocableList> {
        let entry = self.current.as_ref()?;
        self.lists.iter().find(|l| l.id == entry.list)
    }

    fn list_unsolved(&self, id: ListId) -> u32 {
        self.lists
            .iter()
            .find(|l| l.id == id)
            .map_or(0, |l| l.unsolved)
    }
}
