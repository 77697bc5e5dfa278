use serde::{Deserialize, Serialize};

use crate::vocab::entry::VocableEntry;

/// Which side of an entry is asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionMode {
    /// Question shows side B, side A is the expected solution.
    AskA,
    /// Question shows side A, side B is the expected solution.
    AskB,
    /// A fair coin is flipped on every new entry.
    Random,
}

/// Immutable per-session configuration plus the counters carried across an
/// interrupted session.
///
/// The engine keeps its own tips/failure counters and only writes them back
/// here through [`crate::trainer::Trainer::settings_snapshot`] when the host
/// wants to persist session state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Correct answers required before an entry counts as solved.
    pub times_to_solve: u32,
    pub mode: QuestionMode,
    pub allow_tips: bool,
    pub tips_given: u32,
    pub times_failed: u32,
    pub case_sensitive: bool,
    /// Entry that was being asked when a previous session was interrupted.
    /// Consumed exactly once by the first selection of a resumed session.
    #[serde(default)]
    pub pending: Option<VocableEntry>,
}

impl SessionSettings {
    /// Fresh session with zeroed counters and nothing pending.
    pub fn new(times_to_solve: u32, mode: QuestionMode, allow_tips: bool, case_sensitive: bool) -> Self {
        Self::resumed(times_to_solve, mode, allow_tips, 0, 0, case_sensitive, None)
    }

    /// Restored session with carried-over counters and an optional entry to
    /// resume on.
    pub fn resumed(
        times_to_solve: u32,
        mode: QuestionMode,
        allow_tips: bool,
        tips_given: u32,
        times_failed: u32,
        case_sensitive: bool,
        pending: Option<VocableEntry>,
    ) -> Self {
        Self {
            times_to_solve,
            mode,
            allow_tips,
            tips_given,
            times_failed,
            case_sensitive,
            pending,
        }
    }
}
