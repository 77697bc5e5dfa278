pub mod entry;
pub mod list;
pub mod settings;

pub use entry::{EntryId, VocableEntry};
pub use list::{ListId, VocableList};
pub use settings::{QuestionMode, SessionSettings};
