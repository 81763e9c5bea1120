//! Local generation library: history records and folders.
//!
//! The library owns everything the user accumulates across sessions —
//! the ordered generation history and the folder labels used to group
//! it — and keeps both synchronized to the durable store on every
//! mutation.

mod folders;
mod history;

pub use folders::FolderRegistry;
pub use history::{
    FolderFilter, GenerationRecord, HistoryStore, LibraryError, Mode, UNFILED, default_label,
};
