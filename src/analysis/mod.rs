pub mod diff;
pub mod history;

pub use diff::DiffStats;
pub use history::HistoryStats;
