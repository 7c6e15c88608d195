//! Ranking pipeline: ordered scoring stages over the merged item list.

pub mod score;
pub mod sorter;
pub mod stage;

#[cfg(test)]
mod tests;

pub use score::ScoreStage;
pub use sorter::Sorter;
pub use stage::ScoringStage;
