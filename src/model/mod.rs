//! Shared data model for queries, candidate items, and search outcomes.

pub mod item;
pub mod query;
pub mod result;

pub use item::{Action, Extension, Item, ItemKind, MatchSpan, RenderPayload, Scoring, SourceRef};
pub use query::Query;
pub use result::{SearchResult, SourceStat, SourceStatus, StageStat};
