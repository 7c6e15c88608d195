//! beacon: query fan-out and ranking core for a desktop quick-launcher.
//!
//! Given a keystroke-level query, the engine consults every registered
//! source under bounded concurrency and per-call budgets, demotes slow
//! sources to a second fallback pass, streams debounced batch updates,
//! and ranks the merged union through a pluggable scoring pipeline.
//! Window chrome, hotkeys, the IPC transport, and the sources' own
//! indexes are the embedding application's business.

pub mod engine;
pub mod gather;
pub mod model;
pub mod rank;
pub mod sources;

pub use engine::{Engine, EngineError, SourceRegistry};
pub use gather::{GatherOptions, GatherUpdate, Gatherer};
pub use model::{Item, ItemKind, Query, SearchResult, SourceStat, SourceStatus};
pub use rank::{ScoringStage, Sorter};
pub use sources::Source;
