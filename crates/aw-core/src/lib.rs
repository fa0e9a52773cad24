pub mod error;
pub mod eval;
pub mod event;
pub mod filters;
pub mod listing;
pub mod orchestrator;
pub mod registry;
pub mod sink;

pub use error::{WatchError, WatchReason, WatchResult};
pub use eval::evaluate;
pub use event::MatchEvent;
pub use filters::EffectiveFilters;
pub use listing::{FieldValue, Listing, read_jsonl};
pub use orchestrator::{dispatch, evaluate_batch};
pub use registry::{
    CompiledRule, RegistryError, RuleDiagnostic, RuleRegistry, SharedRegistry,
};
pub use sink::{FileMatchSink, MatchSink, StdoutMatchSink};
