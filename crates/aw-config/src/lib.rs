pub mod filters;
pub mod logging;
pub mod rule;
mod validate;
pub mod watch;

pub use filters::{GlobalFilters, RuleFilters};
pub use logging::{LogFormat, LoggingConfig};
pub use rule::RuleConfig;
pub use watch::WatchConfig;
