pub mod error;
pub mod loader;
pub mod registry;
pub mod rule;
pub mod tokens;

pub use error::RulesError;
pub use loader::{load_rule_set, parse_rule_set};
pub use registry::RuleRegistry;
pub use rule::{AssignedRange, ChecksumAlgorithm, EffectiveRange, LocaleRule};
pub use tokens::{TokenClass, TokenTable, compact_key};
