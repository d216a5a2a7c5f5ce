// Public modules
pub mod error;
pub mod rewrite;
pub mod rules;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use rewrite::{FileReport, FileStatus, RewriteMode, RewriteReport};
pub use rules::{ReplaceRule, RuleSet};
