// Pattern extraction: statistical fingerprints of how a résumé is formatted and
// written, plus coaching comparisons against a reference résumé. Not used for scoring.

pub mod compare;
pub mod content;
pub mod formatting;
pub mod handlers;
pub mod verbs;

pub use compare::{compare_patterns, PatternComparison};
pub use content::{extract_content_patterns, ContentPatterns};
pub use formatting::{extract_formatting_patterns, FormattingPatterns};
