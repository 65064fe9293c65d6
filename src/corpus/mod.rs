//! Sentence corpus access: file naming, text folding and the scan itself.

pub mod file_name;
pub mod normalize;
pub mod scanner;

pub use file_name::parse_file_name;
pub use normalize::normalize;
pub use scanner::{scan, ScanOptions, ScanStats, SentenceMatches};
