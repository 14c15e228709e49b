//! Domain entities - Core value types with no external dependencies

pub mod verdict;

pub use verdict::Verdict;
