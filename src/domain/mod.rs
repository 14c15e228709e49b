//! Domain layer - Core abstractions with no provider specifics
//! 
//! This layer contains:
//! - Entities: Value types (Verdict)
//! - Traits: Backend capabilities (Shortener, Pastebin)

pub mod entities;
pub mod traits;
