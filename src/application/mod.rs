//! Application layer - Public operations
//! 
//! This layer contains:
//! - Services: Shortening, pasting and page checks
//! - Errors: Error taxonomy shared with the backends

pub mod errors;
pub mod services;
