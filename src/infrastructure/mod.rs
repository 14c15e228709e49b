//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Http: Client construction and response checks
//! - Registry: Name-keyed backends
//! - Shorteners / Pastebins: Third-party provider backends
//! - Pagecheck: Status page scraping

pub mod config;
pub mod http;
pub mod registry;
pub mod shorteners;
pub mod pastebins;
pub mod pagecheck;
