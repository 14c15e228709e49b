//! Application services - Public operations for the host bot

pub mod web_service;
pub mod pagecheck_service;

pub use web_service::{WebService, PASTE_FAILED};
pub use pagecheck_service::{PageCheckService, NOT_A_SITE, STATUS_FAILED};
