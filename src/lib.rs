//! carik-web - URL shortening, pasting and up/down checks for carik-bot
//!
//! Every operation is a single outbound request to a third-party service.
//! Shorteners and pastebins are looked up by name in a `ServiceRegistry`
//! that is populated once at startup.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::errors::{ServiceError, WebError, WebResult};
pub use application::services::{PageCheckService, WebService, PASTE_FAILED};
pub use domain::traits::{Pastebin, Shortener};
pub use infrastructure::config::Config;
pub use infrastructure::registry::ServiceRegistry;
