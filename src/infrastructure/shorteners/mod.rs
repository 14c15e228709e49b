//! Shortener backends

pub mod passthrough;
pub mod isgd;
pub mod googl;
pub mod gitio;

pub use passthrough::{follow_redirect, Passthrough};
pub use isgd::IsgdShortener;
pub use googl::GooglShortener;
pub use gitio::GitioShortener;
