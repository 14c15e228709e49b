//! Domain traits - Abstractions for third-party service backends

pub mod shortener;
pub mod pastebin;

pub use shortener::Shortener;
pub use pastebin::Pastebin;
