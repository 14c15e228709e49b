//! Pastebin backends

pub mod hastebin;

pub use hastebin::Hastebin;
