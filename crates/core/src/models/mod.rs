//! Data models for Sublet

mod user;
mod listing;
mod message;
mod chat;

pub use user::*;
pub use listing::*;
pub use message::*;
pub use chat::*;
