//! Sublet Core Library
//!
//! Listing chats for a sublease marketplace: the chat and message models,
//! the in-memory chat registry, and the lifecycle service that moves a chat
//! from inquiry to a confirmed stay.

pub mod config;
pub mod error;
pub mod format;
pub mod invariants;
pub mod lifecycle;
pub mod models;
pub mod registry;

pub use config::{ChatConfig, CurrentUserConfig};
pub use error::{Error, Result};
pub use lifecycle::{compose_inquiry_text, ChatService};
pub use models::*;
pub use registry::ChatRegistry;
