//! Chat registry - in-memory store of every chat
//!
//! The registry owns chats for the lifetime of the process. It grows by
//! append only; there is no removal. Lookups are linear scans in insertion
//! order.

use crate::error::{Error, Result};
use crate::models::{Chat, ChatId, ListingId, ListingSummary, Participants, UserId};

/// Central store of chats, keyed by [`ChatId`]
#[derive(Debug)]
pub struct ChatRegistry {
    /// Chats in insertion order
    chats: Vec<Chat>,
    /// Next id to hand out, `None` once the id space is used up
    next_id: Option<u64>,
}

impl ChatRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create an empty registry whose first chat gets `first_id`
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            chats: Vec::new(),
            next_id: Some(first_id),
        }
    }

    /// Allocate an id, build a pending chat and append it
    pub fn insert(
        &mut self,
        listing: ListingSummary,
        participants: Participants,
    ) -> Result<&mut Chat> {
        let id = ChatId(self.next_id.ok_or(Error::ChatIdsExhausted)?);
        self.next_id = id.0.checked_add(1);

        tracing::debug!(chat_id = %id, listing_id = %listing.id, "Registered chat");
        self.chats.push(Chat::new(id, listing, participants));
        let idx = self.chats.len() - 1;
        Ok(&mut self.chats[idx])
    }

    /// Get a chat by ID
    pub fn get(&self, id: ChatId) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: ChatId) -> Option<&mut Chat> {
        self.chats.iter_mut().find(|c| c.id == id)
    }

    /// Check if a chat is registered
    pub fn contains(&self, id: ChatId) -> bool {
        self.get(id).is_some()
    }

    /// First chat about `listing_id` where `user_id` is either participant
    pub fn find_existing(&self, listing_id: &ListingId, user_id: &UserId) -> Option<&Chat> {
        self.chats
            .iter()
            .find(|c| c.listing_id() == listing_id && c.involves(user_id))
    }

    /// All chats in insertion order
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    /// Chats a user takes part in
    pub fn for_user<'a>(&'a self, user_id: &'a UserId) -> impl Iterator<Item = &'a Chat> + 'a {
        self.chats.iter().filter(move |c| c.involves(user_id))
    }

    /// Get number of registered chats
    pub fn len(&self) -> usize {
        self.chats.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }
}

impl Default for ChatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
