//! Chat lifecycle service
//!
//! Creates chats and messages and moves chats through their status
//! machine:
//!
//! ```text
//! pending ──accept──▶ active ──▶ negotiating ──▶ agreement ──▶ confirmed ──▶ ongoing ──▶ completed
//!    │                  │             │              │             │            │
//!    └──decline──▶ declined           └──────────────┴─────────────┴────────────┴──▶ cancelled
//! ```
//!
//! Every status change goes through [`ChatStatus::can_transition_to`]. A
//! rejected change leaves the chat untouched. Operations that both change
//! status and append a message validate first and then apply both writes,
//! so a reader never sees one without the other.

use rust_decimal::Decimal;
use tracing::instrument;

use crate::config::ChatConfig;
use crate::error::{Error, Result};
use crate::format::short_date;
use crate::invariants;
use crate::models::{
    AgreementTerms, Chat, ChatId, ChatListItem, ChatStatus, DateRange, Listing, ListingId,
    Message, Participant, Participants, Sender, UserId,
};
use crate::registry::ChatRegistry;

pub const INQUIRY_ACCEPTED_NOTICE: &str = "Inquiry accepted. You can now negotiate the terms.";
pub const INQUIRY_DECLINED_NOTICE: &str = "Inquiry declined.";
pub const AGREEMENT_OFFER_TEXT: &str =
    "I've sent you a sublease agreement. Please review the details below:";

/// Opening text of an inquiry. A blank custom text falls back to the template.
pub fn compose_inquiry_text(listing: &Listing, custom_text: Option<&str>) -> String {
    match custom_text.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!(
            "Hi! I'm interested in your {} in {}. Is it still available for the dates {} to {}? \
             I'd love to learn more about it.",
            listing.category.noun(),
            listing.location.city,
            short_date(listing.availability.start()),
            short_date(listing.availability.end()),
        ),
    }
}

/// Owns the chat registry and applies every lifecycle operation to it
#[derive(Debug)]
pub struct ChatService {
    registry: ChatRegistry,
    config: ChatConfig,
}

impl ChatService {
    pub fn new(config: ChatConfig) -> Self {
        Self::with_registry(config, ChatRegistry::new())
    }

    pub fn with_registry(config: ChatConfig, registry: ChatRegistry) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn registry(&self) -> &ChatRegistry {
        &self.registry
    }

    /// Get a chat by ID
    pub fn chat(&self, chat_id: ChatId) -> Result<&Chat> {
        self.registry
            .get(chat_id)
            .ok_or(Error::ChatNotFound(chat_id))
    }

    fn chat_mut(&mut self, chat_id: ChatId) -> Result<&mut Chat> {
        self.registry
            .get_mut(chat_id)
            .ok_or(Error::ChatNotFound(chat_id))
    }

    /// Sender tag for a user, relative to the local user
    pub fn sender_for(&self, user_id: &UserId) -> Sender {
        if *user_id == self.config.current_user_id() {
            Sender::CurrentUser
        } else {
            Sender::Counterpart
        }
    }

    /// Create a pending chat between the listing owner and `initiator`.
    ///
    /// The local user stands in when `initiator` is `None`. Duplicates are
    /// not checked here; see [`ChatService::open_inquiry`].
    #[instrument(skip(self, listing, initiator), fields(listing_id = %listing.id))]
    pub fn create_chat(
        &mut self,
        listing: &Listing,
        initiator: Option<Participant>,
    ) -> Result<&Chat> {
        let sublessee = initiator.unwrap_or_else(|| self.config.current_participant());
        let participants = Participants {
            sublessor: listing.owner(),
            sublessee,
        };

        let chat = self.registry.insert(listing.summary(), participants)?;
        tracing::info!(
            chat_id = %chat.id,
            sublessor = %chat.participants.sublessor.id,
            sublessee = %chat.participants.sublessee.id,
            "Created chat"
        );
        invariants::assert_chat_invariants(chat);
        Ok(&*chat)
    }

    /// Compose the opening inquiry message for a chat without appending it
    pub fn create_initial_inquiry_message(
        &self,
        chat_id: ChatId,
        listing: &Listing,
        custom_text: Option<&str>,
    ) -> Result<Message> {
        self.chat(chat_id)?;
        Ok(Message::text(
            Sender::CurrentUser,
            compose_inquiry_text(listing, custom_text),
        ))
    }

    /// Contact flow from a listing: reuse or create a chat and send the inquiry.
    ///
    /// Returns the chat id and whether a new chat was created.
    #[instrument(skip(self, listing, initiator, custom_text), fields(listing_id = %listing.id))]
    pub fn open_inquiry(
        &mut self,
        listing: &Listing,
        initiator: Option<Participant>,
        custom_text: Option<&str>,
    ) -> Result<(ChatId, bool)> {
        let initiator = initiator.unwrap_or_else(|| self.config.current_participant());

        if self.config.prevent_duplicate_chats {
            if let Some(existing) = self.registry.find_existing(&listing.id, &initiator.id) {
                tracing::info!(chat_id = %existing.id, "Reusing existing chat");
                return Ok((existing.id, false));
            }
        }

        let sender = self.sender_for(&initiator.id);
        let chat_id = self.create_chat(listing, Some(initiator))?.id;
        let message = Message::text(sender, compose_inquiry_text(listing, custom_text));
        self.append(chat_id, message)?;
        Ok((chat_id, true))
    }

    /// Sublessor accepts a pending inquiry
    #[instrument(skip(self))]
    pub fn accept_inquiry(&mut self, chat_id: ChatId) -> Result<Message> {
        self.transition_with_notice(chat_id, ChatStatus::Active, INQUIRY_ACCEPTED_NOTICE)
    }

    /// Sublessor declines a pending inquiry
    #[instrument(skip(self))]
    pub fn decline_inquiry(&mut self, chat_id: ChatId) -> Result<Message> {
        self.transition_with_notice(chat_id, ChatStatus::Declined, INQUIRY_DECLINED_NOTICE)
    }

    /// Move a chat to `status` if the transition table allows it
    #[instrument(skip(self))]
    pub fn set_chat_status(&mut self, chat_id: ChatId, status: ChatStatus) -> Result<()> {
        let chat = self.chat_mut(chat_id)?;
        Self::apply_transition(chat, status)?;
        invariants::assert_chat_invariants(chat);
        Ok(())
    }

    /// Offer lease terms: moves the chat to `agreement` and appends the offer.
    ///
    /// The offer is authored by the chat's sublessor, so it shows up as
    /// [`Sender::Counterpart`] when the local user is the sublessee.
    #[instrument(skip(self, terms), fields(price = %terms.price, currency = %terms.currency))]
    pub fn send_agreement(&mut self, chat_id: ChatId, terms: AgreementTerms) -> Result<Message> {
        if terms.price < Decimal::ZERO {
            return Err(Error::InvalidPrice(terms.price));
        }

        let sender = self.sender_for(&self.chat(chat_id)?.participants.sublessor.id);
        let message = Message::agreement(sender, AGREEMENT_OFFER_TEXT, terms);
        let track_unread = self.config.track_unread;
        let chat = self.chat_mut(chat_id)?;
        Self::apply_transition(chat, ChatStatus::Agreement)?;
        let appended = Self::record(chat, message, track_unread);
        invariants::assert_chat_invariants(chat);
        Ok(appended)
    }

    /// Propose a date range. Status is left as is.
    #[instrument(skip(self))]
    pub fn propose_dates(&mut self, chat_id: ChatId, dates: DateRange) -> Result<Message> {
        let content = format!(
            "I'd like to propose these dates: {} to {}",
            short_date(dates.start()),
            short_date(dates.end())
        );
        self.append(
            chat_id,
            Message::date_proposal(Sender::CurrentUser, content, dates),
        )
    }

    /// Send a free-text message. Surrounding whitespace is trimmed.
    pub fn send_message(&mut self, chat_id: ChatId, sender: Sender, text: &str) -> Result<Message> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyMessage);
        }
        self.append(chat_id, Message::text(sender, text))
    }

    /// Append a message composed elsewhere, such as an inquiry
    pub fn append_message(&mut self, chat_id: ChatId, message: Message) -> Result<()> {
        self.append(chat_id, message).map(|_| ())
    }

    /// Reset the unread counter after the local user viewed the chat
    pub fn mark_read(&mut self, chat_id: ChatId) -> Result<()> {
        let chat = self.chat_mut(chat_id)?;
        chat.unread_count = 0;
        Ok(())
    }

    /// First chat about `listing_id` involving `user_id` (the local user by default)
    pub fn find_existing_chat(
        &self,
        listing_id: &ListingId,
        user_id: Option<&UserId>,
    ) -> Option<&Chat> {
        match user_id {
            Some(user_id) => self.registry.find_existing(listing_id, user_id),
            None => self
                .registry
                .find_existing(listing_id, &self.config.current_user_id()),
        }
    }

    /// Every chat in insertion order
    pub fn list_all_chats(&self) -> &[Chat] {
        self.registry.chats()
    }

    /// Inbox rows for `viewer` (the local user by default), latest activity first
    pub fn inbox(&self, viewer: Option<&UserId>) -> Vec<ChatListItem> {
        let current = self.config.current_user_id();
        let viewer = viewer.unwrap_or(&current);

        let mut items: Vec<ChatListItem> = self
            .registry
            .for_user(viewer)
            .map(|chat| ChatListItem::from_chat(chat, viewer))
            .collect();
        items.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
        items
    }

    /// Pretty JSON snapshot of every chat
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.registry.chats())?)
    }

    fn append(&mut self, chat_id: ChatId, message: Message) -> Result<Message> {
        let track_unread = self.config.track_unread;
        let chat = self.chat_mut(chat_id)?;
        let appended = Self::record(chat, message, track_unread);
        invariants::assert_message_order(chat);
        Ok(appended)
    }

    /// Push a message and apply the unread policy
    fn record(chat: &mut Chat, message: Message, track_unread: bool) -> Message {
        if track_unread && message.sender == Sender::Counterpart {
            chat.unread_count = chat.unread_count.saturating_add(1);
        }

        tracing::debug!(chat_id = %chat.id, kind = message.kind.label(), "Appending message");
        chat.push_message(message).clone()
    }

    fn transition_with_notice(
        &mut self,
        chat_id: ChatId,
        status: ChatStatus,
        notice: &str,
    ) -> Result<Message> {
        let track_unread = self.config.track_unread;
        let chat = self.chat_mut(chat_id)?;
        Self::apply_transition(chat, status)?;
        let appended = Self::record(chat, Message::system(notice), track_unread);
        invariants::assert_chat_invariants(chat);
        Ok(appended)
    }

    fn apply_transition(chat: &mut Chat, to: ChatStatus) -> Result<()> {
        let from = chat.status;
        if !from.can_transition_to(to) {
            tracing::warn!(chat_id = %chat.id, %from, %to, "Rejected status transition");
            return Err(Error::InvalidTransition { from, to });
        }
        invariants::assert_transition_allowed(from, to);
        chat.set_status(to);
        tracing::info!(chat_id = %chat.id, %from, %to, "Chat status changed");
        Ok(())
    }
}
