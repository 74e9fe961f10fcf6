//! Chat model - one conversation about one listing

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ListingId, ListingSummary, Message, Participants, Sender, UserId};

/// Registry-allocated chat identifier. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub u64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatStatus {
    /// Inquiry sent, waiting on the sublessor
    Pending,
    Active,
    Negotiating,
    /// Agreement offer on the table
    Agreement,
    Confirmed,
    /// Stay in progress
    Ongoing,
    Completed,
    Cancelled,
    Declined,
}

impl ChatStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            ChatStatus::Pending => "Pending",
            ChatStatus::Active => "Active",
            ChatStatus::Negotiating => "Negotiating",
            ChatStatus::Agreement => "Agreement",
            ChatStatus::Confirmed => "Confirmed",
            ChatStatus::Ongoing => "Ongoing",
            ChatStatus::Completed => "Completed",
            ChatStatus::Cancelled => "Cancelled",
            ChatStatus::Declined => "Declined",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ChatStatus::Completed | ChatStatus::Cancelled | ChatStatus::Declined
        )
    }

    /// Whether an agreement offer may be sent from this state
    pub fn accepts_agreement(&self) -> bool {
        matches!(
            self,
            ChatStatus::Pending
                | ChatStatus::Active
                | ChatStatus::Negotiating
                | ChatStatus::Agreement
        )
    }

    /// Transition table. Terminal states have no outgoing edges.
    pub fn can_transition_to(&self, next: ChatStatus) -> bool {
        use ChatStatus::*;

        if next == Agreement {
            return self.accepts_agreement();
        }

        match self {
            Pending => matches!(next, Active | Declined | Cancelled),
            Active => matches!(next, Negotiating | Cancelled),
            Negotiating => matches!(next, Cancelled),
            Agreement => matches!(next, Negotiating | Confirmed | Cancelled),
            Confirmed => matches!(next, Ongoing | Cancelled),
            Ongoing => matches!(next, Completed | Cancelled),
            Completed | Cancelled | Declined => false,
        }
    }

    pub fn all() -> &'static [ChatStatus] {
        &[
            ChatStatus::Pending,
            ChatStatus::Active,
            ChatStatus::Negotiating,
            ChatStatus::Agreement,
            ChatStatus::Confirmed,
            ChatStatus::Ongoing,
            ChatStatus::Completed,
            ChatStatus::Cancelled,
            ChatStatus::Declined,
        ]
    }
}

impl fmt::Display for ChatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A conversation between a sublessor and a sublessee about one listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub listing: ListingSummary,
    pub participants: Participants,
    pub status: ChatStatus,
    messages: Vec<Message>,
    pub unread_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    pub fn new(id: ChatId, listing: ListingSummary, participants: Participants) -> Self {
        let now = Utc::now();
        Self {
            id,
            listing,
            participants,
            status: ChatStatus::Pending,
            messages: Vec::new(),
            unread_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn listing_id(&self) -> &ListingId {
        &self.listing.id
    }

    /// Message history, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Time of the latest activity, used for inbox ordering
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_message()
            .map(|m| m.timestamp.max(self.updated_at))
            .unwrap_or(self.updated_at)
    }

    pub fn involves(&self, user_id: &UserId) -> bool {
        self.participants.includes(user_id)
    }

    /// Append a message, raising its timestamp to the previous message's
    /// if it is older. The message is not touched after this.
    pub(crate) fn push_message(&mut self, mut message: Message) -> &Message {
        if let Some(last) = self.messages.last() {
            if message.timestamp < last.timestamp {
                message.timestamp = last.timestamp;
            }
        }
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Write a new status and bump `updated_at`. Table checks happen in the service.
    pub(crate) fn set_status(&mut self, status: ChatStatus) {
        self.status = status;
        self.updated_at = Utc::now().max(self.created_at);
    }
}

/// Inbox row for a chat, seen from one participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatListItem {
    pub id: ChatId,
    pub listing_title: String,
    pub listing_image: Option<String>,
    pub other_name: String,
    pub other_avatar: Option<String>,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub last_message_sender: Option<Sender>,
    pub unread_count: u32,
    pub status: ChatStatus,
}

impl ChatListItem {
    pub fn from_chat(chat: &Chat, viewer: &UserId) -> Self {
        let other = chat.participants.other_than(viewer);
        let last = chat.last_message();
        Self {
            id: chat.id,
            listing_title: chat.listing.title.clone(),
            listing_image: chat.listing.image.clone(),
            other_name: other.name.clone(),
            other_avatar: other.avatar.clone(),
            last_message: last.map(|m| m.content.clone()).unwrap_or_default(),
            last_message_time: chat.last_activity(),
            last_message_sender: last.map(|m| m.sender),
            unread_count: chat.unread_count,
            status: chat.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;
    use chrono::Duration;

    fn make_chat() -> Chat {
        Chat::new(
            ChatId(1),
            ListingSummary {
                id: "P1".into(),
                title: "Modern Studio".to_string(),
                image: None,
                address: "Downtown".to_string(),
            },
            Participants {
                sublessor: Participant::new("U1", "Sarah Chen"),
                sublessee: Participant::new("U2", "You"),
            },
        )
    }

    #[test]
    fn test_new_chat_defaults() {
        let chat = make_chat();
        assert_eq!(chat.status, ChatStatus::Pending);
        assert!(chat.messages().is_empty());
        assert_eq!(chat.unread_count, 0);
        assert_eq!(chat.created_at, chat.updated_at);
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for from in ChatStatus::all().iter().filter(|s| s.is_terminal()) {
            for to in ChatStatus::all() {
                assert!(!from.can_transition_to(*to), "{from} -> {to} should be rejected");
            }
        }
    }

    #[test]
    fn test_inquiry_transitions() {
        assert!(ChatStatus::Pending.can_transition_to(ChatStatus::Active));
        assert!(ChatStatus::Pending.can_transition_to(ChatStatus::Declined));
        assert!(!ChatStatus::Active.can_transition_to(ChatStatus::Declined));
        assert!(!ChatStatus::Active.can_transition_to(ChatStatus::Active));
    }

    #[test]
    fn test_agreement_reachable_before_confirmation() {
        assert!(ChatStatus::Active.can_transition_to(ChatStatus::Agreement));
        assert!(ChatStatus::Negotiating.can_transition_to(ChatStatus::Agreement));
        assert!(ChatStatus::Agreement.can_transition_to(ChatStatus::Agreement));
        assert!(!ChatStatus::Confirmed.can_transition_to(ChatStatus::Agreement));
        assert!(!ChatStatus::Ongoing.can_transition_to(ChatStatus::Agreement));
    }

    #[test]
    fn test_push_message_clamps_timestamp() {
        let mut chat = make_chat();
        let first = Message::text(Sender::CurrentUser, "hi");
        let first_ts = first.timestamp;
        chat.push_message(first);

        let mut late = Message::text(Sender::Counterpart, "hello");
        late.timestamp = first_ts - Duration::minutes(5);
        chat.push_message(late);

        let messages = chat.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].timestamp, first_ts);
    }

    #[test]
    fn test_list_item_from_sublessor_view() {
        let mut chat = make_chat();
        chat.push_message(Message::text(Sender::Counterpart, "Is it still available?"));
        chat.unread_count = 1;

        let item = ChatListItem::from_chat(&chat, &"U1".into());
        assert_eq!(item.other_name, "You");
        assert_eq!(item.last_message, "Is it still available?");
        assert_eq!(item.unread_count, 1);
        assert_eq!(item.status, ChatStatus::Pending);
    }
}
