//! User and participant models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder id for the local user when no account is known
pub const CURRENT_USER_ID: &str = "currentUser";

/// Opaque user identifier, owned by the external user directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn current_user() -> Self {
        Self::new(CURRENT_USER_ID)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One side of a chat, as shown in the chat header and inbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: UserId,
    pub name: String,
    pub avatar: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Which side of the lease a participant is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    /// Listing owner
    Sublessor,
    /// Inquiring or renting party
    Sublessee,
}

impl ParticipantRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            ParticipantRole::Sublessor => "Sublessor",
            ParticipantRole::Sublessee => "Sublessee",
        }
    }
}

/// The two fixed roles of a chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participants {
    pub sublessor: Participant,
    pub sublessee: Participant,
}

impl Participants {
    /// Role of the given user in this chat, if any
    pub fn role_of(&self, user_id: &UserId) -> Option<ParticipantRole> {
        if &self.sublessor.id == user_id {
            Some(ParticipantRole::Sublessor)
        } else if &self.sublessee.id == user_id {
            Some(ParticipantRole::Sublessee)
        } else {
            None
        }
    }

    pub fn includes(&self, user_id: &UserId) -> bool {
        self.role_of(user_id).is_some()
    }

    /// The participant facing `viewer`. Non-participants see the sublessor.
    pub fn other_than(&self, viewer: &UserId) -> &Participant {
        match self.role_of(viewer) {
            Some(ParticipantRole::Sublessor) => &self.sublessee,
            _ => &self.sublessor,
        }
    }
}
