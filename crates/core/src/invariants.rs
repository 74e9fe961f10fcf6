//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible chat states during development.
//! These checks are compiled out in release builds.

use crate::models::{Chat, ChatStatus};

/// Validate that a chat's state is internally consistent
pub fn assert_chat_invariants(chat: &Chat) {
    debug_assert!(
        chat.created_at <= chat.updated_at,
        "Chat {} updated_at {} precedes created_at {}",
        chat.id,
        chat.updated_at,
        chat.created_at
    );

    assert_message_order(chat);
}

/// Validate that message timestamps never go backwards
pub fn assert_message_order(chat: &Chat) {
    for pair in chat.messages().windows(2) {
        debug_assert!(
            pair[0].timestamp <= pair[1].timestamp,
            "Chat {} message {} is older than its predecessor {}",
            chat.id,
            pair[1].id,
            pair[0].id
        );
    }
}

/// Validate that a status write follows the transition table
pub fn assert_transition_allowed(from: ChatStatus, to: ChatStatus) {
    debug_assert!(
        from.can_transition_to(to),
        "Status write {} -> {} bypassed the transition table",
        from,
        to
    );
}
