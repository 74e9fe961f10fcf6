//! Scripted inquiry walkthrough over the sample catalog
//!
//! Plays both sides of each chat the way the chat screen would: the local
//! user opens inquiries, owners accept or decline, and the counterpart
//! answers with a canned reply.

use rand::seq::SliceRandom;
use rand::Rng;
use sublet_core::{
    format, AgreementTerms, ChatId, ChatListItem, ChatStatus, DateRange, Listing, Result, Sender,
};

use crate::state::AppState;

const CANNED_REPLIES: &[&str] = &[
    "Thanks for your message!",
    "I'll get back to you shortly.",
    "Sounds good!",
    "Let me check on that.",
];

/// How each sample chat should play out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Confirmed,
    Negotiating,
    Declined,
}

fn outcome_for(index: usize) -> Outcome {
    match index % 3 {
        0 => Outcome::Confirmed,
        1 => Outcome::Negotiating,
        _ => Outcome::Declined,
    }
}

fn counterpart_reply<R: Rng>(rng: &mut R) -> &'static str {
    CANNED_REPLIES.choose(rng).copied().unwrap_or("Sounds good!")
}

/// Run the walkthrough and return the chats it created
pub fn run<R: Rng>(state: &mut AppState, rng: &mut R) -> Result<Vec<ChatId>> {
    let listings: Vec<Listing> = state.listings.clone();
    let mut chats = Vec::with_capacity(listings.len());

    for (index, listing) in listings.iter().enumerate() {
        let custom = (index == 0).then_some("Hi! Is the apartment furnished?");
        let (chat_id, _) = state.service.open_inquiry(listing, None, custom)?;

        match outcome_for(index) {
            Outcome::Declined => {
                state.service.decline_inquiry(chat_id)?;
            }
            Outcome::Negotiating => {
                state.service.accept_inquiry(chat_id)?;
                state
                    .service
                    .send_message(chat_id, Sender::Counterpart, counterpart_reply(rng))?;
                state.service.set_chat_status(chat_id, ChatStatus::Negotiating)?;
                state.service.propose_dates(chat_id, listing.availability)?;
            }
            Outcome::Confirmed => {
                state.service.accept_inquiry(chat_id)?;
                state
                    .service
                    .send_message(chat_id, Sender::Counterpart, counterpart_reply(rng))?;

                let start = listing.availability.start();
                let end = listing.availability.end();
                let shortened = DateRange::new(start, end.pred_opt().unwrap_or(end).max(start))?;
                state.service.propose_dates(chat_id, shortened)?;

                let terms = AgreementTerms {
                    dates: shortened,
                    price: listing.pricing.amount,
                    currency: listing.pricing.currency.clone(),
                    period: listing.pricing.period,
                    house_rules: listing.house_rules.clone(),
                };
                state.service.send_agreement(chat_id, terms)?;
                state.service.set_chat_status(chat_id, ChatStatus::Confirmed)?;
                state.service.mark_read(chat_id)?;
            }
        }

        tracing::info!(
            chat_id = %chat_id,
            status = %state.service.chat(chat_id)?.status,
            "Walkthrough chat settled"
        );
        chats.push(chat_id);
    }

    Ok(chats)
}

/// One printable inbox line
pub fn inbox_line(item: &ChatListItem, now: chrono::DateTime<chrono::Utc>) -> String {
    let unread = if item.unread_count > 0 {
        format!(" [{} unread]", item.unread_count)
    } else {
        String::new()
    };

    format!(
        "{:<12} {} with {}: \"{}\" ({}){}",
        item.status.display_name(),
        item.listing_title,
        item.other_name,
        item.last_message,
        format::inbox_time(item.last_message_time, now),
        unread
    )
}
