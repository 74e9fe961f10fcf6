//! Message model for listing chats

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BillingPeriod, DateRange};

/// Time-ordered message identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a message, relative to the local user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sender {
    CurrentUser,
    Counterpart,
    System,
}

/// Lease terms offered by the sublessor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementTerms {
    pub dates: DateRange,
    pub price: Decimal,
    pub currency: String,
    pub period: BillingPeriod,
    pub house_rules: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgreementStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementOffer {
    pub terms: AgreementTerms,
    pub status: AgreementStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Declined,
    Counter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateProposal {
    pub dates: DateRange,
    pub status: ProposalStatus,
}

/// Message variant with its payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MessageKind {
    Text,
    System,
    Agreement(AgreementOffer),
    DateProposal(DateProposal),
}

impl MessageKind {
    pub fn label(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::System => "system",
            MessageKind::Agreement(_) => "agreement",
            MessageKind::DateProposal(_) => "date-proposal",
        }
    }
}

/// One chat event. Immutable once appended to a chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub content: String,
    /// Creation time. Appending clamps it up to the previous message's
    /// timestamp so a chat's history never goes backwards.
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
}

impl Message {
    fn with_kind(sender: Sender, content: String, kind: MessageKind) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            content,
            timestamp: Utc::now(),
            kind,
        }
    }

    pub fn text(sender: Sender, content: impl Into<String>) -> Self {
        Self::with_kind(sender, content.into(), MessageKind::Text)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_kind(Sender::System, content.into(), MessageKind::System)
    }

    /// A fresh offer, always starting out pending
    pub fn agreement(sender: Sender, content: impl Into<String>, terms: AgreementTerms) -> Self {
        Self::with_kind(
            sender,
            content.into(),
            MessageKind::Agreement(AgreementOffer {
                terms,
                status: AgreementStatus::Pending,
            }),
        )
    }

    pub fn date_proposal(sender: Sender, content: impl Into<String>, dates: DateRange) -> Self {
        Self::with_kind(
            sender,
            content.into(),
            MessageKind::DateProposal(DateProposal {
                dates,
                status: ProposalStatus::Pending,
            }),
        )
    }

    pub fn agreement_offer(&self) -> Option<&AgreementOffer> {
        match &self.kind {
            MessageKind::Agreement(offer) => Some(offer),
            _ => None,
        }
    }

    pub fn date_proposal_data(&self) -> Option<&DateProposal> {
        match &self.kind {
            MessageKind::DateProposal(proposal) => Some(proposal),
            _ => None,
        }
    }

    pub fn is_system(&self) -> bool {
        self.sender == Sender::System
    }

    pub fn format_timestamp(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_system_message() {
        let msg = Message::system("Inquiry accepted.");
        assert!(msg.is_system());
        assert_eq!(msg.kind, MessageKind::System);
        assert!(msg.agreement_offer().is_none());
    }

    #[test]
    fn test_agreement_starts_pending() {
        let terms = AgreementTerms {
            dates: range(),
            price: dec!(1800),
            currency: "USD".to_string(),
            period: BillingPeriod::Month,
            house_rules: vec![],
        };
        let msg = Message::agreement(Sender::CurrentUser, "Here are the terms", terms);
        let offer = msg.agreement_offer().unwrap();
        assert_eq!(offer.status, AgreementStatus::Pending);
        assert_eq!(offer.terms.price, dec!(1800));
        assert_eq!(msg.kind.label(), "agreement");
    }

    #[test]
    fn test_date_proposal_starts_pending() {
        let msg = Message::date_proposal(Sender::CurrentUser, "How about these?", range());
        let proposal = msg.date_proposal_data().unwrap();
        assert_eq!(proposal.status, ProposalStatus::Pending);
        assert_eq!(proposal.dates, range());
    }

    #[test]
    fn test_kind_serializes_with_type_tag() {
        let msg = Message::date_proposal(Sender::Counterpart, "dates", range());
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["kind"]["type"], "date-proposal");
        assert_eq!(json["kind"]["status"], "pending");
        assert_eq!(json["sender"], "counterpart");
    }
}
