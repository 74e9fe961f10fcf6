//! Listing model - the sublease unit under discussion
//!
//! Listings are owned by the external catalog. Chats only read them and
//! keep a small [`ListingSummary`] for display.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Participant, UserId};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// What kind of space is being subleased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingCategory {
    WholePlace,
    SoloRoom,
    NewRoommate,
}

impl ListingCategory {
    /// Noun used when talking about the space in a message
    pub fn noun(&self) -> &'static str {
        match self {
            ListingCategory::WholePlace => "place",
            ListingCategory::SoloRoom | ListingCategory::NewRoommate => "room",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub address: String,
}

/// Billing period for a price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Day,
    Week,
    Month,
}

impl BillingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Day => "day",
            BillingPeriod::Week => "week",
            BillingPeriod::Month => "month",
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(BillingPeriod::Day),
            "week" => Ok(BillingPeriod::Week),
            "month" => Ok(BillingPeriod::Month),
            _ => Err(Error::UnknownPeriod(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pricing {
    pub amount: Decimal,
    pub currency: String,
    pub period: BillingPeriod,
}

/// Inclusive calendar date range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights covered by the range
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = Error;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

/// A sublease listing as published in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub pricing: Pricing,
    pub availability: DateRange,
    pub category: ListingCategory,
    pub house_rules: Vec<String>,
    pub images: Vec<String>,
    pub sublessor_id: UserId,
    /// Public profile of the owner, if the catalog has one
    pub sublessor: Option<SublessorProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SublessorProfile {
    pub name: String,
    pub avatar: Option<String>,
    pub verified: bool,
}

impl Listing {
    /// Compact copy kept on the chat
    pub fn summary(&self) -> ListingSummary {
        ListingSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            image: self.images.first().cloned(),
            address: self.location.address.clone(),
        }
    }

    /// The owner as a chat participant
    pub fn owner(&self) -> Participant {
        match &self.sublessor {
            Some(profile) => Participant {
                id: self.sublessor_id.clone(),
                name: profile.name.clone(),
                avatar: profile.avatar.clone(),
            },
            None => Participant::new(self.sublessor_id.clone(), "Unknown"),
        }
    }
}

/// Listing fields a chat needs to render without the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub id: ListingId,
    pub title: String,
    pub image: Option<String>,
    pub address: String,
}
