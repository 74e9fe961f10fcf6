//! Hardcoded sample listings

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sublet_core::{
    BillingPeriod, DateRange, Listing, ListingCategory, Location, Pricing, SublessorProfile,
};

struct Seed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    city: &'static str,
    address: &'static str,
    price: i64,
    available: ((i32, u32, u32), (i32, u32, u32)),
    category: ListingCategory,
    house_rules: &'static [&'static str],
    images: &'static [&'static str],
    owner_id: &'static str,
    owner_name: &'static str,
    owner_avatar: &'static str,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        title: "Luxury Polanco Apartment - 3 Month Sublease",
        description: "Beautiful modern apartment in the heart of Polanco. Perfect for \
                      professionals or couples.",
        city: "Mexico City",
        address: "Polanco, CDMX",
        price: 2500,
        available: ((2025, 2, 1), (2025, 5, 1)),
        category: ListingCategory::WholePlace,
        house_rules: &[
            "No smoking inside",
            "No parties or events",
            "Quiet hours after 10 PM",
            "Keep common areas clean",
            "Water plants twice a week",
        ],
        images: &[
            "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=400",
            "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?w=400",
        ],
        owner_id: "user1",
        owner_name: "Carlos Martinez",
        owner_avatar: "https://randomuser.me/api/portraits/men/32.jpg",
    },
    Seed {
        id: "2",
        title: "Room in Venice Beach House - Summer Sublease",
        description: "Private room in a shared beach house. Looking for a clean, responsible \
                      roommate for the summer months.",
        city: "Los Angeles",
        address: "Venice Beach, CA",
        price: 1200,
        available: ((2025, 6, 1), (2025, 9, 1)),
        category: ListingCategory::SoloRoom,
        house_rules: &[
            "Clean up after yourself",
            "No overnight guests more than 2 nights/week",
            "Share cleaning duties",
            "Respect quiet hours",
            "No pets",
        ],
        images: &[
            "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=400",
            "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=400",
        ],
        owner_id: "user2",
        owner_name: "Sarah Chen",
        owner_avatar: "https://randomuser.me/api/portraits/women/44.jpg",
    },
    Seed {
        id: "3",
        title: "Brooklyn Brownstone - 6 Month Sublease",
        description: "Entire floor in a classic Brooklyn brownstone. Moving abroad for a work \
                      assignment.",
        city: "New York",
        address: "Park Slope, Brooklyn",
        price: 3200,
        available: ((2025, 3, 1), (2025, 9, 1)),
        category: ListingCategory::WholePlace,
        house_rules: &["No smoking", "No pets", "Keep the garden tidy"],
        images: &["https://images.unsplash.com/photo-1493809842364-78817add7ffb?w=400"],
        owner_id: "user3",
        owner_name: "Mike Johnson",
        owner_avatar: "https://randomuser.me/api/portraits/men/45.jpg",
    },
];

fn date((y, m, d): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

impl Seed {
    fn to_listing(&self) -> Option<Listing> {
        let availability = DateRange::new(date(self.available.0)?, date(self.available.1)?).ok()?;

        Some(Listing {
            id: self.id.into(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            location: Location {
                city: self.city.to_string(),
                address: self.address.to_string(),
            },
            pricing: Pricing {
                amount: Decimal::from(self.price),
                currency: "USD".to_string(),
                period: BillingPeriod::Month,
            },
            availability,
            category: self.category,
            house_rules: self.house_rules.iter().map(|r| r.to_string()).collect(),
            images: self.images.iter().map(|i| i.to_string()).collect(),
            sublessor_id: self.owner_id.into(),
            sublessor: Some(SublessorProfile {
                name: self.owner_name.to_string(),
                avatar: Some(self.owner_avatar.to_string()),
                verified: true,
            }),
        })
    }
}

/// The sample catalog. Seeds with malformed dates are skipped.
pub fn listings() -> Vec<Listing> {
    SEEDS
        .iter()
        .filter_map(|seed| {
            let listing = seed.to_listing();
            if listing.is_none() {
                tracing::warn!(listing_id = seed.id, "Skipping malformed sample listing");
            }
            listing
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_seeds_load() {
        let listings = listings();
        assert_eq!(listings.len(), SEEDS.len());
        assert_eq!(listings[1].category, ListingCategory::SoloRoom);
        assert_eq!(listings[0].owner().name, "Carlos Martinez");
    }
}
