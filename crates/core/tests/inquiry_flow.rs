//! End-to-end inquiry flow through the public API

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sublet_core::{
    AgreementStatus, AgreementTerms, BillingPeriod, ChatConfig, ChatService, ChatStatus,
    DateRange, Listing, ListingCategory, Location, MessageKind, Participant, Pricing, Sender,
    SublessorProfile,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn listing_p1() -> Listing {
    Listing {
        id: "P1".into(),
        title: "Brooklyn Brownstone - 6 Month Sublease".to_string(),
        description: "Entire floor in a classic Brooklyn brownstone.".to_string(),
        location: Location {
            city: "New York".to_string(),
            address: "Park Slope, Brooklyn".to_string(),
        },
        pricing: Pricing {
            amount: dec!(1800),
            currency: "USD".to_string(),
            period: BillingPeriod::Month,
        },
        availability: DateRange::new(date(2025, 3, 1), date(2025, 9, 1)).unwrap(),
        category: ListingCategory::WholePlace,
        house_rules: vec!["No smoking".to_string(), "Quiet hours after 10 PM".to_string()],
        images: vec!["brownstone.jpg".to_string()],
        sublessor_id: "U1".into(),
        sublessor: Some(SublessorProfile {
            name: "Mike Johnson".to_string(),
            avatar: None,
            verified: true,
        }),
    }
}

#[test]
fn test_inquiry_to_agreement() {
    let mut service = ChatService::new(ChatConfig::default());
    let listing = listing_p1();

    let chat_id = service
        .create_chat(&listing, Some(Participant::new("U2", "Jamie")))
        .unwrap()
        .id;
    assert_eq!(service.chat(chat_id).unwrap().status, ChatStatus::Pending);

    service.accept_inquiry(chat_id).unwrap();
    let chat = service.chat(chat_id).unwrap();
    assert_eq!(chat.status, ChatStatus::Active);
    assert_eq!(chat.messages().len(), 1);
    assert_eq!(chat.messages()[0].kind, MessageKind::System);

    let terms = AgreementTerms {
        dates: listing.availability,
        price: dec!(1800),
        currency: "USD".to_string(),
        period: "month".parse().unwrap(),
        house_rules: listing.house_rules.clone(),
    };
    let offer_message = service.send_agreement(chat_id, terms).unwrap();

    assert_eq!(service.chat(chat_id).unwrap().status, ChatStatus::Agreement);
    let offer = offer_message.agreement_offer().unwrap();
    assert_eq!(offer.terms.price, dec!(1800));
    assert_eq!(offer.status, AgreementStatus::Pending);
}

#[test]
fn test_full_stay_lifecycle() {
    let mut service = ChatService::new(ChatConfig::default());
    let listing = listing_p1();

    let (chat_id, created) = service.open_inquiry(&listing, None, None).unwrap();
    assert!(created);
    assert_eq!(service.chat(chat_id).unwrap().messages()[0].sender, Sender::CurrentUser);

    service.accept_inquiry(chat_id).unwrap();
    service
        .send_message(chat_id, Sender::Counterpart, "Happy to host you!")
        .unwrap();
    service.set_chat_status(chat_id, ChatStatus::Negotiating).unwrap();
    service
        .propose_dates(
            chat_id,
            DateRange::new(date(2025, 4, 1), date(2025, 8, 1)).unwrap(),
        )
        .unwrap();
    assert_eq!(service.chat(chat_id).unwrap().status, ChatStatus::Negotiating);

    for status in [ChatStatus::Confirmed, ChatStatus::Ongoing, ChatStatus::Completed] {
        let result = service.set_chat_status(chat_id, status);
        if status == ChatStatus::Confirmed {
            // Confirmation needs an agreement on the table first
            assert!(result.is_err());
            service
                .send_agreement(
                    chat_id,
                    AgreementTerms {
                        dates: DateRange::new(date(2025, 4, 1), date(2025, 8, 1)).unwrap(),
                        price: dec!(1750),
                        currency: "USD".to_string(),
                        period: BillingPeriod::Month,
                        house_rules: vec![],
                    },
                )
                .unwrap();
            let offer = service.chat(chat_id).unwrap().last_message().unwrap();
            assert_eq!(offer.sender, Sender::Counterpart);
            assert_eq!(service.chat(chat_id).unwrap().unread_count, 2);
            service.mark_read(chat_id).unwrap();
            service.set_chat_status(chat_id, status).unwrap();
        } else {
            result.unwrap();
        }
    }

    let chat = service.chat(chat_id).unwrap();
    assert_eq!(chat.status, ChatStatus::Completed);
    assert!(chat.created_at <= chat.updated_at);
    assert!(chat
        .messages()
        .windows(2)
        .all(|w| w[0].timestamp <= w[1].timestamp));
    assert!(service.set_chat_status(chat_id, ChatStatus::Cancelled).is_err());

    let inbox = service.inbox(None);
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].other_name, "Mike Johnson");
    assert_eq!(inbox[0].status, ChatStatus::Completed);
}
