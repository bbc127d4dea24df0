//! exchange_stars and transfer_star

use crate::test_utils::*;

#[test]
fn test_exchange_when_sender_owns_one_star() {
    let t = TestNotary::new();
    t.create(t.user1(), "awesome star 1", 21);
    t.create(t.user2(), "awesome star 2", 22);

    t.notary
        .exchange_stars(&Call::new(t.user1()), StarId(21), StarId(22))
        .unwrap();

    assert_eq!(t.notary.owner_of(StarId(21)).unwrap(), t.user2());
    assert_eq!(t.notary.owner_of(StarId(22)).unwrap(), t.user1());
}

#[test]
fn test_exchange_initiated_by_second_owner() {
    let t = TestNotary::new();
    t.create(t.user1(), "awesome star 1", 21);
    t.create(t.user2(), "awesome star 2", 22);

    t.notary
        .exchange_stars(&Call::new(t.user2()), StarId(21), StarId(22))
        .unwrap();

    assert_eq!(t.notary.owner_of(StarId(21)).unwrap(), t.user2());
    assert_eq!(t.notary.owner_of(StarId(22)).unwrap(), t.user1());
}

#[test]
fn test_exchange_rejected_when_sender_owns_neither() {
    let t = TestNotary::new();
    t.create(t.user1(), "awesome star 1", 23);
    t.create(t.user1(), "awesome star 2", 24);

    assert_reverted(
        t.notary
            .exchange_stars(&Call::new(t.user2()), StarId(23), StarId(24)),
        "Sender must own star for _tokenId1 or _tokenId2!",
    );

    assert_eq!(t.notary.owner_of(StarId(23)).unwrap(), t.user1());
    assert_eq!(t.notary.owner_of(StarId(24)).unwrap(), t.user1());
}

#[test]
fn test_exchange_of_own_stars_keeps_owner_and_counts() {
    let t = TestNotary::new();
    t.create(t.user1(), "one", 25);
    t.create(t.user1(), "two", 26);

    t.notary
        .exchange_stars(&Call::new(t.user1()), StarId(25), StarId(26))
        .unwrap();

    assert_eq!(t.notary.owner_of(StarId(25)).unwrap(), t.user1());
    assert_eq!(t.notary.owner_of(StarId(26)).unwrap(), t.user1());
    assert_eq!(t.notary.balance_of(t.user1()).unwrap(), 2);
}

#[test]
fn test_exchange_star_with_itself() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "lonely", 27, STAR_PRICE);

    t.notary
        .exchange_stars(&Call::new(t.user1()), StarId(27), StarId(27))
        .unwrap();

    assert_eq!(t.notary.owner_of(StarId(27)).unwrap(), t.user1());
    assert_eq!(t.notary.balance_of(t.user1()).unwrap(), 1);
    assert_eq!(t.notary.stars_for_sale(StarId(27)).unwrap(), None);
    assert_eq!(t.notary.lookup_star_name(StarId(27)).unwrap(), "lonely");

    assert_reverted(
        t.notary
            .exchange_stars(&Call::new(t.user2()), StarId(27), StarId(27)),
        reasons::NOT_OWNER_OF_EITHER,
    );
    assert_eq!(t.notary.owner_of(StarId(27)).unwrap(), t.user1());
    assert_eq!(t.notary.balance_of(t.user2()).unwrap(), 0);
}

#[test]
fn test_exchange_with_missing_star_reverts() {
    let t = TestNotary::new();
    t.create(t.user1(), "one", 27);
    assert_reverted(
        t.notary
            .exchange_stars(&Call::new(t.user1()), StarId(27), StarId(404)),
        token::reasons::NONEXISTENT_TOKEN,
    );
}

#[test]
fn test_exchange_clears_listings() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "one", 21, STAR_PRICE);
    t.create_listed(t.user2(), "two", 22, STAR_PRICE);

    t.notary
        .exchange_stars(&Call::new(t.user1()), StarId(21), StarId(22))
        .unwrap();

    assert!(t.notary.listings().unwrap().is_empty());
}

#[test]
fn test_transfer_star_to_another_address() {
    let t = TestNotary::new();
    t.create(t.user1(), "awesome star 1", 31);

    t.notary
        .transfer_star(&Call::new(t.user1()), t.user2(), StarId(31))
        .unwrap();

    assert_eq!(t.notary.owner_of(StarId(31)).unwrap(), t.user2());
    assert_eq!(t.notary.balance_of(t.user1()).unwrap(), 0);
    assert_eq!(t.notary.balance_of(t.user2()).unwrap(), 1);
}

#[test]
fn test_transfer_rejected_when_sender_does_not_own() {
    let t = TestNotary::new();
    t.create(t.user1(), "awesome star 1", 32);

    assert_reverted(
        t.notary
            .transfer_star(&Call::new(t.user2()), t.user1(), StarId(32)),
        "Sender must own star for tokenId!",
    );
    assert_eq!(t.notary.owner_of(StarId(32)).unwrap(), t.user1());
}

#[test]
fn test_transfer_to_zero_address_reverts() {
    let t = TestNotary::new();
    t.create(t.user1(), "awesome star 1", 33);
    assert_reverted(
        t.notary
            .transfer_star(&Call::new(t.user1()), Address::ZERO, StarId(33)),
        token::reasons::TRANSFER_TO_ZERO,
    );
}

#[test]
fn test_transfer_removes_stale_listing() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "listed", 34, STAR_PRICE);

    t.notary
        .transfer_star(&Call::new(t.user1()), t.user2(), StarId(34))
        .unwrap();

    assert_eq!(t.notary.stars_for_sale(StarId(34)).unwrap(), None);
    assert_reverted(
        t.notary
            .buy_star(&Call::new(t.owner()).value(STAR_PRICE), StarId(34)),
        reasons::NOT_FOR_SALE,
    );
}

#[test]
fn test_transfer_emits_transfer_event() {
    let t = TestNotary::new();
    t.create(t.user1(), "evented", 35);

    let receipt = t
        .notary
        .transfer_star(&Call::new(t.user1()), t.user2(), StarId(35))
        .unwrap();

    let log = receipt.logs_named(token::TRANSFER_EVENT).next().unwrap();
    assert_eq!(log.address, t.notary.address());
    assert_eq!(log.field("from"), Some(&Value::Address(t.user1())));
    assert_eq!(log.field("to"), Some(&Value::Address(t.user2())));
    assert_eq!(log.field("token_id"), Some(&Value::from(35u64)));
}
