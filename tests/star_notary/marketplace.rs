//! put_star_up_for_sale and buy_star

use crate::test_utils::*;

#[test]
fn test_listed_price_is_visible() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "awesome star", 2, STAR_PRICE);
    assert_eq!(t.notary.stars_for_sale(StarId(2)).unwrap(), Some(STAR_PRICE));
}

#[test]
fn test_only_owner_can_list() {
    let t = TestNotary::new();
    t.create(t.user1(), "awesome star", 2);
    assert_reverted(
        t.notary
            .put_star_up_for_sale(&Call::new(t.user2()), StarId(2), STAR_PRICE),
        reasons::NOT_OWNER_FOR_SALE,
    );
    assert_reverted(
        t.notary
            .put_star_up_for_sale(&Call::new(t.user2()), StarId(99), STAR_PRICE),
        reasons::NOT_OWNER_FOR_SALE,
    );
    assert_eq!(t.notary.stars_for_sale(StarId(2)).unwrap(), None);
}

#[test]
fn test_seller_receives_exactly_the_price() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "awesome star", 3, STAR_PRICE);
    let seller_before = t.balance(t.user1());

    t.notary
        .buy_star(&Call::new(t.user2()).value(5 * STAR_PRICE), StarId(3))
        .unwrap();

    assert_eq!(t.balance(t.user1()), seller_before + STAR_PRICE);
}

#[test]
fn test_buyer_becomes_owner_and_listing_is_removed() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "awesome star", 4, STAR_PRICE);

    t.notary
        .buy_star(&Call::new(t.user2()).value(STAR_PRICE), StarId(4))
        .unwrap();

    assert_eq!(t.notary.owner_of(StarId(4)).unwrap(), t.user2());
    assert_eq!(t.notary.stars_for_sale(StarId(4)).unwrap(), None);
    assert!(t.notary.listings().unwrap().is_empty());
    assert_eq!(t.notary.balance_of(t.user1()).unwrap(), 0);
    assert_eq!(t.notary.balance_of(t.user2()).unwrap(), 1);
}

#[test]
fn test_buyer_pays_price_plus_gas() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "awesome star", 5, STAR_PRICE);
    let buyer_before = t.balance(t.user2());
    let max_fee = 300 * units::GWEI;

    let receipt = t
        .notary
        .buy_star(
            &Call::new(t.user2())
                .value(STAR_PRICE)
                .max_fee_per_gas(max_fee),
            StarId(5),
        )
        .unwrap();

    let spent = buyer_before - t.balance(t.user2());
    assert_eq!(spent, STAR_PRICE + receipt.fee);
    assert!(spent > STAR_PRICE - 1);
    assert!(spent < STAR_PRICE + receipt.gas_limit as Wei * max_fee);
}

#[test]
fn test_overpayment_is_refunded() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "awesome star", 3, STAR_PRICE);
    let buyer_before = t.balance(t.user2());

    let receipt = t
        .notary
        .buy_star(&Call::new(t.user2()).value(5 * STAR_PRICE), StarId(3))
        .unwrap();

    assert_eq!(t.balance(t.user2()), buyer_before - STAR_PRICE - receipt.fee);
    assert_eq!(t.balance(t.notary.address()), 0, "contract keeps nothing");
}

#[test]
fn test_underpayment_reverts() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "awesome star", 3, STAR_PRICE);
    let buyer_before = t.balance(t.user2());

    let receipt = assert_reverted(
        t.notary
            .buy_star(&Call::new(t.user2()).value(STAR_PRICE - 1), StarId(3)),
        reasons::INSUFFICIENT_VALUE,
    );

    assert_eq!(t.balance(t.user2()), buyer_before - receipt.fee);
    assert_eq!(t.notary.owner_of(StarId(3)).unwrap(), t.user1());
    assert_eq!(t.notary.stars_for_sale(StarId(3)).unwrap(), Some(STAR_PRICE));
}

#[test]
fn test_buying_unlisted_star_reverts() {
    let t = TestNotary::new();
    t.create(t.user1(), "awesome star", 3);
    assert_reverted(
        t.notary
            .buy_star(&Call::new(t.user2()).value(STAR_PRICE), StarId(3)),
        reasons::NOT_FOR_SALE,
    );
    assert_reverted(
        t.notary
            .buy_star(&Call::new(t.user2()).value(STAR_PRICE), StarId(404)),
        reasons::NOT_FOR_SALE,
    );
}

#[test]
fn test_zero_price_listing_can_be_bought_for_free() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "free star", 11, 0);
    assert_eq!(t.notary.stars_for_sale(StarId(11)).unwrap(), Some(0));

    t.notary.buy_star(&Call::new(t.user2()), StarId(11)).unwrap();
    assert_eq!(t.notary.owner_of(StarId(11)).unwrap(), t.user2());
}

#[test]
fn test_sale_emits_sold_event() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "awesome star", 3, STAR_PRICE);

    let receipt = t
        .notary
        .buy_star(&Call::new(t.user2()).value(STAR_PRICE), StarId(3))
        .unwrap();

    let sold = receipt
        .logs_named(starnotary::star_notary::STAR_SOLD_EVENT)
        .next()
        .unwrap();
    assert_eq!(sold.field("seller"), Some(&Value::Address(t.user1())));
    assert_eq!(sold.field("buyer"), Some(&Value::Address(t.user2())));
    assert_eq!(sold.field("price"), Some(&Value::Uint(STAR_PRICE)));
}

#[test]
fn test_listings_are_in_id_order() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "c", 30, 3 * STAR_PRICE);
    t.create_listed(t.user2(), "a", 10, STAR_PRICE);
    t.create_listed(t.user1(), "b", 20, 2 * STAR_PRICE);

    assert_eq!(
        t.notary.listings().unwrap(),
        vec![
            (StarId(10), STAR_PRICE),
            (StarId(20), 2 * STAR_PRICE),
            (StarId(30), 3 * STAR_PRICE),
        ]
    );
}
