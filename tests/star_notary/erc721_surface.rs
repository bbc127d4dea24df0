//! Standard token surface: counts, approvals, operators, transfer_from

use crate::test_utils::*;

#[test]
fn test_balance_of_tracks_ownership() {
    let t = TestNotary::new();
    assert_eq!(t.notary.balance_of(t.user1()).unwrap(), 0);

    t.create(t.user1(), "a", 1);
    t.create(t.user1(), "b", 2);
    assert_eq!(t.notary.balance_of(t.user1()).unwrap(), 2);

    t.notary
        .transfer_star(&Call::new(t.user1()), t.user2(), StarId(1))
        .unwrap();
    assert_eq!(t.notary.balance_of(t.user1()).unwrap(), 1);
    assert_eq!(t.notary.balance_of(t.user2()).unwrap(), 1);
}

#[test]
fn test_balance_of_zero_address_is_invalid() {
    let t = TestNotary::new();
    let err = t.notary.balance_of(Address::ZERO).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_approved_account_can_transfer_from() {
    let t = TestNotary::new();
    t.create(t.user1(), "a", 1);
    t.notary
        .approve(&Call::new(t.user1()), t.user2(), StarId(1))
        .unwrap();
    assert_eq!(t.notary.get_approved(StarId(1)).unwrap(), Some(t.user2()));

    t.notary
        .transfer_from(&Call::new(t.user2()), t.user1(), t.owner(), StarId(1))
        .unwrap();

    assert_eq!(t.notary.owner_of(StarId(1)).unwrap(), t.owner());
    assert_eq!(
        t.notary.get_approved(StarId(1)).unwrap(),
        None,
        "approval is cleared on transfer"
    );
}

#[test]
fn test_unapproved_transfer_from_reverts() {
    let t = TestNotary::new();
    t.create(t.user1(), "a", 1);
    assert_reverted(
        t.notary
            .transfer_from(&Call::new(t.user2()), t.user1(), t.user2(), StarId(1)),
        token::reasons::TRANSFER_NOT_APPROVED,
    );
}

#[test]
fn test_transfer_from_wrong_owner_reverts() {
    let t = TestNotary::new();
    t.create(t.user1(), "a", 1);
    assert_reverted(
        t.notary
            .transfer_from(&Call::new(t.user1()), t.user2(), t.owner(), StarId(1)),
        token::reasons::TRANSFER_NOT_OWN,
    );
}

#[test]
fn test_operator_can_approve_and_transfer() {
    let t = TestNotary::new();
    t.create(t.user1(), "a", 1);
    t.notary
        .set_approval_for_all(&Call::new(t.user1()), t.user2(), true)
        .unwrap();
    assert!(t
        .notary
        .is_approved_for_all(t.user1(), t.user2())
        .unwrap());

    t.notary
        .approve(&Call::new(t.user2()), t.owner(), StarId(1))
        .unwrap();
    assert_eq!(t.notary.get_approved(StarId(1)).unwrap(), Some(t.owner()));

    t.notary
        .transfer_from(&Call::new(t.user2()), t.user1(), t.user2(), StarId(1))
        .unwrap();
    assert_eq!(t.notary.owner_of(StarId(1)).unwrap(), t.user2());
}

#[test]
fn test_revoked_operator_loses_access() {
    let t = TestNotary::new();
    t.create(t.user1(), "a", 1);
    let call = Call::new(t.user1());
    t.notary.set_approval_for_all(&call, t.user2(), true).unwrap();
    t.notary.set_approval_for_all(&call, t.user2(), false).unwrap();

    assert!(!t
        .notary
        .is_approved_for_all(t.user1(), t.user2())
        .unwrap());
    assert_reverted(
        t.notary
            .transfer_from(&Call::new(t.user2()), t.user1(), t.user2(), StarId(1)),
        token::reasons::TRANSFER_NOT_APPROVED,
    );
}

#[test]
fn test_approval_rules() {
    let t = TestNotary::new();
    t.create(t.user1(), "a", 1);

    assert_reverted(
        t.notary
            .approve(&Call::new(t.user1()), t.user1(), StarId(1)),
        token::reasons::APPROVAL_TO_OWNER,
    );
    assert_reverted(
        t.notary
            .approve(&Call::new(t.user2()), t.user2(), StarId(1)),
        token::reasons::APPROVE_NOT_AUTHORIZED,
    );
    assert_reverted(
        t.notary
            .set_approval_for_all(&Call::new(t.user1()), t.user1(), true),
        token::reasons::APPROVE_TO_CALLER,
    );
}

#[test]
fn test_approve_zero_clears_approval() {
    let t = TestNotary::new();
    t.create(t.user1(), "a", 1);
    let call = Call::new(t.user1());
    t.notary.approve(&call, t.user2(), StarId(1)).unwrap();
    t.notary.approve(&call, Address::ZERO, StarId(1)).unwrap();
    assert_eq!(t.notary.get_approved(StarId(1)).unwrap(), None);
}

#[test]
fn test_get_approved_of_missing_star_is_not_found() {
    let t = TestNotary::new();
    let err = t.notary.get_approved(StarId(404)).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_transfer_from_clears_listing() {
    let t = TestNotary::new();
    t.create_listed(t.user1(), "a", 1, STAR_PRICE);
    t.notary
        .approve(&Call::new(t.user1()), t.user2(), StarId(1))
        .unwrap();

    t.notary
        .transfer_from(&Call::new(t.user2()), t.user1(), t.user2(), StarId(1))
        .unwrap();

    assert_eq!(t.notary.stars_for_sale(StarId(1)).unwrap(), None);
}
