//! Constructor and collection metadata

use crate::test_utils::*;

#[test]
fn test_constructor_sets_name() {
    let t = TestNotary::new();
    assert_eq!(t.notary.name().unwrap(), "StarNotary");
}

#[test]
fn test_constructor_sets_symbol() {
    let t = TestNotary::new();
    assert_eq!(t.notary.symbol().unwrap(), "SNT");
}

#[test]
fn test_deploy_charges_deployer() {
    init_tracing();
    let chain = std::sync::Arc::new(Chain::ephemeral().unwrap());
    let deployer = chain.accounts()[0];
    let before = chain.balance_of(deployer).unwrap();

    let (notary, receipt) = StarNotary::deploy(chain.clone(), &Call::new(deployer)).unwrap();

    assert_eq!(chain.balance_of(deployer).unwrap(), before - receipt.fee);
    assert!(receipt.fee > 0);
    assert_eq!(receipt.to, notary.address());
}

#[test]
fn test_two_deployments_are_independent() {
    let t = TestNotary::new();
    let (other, _) = StarNotary::deploy(t.chain.clone(), &Call::new(t.user1())).unwrap();
    assert_ne!(other.address(), t.notary.address());

    t.create(t.user1(), "only here", 1);
    assert_eq!(t.notary.lookup_star_name(StarId(1)).unwrap(), "only here");
    assert_eq!(other.lookup_star_name(StarId(1)).unwrap(), "");
}

#[test]
fn test_attach_to_deployed_contract() {
    let t = TestNotary::new();
    t.create(t.user1(), "awesome star", 1);

    let attached = StarNotary::at(t.chain.clone(), t.notary.address()).unwrap();
    assert_eq!(attached.owner_of(StarId(1)).unwrap(), t.user1());

    let err = StarNotary::at(t.chain.clone(), t.user2()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}
