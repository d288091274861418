use crate::LoginProvider;

use std::str::FromStr;

#[test]
fn test_login_provider_round_trips_through_str() {
    for provider in [LoginProvider::Local, LoginProvider::Google] {
        assert_eq!(LoginProvider::from_str(provider.as_str()).unwrap(), provider);
    }
}

#[test]
fn test_login_provider_rejects_unknown() {
    assert!(LoginProvider::from_str("github").is_err());
}

#[test]
fn test_login_provider_default_is_local() {
    assert_eq!(LoginProvider::default(), LoginProvider::Local);
    assert!(!LoginProvider::Local.is_federated());
    assert!(LoginProvider::Google.is_federated());
}
