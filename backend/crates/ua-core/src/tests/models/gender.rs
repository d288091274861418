use crate::Gender;

use std::str::FromStr;

#[test]
fn test_gender_as_str() {
    assert_eq!(Gender::Male.as_str(), "male");
    assert_eq!(Gender::Female.as_str(), "female");
    assert_eq!(Gender::Other.as_str(), "other");
}

#[test]
fn test_gender_from_str() {
    assert_eq!(Gender::from_str("female").unwrap(), Gender::Female);
    assert!(Gender::from_str("").is_err());
    assert!(Gender::from_str("MALE").is_err());
}

#[test]
fn test_gender_deserializes_from_snake_case() {
    let gender: Gender = serde_json::from_str("\"other\"").unwrap();
    assert_eq!(gender, Gender::Other);
}
