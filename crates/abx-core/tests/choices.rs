use abx_core::{Choice, Choices, CoreError};

#[test]
fn parses_in_declaration_order() {
    let choices: Choices = "0:|1:S|2:I|3:R".parse().unwrap();
    let codes: Vec<_> = choices.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["0", "1", "2", "3"]);
    assert_eq!(choices.label("3"), Some("R"));
    assert_eq!(choices.label("0"), Some(""));
    assert_eq!(choices.code_for("I"), Some("2"));
}

#[test]
fn empty_string_is_free_text() {
    let choices: Choices = "".parse().unwrap();
    assert!(choices.is_empty());
    assert_eq!(choices.to_string(), "");
}

#[test]
fn display_matches_persisted_format() {
    let raw = "0:|1:Y|2:N";
    let choices: Choices = raw.parse().unwrap();
    assert_eq!(choices.to_string(), raw);
}

#[test]
fn missing_separator_is_rejected() {
    let err = "0:|1S".parse::<Choices>().unwrap_err();
    assert!(matches!(err, CoreError::MalformedChoice(raw) if raw == "1S"));
}

#[test]
fn duplicate_codes_are_rejected() {
    let err = "1:S|1:R".parse::<Choices>().unwrap_err();
    assert!(matches!(err, CoreError::DuplicateChoiceCode(code) if code == "1"));
}

#[test]
fn insert_front_is_idempotent() {
    let mut choices: Choices = "0:|1:S".parse().unwrap();
    assert!(choices.insert_front(Choice::new("-1", "Not Tested")));
    assert!(!choices.insert_front(Choice::new("-1", "Not Tested")));
    assert_eq!(choices.to_string(), "-1:Not Tested|0:|1:S");
}

#[test]
fn serializes_as_string() {
    let choices: Choices = "1:Y|2:N".parse().unwrap();
    let json = serde_json::to_string(&choices).unwrap();
    assert_eq!(json, "\"1:Y|2:N\"");
    let back: Choices = serde_json::from_str(&json).unwrap();
    assert_eq!(back, choices);
}
