use rstest::rstest;

use super::*;

#[test]
fn filter_id_splits_three_fields() {
	let id = FilterId::parse("m17n:hi:inscript").expect("valid id");
	assert_eq!(id.backend, "m17n");
	assert_eq!(id.language, "hi");
	assert_eq!(id.name, "inscript");
	assert_eq!(id.key().unwrap().as_str(), "m17n:hi:inscript");
}

#[test]
fn transliterator_id_splits_two_fields() {
	let id = TransliteratorId::parse("icu:Latin-Katakana").expect("valid id");
	assert_eq!(id.backend, "icu");
	assert_eq!(id.name, "Latin-Katakana");
	assert_eq!(id.key().unwrap().backend(), "icu");
}

#[rstest]
#[case::too_few("m17n:inscript")]
#[case::too_many("m17n:hi:inscript:extra")]
#[case::empty_backend(":hi:inscript")]
#[case::empty_name("m17n:hi:")]
#[case::empty("")]
fn malformed_filter_ids_are_rejected(#[case] id: &str) {
	assert!(matches!(FilterId::parse(id), Err(TranslitError::InvalidKey(_))));
}

#[rstest]
#[case::bare("icu")]
#[case::three_fields("icu:Latin:Katakana")]
#[case::empty_name("icu:")]
fn malformed_transliterator_ids_are_rejected(#[case] id: &str) {
	assert!(matches!(
		TransliteratorId::parse(id),
		Err(TranslitError::InvalidKey(_))
	));
}

#[test]
fn delimiter_inside_field_is_rejected() {
	let err = InstanceKey::transliterator("icu", "Any:Latin").unwrap_err();
	assert!(matches!(err, TranslitError::InvalidKey(msg) if msg.contains("Any:Latin")));
}

#[test]
fn filter_and_transliterator_keys_differ_in_arity() {
	let filter = InstanceKey::filter("m17n", "hi", "inscript").unwrap();
	let trans = InstanceKey::transliterator("m17n", "hi-inscript").unwrap();
	assert_ne!(filter, trans);
	assert_eq!(filter.to_string(), "m17n:hi:inscript");
	assert_eq!(trans.to_string(), "m17n:hi-inscript");
}

#[test]
fn key_fields_are_joined_with_the_delimiter() {
	let key = InstanceKey::filter("m17n", "hi", "inscript").unwrap();
	let fields: Vec<&str> = key.as_str().split(KEY_DELIMITER).collect();
	assert_eq!(fields, ["m17n", "hi", "inscript"]);
	assert_eq!(key.backend(), "m17n");
}
