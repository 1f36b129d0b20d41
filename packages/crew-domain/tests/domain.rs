use crew_domain::{PatternSignalExtractor, QuerySignalExtractor, QuerySignals};

#[test]
fn extracts_all_signals_from_multi_criteria_query() {
	let signals = PatternSignalExtractor.extract("5 years chief stewardess barcelona");

	assert_eq!(
		signals,
		QuerySignals {
			requested_years: Some(5),
			locations: vec!["barcelona".to_string()],
			wants_availability: false,
			tokens: vec![
				"years".to_string(),
				"chief".to_string(),
				"stewardess".to_string(),
				"barcelona".to_string(),
			],
		}
	);
}

#[test]
fn plain_role_query_has_no_soft_signals() {
	let signals = PatternSignalExtractor.extract("butler");

	assert_eq!(signals.requested_years, None);
	assert!(signals.locations.is_empty());
	assert!(!signals.wants_availability);
	assert_eq!(signals.tokens, vec!["butler".to_string()]);
}

#[test]
fn availability_and_location_read_from_one_query() {
	let signals = PatternSignalExtractor.extract("deckhand available now in antibes");

	assert!(signals.wants_availability);
	assert_eq!(signals.locations, vec!["antibes".to_string()]);
	assert_eq!(signals.requested_years, None);
}
