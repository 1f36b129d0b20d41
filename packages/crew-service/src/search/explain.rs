use crew_domain::{
	QuerySignals,
	tokens::{contains_phrase, has_overlap},
};
use crew_storage::models::CandidateRecord;

const STRONG_MATCH: f32 = 0.7;
const GOOD_MATCH: f32 = 0.4;
const PARTIAL_MATCH: f32 = 0.25;
const SUMMARY_CRITERIA: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
	High,
	Medium,
	Low,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchExplanation {
	pub summary: String,
	pub matched_criteria: Vec<String>,
	pub missing_criteria: Vec<String>,
	pub confidence: Confidence,
}

/// Explains why `record` surfaced for `query`. Pure: no I/O, same inputs give the same output.
///
/// `relevance` is the reranker score when reranking ran, otherwise the retrieval score.
/// `related_role_min` is the relevance above which a lexically different position is still
/// reported as a related role.
pub fn explain_match(
	query: &str,
	signals: &QuerySignals,
	record: &CandidateRecord,
	relevance: f32,
	related_role_min: f32,
) -> MatchExplanation {
	let mut matched = Vec::new();
	let mut missing = Vec::new();

	explain_position(signals, record, relevance, related_role_min, &mut matched);
	explain_experience(signals, record, &mut matched, &mut missing);
	explain_location(signals, record, &mut matched, &mut missing);
	explain_availability(signals, record, &mut matched, &mut missing);
	explain_nationality(query, record, &mut matched);

	let (confidence, label) = confidence_tier(relevance);
	let summary = if matched.is_empty() {
		label.to_string()
	} else {
		format!(
			"{label}: {}",
			matched.iter().take(SUMMARY_CRITERIA).map(String::as_str).collect::<Vec<_>>().join(", ")
		)
	};

	MatchExplanation { summary, matched_criteria: matched, missing_criteria: missing, confidence }
}

fn explain_position(
	signals: &QuerySignals,
	record: &CandidateRecord,
	relevance: f32,
	related_role_min: f32,
	matched: &mut Vec<String>,
) {
	let Some(position) = present(record.primary_position.as_deref()) else {
		return;
	};

	if has_overlap(&signals.tokens, position) {
		matched.push(format!("Position: {position}"));
	} else if relevance >= related_role_min {
		matched.push(format!("Related role: {position}"));
	}
}

fn explain_experience(
	signals: &QuerySignals,
	record: &CandidateRecord,
	matched: &mut Vec<String>,
	missing: &mut Vec<String>,
) {
	match (signals.requested_years, record.years_experience) {
		(Some(requested), Some(years)) if i64::from(years) >= i64::from(requested) =>
			matched.push(format!("Experience: {years} years (requested {requested}+)")),
		(Some(requested), Some(years)) =>
			missing.push(format!("Experience: {years} years (requested {requested}+)")),
		(Some(requested), None) =>
			missing.push(format!("Experience: not specified (requested {requested}+)")),
		(None, Some(years)) if years > 0 => matched.push(format!("Experience: {years} years")),
		(None, _) => {},
	}
}

fn explain_location(
	signals: &QuerySignals,
	record: &CandidateRecord,
	matched: &mut Vec<String>,
	missing: &mut Vec<String>,
) {
	let current = present(record.current_location.as_deref());

	for location in &signals.locations {
		match current {
			Some(current) if contains_phrase(current, location) =>
				matched.push(format!("Location: {current}")),
			Some(current) =>
				missing.push(format!("Location: {} (candidate in {current})", title_case(location))),
			None => missing.push(format!("Location: {} (candidate location unknown)", title_case(location))),
		}
	}
}

fn explain_availability(
	signals: &QuerySignals,
	record: &CandidateRecord,
	matched: &mut Vec<String>,
	missing: &mut Vec<String>,
) {
	if !signals.wants_availability {
		return;
	}

	match present(record.availability_status.as_deref()) {
		Some(status) if status.eq_ignore_ascii_case("available") =>
			matched.push("Availability: available now".to_string()),
		Some(status) => match record.available_from {
			Some(from) => missing.push(format!("Availability: {status} (from {from})")),
			None => missing.push(format!("Availability: {status}")),
		},
		None => missing.push("Availability: unknown".to_string()),
	}
}

fn explain_nationality(query: &str, record: &CandidateRecord, matched: &mut Vec<String>) {
	let query = query.to_lowercase();

	for nationality in [record.nationality.as_deref(), record.second_nationality.as_deref()]
		.into_iter()
		.filter_map(present)
	{
		if query.contains(&nationality.to_lowercase()) {
			matched.push(format!("Nationality: {nationality}"));
		}
	}
}

fn confidence_tier(relevance: f32) -> (Confidence, &'static str) {
	if relevance >= STRONG_MATCH {
		(Confidence::High, "Strong match")
	} else if relevance >= GOOD_MATCH {
		(Confidence::Medium, "Good match")
	} else if relevance >= PARTIAL_MATCH {
		(Confidence::Low, "Partial match")
	} else {
		(Confidence::Low, "Weak match")
	}
}

fn present(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}

fn title_case(text: &str) -> String {
	text.split_whitespace()
		.map(|word| {
			let mut chars = word.chars();

			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<String>>()
		.join(" ")
}
