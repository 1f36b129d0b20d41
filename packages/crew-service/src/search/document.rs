use crew_storage::models::CandidateRecord;

const SEGMENT_SEPARATOR: &str = " | ";

/// Flattens a candidate profile into the labelled text the reranker scores against the query.
///
/// Empty fields are omitted entirely. The CV segment is cut to `cv_excerpt_chars` characters.
pub fn build_candidate_document(record: &CandidateRecord, cv_excerpt_chars: usize) -> String {
	let mut segments = Vec::new();

	if let Some(position) = non_empty(record.primary_position.as_deref()) {
		match non_empty(record.position_category.as_deref()) {
			Some(category) => segments.push(format!("POSITION: {position} ({category})")),
			None => segments.push(format!("POSITION: {position}")),
		}
	}
	if let Some(years) = record.years_experience {
		segments.push(format!("EXPERIENCE: {years} years"));
	}
	if let Some(location) = non_empty(record.current_location.as_deref()) {
		segments.push(format!("LOCATION: {location}"));
	}

	match (non_empty(record.availability_status.as_deref()), record.available_from) {
		(Some(status), Some(from)) => segments.push(format!("AVAILABILITY: {status} from {from}")),
		(Some(status), None) => segments.push(format!("AVAILABILITY: {status}")),
		(None, Some(from)) => segments.push(format!("AVAILABILITY: from {from}")),
		(None, None) => {},
	}

	let mut certifications = Vec::new();

	if record.has_stcw {
		certifications.push("STCW");
	}
	if record.has_eng1 {
		certifications.push("ENG1");
	}
	if let Some(license) = non_empty(record.highest_license.as_deref()) {
		certifications.push(license);
	}
	if !certifications.is_empty() {
		segments.push(format!("CERTIFICATIONS: {}", certifications.join(", ")));
	}

	let mut visas = Vec::new();

	if record.has_schengen {
		visas.push("Schengen");
	}
	if record.has_b1b2 {
		visas.push("B1/B2");
	}
	if !visas.is_empty() {
		segments.push(format!("VISAS: {}", visas.join(", ")));
	}

	let nationalities: Vec<&str> = [record.nationality.as_deref(), record.second_nationality.as_deref()]
		.into_iter()
		.filter_map(non_empty)
		.collect();

	if !nationalities.is_empty() {
		segments.push(format!("NATIONALITY: {}", nationalities.join(", ")));
	}
	if let Some(profile) = non_empty(record.profile_summary.as_deref()) {
		segments.push(format!("PROFILE: {profile}"));
	}

	let skills: Vec<&str> =
		record.search_keywords.iter().filter_map(|keyword| non_empty(Some(keyword))).collect();

	if !skills.is_empty() {
		segments.push(format!("SKILLS: {}", skills.join(", ")));
	}

	let cv = non_empty(record.cv_text.as_deref()).or_else(|| non_empty(record.embedding_text.as_deref()));

	if let Some(cv) = cv {
		segments.push(format!("CV: {}", truncate_chars(cv, cv_excerpt_chars)));
	}

	segments.join(SEGMENT_SEPARATOR)
}

/// Cuts `text` to at most `max_chars` characters on a char boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
	match text.char_indices().nth(max_chars) {
		Some((byte_idx, _)) => text[..byte_idx].trim_end(),
		None => text,
	}
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}
