//! Heuristic query understanding.
//!
//! Signals extracted here annotate results and drive match explanations. They never filter
//! candidates: hard filtering only happens on filters the caller sets explicitly.

use std::sync::LazyLock;

use regex::Regex;

use crate::tokens;

const YEARS_PATTERNS: [&str; 2] = [
	r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b",
	r"(?i)\bexperience\s*:?\s*(\d{1,2})\b",
];

/// Hub locations recognised in free-text queries, longest phrases first so "palma de mallorca"
/// wins over "palma".
const LOCATION_GAZETTEER: [&str; 28] = [
	"palma de mallorca",
	"west palm beach",
	"fort lauderdale",
	"st maarten",
	"la ciotat",
	"caribbean",
	"mediterranean",
	"barcelona",
	"viareggio",
	"mallorca",
	"auckland",
	"antibes",
	"antigua",
	"newport",
	"monaco",
	"cannes",
	"athens",
	"sydney",
	"london",
	"france",
	"greece",
	"palma",
	"genoa",
	"miami",
	"dubai",
	"spain",
	"italy",
	"ibiza",
];

const AVAILABILITY_KEYWORDS: [&str; 9] = [
	"available",
	"availability",
	"immediate",
	"immediately",
	"asap",
	"urgent",
	"urgently",
	"now",
	"start",
];

static YEARS_REGEXES: LazyLock<Vec<Regex>> =
	LazyLock::new(|| YEARS_PATTERNS.iter().filter_map(|pattern| Regex::new(pattern).ok()).collect());

/// Everything the pipeline reads out of a query string, computed once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySignals {
	pub requested_years: Option<u32>,
	pub locations: Vec<String>,
	pub wants_availability: bool,
	pub tokens: Vec<String>,
}

/// Seam for swapping the regex and gazetteer heuristics for a richer language component.
pub trait QuerySignalExtractor
where
	Self: Send + Sync,
{
	fn requested_years(&self, query: &str) -> Option<u32>;

	fn locations(&self, query: &str) -> Vec<String>;

	fn wants_availability(&self, query: &str) -> bool;

	fn extract(&self, query: &str) -> QuerySignals {
		QuerySignals {
			requested_years: self.requested_years(query),
			locations: self.locations(query),
			wants_availability: self.wants_availability(query),
			tokens: tokens::significant_tokens(query),
		}
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternSignalExtractor;
impl QuerySignalExtractor for PatternSignalExtractor {
	fn requested_years(&self, query: &str) -> Option<u32> {
		parse_requested_years(query)
	}

	fn locations(&self, query: &str) -> Vec<String> {
		let mut out: Vec<String> = Vec::new();

		for location in LOCATION_GAZETTEER {
			if !tokens::contains_phrase(query, location) {
				continue;
			}
			// "palma de mallorca" already covers "palma" and "mallorca".
			if out.iter().any(|found| tokens::contains_phrase(found, location)) {
				continue;
			}

			out.push(location.to_string());
		}

		out
	}

	fn wants_availability(&self, query: &str) -> bool {
		AVAILABILITY_KEYWORDS.iter().any(|keyword| tokens::contains_phrase(query, keyword))
	}
}

/// Requested years of experience from phrases like "5 years", "3+ yrs", or "experience: 4".
pub fn parse_requested_years(query: &str) -> Option<u32> {
	for re in YEARS_REGEXES.iter() {
		let Some(captures) = re.captures(query) else {
			continue;
		};

		if let Some(years) = captures.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
			return Some(years);
		}
	}

	None
}
