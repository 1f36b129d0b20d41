use crate::{Error, Result, search::PoolCandidate};
use crew_storage::models::CandidateRecord;

/// Caller-supplied hard filters. Every set field must hold for a candidate to survive.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchFilters {
	pub positions: Vec<String>,
	pub min_experience: Option<i32>,
	pub max_experience: Option<i32>,
	pub require_stcw: bool,
	pub require_eng1: bool,
	pub require_schengen: bool,
	pub require_b1b2: bool,
	pub verification_tiers: Vec<String>,
	pub availability_statuses: Vec<String>,
}
impl SearchFilters {
	pub fn validate(&self) -> Result<()> {
		for (field, bound) in [
			("$.filters.min_experience", self.min_experience),
			("$.filters.max_experience", self.max_experience),
		] {
			if bound.is_some_and(|years| years < 0) {
				return Err(Error::invalid(field, "Experience bounds must not be negative."));
			}
		}

		if let (Some(min), Some(max)) = (self.min_experience, self.max_experience)
			&& min > max
		{
			return Err(Error::invalid(
				"$.filters",
				"filters.min_experience must not exceed filters.max_experience.",
			));
		}

		Ok(())
	}

	pub fn matches(&self, record: &CandidateRecord) -> bool {
		self.matches_position(record)
			&& self.matches_experience(record)
			&& (!self.require_stcw || record.has_stcw)
			&& (!self.require_eng1 || record.has_eng1)
			&& (!self.require_schengen || record.has_schengen)
			&& (!self.require_b1b2 || record.has_b1b2)
			&& one_of(&self.verification_tiers, record.verification_tier.as_deref())
			&& one_of(&self.availability_statuses, record.availability_status.as_deref())
	}

	fn matches_position(&self, record: &CandidateRecord) -> bool {
		let wanted: Vec<String> = self
			.positions
			.iter()
			.map(|position| position.trim().to_lowercase())
			.filter(|position| !position.is_empty())
			.collect();

		if wanted.is_empty() {
			return true;
		}

		[record.primary_position.as_deref(), record.position_category.as_deref()]
			.into_iter()
			.flatten()
			.map(str::to_lowercase)
			.any(|field| wanted.iter().any(|needle| field.contains(needle.as_str())))
	}

	fn matches_experience(&self, record: &CandidateRecord) -> bool {
		if self.min_experience.is_none() && self.max_experience.is_none() {
			return true;
		}

		let Some(years) = record.years_experience else {
			return false;
		};

		self.min_experience.is_none_or(|min| years >= min)
			&& self.max_experience.is_none_or(|max| years <= max)
	}
}

pub(crate) fn apply_filters(
	filters: Option<&SearchFilters>,
	pool: Vec<PoolCandidate>,
) -> Vec<PoolCandidate> {
	match filters {
		Some(filters) => pool.into_iter().filter(|candidate| filters.matches(&candidate.record)).collect(),
		None => pool,
	}
}

fn one_of(allowed: &[String], value: Option<&str>) -> bool {
	let mut allowed = allowed.iter().map(|item| item.trim()).filter(|item| !item.is_empty()).peekable();

	if allowed.peek().is_none() {
		return true;
	}

	let Some(value) = value.map(str::trim) else {
		return false;
	};

	allowed.any(|item| item.eq_ignore_ascii_case(value))
}
