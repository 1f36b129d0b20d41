use std::collections::HashMap;

use tracing::warn;

use crate::CrewService;
use crew_domain::tokens::has_overlap;

impl CrewService {
	/// Alternative positions to search for after the quality gate rejected every candidate.
	pub(crate) async fn suggest(&self, query_tokens: &[String]) -> Vec<String> {
		let policy = &self.cfg.search.suggestions;
		let sample = match self.store.sample_positions(policy.sample_size).await {
			Ok(sample) => sample,
			Err(err) => {
				warn!(error = %err, "Failed to sample candidate positions for suggestions.");

				return Vec::new();
			},
		};

		suggest_positions(query_tokens, &sample, policy.max_suggestions as usize)
	}
}

/// Picks up to `max` distinct positions from `sample`, preferring those sharing a token with the
/// query and falling back to the most frequent ones. Ties keep first-seen order.
pub fn suggest_positions(query_tokens: &[String], sample: &[String], max: usize) -> Vec<String> {
	let mut counted: Vec<(String, usize)> = Vec::new();
	let mut slot_by_key: HashMap<String, usize> = HashMap::new();

	for position in sample {
		let position = position.trim();

		if position.is_empty() {
			continue;
		}

		let key = position.to_lowercase();

		match slot_by_key.get(&key) {
			Some(&slot) => counted[slot].1 += 1,
			None => {
				slot_by_key.insert(key, counted.len());
				counted.push((position.to_string(), 1));
			},
		}
	}

	counted.sort_by(|a, b| b.1.cmp(&a.1));

	let overlapping: Vec<String> = counted
		.iter()
		.filter(|(position, _)| has_overlap(query_tokens, position))
		.take(max)
		.map(|(position, _)| position.clone())
		.collect();

	if !overlapping.is_empty() {
		return overlapping;
	}

	counted.into_iter().take(max).map(|(position, _)| position).collect()
}
