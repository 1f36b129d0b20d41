use crate::search::{SearchResultItem, explain::explain_match, quality::QualifiedCandidate};
use crew_domain::QuerySignals;

/// Slices `[offset, offset + limit)` out of the qualified list and projects each survivor into
/// its public shape with an explanation attached.
pub(crate) fn assemble_page(
	qualified: Vec<QualifiedCandidate>,
	offset: usize,
	limit: usize,
	query: &str,
	signals: &QuerySignals,
	related_role_min: f32,
) -> Vec<SearchResultItem> {
	qualified
		.into_iter()
		.skip(offset)
		.take(limit)
		.map(|qualified| {
			let relevance = qualified.relevance();
			let QualifiedCandidate { candidate, rerank_score } = qualified;
			let record = candidate.record;
			let match_explanation =
				explain_match(query, signals, &record, relevance, related_role_min);

			SearchResultItem {
				id: record.id,
				first_name: record.first_name,
				last_name: record.last_name,
				primary_position: record.primary_position,
				position_category: record.position_category,
				years_experience: record.years_experience,
				current_location: record.current_location,
				nationality: record.nationality,
				availability_status: record.availability_status,
				available_from: record.available_from,
				verification_tier: record.verification_tier,
				has_stcw: record.has_stcw,
				has_eng1: record.has_eng1,
				has_schengen: record.has_schengen,
				has_b1b2: record.has_b1b2,
				match_score: candidate.match_score,
				rerank_score,
				snippet: candidate.snippet,
				match_explanation,
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use uuid::Uuid;

	use crate::search::{
		PoolCandidate, assemble::assemble_page, quality::QualifiedCandidate,
	};
	use crew_domain::{PatternSignalExtractor, QuerySignalExtractor};
	use crew_storage::models::CandidateRecord;

	const SCORES: [f32; 5] = [0.9, 0.8, 0.7, 0.6, 0.5];

	fn qualified(count: usize) -> Vec<QualifiedCandidate> {
		(0..count)
			.map(|i| QualifiedCandidate {
				candidate: PoolCandidate {
					record: CandidateRecord {
						id: Uuid::from_u128(i as u128 + 1),
						primary_position: Some("Deckhand".to_string()),
						..Default::default()
					},
					match_score: 0.6,
					snippet: None,
				},
				rerank_score: Some(SCORES[i]),
			})
			.collect()
	}

	#[test]
	fn honours_offset_and_limit() {
		let signals = PatternSignalExtractor.extract("deckhand");
		let page = assemble_page(qualified(5), 1, 2, "deckhand", &signals, 0.3);
		let ids: Vec<Uuid> = page.iter().map(|item| item.id).collect();

		assert_eq!(ids, vec![Uuid::from_u128(2), Uuid::from_u128(3)]);
		assert_eq!(page[0].rerank_score, Some(0.8));
		assert_eq!(page[0].match_score, 0.6);
	}

	#[test]
	fn offset_past_the_end_yields_empty_page() {
		let signals = PatternSignalExtractor.extract("deckhand");

		assert!(assemble_page(qualified(3), 3, 10, "deckhand", &signals, 0.3).is_empty());
	}
}
