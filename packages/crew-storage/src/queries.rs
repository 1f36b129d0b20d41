use uuid::Uuid;

use crate::{
	Error, Result,
	db::Db,
	models::{CandidateHit, CandidateRecord},
};

const CANDIDATE_COLUMNS: &str = "\
	id,
	first_name,
	last_name,
	primary_position,
	position_category,
	years_experience,
	current_location,
	nationality,
	second_nationality,
	availability_status,
	available_from,
	verification_tier,
	has_stcw,
	has_eng1,
	has_schengen,
	has_b1b2,
	highest_license,
	profile_summary,
	search_keywords,
	embedding_text,
	cv_text,
	deleted_at";

pub async fn vector_search(
	db: &Db,
	embedding: &[f32],
	threshold: f32,
	limit: u32,
) -> Result<Vec<CandidateHit>> {
	let hits = sqlx::query_as::<_, CandidateHit>(
		"\
SELECT candidate_id, score, snippet
FROM search_candidates_vector($1::text::vector, $2, $3)",
	)
	.bind(vector_to_pg(embedding))
	.bind(threshold)
	.bind(match_count(limit)?)
	.fetch_all(&db.pool)
	.await?;

	Ok(hits)
}

pub async fn fulltext_search(db: &Db, query: &str, limit: u32) -> Result<Vec<CandidateHit>> {
	let hits = sqlx::query_as::<_, CandidateHit>(
		"\
SELECT candidate_id, score, snippet
FROM search_candidates_fulltext($1, $2)",
	)
	.bind(query)
	.bind(match_count(limit)?)
	.fetch_all(&db.pool)
	.await?;

	Ok(hits)
}

pub async fn hybrid_search(
	db: &Db,
	query: &str,
	embedding: &[f32],
	threshold: f32,
	limit: u32,
) -> Result<Vec<CandidateHit>> {
	let hits = sqlx::query_as::<_, CandidateHit>(
		"\
SELECT candidate_id, score, snippet
FROM search_candidates_hybrid($1, $2::text::vector, $3, $4)",
	)
	.bind(query)
	.bind(vector_to_pg(embedding))
	.bind(threshold)
	.bind(match_count(limit)?)
	.fetch_all(&db.pool)
	.await?;

	Ok(hits)
}

/// Live (non-deleted) candidates among `ids`, in no particular order.
pub async fn fetch_candidates(db: &Db, ids: &[Uuid]) -> Result<Vec<CandidateRecord>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let sql = format!(
		"SELECT {CANDIDATE_COLUMNS}\nFROM candidates\nWHERE id = ANY($1) AND deleted_at IS NULL"
	);
	let records =
		sqlx::query_as::<_, CandidateRecord>(&sql).bind(ids).fetch_all(&db.pool).await?;

	Ok(records)
}

/// Primary positions of the most recently updated live candidates, one entry per candidate.
pub async fn sample_positions(db: &Db, limit: u32) -> Result<Vec<String>> {
	let positions = sqlx::query_scalar::<_, String>(
		"\
SELECT btrim(primary_position)
FROM candidates
WHERE deleted_at IS NULL
	AND primary_position IS NOT NULL
	AND btrim(primary_position) <> ''
ORDER BY updated_at DESC, id
LIMIT $1",
	)
	.bind(match_count(limit)?)
	.fetch_all(&db.pool)
	.await?;

	Ok(positions)
}

pub async fn insert_candidate(
	db: &Db,
	record: &CandidateRecord,
	embedding: Option<&[f32]>,
) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO candidates (
	id,
	first_name,
	last_name,
	primary_position,
	position_category,
	years_experience,
	current_location,
	nationality,
	second_nationality,
	availability_status,
	available_from,
	verification_tier,
	has_stcw,
	has_eng1,
	has_schengen,
	has_b1b2,
	highest_license,
	profile_summary,
	search_keywords,
	embedding_text,
	cv_text,
	embedding,
	deleted_at
)
VALUES (
	$1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
	$13, $14, $15, $16, $17, $18, $19, $20, $21, $22::text::vector, $23
)",
	)
	.bind(record.id)
	.bind(record.first_name.as_deref())
	.bind(record.last_name.as_deref())
	.bind(record.primary_position.as_deref())
	.bind(record.position_category.as_deref())
	.bind(record.years_experience)
	.bind(record.current_location.as_deref())
	.bind(record.nationality.as_deref())
	.bind(record.second_nationality.as_deref())
	.bind(record.availability_status.as_deref())
	.bind(record.available_from)
	.bind(record.verification_tier.as_deref())
	.bind(record.has_stcw)
	.bind(record.has_eng1)
	.bind(record.has_schengen)
	.bind(record.has_b1b2)
	.bind(record.highest_license.as_deref())
	.bind(record.profile_summary.as_deref())
	.bind(&record.search_keywords)
	.bind(record.embedding_text.as_deref())
	.bind(record.cv_text.as_deref())
	.bind(embedding.map(vector_to_pg))
	.bind(record.deleted_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub fn vector_to_pg(vec: &[f32]) -> String {
	let mut out = String::with_capacity(vec.len() * 8);

	out.push('[');

	for (i, value) in vec.iter().enumerate() {
		if i > 0 {
			out.push(',');
		}

		out.push_str(&value.to_string());
	}

	out.push(']');

	out
}

fn match_count(limit: u32) -> Result<i32> {
	i32::try_from(limit).map_err(|_| Error::InvalidArgument(format!("limit {limit} is too large.")))
}
