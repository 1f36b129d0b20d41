use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// A stored candidate profile, limited to the columns the search pipeline reads.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct CandidateRecord {
	pub id: Uuid,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub primary_position: Option<String>,
	pub position_category: Option<String>,
	pub years_experience: Option<i32>,
	pub current_location: Option<String>,
	pub nationality: Option<String>,
	pub second_nationality: Option<String>,
	pub availability_status: Option<String>,
	pub available_from: Option<Date>,
	pub verification_tier: Option<String>,
	pub has_stcw: bool,
	pub has_eng1: bool,
	pub has_schengen: bool,
	pub has_b1b2: bool,
	pub highest_license: Option<String>,
	pub profile_summary: Option<String>,
	pub search_keywords: Vec<String>,
	pub embedding_text: Option<String>,
	pub cv_text: Option<String>,
	pub deleted_at: Option<OffsetDateTime>,
}

/// One row returned by the search stored procedures.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CandidateHit {
	pub candidate_id: Uuid,
	pub score: f32,
	pub snippet: Option<String>,
}
