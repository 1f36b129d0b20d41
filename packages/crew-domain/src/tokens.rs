use std::collections::HashSet;

/// Tokens shorter than this carry no signal for overlap checks ("in", "of", "5").
pub const MIN_TOKEN_CHARS: usize = 3;

/// Lowercased alphanumeric tokens of at least [`MIN_TOKEN_CHARS`] characters, deduplicated in
/// first-seen order.
pub fn significant_tokens(text: &str) -> Vec<String> {
	let mut out = Vec::new();
	let mut seen = HashSet::new();

	for token in normalize(text).split_whitespace() {
		if token.chars().count() < MIN_TOKEN_CHARS {
			continue;
		}
		if seen.insert(token.to_string()) {
			out.push(token.to_string());
		}
	}

	out
}

/// Lowercases and replaces every non-alphanumeric character with a space.
pub fn normalize(text: &str) -> String {
	let mut normalized = String::with_capacity(text.len());

	for ch in text.chars() {
		if ch.is_alphanumeric() {
			normalized.extend(ch.to_lowercase());
		} else {
			normalized.push(' ');
		}
	}

	normalized
}

pub fn overlapping_tokens(query_tokens: &[String], text: &str) -> Vec<String> {
	let text_tokens: HashSet<String> = significant_tokens(text).into_iter().collect();

	query_tokens.iter().filter(|token| text_tokens.contains(token.as_str())).cloned().collect()
}

pub fn has_overlap(query_tokens: &[String], text: &str) -> bool {
	!overlapping_tokens(query_tokens, text).is_empty()
}

/// Whole-phrase containment on normalized text, so "nice" does not match "venice".
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
	let haystack = format!(" {} ", collapse_whitespace(&normalize(haystack)));
	let phrase = collapse_whitespace(&normalize(phrase));

	if phrase.is_empty() {
		return false;
	}

	haystack.contains(&format!(" {phrase} "))
}

fn collapse_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}
