pub fn render_schema(vector_dim: u32) -> String {
	let init = include_str!("../../../sql/init.sql");
	let expanded = expand_includes(init);

	expanded.replace("<VECTOR_DIM>", &vector_dim.to_string())
}

/// Splits on `;` outside dollar-quoted bodies, dropping empty statements.
pub fn split_statements(sql: &str) -> Vec<&str> {
	let mut out = Vec::new();
	let mut in_dollar_body = false;
	let mut start = 0;
	let bytes = sql.as_bytes();
	let mut i = 0;

	while i < bytes.len() {
		if bytes[i] == b'$' && bytes.get(i + 1) == Some(&b'$') {
			in_dollar_body = !in_dollar_body;
			i += 2;

			continue;
		}
		if bytes[i] == b';' && !in_dollar_body {
			push_statement(&mut out, &sql[start..i]);

			start = i + 1;
		}

		i += 1;
	}

	push_statement(&mut out, &sql[start..]);

	out
}

fn push_statement<'a>(out: &mut Vec<&'a str>, statement: &'a str) {
	let trimmed = statement.trim();

	if !trimmed.is_empty() {
		out.push(trimmed);
	}
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_candidates.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_candidates.sql")),
				"functions/001_search_candidates_vector.sql" => out.push_str(include_str!(
					"../../../sql/functions/001_search_candidates_vector.sql"
				)),
				"functions/002_search_candidates_fulltext.sql" => out.push_str(include_str!(
					"../../../sql/functions/002_search_candidates_fulltext.sql"
				)),
				"functions/003_search_candidates_hybrid.sql" => out.push_str(include_str!(
					"../../../sql/functions/003_search_candidates_hybrid.sql"
				)),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
