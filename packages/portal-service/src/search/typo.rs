use std::mem;

/// Scores a query whose words each sit within a small edit distance of some title word.
/// Returns `1 - edits / query_chars`, or `None` when any word is out of reach.
pub(super) fn score(query_words: &[String], title_words: &[&str]) -> Option<f32> {
	if query_words.is_empty() || title_words.is_empty() {
		return None;
	}

	let mut edits = 0_usize;
	let mut chars = 0_usize;

	for word in query_words {
		let len = word.chars().count();
		let budget = allowed_edits(len);
		let best = title_words
			.iter()
			.filter_map(|candidate| bounded_distance(word, candidate, budget))
			.min()?;

		edits += best;
		chars += len;
	}

	if chars == 0 {
		return None;
	}

	Some(1.0 - edits as f32 / chars as f32)
}

fn allowed_edits(len: usize) -> usize {
	match len {
		0..=3 => 0,
		4..=7 => 1,
		_ => 2,
	}
}

/// Optimal string alignment distance (adjacent transpositions count once), or `None` when it
/// exceeds `budget`.
fn bounded_distance(a: &str, b: &str, budget: usize) -> Option<usize> {
	let a: Vec<char> = a.chars().collect();
	let b: Vec<char> = b.chars().collect();

	if a.len().abs_diff(b.len()) > budget {
		return None;
	}

	let width = b.len() + 1;
	let mut before_prev = vec![0_usize; width];
	let mut prev: Vec<usize> = (0..width).collect();
	let mut cur = vec![0_usize; width];

	for i in 1..=a.len() {
		cur[0] = i;

		let mut row_min = cur[0];

		for j in 1..=b.len() {
			let cost = usize::from(a[i - 1] != b[j - 1]);
			let mut value = (prev[j] + 1).min(cur[j - 1] + 1).min(prev[j - 1] + cost);

			if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
				value = value.min(before_prev[j - 2] + 1);
			}

			cur[j] = value;
			row_min = row_min.min(value);
		}

		if row_min > budget {
			return None;
		}

		mem::swap(&mut before_prev, &mut prev);
		mem::swap(&mut prev, &mut cur);
	}

	let distance = prev[b.len()];

	(distance <= budget).then_some(distance)
}
