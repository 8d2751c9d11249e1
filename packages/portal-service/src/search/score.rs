use std::collections::HashSet;

use nucleo_matcher::{
	Config, Matcher, Utf32Str,
	pattern::{AtomKind, CaseMatching, Normalization, Pattern},
};

use portal_domain::text;

use super::typo;

pub(super) const EXACT_SCORE: f32 = 1.0;

const FUZZY_CEILING: f32 = 0.9;
const PREFIX_BONUS: f32 = 0.05;
const TYPO_CEILING: f32 = 0.6;
const SECONDARY_CEILING: f32 = 0.9;
const MIN_WORD_CHARS: usize = 2;

/// Scores folded fields against one folded query. Every non-exact score stays below
/// `EXACT_SCORE`.
pub(super) struct Scorer<'a> {
	cfg: &'a portal_config::Search,
	query: String,
	query_words: Vec<String>,
	pattern: Pattern,
	self_score: f32,
	matcher: Matcher,
	buf: Vec<char>,
}
impl<'a> Scorer<'a> {
	pub(super) fn new(folded_query: String, cfg: &'a portal_config::Search) -> Option<Self> {
		let pattern = Pattern::new(
			&folded_query,
			CaseMatching::Ignore,
			Normalization::Smart,
			AtomKind::Fuzzy,
		);
		let mut matcher = Matcher::new(Config::DEFAULT);
		let mut buf = Vec::new();
		let self_score = pattern.score(Utf32Str::new(&folded_query, &mut buf), &mut matcher)?;

		if self_score == 0 {
			return None;
		}

		let query_words = text::words(&folded_query)
			.into_iter()
			.filter(|word| word.chars().count() >= MIN_WORD_CHARS)
			.map(str::to_string)
			.collect();

		Some(Self {
			cfg,
			query: folded_query,
			query_words,
			pattern,
			self_score: self_score as f32,
			matcher,
			buf,
		})
	}

	/// Scores a folded title: exact match, then subsequence match normalized by the query's
	/// own score, then the typo fallback.
	pub(super) fn title(&mut self, folded_title: &str) -> Option<f32> {
		if folded_title.is_empty() {
			return None;
		}
		if folded_title == self.query {
			return Some(EXACT_SCORE);
		}

		let haystack = Utf32Str::new(folded_title, &mut self.buf);

		if let Some(raw) = self.pattern.score(haystack, &mut self.matcher) {
			let ratio = (raw as f32 / self.self_score).min(1.0);
			let bonus =
				if folded_title.starts_with(self.query.as_str()) { PREFIX_BONUS } else { 0.0 };

			return Some(ratio * FUZZY_CEILING + bonus);
		}
		if !self.cfg.typo_tolerance {
			return None;
		}

		typo::score(&self.query_words, &text::words(folded_title)).map(|score| score * TYPO_CEILING)
	}

	/// Word-prefix overlap between the query and secondary fields such as descriptions and
	/// tags, discounted by `description_weight`.
	pub(super) fn secondary<'f>(&self, fields: impl IntoIterator<Item = &'f str>) -> Option<f32> {
		if !self.cfg.include_descriptions
			|| self.cfg.description_weight <= 0.0
			|| self.query_words.is_empty()
		{
			return None;
		}

		let mut field_words = HashSet::new();

		for field in fields {
			let folded = text::fold(field);

			for word in text::words(&folded) {
				field_words.insert(word.to_string());
			}
		}

		if field_words.is_empty() {
			return None;
		}

		let matched = self
			.query_words
			.iter()
			.filter(|query_word| {
				field_words.iter().any(|word| word.starts_with(query_word.as_str()))
			})
			.count();

		if matched == 0 {
			return None;
		}

		let ratio = matched as f32 / self.query_words.len() as f32;

		Some(self.cfg.description_weight * SECONDARY_CEILING * ratio)
	}
}

#[cfg(test)]
mod tests {
	use portal_domain::text;

	use super::{EXACT_SCORE, Scorer};

	fn scorer<'a>(query: &str, cfg: &'a portal_config::Search) -> Scorer<'a> {
		Scorer::new(text::fold(query), cfg).expect("Query must be scorable.")
	}

	#[test]
	fn exact_title_outranks_prefix_match() {
		let cfg = portal_config::Search::default();
		let mut scorer = scorer("GMX", &cfg);
		let exact = scorer.title("gmx").expect("Exact title matches.");
		let prefix = scorer.title("gmx v2").expect("Prefix title matches.");

		assert_eq!(exact, EXACT_SCORE);
		assert!(prefix < exact);
		assert!(prefix > 0.8);
	}

	#[test]
	fn subsequence_matches_partial_input() {
		let cfg = portal_config::Search::default();
		let mut scorer = scorer("cmlt", &cfg);

		assert!(scorer.title("camelot").is_some());
		assert!(scorer.title("treasure").is_none());
	}

	#[test]
	fn typo_fallback_can_be_disabled() {
		let mut cfg = portal_config::Search::default();
		let typo = scorer("arbirtum", &cfg).title("arbitrum one");

		assert!(typo.is_some());

		cfg.typo_tolerance = false;

		assert!(scorer("arbirtum", &cfg).title("arbitrum one").is_none());
	}

	#[test]
	fn secondary_fields_are_discounted() {
		let cfg = portal_config::Search::default();
		let scorer = scorer("perpetual", &cfg);
		let score = scorer
			.secondary(["Decentralized perpetual exchange.", "perps"])
			.expect("Description word matches.");

		assert!(score <= cfg.description_weight);
		assert!(scorer.secondary(["Lending market."]).is_none());
	}
}
