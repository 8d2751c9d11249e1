use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};
use unicode_segmentation::UnicodeSegmentation;

const MAX_SLUG_BYTES: usize = 128;

/// Folds text for matching: compatibility decomposition, combining marks stripped, lowercase,
/// whitespace runs collapsed to one space and trimmed.
pub fn fold(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	let mut pending_space = false;

	for ch in input.nfkd() {
		if is_combining_mark(ch) {
			continue;
		}
		if ch.is_whitespace() {
			pending_space = !out.is_empty();

			continue;
		}
		if pending_space {
			out.push(' ');

			pending_space = false;
		}

		out.extend(ch.to_lowercase());
	}

	out
}

/// Words of already folded text.
pub fn words(folded: &str) -> Vec<&str> {
	folded.unicode_words().collect()
}

pub fn is_slug(input: &str) -> bool {
	if input.is_empty() || input.len() > MAX_SLUG_BYTES {
		return false;
	}
	if input.starts_with('-') || input.ends_with('-') {
		return false;
	}

	input.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
	use super::{fold, is_slug, words};

	#[test]
	fn fold_strips_diacritics_and_case() {
		assert_eq!(fold("Crème Brûlée"), "creme brulee");
		assert_eq!(fold("ÅRBITRUM"), "arbitrum");
	}

	#[test]
	fn fold_collapses_whitespace() {
		assert_eq!(fold("  Arbitrum \t  One  "), "arbitrum one");
		assert_eq!(fold("   "), "");
	}

	#[test]
	fn fold_normalizes_compatibility_forms() {
		assert_eq!(fold("Ｇｍｘ"), "gmx");
	}

	#[test]
	fn words_split_on_punctuation() {
		assert_eq!(words("uni-swap v3, beta"), vec!["uni", "swap", "v3", "beta"]);
	}

	#[test]
	fn slug_shape() {
		assert!(is_slug("arbitrum-one"));
		assert!(is_slug("defi2"));
		assert!(!is_slug(""));
		assert!(!is_slug("-defi"));
		assert!(!is_slug("DeFi"));
		assert!(!is_slug("de fi"));
		assert!(!is_slug(&"a".repeat(129)));
	}
}
