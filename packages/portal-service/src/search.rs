mod score;
mod typo;

use std::cmp::Ordering;

use serde::Serialize;

use portal_catalog::Catalog;
use portal_domain::{EntityKind, Listing, text};

use self::score::Scorer;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchHit {
	pub kind: EntityKind,
	pub slug: String,
	pub title: String,
	pub score: f32,
}

struct Ranked<'a> {
	kind: EntityKind,
	slug: &'a str,
	title: &'a str,
	folded_title: String,
	score: f32,
}

/// Ranks every catalog entity against `query`.
///
/// Blank queries return nothing. Hits are ordered by descending score, then entity kind, then
/// folded title, then slug, so the same query over the same snapshot always yields the same
/// sequence.
///
/// An exact folded title scores highest, so it ranks first only when no other entity shares that
/// folded title. Shared titles tie and fall back to kind priority; the catalog loader logs them.
pub fn search(catalog: &Catalog, query: &str, cfg: &portal_config::Search) -> Vec<SearchHit> {
	let folded_query = text::fold(query);

	if folded_query.is_empty() {
		return Vec::new();
	}

	let Some(mut scorer) = Scorer::new(folded_query, cfg) else { return Vec::new() };
	let mut ranked = Vec::new();

	for project in catalog.projects() {
		ranked.extend(rank_listing(&mut scorer, project));
	}
	for chain in catalog.orbit_chains() {
		ranked.extend(rank_listing(&mut scorer, chain));
	}
	for category in catalog.categories() {
		ranked.extend(rank(
			&mut scorer,
			EntityKind::Category,
			&category.slug,
			&category.title,
			category.description.as_deref(),
		));
	}
	for subcategory in catalog.subcategories() {
		ranked.extend(rank(
			&mut scorer,
			EntityKind::Subcategory,
			&subcategory.slug,
			&subcategory.title,
			std::iter::empty::<&str>(),
		));
	}

	let candidates = ranked.len();

	ranked.retain(|hit| hit.score >= cfg.min_score);
	ranked.sort_by(cmp_ranked);

	if cfg.max_results > 0 {
		ranked.truncate(cfg.max_results as usize);
	}

	tracing::debug!(query, candidates, kept = ranked.len(), "Search resolved.");

	ranked
		.into_iter()
		.map(|hit| SearchHit {
			kind: hit.kind,
			slug: hit.slug.to_string(),
			title: hit.title.to_string(),
			score: hit.score,
		})
		.collect()
}

fn rank_listing<'a, T>(scorer: &mut Scorer<'_>, item: &'a T) -> Option<Ranked<'a>>
where
	T: Listing,
{
	let secondary = item.description().into_iter().chain(item.tags().iter().map(String::as_str));

	rank(scorer, T::KIND, item.slug(), item.title(), secondary)
}

fn rank<'a, 'f>(
	scorer: &mut Scorer<'_>,
	kind: EntityKind,
	slug: &'a str,
	title: &'a str,
	secondary: impl IntoIterator<Item = &'f str>,
) -> Option<Ranked<'a>> {
	let folded_title = text::fold(title);
	let title_score = scorer.title(&folded_title);
	let secondary_score = scorer.secondary(secondary);
	let score = match (title_score, secondary_score) {
		(Some(a), Some(b)) => a.max(b),
		(Some(score), None) | (None, Some(score)) => score,
		(None, None) => return None,
	};

	Some(Ranked { kind, slug, title, folded_title, score })
}

fn cmp_ranked(a: &Ranked<'_>, b: &Ranked<'_>) -> Ordering {
	b.score
		.total_cmp(&a.score)
		.then(a.kind.cmp(&b.kind))
		.then_with(|| a.folded_title.cmp(&b.folded_title))
		.then_with(|| a.slug.cmp(b.slug))
}
