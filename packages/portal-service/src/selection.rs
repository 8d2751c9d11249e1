use std::{
	collections::BTreeSet,
	fmt::{Display, Formatter},
};

use serde::Serialize;

use portal_catalog::Catalog;

pub const ALL_CATEGORIES: &str = "all";

/// Active listing filters decoded from the URL.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
	pub category: CategoryFilter,
	pub subcategories: BTreeSet<String>,
	pub chains: BTreeSet<String>,
	pub sort: SortOrder,
}
impl Selection {
	pub fn category(slug: impl Into<String>) -> Self {
		Self { category: CategoryFilter::from_slug(slug), ..Default::default() }
	}

	pub fn chains<I, S>(chains: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { chains: chains.into_iter().map(Into::into).collect(), ..Default::default() }
	}

	pub fn with_subcategories<I, S>(mut self, subcategories: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.subcategories = subcategories.into_iter().map(Into::into).collect();

		self
	}

	pub fn with_sort(mut self, sort: SortOrder) -> Self {
		self.sort = sort;

		self
	}

	pub fn is_default(&self) -> bool {
		self == &Self::default()
	}

	/// Drops every value the catalog does not know, plus subcategories outside the selected
	/// category. Sets are already kept in canonical order.
	pub fn normalized(&self, catalog: &Catalog) -> Self {
		let parent = self.category.slug().and_then(|slug| catalog.category_by_slug(slug));
		let category = match parent {
			Some(found) => CategoryFilter::Only(found.slug.clone()),
			None => CategoryFilter::All,
		};
		let parent_id = parent.map(|found| found.id.as_str());
		let subcategories = self
			.subcategories
			.iter()
			.filter(|slug| match catalog.subcategory_by_slug(slug) {
				Some(subcategory) => parent_id.is_none_or(|id| subcategory.category_id == id),
				None => false,
			})
			.cloned()
			.collect();
		let chains = self.chains.iter().filter(|chain| catalog.has_chain(chain)).cloned().collect();

		Self { category, subcategories, chains, sort: self.sort }
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
	#[default]
	All,
	Only(String),
}
impl CategoryFilter {
	/// Maps the `all` token to [`CategoryFilter::All`].
	pub fn from_slug(slug: impl Into<String>) -> Self {
		let slug = slug.into();

		if slug == ALL_CATEGORIES { Self::All } else { Self::Only(slug) }
	}

	/// The selected category slug, or `None` when every category is allowed.
	pub fn slug(&self) -> Option<&str> {
		match self {
			Self::Only(slug) if slug != ALL_CATEGORIES => Some(slug),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
	/// Featured entries first, then catalog order.
	#[default]
	Featured,
	/// Creation date descending; undated entries last.
	Newest,
	/// Folded title ascending.
	Alphabetical,
}
impl SortOrder {
	pub const ALL: [Self; 3] = [Self::Featured, Self::Newest, Self::Alphabetical];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Featured => "featured",
			Self::Newest => "newest",
			Self::Alphabetical => "alphabetical",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|sort| sort.as_str() == raw)
	}
}
impl Display for SortOrder {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
