use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Entity kinds in search priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
	Project,
	OrbitChain,
	Category,
	Subcategory,
}
impl EntityKind {
	pub const ALL: [Self; 4] = [Self::Project, Self::OrbitChain, Self::Category, Self::Subcategory];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Project => "project",
			Self::OrbitChain => "orbit_chain",
			Self::Category => "category",
			Self::Subcategory => "subcategory",
		}
	}
}
impl Display for EntityKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityMeta {
	pub is_featured: bool,
	#[serde(with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
	pub id: String,
	pub slug: String,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subtitle: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default)]
	pub category_ids: Vec<String>,
	#[serde(default)]
	pub subcategory_ids: Vec<String>,
	#[serde(default, alias = "chains")]
	pub chain_ids: Vec<String>,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub meta: EntityMeta,
}

/// An orbit chain listed in the ecosystem directory. `chain_ids` names the parent chains it
/// settles on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitChain {
	pub id: String,
	pub slug: String,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default)]
	pub category_ids: Vec<String>,
	#[serde(default)]
	pub subcategory_ids: Vec<String>,
	#[serde(default, alias = "chains")]
	pub chain_ids: Vec<String>,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub meta: EntityMeta,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
	pub id: String,
	pub slug: String,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
	pub id: String,
	pub slug: String,
	pub title: String,
	pub category_id: String,
}

/// Common view over the entities shown in filtered listings.
pub trait Listing {
	const KIND: EntityKind;

	fn id(&self) -> &str;

	fn slug(&self) -> &str;

	fn title(&self) -> &str;

	fn description(&self) -> Option<&str>;

	fn tags(&self) -> &[String];

	fn category_ids(&self) -> &[String];

	fn subcategory_ids(&self) -> &[String];

	fn chain_ids(&self) -> &[String];

	fn meta(&self) -> &EntityMeta;
}

impl Listing for Project {
	const KIND: EntityKind = EntityKind::Project;

	fn id(&self) -> &str {
		&self.id
	}

	fn slug(&self) -> &str {
		&self.slug
	}

	fn title(&self) -> &str {
		&self.title
	}

	fn description(&self) -> Option<&str> {
		self.description.as_deref().or(self.subtitle.as_deref())
	}

	fn tags(&self) -> &[String] {
		&self.tags
	}

	fn category_ids(&self) -> &[String] {
		&self.category_ids
	}

	fn subcategory_ids(&self) -> &[String] {
		&self.subcategory_ids
	}

	fn chain_ids(&self) -> &[String] {
		&self.chain_ids
	}

	fn meta(&self) -> &EntityMeta {
		&self.meta
	}
}

impl Listing for OrbitChain {
	const KIND: EntityKind = EntityKind::OrbitChain;

	fn id(&self) -> &str {
		&self.id
	}

	fn slug(&self) -> &str {
		&self.slug
	}

	fn title(&self) -> &str {
		&self.title
	}

	fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	fn tags(&self) -> &[String] {
		&self.tags
	}

	fn category_ids(&self) -> &[String] {
		&self.category_ids
	}

	fn subcategory_ids(&self) -> &[String] {
		&self.subcategory_ids
	}

	fn chain_ids(&self) -> &[String] {
		&self.chain_ids
	}

	fn meta(&self) -> &EntityMeta {
		&self.meta
	}
}
