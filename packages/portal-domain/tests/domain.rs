use portal_domain::{Category, EntityKind, Listing, OrbitChain, Subcategory, text};

#[test]
fn orbit_chain_listing_view_exposes_parent_chains() {
	let chain: OrbitChain = serde_json::from_value(serde_json::json!({
		"id": "oc1",
		"slug": "xai",
		"title": "Xai",
		"description": "Gaming L3.",
		"categoryIds": ["gaming"],
		"chainIds": ["arb1"],
	}))
	.expect("Failed to parse orbit chain.");

	assert_eq!(OrbitChain::KIND, EntityKind::OrbitChain);
	assert_eq!(chain.chain_ids(), ["arb1".to_string()]);
	assert_eq!(chain.description(), Some("Gaming L3."));
	assert!(!chain.meta().is_featured);
}

#[test]
fn subcategory_requires_parent_category() {
	let result = serde_json::from_value::<Subcategory>(serde_json::json!({
		"id": "dex",
		"slug": "dex",
		"title": "DEX",
	}));

	assert!(result.is_err());
}

#[test]
fn category_round_trips_camel_case_fields() {
	let category = Category {
		id: "defi".to_string(),
		slug: "defi".to_string(),
		title: "DeFi".to_string(),
		description: None,
	};
	let value = serde_json::to_value(&category).expect("Failed to serialize category.");

	assert_eq!(value, serde_json::json!({ "id": "defi", "slug": "defi", "title": "DeFi" }));
}

#[test]
fn folded_titles_compare_without_accents() {
	assert_eq!(text::fold("Pendle Fínance"), text::fold("pendle finance"));
}
