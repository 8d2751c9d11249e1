use std::sync::Arc;

use portal_catalog::Catalog;
use portal_config::Config;
use portal_service::Portal;

#[derive(Clone)]
pub struct AppState {
	pub portal: Arc<Portal>,
}
impl AppState {
	/// Loads the catalog snapshot named by `config`. Integrity errors are fatal.
	pub fn new(config: &Config) -> color_eyre::Result<Self> {
		let catalog = Catalog::load(&config.catalog)?;

		Ok(Self::from_portal(Portal::new(config, Arc::new(catalog))))
	}

	pub fn from_portal(portal: Portal) -> Self {
		Self { portal: Arc::new(portal) }
	}
}
