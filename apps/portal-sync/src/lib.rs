pub mod mirror;

mod error;

pub use error::{Error, Result};

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
	version = portal_cli::VERSION,
	rename_all = "kebab",
	styles = portal_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Keep running and mirror again after this many seconds.
	#[arg(long, value_name = "SECONDS")]
	pub interval_secs: Option<u64>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = portal_config::load(&args.config)?;

	init_tracing(&config)?;

	let sync = config
		.sync
		.as_ref()
		.ok_or_else(|| eyre::eyre!("The [sync] section is required to mirror catalog data."))?;
	let Some(interval_secs) = args.interval_secs.filter(|secs| *secs > 0) else {
		let report = mirror::mirror(sync, &config.catalog).await?;

		log_report(&report);

		return Ok(());
	};

	loop {
		// A failed round leaves the previous snapshot on disk.
		match mirror::mirror(sync, &config.catalog).await {
			Ok(report) => log_report(&report),
			Err(err) => tracing::error!(error = %err, "Catalog mirror failed."),
		}

		tokio::time::sleep(Duration::from_secs(interval_secs)).await;
	}
}

fn log_report(report: &mirror::SyncReport) {
	for document in &report.documents {
		tracing::info!(
			file = %document.file,
			records = document.records,
			bytes = document.bytes,
			"Document mirrored."
		);
	}

	tracing::info!(fingerprint = %report.fingerprint, "Catalog mirrored.");
}

fn init_tracing(config: &portal_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	Ok(())
}
