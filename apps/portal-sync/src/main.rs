use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = portal_sync::Args::parse();

	portal_sync::run(args).await
}
