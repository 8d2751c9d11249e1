use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = portal_api::Args::parse();

	portal_api::run(args).await
}
