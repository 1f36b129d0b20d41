use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = crew_api::Args::parse();

	crew_api::run(args).await
}
