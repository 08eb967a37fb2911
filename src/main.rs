use clap::Parser;
use log::info;
use stats_card::api::Error;
use stats_card_app::args::Args;
use stats_card_app::render;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    env_logger::Builder::new().filter_level(args.log_level).init();

    let summary = stats_card_app::generate_summary(&args).await?;
    let svg = render::generate_svg(&summary, args.theme, chrono::Utc::now());
    std::fs::write(&args.output, svg).map_err(|err| Error::Other(err.into()))?;
    info!("Stats card written to {}", args.output.display());

    println!("![GitHub Stats](./{})", args.output.display());

    Ok(())
}
