use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use volby_scraper::{
    cli::{self, Invocation},
    pipeline,
};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) arguments, checked before any request ────────────────────
    let cli = match cli::parse_args(std::env::args_os())? {
        Invocation::Run(cli) => cli,
        Invocation::Info(text) => {
            print!("{}", text);
            return Ok(());
        }
    };
    let args = cli.validate()?;

    // ─── 3) scrape + export ──────────────────────────────────────────
    println!("Downloading results from {}, please wait...", args.listing_url);
    info!(output = %args.output.display(), concurrency = args.config.concurrency, "startup");

    let report = pipeline::run(&args.config, &args.listing_url, &args.output)
        .await
        .with_context(|| format!("scraping {}", args.listing_url))?;

    if !report.skipped.is_empty() {
        println!(
            "Skipped {} of {} municipalities (see log for details).",
            report.skipped.len(),
            report.discovered
        );
    }
    println!("Data saved to {}", args.output.display());
    Ok(())
}
