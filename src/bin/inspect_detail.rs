// Fetch one municipality detail page and print what the extractor sees.
//
//   cargo run --bin inspect_detail -- "https://www.volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=12&xobec=506761&xvyber=7103"

use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, EnvFilter};
use volby_scraper::{cli::parse_http_url, config::ScrapeConfig, fetch::Scraper};

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let Some(raw) = std::env::args().nth(1) else {
        bail!("usage: inspect_detail <detail-page-url>");
    };
    let url = parse_http_url(&raw)?;

    let scraper = Scraper::new(&ScrapeConfig::default())?;
    let tally = scraper
        .fetch_results(&url)
        .await
        .with_context(|| format!("inspecting {}", url))?;

    println!("registered: {}", tally.registered);
    println!("envelopes:  {}", tally.envelopes);
    println!("valid:      {}", tally.valid);
    println!("parties:    {}", tally.parties.len());
    for (party, votes) in tally.parties.iter() {
        println!("  {:>8}  {}", votes, party);
    }
    Ok(())
}
