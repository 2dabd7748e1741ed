use clap::Parser;
use playlist_scroll::config::ScrapeConfig;
use playlist_scroll::{PlaylistScraper, ScrapeReport, output};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let scraper = match build_scraper(&args) {
        Ok(scraper) => scraper,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let config = scraper.config().clone();

    println!("YouTube Playlist Complete Scraper");
    if args.from_html.is_none() {
        println!("This will open a browser and scroll through the ENTIRE playlist");
        println!("to get ALL video titles (may take several minutes for large playlists)\n");
    }

    let start_time = std::time::Instant::now();
    let report = match scraper.run().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Scrape failed: {}", e);
            eprintln!("An error occurred: {}", e);
            return ExitCode::FAILURE;
        }
    };
    ::log::info!(
        "Scrape finished in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    if report.titles.is_empty() {
        println!("No titles were extracted. There might be an issue with the page structure.");
        return ExitCode::SUCCESS;
    }

    match present(&report, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed to save titles: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Merges the config file, the flags and, if needed, the interactive window prompt
fn build_scraper(args: &Args) -> playlist_scroll::Result<PlaylistScraper> {
    let mut config = match &args.config {
        Some(path) => ScrapeConfig::from_file(path)?,
        None => ScrapeConfig::default(),
    };
    if let Some(json) = &args.json {
        config.output.json_path = Some(json.to_string_lossy().into_owned());
    }

    let mut scraper = PlaylistScraper::with_config(config);
    if let Some(url) = &args.url {
        scraper = scraper.with_url(url);
    }
    if let Some(url) = &args.webdriver_url {
        scraper = scraper.with_webdriver_url(url);
    }
    if let Some(max) = args.max_scrolls {
        scraper = scraper.with_max_attempts(max);
    }
    if let Some(seconds) = args.timeout {
        scraper = scraper.with_page_load_timeout(seconds);
    }

    if let Some(path) = &args.from_html {
        return Ok(scraper.with_snapshot(path));
    }

    let headless = match args.window_mode() {
        Some(headless) => headless,
        None => args::prompt_headless()?,
    };
    Ok(scraper.with_headless(headless))
}

/// Prints the numbered titles and writes the output files
fn present(report: &ScrapeReport, config: &ScrapeConfig) -> playlist_scroll::Result<()> {
    println!(
        "\nSuccessfully extracted {} video titles!\n",
        report.titles.len()
    );
    for (i, title) in report.titles.iter().enumerate() {
        println!("{:4}. {}", i + 1, title);
    }

    output::save(report, &config.output)?;

    println!(
        "\nAll {} titles saved to '{}'",
        report.titles.len(),
        config.output.report_path
    );
    println!(
        "Titles also saved to '{}' (one per line)",
        config.output.list_path
    );
    if let Some(json_path) = &config.output.json_path {
        println!("JSON report saved to '{}'", json_path);
    }
    Ok(())
}
