use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "playlist-scroll")]
#[command(about = "Scrolls a YouTube playlist to the end and saves every video title")]
#[command(version)]
pub struct Args {
    /// Playlist URL (defaults to the configured or built-in playlist)
    pub url: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run the browser without a window
    #[arg(long, conflicts_with = "show")]
    pub headless: bool,

    /// Show the browser window
    #[arg(long)]
    pub show: bool,

    /// Override the WebDriver server URL
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Maximum number of scroll rounds
    #[arg(long)]
    pub max_scrolls: Option<usize>,

    /// Seconds to wait for the first playlist entry
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Read a saved HTML page instead of driving a browser
    #[arg(long, value_name = "FILE")]
    pub from_html: Option<PathBuf>,

    /// Also write a JSON report to this path
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,
}

impl Args {
    /// Headless choice from the flags, `None` when neither flag was given
    pub fn window_mode(&self) -> Option<bool> {
        if self.headless {
            Some(true)
        } else if self.show {
            Some(false)
        } else {
            None
        }
    }
}

/// Asks whether to run headless; an answer starting with `b` means yes
pub fn prompt_headless() -> io::Result<bool> {
    print!("Run in background (faster) or show browser window? (b/s): ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(parse_window_answer(&answer))
}

pub fn parse_window_answer(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with('b')
}
