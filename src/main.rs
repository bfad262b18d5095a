//! Wordsmith main entry point
//!
//! This is the command-line interface for the Wordsmith wordlist builder.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use wordsmith::config::{load_config, parse_seed_url, Config};
use wordsmith::output::{default_output_path, print_statistics, write_wordlist};
use wordsmith::{CrawlBudget, Crawler};

/// Wordsmith: build a wordlist by crawling a website
///
/// Wordsmith crawls a site from a seed URL, extracts the visible text of every
/// page it reaches and writes the unique words to a file, ready for content
/// discovery and brute-forcing.
#[derive(Parser, Debug)]
#[command(name = "wordsmith")]
#[command(version)]
#[command(about = "Build a wordlist by crawling a website", long_about = None)]
struct Cli {
    /// URL to scrape words from
    #[arg(short, long)]
    url: Option<String>,

    /// File to write the wordlist to
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Depth to crawl [default: 3]
    #[arg(long)]
    depth: Option<u32>,

    /// Maximum number of pages to crawl [default: unlimited]
    #[arg(long)]
    max_pages: Option<u32>,

    /// Number of concurrent requests [default: 10]
    #[arg(short, long)]
    threads: Option<u32>,

    /// Words must be longer than this [default: 3]
    #[arg(long)]
    min_length: Option<usize>,

    /// Words must be shorter than this [default: 256]
    #[arg(long)]
    max_length: Option<usize>,

    /// Milliseconds between requests to the same host [default: 100]
    #[arg(long)]
    delay: Option<u64>,

    /// Timeout for each request in seconds [default: 15]
    #[arg(long)]
    timeout: Option<u64>,

    /// Extra attempts for a failed request [default: 1]
    #[arg(long)]
    retries: Option<u32>,

    /// Username for basic auth
    #[arg(long)]
    user: Option<String>,

    /// Password for basic auth
    #[arg(long)]
    pass: Option<String>,

    /// User-Agent to send
    #[arg(short, long)]
    agent: Option<String>,

    /// Follow links to other hosts
    #[arg(short, long)]
    external: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Do not log anything but errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Layers command-line flags over the file (or default) configuration
    fn apply(self, mut config: Config) -> Config {
        if self.url.is_some() {
            config.url = self.url;
        }
        if let Some(output) = self.output {
            config.output = Some(output.to_string_lossy().into_owned());
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if self.max_pages.is_some() {
            config.max_pages = self.max_pages;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(min_length) = self.min_length {
            config.min_length = min_length;
        }
        if let Some(max_length) = self.max_length {
            config.max_length = max_length;
        }
        if let Some(delay) = self.delay {
            config.delay = delay;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(retries) = self.retries {
            config.retries = retries;
        }
        if self.user.is_some() {
            config.user = self.user;
        }
        if self.pass.is_some() {
            config.pass = self.pass;
        }
        if let Some(agent) = self.agent {
            config.user_agent = agent;
        }
        if self.external {
            config.follow_external = true;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let started = Instant::now();
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);
    let quiet = cli.quiet;

    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };
    let config = cli.apply(file_config);

    // Configuration errors are fatal before any request is sent
    let seed = parse_seed_url(config.url.as_deref())?;
    let budget = CrawlBudget::from_config(&config)?;

    let crawler = Crawler::new(budget).context("Failed to initialize crawler")?;

    let stop = crawler.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing in-flight pages");
            stop.stop();
        }
    });

    let report = crawler
        .crawl(seed.clone())
        .await
        .context("Crawl failed")?;

    let output = config
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(&seed, chrono::Local::now()));

    println!("\n[+] Crawl finished, writing to file: {}\n", output.display());

    let written = write_wordlist(&output, &report.words)
        .with_context(|| format!("Failed to write wordlist to {}", output.display()))?;
    tracing::info!("Wrote {} words to {}", written, output.display());

    if !quiet {
        print_statistics(&report.stats, report.elapsed);
    }

    println!(
        "\n[+] Execution time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wordsmith=info,warn"),
            1 => EnvFilter::new("wordsmith=debug,info"),
            2 => EnvFilter::new("wordsmith=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
