mod error;
mod open;

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hackernews_client::HackerNewsClient;
use hntop_core::{Config, HackerNews};

use crate::error::{CliError, Result};

/// List the Hacker News top stories, or open one of the last listed stories by its index.
#[derive(Debug, Parser)]
#[command(name = "hntop", version)]
struct Args {
    /// Index of a story in the last listing. Without it the top stories are fetched and listed.
    #[arg(allow_negative_numbers = true)]
    index: Option<i64>,

    /// Config file, defaults to $HNTOP_CONFIG or ~/.hntoprc
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();

    let result = match init_logger().map_err(report("Could not set up logging")) {
        Ok(()) => run(args).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Exiting with error: {:?}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Logs go to stderr, stdout is reserved for the listing.
fn init_logger() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy()
        .add_directive("hyper::proto=info".parse()?)
        .add_directive("hyper::client=info".parse()?)
        .add_directive("reqwest=info".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config_path = match args.config {
        Some(path) => path,
        None => Config::default_path().map_err(report("Could not get path to config file"))?,
    };
    let config = Config::load_or_create(&config_path).map_err(report("Could not read config file"))?;
    let hn = HackerNews::new(&config).map_err(report("Could not set up the Hacker News client"))?;

    match args.index {
        None => show_top_stories(&hn, &config).await,
        Some(index) => open_story_by_index(&hn, &config, &config_path, index).await,
    }
}

async fn show_top_stories(hn: &HackerNews<HackerNewsClient>, config: &Config) -> Result<()> {
    println!("Loading Hacker News Top Stories...");

    let stories = match hn.fetch_top_stories_and_cache().await {
        Ok(stories) => stories,
        Err(e) => {
            let e = CliError::from(e);
            eprintln!("Could not list top stories");
            eprintln!("Error: {}", e);
            if e.is_network() {
                eprintln!("Is {} reachable?", config.api_base_url);
            }
            return Err(e);
        }
    };

    for story in stories.iter() {
        println!("{:>2}: {}", story.index, story.title);
    }
    Ok(())
}

async fn open_story_by_index(
    hn: &HackerNews<HackerNewsClient>,
    config: &Config,
    config_path: &Path,
    index: i64,
) -> Result<()> {
    let story = hn
        .get_cached_story_by_index(index)
        .await
        .map_err(report("Could not get story"))?;

    println!("Story: {}\n  Date: {}\n  Url: {}", story.title, story.date, story.url);
    open::open_url(config, config_path, &story.url)
        .await
        .map_err(|e| {
            eprintln!("Could not run the open command");
            eprintln!("Error: {}", e);
            e
        })
}

/// Print `message` and the error to stderr before passing the error on.
fn report<E: Into<CliError>>(message: &'static str) -> impl FnOnce(E) -> CliError {
    move |e| {
        let e = e.into();
        eprintln!("{}", message);
        eprintln!("Error: {}", e);
        e
    }
}
