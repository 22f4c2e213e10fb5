use std::io::{stdout, Read};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use tk_core::categories::find_category;
use tk_feed::{spawn_poller, FeedController, FeedEvent, FeedView, Phase, RefreshOutcome};
use tk_inference::{create_fetcher, Config, FetcherKind, DEFAULT_BASE_URL, DEFAULT_MODEL};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

mod logging;
mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Live news feed built from a grounded search model", long_about = None)]
pub struct Cli {
    /// Backend used to fetch stories
    #[arg(long, value_enum, default_value = "gemini", global = true)]
    fetcher: FetcherKind,
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    #[arg(long, default_value = DEFAULT_MODEL, global = true)]
    model: String,
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,
    /// Region the stories should come from
    #[arg(long, default_value = "Nigeria", global = true)]
    region: String,
    /// Latency of the mock backend (e.g. 500ms, 2s)
    #[arg(long, default_value = "1s", value_parser = humantime::parse_duration, global = true)]
    mock_delay: Duration,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the feed over HTTP, refreshing in the background
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
        /// Refresh interval (e.g. 5m, 1h, 90s)
        #[arg(long, default_value = "5m", value_parser = humantime::parse_duration)]
        interval: Duration,
    },
    /// Run a single fetch cycle and print the feed
    Fetch {
        #[arg(long)]
        category: Option<String>,
        /// Print the feed as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Keep the feed on screen, redrawing on every update
    Watch {
        #[arg(long, default_value = "5m", value_parser = humantime::parse_duration)]
        interval: Duration,
        #[arg(long)]
        category: Option<String>,
    },
    /// Parse a saved model response (file or stdin) and print the records
    Parse {
        path: Option<PathBuf>,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            api_key: self.api_key.clone(),
            model_name: self.model.clone(),
            base_url: self.base_url.clone(),
            region: self.region.clone(),
            mock_delay: self.mock_delay,
            ..Config::default()
        }
    }

    fn controller(&self) -> anyhow::Result<Arc<FeedController>> {
        let fetcher = create_fetcher(self.fetcher, self.config())?;
        Ok(Arc::new(FeedController::new(fetcher)))
    }
}

fn select_category(controller: &FeedController, id: Option<&str>) -> anyhow::Result<()> {
    if let Some(id) = id {
        let category = find_category(id).with_context(|| format!("unknown category: {}", id))?;
        controller.select_category(category.id);
    }
    Ok(())
}

fn draw(view: &FeedView, clear_first: bool) -> anyhow::Result<()> {
    let mut out = stdout().lock();
    if clear_first {
        render::clear(&mut out)?;
    }
    render::render_feed(&mut out, view)?;
    Ok(())
}

async fn fetch_once(controller: Arc<FeedController>, category: Option<String>, json: bool) -> anyhow::Result<()> {
    select_category(&controller, category.as_deref())?;
    let outcome = controller.refresh().await;

    let state = controller.snapshot();
    let view = FeedView::from_state(&state);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        draw(&view, false)?;
    }

    if outcome == RefreshOutcome::Completed(Phase::Error) {
        bail!(state.error.unwrap_or_default());
    }
    Ok(())
}

fn handle_input(controller: &Arc<FeedController>, line: &str) -> bool {
    let event = match line {
        "" => return true,
        "q" | "quit" => return false,
        "r" | "refresh" => FeedEvent::Refresh,
        "retry" => FeedEvent::Retry,
        "m" | "menu" => FeedEvent::ToggleMenu,
        other => match find_category(other) {
            Some(category) => FeedEvent::SelectCategory(category.id.to_string()),
            None => {
                warn!("Unknown command or category: {}", other);
                return true;
            }
        },
    };

    // refreshes run in the background so the screen keeps updating
    let controller = controller.clone();
    tokio::spawn(async move {
        controller.handle(event).await;
    });
    true
}

async fn watch(controller: Arc<FeedController>, interval: Duration, category: Option<String>) -> anyhow::Result<()> {
    select_category(&controller, category.as_deref())?;
    let poller = spawn_poller(controller.clone(), interval);

    let mut rx = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let view = FeedView::from_state(&rx.borrow_and_update());
    draw(&view, true)?;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = FeedView::from_state(&rx.borrow_and_update());
                draw(&view, true)?;
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => {
                        if !handle_input(&controller, line.trim()) {
                            break;
                        }
                    }
                    None => stdin_open = false,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    poller.abort();
    Ok(())
}

fn parse_file(path: Option<PathBuf>) -> anyhow::Result<()> {
    let text = match &path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let report = tk_core::parse_report(&text);
    info!("Parsed {} articles, dropped {} chunks", report.articles.len(), report.dropped);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Commands::Serve { addr, interval } => {
            let controller = cli.controller()?;
            let _poller = spawn_poller(controller.clone(), *interval);
            tk_web::serve(*addr, tk_web::AppState::new(controller)).await?;
        }
        Commands::Fetch { category, json } => {
            fetch_once(cli.controller()?, category.clone(), *json).await?;
        }
        Commands::Watch { interval, category } => {
            watch(cli.controller()?, *interval, category.clone()).await?;
        }
        Commands::Parse { path } => parse_file(path.clone())?,
    }

    Ok(())
}
