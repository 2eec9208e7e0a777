//! Dashboard router CLI.
//!
//! Inspects a route table and drives a headless dispatcher over an
//! in-memory document.
//!
//! ```text
//!   routes.toml ──▶ config ──▶ shell::Session (Dispatcher + MemoryHost)
//!        ▲                        ▲
//!        │ (watch)                │ push / replace / back / forward
//!   ConfigWatcher             shell input
//! ```

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use dashboard_router::config::watcher::ConfigWatcher;
use dashboard_router::config::{load_config, RouterConfig};
use dashboard_router::dispatch::Dispatcher;
use dashboard_router::observability::logging::init_logging;
use dashboard_router::routing::{Location, Params};
use dashboard_router::shell::{Session, ShellCommand, ShellError};
use dashboard_router::views::Page;

#[derive(Parser)]
#[command(name = "dashboard-router")]
#[command(about = "Route table tooling for the crawler dashboard", long_about = None)]
struct Cli {
    /// Route table file (TOML). Defaults to the built-in dashboard table.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route table and print it
    Check,
    /// Show which view each location would mount
    Resolve {
        #[arg(required = true)]
        locations: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Build the path of a named route
    Href {
        name: String,

        /// Parameters as KEY=VALUE
        params: Vec<String>,
    },
    /// Navigate interactively over an in-memory document
    Shell {
        /// Reload the route table when the config file changes
        #[arg(long)]
        watch: bool,

        /// Initial location
        #[arg(long, default_value = "/")]
        initial: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    init_logging(&config.observability)?;

    tracing::info!(
        config = ?cli.config,
        routes = config.routes.len(),
        mount_node = %config.mount_node,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Check => {
            let dispatcher = config.build_dispatcher()?;
            print_table(&dispatcher);
        }
        Commands::Resolve { locations, json } => {
            let dispatcher = config.build_dispatcher()?;
            let resolutions: Vec<_> = locations
                .iter()
                .map(|raw| dispatcher.resolve(&Location::parse(raw)))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&resolutions)?);
            } else {
                for r in &resolutions {
                    println!("{} -> {} ({}){}", r.location, r.view, r.route, format_params(&r.params));
                }
            }
        }
        Commands::Href { name, params } => {
            let dispatcher = config.build_dispatcher()?;
            let params = parse_params(&params)?;
            println!("{}", dispatcher.href(&name, &params)?);
        }
        Commands::Shell { watch, initial } => {
            run_shell(config, cli.config.as_deref(), watch, &initial).await?;
        }
    }

    Ok(())
}

async fn run_shell(
    config: RouterConfig,
    path: Option<&Path>,
    watch: bool,
    initial: &str,
) -> Result<(), Box<dyn Error>> {
    let mut session = Session::start(&config, initial)?;
    print_session(&session);

    // Held open so `recv` pends forever when not watching.
    let (_idle_tx, mut updates) = mpsc::unbounded_channel::<RouterConfig>();
    let _watcher = match (watch, path) {
        (true, Some(path)) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            updates = rx;
            Some(watcher.run()?)
        }
        (true, None) => return Err("--watch requires --config".into()),
        (false, _) => None,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match ShellCommand::parse(&line) {
                    ShellCommand::Quit => break,
                    ShellCommand::Empty => {}
                    ShellCommand::Usage(usage) => println!("usage: {}", usage),
                    command => {
                        if session.navigate(&command)?.is_some() {
                            print_session(&session);
                        } else {
                            println!("(no history entry in that direction)");
                        }
                    }
                }
            }
            Some(new_config) = updates.recv() => {
                match session.reload(&new_config).map(|_| ()) {
                    Ok(()) => print_session(&session),
                    Err(e @ ShellError::Rejected(_)) => {
                        tracing::error!(error = %e, "Reloaded route table rejected, keeping current one");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    session.stop()?;
    Ok(())
}

fn print_table(dispatcher: &Dispatcher<Page>) {
    for (index, route) in dispatcher.table().routes().iter().enumerate() {
        println!(
            "{:>2}  {:<16} {:<12} {}{}",
            index,
            route.pattern().as_str(),
            route.view(),
            route.name().unwrap_or("-"),
            if route.is_default() { " (default)" } else { "" }
        );
    }
    let fallback = dispatcher.table().fallback();
    println!(
        " *  {:<16} {:<12} {}",
        "(fallback)",
        fallback.view(),
        fallback.name().unwrap_or("-")
    );
}

fn print_session(session: &Session) {
    let Some(mounted) = session.mounted() else {
        return;
    };
    println!(
        "[{}] {} ({}){}",
        mounted.view(),
        mounted.location(),
        mounted.route(),
        format_params(mounted.params())
    );
    if let Some(content) = session.content() {
        println!("  {}", content);
    }
}

fn format_params(params: &Params) -> String {
    params
        .iter()
        .map(|(name, value)| format!(" {}={}", name, value))
        .collect()
}

fn parse_params(raw: &[String]) -> Result<Params, Box<dyn Error>> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .ok_or_else(|| Box::<dyn Error>::from(format!("expected KEY=VALUE, got `{}`", pair)))
        })
        .collect()
}
