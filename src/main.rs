//! # NewsBot — broadcast dashboard
//!
//! Usage:
//!   newsbot serve                              # Start dashboard + API (default 127.0.0.1:3000)
//!   newsbot serve --port 8080                  # Custom port
//!   newsbot groups                             # Print subscriber groups
//!   newsbot schedule                           # Print the startup schedule
//!   newsbot schedule --text "Hi" --group vip --at "2026-03-01 09:00"
//!   newsbot config --init                      # Write a default config file

use anyhow::Result;
use clap::{Parser, Subcommand};
use newsbot_core::NewsBotConfig;
use newsbot_scheduler::{Dashboard, SubmitOutcome};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "newsbot", version, about = "📨 NewsBot — compose and schedule group broadcasts")]
struct Cli {
    /// Config file (default: ~/.newsbot/config.toml, or NEWSBOT_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard server
    Serve {
        /// Listen host (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List subscriber groups
    Groups,
    /// Show the schedule, optionally scheduling one broadcast first
    Schedule {
        /// Message text
        #[arg(long)]
        text: Option<String>,
        /// Target group id
        #[arg(long, default_value = "all")]
        group: String,
        /// Date and time to send at
        #[arg(long)]
        at: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write the defaults to the config path if no file exists
        #[arg(long)]
        init: bool,
    },
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .clone()
        .or_else(|| std::env::var("NEWSBOT_CONFIG").ok())
        .map(|p| PathBuf::from(shellexpand::tilde(&p).to_string()))
        .unwrap_or_else(NewsBotConfig::default_path)
}

fn load_config(path: &std::path::Path) -> Result<NewsBotConfig> {
    if path.exists() {
        Ok(NewsBotConfig::load_from(path)?)
    } else {
        Ok(NewsBotConfig::default())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "newsbot=debug,newsbot_scheduler=debug,newsbot_gateway=debug,tower_http=debug"
    } else {
        "newsbot=info,newsbot_scheduler=info,newsbot_gateway=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let path = config_path(&cli);
    let mut config = load_config(&path)?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            println!("📨 {} v{}", config.bot_name, env!("CARGO_PKG_VERSION"));
            println!("   🌐 Dashboard: http://{}:{}", config.gateway.host, config.gateway.port);
            println!("   📡 API:       http://{}:{}/api/v1/info", config.gateway.host, config.gateway.port);
            println!("   🔧 Config:    {}", path.display());
            println!();
            newsbot_gateway::start(config).await?;
        }
        Command::Groups => {
            let dashboard = Dashboard::from_config(&config);
            let registry = dashboard.registry();
            let total = registry.total_subscribers();
            for g in registry.list() {
                println!(
                    "{:<10} {:<18} {:>6}  {:>3}%  {}",
                    g.id,
                    g.name,
                    g.count,
                    g.share_of(total).round(),
                    g.color
                );
            }
        }
        Command::Schedule { text, group, at, json } => {
            let mut dashboard = Dashboard::from_config(&config);
            if let Some(text) = text {
                let form = dashboard.form_mut();
                form.set_text(&text);
                form.set_group(&group);
                form.set_datetime(at.as_deref().unwrap_or_default());
                match dashboard.submit()? {
                    SubmitOutcome::Scheduled(item) => {
                        tracing::info!("✅ Scheduled {} for {}", item.id, item.datetime)
                    }
                    SubmitOutcome::Declined => {
                        println!("⚠️  Nothing scheduled: text and --at are both required")
                    }
                }
            }

            let items = dashboard.store().list_all();
            if json {
                println!("{}", serde_json::to_string_pretty(items)?);
            } else {
                for item in items {
                    println!(
                        "{:<10} {:<16} {:<18} {}",
                        item.status.label(),
                        item.datetime,
                        item.group,
                        item.text
                    );
                }
            }
        }
        Command::Config { init } => {
            if init && !path.exists() {
                config.save_to(&path)?;
                println!("✅ Wrote default config to {}", path.display());
            }
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
