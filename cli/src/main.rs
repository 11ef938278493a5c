//! Loyalty Widgets CLI - drive the admin widgets from a terminal.

mod commands;
mod ui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use loyalty_widgets_core::constants::{DEFAULT_PAGE_URL, DEFAULT_QR_SIZE};
use loyalty_widgets_core::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loyalty-widgets")]
#[command(about = "Loyalty admin count label and two-factor QR widgets", long_about = None)]
struct Cli {
    /// Admin page the widgets are embedded in
    #[arg(short, long, global = true, default_value = DEFAULT_PAGE_URL)]
    page_url: String,

    /// Log widget activity at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the record count for a list query
    Count {
        /// Query string of the list page, e.g. "?flt1_0=vip&page=2"
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Render a two-factor enrollment QR code
    Qr {
        /// Account email shown in the authenticator
        #[arg(short, long)]
        email: String,

        /// Shared TOTP secret
        #[arg(short, long)]
        secret: String,

        /// Issuer domain (defaults to the page URL's host)
        #[arg(short, long)]
        domain: Option<String>,

        /// Code edge length in pixels
        #[arg(long, default_value_t = DEFAULT_QR_SIZE)]
        size: u32,

        /// Also write the code as an SVG file
        #[arg(long)]
        svg: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("loyalty_widgets={}", level).parse()?)
                .add_directive(format!("loyalty_widgets_core={}", level).parse()?)
                .add_directive("hyper=warn".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    let mut config = Config {
        page_url: cli.page_url,
        ..Config::default()
    };

    match cli.command {
        Commands::Count { query } => commands::run_count(&config, &query).await?,
        Commands::Qr {
            email,
            secret,
            domain,
            size,
            svg,
        } => {
            config.qr_size = size;
            commands::run_qr(&config, &email, &secret, domain, svg)?
        }
    }

    Ok(())
}
