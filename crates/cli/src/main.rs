//! Bazaar CLI - terminal front end for the storefront.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered and sorted
//! bazaar products --search watch --category Wearables --sort price-desc
//!
//! # Write a static HTML page of the storefront
//! bazaar render --out shop.html
//!
//! # Manage the cart
//! bazaar cart add 1
//! bazaar cart show
//! bazaar cart checkout
//!
//! # Flip between light and dark
//! bazaar theme toggle
//!
//! # Interactive session, one UI event per line
//! bazaar session
//! ```
//!
//! # Commands
//!
//! - `products` - List the catalog
//! - `categories` - List catalog categories
//! - `render` - Render the storefront page to HTML
//! - `cart` - Show or change the cart
//! - `theme` - Show or toggle the theme
//! - `session` - Interactive storefront session

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use bazaar_core::{CartAction, ProductId, SortMode};
use bazaar_storefront::config::{LogFormat, StorefrontConfig};
use bazaar_storefront::display::DisplayOptions;
use bazaar_storefront::error::StorefrontError;
use bazaar_storefront::state::AppState;
use clap::{Args, Parser, Subcommand};
use prompt::{AssumeYes, Terminal};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod prompt;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar storefront")]
struct Cli {
    /// Directory holding the storage file (overrides `BAZAAR_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON catalog file (overrides `BAZAAR_CATALOG`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(DisplayArgs),
    /// List product categories
    Categories,
    /// Render the storefront page to an HTML file
    Render {
        /// Output file
        #[arg(short, long)]
        out: PathBuf,

        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
    /// Show or toggle the theme
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },
    /// Interactive session reading one UI event per line
    Session,
}

#[derive(Subcommand)]
enum CartCommand {
    /// Show cart contents and total
    Show {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add one unit of a product
    Add { id: ProductId },
    /// Increase a line's quantity
    Increase { id: ProductId },
    /// Decrease a line's quantity, removing it at zero
    Decrease { id: ProductId },
    /// Remove a line
    Remove { id: ProductId },
    /// Empty the cart
    Empty {
        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Check out
    Checkout,
}

#[derive(Subcommand)]
enum ThemeCommand {
    /// Show the active theme
    Show,
    /// Switch between light and dark
    Toggle,
}

/// Search, filter and sort arguments.
#[derive(Args)]
struct DisplayArgs {
    /// Case-insensitive name search
    #[arg(short, long, default_value = "")]
    search: String,

    /// Category to show, or `all`
    #[arg(short, long, default_value = "all")]
    category: String,

    /// Sort mode (`default`, `price-asc`, `price-desc`, `name-asc`, `name-desc`)
    #[arg(long, default_value = "default")]
    sort: String,
}

impl From<DisplayArgs> for DisplayOptions {
    fn from(args: DisplayArgs) -> Self {
        Self::default()
            .with_search(args.search)
            .with_category(args.category.as_str())
            .with_sort(SortMode::parse_lenient(&args.sort))
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.sentry_environment.clone().into()),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Initialize tracing on stderr so stdout carries only command output.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar=info,bazaar_storefront=info".into());

    let (text, json) = match format {
        LogFormat::Text => (
            Some(tracing_subscriber::fmt::layer().with_writer(io::stderr)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(tracing_subscriber::fmt::layer().json().with_writer(io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(text)
        .with(json)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env().map_err(StorefrontError::from);

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing(
        config
            .as_ref()
            .map_or_else(|_| LogFormat::default(), |c| c.log_format),
    );

    let result = config
        .map_err(Into::into)
        .and_then(|config| run(cli, config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli, mut config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }

    let mut state = AppState::new(config)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Products(display) => {
            commands::catalog::products(state.controller_mut(), display.into(), &mut out)?;
        }
        Commands::Categories => commands::catalog::categories(state.controller(), &mut out)?,
        Commands::Render { out: path, display } => {
            commands::catalog::render(state.controller_mut(), display.into(), &path, &mut out)?;
        }
        Commands::Cart { action } => {
            let ctl = state.controller_mut();
            match action {
                CartCommand::Show { json } => commands::cart::show(ctl, json, &mut out)?,
                CartCommand::Add { id } => {
                    commands::cart::add(ctl, id, &mut AssumeYes::new(&mut out))?;
                }
                CartCommand::Increase { id } => {
                    let console = &mut AssumeYes::new(&mut out);
                    commands::cart::line(ctl, id, CartAction::INCREASE, console)?;
                }
                CartCommand::Decrease { id } => {
                    let console = &mut AssumeYes::new(&mut out);
                    commands::cart::line(ctl, id, CartAction::DECREASE, console)?;
                }
                CartCommand::Remove { id } => {
                    let console = &mut AssumeYes::new(&mut out);
                    commands::cart::line(ctl, id, CartAction::Remove, console)?;
                }
                CartCommand::Empty { yes: true } => {
                    commands::cart::empty(ctl, &mut AssumeYes::new(&mut out))?;
                }
                CartCommand::Empty { yes: false } => {
                    commands::cart::empty(ctl, &mut Terminal::new(io::stdin().lock(), &mut out))?;
                }
                CartCommand::Checkout => {
                    commands::cart::checkout(ctl, &mut AssumeYes::new(&mut out))?;
                }
            }
        }
        Commands::Theme { action } => match action {
            ThemeCommand::Show => commands::theme::show(state.controller(), &mut out)?,
            ThemeCommand::Toggle => commands::theme::toggle(state.controller_mut(), &mut out)?,
        },
        Commands::Session => {
            let mut terminal = Terminal::new(io::stdin().lock(), out);
            commands::session::run(state.controller_mut(), &mut terminal)?;
        }
    }

    Ok(())
}
