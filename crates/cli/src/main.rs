//! Appliance Store CLI - terminal console for the store backend.
//!
//! # Usage
//!
//! ```bash
//! # Log in (password from --password or STORE_PASSWORD)
//! store-cli login -e ana@tienda.bo
//!
//! # Shop
//! store-cli catalog products --available
//! store-cli cart add 5 --qty 2
//! store-cli cart checkout --name "Luis Perez" --email luis@correo.bo \
//!     --address "Av. Banzer 123" --phone 70000000
//!
//! # Register a counter sale (administrators)
//! store-cli sales register --customer 4 --item 5:2 --item 7:1
//!
//! # Forecast for the next six months
//! store-cli analytics forecast --months 6
//! ```
//!
//! # Commands
//!
//! - `login`, `logout`, `whoami`, `register`, `password-reset` - Session
//! - `cart` - Local shopping cart and checkout
//! - `catalog` - Products, categories, warehouses and stock
//! - `customers`, `accounts` - People (administrators only)
//! - `sales` - History, registration and receipts (administrators only)
//! - `analytics` - Forecasts and trends (administrators only)
//! - `notices` - Customer notices (administrators only)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use appliance_store_client::{ApiError, ClientConfig};
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;
mod error;
mod output;

use commands::{
    AccountAction, AnalyticsAction, CartAction, CatalogAction, CustomerAction, NoticeAction,
    PasswordResetAction, SaleAction,
};
use context::App;
use error::CliError;

#[derive(Parser)]
#[command(name = "store-cli")]
#[command(author, version, about = "Appliance Store console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(long, env = "STORE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Create a customer account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(long, env = "STORE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Recover a forgotten password
    PasswordReset {
        #[command(subcommand)]
        action: PasswordResetAction,
    },
    /// Shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Catalog and inventory
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Customer management
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Login accounts
    Accounts {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Sales
    Sales {
        #[command(subcommand)]
        action: SaleAction,
    },
    /// Predictions and trends
    Analytics {
        #[command(subcommand)]
        action: AnalyticsAction,
    },
    /// Customer notices
    Notices {
        #[command(subcommand)]
        action: NoticeAction,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::debug!("Sentry initialized");
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

#[tokio::main]
async fn main() {
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt().with_writer(std::io::stderr).init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };

    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output can be piped.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "appliance_store_cli=info,appliance_store_client=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match App::from_config(config) {
        Ok(app) => run(&app, cli, &mut out).await,
        Err(e) => Err(e),
    };
    if let Err(e) = out.flush() {
        tracing::warn!(error = %e, "Failed to flush output");
    }

    if let Err(e) = result {
        match &e {
            CliError::Api(ApiError::Unauthorized {
                redirect_to_login: true,
            })
            | CliError::LoginRequired => {
                tracing::error!("{e}. Run `store-cli login` first.");
            }
            _ => tracing::error!("Command failed: {e}"),
        }
        std::process::exit(1);
    }
}

async fn run(app: &App, cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(app, &email, password, out).await
        }
        Commands::Logout => commands::auth::logout(app, out),
        Commands::Whoami => commands::auth::whoami(app, out),
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
        } => commands::auth::register(app, first_name, last_name, &email, password, out).await,
        Commands::PasswordReset { action } => commands::auth::password_reset(app, action, out).await,
        Commands::Cart { action } => commands::cart::run(app, action, out).await,
        Commands::Catalog { action } => commands::catalog::run(app, action, out).await,
        Commands::Customers { action } => commands::customers::run(app, action, out).await,
        Commands::Accounts { action } => commands::customers::run_accounts(app, action, out).await,
        Commands::Sales { action } => commands::sales::run(app, action, out).await,
        Commands::Analytics { action } => commands::analytics::run(app, action, out).await,
        Commands::Notices { action } => commands::notices::run(app, action, out).await,
    }
}
