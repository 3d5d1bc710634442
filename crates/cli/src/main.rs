//! Cart Discounts CLI - direct discount tools over cart snapshot files.
//!
//! # Usage
//!
//! ```bash
//! # Check a form without touching any cart
//! cd-cli validate --form form.yaml
//!
//! # Print the update that adds the form's discount to a cart
//! cd-cli add --cart cart.json --form form.yaml
//!
//! # Same, letting the form target shipping
//! cd-cli add --cart cart.json --form form.yaml --shipping-target
//!
//! # Print the update that removes one discount
//! cd-cli remove --cart cart.json --id 7f3c-direct
//!
//! # List the discounts applied to a cart
//! cd-cli list --cart cart.json
//! ```
//!
//! Input files are JSON, or YAML when they end in `.yaml`/`.yml`. Results are
//! written to stdout as JSON; logs go to stderr. Nothing is sent anywhere:
//! `add` and `remove` print the cart update they would send.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use cart_discounts_admin::PanelConfig;
use cart_discounts_admin::telemetry;
use clap::{Parser, Subcommand};

mod commands;
mod dry_run;
mod error;
mod input;

use error::CommandError;

const DEFAULT_LOG_FILTER: &str = "cart_discounts_admin=info,cart_discounts_cli=info";

#[derive(Parser)]
#[command(name = "cd-cli")]
#[command(author, version, about = "Cart direct discount tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a discount form
    Validate {
        /// Form file (JSON or YAML)
        #[arg(short, long)]
        form: PathBuf,
    },
    /// Build the update that adds the form's discount to a cart
    Add {
        /// Cart snapshot file (JSON or YAML)
        #[arg(short, long)]
        cart: PathBuf,

        /// Form file (JSON or YAML)
        #[arg(short, long)]
        form: PathBuf,

        /// Let the form target shipping (overrides `CART_DISCOUNTS_SHIPPING_TARGET`)
        #[arg(long)]
        shipping_target: bool,
    },
    /// Build the update that removes one discount from a cart
    Remove {
        /// Cart snapshot file (JSON or YAML)
        #[arg(short, long)]
        cart: PathBuf,

        /// Id of the direct discount to remove
        #[arg(short, long)]
        id: String,
    },
    /// List the direct discounts applied to a cart
    List {
        /// Cart snapshot file (JSON or YAML)
        #[arg(short, long)]
        cart: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match PanelConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .init();
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Keep guard alive for the whole run
    let _sentry_guard = telemetry::init_sentry(&config);
    telemetry::init_tracing(&config, DEFAULT_LOG_FILTER);

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &PanelConfig) -> Result<(), CommandError> {
    match cli.command {
        Commands::Validate { form } => commands::validate::run(&form).await,
        Commands::Add {
            cart,
            form,
            shipping_target,
        } => {
            let mut capabilities = config.capabilities;
            if shipping_target {
                capabilities.supports_shipping_target = true;
            }
            commands::discounts::add(&cart, &form, capabilities).await
        }
        Commands::Remove { cart, id } => {
            commands::discounts::remove(&cart, id.into(), config.capabilities).await
        }
        Commands::List { cart } => commands::discounts::list(&cart).await,
    }
}
