//! BrewSpot CLI - order coffee from the terminal.
//!
//! Commands:
//! - `brewspot menu` - Browse the menu
//! - `brewspot add` - Add a customized drink to the cart
//! - `brewspot cart` - Show the cart
//! - `brewspot qty` / `remove` / `clear` - Edit the cart
//! - `brewspot fav` / `favs` - Toggle and list favorites
//! - `brewspot checkout` - Place the order
//! - `brewspot rewards` - Loyalty points
//! - `brewspot config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AddArgs, CheckoutArgs, ConfigArgs, FavArgs, MenuArgs, QuantityArgs, RemoveArgs, RewardsArgs,
};

/// BrewSpot - artisan coffee, ordered from your shell
#[derive(Parser)]
#[command(name = "brewspot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the menu
    Menu(MenuArgs),

    /// Add a drink to the cart
    Add(AddArgs),

    /// Show the cart
    Cart,

    /// Change the quantity of a cart line
    Qty(QuantityArgs),

    /// Remove a cart line
    Remove(RemoveArgs),

    /// Empty the cart
    Clear,

    /// Toggle a favorite
    Fav(FavArgs),

    /// List favorites
    Favs,

    /// Check out the cart
    Checkout(CheckoutArgs),

    /// Loyalty points and rewards
    Rewards(RewardsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Menu(args) => commands::menu::run(args, &ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Cart => commands::cart::show(&ctx).await,
        Commands::Qty(args) => commands::cart::quantity(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Clear => commands::cart::clear(&ctx).await,
        Commands::Fav(args) => commands::favorites::toggle(args, &ctx).await,
        Commands::Favs => commands::favorites::list(&ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Rewards(args) => commands::rewards::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
