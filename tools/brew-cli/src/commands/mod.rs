//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod favorites;
pub mod menu;
pub mod rewards;

use clap::{Args, Subcommand};

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Only show one category (hot, iced, seasonal).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only show drinks whose name contains this text.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show best sellers.
    #[arg(long)]
    pub best_sellers: bool,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product id from `brewspot menu`.
    pub product: String,

    /// Cup size (S, M, L).
    #[arg(short, long, default_value = "M")]
    pub size: String,

    /// Milk choice.
    #[arg(short, long, default_value = brew_commerce::cart::DEFAULT_MILK)]
    pub milk: String,

    /// Add-on id (repeatable).
    #[arg(short, long = "addon")]
    pub addons: Vec<String>,

    /// Number of drinks.
    #[arg(short, long, default_value = "1")]
    pub quantity: i64,
}

/// Arguments for the qty command.
#[derive(Args)]
pub struct QuantityArgs {
    /// Line id (or a prefix of it) from `brewspot cart`.
    pub item: String,

    /// New quantity. Zero or less removes the line.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Line id (or a prefix of it) from `brewspot cart`.
    pub item: String,
}

/// Arguments for the fav command.
#[derive(Args)]
pub struct FavArgs {
    /// Product id to toggle.
    pub product: String,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub street: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub zip: Option<String>,

    /// Card number.
    #[arg(long)]
    pub card: Option<String>,

    /// Card expiry (MM/YY).
    #[arg(long)]
    pub expiry: Option<String>,

    #[arg(long)]
    pub cvc: Option<String>,

    /// Never prompt; fail on missing fields instead.
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the rewards command.
#[derive(Args)]
pub struct RewardsArgs {
    #[command(subcommand)]
    pub command: Option<RewardsCommand>,
}

#[derive(Subcommand)]
pub enum RewardsCommand {
    /// Show balance and reward tiers.
    Show,
    /// Redeem a reward.
    Redeem {
        /// Reward id or title.
        reward: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
