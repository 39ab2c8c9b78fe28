//! Configuration management commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, BrewConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    // Storage section
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());

    // Checkout section
    ctx.output.info("[checkout]");
    ctx.output.kv(
        "settlement_latency_ms",
        &ctx.config.checkout.settlement_latency_ms.to_string(),
    );
    ctx.output.kv(
        "settlement_timeout_ms",
        &ctx.config.checkout.settlement_timeout_ms.to_string(),
    );

    // Catalog section
    ctx.output.info("[catalog]");
    match ctx.config.catalog.path {
        Some(ref path) => ctx.output.kv("path", path),
        None => ctx.output.kv("path", "(built-in menu)"),
    }

    // Rewards section
    ctx.output.info("[rewards]");
    ctx.output.kv("points", &ctx.config.rewards.points.to_string());
    ctx.output.kv("next_reward", &ctx.config.rewards.next_reward.to_string());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = match ctx.config_path {
        Some(ref path) => path.clone(),
        None => find_config_file(&ctx.cwd)?,
    };
    let config_path = config_path.to_string_lossy().to_string();

    let mut config = BrewConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(ctx);

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect `(errors, warnings)` for the loaded configuration.
fn check_config(ctx: &Context) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let checkout = &ctx.config.checkout;

    // Check settlement timing
    if checkout.settlement_timeout_ms == 0 {
        errors.push("checkout.settlement_timeout_ms must be greater than 0".to_string());
    } else if checkout.settlement_latency_ms >= checkout.settlement_timeout_ms {
        warnings.push(format!(
            "checkout.settlement_latency_ms ({}) is not below settlement_timeout_ms ({}); every payment will time out",
            checkout.settlement_latency_ms, checkout.settlement_timeout_ms
        ));
    }

    // Check rewards
    if ctx.config.rewards.next_reward == 0 {
        warnings.push("rewards.next_reward is 0; progress always shows 100%".to_string());
    }

    // Check the menu file
    if ctx.config.catalog.path.is_some() {
        if let Err(e) = ctx.catalog() {
            errors.push(format!("catalog.path: {:#}", e));
        }
    }

    // Check storage
    let dir = ctx.storage_dir();
    if dir.is_file() {
        errors.push(format!("storage.dir {} is a file", dir.display()));
    }

    (errors, warnings)
}

fn get_config_value(config: &BrewConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["storage", "dir"] => Ok(config.storage.dir.clone().unwrap_or_default()),
        ["checkout", "settlement_latency_ms"] => {
            Ok(config.checkout.settlement_latency_ms.to_string())
        }
        ["checkout", "settlement_timeout_ms"] => {
            Ok(config.checkout.settlement_timeout_ms.to_string())
        }
        ["catalog", "path"] => Ok(config.catalog.path.clone().unwrap_or_default()),
        ["rewards", "points"] => Ok(config.rewards.points.to_string()),
        ["rewards", "next_reward"] => Ok(config.rewards.next_reward.to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut BrewConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["storage", "dir"] => config.storage.dir = Some(value.to_string()),
        ["checkout", "settlement_latency_ms"] => {
            config.checkout.settlement_latency_ms = value.parse()?
        }
        ["checkout", "settlement_timeout_ms"] => {
            config.checkout.settlement_timeout_ms = value.parse()?
        }
        ["catalog", "path"] => config.catalog.path = Some(value.to_string()),
        ["rewards", "points"] => config.rewards.points = value.parse()?,
        ["rewards", "next_reward"] => config.rewards.next_reward = value.parse()?,
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn find_config_file(cwd: &Path) -> Result<PathBuf> {
    for name in &CONFIG_NAMES {
        let path = cwd.join(name);
        if path.exists() {
            return Ok(path);
        }
    }
    bail!("No config file found. Run `brewspot config init` to create one.")
}
