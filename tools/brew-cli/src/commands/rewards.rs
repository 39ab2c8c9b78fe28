//! Rewards command.

use anyhow::Result;
use brew_commerce::rewards::{find_reward, RewardsAccount, REWARDS};
use console::style;
use serde_json::json;

use super::{RewardsArgs, RewardsCommand};
use crate::context::Context;
use crate::output::progress_bar;

/// Run the rewards command.
pub async fn run(args: RewardsArgs, ctx: &Context) -> Result<()> {
    let account = ctx.rewards();
    match args.command.unwrap_or(RewardsCommand::Show) {
        RewardsCommand::Show => show(&account, ctx),
        RewardsCommand::Redeem { reward } => redeem(account, &reward, ctx),
    }
}

fn show(account: &RewardsAccount, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        let tiers: Vec<_> = REWARDS
            .iter()
            .map(|r| json!({ "reward": r, "unlocked": account.is_unlocked(r) }))
            .collect();
        ctx.output.json(&json!({
            "points": account.points,
            "nextReward": account.next_reward,
            "progressPercent": account.progress_percent(),
            "rewards": tiers,
        }));
        return Ok(());
    }

    ctx.output.header("BrewPoints");
    ctx.output.kv("available", &format!("{} pts", account.points));
    ctx.output.kv(
        "next reward",
        &format!(
            "{} {} / {} pts",
            progress_bar(account.progress_percent(), 30),
            account.points,
            account.next_reward
        ),
    );
    match account.points_to_next() {
        0 => ctx.output.success("You can claim a free drink!"),
        left => ctx
            .output
            .info(&format!("Just {} points away from a free drink!", left)),
    }

    ctx.output.header("Rewards");
    for reward in REWARDS.iter() {
        let status = if account.is_unlocked(reward) {
            style("unlocked").green().to_string()
        } else {
            style("locked").dim().to_string()
        };
        ctx.output.table_row(
            &[
                reward.id,
                reward.title,
                &format!("{} pts", reward.cost),
                &status,
            ],
            &[14, 20, 9, 8],
        );
        ctx.output.kv("details", reward.description);
    }
    Ok(())
}

fn redeem(mut account: RewardsAccount, key: &str, ctx: &Context) -> Result<()> {
    let reward = find_reward(key)?;
    let remaining = account.redeem(reward)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "redeemed": reward, "points": remaining }));
        return Ok(());
    }
    ctx.output
        .success(&format!("Redeemed {} for {} pts", reward.title, reward.cost));
    ctx.output.kv("remaining", &format!("{} pts", remaining));
    Ok(())
}
