//! Checkout command.

use anyhow::{bail, Context as _, Result};
use brew_commerce::checkout::{
    CancellationToken, CheckoutFlow, OrderConfirmation, PaymentDetails, ShippingDetails,
    SimulatedGateway,
};
use dialoguer::{Confirm, Input, Password};

use super::CheckoutArgs;
use crate::commands::cart::print_cart;
use crate::context::Context;
use crate::output::format_timestamp;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    if store.cart.is_empty() {
        bail!("Your cart is empty. Add something with `brewspot add` first.");
    }

    let interactive = !args.no_input && !ctx.output.is_json() && console::user_attended();
    let mut flow =
        CheckoutFlow::new().with_settlement_timeout(ctx.config.checkout.settlement_timeout());

    if !ctx.output.is_json() {
        print_cart(&store.cart, ctx);
    }

    // Step 1: shipping
    ctx.output.step(flow.step());
    let shipping = ShippingDetails {
        first_name: field("First name", args.first_name, interactive)?,
        last_name: field("Last name", args.last_name, interactive)?,
        email: email_field(args.email, interactive)?,
        street: field("Street address", args.street, interactive)?,
        city: field("City", args.city, interactive)?,
        zip: field("Zip code", args.zip, interactive)?,
    };
    flow.submit_shipping(shipping)?;

    // Step 2: payment
    ctx.output.step(flow.step());
    let payment = PaymentDetails::new(
        field("Card number", args.card, interactive)?,
        field("Expiry (MM/YY)", args.expiry, interactive)?,
        secret_field("CVC", args.cvc, interactive)?,
    );
    payment.validate()?;

    let total = store.cart.total();
    if interactive
        && !Confirm::new()
            .with_prompt(format!("Pay {} with card ending {}?", total.display(), payment.last4()))
            .default(true)
            .interact()?
    {
        ctx.output.info("Checkout cancelled. Your cart is unchanged.");
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let gateway = SimulatedGateway::new(ctx.config.checkout.settlement_latency());
    ctx.output.debug(&format!(
        "Settling {} (latency {:?}, timeout {:?})",
        total.display(),
        gateway.latency(),
        ctx.config.checkout.settlement_timeout()
    ));
    let spinner = ctx.output.spinner("Processing payment...");
    let result = flow
        .submit_payment(&payment, &mut store.cart, &gateway, &cancel)
        .await;
    spinner.finish_and_clear();
    ctrl_c.abort();

    let order = result.context("Payment did not go through. Your cart is unchanged")?;
    store.flush()?;

    // Step 3: confirmation
    ctx.output.step(flow.step());
    print_confirmation(&order, ctx);
    Ok(())
}

fn print_confirmation(order: &OrderConfirmation, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return;
    }

    ctx.output.success("Order placed! Your coffee is on its way.");
    ctx.output.kv("order", order.order_id.as_str());
    ctx.output.kv("drinks", &order.item_count().to_string());
    ctx.output.kv("total", &order.total.display());
    ctx.output.kv(
        "ship to",
        &format!("{}, {}", order.ship_to.full_name(), order.ship_to.one_line()),
    );
    ctx.output.kv("card", &format!("**** {}", order.card_last4));
    ctx.output.kv("reference", &order.payment_reference);
    ctx.output.kv("placed", &format_timestamp(order.confirmed_at));
}

/// Use the flag value, or ask for it when a person is at the terminal.
///
/// Without a terminal a missing value stays blank and checkout validation
/// reports it.
fn field(label: &str, value: Option<String>, interactive: bool) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if interactive => Ok(Input::<String>::new()
            .with_prompt(label)
            .validate_with(|s: &String| required(s))
            .interact_text()?),
        None => Ok(String::new()),
    }
}

fn email_field(value: Option<String>, interactive: bool) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if interactive => Ok(Input::<String>::new()
            .with_prompt("Email")
            .validate_with(|s: &String| {
                required(s)?;
                if s.contains('@') {
                    Ok(())
                } else {
                    Err("enter a valid email")
                }
            })
            .interact_text()?),
        None => Ok(String::new()),
    }
}

fn secret_field(label: &str, value: Option<String>, interactive: bool) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if interactive => Ok(Password::new().with_prompt(label).interact()?),
        None => Ok(String::new()),
    }
}

fn required(s: &str) -> std::result::Result<(), &'static str> {
    if s.trim().is_empty() {
        Err("required")
    } else {
        Ok(())
    }
}
