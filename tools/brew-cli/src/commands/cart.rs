//! Cart commands.

use anyhow::{Context as _, Result};
use brew_commerce::cart::{find_addon, Customization, LineItem, Size};
use brew_commerce::ProductId;
use serde_json::json;

use super::{AddArgs, QuantityArgs, RemoveArgs};
use crate::context::{CliCartStore, Context};
use crate::output::short_id;

/// Add a customized drink.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;

    let product = store.catalog.require(&ProductId::new(&args.product))?;
    let size: Size = args.size.parse()?;

    let customization = args
        .addons
        .iter()
        .fold(Customization::new().with_size(size).with_milk(&args.milk), |c, a| {
            c.with_addon(a.as_str())
        });
    customization.validate()?;

    let input = customization.line_item(product, args.quantity);
    input.validate()?;
    let unit_price = input.price;

    let id = store.cart.add_item(input);
    store.flush()?;

    let line = store
        .cart
        .get_item(&id)
        .context("Line disappeared after adding")?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "item": line,
            "cartTotal": store.cart.total().to_decimal(),
        }));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Added {} × {} ({}) at {} each",
        args.quantity,
        line.name,
        describe(line),
        unit_price.display()
    ));
    ctx.output.kv("line", short_id(line.id.as_str()));
    ctx.output.kv("cart total", &store.cart.total().display());
    Ok(())
}

/// Show the cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront()?;
    print_cart(&store.cart, ctx);
    Ok(())
}

/// Change a line's quantity.
pub async fn quantity(args: QuantityArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    let line = store.cart.cart().find_by_prefix(&args.item)?;
    let (id, name) = (line.id.clone(), line.name.clone());

    store.cart.update_quantity(&id, args.quantity);
    store.flush()?;

    if ctx.output.is_json() {
        print_cart(&store.cart, ctx);
        return Ok(());
    }

    match store.cart.get_item(&id) {
        Some(line) => ctx
            .output
            .success(&format!("{} quantity is now {}", name, line.quantity)),
        None => ctx.output.success(&format!("Removed {}", name)),
    }
    ctx.output.kv("cart total", &store.cart.total().display());
    Ok(())
}

/// Remove a line.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    let line = store.cart.cart().find_by_prefix(&args.item)?;
    let (id, name) = (line.id.clone(), line.name.clone());

    store.cart.remove_item(&id);
    store.flush()?;

    if ctx.output.is_json() {
        print_cart(&store.cart, ctx);
        return Ok(());
    }
    ctx.output.success(&format!("Removed {}", name));
    ctx.output.kv("cart total", &store.cart.total().display());
    Ok(())
}

/// Empty the cart.
pub async fn clear(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    store.cart.clear_cart();
    store.flush()?;

    if ctx.output.is_json() {
        print_cart(&store.cart, ctx);
        return Ok(());
    }
    ctx.output.success("Cart cleared");
    Ok(())
}

/// Print every line and the total.
pub fn print_cart(cart: &CliCartStore, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart.items(),
            "itemCount": cart.item_count(),
            "total": cart.total().to_decimal(),
        }));
        return;
    }

    ctx.output.header("Your Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty. Try `brewspot menu`.");
        return;
    }

    for line in cart.items() {
        ctx.output.table_row(
            &[
                short_id(line.id.as_str()),
                &line.name,
                &format!("×{}", line.quantity),
                &line.subtotal().display(),
            ],
            &[8, 24, 4, 8],
        );
        ctx.output.kv("options", &describe(line));
    }
    println!();
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("total", &cart.total().display());
}

/// One-line summary of a line's customization.
fn describe(line: &LineItem) -> String {
    let mut parts = vec![format!("Size {}", line.size), line.milk.clone()];
    parts.extend(
        line.addons
            .iter()
            .map(|id| find_addon(id).map_or_else(|| id.clone(), |a| a.name.to_string())),
    );
    parts.join(", ")
}
