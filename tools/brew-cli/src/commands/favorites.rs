//! Favorites commands.

use anyhow::Result;
use brew_commerce::ProductId;
use serde_json::json;

use super::FavArgs;
use crate::context::Context;

/// Toggle a product in or out of favorites.
pub async fn toggle(args: FavArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    let id = ProductId::new(&args.product);
    let name = store.catalog.require(&id)?.name.clone();

    let now_favorite = store.favorites.toggle_favorite(&id);
    store.flush()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "productId": id, "favorite": now_favorite }));
    } else if now_favorite {
        ctx.output.success(&format!("Added {} to favorites", name));
    } else {
        ctx.output.success(&format!("Removed {} from favorites", name));
    }
    Ok(())
}

/// List favorites in the order they were added.
pub async fn list(ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "favoriteIds": store.favorites.favorite_ids() }));
        return Ok(());
    }

    ctx.output.header("Favorites");
    if store.favorites.is_empty() {
        ctx.output.info("No favorites yet. Try `brewspot fav <product>`.");
        return Ok(());
    }

    for id in store.favorites.favorite_ids() {
        match store.catalog.get(id) {
            Some(product) => ctx.output.list_item(&format!(
                "{} ({}) {}",
                product.name,
                id,
                product.price.display()
            )),
            // Saved ids can outlive a menu change.
            None => ctx.output.list_item(&format!("{} (no longer on the menu)", id)),
        }
    }
    Ok(())
}
