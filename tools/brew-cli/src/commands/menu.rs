//! Menu browsing.

use anyhow::Result;
use brew_commerce::catalog::{Category, MenuFilter, Product};

use super::MenuArgs;
use crate::context::Context;
use crate::output::stars;

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront()?;

    let mut filter = MenuFilter::all();
    if let Some(ref name) = args.category {
        let category: Category = name.parse()?;
        filter = filter.category(category);
    }
    if let Some(query) = args.search {
        filter = filter.query(query);
    }

    let products: Vec<&Product> = if args.best_sellers {
        store
            .catalog
            .best_sellers()
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect()
    } else {
        store.catalog.filter(&filter)
    };

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("BrewSpot Menu");
    if products.is_empty() {
        ctx.output.info("No drinks match.");
        return Ok(());
    }

    for product in products {
        let heart = if store.favorites.is_favorite(&product.id) {
            "♥"
        } else {
            " "
        };
        let badge = if product.best_seller { " [Best Seller]" } else { "" };
        println!();
        ctx.output.table_row(
            &[
                heart,
                product.id.as_str(),
                &product.name,
                &product.price.display(),
                product.category.as_str(),
            ],
            &[1, 14, 24, 7, 8],
        );
        ctx.output.kv(
            "about",
            &format!("{}{}", product.description, badge),
        );
        ctx.output.kv(
            "rating",
            &format!("{} ({} reviews)", stars(product.rating), product.reviews),
        );
        if product.calories > 0 {
            ctx.output.kv(
                "details",
                &format!("{} cal, {}", product.calories, product.prep_time),
            );
        }
    }

    Ok(())
}
