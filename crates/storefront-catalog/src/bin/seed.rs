//! # Sample Catalog Writer
//!
//! Writes the demo menu to a catalog root for development.
//!
//! ## Usage
//! ```bash
//! # Write to ./catalog (default)
//! cargo run -p storefront-catalog --bin seed
//!
//! # Write somewhere else, replacing existing files
//! cargo run -p storefront-catalog --bin seed -- --root ./data/catalog --force
//! ```
//!
//! ## Generated Files
//! - `products.json` - every sample product
//! - `collections/mock.json` - the configurable products only

use std::env;

use storefront_catalog::seed::{sample_collections, sample_products};
use storefront_catalog::{JsonCatalog, ProductSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut root = String::from("./catalog");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--root" | "-r" => {
                if i + 1 < args.len() {
                    root = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Storefront Sample Catalog Writer");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -r, --root <PATH>  Catalog root directory (default: ./catalog)");
                println!("  -f, --force        Overwrite an existing catalog");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Storefront Sample Catalog Writer");
    println!("================================");
    println!("Root: {}", root);
    println!();

    let catalog = JsonCatalog::new(&root);

    if !force {
        if let Ok(existing) = catalog.list().await {
            println!("⚠ Catalog already has {} products", existing.len());
            println!("  Pass --force to overwrite it.");
            return Ok(());
        }
    }

    let products = sample_products();
    let path = catalog.write_products(&products).await?;
    println!("✓ Wrote {} products to {}", products.len(), path.display());

    for (collection_id, products) in sample_collections() {
        let path = catalog.write_collection(collection_id, &products).await?;
        println!(
            "✓ Wrote collection '{}' ({} products) to {}",
            collection_id,
            products.len(),
            path.display()
        );
    }

    let check = catalog.list().await?;
    println!();
    println!("✓ Verified: {} products load back", check.len());

    Ok(())
}
