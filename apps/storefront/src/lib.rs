//! # Storefront Library
//!
//! The storefront application: product listing, the cart item drawer
//! (option form + media carousel) and the in-memory cart.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── StorefrontConfig (TOML + env)
//! ├── driver.rs       ◄─── CarouselDriver actor, CarouselHandle
//! ├── player.rs       ◄─── MediaPlayer trait, HeadlessPlayer
//! ├── render.rs       ◄─── ProductList text renderer
//! ├── shell.rs        ◄─── stdin command loop
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Product listing snapshot
//! │   ├── drawer.rs   ◄─── The one open drawer
//! │   └── cart.rs     ◄─── Cart state management
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Listing commands
//! │   ├── drawer.rs   ◄─── Drawer commands
//! │   ├── media.rs    ◄─── Carousel commands
//! │   └── cart.rs     ◄─── Cart commands
//! └── error.rs        ◄─── Config, app and API error types
//! ```

pub mod commands;
pub mod config;
pub mod driver;
pub mod error;
pub mod player;
pub mod render;
pub mod shell;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::StorefrontConfig;
use error::AppResult;
use player::HeadlessPlayer;
use render::ProductList;
use shell::Shell;
use state::{CartState, CatalogState, DrawerState};
use std::sync::Arc;
use storefront_catalog::JsonCatalog;

/// Runs the storefront: loads the catalog, prints the listing and serves
/// shell commands from stdin until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,storefront=debug, overridable with RUST_LOG         │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → STOREFRONT_* env                     │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • <root>/products.json, or <root>/collections/<id>.json             │
/// │                                                                         │
/// │  4. Render Product List ──────────────────────────────────────────────► │
/// │     • items added from the drawer are announced through on_add          │
/// │                                                                         │
/// │  5. Shell ────────────────────────────────────────────────────────────► │
/// │     • open / select / add / next / prev ... on stdin                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// `collection` overrides the configured collection.
pub async fn run(collection: Option<String>) -> AppResult<()> {
    init_tracing();

    info!("Starting storefront");

    let config = StorefrontConfig::load_or_default(None);
    let collection = collection.or_else(|| config.catalog.collection.clone());
    info!(root = %config.catalog.root.display(), ?collection, "Catalog location");

    let catalog = CatalogState::new(JsonCatalog::new(config.catalog.root.clone()), collection);
    catalog.load().await?;

    let cart = CartState::new();
    let drawer = DrawerState::new(Arc::new(HeadlessPlayer::new()));
    let formatter = config.currency_format();

    let list = ProductList::new(catalog.products(), |item| {
        let lines = cart.with_cart(|c| c.item_count());
        info!(line_id = %item.id, cart_lines = lines, "Item added");
        println!(
            "Added {} x{} ({}) to the cart.",
            item.product.title,
            item.quantity,
            formatter.format_amount(item.line_total())
        );
    });

    println!("{}", config.store.name);
    println!("{}", "=".repeat(config.store.name.chars().count()));
    print!("{}", list.render(&formatter));
    println!("Type 'help' for commands.");

    let mut shell = Shell::new(&catalog, &drawer, &cart, &config, list);
    shell
        .run(tokio::io::BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_core=trace` - Carousel and form internals
/// - Default: `info,storefront=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
