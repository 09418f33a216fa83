//! # Storefront Entry Point
//!
//! ## Usage
//! ```bash
//! # List the default catalog
//! storefront
//!
//! # List a named collection
//! storefront mock
//!
//! # Scripted session
//! printf 'open lemonade 2\nadd\ncart\n' | storefront
//! ```
//!
//! The actual setup is in lib.rs so tests and other hosts can reuse it.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let collection = std::env::args().nth(1);
    storefront::run(collection).await?;
    Ok(())
}
