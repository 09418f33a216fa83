//! # Storefront Shell
//!
//! Line-oriented front end for the command layer. Each input line is one
//! command; the reply is written back as text.
//!
//! ## Commands
//! ```text
//! list                         product listing
//! open <product> [qty]         open the cart item drawer
//! select <category> <option>   choose an option
//! add                          submit the drawer
//! close                        dismiss the drawer
//! next | prev                  manual carousel navigation
//! play                         toggle the visible video
//! max | restore | backdrop     maximized overlay
//! cart | remove <line> | clear
//! help | quit
//! ```
//!
//! Items added through `add` reach the product list's `on_add` callback.

use std::str::FromStr;

use storefront_catalog::ProductSource;
use storefront_core::carousel::CarouselView;
use storefront_core::form::FormView;
use storefront_core::{CartItem, Direction, MediaSlot, OverlayTarget};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::commands::{cart, drawer, media};
use crate::config::StorefrontConfig;
use crate::error::{ApiError, ApiResult, AppResult};
use crate::render::ProductList;
use crate::state::{CartResponse, CartState, CatalogState, DrawerState};

const HELP: &str = "\
Commands:
  list                         show products
  open <product> [qty]         configure a product
  select <category> <option>   choose an option
  add                          add the configured item to the cart
  close                        dismiss the drawer
  next | prev                  browse media
  play                         play/pause the visible video
  max | restore | backdrop     maximized media
  cart | remove <line> | clear
  help | quit
";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Open { product_id: String, quantity: Option<u32> },
    Select { category: String, option_id: String },
    Add,
    Close,
    Navigate(Direction),
    TogglePlayback,
    Maximize,
    Restore,
    Backdrop,
    Cart,
    Remove { line_id: String },
    Clear,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let command = match words.as_slice() {
            ["list"] => ShellCommand::List,
            ["open", product_id] => ShellCommand::Open {
                product_id: (*product_id).to_string(),
                quantity: None,
            },
            ["open", product_id, quantity] => ShellCommand::Open {
                product_id: (*product_id).to_string(),
                quantity: Some(quantity.parse().map_err(|_| {
                    ApiError::validation(format!("Invalid quantity: {quantity}"))
                })?),
            },
            // Category titles may contain spaces; the option id never does.
            ["select", category @ .., option_id] if !category.is_empty() => ShellCommand::Select {
                category: category.join(" "),
                option_id: (*option_id).to_string(),
            },
            ["add"] => ShellCommand::Add,
            ["close"] => ShellCommand::Close,
            ["next"] => ShellCommand::Navigate(Direction::Forward),
            ["prev"] => ShellCommand::Navigate(Direction::Backward),
            ["play"] => ShellCommand::TogglePlayback,
            ["max"] => ShellCommand::Maximize,
            ["restore"] => ShellCommand::Restore,
            ["backdrop"] => ShellCommand::Backdrop,
            ["cart"] => ShellCommand::Cart,
            ["remove", line_id] => ShellCommand::Remove {
                line_id: (*line_id).to_string(),
            },
            ["clear"] => ShellCommand::Clear,
            ["help"] => ShellCommand::Help,
            ["quit"] | ["exit"] => ShellCommand::Quit,
            _ => {
                return Err(ApiError::validation(format!(
                    "Unknown command: {} (try 'help')",
                    line.trim()
                )))
            }
        };
        Ok(command)
    }
}

/// Borrowed application state plus the product list the shell renders.
pub struct Shell<'a, S, F>
where
    S: ProductSource,
    F: FnMut(CartItem),
{
    catalog: &'a CatalogState<S>,
    drawer: &'a DrawerState,
    cart: &'a CartState,
    config: &'a StorefrontConfig,
    list: ProductList<F>,
}

impl<'a, S, F> Shell<'a, S, F>
where
    S: ProductSource,
    F: FnMut(CartItem),
{
    pub fn new(
        catalog: &'a CatalogState<S>,
        drawer: &'a DrawerState,
        cart: &'a CartState,
        config: &'a StorefrontConfig,
        list: ProductList<F>,
    ) -> Self {
        Shell {
            catalog,
            drawer,
            cart,
            config,
            list,
        }
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// Command failures are reported on `output` and the loop continues.
    /// The open drawer is closed on exit.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(b"> ").await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                output.write_all(b"> ").await?;
                output.flush().await?;
                continue;
            }

            let reply = match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.execute(command).await,
                Err(e) => Err(e),
            };
            let text = match reply {
                Ok(text) => text,
                Err(e) => format!("error: {e}\n"),
            };

            output.write_all(text.as_bytes()).await?;
            output.write_all(b"> ").await?;
            output.flush().await?;
        }

        output.write_all(b"\n").await?;
        output.flush().await?;
        if self.drawer.close().await {
            debug!("Drawer closed on exit");
        }
        Ok(())
    }

    /// Runs one command and returns its text reply.
    pub async fn execute(&mut self, command: ShellCommand) -> ApiResult<String> {
        let config = self.config;
        let formatter = config.currency_format();

        match command {
            ShellCommand::List => Ok(self.list.render(&formatter)),
            ShellCommand::Open {
                product_id,
                quantity,
            } => {
                let response =
                    drawer::open_drawer(self.catalog, self.drawer, config, &product_id, quantity)
                        .await?;
                let mut out = render_form(&response.form);
                if let Some(media) = &response.media {
                    out.push_str(&render_media(media));
                }
                Ok(out)
            }
            ShellCommand::Select {
                category,
                option_id,
            } => {
                let form = drawer::select_option(self.drawer, config, &category, &option_id)?;
                Ok(render_form(&form))
            }
            ShellCommand::Add => match drawer::submit_drawer(self.drawer, self.cart, config).await? {
                drawer::SubmitResponse::Added { item, cart } => {
                    info!(line_id = %item.id, "Item handed to product list");
                    self.list.add(item);
                    Ok(render_cart(&cart, config))
                }
                drawer::SubmitResponse::Incomplete { form, .. } => Ok(render_form(&form)),
            },
            ShellCommand::Close => Ok(if drawer::close_drawer(self.drawer).await {
                "Drawer closed.\n".to_string()
            } else {
                "No drawer is open.\n".to_string()
            }),
            ShellCommand::Navigate(direction) => {
                let response = media::navigate_media(self.drawer, direction).await?;
                Ok(render_media(&response.view))
            }
            ShellCommand::TogglePlayback => {
                let slot = if media::media_state(self.drawer).await?.state.is_maximized {
                    MediaSlot::Maximized
                } else {
                    MediaSlot::Inline
                };
                let response = media::toggle_video(self.drawer, slot).await?;
                Ok(render_media(&response.view))
            }
            ShellCommand::Maximize => {
                let response = media::maximize_media(self.drawer).await?;
                Ok(render_media(&response.view))
            }
            ShellCommand::Restore => {
                let response = media::restore_media(self.drawer).await?;
                Ok(render_media(&response.view))
            }
            ShellCommand::Backdrop => {
                let response = media::click_overlay(self.drawer, OverlayTarget::Backdrop).await?;
                Ok(render_media(&response.view))
            }
            ShellCommand::Cart => Ok(render_cart(&cart::get_cart(self.cart), config)),
            ShellCommand::Remove { line_id } => {
                let response = cart::remove_from_cart(self.cart, &line_id)?;
                Ok(render_cart(&response, config))
            }
            ShellCommand::Clear => Ok(render_cart(&cart::clear_cart(self.cart), config)),
            ShellCommand::Help => Ok(HELP.to_string()),
            ShellCommand::Quit => Ok(String::new()),
        }
    }
}

// =============================================================================
// Text Rendering
// =============================================================================

fn render_form(form: &FormView) -> String {
    let mut out = format!("{}\n", form.title);
    if !form.description.is_empty() {
        out.push_str(&format!("  {}\n", form.description));
    }
    for category in &form.categories {
        out.push_str(&format!("  {}", category.title));
        if let Some(label) = category.missing_label {
            out.push_str(&format!("  ({label})"));
        }
        out.push('\n');
        for option in &category.options {
            let mark = if option.selected { "(x)" } else { "( )" };
            out.push_str(&format!("    {} {} [{}]", mark, option.title, option.id));
            if let Some(price) = &option.price_label {
                out.push_str(&format!(" {price}"));
            }
            out.push('\n');
        }
    }
    out.push_str(&format!("  Total: {}  [{}]\n", form.total, form.submit_label));
    out
}

fn render_media(view: &CarouselView) -> String {
    let current = view
        .slides
        .iter()
        .filter(|slide| slide.visible)
        .map(|slide| format!("{} {}/{}", slide.source, slide.index + 1, view.slides.len()))
        .collect::<Vec<_>>()
        .join(" -> ");
    let mut out = format!("  Media: {current}");
    if let Some(label) = view.playback_label {
        out.push_str(&format!("  [{label}]"));
    }
    if view.maximized {
        out.push_str("  (maximized)");
    }
    out.push('\n');
    out
}

fn render_cart(cart: &CartResponse, config: &StorefrontConfig) -> String {
    let formatter = config.currency_format();
    if cart.items.is_empty() {
        return "Cart is empty.\n".to_string();
    }

    let mut out = String::from("Cart:\n");
    for item in &cart.items {
        out.push_str(&format!(
            "  {} x{}  {}  [{}]\n",
            item.product.title,
            item.quantity,
            formatter.format_amount(item.line_total()),
            item.id
        ));
    }
    out.push_str(&format!(
        "  Total: {}\n",
        formatter.format_amount(cart.totals.total)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::player::HeadlessPlayer;
    use storefront_catalog::seed::sample_products;
    use storefront_catalog::MemoryCatalog;

    async fn catalog() -> CatalogState<MemoryCatalog> {
        let catalog = CatalogState::new(MemoryCatalog::new(sample_products()), None);
        catalog.load().await.unwrap();
        catalog
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("list".parse::<ShellCommand>().unwrap(), ShellCommand::List);
        assert_eq!(
            "open lemonade 2".parse::<ShellCommand>().unwrap(),
            ShellCommand::Open {
                product_id: "lemonade".to_string(),
                quantity: Some(2)
            }
        );
        assert_eq!(
            "select Ice Level ice-none".parse::<ShellCommand>().unwrap(),
            ShellCommand::Select {
                category: "Ice Level".to_string(),
                option_id: "ice-none".to_string()
            }
        );
        assert_eq!(
            "prev".parse::<ShellCommand>().unwrap(),
            ShellCommand::Navigate(Direction::Backward)
        );

        assert!("select size-m".parse::<ShellCommand>().is_err());
        assert!("open lemonade many".parse::<ShellCommand>().is_err());
        assert!("dance".parse::<ShellCommand>().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_adds_items_through_on_add() {
        let catalog = catalog().await;
        let drawer = DrawerState::new(Arc::new(HeadlessPlayer::new()));
        let cart = CartState::new();
        let config = StorefrontConfig::default();

        let mut added = Vec::new();
        let list = ProductList::new(catalog.products(), |item: CartItem| {
            added.push(item.product.id)
        });
        let mut shell = Shell::new(&catalog, &drawer, &cart, &config, list);

        let input = "\
open margherita
select Size size-l
add
select Crust crust-thin
add
open lemonade 2
add
bogus
quit
";
        let mut output = Vec::new();
        shell.run(input.as_bytes(), &mut output).await.unwrap();
        drop(shell);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("(Select an option)"));
        assert!(output.contains("Total: $18.00"));
        assert!(output.contains("error: [ValidationError] Unknown command: bogus"));

        assert_eq!(added, ["margherita", "lemonade"]);
        assert_eq!(cart::get_cart(&cart).items.len(), 2);
        assert!(!drawer.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_media_commands_need_media() {
        let catalog = catalog().await;
        let drawer = DrawerState::new(Arc::new(HeadlessPlayer::new()));
        let cart = CartState::new();
        let config = StorefrontConfig::default();
        let list = ProductList::new(catalog.products(), |_: CartItem| {});
        let mut shell = Shell::new(&catalog, &drawer, &cart, &config, list);

        let err = shell
            .execute(ShellCommand::Navigate(Direction::Forward))
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::DrawerError);

        shell
            .execute(ShellCommand::Open {
                product_id: "margherita".to_string(),
                quantity: None,
            })
            .await
            .unwrap();
        let reply = shell
            .execute(ShellCommand::Navigate(Direction::Forward))
            .await
            .unwrap();
        assert!(reply.starts_with("  Media:"));
        drawer.close().await;
    }
}
