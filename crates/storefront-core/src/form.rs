//! # Option Selection Form
//!
//! The form inside the cart item drawer. It tracks exactly one chosen option
//! per category of a product, flags categories that are still missing a
//! choice, keeps a running total and turns the draft into a [`CartItem`] on
//! submit.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   open(product) ──► Editing ──select_option──► Editing                  │
//! │                        │                                                │
//! │                        │ submit()                                       │
//! │                        ├── every category chosen ──► Submitted (final)  │
//! │                        │                              emits CartItem    │
//! │                        └── some missing ──► Editing + missing markers   │
//! │                                                                         │
//! │   reopen() ──► Editing with a clean draft (no selections, no markers)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals
//! `total = (base price + Σ selected option prices) × quantity`. Option
//! prices may be negative, the arithmetic is integer cents throughout.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::{CurrencyFormatter, Money};
use crate::types::{CartItem, OptionCategory, Product, ProductOption, Selections};
use crate::validation::validate_quantity;

/// Marker shown under a category that still needs a choice.
pub const SELECTION_REQUIRED_LABEL: &str = "Select an option";

pub const SUBMIT_LABEL: &str = "Add to cart";

// =============================================================================
// Draft and Outcome Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Editing,
    /// Terminal: the draft became a cart item.
    Submitted,
}

/// The in-progress item being configured in the drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftCartItem {
    pub product: Product,
    pub quantity: u32,
    pub selections: Selections,
}

impl DraftCartItem {
    fn fresh(product: Product, quantity: u32) -> Self {
        DraftCartItem {
            product,
            quantity,
            selections: Selections::new(),
        }
    }
}

/// Result of [`OptionSelectionForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The finalized item, ready for the cart.
    Submitted(CartItem),
    /// Categories without a selection, in display order.
    Incomplete { missing: Vec<String> },
}

// =============================================================================
// View Model
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionView {
    pub id: String,
    pub title: String,
    pub description: String,
    /// `"+$2.00"` / `"-$1.00"`; absent for free options.
    pub price_label: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub title: String,
    pub options: Vec<OptionView>,
    pub missing_label: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub title: String,
    pub description: String,
    pub categories: Vec<CategoryView>,
    pub total: String,
    pub submit_label: &'static str,
    pub status: FormStatus,
}

// =============================================================================
// Option Selection Form
// =============================================================================

#[derive(Debug, Clone)]
pub struct OptionSelectionForm {
    draft: DraftCartItem,
    /// Categories flagged by the last failed submit.
    missing: Vec<String>,
    status: FormStatus,
}

impl OptionSelectionForm {
    /// Opens a fresh form for one unit of `product`.
    pub fn open(product: Product) -> Self {
        OptionSelectionForm {
            draft: DraftCartItem::fresh(product, 1),
            missing: Vec::new(),
            status: FormStatus::Editing,
        }
    }

    /// Opens a fresh form for `quantity` units of `product`.
    pub fn with_quantity(product: Product, quantity: u32) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        let mut form = Self::open(product);
        form.draft.quantity = quantity;
        Ok(form)
    }

    /// Resets to a clean draft of the same product and quantity.
    pub fn reopen(&mut self) {
        self.draft.selections.clear();
        self.missing.clear();
        self.status = FormStatus::Editing;
        debug!(product_id = %self.draft.product.id, "Option form reset");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn product(&self) -> &Product {
        &self.draft.product
    }

    pub fn draft(&self) -> &DraftCartItem {
        &self.draft
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.draft.quantity
    }

    #[inline]
    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn categories(&self) -> &[OptionCategory] {
        self.draft.product.categories()
    }

    pub fn selected(&self, category: &str) -> Option<&ProductOption> {
        self.draft.selections.get(category)
    }

    pub fn selections(&self) -> &Selections {
        &self.draft.selections
    }

    /// Whether the last submit flagged `category`.
    pub fn is_missing(&self, category: &str) -> bool {
        self.missing.iter().any(|c| c == category)
    }

    /// Categories flagged by the last failed submit.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Categories that currently lack a selection, whether flagged or not.
    pub fn missing_categories(&self) -> Vec<String> {
        self.categories()
            .iter()
            .filter(|c| !self.draft.selections.contains(&c.title))
            .map(|c| c.title.clone())
            .collect()
    }

    pub fn can_submit(&self) -> bool {
        self.status == FormStatus::Editing
            && self
                .categories()
                .iter()
                .all(|c| self.draft.selections.contains(&c.title))
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Chooses `option` for its category, replacing any previous choice.
    ///
    /// The option must be one of the product's own options; the catalog copy
    /// is stored. Returns the replaced option.
    pub fn select_option(&mut self, option: &ProductOption) -> CoreResult<Option<ProductOption>> {
        self.select_by_id(&option.category, &option.id)
    }

    /// Chooses the option `option_id` of `category`.
    pub fn select_by_id(
        &mut self,
        category: &str,
        option_id: &str,
    ) -> CoreResult<Option<ProductOption>> {
        self.ensure_editing()?;

        let option = self.draft.product.find_option(category, option_id)?.clone();
        let replaced = self.draft.selections.select(option);
        self.missing.retain(|c| c != category);

        debug!(
            product_id = %self.draft.product.id,
            category,
            option_id,
            "Option selected"
        );
        Ok(replaced)
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// `(base + Σ options) × quantity`, saturating on overflow.
    pub fn total(&self) -> Money {
        self.draft
            .product
            .price
            .checked_add(self.draft.selections.total())
            .and_then(|unit| unit.checked_mul(self.draft.quantity))
            .unwrap_or_else(|| {
                warn!(product_id = %self.draft.product.id, "Total overflowed; saturating");
                (self.draft.product.price + self.draft.selections.total()) * self.draft.quantity
            })
    }

    pub fn formatted_total(&self, formatter: &impl CurrencyFormatter) -> String {
        formatter.format(self.total())
    }

    // =========================================================================
    // Submit
    // =========================================================================

    /// Validates completeness and finalizes the draft.
    ///
    /// An incomplete draft is an ordinary outcome: the missing categories are
    /// flagged and the existing selections are kept.
    ///
    /// ## Errors
    /// [`CoreError::FormClosed`] if the form was already submitted.
    pub fn submit(&mut self) -> CoreResult<SubmitOutcome> {
        self.ensure_editing()?;

        let missing = self.missing_categories();
        if !missing.is_empty() {
            debug!(
                product_id = %self.draft.product.id,
                missing = ?missing,
                "Submit blocked by missing selections"
            );
            self.missing = missing.clone();
            return Ok(SubmitOutcome::Incomplete { missing });
        }

        let item = CartItem {
            id: Uuid::new_v4().to_string(),
            product: self.draft.product.clone(),
            quantity: self.draft.quantity,
            options: self.draft.selections.clone(),
            added_at: Utc::now(),
        };
        self.missing.clear();
        self.status = FormStatus::Submitted;

        info!(
            line_id = %item.id,
            product_id = %item.product.id,
            total = %item.line_total(),
            "Cart item configured"
        );
        Ok(SubmitOutcome::Submitted(item))
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn view(&self, formatter: &impl CurrencyFormatter) -> FormView {
        let categories = self
            .categories()
            .iter()
            .map(|category| {
                let chosen = self.selected(&category.title).map(|o| o.id.as_str());
                CategoryView {
                    title: category.title.clone(),
                    options: category
                        .options
                        .iter()
                        .map(|option| OptionView {
                            id: option.id.clone(),
                            title: option.title.clone(),
                            description: option.description.clone(),
                            price_label: price_label(option.price, formatter),
                            selected: chosen == Some(option.id.as_str()),
                        })
                        .collect(),
                    missing_label: self
                        .is_missing(&category.title)
                        .then_some(SELECTION_REQUIRED_LABEL),
                }
            })
            .collect();

        FormView {
            title: self.draft.product.title.clone(),
            description: self.draft.product.description.clone(),
            categories,
            total: self.formatted_total(formatter),
            submit_label: SUBMIT_LABEL,
            status: self.status,
        }
    }

    fn ensure_editing(&self) -> CoreResult<()> {
        match self.status {
            FormStatus::Editing => Ok(()),
            FormStatus::Submitted => Err(CoreError::FormClosed),
        }
    }
}

/// Signed price adjustment label; free options have none.
fn price_label(price: Money, formatter: &impl CurrencyFormatter) -> Option<String> {
    if price.is_zero() {
        None
    } else if price.is_positive() {
        Some(format!("+{}", formatter.format(price)))
    } else {
        Some(formatter.format(price))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::CurrencyFormat;
    use crate::types::OptionGroups;

    fn option(id: &str, category: &str, cents: i64) -> ProductOption {
        ProductOption {
            id: id.to_string(),
            title: id.to_uppercase(),
            category: category.to_string(),
            description: String::new(),
            image: None,
            video: None,
            price: Money::from_cents(cents),
        }
    }

    fn pizza() -> Product {
        Product {
            id: "pizza".to_string(),
            title: "Pizza".to_string(),
            category: "Mains".to_string(),
            description: "Stone baked".to_string(),
            image: Some("pizza.jpg".to_string()),
            video: None,
            options: OptionGroups::new(vec![
                OptionCategory {
                    title: "Size".to_string(),
                    options: vec![option("m", "Size", 0), option("l", "Size", 200)],
                },
                OptionCategory {
                    title: "Crust".to_string(),
                    options: vec![option("thin", "Crust", -100), option("deep", "Crust", 0)],
                },
            ]),
            price: Money::from_cents(1000),
        }
    }

    #[test]
    fn test_open_is_clean() {
        let form = OptionSelectionForm::open(pizza());
        assert_eq!(form.status(), FormStatus::Editing);
        assert_eq!(form.quantity(), 1);
        assert!(form.selections().is_empty());
        assert!(form.missing().is_empty());
        assert!(!form.can_submit());
        assert_eq!(form.total().cents(), 1000);
    }

    #[test]
    fn test_repeated_selection_keeps_one_option_per_category() {
        let mut form = OptionSelectionForm::open(pizza());
        form.select_by_id("Size", "m").unwrap();
        form.select_by_id("Crust", "thin").unwrap();
        let replaced = form.select_by_id("Size", "l").unwrap();

        assert_eq!(replaced.map(|o| o.id), Some("m".to_string()));
        assert_eq!(form.selections().len(), 2);
        assert_eq!(form.selected("Size").map(|o| o.id.as_str()), Some("l"));
        assert_eq!(form.selected("Crust").map(|o| o.id.as_str()), Some("thin"));
    }

    #[test]
    fn test_submit_requires_every_category() {
        let mut form = OptionSelectionForm::open(pizza());
        form.select_by_id("Size", "l").unwrap();

        let outcome = form.submit().unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Incomplete {
                missing: vec!["Crust".to_string()]
            }
        );
        assert!(form.is_missing("Crust"));
        assert!(!form.is_missing("Size"));
        assert_eq!(form.status(), FormStatus::Editing);
        assert!(form.selected("Size").is_some());

        form.select_by_id("Crust", "deep").unwrap();
        assert!(!form.is_missing("Crust"));
        assert!(form.can_submit());

        let SubmitOutcome::Submitted(item) = form.submit().unwrap() else {
            panic!("complete draft must submit");
        };
        assert_eq!(item.product.id, "pizza");
        assert_eq!(item.options.len(), 2);
        assert!(uuid::Uuid::parse_str(&item.id).is_ok());
        assert_eq!(form.status(), FormStatus::Submitted);
    }

    #[test]
    fn test_total_with_surcharge_and_discount() {
        let mut form = OptionSelectionForm::open(pizza());
        form.select_by_id("Size", "l").unwrap();
        form.select_by_id("Crust", "thin").unwrap();

        assert_eq!(form.total(), Money::from_cents(1100));
        assert_eq!(form.formatted_total(&CurrencyFormat::default()), "$11.00");

        let plain = |m: Money| format!("{} cents", m.cents());
        assert_eq!(form.formatted_total(&plain), "1100 cents");
    }

    #[test]
    fn test_total_scales_with_quantity() {
        let mut form = OptionSelectionForm::with_quantity(pizza(), 3).unwrap();
        form.select_by_id("Size", "l").unwrap();
        assert_eq!(form.total().cents(), 3600);

        assert!(OptionSelectionForm::with_quantity(pizza(), 0).is_err());
    }

    #[test]
    fn test_reopen_clears_selections_and_markers() {
        let mut form = OptionSelectionForm::open(pizza());
        form.select_by_id("Size", "m").unwrap();
        form.submit().unwrap();
        assert!(!form.missing().is_empty());

        form.reopen();
        assert!(form.selections().is_empty());
        assert!(form.missing().is_empty());
        assert_eq!(form.total().cents(), 1000);
    }

    #[test]
    fn test_reopen_after_submit_allows_editing() {
        let mut form = OptionSelectionForm::open(pizza());
        form.select_by_id("Size", "m").unwrap();
        form.select_by_id("Crust", "deep").unwrap();
        form.submit().unwrap();

        form.reopen();
        assert_eq!(form.status(), FormStatus::Editing);
        assert!(form.select_by_id("Size", "l").is_ok());
    }

    #[test]
    fn test_foreign_options_rejected() {
        let mut form = OptionSelectionForm::open(pizza());

        let err = form.select_option(&option("xl", "Size", 500)).unwrap_err();
        assert!(matches!(err, CoreError::OptionNotFound { .. }));

        let err = form.select_by_id("Sauce", "bbq").unwrap_err();
        assert!(matches!(err, CoreError::UnknownCategory { .. }));
        assert!(form.selections().is_empty());
    }

    #[test]
    fn test_catalog_copy_is_stored() {
        let mut form = OptionSelectionForm::open(pizza());
        let tampered = option("l", "Size", 1);
        form.select_option(&tampered).unwrap();
        assert_eq!(form.selected("Size").map(|o| o.price.cents()), Some(200));
    }

    #[test]
    fn test_submitted_form_is_closed() {
        let mut form = OptionSelectionForm::open(pizza());
        form.select_by_id("Size", "m").unwrap();
        form.select_by_id("Crust", "deep").unwrap();
        form.submit().unwrap();

        assert!(matches!(form.submit(), Err(CoreError::FormClosed)));
        assert!(matches!(
            form.select_by_id("Size", "l"),
            Err(CoreError::FormClosed)
        ));
        assert!(!form.can_submit());
    }

    #[test]
    fn test_product_without_options_submits_directly() {
        let mut product = pizza();
        product.options = OptionGroups::default();
        let mut form = OptionSelectionForm::open(product);

        assert!(form.can_submit());
        assert!(matches!(form.submit(), Ok(SubmitOutcome::Submitted(_))));
    }

    #[test]
    fn test_view_labels() {
        let mut form = OptionSelectionForm::open(pizza());
        form.select_by_id("Size", "l").unwrap();
        form.submit().unwrap();

        let view = form.view(&CurrencyFormat::default());
        assert_eq!(view.title, "Pizza");
        assert_eq!(view.submit_label, "Add to cart");
        assert_eq!(view.total, "$12.00");

        let size = &view.categories[0];
        assert_eq!(size.missing_label, None);
        assert_eq!(size.options[0].price_label, None);
        assert_eq!(size.options[1].price_label.as_deref(), Some("+$2.00"));
        assert!(size.options[1].selected);

        let crust = &view.categories[1];
        assert_eq!(crust.missing_label, Some("Select an option"));
        assert_eq!(crust.options[0].price_label.as_deref(), Some("-$1.00"));
    }

    #[test]
    fn test_oversized_price_total_does_not_panic() {
        let mut product = pizza();
        product.price = Money::from_cents(9_000_000_000_000_000_000);

        let form = OptionSelectionForm::with_quantity(product, 2).unwrap();
        assert_eq!(form.total().cents(), i64::MAX);
        assert!(!form.view(&CurrencyFormat::default()).total.is_empty());
    }
}
