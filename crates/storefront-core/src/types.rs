//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    Product      │   │  OptionCategory  │   │  ProductOption  │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id, title      │──►│  title "Size"    │──►│  id, title      │      │
//! │  │  image, video   │   │  options [..]    │   │  category       │      │
//! │  │  price (Money)  │   └──────────────────┘   │  price (±Money) │      │
//! │  └────────┬────────┘                          └─────────────────┘      │
//! │           │ configured in the drawer                                    │
//! │           ▼                                                             │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  CartItem                               │                           │
//! │  │  product snapshot + quantity +          │                           │
//! │  │  Selections { category ──► one option } │                           │
//! │  └─────────────────────────────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Product options arrive as a JSON object keyed by category title. The
//! object's document order is the display order of the categories, so it is
//! deserialized into an ordered list rather than a hash map.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::media::{media_sequence, MediaItem};
use crate::money::Money;

// =============================================================================
// Product Option
// =============================================================================

/// A selectable option of a product (e.g. "Large" in category "Size").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductOption {
    pub id: String,
    pub title: String,

    /// Title of the category this option belongs to.
    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,

    /// Price adjustment in cents. Negative values are discounts.
    #[serde(default)]
    pub price: Money,
}

// =============================================================================
// Option Categories
// =============================================================================

/// A named group of mutually exclusive options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCategory {
    pub title: String,
    pub options: Vec<ProductOption>,
}

impl OptionCategory {
    /// Finds an option of this category by id.
    pub fn option(&self, option_id: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Ordered category → options mapping of a product.
///
/// Serialized as a JSON object whose key order is preserved in both
/// directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionGroups(Vec<OptionCategory>);

impl OptionGroups {
    pub fn new(categories: Vec<OptionCategory>) -> Self {
        OptionGroups(categories)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptionCategory> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[OptionCategory] {
        &self.0
    }

    /// Finds a category by title.
    pub fn get(&self, title: &str) -> Option<&OptionCategory> {
        self.0.iter().find(|c| c.title == title)
    }

    /// Category titles in display order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.title.as_str())
    }
}

impl<'a> IntoIterator for &'a OptionGroups {
    type Item = &'a OptionCategory;
    type IntoIter = std::slice::Iter<'a, OptionCategory>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for OptionGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in &self.0 {
            map.serialize_entry(&category.title, &category.options)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OptionGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = OptionGroups;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category titles to option lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((title, options)) =
                    access.next_entry::<String, Vec<ProductOption>>()?
                {
                    categories.push(OptionCategory { title, options });
                }
                Ok(OptionGroups(categories))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

/// `options` may be absent or `null` on the wire; both mean "no options".
fn deserialize_optional_groups<'de, D>(deserializer: D) -> Result<OptionGroups, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<OptionGroups>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// Product
// =============================================================================

/// A product shown in the storefront listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Comma-separated image sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Comma-separated video sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_groups",
        skip_serializing_if = "OptionGroups::is_empty"
    )]
    #[ts(type = "Record<string, Array<ProductOption>>")]
    pub options: OptionGroups,

    /// Base price in cents.
    pub price: Money,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Option categories in display order.
    pub fn categories(&self) -> &[OptionCategory] {
        self.options.as_slice()
    }

    /// Whether the drawer has anything to configure.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Resolves an option by category title and option id.
    pub fn find_option(&self, category: &str, option_id: &str) -> CoreResult<&ProductOption> {
        let group = self
            .options
            .get(category)
            .ok_or_else(|| CoreError::UnknownCategory {
                product_id: self.id.clone(),
                category: category.to_string(),
            })?;

        group.option(option_id).ok_or_else(|| CoreError::OptionNotFound {
            category: category.to_string(),
            option_id: option_id.to_string(),
        })
    }

    /// The carousel sequence for this product: images first, then videos.
    pub fn media(&self) -> Vec<MediaItem> {
        media_sequence(self.image.as_deref(), self.video.as_deref())
    }
}

// =============================================================================
// Selections
// =============================================================================

/// The chosen option per category: at most one option per category key.
///
/// Selecting an option whose category already has a selection replaces it,
/// so the "singleton per category" invariant holds by construction.
/// On the wire this is `{ "<category>": [option] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OptionGroups", into = "OptionGroups")]
pub struct Selections(Vec<ProductOption>);

impl Selections {
    pub fn new() -> Self {
        Selections::default()
    }

    /// Selects `option` for its category and returns the option it replaced.
    pub fn select(&mut self, option: ProductOption) -> Option<ProductOption> {
        match self.0.iter_mut().find(|o| o.category == option.category) {
            Some(slot) => Some(std::mem::replace(slot, option)),
            None => {
                self.0.push(option);
                None
            }
        }
    }

    /// The selected option of a category.
    pub fn get(&self, category: &str) -> Option<&ProductOption> {
        self.0.iter().find(|o| o.category == category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductOption> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Sum of the selected options' price adjustments.
    pub fn total(&self) -> Money {
        self.0.iter().map(|o| o.price).sum()
    }
}

impl From<OptionGroups> for Selections {
    fn from(groups: OptionGroups) -> Self {
        let mut selections = Selections::new();
        for category in groups.0 {
            if let Some(option) = category.options.into_iter().next() {
                selections.select(ProductOption {
                    category: category.title,
                    ..option
                });
            }
        }
        selections
    }
}

impl From<Selections> for OptionGroups {
    fn from(selections: Selections) -> Self {
        OptionGroups(
            selections
                .0
                .into_iter()
                .map(|option| OptionCategory {
                    title: option.category.clone(),
                    options: vec![option],
                })
                .collect(),
        )
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A finalized, configured item emitted by the drawer on submit.
///
/// ## Price Freezing
/// The product snapshot and the selected options are copied at submit time,
/// so the line keeps its price even if the catalog is reloaded afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Line identifier (UUID v4).
    pub id: String,

    pub product: Product,

    pub quantity: u32,

    #[ts(type = "Record<string, Array<ProductOption>>")]
    pub options: Selections,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Base price plus every selected option.
    pub fn unit_price(&self) -> Money {
        self.product.price + self.options.total()
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_option_groups_preserve_document_order() {
        let json = r#"{
            "id": "pizza",
            "title": "Pizza",
            "price": 1000,
            "options": {
                "Size": [{"id": "m", "title": "Medium", "category": "Size", "price": 0}],
                "Crust": [{"id": "thin", "title": "Thin", "category": "Crust", "price": 0}],
                "Add-ons": [{"id": "olives", "title": "Olives", "category": "Add-ons", "price": 150}]
            }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        let titles: Vec<&str> = product.options.titles().collect();
        assert_eq!(titles, ["Size", "Crust", "Add-ons"]);

        let back = serde_json::to_string(&product).unwrap();
        let size_at = back.find("\"Size\"").unwrap();
        let crust_at = back.find("\"Crust\"").unwrap();
        let addons_at = back.find("\"Add-ons\"").unwrap();
        assert!(size_at < crust_at && crust_at < addons_at);
    }

    #[test]
    fn test_missing_or_null_options_mean_none() {
        let absent: Product =
            serde_json::from_str(r#"{"id": "a", "title": "A", "price": 100}"#).unwrap();
        assert!(!absent.has_options());

        let null: Product =
            serde_json::from_str(r#"{"id": "a", "title": "A", "price": 100, "options": null}"#)
                .unwrap();
        assert!(null.options.is_empty());
    }

    #[test]
    fn test_find_option_errors() {
        let product = Product {
            id: "pizza".to_string(),
            title: "Pizza".to_string(),
            category: String::new(),
            description: String::new(),
            image: None,
            video: None,
            options: OptionGroups::new(vec![OptionCategory {
                title: "Size".to_string(),
                options: vec![option("m", "Size", 0)],
            }]),
            price: Money::from_cents(1000),
        };

        assert!(product.find_option("Size", "m").is_ok());
        assert!(matches!(
            product.find_option("Size", "xl"),
            Err(CoreError::OptionNotFound { .. })
        ));
        assert!(matches!(
            product.find_option("Crust", "thin"),
            Err(CoreError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_selections_replace_within_category() {
        let mut selections = Selections::new();
        assert!(selections.select(option("m", "Size", 0)).is_none());
        assert!(selections.select(option("thin", "Crust", -100)).is_none());

        let replaced = selections.select(option("l", "Size", 200));
        assert_eq!(replaced.map(|o| o.id), Some("m".to_string()));

        assert_eq!(selections.len(), 2);
        assert_eq!(selections.get("Size").map(|o| o.id.as_str()), Some("l"));
        assert_eq!(selections.total().cents(), 100);
    }

    #[test]
    fn test_selections_wire_shape_is_singleton_arrays() {
        let mut selections = Selections::new();
        selections.select(option("l", "Size", 200));

        let value = serde_json::to_value(&selections).unwrap();
        let size = value.get("Size").and_then(|v| v.as_array()).unwrap();
        assert_eq!(size.len(), 1);
        assert_eq!(size[0]["id"], "l");

        let back: Selections = serde_json::from_value(value).unwrap();
        assert_eq!(back, selections);
    }

    #[test]
    fn test_cart_item_totals() {
        let mut options = Selections::new();
        options.select(option("l", "Size", 200));
        options.select(option("thin", "Crust", -100));

        let item = CartItem {
            id: "line-1".to_string(),
            product: Product {
                id: "pizza".to_string(),
                title: "Pizza".to_string(),
                category: String::new(),
                description: String::new(),
                image: None,
                video: None,
                options: OptionGroups::default(),
                price: Money::from_cents(1000),
            },
            quantity: 2,
            options,
            added_at: Utc::now(),
        };

        assert_eq!(item.unit_price().cents(), 1100);
        assert_eq!(item.line_total().cents(), 2200);
    }

    #[test]
    fn test_product_media_sequence() {
        let product: Product = serde_json::from_str(
            r#"{"id": "a", "title": "A", "price": 100, "image": "a.jpg, b.jpg", "video": "c.mp4"}"#,
        )
        .unwrap();
        let media = product.media();
        assert_eq!(media.len(), 3);
        assert!(media[2].is_video());
    }
}
