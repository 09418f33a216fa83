//! # Sample Catalog
//!
//! A small demo menu used by the `seed` binary, tests and the in-memory
//! catalog. Covers products with and without options, discount options and
//! mixed image/video media.

use storefront_core::{Money, OptionCategory, OptionGroups, Product, ProductOption};

/// Collection written next to the default list by the seed binary.
pub const SAMPLE_COLLECTION: &str = "mock";

/// Option rows: (id, title, description, price in cents).
type OptionRow = (&'static str, &'static str, &'static str, i64);

fn category(title: &str, rows: &[OptionRow]) -> OptionCategory {
    OptionCategory {
        title: title.to_string(),
        options: rows
            .iter()
            .map(|(id, option_title, description, cents)| ProductOption {
                id: (*id).to_string(),
                title: (*option_title).to_string(),
                category: title.to_string(),
                description: (*description).to_string(),
                image: None,
                video: None,
                price: Money::from_cents(*cents),
            })
            .collect(),
    }
}

fn product(
    id: &str,
    title: &str,
    product_category: &str,
    description: &str,
    media: (Option<&str>, Option<&str>),
    cents: i64,
    options: Vec<OptionCategory>,
) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        category: product_category.to_string(),
        description: description.to_string(),
        image: media.0.map(str::to_string),
        video: media.1.map(str::to_string),
        options: OptionGroups::new(options),
        price: Money::from_cents(cents),
    }
}

/// The default demo menu.
pub fn sample_products() -> Vec<Product> {
    vec![
        product(
            "margherita",
            "Margherita Pizza",
            "Pizza",
            "Tomato, mozzarella and fresh basil.",
            (
                Some("/media/margherita-1.jpg, /media/margherita-2.jpg"),
                Some("/media/margherita-oven.mp4"),
            ),
            1000,
            vec![
                category(
                    "Size",
                    &[
                        ("size-m", "Medium", "12 inch", 0),
                        ("size-l", "Large", "14 inch", 200),
                        ("size-xl", "Family", "18 inch", 450),
                    ],
                ),
                category(
                    "Crust",
                    &[
                        ("crust-classic", "Classic", "", 0),
                        ("crust-thin", "Thin", "Crispy and light", -100),
                        ("crust-stuffed", "Stuffed", "Cheese-filled edge", 250),
                    ],
                ),
            ],
        ),
        product(
            "caesar-salad",
            "Caesar Salad",
            "Salads",
            "Romaine, parmesan and croutons.",
            (Some("/media/caesar.jpg"), None),
            850,
            vec![
                category(
                    "Dressing",
                    &[
                        ("dressing-classic", "Classic Caesar", "", 0),
                        ("dressing-light", "Light", "Yogurt based", 0),
                    ],
                ),
                category(
                    "Protein",
                    &[
                        ("protein-none", "No protein", "", 0),
                        ("protein-chicken", "Grilled chicken", "", 300),
                        ("protein-shrimp", "Shrimp", "", 450),
                    ],
                ),
            ],
        ),
        product(
            "lemonade",
            "Fresh Lemonade",
            "Drinks",
            "Squeezed to order.",
            (Some("/media/lemonade.jpg"), None),
            350,
            Vec::new(),
        ),
        product(
            "tiramisu",
            "Tiramisu",
            "Desserts",
            "Espresso-soaked ladyfingers with mascarpone.",
            (None, Some("/media/tiramisu-1.mp4, /media/tiramisu-2.mp4")),
            650,
            vec![category(
                "Portion",
                &[
                    ("portion-single", "Single", "", 0),
                    ("portion-shared", "To share", "Two spoons", 400),
                ],
            )],
        ),
    ]
}

/// Named collections written by the seed binary.
pub fn sample_collections() -> Vec<(&'static str, Vec<Product>)> {
    let products = sample_products();
    let mock = products
        .into_iter()
        .filter(|p| p.has_options())
        .collect();
    vec![(SAMPLE_COLLECTION, mock)]
}
