//! Shared catalog builders for integration tests.

use std::path::{Path, PathBuf};

use cosmorec::catalog::{Catalog, ColorAssociation, Product, TagAssociation};
use tempfile::TempDir;

/// Directory holding the shared CSV catalog.
pub fn fixture_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog")
}

/// A product with the fields most tests care about.
pub fn product(id: &str, name: &str, brand: &str, price: Option<f64>, rating: Option<f64>) -> Product {
    let mut product = Product::new(id).with_name(name).with_brand(brand);
    if let Some(price) = price {
        product = product.with_price(price);
    }
    if let Some(rating) = rating {
        product = product.with_rating(rating);
    }
    product
}

pub fn tags(pairs: &[(&str, &str)]) -> Vec<TagAssociation> {
    pairs
        .iter()
        .map(|(id, tag)| TagAssociation::new(*id, *tag))
        .collect()
}

pub fn colors(pairs: &[(&str, &str)]) -> Vec<ColorAssociation> {
    pairs
        .iter()
        .map(|(id, name)| ColorAssociation::new(*id, *name, None))
        .collect()
}

/// Five products across two brands, with tags and colors.
pub fn two_brand_catalog() -> Catalog {
    let products = vec![
        product("1", "Great Lash", "Maybelline", Some(5.49), Some(4.5)),
        product("2", "Lash Sensational", "Maybelline", Some(9.99), Some(4.8)),
        product("3", "Fit Me", "Maybelline", Some(7.99), Some(3.9)),
        product("4", "Infallible", "L'Oreal", Some(12.0), Some(4.9)),
        product("5", "Voluminous", "L'Oreal", Some(8.5), None),
    ];
    let tags = tags(&[
        ("1", "vegan"),
        ("2", "vegan"),
        ("2", "cruelty free"),
        ("4", "cruelty free"),
        ("5", "vegan"),
    ]);
    let colors = colors(&[("1", "Black"), ("2", "Brown"), ("4", "Black"), ("5", "Red")]);
    Catalog::new(products, Some(tags), Some(colors))
}

/// A temp directory holding the given catalog tables.
pub fn data_dir_with(tables: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (file, content) in tables {
        std::fs::write(temp.path().join(file), content).unwrap();
    }
    temp
}

pub fn ids<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a str> {
    products.into_iter().map(|p| p.id.as_str()).collect()
}
