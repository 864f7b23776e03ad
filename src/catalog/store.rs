//! Loading the catalog tables from CSV.
//!
//! Only the product table is mandatory. The tag and color tables are loaded
//! independently; a missing or unreadable relation table disables the filters
//! that depend on it without failing the load.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::model::parse_number;
use super::{Catalog, ColorAssociation, Product, TagAssociation};
use crate::error::{RecError, Result};

pub const PRODUCTS_FILE: &str = "products_main.csv";
pub const TAGS_FILE: &str = "product_tags.csv";
pub const COLORS_FILE: &str = "product_colors.csv";

/// Outcome of loading one optional relation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableStatus {
    Loaded { rows: usize },
    Missing,
    Failed { reason: String },
}

impl TableStatus {
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Summary of a catalog load, for user feedback.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub products: usize,
    pub skipped_rows: usize,
    pub tags: TableStatus,
    pub colors: TableStatus,
}

impl LoadReport {
    /// One line per table, in the order they were loaded.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Loaded {} products", self.products)];
        if self.skipped_rows > 0 {
            lines.push(format!("Skipped {} product rows without an id", self.skipped_rows));
        }
        for (file, status) in [(TAGS_FILE, &self.tags), (COLORS_FILE, &self.colors)] {
            lines.push(match status {
                TableStatus::Loaded { rows } => format!("Loaded {file} ({rows} rows)"),
                TableStatus::Missing => format!("{file} not available"),
                TableStatus::Failed { reason } => format!("{file} not available: {reason}"),
            });
        }
        lines
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProductRow {
    id: Option<String>,
    brand: Option<String>,
    name: Option<String>,
    product_type: Option<String>,
    category: Option<String>,
    price: Option<String>,
    price_sign: Option<String>,
    currency: Option<String>,
    rating: Option<String>,
}

impl ProductRow {
    fn into_product(self) -> Option<Product> {
        let id = self.id.filter(|id| !id.is_empty())?;
        Some(Product {
            id,
            brand: self.brand,
            name: self.name,
            product_type: self.product_type,
            category: self.category,
            price: parse_number(self.price.as_deref()),
            price_sign: self.price_sign,
            currency: self.currency,
            rating: parse_number(self.rating.as_deref()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TagRow {
    id: Option<String>,
    tag: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ColorRow {
    product_id: Option<String>,
    colour_name: Option<String>,
    hex_value: Option<String>,
}

/// Load the catalog from `data_dir`.
///
/// Fails only when the product table is missing, unreadable, or lacks an
/// `id` column.
pub fn load_catalog(data_dir: &Path) -> Result<(Catalog, LoadReport)> {
    let (products, columns, skipped_rows) = load_products(&data_dir.join(PRODUCTS_FILE))?;
    info!(count = products.len(), "Loaded {} products", products.len());

    let (tags, tag_status) = load_optional(&data_dir.join(TAGS_FILE), load_tags);
    let (colors, color_status) = load_optional(&data_dir.join(COLORS_FILE), load_colors);

    let report = LoadReport {
        products: products.len(),
        skipped_rows,
        tags: tag_status,
        colors: color_status,
    };
    Ok((Catalog::with_columns(products, columns, tags, colors), report))
}

fn csv_reader(path: &Path) -> std::result::Result<csv::Reader<File>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
}

fn load_products(path: &Path) -> Result<(Vec<Product>, Vec<String>, usize)> {
    if !path.is_file() {
        return Err(RecError::CatalogNotFound(path.display().to_string()));
    }

    let unreadable = |err: csv::Error| RecError::CatalogUnreadable {
        path: path.display().to_string(),
        reason: err.to_string(),
    };

    let mut reader = csv_reader(path).map_err(unreadable)?;
    let columns: Vec<String> = reader
        .headers()
        .map_err(unreadable)?
        .iter()
        .map(ToString::to_string)
        .collect();

    if !columns.iter().any(|c| c == "id") {
        return Err(RecError::CatalogSchema {
            path: path.display().to_string(),
            reason: "missing column `id`".to_string(),
        });
    }

    let mut products = Vec::new();
    let mut skipped = 0;
    for row in reader.deserialize::<ProductRow>() {
        match row.map_err(unreadable)?.into_product() {
            Some(product) => products.push(product),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, path = %path.display(), "skipped product rows without an id");
    }

    Ok((products, columns, skipped))
}

fn load_optional<T>(
    path: &Path,
    loader: fn(&Path) -> std::result::Result<Vec<T>, String>,
) -> (Option<Vec<T>>, TableStatus) {
    if !path.is_file() {
        warn!(path = %path.display(), "relation table not found; dependent filters disabled");
        return (None, TableStatus::Missing);
    }
    match loader(path) {
        Ok(rows) => {
            info!(path = %path.display(), rows = rows.len(), "loaded relation table");
            let status = TableStatus::Loaded { rows: rows.len() };
            (Some(rows), status)
        }
        Err(reason) => {
            warn!(path = %path.display(), %reason, "relation table unreadable; dependent filters disabled");
            (None, TableStatus::Failed { reason })
        }
    }
}

fn require_columns(reader: &mut csv::Reader<File>, required: &[&str]) -> std::result::Result<(), String> {
    let headers = reader.headers().map_err(|err| err.to_string())?;
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(format!("missing column `{column}`"));
        }
    }
    Ok(())
}

fn load_tags(path: &Path) -> std::result::Result<Vec<TagAssociation>, String> {
    let mut reader = csv_reader(path).map_err(|err| err.to_string())?;
    require_columns(&mut reader, &["id", "tag"])?;

    let mut rows = Vec::new();
    for row in reader.deserialize::<TagRow>() {
        let row = row.map_err(|err| err.to_string())?;
        if let (Some(id), Some(tag)) = (row.id, row.tag) {
            rows.push(TagAssociation::new(id, tag));
        }
    }
    Ok(rows)
}

fn load_colors(path: &Path) -> std::result::Result<Vec<ColorAssociation>, String> {
    let mut reader = csv_reader(path).map_err(|err| err.to_string())?;
    require_columns(&mut reader, &["product_id", "colour_name"])?;

    let mut rows = Vec::new();
    for row in reader.deserialize::<ColorRow>() {
        let row = row.map_err(|err| err.to_string())?;
        if let (Some(id), Some(name)) = (row.product_id, row.colour_name) {
            rows.push(ColorAssociation::new(id, name, row.hex_value.as_deref()));
        }
    }
    Ok(rows)
}
