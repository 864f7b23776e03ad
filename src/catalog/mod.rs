//! The in-memory product catalog.
//!
//! A [`Catalog`] owns the product table, the optional tag and color relation
//! tables, and the [`RelationIndex`] derived from them. It is loaded once by
//! [`store::load_catalog`] and is immutable afterward.

pub mod index;
pub mod model;
pub mod options;
pub mod store;

pub use index::{ColorSwatch, RelationIndex};
pub use model::{ColorAssociation, Product, TagAssociation};
pub use options::{OptionCatalog, OptionField, OptionSet, PriceBucket};
pub use store::{load_catalog, LoadReport};

/// Product columns understood by the loader and the result sink, in output order.
pub const PRODUCT_COLUMNS: [&str; 9] = [
    "id",
    "brand",
    "name",
    "product_type",
    "category",
    "price",
    "price_sign",
    "currency",
    "rating",
];

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    columns: Vec<String>,
    tags: Option<Vec<TagAssociation>>,
    colors: Option<Vec<ColorAssociation>>,
    index: RelationIndex,
}

impl Catalog {
    /// Build a catalog whose product table carries every known column.
    pub fn new(
        products: Vec<Product>,
        tags: Option<Vec<TagAssociation>>,
        colors: Option<Vec<ColorAssociation>>,
    ) -> Self {
        let columns = PRODUCT_COLUMNS.iter().map(ToString::to_string).collect();
        Self::with_columns(products, columns, tags, colors)
    }

    /// Build a catalog recording which product columns were present in the
    /// source header.
    pub fn with_columns(
        products: Vec<Product>,
        columns: Vec<String>,
        tags: Option<Vec<TagAssociation>>,
        colors: Option<Vec<ColorAssociation>>,
    ) -> Self {
        let index = RelationIndex::build(tags.as_deref(), colors.as_deref());
        Self {
            products,
            columns,
            tags,
            colors,
            index,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Header columns of the product table, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Tag rows, or `None` when the tag table was not loaded.
    pub fn tags(&self) -> Option<&[TagAssociation]> {
        self.tags.as_deref()
    }

    /// Color rows, or `None` when the color table was not loaded.
    pub fn colors(&self) -> Option<&[ColorAssociation]> {
        self.colors.as_deref()
    }

    pub const fn index(&self) -> &RelationIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
