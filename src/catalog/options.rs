//! Legal filter values derived from the loaded catalog.
//!
//! The catalog is computed once by [`OptionCatalog::build`] and is read-only
//! afterward; criteria resolution and the `options` command both borrow it.

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use super::{Catalog, ColorAssociation, Product};

/// Tags and colors seen fewer times than this are treated as noise.
pub const DEFAULT_NOISE_FLOOR: usize = 3;

/// Fixed price buckets: lower bound inclusive, upper bound exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PriceBucket {
    Under5,
    From5To10,
    From10To15,
    From15To20,
    From20To30,
    Over30,
}

impl PriceBucket {
    pub const ALL: [Self; 6] = [
        Self::Under5,
        Self::From5To10,
        Self::From10To15,
        Self::From15To20,
        Self::From20To30,
        Self::Over30,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Under5 => "Under $5",
            Self::From5To10 => "$5-$10",
            Self::From10To15 => "$10-$15",
            Self::From15To20 => "$15-$20",
            Self::From20To30 => "$20-$30",
            Self::Over30 => "Over $30",
        }
    }

    /// `(lower, upper)`; `None` upper means unbounded.
    pub const fn bounds(self) -> (f64, Option<f64>) {
        match self {
            Self::Under5 => (0.0, Some(5.0)),
            Self::From5To10 => (5.0, Some(10.0)),
            Self::From10To15 => (10.0, Some(15.0)),
            Self::From15To20 => (15.0, Some(20.0)),
            Self::From20To30 => (20.0, Some(30.0)),
            Self::Over30 => (30.0, None),
        }
    }

    pub fn contains(self, price: f64) -> bool {
        let (lower, upper) = self.bounds();
        price >= lower && upper.is_none_or(|upper| price < upper)
    }

    /// Bucket holding `price`, if any (negative prices fall in none).
    pub fn for_price(price: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.contains(price))
    }

    /// Case-insensitive label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.label().eq_ignore_ascii_case(label))
    }

    /// 1-based position as shown in the interactive menu.
    pub fn from_position(position: usize) -> Option<Self> {
        position.checked_sub(1).and_then(|idx| Self::ALL.get(idx).copied())
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Filterable fields that have a legal-value domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionField {
    Brand,
    ProductType,
    Category,
    PriceRange,
    Tags,
    Colors,
}

impl OptionField {
    pub const ALL: [Self; 6] = [
        Self::Brand,
        Self::ProductType,
        Self::Category,
        Self::PriceRange,
        Self::Tags,
        Self::Colors,
    ];

    /// Plural heading used when listing options.
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Brand => "Brands",
            Self::ProductType => "Product Types",
            Self::Category => "Categories",
            Self::PriceRange => "Price Ranges",
            Self::Tags => "Tags",
            Self::Colors => "Colors",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::ProductType => "product_type",
            Self::Category => "category",
            Self::PriceRange => "price_range",
            Self::Tags => "tags",
            Self::Colors => "colors",
        }
    }
}

/// Distinct legal values for one field, alphabetical unless built with
/// [`OptionSet::ordered`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionSet {
    values: Vec<String>,
}

impl OptionSet {
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Keep the given order, dropping repeats.
    pub fn ordered<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::<String>::into).unique().collect(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Legal values per filterable field. A `None` entry means the field is
/// unavailable for the session (column or relation table absent), which is
/// reported differently from an empty set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OptionCatalog {
    brand: Option<OptionSet>,
    product_type: Option<OptionSet>,
    category: Option<OptionSet>,
    price_range: Option<OptionSet>,
    tags: Option<OptionSet>,
    colors: Option<OptionSet>,
}

impl OptionCatalog {
    pub fn build(catalog: &Catalog, noise_floor: usize) -> Self {
        let options = Self {
            brand: distinct_values(catalog, "brand", |p| p.brand.as_ref()),
            product_type: distinct_values(catalog, "product_type", |p| p.product_type.as_ref()),
            category: distinct_values(catalog, "category", |p| p.category.as_ref()),
            price_range: catalog
                .has_column("price")
                .then(|| OptionSet::ordered(PriceBucket::ALL.map(PriceBucket::label))),
            tags: catalog.tags().map(|rows| {
                frequent_values(rows.iter().map(|row| row.tag.clone()), noise_floor)
            }),
            colors: catalog.colors().map(|rows| {
                frequent_values(rows.iter().map(ColorAssociation::match_key), noise_floor)
            }),
        };

        for field in OptionField::ALL {
            match options.get(field) {
                Some(set) => tracing::info!(field = field.key(), count = set.len(), "options available"),
                None => tracing::debug!(field = field.key(), "options unavailable"),
            }
        }

        options
    }

    pub const fn get(&self, field: OptionField) -> Option<&OptionSet> {
        match field {
            OptionField::Brand => self.brand.as_ref(),
            OptionField::ProductType => self.product_type.as_ref(),
            OptionField::Category => self.category.as_ref(),
            OptionField::PriceRange => self.price_range.as_ref(),
            OptionField::Tags => self.tags.as_ref(),
            OptionField::Colors => self.colors.as_ref(),
        }
    }

    pub const fn is_available(&self, field: OptionField) -> bool {
        self.get(field).is_some()
    }
}

fn distinct_values(
    catalog: &Catalog,
    column: &str,
    get: impl Fn(&Product) -> Option<&String>,
) -> Option<OptionSet> {
    catalog
        .has_column(column)
        .then(|| OptionSet::from_values(catalog.products().iter().filter_map(get).cloned()))
}

/// Values occurring at least `floor` times, sorted.
fn frequent_values(values: impl Iterator<Item = String>, floor: usize) -> OptionSet {
    OptionSet::from_values(
        values
            .filter(|value| !value.is_empty())
            .counts()
            .into_iter()
            .filter(|(_, count)| *count >= floor)
            .map(|(value, _)| value),
    )
}
