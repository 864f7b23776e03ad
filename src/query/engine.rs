//! Conjunctive filtering of the catalog.
//!
//! Each active criterion becomes one [`Filter`]; filters run in a fixed order
//! and narrow the candidate set. A filter whose backing column or relation
//! table is absent is skipped and reported, never treated as "no products".

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use super::criteria::{Criteria, FilterField};
use crate::catalog::{Catalog, PriceBucket, Product};

/// A single active predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Brand(String),
    ProductType(String),
    Category(String),
    Price(PriceBucket),
    MinRating(f64),
    /// Products must carry every tag.
    Tags(Vec<String>),
    /// Products must carry at least one color.
    Colors(Vec<String>),
}

impl Filter {
    /// Active filters of `criteria` in evaluation order.
    pub fn from_criteria(criteria: &Criteria) -> Vec<Self> {
        let mut filters = Vec::new();
        if let Some(brand) = criteria.brand() {
            filters.push(Self::Brand(brand.to_string()));
        }
        if let Some(product_type) = criteria.product_type() {
            filters.push(Self::ProductType(product_type.to_string()));
        }
        if let Some(category) = criteria.category() {
            filters.push(Self::Category(category.to_string()));
        }
        if let Some(bucket) = criteria.price_bucket() {
            filters.push(Self::Price(bucket));
        }
        if let Some(rating) = criteria.min_rating() {
            filters.push(Self::MinRating(rating));
        }
        if !criteria.tags().is_empty() {
            filters.push(Self::Tags(criteria.tags().to_vec()));
        }
        if !criteria.colors().is_empty() {
            filters.push(Self::Colors(criteria.colors().to_vec()));
        }
        filters
    }

    pub const fn field(&self) -> FilterField {
        match self {
            Self::Brand(_) => FilterField::Brand,
            Self::ProductType(_) => FilterField::ProductType,
            Self::Category(_) => FilterField::Category,
            Self::Price(_) => FilterField::PriceRange,
            Self::MinRating(_) => FilterField::MinRating,
            Self::Tags(_) => FilterField::Tags,
            Self::Colors(_) => FilterField::Colors,
        }
    }

    /// Human-readable value, e.g. `"vegan, organic"` or `"$5-$10"`.
    pub fn describe(&self) -> String {
        match self {
            Self::Brand(value) | Self::ProductType(value) | Self::Category(value) => value.clone(),
            Self::Price(bucket) => bucket.label().to_string(),
            Self::MinRating(rating) => format!("{rating:.1}"),
            Self::Tags(values) | Self::Colors(values) => values.join(", "),
        }
    }

    /// Whether the data this filter reads was loaded.
    fn is_available(&self, catalog: &Catalog) -> bool {
        match self {
            Self::Brand(_) => catalog.has_column("brand"),
            Self::ProductType(_) => catalog.has_column("product_type"),
            Self::Category(_) => catalog.has_column("category"),
            Self::Price(_) => catalog.has_column("price"),
            Self::MinRating(_) => catalog.has_column("rating"),
            Self::Tags(_) => catalog.tags().is_some(),
            Self::Colors(_) => catalog.colors().is_some(),
        }
    }

    fn apply<'a>(&self, catalog: &'a Catalog, products: Vec<&'a Product>) -> Vec<&'a Product> {
        match self {
            Self::Brand(value) => retain(products, |p| p.brand.as_deref() == Some(value.as_str())),
            Self::ProductType(value) => {
                retain(products, |p| p.product_type.as_deref() == Some(value.as_str()))
            }
            Self::Category(value) => {
                retain(products, |p| p.category.as_deref() == Some(value.as_str()))
            }
            Self::Price(bucket) => retain(products, |p| p.price.is_some_and(|price| bucket.contains(price))),
            Self::MinRating(min) => retain(products, |p| p.rating.is_some_and(|rating| rating >= *min)),
            Self::Tags(tags) => {
                let ids = catalog.index().products_with_all_tags(tags).unwrap_or_default();
                retain(products, |p| ids.contains(p.id.as_str()))
            }
            Self::Colors(colors) => {
                let ids: HashSet<&str> = catalog.index().products_with_any_color(colors);
                retain(products, |p| ids.contains(p.id.as_str()))
            }
        }
    }
}

fn retain<'a>(products: Vec<&'a Product>, keep: impl Fn(&Product) -> bool) -> Vec<&'a Product> {
    products.into_iter().filter(|p| keep(p)).collect()
}

/// Record of one filter's effect, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedFilter {
    pub field: FilterField,
    pub value: String,
    /// `false` when the backing data is missing and the filter was skipped.
    pub applied: bool,
    /// Candidates left after this step.
    pub remaining: usize,
}

/// Unranked matches plus the trace of how they were narrowed.
#[derive(Debug, Clone)]
pub struct QueryOutcome<'a> {
    pub products: Vec<&'a Product>,
    pub filters: Vec<AppliedFilter>,
}

pub struct QueryEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> QueryEngine<'a> {
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Products satisfying every active criterion, in catalog order.
    pub fn filter(&self, criteria: &Criteria) -> QueryOutcome<'a> {
        let mut products: Vec<&'a Product> = self.catalog.products().iter().collect();
        let mut trace = Vec::new();

        for filter in Filter::from_criteria(criteria) {
            let applied = filter.is_available(self.catalog);
            if applied {
                products = filter.apply(self.catalog, products);
                debug!(field = filter.field().label(), value = %filter.describe(), remaining = products.len(), "applied filter");
            } else {
                warn!(field = filter.field().label(), "filter data unavailable; skipping");
            }
            trace.push(AppliedFilter {
                field: filter.field(),
                value: filter.describe(),
                applied,
                remaining: products.len(),
            });
        }

        QueryOutcome {
            products,
            filters: trace,
        }
    }
}
