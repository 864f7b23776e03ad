//! Recommendation queries: criteria validation, filtering and ranking.

pub mod criteria;
pub mod engine;
pub mod rank;

use serde::Serialize;

use crate::catalog::{Catalog, ColorSwatch, Product};

pub use criteria::{
    resolve_criteria, split_list, AcceptSuggestions, Confirm, Criteria, CriteriaResolver,
    DeclineSuggestions, FilterField, FilterNotice, NoticeReason, RawCriteria, Resolution,
    DEFAULT_LIMIT,
};
pub use engine::{AppliedFilter, Filter, QueryEngine, QueryOutcome};
pub use rank::rank;

/// One ranked product with its relations attached.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub tags: &'a [String],
    pub colors: &'a [ColorSwatch],
}

/// Ranked, truncated result of one query.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationSet<'a> {
    /// Matches before truncation.
    pub matched: usize,
    pub limit: i64,
    pub filters: Vec<AppliedFilter>,
    pub items: Vec<Recommendation<'a>>,
}

impl<'a> RecommendationSet<'a> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Ranked products, borrowed from the catalog rather than the set.
    pub fn products(&self) -> impl Iterator<Item = &'a Product> + '_ {
        self.items.iter().map(|item| item.product)
    }
}

/// Filter, rank and truncate the catalog for `criteria`.
pub fn recommend<'a>(catalog: &'a Catalog, criteria: &Criteria) -> RecommendationSet<'a> {
    let outcome = QueryEngine::new(catalog).filter(criteria);
    let matched = outcome.products.len();
    let index = catalog.index();

    let items = rank(outcome.products, criteria.limit())
        .into_iter()
        .map(|product| Recommendation {
            product,
            tags: index.tags_for(&product.id),
            colors: index.colors_for(&product.id),
        })
        .collect();

    tracing::info!(matched, limit = criteria.limit(), "query complete");

    RecommendationSet {
        matched,
        limit: criteria.limit(),
        filters: outcome.filters,
        items,
    }
}
