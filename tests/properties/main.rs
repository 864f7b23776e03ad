//! Property-based tests for the query pipeline and matcher.

use std::collections::BTreeSet;

use cosmorec::catalog::{Catalog, ColorAssociation, PriceBucket, Product, TagAssociation};
use cosmorec::matcher::{suggest, Suggestion, DEFAULT_FUZZY_CUTOFF};
use cosmorec::query::{recommend, Criteria, QueryEngine};
use proptest::prelude::*;

const BRANDS: [&str; 3] = ["Maybelline", "nyx", "dior"];
const TAGS: [&str; 3] = ["vegan", "organic", "cruelty free"];
const COLORS: [&str; 3] = ["red", "black", "nude"];

// =============================================================================
// Strategies
// =============================================================================

#[derive(Debug, Clone)]
struct Row {
    brand: usize,
    price: Option<f64>,
    rating: Option<f64>,
    tags: Vec<usize>,
    colors: Vec<usize>,
}

fn row_strategy() -> impl Strategy<Value = Row> {
    (
        0..BRANDS.len(),
        prop::option::of(0.0f64..50.0),
        prop::option::of(1.0f64..=5.0),
        prop::collection::vec(0..TAGS.len(), 0..3),
        prop::collection::vec(0..COLORS.len(), 0..3),
    )
        .prop_map(|(brand, price, rating, tags, colors)| Row {
            brand,
            price,
            rating,
            tags,
            colors,
        })
}

fn build_catalog(rows: &[Row]) -> Catalog {
    let mut products = Vec::new();
    let mut tags = Vec::new();
    let mut colors = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let id = i.to_string();
        let mut product = Product::new(&id)
            .with_name(format!("Product {i:03}"))
            .with_brand(BRANDS[row.brand]);
        if let Some(price) = row.price {
            product = product.with_price(price);
        }
        if let Some(rating) = row.rating {
            product = product.with_rating(rating);
        }
        products.push(product);
        for t in &row.tags {
            tags.push(TagAssociation::new(&id, TAGS[*t]));
        }
        for c in &row.colors {
            colors.push(ColorAssociation::new(&id, COLORS[*c], None));
        }
    }
    Catalog::new(products, Some(tags), Some(colors))
}

/// One single-dimension criterion, selected by `kind`.
fn single(kind: usize, pick: usize) -> Criteria {
    let criteria = Criteria::new().with_limit(0);
    match kind {
        0 => criteria.with_brand(BRANDS[pick % BRANDS.len()]),
        1 => criteria.with_price_bucket(PriceBucket::ALL[pick % PriceBucket::ALL.len()]),
        2 => criteria.with_tags([TAGS[pick % TAGS.len()]]),
        3 => criteria.with_colors([COLORS[pick % COLORS.len()]]),
        _ => criteria.with_min_rating(1.0 + (pick % 5) as f64),
    }
}

fn merge(a: &Criteria, b: &Criteria) -> Criteria {
    let mut merged = Criteria::new().with_limit(0);
    for c in [a, b] {
        if let Some(brand) = c.brand() {
            merged = merged.with_brand(brand);
        }
        if let Some(bucket) = c.price_bucket() {
            merged = merged.with_price_bucket(bucket);
        }
        if !c.tags().is_empty() {
            merged = merged.with_tags(c.tags().to_vec());
        }
        if !c.colors().is_empty() {
            merged = merged.with_colors(c.colors().to_vec());
        }
        if let Some(rating) = c.min_rating() {
            merged = merged.with_min_rating(rating);
        }
    }
    merged
}

fn matching_ids(catalog: &Catalog, criteria: &Criteria) -> BTreeSet<String> {
    QueryEngine::new(catalog)
        .filter(criteria)
        .products
        .iter()
        .map(|p| p.id.clone())
        .collect()
}

fn ranked_ids(catalog: &Catalog, criteria: &Criteria) -> Vec<String> {
    recommend(catalog, criteria)
        .products()
        .map(|p| p.id.clone())
        .collect()
}

// =============================================================================
// Query properties
// =============================================================================

proptest! {
    #[test]
    fn same_query_is_idempotent(
        rows in prop::collection::vec(row_strategy(), 0..30),
        kind in 0usize..5,
        pick in 0usize..6,
    ) {
        let catalog = build_catalog(&rows);
        let criteria = single(kind, pick);
        prop_assert_eq!(ranked_ids(&catalog, &criteria), ranked_ids(&catalog, &criteria));
    }

    #[test]
    fn filter_pairs_commute_and_conjoin(
        rows in prop::collection::vec(row_strategy(), 0..30),
        kind_a in 0usize..5,
        kind_b in 0usize..5,
        pick_a in 0usize..6,
        pick_b in 0usize..6,
    ) {
        prop_assume!(kind_a != kind_b);
        let catalog = build_catalog(&rows);
        let a = single(kind_a, pick_a);
        let b = single(kind_b, pick_b);

        let ab = matching_ids(&catalog, &merge(&a, &b));
        let ba = matching_ids(&catalog, &merge(&b, &a));
        let both: BTreeSet<String> = matching_ids(&catalog, &a)
            .intersection(&matching_ids(&catalog, &b))
            .cloned()
            .collect();
        prop_assert_eq!(&ab, &ba);
        prop_assert_eq!(ab, both);
    }

    #[test]
    fn limit_truncates_ranked_prefix(
        rows in prop::collection::vec(row_strategy(), 0..30),
        limit in -3i64..10,
    ) {
        let catalog = build_catalog(&rows);
        let all = ranked_ids(&catalog, &Criteria::new().with_limit(0));
        let limited = ranked_ids(&catalog, &Criteria::new().with_limit(limit));

        if limit <= 0 {
            prop_assert_eq!(limited, all);
        } else {
            let expected = usize::try_from(limit).unwrap().min(all.len());
            prop_assert_eq!(&limited[..], &all[..expected]);
        }
    }

    #[test]
    fn ranked_ratings_never_increase(rows in prop::collection::vec(row_strategy(), 1..30)) {
        let catalog = build_catalog(&rows);
        let set = recommend(&catalog, &Criteria::new().with_limit(0));
        let ratings: Vec<Option<f64>> = set.products().map(|p| p.rating).collect();

        if ratings.iter().any(Option::is_some) {
            let first_none = ratings.iter().position(Option::is_none).unwrap_or(ratings.len());
            prop_assert!(ratings[first_none..].iter().all(Option::is_none));
            let rated: Vec<f64> = ratings.iter().flatten().copied().collect();
            prop_assert!(rated.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}

// =============================================================================
// Matcher properties
// =============================================================================

proptest! {
    #[test]
    fn listed_option_matches_exactly_in_any_case(
        options in prop::collection::btree_set("[a-z]{3,10}", 1..8),
        index in any::<prop::sample::Index>(),
        upper in any::<bool>(),
    ) {
        let options: Vec<String> = options.into_iter().collect();
        let chosen = index.get(&options).clone();
        let raw = if upper { chosen.to_uppercase() } else { chosen.clone() };

        prop_assert_eq!(
            suggest(&raw, &options, DEFAULT_FUZZY_CUTOFF),
            Suggestion::Exact(chosen)
        );
    }

    #[test]
    fn close_suggestions_are_listed_options(
        options in prop::collection::vec("[a-z]{3,10}", 1..8),
        raw in "[a-z]{1,12}",
    ) {
        match suggest(&raw, &options, DEFAULT_FUZZY_CUTOFF) {
            Suggestion::Close { value, score } => {
                prop_assert!(options.contains(&value));
                prop_assert!(score >= DEFAULT_FUZZY_CUTOFF);
            }
            Suggestion::Exact(value) => prop_assert!(options.contains(&value)),
            Suggestion::None => {}
        }
    }
}
