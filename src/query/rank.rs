//! Ordering and truncation of matched products.

use std::cmp::Ordering;

use crate::catalog::Product;

/// Order `products` and apply `limit`.
///
/// If any product has a rating, sort by rating descending with unrated
/// products last; otherwise sort by name ascending with unnamed products
/// last. Both sorts are stable. A `limit` of zero or less keeps everything.
pub fn rank(mut products: Vec<&Product>, limit: i64) -> Vec<&Product> {
    if products.iter().any(|p| p.rating.is_some()) {
        products.sort_by(|a, b| by_rating_desc(a.rating, b.rating));
    } else {
        products.sort_by(|a, b| by_name_asc(a.name.as_deref(), b.name.as_deref()));
    }

    if limit > 0 {
        products.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    products
}

fn by_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_name_asc(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
