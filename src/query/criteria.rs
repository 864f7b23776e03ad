//! Validated query criteria and the boundary that produces them.
//!
//! Raw user input enters as [`RawCriteria`] (or field by field through
//! [`CriteriaResolver`]), is checked against the [`OptionCatalog`] with the
//! matcher, and leaves as an immutable [`Criteria`] plus a [`FilterNotice`]
//! for every value that was corrected or dropped.

use std::fmt;

use serde::Serialize;

use crate::catalog::{OptionCatalog, OptionField, PriceBucket};
use crate::error::Result;
use crate::matcher::{self, Suggestion};

/// Result count used when none is given.
pub const DEFAULT_LIMIT: i64 = 10;

/// Accepted range for the minimum-rating filter.
pub const RATING_RANGE: std::ops::RangeInclusive<f64> = 1.0..=5.0;

/// Every filter dimension a query can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Brand,
    ProductType,
    Category,
    PriceRange,
    Tags,
    Colors,
    MinRating,
    Limit,
}

impl FilterField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Brand => "Brand",
            Self::ProductType => "Product Type",
            Self::Category => "Category",
            Self::PriceRange => "Price Range",
            Self::Tags => "Tags",
            Self::Colors => "Colors",
            Self::MinRating => "Minimum Rating",
            Self::Limit => "Limit",
        }
    }

    /// The option domain backing this field, if it has one.
    pub const fn option_field(self) -> Option<OptionField> {
        match self {
            Self::Brand => Some(OptionField::Brand),
            Self::ProductType => Some(OptionField::ProductType),
            Self::Category => Some(OptionField::Category),
            Self::PriceRange => Some(OptionField::PriceRange),
            Self::Tags => Some(OptionField::Tags),
            Self::Colors => Some(OptionField::Colors),
            Self::MinRating | Self::Limit => None,
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Filters for one query; unset dimensions are not filtered on.
///
/// Criteria produced by [`CriteriaResolver`] or [`resolve_criteria`] only
/// hold members of the corresponding option sets. The `with_*` builders do
/// no validation: a value outside the catalog simply matches nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criteria {
    brand: Option<String>,
    product_type: Option<String>,
    category: Option<String>,
    price_bucket: Option<PriceBucket>,
    tags: Vec<String>,
    colors: Vec<String>,
    min_rating: Option<f64>,
    limit: i64,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            brand: None,
            product_type: None,
            category: None,
            price_bucket: None,
            tags: Vec::new(),
            colors: Vec::new(),
            min_rating: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn with_price_bucket(mut self, bucket: PriceBucket) -> Self {
        self.price_bucket = Some(bucket);
        self
    }

    /// Required tags (intersection). An empty list leaves the filter unset.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = dedup(tags.into_iter().map(Into::into));
        self
    }

    /// Desired colors (union). An empty list leaves the filter unset.
    #[must_use]
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = dedup(colors.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// Maximum results; zero or negative returns every match.
    #[must_use]
    pub const fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn product_type(&self) -> Option<&str> {
        self.product_type.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub const fn price_bucket(&self) -> Option<PriceBucket> {
        self.price_bucket
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub const fn min_rating(&self) -> Option<f64> {
        self.min_rating
    }

    pub const fn limit(&self) -> i64 {
        self.limit
    }
}

fn dedup(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// Unvalidated criteria as typed by a user or passed as flags.
#[derive(Debug, Clone, Default)]
pub struct RawCriteria {
    pub brand: Option<String>,
    pub product_type: Option<String>,
    pub category: Option<String>,
    /// A bucket label or its 1-based menu position.
    pub price_range: Option<String>,
    pub tags: Vec<String>,
    pub colors: Vec<String>,
    pub min_rating: Option<String>,
    pub limit: Option<String>,
}

/// Why a raw value did not become (exactly) what the user typed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoticeReason {
    /// The backing column or relation table is absent this session.
    Unavailable,
    /// No legal value matched, exactly or closely.
    NotFound,
    /// A close match was offered and declined.
    SuggestionDeclined { suggestion: String },
    /// A close match was offered and accepted.
    Corrected { value: String },
    /// A rating outside 1-5.
    OutOfRange,
    /// Not a number.
    Unparseable,
}

/// Disclosure of a corrected or skipped filter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterNotice {
    pub field: FilterField,
    pub raw: String,
    pub reason: NoticeReason,
}

impl FilterNotice {
    /// Whether the value was dropped rather than corrected.
    pub const fn skips_value(&self) -> bool {
        !matches!(self.reason, NoticeReason::Corrected { .. })
    }
}

impl fmt::Display for FilterNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field;
        let raw = &self.raw;
        match &self.reason {
            NoticeReason::Unavailable => {
                write!(f, "{field}: filtering is unavailable for this catalog; skipping '{raw}'")
            }
            NoticeReason::NotFound | NoticeReason::SuggestionDeclined { .. } => {
                write!(f, "{field}: '{raw}' not found in available options; skipping")
            }
            NoticeReason::Corrected { value } => write!(f, "{field}: using '{value}' for '{raw}'"),
            NoticeReason::OutOfRange => {
                write!(f, "{field}: rating must be between 1 and 5, got '{raw}'; skipping")
            }
            NoticeReason::Unparseable if field == FilterField::Limit => {
                write!(f, "{field}: '{raw}' is not a whole number; using the default")
            }
            NoticeReason::Unparseable => write!(f, "{field}: '{raw}' is not a number; skipping"),
        }
    }
}

/// Source of yes/no decisions on close-match suggestions.
pub trait Confirm {
    /// Whether `suggestion` should replace the unrecognized `raw` value.
    fn confirm(&mut self, field: FilterField, raw: &str, suggestion: &str) -> Result<bool>;
}

/// Accepts every close match.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptSuggestions;

impl Confirm for AcceptSuggestions {
    fn confirm(&mut self, _field: FilterField, _raw: &str, _suggestion: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Declines every close match; only exact (case-insensitive) values pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineSuggestions;

impl Confirm for DeclineSuggestions {
    fn confirm(&mut self, _field: FilterField, _raw: &str, _suggestion: &str) -> Result<bool> {
        Ok(false)
    }
}

/// Validated criteria plus the notices produced while validating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub criteria: Criteria,
    pub notices: Vec<FilterNotice>,
}

/// Field-by-field criteria validation.
///
/// The interactive prompt calls one method per answer so suggestions can be
/// confirmed right after the question; [`resolve_criteria`] calls them all.
pub struct CriteriaResolver<'a> {
    options: &'a OptionCatalog,
    cutoff: f64,
    criteria: Criteria,
    notices: Vec<FilterNotice>,
}

impl<'a> CriteriaResolver<'a> {
    pub fn new(options: &'a OptionCatalog, cutoff: f64, default_limit: i64) -> Self {
        Self {
            options,
            cutoff,
            criteria: Criteria::new().with_limit(default_limit),
            notices: Vec::new(),
        }
    }

    pub fn notices(&self) -> &[FilterNotice] {
        &self.notices
    }

    pub fn finish(self) -> Resolution {
        Resolution {
            criteria: self.criteria,
            notices: self.notices,
        }
    }

    /// Resolve a single-valued categorical field (brand, type, category).
    pub fn single(&mut self, field: FilterField, raw: &str, confirm: &mut dyn Confirm) -> Result<()> {
        let Some(value) = self.resolve_value(field, raw, confirm)? else {
            return Ok(());
        };
        match field {
            FilterField::Brand => self.criteria.brand = Some(value),
            FilterField::ProductType => self.criteria.product_type = Some(value),
            FilterField::Category => self.criteria.category = Some(value),
            FilterField::PriceRange => {
                self.criteria.price_bucket = PriceBucket::from_label(&value);
            }
            FilterField::Tags => self.criteria.tags = vec![value],
            FilterField::Colors => self.criteria.colors = vec![value],
            FilterField::MinRating | FilterField::Limit => {}
        }
        Ok(())
    }

    /// Resolve a price bucket given as a label or a 1-based menu position.
    pub fn price_range(&mut self, raw: &str, confirm: &mut dyn Confirm) -> Result<()> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(());
        }
        if !self.options.is_available(OptionField::PriceRange) {
            self.notice(FilterField::PriceRange, raw, NoticeReason::Unavailable);
            return Ok(());
        }
        if let Ok(position) = raw.parse::<usize>() {
            match PriceBucket::from_position(position) {
                Some(bucket) => self.criteria.price_bucket = Some(bucket),
                None => self.notice(FilterField::PriceRange, raw, NoticeReason::NotFound),
            }
            return Ok(());
        }
        self.single(FilterField::PriceRange, raw, confirm)
    }

    /// Resolve a multi-valued field (tags, colors). Values that do not
    /// resolve are dropped individually; if none survive the filter stays unset.
    pub fn multi<S: AsRef<str>>(
        &mut self,
        field: FilterField,
        raws: &[S],
        confirm: &mut dyn Confirm,
    ) -> Result<()> {
        let mut resolved = Vec::new();
        for raw in raws {
            if let Some(value) = self.resolve_value(field, raw.as_ref(), confirm)? {
                resolved.push(value);
            }
        }
        match field {
            FilterField::Tags => self.criteria.tags = dedup(resolved.into_iter()),
            FilterField::Colors => self.criteria.colors = dedup(resolved.into_iter()),
            _ => {}
        }
        Ok(())
    }

    /// Resolve the minimum rating; values outside 1-5 are dropped, not clamped.
    pub fn min_rating(&mut self, raw: &str) {
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }
        match raw.parse::<f64>() {
            Ok(rating) if RATING_RANGE.contains(&rating) => self.criteria.min_rating = Some(rating),
            Ok(_) => self.notice(FilterField::MinRating, raw, NoticeReason::OutOfRange),
            Err(_) => self.notice(FilterField::MinRating, raw, NoticeReason::Unparseable),
        }
    }

    /// Resolve the result limit; unparseable input keeps the default.
    pub fn limit(&mut self, raw: &str) {
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }
        match raw.parse::<i64>() {
            Ok(limit) => self.criteria.limit = limit,
            Err(_) => self.notice(FilterField::Limit, raw, NoticeReason::Unparseable),
        }
    }

    fn resolve_value(
        &mut self,
        field: FilterField,
        raw: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<Option<String>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let Some(options) = field.option_field().and_then(|f| self.options.get(f)) else {
            self.notice(field, raw, NoticeReason::Unavailable);
            return Ok(None);
        };

        match matcher::suggest(raw, options.as_slice(), self.cutoff) {
            Suggestion::Exact(value) => Ok(Some(value)),
            Suggestion::Close { value, score } => {
                tracing::debug!(field = field.label(), raw, %value, score, "close match");
                if confirm.confirm(field, raw, &value)? {
                    self.notice(field, raw, NoticeReason::Corrected { value: value.clone() });
                    Ok(Some(value))
                } else {
                    self.notice(field, raw, NoticeReason::SuggestionDeclined { suggestion: value });
                    Ok(None)
                }
            }
            Suggestion::None => {
                self.notice(field, raw, NoticeReason::NotFound);
                Ok(None)
            }
        }
    }

    fn notice(&mut self, field: FilterField, raw: &str, reason: NoticeReason) {
        let notice = FilterNotice {
            field,
            raw: raw.to_string(),
            reason,
        };
        tracing::debug!(%notice, "criteria notice");
        self.notices.push(notice);
    }
}

/// Validate every field of `raw` at once.
pub fn resolve_criteria(
    raw: &RawCriteria,
    options: &OptionCatalog,
    cutoff: f64,
    default_limit: i64,
    confirm: &mut dyn Confirm,
) -> Result<Resolution> {
    let mut resolver = CriteriaResolver::new(options, cutoff, default_limit);

    for (field, value) in [
        (FilterField::Brand, &raw.brand),
        (FilterField::ProductType, &raw.product_type),
        (FilterField::Category, &raw.category),
    ] {
        if let Some(value) = value {
            resolver.single(field, value, confirm)?;
        }
    }
    if let Some(price) = &raw.price_range {
        resolver.price_range(price, confirm)?;
    }
    resolver.multi(FilterField::Tags, &raw.tags, confirm)?;
    resolver.multi(FilterField::Colors, &raw.colors, confirm)?;
    if let Some(rating) = &raw.min_rating {
        resolver.min_rating(rating);
    }
    if let Some(limit) = &raw.limit {
        resolver.limit(limit);
    }

    Ok(resolver.finish())
}

/// Split a comma-separated answer into trimmed, non-empty items.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}
