//! Row types for the product table and its relation tables.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Hex value used when a color row has no usable `hex_value`.
pub const PLACEHOLDER_HEX: &str = "#CCCCCC";

static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{6}|[0-9a-fA-F]{3})$").expect("valid hex color regex")
});

/// One catalog product. Created once at load and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: String,
    pub brand: Option<String>,
    pub name: Option<String>,
    pub product_type: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub price_sign: Option<String>,
    pub currency: Option<String>,
    pub rating: Option<f64>,
}

impl Product {
    /// A product with only its identifier set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            brand: None,
            name: None,
            product_type: None,
            category: None,
            price: None,
            price_sign: None,
            currency: None,
            rating: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
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
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_price_sign(mut self, sign: impl Into<String>) -> Self {
        self.price_sign = Some(sign.into());
        self
    }

    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Name for display, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// `(product_id, tag)` row of the tag table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAssociation {
    pub product_id: String,
    pub tag: String,
}

impl TagAssociation {
    pub fn new(product_id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            tag: tag.into(),
        }
    }
}

/// `(product_id, colour_name, hex_value)` row of the color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorAssociation {
    pub product_id: String,
    /// Name as stored in the table, used for display.
    pub colour_name: String,
    /// Normalized `#RRGGBB`/`#RGB` value, or [`PLACEHOLDER_HEX`].
    pub hex_value: String,
}

impl ColorAssociation {
    pub fn new(
        product_id: impl Into<String>,
        colour_name: impl Into<String>,
        hex_value: Option<&str>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            colour_name: colour_name.into(),
            hex_value: normalize_hex(hex_value),
        }
    }

    /// Lowercased name used for matching and counting.
    pub fn match_key(&self) -> String {
        color_key(&self.colour_name)
    }
}

/// Case-normalized key for a color name.
pub fn color_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize a raw hex value, adding a missing `#` and replacing anything
/// malformed with the placeholder.
pub fn normalize_hex(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return PLACEHOLDER_HEX.to_string();
    };
    if !HEX_COLOR_REGEX.is_match(raw) {
        return PLACEHOLDER_HEX.to_string();
    }
    if raw.starts_with('#') {
        raw.to_string()
    } else {
        format!("#{raw}")
    }
}

/// Parse a numeric cell; blank, unparseable and non-finite values become `None`.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}
