//! Recommendation results formatter

use std::path::PathBuf;

use console::style;
use serde::Serialize;

use crate::catalog::Product;
use crate::cli::output::{Formattable, HumanLayout, OutputFormat};
use crate::query::{AppliedFilter, FilterNotice, Recommendation, RecommendationSet};

/// Colors listed per product before collapsing into an overflow line.
pub const DEFAULT_MAX_COLORS: usize = 5;

/// A recommendation set prepared for display.
#[derive(Debug, Clone)]
pub struct RecommendationReport<'a> {
    pub set: &'a RecommendationSet<'a>,
    pub notices: &'a [FilterNotice],
    pub max_colors: usize,
    pub saved_to: Option<PathBuf>,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    status: &'static str,
    matched: usize,
    count: usize,
    limit: i64,
    filters: &'a [AppliedFilter],
    notices: &'a [FilterNotice],
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_to: Option<String>,
    results: &'a [Recommendation<'a>],
}

impl<'a> RecommendationReport<'a> {
    pub fn new(set: &'a RecommendationSet<'a>, notices: &'a [FilterNotice]) -> Self {
        Self {
            set,
            notices,
            max_colors: DEFAULT_MAX_COLORS,
            saved_to: None,
        }
    }

    #[must_use]
    pub const fn with_max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors;
        self
    }

    #[must_use]
    pub fn with_saved_to(mut self, path: Option<PathBuf>) -> Self {
        self.saved_to = path;
        self
    }

    fn to_json(&self) -> ReportJson<'_> {
        ReportJson {
            status: "ok",
            matched: self.set.matched,
            count: self.set.len(),
            limit: self.set.limit,
            filters: &self.set.filters,
            notices: self.notices,
            saved_to: self.saved_to.as_ref().map(|p| p.display().to_string()),
            results: &self.set.items,
        }
    }

    fn format_human(&self) -> String {
        let mut layout = HumanLayout::new();

        for notice in self.notices {
            layout.push_line(format!("{} {notice}", style("!").yellow()));
        }
        if !self.notices.is_empty() {
            layout.blank();
        }

        let applied: Vec<String> = self
            .set
            .filters
            .iter()
            .map(|f| {
                let line = format!("{}: {}", f.field, f.value);
                if f.applied {
                    line
                } else {
                    format!("{line} (unavailable)")
                }
            })
            .collect();
        if !applied.is_empty() {
            layout.push_line(format!("Filters applied: {}", applied.join(" | ")));
        }
        layout.push_line(format!(
            "Found {} matching products",
            style(self.set.matched).bold()
        ));
        layout.blank();

        if self.set.is_empty() {
            layout.push_line(format!(
                "{} No products match your criteria. Try adjusting your filters.",
                style("!").yellow()
            ));
            return layout.build();
        }

        layout.title("===== RECOMMENDED PRODUCTS =====");
        for (i, item) in self.set.items.iter().enumerate() {
            let product = item.product;
            layout.push_line(format!(
                "{}. {}",
                style(i + 1).dim(),
                style(product.display_name()).cyan().bold()
            ));
            layout.kv("Brand", product.brand.as_deref().unwrap_or("-"));
            layout.kv("Type", product.product_type.as_deref().unwrap_or("-"));
            if let Some(category) = &product.category {
                layout.kv("Category", category);
            }
            if let Some(price) = format_price(product) {
                layout.kv("Price", &price);
            }
            if let Some(rating) = product.rating {
                layout.kv("Rating", &format_rating(rating));
            }
            if !item.tags.is_empty() {
                layout.kv("Tags", &item.tags.join(", "));
            }
            if !item.colors.is_empty() {
                let (shown, hidden) = split_colors(item, self.max_colors);
                layout.kv("Colors", &shown.join(", "));
                if hidden > 0 {
                    layout.push_line(format!("{:14}... and {hidden} more", ""));
                }
            }
            layout.blank();
        }

        if let Some(path) = &self.saved_to {
            layout.push_line(format!(
                "{} Recommendations saved to {}",
                style("✓").green(),
                path.display()
            ));
        }

        layout.build()
    }

    fn format_plain(&self) -> String {
        self.set
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let product = item.product;
                let mut line = format!("{}. {}", i + 1, product.display_name());
                if let Some(brand) = &product.brand {
                    line.push_str(&format!(" ({brand})"));
                }
                if let Some(price) = format_price(product) {
                    line.push_str(&format!(" {price}"));
                }
                if let Some(rating) = product.rating {
                    line.push_str(&format!(" {}", format_rating(rating)));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_tsv(&self) -> String {
        let mut out = String::from("rank\tid\tname\tbrand\tproduct_type\tcategory\tprice\trating\ttags\n");
        for (i, item) in self.set.items.iter().enumerate() {
            let product = item.product;
            let fields = [
                (i + 1).to_string(),
                product.id.clone(),
                product.name.clone().unwrap_or_default(),
                product.brand.clone().unwrap_or_default(),
                product.product_type.clone().unwrap_or_default(),
                product.category.clone().unwrap_or_default(),
                product.price.map(|p| format!("{p:.2}")).unwrap_or_default(),
                product.rating.map(|r| format!("{r:.1}")).unwrap_or_default(),
                item.tags.join(","),
            ];
            let row: Vec<String> = fields.iter().map(|f| tsv_escape(f)).collect();
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
        out
    }

    fn format_jsonl(&self) -> String {
        self.set
            .items
            .iter()
            .filter_map(|item| serde_json::to_string(item).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Formattable for RecommendationReport<'_> {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => serde_json::to_string_pretty(&self.to_json()).unwrap_or_default(),
            OutputFormat::Jsonl => self.format_jsonl(),
            OutputFormat::Plain => self.format_plain(),
            OutputFormat::Tsv => self.format_tsv(),
        }
    }
}

/// `<price_sign><price>` with two decimals; `$` when the sign is missing.
pub fn format_price(product: &Product) -> Option<String> {
    let price = product.price?;
    let sign = product
        .price_sign
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("$");
    Some(format!("{sign}{price:.2}"))
}

pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}/5.0")
}

fn split_colors(item: &Recommendation<'_>, max: usize) -> (Vec<String>, usize) {
    let shown = item
        .colors
        .iter()
        .take(max)
        .map(|c| c.name.clone())
        .collect();
    (shown, item.colors.len().saturating_sub(max))
}

fn tsv_escape(value: &str) -> String {
    value.replace(['\t', '\n'], " ")
}
