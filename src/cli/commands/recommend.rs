//! cosmorec recommend - Recommendations from command-line filters
//!
//! Every filter goes through the same validation as interactive answers.
//! Close matches are only applied with `--accept-suggestions`; otherwise they
//! are skipped and reported.

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::RecommendationReport;
use crate::cli::output::emit;
use crate::error::Result;
use crate::query::{
    recommend, resolve_criteria, AcceptSuggestions, Confirm, DeclineSuggestions, RawCriteria,
};
use crate::sink::save_recommendations;

#[derive(Args, Debug, Default)]
pub struct RecommendArgs {
    /// Brand, e.g. "maybelline"
    #[arg(long)]
    pub brand: Option<String>,

    /// Product type, e.g. "lipstick"
    #[arg(long = "type", value_name = "TYPE")]
    pub product_type: Option<String>,

    /// Category, e.g. "liquid"
    #[arg(long)]
    pub category: Option<String>,

    /// Price range by label ("$5-$10") or menu number (1-6)
    #[arg(long, value_name = "RANGE")]
    pub price: Option<String>,

    /// Required tag; repeat or comma-separate for several (all must match)
    #[arg(long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Desired color; repeat or comma-separate for several (any may match)
    #[arg(long = "colour", value_name = "COLOUR", value_delimiter = ',')]
    pub colors: Vec<String>,

    /// Minimum rating (1-5)
    #[arg(long, value_name = "RATING")]
    pub min_rating: Option<String>,

    /// Number of results; 0 or less returns every match
    #[arg(long, short = 'n', allow_hyphen_values = true)]
    pub limit: Option<String>,

    /// Apply close-match corrections instead of skipping the value
    #[arg(long)]
    pub accept_suggestions: bool,

    /// Save the results to a timestamped CSV file
    #[arg(long)]
    pub save: bool,

    /// Save the results under this file name (implies --save)
    #[arg(long, value_name = "NAME")]
    pub save_as: Option<String>,
}

impl RecommendArgs {
    pub fn raw_criteria(&self) -> RawCriteria {
        RawCriteria {
            brand: self.brand.clone(),
            product_type: self.product_type.clone(),
            category: self.category.clone(),
            price_range: self.price.clone(),
            tags: self.tags.clone(),
            colors: self.colors.clone(),
            min_rating: self.min_rating.clone(),
            limit: self.limit.clone(),
        }
    }

    const fn wants_save(&self) -> bool {
        self.save || self.save_as.is_some()
    }
}

pub fn run(ctx: &AppContext, args: &RecommendArgs) -> Result<()> {
    let session = ctx.open_session()?;

    let mut accept = AcceptSuggestions;
    let mut decline = DeclineSuggestions;
    let confirm: &mut dyn Confirm = if args.accept_suggestions {
        &mut accept
    } else {
        &mut decline
    };

    let resolution = resolve_criteria(
        &args.raw_criteria(),
        &session.options,
        ctx.config.matching.fuzzy_cutoff,
        ctx.config.display.default_limit,
        confirm,
    )?;
    let set = recommend(&session.catalog, &resolution.criteria);

    let saved = if args.wants_save() {
        let saved = save_recommendations(
            &set,
            &session.catalog,
            ctx.output_dir(),
            args.save_as.as_deref(),
        )?;
        if saved.is_none() {
            tracing::warn!("no recommendations to save");
        }
        saved
    } else {
        None
    };

    let report = RecommendationReport::new(&set, &resolution.notices)
        .with_max_colors(ctx.config.display.max_colors)
        .with_saved_to(saved);
    emit(&report, ctx.output_format);
    Ok(())
}
