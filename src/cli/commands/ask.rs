//! cosmorec ask - Interactive recommendation session
//!
//! Asks for each filter in turn, offers "did you mean" corrections as they
//! come up, shows the results and optionally saves them. The session is a
//! conversation on the terminal, so it always renders the human layout.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;

use crate::app::{AppContext, Session};
use crate::catalog::{OptionField, PriceBucket};
use crate::cli::formatters::{OptionsListing, RecommendationReport};
use crate::cli::output::{Formattable, OutputFormat};
use crate::cli::prompt::Prompter;
use crate::error::Result;
use crate::query::{recommend, split_list, CriteriaResolver, FilterField};
use crate::sink::save_recommendations;

#[derive(Args, Debug, Default)]
pub struct AskArgs {
    /// File name used if you choose to save (default: timestamped)
    #[arg(long, value_name = "NAME")]
    pub save_as: Option<String>,
}

pub fn run(ctx: &AppContext, args: &AskArgs) -> Result<()> {
    let session = ctx.open_session()?;
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    interview(ctx, &session, &mut prompter, args)?;
    Ok(())
}

/// Run the question-and-answer flow over `prompter`. Returns the saved file,
/// if any.
pub fn interview<R: BufRead, W: Write>(
    ctx: &AppContext,
    session: &Session,
    prompter: &mut Prompter<R, W>,
    args: &AskArgs,
) -> Result<Option<PathBuf>> {
    let options = &session.options;
    let display = &ctx.config.display;

    prompter.say("===== COSMETIC PRODUCT RECOMMENDATION SYSTEM =====")?;
    prompter.say("This system helps you find cosmetic products based on your preferences.")?;
    for line in session.report.lines() {
        prompter.say(line)?;
    }

    if prompter.yes_no("\nWould you like to see available options?")? {
        let listing = OptionsListing::new(options, Some(display.options_preview));
        prompter.say(listing.format(OutputFormat::Human))?;
    }

    prompter.say("\nEnter your preferences (press Enter to skip):")?;
    let mut resolver =
        CriteriaResolver::new(options, ctx.config.matching.fuzzy_cutoff, display.default_limit);
    let mut reported = 0;

    for (field, question) in [
        (FilterField::Brand, "Brand: "),
        (FilterField::ProductType, "Product type: "),
        (FilterField::Category, "Category: "),
    ] {
        if is_available(session, field) {
            let answer = prompter.ask(question)?;
            resolver.single(field, &answer, prompter)?;
            reported = report_notices(prompter, &resolver, reported)?;
        }
    }

    if options.is_available(OptionField::PriceRange) {
        prompter.say("Available price ranges:")?;
        for (i, bucket) in PriceBucket::ALL.iter().enumerate() {
            prompter.say(format!("{}. {bucket}", i + 1))?;
        }
        let answer = prompter.ask("Select a price range (number or name): ")?;
        resolver.price_range(&answer, prompter)?;
        reported = report_notices(prompter, &resolver, reported)?;
    }

    for (field, question) in [
        (FilterField::Tags, "Tags (comma-separated): "),
        (FilterField::Colors, "Colors (comma-separated): "),
    ] {
        if is_available(session, field) {
            let answer = prompter.ask(question)?;
            resolver.multi(field, &split_list(&answer), prompter)?;
            reported = report_notices(prompter, &resolver, reported)?;
        }
    }

    let answer = prompter.ask("Minimum rating (1-5): ")?;
    resolver.min_rating(&answer);
    let answer = prompter.ask(&format!(
        "Number of recommendations (default: {}): ",
        display.default_limit
    ))?;
    resolver.limit(&answer);
    report_notices(prompter, &resolver, reported)?;

    let resolution = resolver.finish();
    let set = recommend(&session.catalog, &resolution.criteria);
    let report = RecommendationReport::new(&set, &[]).with_max_colors(display.max_colors);
    prompter.say(report.format(OutputFormat::Human))?;

    if set.is_empty() || !prompter.yes_no("\nWould you like to save these recommendations?")? {
        return Ok(None);
    }

    let saved = save_recommendations(
        &set,
        &session.catalog,
        ctx.output_dir(),
        args.save_as.as_deref(),
    )?;
    if let Some(path) = &saved {
        prompter.say(format!("\nRecommendations saved to {}", path.display()))?;
    }
    Ok(saved)
}

fn is_available(session: &Session, field: FilterField) -> bool {
    field
        .option_field()
        .is_some_and(|field| session.options.is_available(field))
}

/// Print notices added since `already`; returns the new count.
fn report_notices<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    resolver: &CriteriaResolver<'_>,
    already: usize,
) -> Result<usize> {
    let notices = resolver.notices();
    for notice in &notices[already..] {
        prompter.say(notice.to_string())?;
    }
    Ok(notices.len())
}
