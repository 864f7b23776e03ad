//! cosmorec options - List the values each filter accepts

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::OptionsListing;
use crate::cli::output::emit;
use crate::error::Result;

#[derive(Args, Debug, Default)]
pub struct OptionsArgs {
    /// List every value instead of a preview of each field
    #[arg(long)]
    pub all: bool,
}

pub fn run(ctx: &AppContext, args: &OptionsArgs) -> Result<()> {
    let session = ctx.open_session()?;
    let preview = (!args.all).then_some(ctx.config.display.options_preview);
    emit(&OptionsListing::new(&session.options, preview), ctx.output_format);
    Ok(())
}
