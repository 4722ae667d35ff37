use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::commands::Context;
use crate::error::CliError;

pub(crate) fn run_covers(ctx: &Context, fs_slug: &str) -> Result<(), CliError> {
    let resolver = ctx.resolver(false)?;
    let names = resolver
        .cached_roms(fs_slug)
        .map_err(|e| CliError::for_platform(e, fs_slug))?;

    if names.is_empty() {
        log::info!("No cached covers for {fs_slug}");
        return Ok(());
    }

    log::info!(
        "{} {}",
        fs_slug.if_supports_color(Stdout, |t| t.bold()),
        format!("({} cached covers)", names.len()).if_supports_color(Stdout, |t| t.dimmed()),
    );
    for name in &names {
        log::info!("  {name}");
    }
    Ok(())
}
