use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::commands::Context;
use crate::error::CliError;

pub(crate) fn run_platforms(ctx: &Context) -> Result<(), CliError> {
    let root = ctx.library.root();
    let platforms = ctx.library.platforms()?;

    if platforms.is_empty() {
        log::warn!("No platform folders found in {}", root.display());
        return Ok(());
    }

    log::info!(
        "Platforms in {} ({:?} layout):",
        root.display().if_supports_color(Stdout, |t| t.cyan()),
        ctx.library.layout(),
    );
    log::info!("");

    for platform in &platforms {
        let count = match ctx.library.get_roms(&platform.fs_slug) {
            Ok(roms) => format!("{} ROMs", roms.len()),
            Err(e) => {
                log::debug!("Could not count ROMs of {}: {e}", platform.fs_slug);
                "no roms folder".to_string()
            }
        };
        let binding = if platform.is_bound() {
            format!(" -> {}", platform.slug)
        } else {
            String::new()
        };

        log::info!(
            "  {}{}  {}",
            platform.fs_slug.if_supports_color(Stdout, |t| t.bold()),
            binding.if_supports_color(Stdout, |t| t.cyan()),
            count.if_supports_color(Stdout, |t| t.dimmed()),
        );
        if let Some(name) = platform.display_name() {
            log::info!("    {name}");
        }
    }

    Ok(())
}
