use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romshelf_lib::CoverSize;

use crate::commands::Context;
use crate::error::CliError;

pub(crate) fn run_cover(
    ctx: &Context,
    fs_slug: &str,
    rom_name: &str,
    url: Option<&str>,
    overwrite: bool,
) -> Result<(), CliError> {
    if rom_name.trim().is_empty() {
        return Err(CliError::invalid_argument("ROM name is empty"));
    }
    if overwrite && url.is_none() {
        log::warn!("--overwrite has no effect without --url");
    }

    let resolver = ctx.resolver(url.is_some())?;
    let result = resolver.get_rom_cover(overwrite, fs_slug, rom_name, url);

    log::info!(
        "{} {}",
        rom_name.if_supports_color(Stdout, |t| t.bold()),
        format!("({fs_slug})").if_supports_color(Stdout, |t| t.dimmed()),
    );
    for size in CoverSize::ALL {
        let path = result.path(size);
        let cached = resolver.cover_exists(fs_slug, rom_name, size);
        log::info!(
            "  {:<5} {} {}",
            size.to_string(),
            path.if_supports_color(Stdout, |t| t.cyan()),
            if cached {
                "(cached)".if_supports_color(Stdout, |t| t.green()).to_string()
            } else {
                "(default)".if_supports_color(Stdout, |t| t.dimmed()).to_string()
            },
        );
    }
    log::info!(
        "{}",
        format!("  under {}", resolver.root().display()).if_supports_color(Stdout, |t| t.dimmed()),
    );

    if url.is_some() && result.is_default() {
        log::warn!("Could not fetch a cover for '{rom_name}', using the defaults");
    }
    Ok(())
}
