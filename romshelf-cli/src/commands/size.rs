use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romshelf_lib::util::format_size;

use crate::commands::Context;
use crate::error::CliError;

/// Size of one ROM. Giving any `--part` makes it a multi-file ROM.
pub(crate) fn run_size(
    ctx: &Context,
    fs_slug: &str,
    file_name: &str,
    parts: &[String],
) -> Result<(), CliError> {
    let roms_path = ctx
        .library
        .get_fs_structure(fs_slug)
        .map_err(|e| CliError::for_platform(e, fs_slug))?;
    let multi = !parts.is_empty();
    let size = ctx
        .library
        .get_rom_file_size(&roms_path, file_name, multi, parts)?;

    log::info!(
        "{}  {} ({} bytes)",
        file_name.if_supports_color(Stdout, |t| t.bold()),
        format_size(size).if_supports_color(Stdout, |t| t.cyan()),
        size,
    );
    if multi {
        for (part, part_size) in ctx.library.get_rom_part_sizes(&roms_path, file_name, parts)? {
            log::info!(
                "  {}  {}",
                part.if_supports_color(Stdout, |t| t.dimmed()),
                format_size(part_size),
            );
        }
    }
    Ok(())
}
