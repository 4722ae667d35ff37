use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde_json::json;

use romshelf_lib::util::format_size;
use romshelf_lib::{CoverResult, CoverSize, RomEntry, RomScan};
use romshelf_media::{CoverResolver, cover_path};

use crate::commands::Context;
use crate::error::CliError;
use crate::spinner::ScanSpinners;

/// Scan platforms concurrently (one scoped thread each) and print them in order.
pub(crate) fn run_scan(
    ctx: &Context,
    platforms: Option<Vec<String>>,
    limit: Option<usize>,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let slugs: Vec<String> = match platforms {
        Some(p) => p,
        None => ctx.library.list_platforms()?.into_iter().collect(),
    };
    if slugs.is_empty() {
        log::warn!("No platforms to scan in {}", ctx.library.root().display());
        return Ok(());
    }

    let spinners = ScanSpinners::new(quiet || json);
    let results: Vec<Result<RomScan, CliError>> = std::thread::scope(|s| {
        let handles: Vec<_> = slugs
            .iter()
            .map(|slug| {
                let pb = spinners.start(format!("Scanning {slug}"));
                s.spawn(move || {
                    let scan = ctx
                        .library
                        .scan_roms(slug)
                        .map_err(|e| CliError::for_platform(e, slug));
                    pb.finish_and_clear();
                    scan
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .unwrap_or_else(|_| Err(CliError::other("scan thread panicked")))
            })
            .collect()
    });
    spinners.clear();

    let resolver = ctx.resolver(false)?;
    let mut failures = 0usize;

    if json {
        let mut report = Vec::new();
        for (slug, result) in slugs.iter().zip(results) {
            match result {
                Ok(scan) => report.push(platform_json(&resolver, slug, &scan, limit)),
                Err(e) => {
                    failures += 1;
                    report.push(json!({ "platform": slug, "error": e.to_string() }));
                }
            }
        }
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::other(format!("JSON encoding failed: {e}")))?;
        println!("{text}");
    } else {
        for (slug, result) in slugs.iter().zip(results) {
            match result {
                Ok(scan) => print_platform(&resolver, slug, &scan, limit),
                Err(e) => {
                    failures += 1;
                    log::error!("{slug}: {e}");
                }
            }
        }
    }

    if failures == slugs.len() {
        return Err(CliError::other("no platform could be scanned"));
    }
    Ok(())
}

/// Cover paths from the cache alone, never fetching or writing.
fn cached_cover(resolver: &CoverResolver, fs_slug: &str, rom: &RomEntry) -> CoverResult {
    let mut result = CoverResult::defaults();
    for size in CoverSize::ALL {
        if resolver.cover_exists(fs_slug, rom.rom_name(), size) {
            if let Some(path) = cover_path(fs_slug, rom.rom_name(), size) {
                result.set_path(size, path);
            }
        }
    }
    result
}

fn print_platform(resolver: &CoverResolver, fs_slug: &str, scan: &RomScan, limit: Option<usize>) {
    log::info!(
        "{} {}",
        fs_slug.if_supports_color(Stdout, |t| t.bold()),
        format!(
            "({} ROMs, {})",
            scan.roms.len(),
            format_size(scan.total_size())
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );

    for rom in scan.roms.iter().take(limit.unwrap_or(usize::MAX)) {
        let name = match &rom.folder {
            Some(folder) => format!("{folder}/{}", rom.file_name),
            None => rom.file_name.clone(),
        };
        let cover = cached_cover(resolver, fs_slug, rom);
        let cover_note = if cover.is_default() {
            String::new()
        } else {
            format!(" [cover: {}]", cover.path_cover_l)
        };
        log::info!(
            "  {}  {}{}",
            name,
            format_size(rom.size_bytes).if_supports_color(Stdout, |t| t.cyan()),
            cover_note.if_supports_color(Stdout, |t| t.green()),
        );
        if rom.multi {
            for part in &rom.multi_files {
                log::info!("    {}", part.if_supports_color(Stdout, |t| t.dimmed()));
            }
        }
    }
    if let Some(n) = limit {
        if scan.roms.len() > n {
            log::info!("  ... and {} more", scan.roms.len() - n);
        }
    }

    for skipped in &scan.skipped {
        log::warn!("{fs_slug}: skipped '{}': {}", skipped.file_name, skipped.error);
    }
    log::info!("");
}

fn platform_json(
    resolver: &CoverResolver,
    fs_slug: &str,
    scan: &RomScan,
    limit: Option<usize>,
) -> serde_json::Value {
    let roms: Vec<serde_json::Value> = scan
        .roms
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|rom| {
            let mut value = json!(rom);
            value["cover"] = json!(cached_cover(resolver, fs_slug, rom));
            value
        })
        .collect();
    let skipped: Vec<serde_json::Value> = scan
        .skipped
        .iter()
        .map(|s| json!({ "file_name": s.file_name, "error": s.error.to_string() }))
        .collect();
    json!({
        "platform": fs_slug,
        "total_size": scan.total_size(),
        "roms": roms,
        "skipped": skipped,
    })
}
