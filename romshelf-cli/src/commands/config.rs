use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romshelf_lib::util::is_plain_segment;
use romshelf_lib::{ShelfConfig, add_binding, remove_binding};

use crate::cli_types::ConfigAction;
use crate::error::CliError;

pub(crate) fn run_config(
    action: ConfigAction,
    config_path: &Path,
    root: Option<PathBuf>,
    resources: Option<PathBuf>,
) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => run_config_show(config_path, root, resources),
        ConfigAction::Path => {
            log::info!("{}", config_path.display());
            Ok(())
        }
        ConfigAction::Bind { fs_slug, slug } => run_config_bind(config_path, &fs_slug, &slug),
        ConfigAction::Unbind { fs_slug } => run_config_unbind(config_path, &fs_slug),
    }
}

/// Show the effective configuration and where each root came from.
fn run_config_show(
    config_path: &Path,
    root: Option<PathBuf>,
    resources: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = ShelfConfig::load(config_path)?;

    log::info!(
        "{}",
        "romshelf configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    log::info!(
        "  Config file: {} {}",
        config_path.display().if_supports_color(Stdout, |t| t.cyan()),
        if config_path.exists() {
            "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "(not found, using defaults)"
                .if_supports_color(Stdout, |t| t.dimmed())
                .to_string()
        },
    );

    let root_source = source_label(root.is_some(), config.library.root.is_some(), "current directory");
    let resources_source = source_label(
        resources.is_some(),
        config.resources.root.is_some(),
        "data directory",
    );
    log::info!(
        "  Library root: {} {}",
        config.resolve_library_root(root).display(),
        root_source.if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  Resources root: {} {}",
        config.resolve_resources_root(resources).display(),
        resources_source.if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("");

    let exclude = &config.exclude;
    log::info!("  Exclusions:");
    log::info!("    platforms: {}", exclude.platforms.len());
    log::info!(
        "    single:    {} names, {} patterns, {} regex, {} extensions",
        exclude.single.rules.names.len(),
        exclude.single.rules.patterns.len(),
        exclude.single.rules.regex.len(),
        exclude.single.extensions.len(),
    );
    for (label, rules) in [("multi", &exclude.multi), ("resource", &exclude.resource)] {
        log::info!(
            "    {label:<9}  {} names, {} patterns, {} regex",
            rules.names.len(),
            rules.patterns.len(),
            rules.regex.len(),
        );
    }
    log::info!("");

    if config.bindings().is_empty() {
        log::info!("  Bindings: none");
    } else {
        log::info!("  Bindings:");
        for (fs_slug, slug) in config.bindings() {
            log::info!(
                "    {} -> {}",
                fs_slug.if_supports_color(Stdout, |t| t.bold()),
                slug.if_supports_color(Stdout, |t| t.cyan()),
            );
        }
    }
    Ok(())
}

fn source_label(from_cli: bool, from_config: bool, fallback: &str) -> String {
    if from_cli {
        "(from command line)".to_string()
    } else if from_config {
        "(from config)".to_string()
    } else {
        format!("({fallback})")
    }
}

fn run_config_bind(config_path: &Path, fs_slug: &str, slug: &str) -> Result<(), CliError> {
    if !is_plain_segment(fs_slug) {
        return Err(CliError::invalid_argument(format!(
            "'{fs_slug}' is not a platform folder name"
        )));
    }
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(CliError::invalid_argument("platform slug is empty"));
    }
    add_binding(config_path, fs_slug, slug)?;
    log::info!(
        "Bound {} -> {} in {}",
        fs_slug.if_supports_color(Stdout, |t| t.bold()),
        slug.if_supports_color(Stdout, |t| t.cyan()),
        config_path.display(),
    );
    Ok(())
}

fn run_config_unbind(config_path: &Path, fs_slug: &str) -> Result<(), CliError> {
    let config = ShelfConfig::load(config_path)?;
    if !config.bindings().contains_key(fs_slug) {
        log::warn!("No binding for '{fs_slug}'");
        return Ok(());
    }
    remove_binding(config_path, fs_slug)?;
    log::info!(
        "Removed binding for {}",
        fs_slug.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn bind_then_unbind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        run_config_bind(&path, "gc", "ngc").unwrap();
        let config = ShelfConfig::load(&path).unwrap();
        assert_eq!(config.bindings().get("gc").map(String::as_str), Some("ngc"));

        run_config_unbind(&path, "gc").unwrap();
        assert!(ShelfConfig::load(&path).unwrap().bindings().is_empty());
    }

    #[test]
    fn bind_rejects_path_like_folder() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let err = run_config_bind(&path, "../gc", "ngc").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)), "got {err:?}");
        assert!(!path.exists());
    }

    #[test]
    fn root_source_labels() {
        assert_eq!(source_label(true, true, "x"), "(from command line)");
        assert_eq!(source_label(false, true, "x"), "(from config)");
        assert_eq!(source_label(false, false, "x"), "(x)");
    }
}
