pub(crate) mod config;
pub(crate) mod cover;
pub(crate) mod covers;
pub(crate) mod platforms;
pub(crate) mod scan;
pub(crate) mod size;

use std::path::{Path, PathBuf};

use romshelf_lib::{Library, ShelfConfig};
use romshelf_media::{CoverResolver, HttpCoverFetcher};

use crate::error::CliError;

/// Everything a command needs, resolved once from the config file and the
/// global flags.
pub(crate) struct Context {
    pub library: Library,
    pub resources_root: PathBuf,
}

impl Context {
    pub(crate) fn load(
        config_path: &Path,
        root: Option<PathBuf>,
        resources: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        let config = ShelfConfig::load(config_path)?;
        let library_root = config.resolve_library_root(root);
        let resources_root = config.resolve_resources_root(resources);
        log::debug!(
            "Library root {}, resources root {}",
            library_root.display(),
            resources_root.display()
        );
        let library = Library::new(library_root, &config)?;
        Ok(Self {
            library,
            resources_root,
        })
    }

    /// Cover resolver for the resources root. Only `online` resolvers touch
    /// the network.
    pub(crate) fn resolver(&self, online: bool) -> Result<CoverResolver, CliError> {
        let filter = self.library.filter().clone();
        if online {
            Ok(CoverResolver::new(
                &self.resources_root,
                filter,
                HttpCoverFetcher::new()?,
            ))
        } else {
            Ok(CoverResolver::offline(&self.resources_root, filter))
        }
    }
}
