pub mod cache;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod diag;
pub mod errors;
pub mod filters;
pub mod import;
pub mod logger;
pub mod manager;
pub mod query;
pub mod store;
pub mod table;
pub mod types;

mod test_support;

pub use config::Config;
pub use errors::DbError;

use crate::dashboard::DashboardView;
use crate::filters::FilterCatalog;
use crate::manager::{AnimalManager, ManagerOptions};
use crate::store::MemoryBackend;

/// The assembled data layer: store, manager, and filter catalog.
pub struct ShelterDb {
    manager: AnimalManager,
    catalog: FilterCatalog,
    db_filters: bool,
}

impl ShelterDb {
    /// Opens the store described by `config` and wires the manager on top of
    /// it. A connection failure here is fatal and propagated.
    pub fn open(config: Config) -> Result<Self, DbError> {
        let backend = MemoryBackend::connect(&config)?;
        let manager = AnimalManager::with_options(
            Box::new(backend),
            ManagerOptions { lenient: config.lenient, use_cache: config.use_cache },
        );
        Ok(Self { manager, catalog: FilterCatalog::builtin(), db_filters: config.db_filters })
    }

    /// Opens from process environment configuration.
    pub fn from_env() -> Result<Self, DbError> {
        Self::open(Config::from_env()?)
    }

    #[must_use]
    pub fn manager(&self) -> &AnimalManager {
        &self.manager
    }

    #[must_use]
    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    /// Builds a dashboard view over the current store contents.
    pub fn dashboard(&self) -> Result<DashboardView<'_>, DbError> {
        DashboardView::new(&self.manager, &self.catalog, self.db_filters)
    }
}

/// Initializes logging from the environment. Call before any other
/// operation; safe to call more than once.
pub fn init() {
    logger::configure_from_env();
}
