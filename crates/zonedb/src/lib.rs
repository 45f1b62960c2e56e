//! ## Crate layout
//! - `config`: input-file configuration read from TOML.
//! - `core`: the planning-unit data model, its loaders, and observability.
//!
//! [`load`] is the one-call entry point: it turns an [`InputConfig`] into a
//! fully constructed [`Model`] or fails without returning a partial one.

pub use zonedb_config as config;
pub use zonedb_core as core;

use std::path::Path;
use thiserror::Error as ThisError;
use zonedb_config::{ConfigError, InputConfig};
use zonedb_core::{
    costs::Costs, error::InternalError, obs::LoadReport, pu::PlanningUnits, pu::PuFiles,
    species::Species,
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] InternalError),
}

///
/// Model
///
/// Everything the optimizer reads: cost categories, species (when a
/// species file is configured), and the planning-unit model.
///

#[derive(Clone, Debug)]
pub struct Model {
    pub costs: Costs,
    pub species: Option<Species>,
    pub units: PlanningUnits,
}

impl Model {
    #[must_use]
    pub const fn report(&self) -> &LoadReport {
        self.units.report()
    }
}

/// Build the model from an already-parsed configuration.
///
/// The sparse matrix is loaded only when both a species file and a puvspr
/// file are configured; a puvspr file without species is ignored with a
/// warning since no species id could resolve.
pub fn load(config: &InputConfig) -> Result<Model, Error> {
    config.validate()?;

    let costs = Costs::from_path(&config.costs_path())?;
    let species = config
        .species_path()
        .map(|path| Species::from_path(&path))
        .transpose()?;

    let files = PuFiles {
        pu: config.pu_path(),
        lock: config.lock_path(),
        zone: config.zone_path(),
        connection: config.connection_path(),
    };
    let mut units = PlanningUnits::from_files(&files, &costs)?;

    match (&species, config.puvspr_path()) {
        (Some(species), Some(path)) => units.load_sparse_matrix_path(species, &path)?,
        (None, Some(path)) => {
            tracing::warn!(
                file = %path.display(),
                "puvspr file configured without a species file, skipping"
            );
        }
        (_, None) => {}
    }

    tracing::info!(
        puno = units.puno(),
        spno = species.as_ref().map_or(0, Species::spno),
        matrix_entries = units.matrix().len(),
        "model loaded"
    );

    Ok(Model {
        costs,
        species,
        units,
    })
}

/// Read a TOML configuration from disk and build the model it describes.
pub fn load_from_path(config_path: &Path) -> Result<Model, Error> {
    let config = InputConfig::from_path(config_path)?;

    load(&config)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{Error, Model, load, load_from_path};
    pub use zonedb_config::InputConfig;
    pub use zonedb_core::prelude::*;
}
