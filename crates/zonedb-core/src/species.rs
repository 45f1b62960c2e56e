//! Species collaborator: external species id to dense index.

use crate::{
    error::{ErrorOrigin, InternalError},
    pu::IdentifierIndex,
    table::Table,
    types::SpeciesId,
};
use std::path::Path;

///
/// Species
///

#[derive(Clone, Debug, Default)]
pub struct Species {
    index: IdentifierIndex<SpeciesId>,
    names: Vec<Option<String>>,
}

impl Species {
    /// Read species ids (and optional names) from a species table.
    /// Indices follow file order; a repeated id is fatal.
    pub fn load(table: &Table) -> Result<Self, InternalError> {
        let to_err = |err| InternalError::table(ErrorOrigin::Species, err);
        let id_col = table.column("id").map_err(to_err)?;
        let name_col = table.try_column("name");

        let mut species = Self {
            index: IdentifierIndex::with_capacity(table.len()),
            names: Vec::with_capacity(table.len()),
        };

        for row in table.rows() {
            let id: SpeciesId = row.require(&id_col).map_err(to_err)?;
            species.index.assign(id).map_err(|id| {
                InternalError::invariant(
                    ErrorOrigin::Species,
                    format!("{}:{}: duplicate species id {id}", table.label(), row.line()),
                )
            })?;
            species.names.push(
                name_col
                    .as_ref()
                    .and_then(|col| row.text(col))
                    .map(str::to_string),
            );
        }

        Ok(species)
    }

    pub fn from_path(path: &Path) -> Result<Self, InternalError> {
        let table =
            Table::open(path).map_err(|err| InternalError::table(ErrorOrigin::Species, err))?;

        Self::load(&table)
    }

    /// Dense index of a species id; `None` when the id is unknown.
    #[must_use]
    pub fn lookup_index(&self, id: SpeciesId) -> Option<usize> {
        self.index.lookup_index(id)
    }

    #[must_use]
    pub fn id(&self, index: usize) -> Option<SpeciesId> {
        self.index.id(index)
    }

    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).and_then(Option::as_deref)
    }

    /// Species count.
    #[must_use]
    pub fn spno(&self) -> usize {
        self.index.len()
    }
}
