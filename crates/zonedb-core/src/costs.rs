//! Cost categories declared by the costs file.
//!
//! The costs file only names the categories; the per-unit values live in
//! the planning-unit file under columns carrying those names.

use crate::{
    error::{ErrorOrigin, InternalError},
    table::Table,
};
use std::path::Path;

///
/// Costs
///
/// Ordered cost category names. The order fixes the layout of every
/// planning unit's cost breakdown.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Costs {
    names: Vec<String>,
}

impl Costs {
    /// Build from category names already in breakdown order.
    pub fn from_names<I, S>(names: I) -> Result<Self, InternalError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut costs = Self::default();
        for name in names {
            costs.push(name.into())?;
        }

        Ok(costs)
    }

    /// Read the `costname` column of a costs table, in file order.
    pub fn load(table: &Table) -> Result<Self, InternalError> {
        let name_col = table
            .column("costname")
            .map_err(|err| InternalError::table(ErrorOrigin::Cost, err))?;

        let mut costs = Self::default();
        for row in table.rows() {
            let name: String = row
                .require(&name_col)
                .map_err(|err| InternalError::table(ErrorOrigin::Cost, err))?;
            costs.push(name)?;
        }

        Ok(costs)
    }

    pub fn from_path(path: &Path) -> Result<Self, InternalError> {
        let table = Table::open(path).map_err(|err| InternalError::table(ErrorOrigin::Cost, err))?;

        Self::load(&table)
    }

    fn push(&mut self, name: String) -> Result<(), InternalError> {
        if self.index_of(&name).is_some() {
            return Err(InternalError::invariant(
                ErrorOrigin::Cost,
                format!("cost category '{name}' declared more than once"),
            ));
        }
        self.names.push(name);

        Ok(())
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Breakdown position of a category; names compare case-insensitively
    /// like table headers do.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
