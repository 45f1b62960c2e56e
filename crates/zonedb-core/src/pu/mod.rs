//! Module: pu
//! Responsibility: the planning-unit data model and the loaders that
//! build it from input tables.
//! Does not own: species or cost category declarations, table parsing.
//! Boundary: the optimizer reads this model by internal index only.
//!
//! Invariants:
//! - Only the planning-unit file assigns internal indices; every other
//!   file resolves ids against the frozen index and drops unknown ones.
//! - `cost == sum(cost_breakdown)` for every unit.
//! - Every unit owns one lock slot, one zone list, and one connection
//!   record, even when the corresponding file is absent.

mod connection;
mod index;
mod lock;
mod matrix;
mod zone;


pub use connection::{Connection, ConnectivityGraph, Neighbour};
pub use index::IdentifierIndex;
pub use lock::LockRegistry;
pub use matrix::{SparseAmountEntry, SparseAmountMatrix};
pub use zone::ZoneRegistry;

use crate::{
    DEFAULT_COST,
    costs::Costs,
    error::{ErrorOrigin, InternalError},
    obs::{DropReason, FileKind, LoadEvent, LoadReport, LoadSink, TracingSink},
    species::Species,
    table::{Column, RowRef, Table, TableError},
    types::{PuId, SpeciesId, ZoneId},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

///
/// PuFiles
///
/// Input paths for one planning-unit build. Only `pu` is mandatory;
/// an absent optional file behaves exactly like an empty one.
///

#[derive(Clone, Debug, Default)]
pub struct PuFiles {
    pub pu: PathBuf,
    pub lock: Option<PathBuf>,
    pub zone: Option<PathBuf>,
    pub connection: Option<PathBuf>,
}

///
/// PlanningUnit
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanningUnit {
    id: PuId,
    cost_breakdown: Vec<f64>,
    cost: f64,
    num_zones: usize,
    richness: usize,
}

impl PlanningUnit {
    fn new(id: PuId, cost_breakdown: Vec<f64>) -> Self {
        let cost = cost_breakdown.iter().sum();

        Self {
            id,
            cost_breakdown,
            cost,
            num_zones: 0,
            richness: 0,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PuId {
        self.id
    }

    /// One value per declared cost category, in category order.
    #[must_use]
    pub fn cost_breakdown(&self) -> &[f64] {
        &self.cost_breakdown
    }

    /// Sum of the cost breakdown.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Zone-file rows for this unit; `0` means unconstrained.
    #[must_use]
    pub const fn num_zones(&self) -> usize {
        self.num_zones
    }

    /// Distinct species recorded for this unit; `0` until a matrix loads.
    #[must_use]
    pub const fn richness(&self) -> usize {
        self.richness
    }
}

///
/// PlanningUnits
///
/// The assembled, read-mostly planning-unit model.
///

#[derive(Clone, Debug)]
pub struct PlanningUnits {
    index: IdentifierIndex<PuId>,
    units: Vec<PlanningUnit>,
    locks: LockRegistry,
    zones: ZoneRegistry,
    graph: ConnectivityGraph,
    matrix: SparseAmountMatrix,
    report: LoadReport,
}

impl PlanningUnits {
    /// Build units from the planning-unit table, joining each declared cost
    /// category against the column of the same name.
    pub fn load(table: &Table, costs: &Costs) -> Result<Self, InternalError> {
        let to_err = |err| InternalError::table(ErrorOrigin::PlanningUnit, err);
        let id_col = table.column("id").map_err(to_err)?;

        // Phase 1: resolve category columns once; a missing column defaults
        // every unit for that category.
        let cost_cols: Vec<_> = costs
            .names()
            .iter()
            .map(|name| {
                let col = table.try_column(name);
                if col.is_none() {
                    tracing::warn!(
                        file = table.label(),
                        category = name.as_str(),
                        "cost category has no column, defaulting every unit to {DEFAULT_COST}"
                    );
                }
                col
            })
            .collect();

        let puno = table.len();
        let mut units = Self {
            index: IdentifierIndex::with_capacity(puno),
            units: Vec::with_capacity(puno),
            locks: LockRegistry::new(puno),
            zones: ZoneRegistry::new(puno),
            graph: ConnectivityGraph::new(puno),
            matrix: SparseAmountMatrix::new(puno),
            report: LoadReport::new(),
        };

        // Phase 2: assign indices in file order and assemble breakdowns.
        for row in table.rows() {
            let id: PuId = row.require(&id_col).map_err(to_err)?;
            units.index.assign(id).map_err(|id| {
                InternalError::invariant(
                    ErrorOrigin::PlanningUnit,
                    format!("{}:{}: duplicate planning unit id {id}", table.label(), row.line()),
                )
            })?;

            let mut breakdown = Vec::with_capacity(cost_cols.len());
            for col in &cost_cols {
                let value = match col {
                    Some(col) => row
                        .get::<f64>(col)
                        .map_err(|err| InternalError::table(ErrorOrigin::Cost, err))?,
                    None => None,
                };
                breakdown.push(value.unwrap_or(DEFAULT_COST));
            }

            units.units.push(PlanningUnit::new(id, breakdown));
            units.emit(LoadEvent::RowAccepted {
                file: FileKind::PlanningUnit,
            });
        }
        units.emit(LoadEvent::FileLoaded {
            file: FileKind::PlanningUnit,
            rows: table.len() as u64,
        });

        Ok(units)
    }

    /// Build units from disk, then apply every optional file that is named.
    pub fn from_files(files: &PuFiles, costs: &Costs) -> Result<Self, InternalError> {
        let mut units = Self::load(&open(ErrorOrigin::PlanningUnit, &files.pu)?, costs)?;

        if let Some(path) = &files.lock {
            units.load_locks(&open(ErrorOrigin::Lock, path)?)?;
        }
        if let Some(path) = &files.zone {
            units.load_zones(&open(ErrorOrigin::Zone, path)?)?;
        }
        if let Some(path) = &files.connection {
            units.load_connections(&open(ErrorOrigin::Connection, path)?)?;
        }

        tracing::info!(
            puno = units.puno(),
            locked = units.lock_count(),
            connections_entered = units.connections_entered(),
            "planning units loaded"
        );

        Ok(units)
    }

    /// Apply `puid,zoneid` lock rows. A repeated unit keeps its last zone.
    pub fn load_locks(&mut self, table: &Table) -> Result<(), InternalError> {
        if self.skip_empty(FileKind::Lock, table) {
            return Ok(());
        }
        let to_err = |err| InternalError::table(ErrorOrigin::Lock, err);
        let pu_col = table.column("puid").map_err(to_err)?;
        let zone_col = table.column("zoneid").map_err(to_err)?;

        for row in table.rows() {
            let id = foreign_id(&row, &pu_col).map_err(to_err)?;
            let zone: ZoneId = row.require(&zone_col).map_err(to_err)?;

            let Some(index) = self.resolve_pu(FileKind::Lock, row.line(), id) else {
                continue;
            };
            self.locks.lock(index, zone);
            self.emit(LoadEvent::RowAccepted {
                file: FileKind::Lock,
            });
        }
        self.emit(LoadEvent::FileLoaded {
            file: FileKind::Lock,
            rows: table.len() as u64,
        });

        Ok(())
    }

    /// Apply `puid,zoneid` zone rows; each accepted row adds one allowed zone.
    pub fn load_zones(&mut self, table: &Table) -> Result<(), InternalError> {
        if self.skip_empty(FileKind::Zone, table) {
            return Ok(());
        }
        let to_err = |err| InternalError::table(ErrorOrigin::Zone, err);
        let pu_col = table.column("puid").map_err(to_err)?;
        let zone_col = table.column("zoneid").map_err(to_err)?;

        for row in table.rows() {
            let id = foreign_id(&row, &pu_col).map_err(to_err)?;
            let zone: ZoneId = row.require(&zone_col).map_err(to_err)?;

            let Some(index) = self.resolve_pu(FileKind::Zone, row.line(), id) else {
                continue;
            };
            self.units[index].num_zones = self.zones.push(index, zone);
            self.emit(LoadEvent::RowAccepted {
                file: FileKind::Zone,
            });
        }
        self.emit(LoadEvent::FileLoaded {
            file: FileKind::Zone,
            rows: table.len() as u64,
        });

        Ok(())
    }

    /// Apply `id1,id2,boundary` rows. `id1 == id2` is a self/boundary cost;
    /// any other pair is an undirected edge.
    pub fn load_connections(&mut self, table: &Table) -> Result<(), InternalError> {
        if self.skip_empty(FileKind::Connection, table) {
            return Ok(());
        }
        let to_err = |err| InternalError::table(ErrorOrigin::Connection, err);
        let id1_col = table.column("id1").map_err(to_err)?;
        let id2_col = table.column("id2").map_err(to_err)?;
        let cost_col = table.column("boundary").map_err(to_err)?;

        for row in table.rows() {
            let id1 = foreign_id(&row, &id1_col).map_err(to_err)?;
            let id2 = foreign_id(&row, &id2_col).map_err(to_err)?;
            let cost: f64 = row.require(&cost_col).map_err(to_err)?;

            let Some(a) = self.resolve_pu(FileKind::Connection, row.line(), id1) else {
                continue;
            };
            let Some(b) = self.resolve_pu(FileKind::Connection, row.line(), id2) else {
                continue;
            };

            if a == b {
                self.graph.add_fixed_cost(a, cost);
            } else if !self.graph.add_edge(a, b, cost) {
                self.emit(LoadEvent::RowDropped {
                    file: FileKind::Connection,
                    line: row.line(),
                    reason: DropReason::DuplicateConnection,
                });
                continue;
            }
            self.emit(LoadEvent::RowAccepted {
                file: FileKind::Connection,
            });
        }
        self.emit(LoadEvent::FileLoaded {
            file: FileKind::Connection,
            rows: table.len() as u64,
        });

        Ok(())
    }

    /// Stream `species,pu,amount` rows into the sparse matrix.
    ///
    /// Rows whose unit or species id does not resolve are dropped and
    /// counted; only finite amounts above zero are stored. Calling this twice with the
    /// same table stores its rows twice.
    pub fn load_sparse_matrix(
        &mut self,
        species: &Species,
        table: &Table,
    ) -> Result<(), InternalError> {
        if self.skip_empty(FileKind::Puvspr, table) {
            return Ok(());
        }
        let to_err = |err| InternalError::table(ErrorOrigin::Matrix, err);
        let species_col = table.column("species").map_err(to_err)?;
        let pu_col = table.column("pu").map_err(to_err)?;
        let amount_col = table.column("amount").map_err(to_err)?;

        let mut accepted = Vec::with_capacity(table.len());
        for row in table.rows() {
            let species_id = foreign_id(&row, &species_col).map_err(to_err)?;
            let pu_id = foreign_id(&row, &pu_col).map_err(to_err)?;
            let amount: f64 = row.require(&amount_col).map_err(to_err)?;

            let Some(pu) = self.resolve_pu(FileKind::Puvspr, row.line(), pu_id) else {
                continue;
            };
            let Some(species_index) = species_id.and_then(|id| species.lookup_index(SpeciesId(id)))
            else {
                self.drop_row(FileKind::Puvspr, row.line(), DropReason::UnknownSpecies);
                continue;
            };
            if !(amount.is_finite() && amount > 0.0) {
                self.drop_row(FileKind::Puvspr, row.line(), DropReason::NonPositiveAmount);
                continue;
            }

            accepted.push(SparseAmountEntry {
                pu,
                species: species_index,
                amount,
            });
            self.emit(LoadEvent::RowAccepted {
                file: FileKind::Puvspr,
            });
        }

        self.matrix.extend(species.spno(), accepted);
        for (index, unit) in self.units.iter_mut().enumerate() {
            unit.richness = self.matrix.richness(index);
        }
        self.emit(LoadEvent::FileLoaded {
            file: FileKind::Puvspr,
            rows: table.len() as u64,
        });

        Ok(())
    }

    /// Disk form of [`Self::load_sparse_matrix`].
    pub fn load_sparse_matrix_path(
        &mut self,
        species: &Species,
        path: &Path,
    ) -> Result<(), InternalError> {
        self.load_sparse_matrix(species, &open(ErrorOrigin::Matrix, path)?)
    }

    // Resolve a unit id from an optional file, recording a drop if unknown.
    fn resolve_pu(&mut self, file: FileKind, line: usize, id: Option<u64>) -> Option<usize> {
        let index = id.and_then(|id| self.index.lookup_index(PuId(id)));
        if index.is_none() {
            self.drop_row(file, line, DropReason::UnknownPu);
        }

        index
    }

    // A file without a header line carries no rows and no columns.
    fn skip_empty(&mut self, file: FileKind, table: &Table) -> bool {
        if !table.headers().is_empty() {
            return false;
        }
        self.emit(LoadEvent::FileLoaded { file, rows: 0 });

        true
    }

    fn drop_row(&mut self, file: FileKind, line: usize, reason: DropReason) {
        self.emit(LoadEvent::RowDropped { file, line, reason });
    }

    fn emit(&mut self, event: LoadEvent) {
        TracingSink.record(event);
        self.report.record(event);
    }

    //
    // Identity
    //

    /// Number of planning units.
    #[must_use]
    pub fn puno(&self) -> usize {
        self.units.len()
    }

    /// Internal index of an external id; `None` for unknown ids.
    #[must_use]
    pub fn lookup_index(&self, id: PuId) -> Option<usize> {
        self.index.lookup_index(id)
    }

    #[must_use]
    pub const fn id_index(&self) -> &IdentifierIndex<PuId> {
        &self.index
    }

    #[must_use]
    pub fn unit(&self, index: usize) -> Option<&PlanningUnit> {
        self.units.get(index)
    }

    /// Unit records in index order.
    #[must_use]
    pub fn units(&self) -> &[PlanningUnit] {
        &self.units
    }

    //
    // Locks and zones
    //

    #[must_use]
    pub const fn locks(&self) -> &LockRegistry {
        &self.locks
    }

    /// Zone a unit is locked to, if any.
    #[must_use]
    pub fn lock(&self, index: usize) -> Option<ZoneId> {
        self.locks.get(index)
    }

    #[must_use]
    pub fn locked_indices(&self) -> &[usize] {
        self.locks.locked_indices()
    }

    #[must_use]
    pub fn lock_count(&self) -> usize {
        self.locks.count()
    }

    #[must_use]
    pub const fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    //
    // Connectivity
    //

    #[must_use]
    pub const fn connectivity(&self) -> &ConnectivityGraph {
        &self.graph
    }

    #[must_use]
    pub const fn connections_entered(&self) -> bool {
        self.graph.connections_entered()
    }

    #[must_use]
    pub fn connection_cost1(&self, index: usize) -> f64 {
        self.graph.connection_cost1(index)
    }

    //
    // Amounts
    //

    #[must_use]
    pub const fn matrix(&self) -> &SparseAmountMatrix {
        &self.matrix
    }

    /// Row counts and drops for every file applied so far.
    #[must_use]
    pub const fn report(&self) -> &LoadReport {
        &self.report
    }
}

fn open(origin: ErrorOrigin, path: &Path) -> Result<Table, InternalError> {
    Table::open(path).map_err(|err: TableError| InternalError::table(origin, err))
}

// Id cell of a reference column. Negative ids never resolve and read as
// `None`; any other unparsable text is still an error.
fn foreign_id(row: &RowRef<'_>, column: &Column) -> Result<Option<u64>, TableError> {
    match row.require::<u64>(column) {
        Ok(id) => Ok(Some(id)),
        Err(err) => match row.require::<i64>(column) {
            Ok(_) => Ok(None),
            Err(_) => Err(err),
        },
    }
}
