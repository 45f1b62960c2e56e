//! Core data model for zonedb: identifier indexing, planning-unit records,
//! lock and zone constraints, the connectivity graph, and the sparse
//! planning-unit by species amount matrix.
//!
//! The model is built once from delimited input tables and is read-only
//! afterwards; every query is keyed by dense internal index.
#![warn(unreachable_pub)]

pub mod costs;
pub mod error;
pub mod obs;
pub mod pu;
pub mod species;
pub mod table;
pub mod types;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Cost assigned to a (category, unit) pair with no value in the input.
///
/// Absent cost data is never zero: a missing column or an empty cell both
/// charge the unit this amount for the category.
pub const DEFAULT_COST: f64 = 1.0;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No loaders, sinks, or table readers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        costs::Costs,
        pu::{Connection, Neighbour, PlanningUnit, PlanningUnits, SparseAmountEntry},
        species::Species,
        types::{PuId, SpeciesId, ZoneId},
    };
}
