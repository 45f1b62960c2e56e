//! External identifier newtypes.
//!
//! External ids are what the input files carry. They are never used as
//! storage slots; see [`crate::pu::IdentifierIndex`] for the mapping to
//! dense internal indices.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

///
/// PuId
///
/// External planning-unit identifier.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct PuId(pub u64);

impl FromStr for PuId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

///
/// SpeciesId
///
/// External species (conservation feature) identifier.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct SpeciesId(pub u64);

impl FromStr for SpeciesId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

///
/// ZoneId
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct ZoneId(pub u32);

impl FromStr for ZoneId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}
