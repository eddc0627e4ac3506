//! Protein structure model and per-residue coordinate extraction.
//!
//! A structure is reduced to an ordered list of [`StructureResidue`] values,
//! each holding its atom names and coordinates. The loader in [`pdb`] builds
//! that list from PDB or mmCIF files, and [`coords`] turns it into the
//! alpha-carbon and sidechain-centroid coordinates used by the WCN engine.

pub mod coords;
pub mod pdb;

pub use coords::{CoordinateWarning, Extraction, ResidueCoordinates, collect_coordinates};
pub use pdb::{load_structure, parse_structure_str};

use crate::types::{Coordinate, PositionLabel};

/// A single atom of a residue
#[derive(Debug, Clone, PartialEq)]
pub struct StructureAtom {
    /// Atom name as written in the structure file (`CA`, `CB`, `OG1`, ...)
    pub name: String,
    pub coord: Coordinate,
}

impl StructureAtom {
    pub fn new(name: impl Into<String>, coord: Coordinate) -> Self {
        Self {
            name: name.into(),
            coord,
        }
    }
}

/// A residue of a parsed structure, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct StructureResidue {
    /// Three-letter residue name (`GLY`, `HOH`, ...)
    pub name: String,
    pub label: PositionLabel,
    pub chain: String,
    pub atoms: Vec<StructureAtom>,
}
