use std::fmt;
use std::path::PathBuf;

use glam::DVec3;
use thiserror::Error;

/// Cartesian coordinate of an atom or a derived point, in Ångström.
pub type Coordinate = DVec3;

/// Residue numbering as it appears in the structure file.
///
/// The integer serial number plus an optional insertion code, so that
/// residues `11`, `11A` and `11B` stay distinct.
///
/// # Examples
///
/// ```rust
/// use polystruct_core::types::PositionLabel;
///
/// let label = PositionLabel::new(11, Some("A"));
/// assert_eq!(label.to_string(), "11A");
/// assert_eq!(label.plain_position(), None);
///
/// let plain = PositionLabel::new(42, None);
/// assert_eq!(plain.plain_position(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositionLabel {
    /// Residue serial number
    pub number: i64,
    /// Insertion code, `None` when absent or blank
    pub insertion_code: Option<String>,
}

impl PositionLabel {
    pub fn new(number: i64, insertion_code: Option<&str>) -> Self {
        let insertion_code = insertion_code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(String::from);
        Self {
            number,
            insertion_code,
        }
    }

    /// The integer position, or `None` for residues carrying an insertion code.
    ///
    /// Sequence-indexed tables (selection, accessibility) can only be joined
    /// against residues without insertion codes.
    #[must_use]
    pub fn plain_position(&self) -> Option<i64> {
        match self.insertion_code {
            None => Some(self.number),
            Some(_) => None,
        }
    }
}

impl fmt::Display for PositionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.insertion_code {
            Some(code) => write!(f, "{}{}", self.number, code),
            None => write!(f, "{}", self.number),
        }
    }
}

/// Error types that can occur while building per-residue tables
#[derive(Error, Debug)]
pub enum PolystructError {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Delimited-text reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// The structure file could not be parsed
    #[error("Structure parse error: {0}")]
    StructureParse(String),
    /// A residue has no alpha-carbon, so WCN has no reference point
    #[error("Missing CA in residue ({position}, {residue}). Cannot calculate C-alpha WCN.")]
    MissingAlphaCarbon { position: String, residue: char },
    /// Two residues share a coordinate, making the inverse-square distance undefined
    #[error("Zero distance between residues {first} and {second}")]
    DegenerateGeometry { first: String, second: String },
    /// A table row does not expand to the schema width
    #[error("{path}:{line}: expected {expected} columns, found {found}")]
    MalformedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A field could not be coerced to its column type
    #[error("{path}:{line}: invalid value {value:?} in column {column}")]
    InvalidField {
        path: PathBuf,
        line: usize,
        column: &'static str,
        value: String,
    },
    /// Invalid pipeline configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
