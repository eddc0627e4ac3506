//! Per-residue solvent accessibility produced by an external DSSP run.
//!
//! The table is read with a header row naming at least `position`,
//! `amino_acid`, `secondary_structure` and `rasa`; extra columns are ignored.
//! A `rasa` cell that is empty or not a number (`NA`) loads as `None`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::TableFormat;
use crate::types::PolystructError;

/// Accessibility of one residue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityRecord {
    /// Residue position in sequence numbering
    pub position: i64,
    /// One-letter amino acid code as reported by DSSP
    pub amino_acid: String,
    /// DSSP secondary-structure label (`H`, `E`, `-`, ...)
    pub secondary_structure: String,
    /// Relative accessible surface area
    #[serde(deserialize_with = "csv::invalid_option")]
    pub rasa: Option<f64>,
}

/// Read an accessibility table; `.tsv`/`.tab` files are tab-separated.
pub fn read_accessibility(path: &Path) -> Result<Vec<AccessibilityRecord>, PolystructError> {
    let file = File::open(path)?;
    read_accessibility_from(file, TableFormat::from_path(path))
}

pub fn read_accessibility_from<R: Read>(
    reader: R,
    format: TableFormat,
) -> Result<Vec<AccessibilityRecord>, PolystructError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        records.push(result?);
    }
    Ok(records)
}
