//! Delimited-text writers for every table the pipeline produces.
//!
//! Tables are written with the `csv` crate, comma- or tab-separated per
//! [`TableFormat`]. The header row is always emitted, so an empty result
//! still carries its full schema. Missing values are written as empty
//! fields; non-finite ratios as `inf` / `NaN`.
//!
//! ## Examples
//!
//! ```rust
//! use polystruct_core::config::TableFormat;
//! use polystruct_core::output::write_table;
//! use polystruct_core::selection::SelectionRecord;
//!
//! let mut buffer = Vec::new();
//! write_table::<_, SelectionRecord>(&mut buffer, &[], TableFormat::Csv)?;
//! assert_eq!(
//!     String::from_utf8(buffer)?,
//!     "UniProt_ID,AA_pos,Codon_index,Species_count,E[N],E[S],PN,PS,pN,pS,pN/pS\n"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod wcn;

pub use wcn::WcnRow;

use std::io::Write;

use serde::Serialize;

use crate::batch::GeneStatus;
use crate::config::TableFormat;
use crate::divergence::{DivergenceRecord, DivergenceResidueRecord};
use crate::merge::{Correlation, MergedRecord};
use crate::selection::SelectionRecord;
use crate::types::PolystructError;
use crate::wcn::WcnRecord;

/// A serializable table row with a fixed column list.
///
/// `COLUMNS` must list the serialized field names in order; it is written
/// as the header independently of the rows.
pub trait TableRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

impl TableRow for SelectionRecord {
    const COLUMNS: &'static [&'static str] = &SelectionRecord::HEADER;
}

impl TableRow for GeneStatus {
    const COLUMNS: &'static [&'static str] = &GeneStatus::HEADER;
}

impl TableRow for MergedRecord {
    const COLUMNS: &'static [&'static str] = &[
        "UniProt_ID",
        "AA_pos",
        "Codon_index",
        "Species_count",
        "E[N]",
        "E[S]",
        "PN",
        "PS",
        "pN",
        "pS",
        "pN/pS",
        "DSSP_AA",
        "Sec_Struct",
        "RASA",
        "WCN_AA",
        "chain",
        "wcn_ca",
        "wcn_sc",
    ];
}

impl TableRow for DivergenceRecord {
    const COLUMNS: &'static [&'static str] = &DivergenceRecord::HEADER;
}

impl TableRow for DivergenceResidueRecord {
    const COLUMNS: &'static [&'static str] = &[
        "UniProt_ID",
        "Codon_pos",
        "AA_pos",
        "E[S]",
        "E[N]",
        "DS",
        "DN",
        "dN/dS",
        "DSSP_AA",
        "Sec_Struct",
        "RASA",
        "WCN_AA",
        "chain",
        "wcn_ca",
        "wcn_sc",
    ];
}

impl TableRow for Correlation {
    const COLUMNS: &'static [&'static str] = &["column", "pearson_r", "pairs"];
}

/// Write `rows` with a header row.
///
/// # Errors
///
/// Returns [`PolystructError::Csv`] if serialization or the underlying
/// writer fails.
pub fn write_table<W: Write, T: TableRow>(
    writer: W,
    rows: &[T],
    format: TableFormat,
) -> Result<(), PolystructError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(T::COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a WCN table, one row per residue in structure order.
pub fn write_wcn_table<W: Write>(
    writer: W,
    records: &[WcnRecord],
    format: TableFormat,
) -> Result<(), PolystructError> {
    let rows: Vec<WcnRow> = records.iter().map(WcnRow::from).collect();
    write_table(writer, &rows, format)
}
