//! Parsers for the per-gene polymorphism and divergence tables.
//!
//! All four file kinds share one line layout: whitespace-separated fields
//! whose last token is a tag-data field of the form `scalar:tail1,tail2,...`.
//! A [`TableSchema`] fixes how that tag field expands and how many columns a
//! row must have. Rows are checked against the schema as they are read; type
//! coercion runs afterwards over the complete table, so a single bad value
//! rejects the whole file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::{
    CODON_STATS_COLUMNS, SLAC_COLUMNS, TAG_SCALAR_SEPARATOR, TAG_TAIL_SEPARATOR, VARIANT_COLUMNS,
};
use crate::types::PolystructError;

/// Row layout of a polymorphism table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSchema {
    /// Synonymous or missense variants: id, start, end, tag-data
    Variant,
    /// Codon statistics: id, start, end, species, codon index, amino acid,
    /// codon, E\[N\], E\[S\]
    CodonStats,
    /// SLAC site estimates: id, start, amino-acid position, codon position,
    /// E\[S\], E\[N\], DS, DN and seven further per-site columns
    Slac,
}

impl TableSchema {
    /// Number of columns after tag expansion
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Variant => VARIANT_COLUMNS,
            Self::CodonStats => CODON_STATS_COLUMNS,
            Self::Slac => SLAC_COLUMNS,
        }
    }

    /// Column names, used in error messages
    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Variant => &["protein_id", "start", "end", "tag"],
            Self::CodonStats => &[
                "protein_id",
                "start",
                "end",
                "species",
                "codon_index",
                "amino_acid",
                "codon",
                "E[N]",
                "E[S]",
            ],
            Self::Slac => &[
                "protein_id",
                "start",
                "position",
                "codon_position",
                "E[S]",
                "E[N]",
                "DS",
                "DN",
                "field_8",
                "field_9",
                "field_10",
                "field_11",
                "field_12",
                "field_13",
                "field_14",
            ],
        }
    }

    /// Split a line into columns.
    ///
    /// Variant tables keep their tag-data token as a single opaque column.
    /// Codon-statistics and SLAC tables expand it at the first `:` and then
    /// at every `,` of the remainder.
    fn split_line(self, line: &str) -> Vec<String> {
        let mut fields: Vec<String> = line.split_whitespace().map(String::from).collect();
        if self != Self::Variant {
            if let Some(tag) = fields.pop() {
                match tag.split_once(TAG_SCALAR_SEPARATOR) {
                    Some((scalar, tail)) => {
                        fields.push(scalar.to_string());
                        fields.extend(tail.split(TAG_TAIL_SEPARATOR).map(String::from));
                    }
                    None => fields.push(tag),
                }
            }
        }
        fields
    }
}

/// One row that passed the width check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source file
    pub line: usize,
    pub fields: Vec<String>,
}

/// A table whose rows all match their schema width, not yet type-coerced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub schema: TableSchema,
    pub source: PathBuf,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Read and width-check every row of `reader`.
    ///
    /// `source` only labels error messages.
    ///
    /// # Errors
    ///
    /// [`PolystructError::MalformedRow`] on the first row whose expanded
    /// column count differs from [`TableSchema::width`]. A blank line is a
    /// row with no columns and fails the same way.
    pub fn from_reader<R: BufRead>(
        reader: R,
        source: &Path,
        schema: TableSchema,
    ) -> Result<Self, PolystructError> {
        let mut rows = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let fields = schema.split_line(&line);
            if fields.len() != schema.width() {
                return Err(PolystructError::MalformedRow {
                    path: source.to_path_buf(),
                    line: index + 1,
                    expected: schema.width(),
                    found: fields.len(),
                });
            }
            rows.push(RawRow {
                line: index + 1,
                fields,
            });
        }
        Ok(Self {
            schema,
            source: source.to_path_buf(),
            rows,
        })
    }

    pub fn from_path(path: &Path, schema: TableSchema) -> Result<Self, PolystructError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), path, schema)
    }

    fn coerce<T: FromStr>(&self, row: &RawRow, column: usize) -> Result<T, PolystructError> {
        let value = &row.fields[column];
        value.parse().map_err(|_| PolystructError::InvalidField {
            path: self.source.clone(),
            line: row.line,
            column: self.schema.columns()[column],
            value: value.clone(),
        })
    }
}

/// An observed synonymous or missense variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub protein_id: String,
    /// Amino-acid position of the codon span start
    pub start: i64,
    pub end: i64,
    /// Opaque per-variant tag-data field
    pub tag: String,
}

/// Expected substitution counts of one codon in one species
#[derive(Debug, Clone, PartialEq)]
pub struct CodonStatRecord {
    pub protein_id: String,
    /// Amino-acid position of the codon span start
    pub start: i64,
    pub end: i64,
    pub species: String,
    pub codon_index: String,
    pub amino_acid: String,
    pub codon: String,
    /// Expected nonsynonymous count, E\[N\]
    pub expected_nonsynonymous: f64,
    /// Expected synonymous count, E\[S\]
    pub expected_synonymous: f64,
}

/// SLAC substitution estimates at one codon
#[derive(Debug, Clone, PartialEq)]
pub struct SlacRecord {
    pub protein_id: String,
    /// Second column, carried through uninterpreted
    pub start: String,
    /// Amino-acid position, the join key against structure tables
    pub position: i64,
    pub codon_position: String,
    /// Expected synonymous sites, E\[S\]
    pub expected_synonymous: f64,
    /// Expected nonsynonymous sites, E\[N\]
    pub expected_nonsynonymous: f64,
    /// Inferred synonymous substitutions, DS
    pub synonymous_substitutions: f64,
    /// Inferred nonsynonymous substitutions, DN
    pub nonsynonymous_substitutions: f64,
}

impl RawTable {
    /// Coerce a [`TableSchema::Variant`] table into records.
    pub fn into_variants(self) -> Result<Vec<VariantRecord>, PolystructError> {
        debug_assert_eq!(self.schema, TableSchema::Variant);
        self.rows
            .iter()
            .map(|row| -> Result<VariantRecord, PolystructError> {
                Ok(VariantRecord {
                    protein_id: row.fields[0].clone(),
                    start: self.coerce(row, 1)?,
                    end: self.coerce(row, 2)?,
                    tag: row.fields[3].clone(),
                })
            })
            .collect()
    }

    /// Coerce a [`TableSchema::CodonStats`] table into records.
    pub fn into_codon_stats(self) -> Result<Vec<CodonStatRecord>, PolystructError> {
        debug_assert_eq!(self.schema, TableSchema::CodonStats);
        self.rows
            .iter()
            .map(|row| -> Result<CodonStatRecord, PolystructError> {
                Ok(CodonStatRecord {
                    protein_id: row.fields[0].clone(),
                    start: self.coerce(row, 1)?,
                    end: self.coerce(row, 2)?,
                    species: row.fields[3].clone(),
                    codon_index: row.fields[4].clone(),
                    amino_acid: row.fields[5].clone(),
                    codon: row.fields[6].clone(),
                    expected_nonsynonymous: self.coerce(row, 7)?,
                    expected_synonymous: self.coerce(row, 8)?,
                })
            })
            .collect()
    }

    /// Coerce a [`TableSchema::Slac`] table into records.
    ///
    /// The seven trailing columns are width-checked but not kept.
    pub fn into_slac(self) -> Result<Vec<SlacRecord>, PolystructError> {
        debug_assert_eq!(self.schema, TableSchema::Slac);
        self.rows
            .iter()
            .map(|row| -> Result<SlacRecord, PolystructError> {
                Ok(SlacRecord {
                    protein_id: row.fields[0].clone(),
                    start: row.fields[1].clone(),
                    position: self.coerce(row, 2)?,
                    codon_position: row.fields[3].clone(),
                    expected_synonymous: self.coerce(row, 4)?,
                    expected_nonsynonymous: self.coerce(row, 5)?,
                    synonymous_substitutions: self.coerce(row, 6)?,
                    nonsynonymous_substitutions: self.coerce(row, 7)?,
                })
            })
            .collect()
    }
}

/// Parse a synonymous or missense variant file.
pub fn parse_variant_file(path: &Path) -> Result<Vec<VariantRecord>, PolystructError> {
    RawTable::from_path(path, TableSchema::Variant)?.into_variants()
}

/// Parse a codon-statistics file.
pub fn parse_codon_stats_file(path: &Path) -> Result<Vec<CodonStatRecord>, PolystructError> {
    RawTable::from_path(path, TableSchema::CodonStats)?.into_codon_stats()
}

/// Parse a SLAC site table.
pub fn parse_slac_file(path: &Path) -> Result<Vec<SlacRecord>, PolystructError> {
    RawTable::from_path(path, TableSchema::Slac)?.into_slac()
}
