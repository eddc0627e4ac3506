//! Polymorphism-based selection pressure (pN/pS) per codon position.
//!
//! Aggregation and ratio computation are separate stages.
//! [`aggregate_positions`] turns the three parsed tables of one gene into raw
//! per-position counts; [`compute_ratios`] derives pN, pS and pN/pS from any
//! list of counts, whether it holds one gene or the concatenation of many.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use crate::constants::START_CODON_POSITION;
use crate::variants::{CodonStatRecord, VariantRecord};

/// Observed and expected counts at one codon position
#[derive(Debug, Clone, PartialEq)]
pub struct PositionCounts {
    pub protein_id: String,
    /// Amino-acid position (1-based)
    pub position: i64,
    /// Codon index reported by the first covering species
    pub codon_index: String,
    /// Number of species with codon statistics at this position
    pub species_count: usize,
    /// Summed expected nonsynonymous count, E\[N\]
    pub expected_nonsynonymous: f64,
    /// Summed expected synonymous count, E\[S\]
    pub expected_synonymous: f64,
    /// Observed missense variants, PN
    pub observed_nonsynonymous: usize,
    /// Observed synonymous variants, PS
    pub observed_synonymous: usize,
}

/// Per-position selection statistics, ready for output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionRecord {
    #[serde(rename = "UniProt_ID")]
    pub protein_id: String,
    #[serde(rename = "AA_pos")]
    pub position: i64,
    #[serde(rename = "Codon_index")]
    pub codon_index: String,
    #[serde(rename = "Species_count")]
    pub species_count: usize,
    #[serde(rename = "E[N]")]
    pub expected_nonsynonymous: f64,
    #[serde(rename = "E[S]")]
    pub expected_synonymous: f64,
    #[serde(rename = "PN")]
    pub observed_nonsynonymous: usize,
    #[serde(rename = "PS")]
    pub observed_synonymous: usize,
    #[serde(rename = "pN")]
    pub pn: f64,
    #[serde(rename = "pS")]
    pub ps: f64,
    #[serde(rename = "pN/pS")]
    pub pn_ps: f64,
}

impl SelectionRecord {
    /// Output columns, in serialization order
    pub const HEADER: [&'static str; 11] = [
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
    ];
}

impl From<PositionCounts> for SelectionRecord {
    /// Derive the ratios with IEEE-754 semantics: a zero expectation gives
    /// `inf` (or `NaN` when the observed count is zero as well).
    fn from(counts: PositionCounts) -> Self {
        let pn = counts.observed_nonsynonymous as f64 / counts.expected_nonsynonymous;
        let ps = counts.observed_synonymous as f64 / counts.expected_synonymous;
        Self {
            protein_id: counts.protein_id,
            position: counts.position,
            codon_index: counts.codon_index,
            species_count: counts.species_count,
            expected_nonsynonymous: counts.expected_nonsynonymous,
            expected_synonymous: counts.expected_synonymous,
            observed_nonsynonymous: counts.observed_nonsynonymous,
            observed_synonymous: counts.observed_synonymous,
            pn,
            ps,
            pn_ps: pn / ps,
        }
    }
}

/// Species rows at one position that report different codon indices.
///
/// The first row's index is the one kept in the aggregated counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodonIndexConflict {
    pub protein_id: String,
    pub position: i64,
    pub first: String,
    pub other: String,
}

impl fmt::Display for CodonIndexConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} position {}: codon index {} differs from {}",
            self.protein_id, self.position, self.other, self.first
        )
    }
}

fn group_by_position(codon_stats: &[CodonStatRecord]) -> BTreeMap<i64, Vec<&CodonStatRecord>> {
    let mut by_position: BTreeMap<i64, Vec<&CodonStatRecord>> = BTreeMap::new();
    for record in codon_stats {
        by_position.entry(record.start).or_default().push(record);
    }
    by_position
}

fn conflict_at(position: i64, species: &[&CodonStatRecord]) -> Option<CodonIndexConflict> {
    let first = species.first()?;
    let other = species
        .iter()
        .find(|record| record.codon_index != first.codon_index)?;
    Some(CodonIndexConflict {
        protein_id: first.protein_id.clone(),
        position,
        first: first.codon_index.clone(),
        other: other.codon_index.clone(),
    })
}

/// Positions whose species disagree on the codon index, in position order.
///
/// Covers the same positions [`aggregate_positions`] reports.
pub fn codon_index_conflicts(codon_stats: &[CodonStatRecord]) -> Vec<CodonIndexConflict> {
    group_by_position(codon_stats)
        .range(START_CODON_POSITION + 1..)
        .filter_map(|(&position, species)| conflict_at(position, species))
        .collect()
}

/// Count variants and sum expectations for every covered codon position.
///
/// Positions run from 2 to the largest codon-statistics position; position 1
/// is the start codon and never reported. A position without codon
/// statistics is masked and produces no record, even when variants were
/// observed there. An empty codon-statistics table yields no records.
///
/// # Examples
///
/// ```rust
/// use polystruct_core::selection::aggregate_positions;
///
/// assert!(aggregate_positions(&[], &[], &[]).is_empty());
/// ```
pub fn aggregate_positions(
    missense: &[VariantRecord],
    synonymous: &[VariantRecord],
    codon_stats: &[CodonStatRecord],
) -> Vec<PositionCounts> {
    let by_position = group_by_position(codon_stats);
    let missense_counts = count_by_position(missense);
    let synonymous_counts = count_by_position(synonymous);

    by_position
        .range(START_CODON_POSITION + 1..)
        .map(|(&position, species)| {
            let first = species[0];
            if let Some(conflict) = conflict_at(position, species) {
                tracing::warn!(
                    protein = %conflict.protein_id,
                    position,
                    first = %conflict.first,
                    other = %conflict.other,
                    "codon index differs between species; using the first"
                );
            }

            PositionCounts {
                protein_id: first.protein_id.clone(),
                position,
                codon_index: first.codon_index.clone(),
                species_count: species.len(),
                expected_nonsynonymous: species.iter().map(|r| r.expected_nonsynonymous).sum(),
                expected_synonymous: species.iter().map(|r| r.expected_synonymous).sum(),
                observed_nonsynonymous: missense_counts.get(&position).copied().unwrap_or(0),
                observed_synonymous: synonymous_counts.get(&position).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Derive pN, pS and pN/pS for each position.
pub fn compute_ratios(counts: Vec<PositionCounts>) -> Vec<SelectionRecord> {
    counts.into_iter().map(SelectionRecord::from).collect()
}

/// Full selection table of one gene.
pub fn selection_table(
    missense: &[VariantRecord],
    synonymous: &[VariantRecord],
    codon_stats: &[CodonStatRecord],
) -> Vec<SelectionRecord> {
    compute_ratios(aggregate_positions(missense, synonymous, codon_stats))
}

fn count_by_position(variants: &[VariantRecord]) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for variant in variants {
        *counts.entry(variant.start).or_insert(0) += 1;
    }
    counts
}
