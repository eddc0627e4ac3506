//! Residue-level table: selection statistics joined with structure.
//!
//! A per-position table (pN/pS here, dN/dS in [`crate::divergence`]) is the
//! anchor of a left join on amino-acid position.
//! Accessibility and WCN columns stay `None` where the structure has no
//! residue at that position. Structure residues carrying an insertion code
//! have no sequence position and never match.

use std::collections::HashMap;

use serde::Serialize;

use crate::accessibility::AccessibilityRecord;
use crate::selection::SelectionRecord;
use crate::wcn::WcnRecord;

/// A row keyed by amino-acid position, usable as the anchor of a join
pub trait PositionKeyed {
    fn position(&self) -> i64;
}

impl PositionKeyed for SelectionRecord {
    fn position(&self) -> i64 {
        self.position
    }
}

/// A joined row whose evolutionary ratio is correlated against structure
pub trait StructureJoined {
    /// pN/pS or dN/dS
    fn ratio(&self) -> f64;
    fn wcn_ca(&self) -> Option<f64>;
    fn wcn_sc(&self) -> Option<f64>;
    fn rasa(&self) -> Option<f64>;
}

/// One row of the merged residue table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRecord {
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
    #[serde(rename = "DSSP_AA")]
    pub dssp_amino_acid: Option<String>,
    #[serde(rename = "Sec_Struct")]
    pub secondary_structure: Option<String>,
    #[serde(rename = "RASA")]
    pub rasa: Option<f64>,
    #[serde(rename = "WCN_AA")]
    pub wcn_amino_acid: Option<char>,
    pub chain: Option<String>,
    pub wcn_ca: Option<f64>,
    pub wcn_sc: Option<f64>,
}

impl MergedRecord {
    fn new(
        selection: &SelectionRecord,
        accessibility: Option<&AccessibilityRecord>,
        wcn: Option<&WcnRecord>,
    ) -> Self {
        Self {
            protein_id: selection.protein_id.clone(),
            position: selection.position,
            codon_index: selection.codon_index.clone(),
            species_count: selection.species_count,
            expected_nonsynonymous: selection.expected_nonsynonymous,
            expected_synonymous: selection.expected_synonymous,
            observed_nonsynonymous: selection.observed_nonsynonymous,
            observed_synonymous: selection.observed_synonymous,
            pn: selection.pn,
            ps: selection.ps,
            pn_ps: selection.pn_ps,
            dssp_amino_acid: accessibility.map(|a| a.amino_acid.clone()),
            secondary_structure: accessibility.map(|a| a.secondary_structure.clone()),
            rasa: accessibility.and_then(|a| a.rasa),
            wcn_amino_acid: wcn.map(|w| w.residue.amino_acid),
            chain: wcn.map(|w| w.residue.chain.clone()),
            wcn_ca: wcn.map(|w| w.wcn_ca),
            wcn_sc: wcn.map(|w| w.wcn_sc),
        }
    }
}

impl StructureJoined for MergedRecord {
    fn ratio(&self) -> f64 {
        self.pn_ps
    }

    fn wcn_ca(&self) -> Option<f64> {
        self.wcn_ca
    }

    fn wcn_sc(&self) -> Option<f64> {
        self.wcn_sc
    }

    fn rasa(&self) -> Option<f64> {
        self.rasa
    }
}

/// Left-join accessibility and WCN records onto the selection table.
///
/// Output keeps the selection row order. When several structure rows share
/// a position (multiple chains), one merged row is emitted per combination.
pub fn merge_residue_tables(
    selection: &[SelectionRecord],
    accessibility: &[AccessibilityRecord],
    wcn: &[WcnRecord],
) -> Vec<MergedRecord> {
    left_join(selection, accessibility, wcn)
        .into_iter()
        .map(|(row, access, structure)| MergedRecord::new(row, access, structure))
        .collect()
}

/// Matching accessibility and WCN rows for every anchor row, in anchor order.
///
/// An anchor without a match pairs with `None`; several matches fan out.
pub(crate) fn left_join<'a, T: PositionKeyed>(
    anchor: &'a [T],
    accessibility: &'a [AccessibilityRecord],
    wcn: &'a [WcnRecord],
) -> Vec<(&'a T, Option<&'a AccessibilityRecord>, Option<&'a WcnRecord>)> {
    let mut accessibility_at: HashMap<i64, Vec<&AccessibilityRecord>> = HashMap::new();
    for record in accessibility {
        accessibility_at.entry(record.position).or_default().push(record);
    }
    let mut wcn_at: HashMap<i64, Vec<&WcnRecord>> = HashMap::new();
    for record in wcn {
        match record.residue.position.plain_position() {
            Some(position) => wcn_at.entry(position).or_default().push(record),
            None => tracing::debug!(
                position = %record.residue.position,
                chain = %record.residue.chain,
                "residue with insertion code left out of the join"
            ),
        }
    }

    let mut joined = Vec::with_capacity(anchor.len());
    for row in anchor {
        let access_matches = matches_or_none(accessibility_at.get(&row.position()));
        let wcn_matches = matches_or_none(wcn_at.get(&row.position()));
        for access in &access_matches {
            for structure in &wcn_matches {
                joined.push((row, *access, *structure));
            }
        }
    }
    joined
}

fn matches_or_none<'a, T>(found: Option<&Vec<&'a T>>) -> Vec<Option<&'a T>> {
    match found {
        Some(records) => records.iter().map(|r| Some(*r)).collect(),
        None => vec![None],
    }
}

/// Pearson correlation of the evolutionary ratio with one structural column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub column: &'static str,
    /// `None` with fewer than two complete pairs or a constant column
    pub pearson_r: Option<f64>,
    /// Number of rows where both values were finite
    pub pairs: usize,
}

/// Correlate the ratio (pN/pS or dN/dS) against `wcn_ca`, `wcn_sc` and `RASA`.
///
/// Each pair uses only rows where both values are present and finite.
pub fn correlate<R: StructureJoined>(table: &[R]) -> Vec<Correlation> {
    let columns: [(&'static str, fn(&R) -> Option<f64>); 3] = [
        ("wcn_ca", R::wcn_ca),
        ("wcn_sc", R::wcn_sc),
        ("RASA", R::rasa),
    ];

    columns
        .into_iter()
        .map(|(column, value)| {
            let pairs: Vec<(f64, f64)> = table
                .iter()
                .filter_map(|r| Some((r.ratio(), value(r)?)))
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect();
            Correlation {
                column,
                pearson_r: pearson(&pairs),
                pairs: pairs.len(),
            }
        })
        .collect()
}

/// Pearson correlation coefficient of paired samples.
#[must_use]
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some(sxy / (sxx * syy).sqrt())
}
