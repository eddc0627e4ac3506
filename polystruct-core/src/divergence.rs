//! Divergence-based selection pressure (dN/dS) from SLAC site estimates.
//!
//! Each SLAC row already carries the expected sites and inferred
//! substitutions of one codon, so the ratio is computed row by row:
//! `dN/dS = (DN / E[N]) / (DS / E[S])`. Unlike pN/pS there is no
//! aggregation step and no start-codon exclusion.

use serde::Serialize;

use crate::accessibility::AccessibilityRecord;
use crate::merge::{PositionKeyed, StructureJoined, left_join};
use crate::variants::SlacRecord;
use crate::wcn::WcnRecord;

/// Per-codon divergence statistics, ready for output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivergenceRecord {
    #[serde(rename = "UniProt_ID")]
    pub protein_id: String,
    #[serde(rename = "Codon_pos")]
    pub codon_position: String,
    #[serde(rename = "AA_pos")]
    pub position: i64,
    #[serde(rename = "E[S]")]
    pub expected_synonymous: f64,
    #[serde(rename = "E[N]")]
    pub expected_nonsynonymous: f64,
    #[serde(rename = "DS")]
    pub synonymous_substitutions: f64,
    #[serde(rename = "DN")]
    pub nonsynonymous_substitutions: f64,
    #[serde(rename = "dN/dS")]
    pub dn_ds: f64,
}

impl DivergenceRecord {
    /// Output columns, in serialization order
    pub const HEADER: [&'static str; 8] = [
        "UniProt_ID",
        "Codon_pos",
        "AA_pos",
        "E[S]",
        "E[N]",
        "DS",
        "DN",
        "dN/dS",
    ];
}

impl From<&SlacRecord> for DivergenceRecord {
    /// IEEE-754 division throughout, as for pN/pS: a zero expectation or a
    /// zero DS gives `inf` or `NaN` rather than an error.
    fn from(site: &SlacRecord) -> Self {
        let dn = site.nonsynonymous_substitutions / site.expected_nonsynonymous;
        let ds = site.synonymous_substitutions / site.expected_synonymous;
        Self {
            protein_id: site.protein_id.clone(),
            codon_position: site.codon_position.clone(),
            position: site.position,
            expected_synonymous: site.expected_synonymous,
            expected_nonsynonymous: site.expected_nonsynonymous,
            synonymous_substitutions: site.synonymous_substitutions,
            nonsynonymous_substitutions: site.nonsynonymous_substitutions,
            dn_ds: dn / ds,
        }
    }
}

impl PositionKeyed for DivergenceRecord {
    fn position(&self) -> i64 {
        self.position
    }
}

/// dN/dS for every SLAC row, in file order.
///
/// # Examples
///
/// ```rust
/// use polystruct_core::divergence::divergence_table;
///
/// assert!(divergence_table(&[]).is_empty());
/// ```
pub fn divergence_table(sites: &[SlacRecord]) -> Vec<DivergenceRecord> {
    sites.iter().map(DivergenceRecord::from).collect()
}

/// One row of the dN/dS residue table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivergenceResidueRecord {
    #[serde(rename = "UniProt_ID")]
    pub protein_id: String,
    #[serde(rename = "Codon_pos")]
    pub codon_position: String,
    #[serde(rename = "AA_pos")]
    pub position: i64,
    #[serde(rename = "E[S]")]
    pub expected_synonymous: f64,
    #[serde(rename = "E[N]")]
    pub expected_nonsynonymous: f64,
    #[serde(rename = "DS")]
    pub synonymous_substitutions: f64,
    #[serde(rename = "DN")]
    pub nonsynonymous_substitutions: f64,
    #[serde(rename = "dN/dS")]
    pub dn_ds: f64,
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

impl DivergenceResidueRecord {
    fn new(
        divergence: &DivergenceRecord,
        accessibility: Option<&AccessibilityRecord>,
        wcn: Option<&WcnRecord>,
    ) -> Self {
        Self {
            protein_id: divergence.protein_id.clone(),
            codon_position: divergence.codon_position.clone(),
            position: divergence.position,
            expected_synonymous: divergence.expected_synonymous,
            expected_nonsynonymous: divergence.expected_nonsynonymous,
            synonymous_substitutions: divergence.synonymous_substitutions,
            nonsynonymous_substitutions: divergence.nonsynonymous_substitutions,
            dn_ds: divergence.dn_ds,
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

impl StructureJoined for DivergenceResidueRecord {
    fn ratio(&self) -> f64 {
        self.dn_ds
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

/// Left-join accessibility and WCN records onto the dN/dS table, with the
/// same ordering and fan-out rules as [`crate::merge::merge_residue_tables`].
pub fn merge_divergence_tables(
    divergence: &[DivergenceRecord],
    accessibility: &[AccessibilityRecord],
    wcn: &[WcnRecord],
) -> Vec<DivergenceResidueRecord> {
    left_join(divergence, accessibility, wcn)
        .into_iter()
        .map(|(row, access, structure)| DivergenceResidueRecord::new(row, access, structure))
        .collect()
}
