//! Multi-gene pN/pS aggregation over a directory of gene folders.

use std::fs;
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::config::GeneFiles;
use crate::selection::{PositionCounts, SelectionRecord, aggregate_positions, compute_ratios};
use crate::types::PolystructError;
use crate::variants::{parse_codon_stats_file, parse_variant_file};

/// Which artifacts a gene directory holds, and whether pN/pS was computed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneStatus {
    pub gene_id: String,
    #[serde(rename = "synonymous.Poly?", serialize_with = "as_flag")]
    pub synonymous: bool,
    #[serde(rename = "missense.Poly?", serialize_with = "as_flag")]
    pub missense: bool,
    #[serde(rename = "codonStats?", serialize_with = "as_flag")]
    pub codon_stats: bool,
    #[serde(rename = "features?", serialize_with = "as_flag")]
    pub features: bool,
    #[serde(rename = "SLAC?", serialize_with = "as_flag")]
    pub slac: bool,
    #[serde(rename = "pdb?", serialize_with = "as_flag")]
    pub structure: bool,
    /// At least one selection record was produced for this gene
    #[serde(rename = "pNpS_calc", serialize_with = "as_flag")]
    pub pnps_computed: bool,
}

impl GeneStatus {
    pub const HEADER: [&'static str; 8] = [
        "gene_id",
        "synonymous.Poly?",
        "missense.Poly?",
        "codonStats?",
        "features?",
        "SLAC?",
        "pdb?",
        "pNpS_calc",
    ];

    /// Check which files of `files` exist on disk.
    pub fn inspect(files: &GeneFiles) -> Self {
        Self {
            gene_id: files.gene_id.clone(),
            synonymous: files.synonymous.is_file(),
            missense: files.missense.is_file(),
            codon_stats: files.codon_stats.is_file(),
            features: files.features.is_file(),
            slac: files.slac.is_file(),
            structure: files.structure.is_file(),
            pnps_computed: false,
        }
    }

    /// Whether all three selection inputs are present
    #[must_use]
    pub fn can_compute_pnps(&self) -> bool {
        self.synonymous && self.missense && self.codon_stats
    }
}

fn as_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// A gene whose inputs were present but could not be processed
#[derive(Debug)]
pub struct GeneFailure {
    pub gene_id: String,
    pub error: PolystructError,
}

/// Outcome of a directory-wide aggregation
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Selection records of every gene, ratios computed over the combined set
    pub records: Vec<SelectionRecord>,
    /// One status row per discovered gene directory
    pub status: Vec<GeneStatus>,
    pub failures: Vec<GeneFailure>,
}

/// List gene directories of `data_dir` whose name contains `prefix`, sorted.
pub fn discover_genes(data_dir: &Path, prefix: &str) -> Result<Vec<String>, PolystructError> {
    let mut genes = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.contains(prefix) {
                genes.push(name.to_string());
            }
        }
    }
    genes.sort();
    Ok(genes)
}

/// Parse the three selection inputs of one gene and aggregate them.
pub fn gene_position_counts(files: &GeneFiles) -> Result<Vec<PositionCounts>, PolystructError> {
    let synonymous = parse_variant_file(&files.synonymous)?;
    let missense = parse_variant_file(&files.missense)?;
    let codon_stats = parse_codon_stats_file(&files.codon_stats)?;
    Ok(aggregate_positions(&missense, &synonymous, &codon_stats))
}

/// Aggregate pN/pS over every gene directory in `data_dir`.
///
/// Genes missing any of the three selection inputs are recorded in the
/// status table and skipped. A gene whose files fail to parse is logged,
/// reported in [`BatchResult::failures`], and skipped; the batch goes on.
/// Ratios are computed once, after all genes are concatenated.
pub fn aggregate_directory(data_dir: &Path, prefix: &str) -> Result<BatchResult, PolystructError> {
    let mut result = BatchResult::default();
    let mut counts = Vec::new();

    for gene_id in discover_genes(data_dir, prefix)? {
        let files = GeneFiles::new(data_dir, &gene_id);
        let mut status = GeneStatus::inspect(&files);

        if status.can_compute_pnps() {
            match gene_position_counts(&files) {
                Ok(gene_counts) => {
                    tracing::debug!(gene = %gene_id, positions = gene_counts.len(), "aggregated gene");
                    status.pnps_computed = !gene_counts.is_empty();
                    counts.extend(gene_counts);
                }
                Err(error) => {
                    tracing::error!(gene = %gene_id, %error, "skipping gene");
                    result.failures.push(GeneFailure {
                        gene_id: gene_id.clone(),
                        error,
                    });
                }
            }
        } else {
            tracing::debug!(gene = %gene_id, "selection inputs incomplete");
        }
        result.status.push(status);
    }

    result.records = compute_ratios(counts);
    tracing::info!(
        genes = result.status.len(),
        computed = result.status.iter().filter(|s| s.pnps_computed).count(),
        records = result.records.len(),
        "aggregation finished"
    );
    Ok(result)
}
