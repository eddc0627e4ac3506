//! High-level entry points bound to a [`PipelineConfig`].

use std::path::Path;

use crate::accessibility::{AccessibilityRecord, read_accessibility};
use crate::batch::{self, BatchResult};
use crate::config::PipelineConfig;
use crate::divergence::{
    DivergenceRecord, DivergenceResidueRecord, divergence_table, merge_divergence_tables,
};
use crate::merge::{Correlation, MergedRecord, correlate, merge_residue_tables};
use crate::selection::{SelectionRecord, selection_table};
use crate::structure::{CoordinateWarning, collect_coordinates, load_structure};
use crate::types::PolystructError;
use crate::variants::{parse_codon_stats_file, parse_slac_file, parse_variant_file};
use crate::wcn::{WcnRecord, calculate_wcn};

/// Contact numbers of one structure, with the diagnostics raised while
/// extracting coordinates
#[derive(Debug, Clone, Default)]
pub struct WcnReport {
    pub records: Vec<WcnRecord>,
    pub warnings: Vec<CoordinateWarning>,
}

/// Merged residue table of one gene and its structural correlations
#[derive(Debug, Clone, Default)]
pub struct ResidueTable<R = MergedRecord> {
    pub rows: Vec<R>,
    pub correlations: Vec<Correlation>,
}

/// Runs the pipeline stages against the files a [`PipelineConfig`] points at.
///
/// # Examples
///
/// ```rust,no_run
/// use polystruct_core::{PolystructAnalyzer, config::PipelineConfig};
/// use std::path::PathBuf;
///
/// let analyzer = PolystructAnalyzer::new(PipelineConfig {
///     data_dir: PathBuf::from("genes"),
///     ..Default::default()
/// });
///
/// let batch = analyzer.aggregate_directory()?;
/// println!("{} positions over {} genes", batch.records.len(), batch.status.len());
/// # Ok::<(), polystruct_core::types::PolystructError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolystructAnalyzer {
    pub config: PipelineConfig,
}

impl PolystructAnalyzer {
    /// Creates an analyzer without touching the global thread pool.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polystruct_core::{PolystructAnalyzer, config::PipelineConfig};
    ///
    /// let analyzer = PolystructAnalyzer::new(PipelineConfig::default());
    /// assert_eq!(analyzer.config.gene_prefix, "FBgn");
    /// ```
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Creates an analyzer and sizes the global Rayon pool from
    /// `config.num_threads`.
    ///
    /// # Errors
    ///
    /// Returns [`PolystructError::InvalidConfig`] if the thread count is zero
    /// or the global pool was already initialized.
    pub fn with_config(config: PipelineConfig) -> Result<Self, PolystructError> {
        if let Some(num_threads) = config.num_threads {
            if num_threads == 0 {
                return Err(PolystructError::InvalidConfig(
                    "Thread count must be at least 1".to_string(),
                ));
            }
            rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()
                .map_err(|e| {
                    PolystructError::InvalidConfig(format!("Failed to configure thread pool: {e}"))
                })?;
        }
        Ok(Self { config })
    }

    /// Load a structure and compute WCN for every amino-acid residue.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, an amino acid lacks its
    /// alpha carbon, or two residues share a coordinate.
    pub fn wcn_for_structure(&self, path: &Path) -> Result<WcnReport, PolystructError> {
        let residues = load_structure(path)?;
        let extraction = collect_coordinates(&residues)?;
        tracing::debug!(
            path = %path.display(),
            residues = extraction.residues.len(),
            warnings = extraction.warnings.len(),
            "extracted coordinates"
        );
        let records = calculate_wcn(extraction.residues)?;
        Ok(WcnReport {
            records,
            warnings: extraction.warnings,
        })
    }

    /// Selection table of one gene under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Fails if any of the three selection inputs is missing or malformed.
    pub fn gene_selection(&self, gene_id: &str) -> Result<Vec<SelectionRecord>, PolystructError> {
        let files = self.config.gene_files(gene_id);
        let synonymous = parse_variant_file(&files.synonymous)?;
        let missense = parse_variant_file(&files.missense)?;
        let codon_stats = parse_codon_stats_file(&files.codon_stats)?;
        Ok(selection_table(&missense, &synonymous, &codon_stats))
    }

    /// Aggregate every gene directory under `config.data_dir`.
    pub fn aggregate_directory(&self) -> Result<BatchResult, PolystructError> {
        batch::aggregate_directory(&self.config.data_dir, &self.config.gene_prefix)
    }

    /// Selection table of `gene_id` joined with its structure's WCN and the
    /// accessibility table at `accessibility_path`.
    pub fn residue_table(
        &self,
        gene_id: &str,
        accessibility_path: &Path,
    ) -> Result<ResidueTable, PolystructError> {
        let selection = self.gene_selection(gene_id)?;
        let structure = self.config.gene_files(gene_id).structure;
        let wcn = self.wcn_for_structure(&structure)?;
        let accessibility: Vec<AccessibilityRecord> = read_accessibility(accessibility_path)?;

        let rows = merge_residue_tables(&selection, &accessibility, &wcn.records);
        let correlations = correlate(&rows);
        Ok(ResidueTable { rows, correlations })
    }

    /// dN/dS table of one gene from its SLAC site file.
    ///
    /// # Errors
    ///
    /// Fails if the SLAC file is missing or malformed.
    pub fn gene_divergence(&self, gene_id: &str) -> Result<Vec<DivergenceRecord>, PolystructError> {
        let sites = parse_slac_file(&self.config.gene_files(gene_id).slac)?;
        Ok(divergence_table(&sites))
    }

    /// dN/dS table of `gene_id` joined with its structure's WCN and the
    /// accessibility table at `accessibility_path`.
    pub fn divergence_residue_table(
        &self,
        gene_id: &str,
        accessibility_path: &Path,
    ) -> Result<ResidueTable<DivergenceResidueRecord>, PolystructError> {
        let divergence = self.gene_divergence(gene_id)?;
        let structure = self.config.gene_files(gene_id).structure;
        let wcn = self.wcn_for_structure(&structure)?;
        let accessibility = read_accessibility(accessibility_path)?;

        let rows = merge_divergence_tables(&divergence, &accessibility, &wcn.records);
        let correlations = correlate(&rows);
        Ok(ResidueTable { rows, correlations })
    }
}
