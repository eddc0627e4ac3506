use std::path::{Path, PathBuf};

use crate::constants::{
    CODON_STATS_SUFFIX, DEFAULT_GENE_PREFIX, FEATURES_SUFFIX, MISSENSE_SUFFIX, SLAC_SUFFIX,
    STRUCTURE_DIR, STRUCTURE_SUFFIX, SYNONYMOUS_SUFFIX,
};

/// Delimiter of a table, for output and for the accessibility input.
///
/// # Examples
///
/// ```rust
/// use polystruct_core::config::{TableFormat, PipelineConfig};
///
/// let config = PipelineConfig {
///     output_format: TableFormat::Tsv,
///     ..Default::default()
/// };
/// assert_eq!(config.output_format.delimiter(), b'\t');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Comma-separated values.
    #[default]
    Csv,

    /// Tab-separated values.
    Tsv,
}

impl TableFormat {
    #[must_use]
    pub const fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }

    /// Guess the format of an input table from its file extension.
    ///
    /// `.tsv` and `.tab` read as tab-separated, everything else as CSV.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => {
                Self::Tsv
            }
            _ => Self::Csv,
        }
    }
}

/// Configuration settings for a polystruct run.
///
/// Every entry point receives its paths and naming rules through this
/// struct; nothing is read from process-wide defaults.
///
/// # Examples
///
/// ```rust
/// use polystruct_core::config::PipelineConfig;
/// use std::path::PathBuf;
///
/// let config = PipelineConfig {
///     data_dir: PathBuf::from("/data/genes"),
///     num_threads: Some(4),
///     ..Default::default()
/// };
/// assert_eq!(config.gene_prefix, "FBgn");
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding one subdirectory per gene.
    ///
    /// **Default**: `.`
    pub data_dir: PathBuf,

    /// Substring identifying gene directories inside `data_dir`.
    ///
    /// **Default**: `"FBgn"`
    pub gene_prefix: String,

    /// Delimiter for written tables.
    ///
    /// **Default**: [`TableFormat::Csv`]
    pub output_format: TableFormat,

    /// Number of threads for the WCN engine.
    ///
    /// When set, configures the global Rayon thread pool.
    ///
    /// **Default**: `None` (use all available cores)
    pub num_threads: Option<usize>,

    /// Suppress progress messages.
    ///
    /// **Default**: `false`
    pub quiet: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            gene_prefix: DEFAULT_GENE_PREFIX.to_string(),
            output_format: TableFormat::Csv,
            num_threads: None,
            quiet: false,
        }
    }
}

impl PipelineConfig {
    /// Paths of every artifact belonging to `gene_id`.
    #[must_use]
    pub fn gene_files(&self, gene_id: &str) -> GeneFiles {
        GeneFiles::new(&self.data_dir, gene_id)
    }
}

/// Locations of the per-gene input files.
///
/// ```text
/// <data_dir>/<id>/<id>.synonymous.Poly.UniProt.bed
/// <data_dir>/<id>/<id>.missense.Poly.UniProt.bed
/// <data_dir>/<id>/<id>.codonStats.UniProt.bed
/// <data_dir>/<id>/<id>.features.UniProt.bed
/// <data_dir>/<id>/<id>.SLAC.UniProt.bed
/// <data_dir>/<id>/refprot/<id>.pdb
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneFiles {
    pub gene_id: String,
    pub synonymous: PathBuf,
    pub missense: PathBuf,
    pub codon_stats: PathBuf,
    pub features: PathBuf,
    pub slac: PathBuf,
    pub structure: PathBuf,
}

impl GeneFiles {
    pub fn new(data_dir: &Path, gene_id: &str) -> Self {
        let gene_dir = data_dir.join(gene_id);
        let named = |suffix: &str| gene_dir.join(format!("{gene_id}{suffix}"));
        Self {
            gene_id: gene_id.to_string(),
            synonymous: named(SYNONYMOUS_SUFFIX),
            missense: named(MISSENSE_SUFFIX),
            codon_stats: named(CODON_STATS_SUFFIX),
            features: named(FEATURES_SUFFIX),
            slac: named(SLAC_SUFFIX),
            structure: gene_dir
                .join(STRUCTURE_DIR)
                .join(format!("{gene_id}{STRUCTURE_SUFFIX}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.gene_prefix, "FBgn");
        assert_eq!(config.output_format, TableFormat::Csv);
        assert!(config.num_threads.is_none());
        assert!(!config.quiet);
    }

    #[test]
    fn test_gene_files_layout() {
        let files = GeneFiles::new(Path::new("/data"), "FBgn0000015");
        assert_eq!(
            files.synonymous,
            PathBuf::from("/data/FBgn0000015/FBgn0000015.synonymous.Poly.UniProt.bed")
        );
        assert_eq!(
            files.codon_stats,
            PathBuf::from("/data/FBgn0000015/FBgn0000015.codonStats.UniProt.bed")
        );
        assert_eq!(
            files.structure,
            PathBuf::from("/data/FBgn0000015/refprot/FBgn0000015.pdb")
        );
    }

    #[test]
    fn test_table_format_from_path() {
        assert_eq!(TableFormat::from_path(Path::new("a.tsv")), TableFormat::Tsv);
        assert_eq!(TableFormat::from_path(Path::new("a.TAB")), TableFormat::Tsv);
        assert_eq!(TableFormat::from_path(Path::new("a.csv")), TableFormat::Csv);
        assert_eq!(TableFormat::from_path(Path::new("a")), TableFormat::Csv);
    }
}
