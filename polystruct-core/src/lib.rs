//! # polystruct
//!
//! Joins population-genetic selection statistics with protein structure.
//!
//! ## Overview
//!
//! For each gene, polystruct counts observed synonymous and missense
//! polymorphisms per codon position, sums the expected counts reported by
//! codon statistics across species, and derives pN, pS and pN/pS. On the
//! structure side it computes the weighted contact number (WCN) of every
//! residue, both from alpha-carbon positions and from sidechain centers.
//! The two tables are joined on amino-acid position together with solvent
//! accessibility, and pN/pS is correlated against the structural columns.
//! Divergence-based dN/dS from SLAC site estimates can be joined and
//! correlated the same way.
//!
//! ## Features
//!
//! - **WCN**: all-pairs inverse-square contact numbers, parallel with Rayon
//! - **Variant tables**: strict, width-checked BED-like parsing
//! - **Batch mode**: one pass over a directory of gene folders, with a
//!   per-gene status table
//! - **Delimited output**: CSV or TSV with a stable header
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polystruct_core::{PolystructAnalyzer, config::PipelineConfig};
//! use std::path::{Path, PathBuf};
//!
//! let analyzer = PolystructAnalyzer::new(PipelineConfig {
//!     data_dir: PathBuf::from("genes"),
//!     ..Default::default()
//! });
//!
//! let report = analyzer.wcn_for_structure(Path::new("genes/FBgn0000015/refprot/FBgn0000015.pdb"))?;
//! println!("{} residues", report.records.len());
//!
//! let table = analyzer.residue_table("FBgn0000015", Path::new("FBgn0000015.dssp.csv"))?;
//! for correlation in &table.correlations {
//!     println!("{}: {:?}", correlation.column, correlation.pearson_r);
//! }
//! # Ok::<(), polystruct_core::types::PolystructError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Run configuration and per-gene file layout
//! - [`engine`]: [`PolystructAnalyzer`], the high-level entry points
//! - [`types`]: Coordinates, residue labels and the error type
//! - [`constants`]: Atom names, residue codes and file naming
//! - [`structure`]: Structure loading and coordinate extraction
//! - [`wcn`]: Weighted contact number
//! - [`variants`]: Variant and codon-statistics table parsing
//! - [`selection`]: pN/pS aggregation
//! - [`divergence`]: dN/dS from SLAC site estimates
//! - [`accessibility`]: Solvent-accessibility table reader
//! - [`merge`]: Residue-level join and correlation
//! - [`batch`]: Multi-gene aggregation
//! - [`output`]: Delimited-text writers
//!
//! ## Error Handling
//!
//! All fallible operations return
//! [`Result<T, PolystructError>`](types::PolystructError). Coordinate
//! problems that do not stop the computation (a missing backbone atom, an
//! empty sidechain) are returned as
//! [`CoordinateWarning`](structure::CoordinateWarning) values and logged
//! through `tracing`.

pub mod accessibility;
pub mod batch;
pub mod config;
pub mod constants;
pub mod divergence;
pub mod engine;
pub mod merge;
pub mod output;
pub mod selection;
pub mod structure;
pub mod types;
pub mod variants;
pub mod wcn;

pub use engine::PolystructAnalyzer;
