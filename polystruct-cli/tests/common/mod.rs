#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

pub const GENE_ID: &str = "FBgn0000015";

/// Three residues on the x axis, 2 Å apart; glycine has no O.
pub const STRUCTURE: &str = "\
ATOM      1  N   MET A   1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  MET A   1       1.000   0.000   0.000  1.00  0.00           C
ATOM      3  C   MET A   1       1.500   1.000   0.000  1.00  0.00           C
ATOM      4  O   MET A   1       1.500   2.000   0.000  1.00  0.00           O
ATOM      5  CB  MET A   1       1.000  -1.000   0.000  1.00  0.00           C
ATOM      6  N   LYS A   2       3.000   0.000   0.000  1.00  0.00           N
ATOM      7  CA  LYS A   2       3.000   0.000   0.000  1.00  0.00           C
ATOM      8  C   LYS A   2       3.500   1.000   0.000  1.00  0.00           C
ATOM      9  O   LYS A   2       3.500   2.000   0.000  1.00  0.00           O
ATOM     10  CB  LYS A   2       3.000  -1.000   0.000  1.00  0.00           C
ATOM     11  N   GLY A   3       5.000   0.000   0.000  1.00  0.00           N
ATOM     12  CA  GLY A   3       5.000   0.000   0.000  1.00  0.00           C
ATOM     13  C   GLY A   3       5.500   1.000   0.000  1.00  0.00           C
END
";

pub const SYNONYMOUS: &str = "P1\t2\t3\ts1\n";
pub const MISSENSE: &str = "P1\t2\t3\tm1\nP1\t2\t3\tm2\nP1\t3\t4\tm3\n";
pub const CODON_STATS: &str = "\
P1\t1\t2\tdmel:1,M,ATG,1.0,1.0
P1\t2\t3\tdmel:2,K,AAA,1.0,0.25
P1\t2\t3\tdsim:2,K,AAA,1.0,0.25
P1\t3\t4\tdmel:3,G,GGA,2.0,1.0
";

/// SLAC sites at positions 1 to 3; the last has no synonymous substitutions.
pub const SLAC: &str = "\
P1\t0\t1\t1:1.0,2.0,0.5,0.5,0.2,0.4,0.5,0.25,-0.25,0.7,0.4
P1\t1\t2\t4:1.0,2.0,0.5,1.0,0.2,0.4,0.5,0.5,0.0,0.5,0.5
P1\t2\t3\t7:1.0,2.0,0.0,1.0,0.0,0.4,0.0,0.5,0.5,0.2,0.6
";

pub const ACCESSIBILITY: &str = "\
position,amino_acid,secondary_structure,rasa
2,K,H,0.40
3,G,-,NA
";

fn gene_path(data_dir: &Path, gene_id: &str, suffix: &str) -> PathBuf {
    data_dir.join(gene_id).join(format!("{gene_id}{suffix}"))
}

/// Write a complete gene folder under `data_dir`.
pub fn write_gene(data_dir: &Path, gene_id: &str) {
    write_selection_inputs(data_dir, gene_id, SYNONYMOUS, MISSENSE, CODON_STATS);
    let refprot = data_dir.join(gene_id).join("refprot");
    fs::create_dir_all(&refprot).unwrap();
    fs::write(refprot.join(format!("{gene_id}.pdb")), STRUCTURE).unwrap();
}

pub fn write_selection_inputs(
    data_dir: &Path,
    gene_id: &str,
    synonymous: &str,
    missense: &str,
    codon_stats: &str,
) {
    fs::create_dir_all(data_dir.join(gene_id)).unwrap();
    fs::write(gene_path(data_dir, gene_id, ".synonymous.Poly.UniProt.bed"), synonymous).unwrap();
    fs::write(gene_path(data_dir, gene_id, ".missense.Poly.UniProt.bed"), missense).unwrap();
    fs::write(gene_path(data_dir, gene_id, ".codonStats.UniProt.bed"), codon_stats).unwrap();
}

pub fn write_slac(data_dir: &Path, gene_id: &str, slac: &str) {
    fs::create_dir_all(data_dir.join(gene_id)).unwrap();
    fs::write(gene_path(data_dir, gene_id, ".SLAC.UniProt.bed"), slac).unwrap();
}

pub fn structure_path(data_dir: &Path, gene_id: &str) -> PathBuf {
    data_dir
        .join(gene_id)
        .join("refprot")
        .join(format!("{gene_id}.pdb"))
}

/// The polystruct binary with logging kept quiet
pub fn polystruct() -> Command {
    let mut cmd = Command::cargo_bin("polystruct").unwrap();
    cmd.env_remove("POLYSTRUCT_LOG");
    cmd
}

/// Run polystruct and return its stdout, asserting success.
pub fn run_stdout(args: &[&str]) -> String {
    let output = polystruct().args(args).assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}
