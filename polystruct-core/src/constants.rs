// =============================================================================
// Structure
// =============================================================================

/// Backbone atom names; every other atom of an amino acid is a sidechain atom
pub const BACKBONE_ATOMS: [&str; 4] = ["N", "CA", "C", "O"];

/// Backbone atoms whose absence is reported but tolerated
pub const OPTIONAL_BACKBONE_ATOMS: [&str; 3] = ["N", "C", "O"];

/// Name of the alpha-carbon atom
pub const ALPHA_CARBON: &str = "CA";

/// One-letter code of glycine, the only amino acid without a sidechain
pub const GLYCINE: char = 'G';

/// Residue names accepted as amino acids, with their one-letter codes.
///
/// The twenty standard residues plus selenocysteine, pyrrolysine and
/// selenomethionine, which appear in deposited structures as polymer residues.
pub const AMINO_ACIDS: [(&str, char); 23] = [
    ("ALA", 'A'),
    ("ARG", 'R'),
    ("ASN", 'N'),
    ("ASP", 'D'),
    ("CYS", 'C'),
    ("GLN", 'Q'),
    ("GLU", 'E'),
    ("GLY", 'G'),
    ("HIS", 'H'),
    ("ILE", 'I'),
    ("LEU", 'L'),
    ("LYS", 'K'),
    ("MET", 'M'),
    ("PHE", 'F'),
    ("PRO", 'P'),
    ("SER", 'S'),
    ("THR", 'T'),
    ("TRP", 'W'),
    ("TYR", 'Y'),
    ("VAL", 'V'),
    ("SEC", 'U'),
    ("PYL", 'O'),
    ("MSE", 'M'),
];

/// Convert a three-letter residue name to its one-letter code.
///
/// Returns `None` for anything that is not an amino acid (water, ligands, ions).
#[must_use]
pub fn residue_one_letter(name: &str) -> Option<char> {
    let name = name.trim();
    AMINO_ACIDS
        .iter()
        .find(|(three, _)| three.eq_ignore_ascii_case(name))
        .map(|&(_, one)| one)
}

// =============================================================================
// Variant tables
// =============================================================================

/// Separator between the leading scalar and the tail of a tag-data field
pub const TAG_SCALAR_SEPARATOR: char = ':';

/// Separator between tail elements of a tag-data field
pub const TAG_TAIL_SEPARATOR: char = ',';

/// Column count of synonymous and missense variant tables
pub const VARIANT_COLUMNS: usize = 4;

/// Column count of codon-statistics tables after tag expansion
pub const CODON_STATS_COLUMNS: usize = 9;

/// Column count of SLAC site tables after tag expansion
pub const SLAC_COLUMNS: usize = 15;

/// Codon position presumed to be the start codon; never reported
pub const START_CODON_POSITION: i64 = 1;

// =============================================================================
// Gene directory layout
// =============================================================================

/// Default substring identifying gene directories
pub const DEFAULT_GENE_PREFIX: &str = "FBgn";

pub const SYNONYMOUS_SUFFIX: &str = ".synonymous.Poly.UniProt.bed";
pub const MISSENSE_SUFFIX: &str = ".missense.Poly.UniProt.bed";
pub const CODON_STATS_SUFFIX: &str = ".codonStats.UniProt.bed";
pub const FEATURES_SUFFIX: &str = ".features.UniProt.bed";
pub const SLAC_SUFFIX: &str = ".SLAC.UniProt.bed";

/// Subdirectory holding the reference structure of a gene
pub const STRUCTURE_DIR: &str = "refprot";
pub const STRUCTURE_SUFFIX: &str = ".pdb";
