use std::fmt;

use crate::constants::{
    ALPHA_CARBON, BACKBONE_ATOMS, GLYCINE, OPTIONAL_BACKBONE_ATOMS, residue_one_letter,
};
use crate::types::{Coordinate, PolystructError, PositionLabel};

use super::StructureResidue;

/// Reference coordinates of one amino-acid residue
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueCoordinates {
    /// One-letter amino acid code
    pub amino_acid: char,
    pub position: PositionLabel,
    pub chain: String,
    /// Alpha-carbon coordinate
    pub ca: Coordinate,
    /// Mean of the sidechain atom coordinates, or `ca` when there are none
    pub sidechain_center: Coordinate,
}

/// Non-fatal problems found while extracting coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateWarning {
    /// A backbone atom other than CA is absent
    MissingBackboneAtom {
        atom: &'static str,
        position: PositionLabel,
        amino_acid: char,
    },
    /// A non-glycine residue has no sidechain atoms; CA is used instead
    MissingSidechain {
        position: PositionLabel,
        amino_acid: char,
    },
}

impl fmt::Display for CoordinateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBackboneAtom {
                atom,
                position,
                amino_acid,
            } => write!(f, "Missing {atom} in residue ({position}, {amino_acid})"),
            Self::MissingSidechain {
                position,
                amino_acid,
            } => write!(
                f,
                "Missing sidechain in residue ({position}, {amino_acid}). Using CA instead."
            ),
        }
    }
}

/// Coordinates of every amino acid in a structure, plus the diagnostics raised
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub residues: Vec<ResidueCoordinates>,
    pub warnings: Vec<CoordinateWarning>,
}

/// Collect alpha-carbon and sidechain-center coordinates for all amino acids.
///
/// Residues that are not amino acids (water, ligands) are skipped. Residue
/// order follows the input.
///
/// # Errors
///
/// Returns [`PolystructError::MissingAlphaCarbon`] for the first amino acid
/// without a CA atom; no partial result is produced.
///
/// # Examples
///
/// ```rust
/// use polystruct_core::structure::{StructureAtom, StructureResidue, collect_coordinates};
/// use polystruct_core::types::{Coordinate, PositionLabel};
///
/// let glycine = StructureResidue {
///     name: "GLY".to_string(),
///     label: PositionLabel::new(1, None),
///     chain: "A".to_string(),
///     atoms: vec![
///         StructureAtom::new("N", Coordinate::new(-1.0, 0.0, 0.0)),
///         StructureAtom::new("CA", Coordinate::new(0.0, 0.0, 0.0)),
///         StructureAtom::new("C", Coordinate::new(1.0, 0.0, 0.0)),
///         StructureAtom::new("O", Coordinate::new(1.0, 1.0, 0.0)),
///     ],
/// };
///
/// let extraction = collect_coordinates(&[glycine])?;
/// assert_eq!(extraction.residues[0].sidechain_center, Coordinate::ZERO);
/// assert!(extraction.warnings.is_empty());
/// # Ok::<(), polystruct_core::types::PolystructError>(())
/// ```
pub fn collect_coordinates(
    residues: &[StructureResidue],
) -> Result<Extraction, PolystructError> {
    let mut extraction = Extraction::default();
    for residue in residues {
        let Some(amino_acid) = residue_one_letter(&residue.name) else {
            tracing::trace!(residue = %residue.name, position = %residue.label, "skipping non-amino-acid residue");
            continue;
        };
        let coordinates = process_residue(residue, amino_acid, &mut extraction.warnings)?;
        extraction.residues.push(coordinates);
    }
    Ok(extraction)
}

fn process_residue(
    residue: &StructureResidue,
    amino_acid: char,
    warnings: &mut Vec<CoordinateWarning>,
) -> Result<ResidueCoordinates, PolystructError> {
    let mut ca = None;
    let mut sidechain = Vec::new();

    for atom in &residue.atoms {
        if atom.name == ALPHA_CARBON {
            ca = Some(atom.coord);
        }
        if !BACKBONE_ATOMS.contains(&atom.name.as_str()) {
            sidechain.push(atom.coord);
        }
    }

    for backbone in OPTIONAL_BACKBONE_ATOMS {
        if !residue.atoms.iter().any(|atom| atom.name == backbone) {
            let warning = CoordinateWarning::MissingBackboneAtom {
                atom: backbone,
                position: residue.label.clone(),
                amino_acid,
            };
            tracing::warn!(chain = %residue.chain, "{warning}");
            warnings.push(warning);
        }
    }

    let ca = ca.ok_or_else(|| PolystructError::MissingAlphaCarbon {
        position: residue.label.to_string(),
        residue: amino_acid,
    })?;

    if sidechain.is_empty() {
        if amino_acid != GLYCINE {
            let warning = CoordinateWarning::MissingSidechain {
                position: residue.label.clone(),
                amino_acid,
            };
            tracing::warn!(chain = %residue.chain, "{warning}");
            warnings.push(warning);
        }
        sidechain.push(ca);
    }

    let sidechain_center =
        sidechain.iter().copied().sum::<Coordinate>() / sidechain.len() as f64;

    Ok(ResidueCoordinates {
        amino_acid,
        position: residue.label.clone(),
        chain: residue.chain.clone(),
        ca,
        sidechain_center,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::StructureAtom;

    fn residue(name: &str, number: i64, atoms: &[(&str, [f64; 3])]) -> StructureResidue {
        StructureResidue {
            name: name.to_string(),
            label: PositionLabel::new(number, None),
            chain: "A".to_string(),
            atoms: atoms
                .iter()
                .map(|(n, c)| StructureAtom::new(*n, Coordinate::from_array(*c)))
                .collect(),
        }
    }

    fn backbone(offset: f64) -> Vec<(&'static str, [f64; 3])> {
        vec![
            ("N", [offset - 1.0, 0.0, 0.0]),
            ("CA", [offset, 0.0, 0.0]),
            ("C", [offset + 1.0, 0.0, 0.0]),
            ("O", [offset + 1.0, 1.0, 0.0]),
        ]
    }

    #[test]
    fn test_sidechain_center_is_mean_of_sidechain_atoms() {
        let mut atoms = backbone(0.0);
        atoms.push(("CB", [0.0, 2.0, 0.0]));
        atoms.push(("OG", [0.0, 4.0, 2.0]));
        let extraction = collect_coordinates(&[residue("SER", 5, &atoms)]).unwrap();

        let ser = &extraction.residues[0];
        assert_eq!(ser.amino_acid, 'S');
        assert_eq!(ser.ca, Coordinate::new(0.0, 0.0, 0.0));
        assert_eq!(ser.sidechain_center, Coordinate::new(0.0, 3.0, 1.0));
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_glycine_uses_ca_without_warning() {
        let extraction = collect_coordinates(&[residue("GLY", 1, &backbone(3.0))]).unwrap();
        let gly = &extraction.residues[0];
        assert_eq!(gly.sidechain_center, gly.ca);
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_missing_sidechain_warns_for_non_glycine() {
        let extraction = collect_coordinates(&[residue("LYS", 8, &backbone(3.0))]).unwrap();
        let lys = &extraction.residues[0];
        assert_eq!(lys.sidechain_center, lys.ca);
        assert_eq!(
            extraction.warnings,
            vec![CoordinateWarning::MissingSidechain {
                position: PositionLabel::new(8, None),
                amino_acid: 'K',
            }]
        );
        assert_eq!(
            extraction.warnings[0].to_string(),
            "Missing sidechain in residue (8, K). Using CA instead."
        );
    }

    #[test]
    fn test_missing_backbone_atom_warns() {
        let atoms = [("N", [0.0, 0.0, 0.0]), ("CA", [1.0, 0.0, 0.0])];
        let extraction = collect_coordinates(&[residue("GLY", 2, &atoms)]).unwrap();
        let missing: Vec<_> = extraction
            .warnings
            .iter()
            .map(|w| match w {
                CoordinateWarning::MissingBackboneAtom { atom, .. } => *atom,
                other => panic!("unexpected warning {other:?}"),
            })
            .collect();
        assert_eq!(missing, vec!["C", "O"]);
        assert_eq!(
            extraction.warnings[0].to_string(),
            "Missing C in residue (2, G)"
        );
    }

    #[test]
    fn test_missing_alpha_carbon_is_fatal() {
        let atoms = [("N", [0.0, 0.0, 0.0]), ("CB", [1.0, 0.0, 0.0])];
        let residues = vec![
            residue("GLY", 1, &backbone(0.0)),
            residue("ALA", 2, &atoms),
        ];
        match collect_coordinates(&residues) {
            Err(PolystructError::MissingAlphaCarbon { position, residue }) => {
                assert_eq!(position, "2");
                assert_eq!(residue, 'A');
            }
            other => panic!("Expected MissingAlphaCarbon, got {other:?}"),
        }
    }

    #[test]
    fn test_non_amino_acids_are_skipped() {
        let residues = vec![
            residue("GLY", 1, &backbone(0.0)),
            residue("HOH", 101, &[("O", [9.0, 9.0, 9.0])]),
        ];
        let extraction = collect_coordinates(&residues).unwrap();
        assert_eq!(extraction.residues.len(), 1);
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_insertion_code_is_kept() {
        let mut res = residue("GLY", 11, &backbone(0.0));
        res.label = PositionLabel::new(11, Some("A"));
        let extraction = collect_coordinates(&[res]).unwrap();
        assert_eq!(extraction.residues[0].position.to_string(), "11A");
        assert_eq!(extraction.residues[0].chain, "A");
    }
}
