//! PDB and mmCIF loading through pdbtbx.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use pdbtbx::{Format, PDB, PDBError, ReadOptions, StrictnessLevel};

use super::{StructureAtom, StructureResidue};
use crate::types::{Coordinate, PolystructError, PositionLabel};

/// Load a structure file, choosing mmCIF for `.cif`/`.mmcif` and PDB otherwise.
pub fn load_structure(path: &Path) -> Result<Vec<StructureResidue>, PolystructError> {
    let format = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("cif") || ext.eq_ignore_ascii_case("mmcif") => {
            Format::Mmcif
        }
        _ => Format::Pdb,
    };
    let mut content = String::new();
    File::open(path)?.read_to_string(&mut content)?;
    parse_structure_str(&content, format)
}

/// Parse structure text into residues in file order.
///
/// Only the first conformer of each residue is kept, so alternate locations
/// do not contribute duplicate atoms.
pub fn parse_structure_str(
    input: &str,
    format: Format,
) -> Result<Vec<StructureResidue>, PolystructError> {
    let (pdb, errors) = read_loose(input, format)?;
    for error in &errors {
        tracing::debug!(
            severity = %error.level(),
            "{}",
            error.short_description()
        );
    }

    let mut residues = Vec::new();
    for chain in pdb.chains() {
        for residue in chain.residues() {
            let Some(conformer) = residue.conformers().next() else {
                continue;
            };
            let atoms = conformer
                .atoms()
                .map(|atom| {
                    let (x, y, z) = atom.pos();
                    StructureAtom::new(atom.name().trim(), Coordinate::new(x, y, z))
                })
                .collect();
            residues.push(StructureResidue {
                name: conformer.name().to_string(),
                label: PositionLabel::new(residue.serial_number() as i64, residue.insertion_code()),
                chain: chain.id().to_string(),
                atoms,
            });
        }
    }

    if residues.is_empty() {
        return Err(PolystructError::StructureParse(
            "No residues found in structure".to_string(),
        ));
    }

    Ok(residues)
}

/// Read with loose strictness, returning the messages that did not fail the read.
fn read_loose(input: &str, format: Format) -> Result<(PDB, Vec<PDBError>), PolystructError> {
    ReadOptions::new()
        .set_format(format)
        .set_level(StrictnessLevel::Loose)
        .read_raw(BufReader::new(input.as_bytes()))
        .map_err(|errs| {
            PolystructError::StructureParse(
                errs.iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RESIDUES: &str = "\
ATOM      1  N   GLY A   1      -1.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  GLY A   1       0.000   0.000   0.000  1.00  0.00           C
ATOM      3  C   GLY A   1       1.000   0.000   0.000  1.00  0.00           C
ATOM      4  O   GLY A   1       1.000   1.000   0.000  1.00  0.00           O
ATOM      5  N   SER A   2       2.000   0.000   0.000  1.00  0.00           N
ATOM      6  CA  SER A   2       3.000   0.000   0.000  1.00  0.00           C
ATOM      7  C   SER A   2       4.000   0.000   0.000  1.00  0.00           C
ATOM      8  O   SER A   2       4.000   1.000   0.000  1.00  0.00           O
ATOM      9  CB  SER A   2       3.000   1.000   0.000  1.00  0.00           C
ATOM     10  OG  SER A   2       3.000   2.000   0.000  1.00  0.00           O
END
";

    #[test]
    fn test_parse_structure_residues() {
        let residues = parse_structure_str(TWO_RESIDUES, Format::Pdb).unwrap();
        assert_eq!(residues.len(), 2);

        assert_eq!(residues[0].name, "GLY");
        assert_eq!(residues[0].label, PositionLabel::new(1, None));
        assert_eq!(residues[0].chain, "A");
        assert_eq!(residues[0].atoms.len(), 4);

        let ser = &residues[1];
        assert_eq!(ser.name, "SER");
        let names: Vec<_> = ser.atoms.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["N", "CA", "C", "O", "CB", "OG"]);
        assert_eq!(ser.atoms[1].coord, Coordinate::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_loose_warnings_do_not_fail() {
        let input = format!("REMARK 123 not a registered remark type\n{TWO_RESIDUES}");
        let (_, errors) = read_loose(&input, Format::Pdb).unwrap();
        assert!(
            errors
                .iter()
                .any(|e| e.short_description() == "Remark type number invalid")
        );
        assert!(errors.iter().all(|e| !e.fails(StrictnessLevel::Loose)));

        let residues = parse_structure_str(&input, Format::Pdb).unwrap();
        assert_eq!(residues.len(), 2);
    }

    #[test]
    fn test_load_structure_missing_file() {
        let result = load_structure(Path::new("nonexistent_structure.pdb"));
        assert!(matches!(result, Err(PolystructError::Io(_))));
    }
}
