//! Weighted contact number (WCN).
//!
//! For residue `i`, `wcn[i] = Σ_{j≠i} 1 / |x_i - x_j|²`, computed once over
//! alpha-carbon coordinates and once over sidechain centers. Every residue
//! depends on every other one, so the whole structure is processed in a
//! single batch. The outer loop runs in parallel with Rayon; output order
//! matches input order.

use rayon::prelude::*;

use crate::structure::ResidueCoordinates;
use crate::types::{Coordinate, PolystructError};

/// A residue with its contact numbers
#[derive(Debug, Clone, PartialEq)]
pub struct WcnRecord {
    pub residue: ResidueCoordinates,
    /// WCN over alpha-carbon coordinates
    pub wcn_ca: f64,
    /// WCN over sidechain centers
    pub wcn_sc: f64,
}

/// Inverse of the squared Euclidean distance between two points.
///
/// # Errors
///
/// Coincident points have no defined inverse distance and return
/// [`PolystructError::DegenerateGeometry`] labelled with `labels`.
///
/// # Examples
///
/// ```rust
/// use polystruct_core::types::Coordinate;
/// use polystruct_core::wcn::inverse_square_distance;
///
/// let a = Coordinate::new(0.0, 0.0, 0.0);
/// let b = Coordinate::new(2.0, 0.0, 0.0);
/// assert_eq!(inverse_square_distance(a, b, || ("1".into(), "2".into()))?, 0.25);
/// # Ok::<(), polystruct_core::types::PolystructError>(())
/// ```
pub fn inverse_square_distance(
    a: Coordinate,
    b: Coordinate,
    labels: impl FnOnce() -> (String, String),
) -> Result<f64, PolystructError> {
    let diff = a - b;
    let squared = diff.x * diff.x + diff.y * diff.y + diff.z * diff.z;
    if squared == 0.0 {
        let (first, second) = labels();
        return Err(PolystructError::DegenerateGeometry { first, second });
    }
    Ok(1.0 / squared)
}

/// Compute `wcn_ca` and `wcn_sc` for every residue.
///
/// # Errors
///
/// Returns [`PolystructError::DegenerateGeometry`] when two residues share an
/// alpha-carbon or sidechain-center coordinate.
pub fn calculate_wcn(
    residues: Vec<ResidueCoordinates>,
) -> Result<Vec<WcnRecord>, PolystructError> {
    let sums = (0..residues.len())
        .into_par_iter()
        .map(|i| contact_sums(&residues, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(residues
        .into_iter()
        .zip(sums)
        .map(|(residue, (wcn_ca, wcn_sc))| WcnRecord {
            residue,
            wcn_ca,
            wcn_sc,
        })
        .collect())
}

fn contact_sums(residues: &[ResidueCoordinates], i: usize) -> Result<(f64, f64), PolystructError> {
    let residue = &residues[i];

    let mut wcn_ca = 0.0;
    let mut wcn_sc = 0.0;
    for (j, other) in residues.iter().enumerate() {
        if i == j {
            continue;
        }
        wcn_ca += inverse_square_distance(residue.ca, other.ca, pair_labels(residue, other))?;
        wcn_sc += inverse_square_distance(
            residue.sidechain_center,
            other.sidechain_center,
            pair_labels(residue, other),
        )?;
    }
    Ok((wcn_ca, wcn_sc))
}

fn pair_labels<'a>(
    first: &'a ResidueCoordinates,
    second: &'a ResidueCoordinates,
) -> impl FnOnce() -> (String, String) + 'a {
    move || (describe(first), describe(second))
}

fn describe(residue: &ResidueCoordinates) -> String {
    format!(
        "{}{}:{}",
        residue.amino_acid, residue.position, residue.chain
    )
}
