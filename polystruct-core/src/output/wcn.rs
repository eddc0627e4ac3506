use serde::Serialize;

use super::TableRow;
use crate::wcn::WcnRecord;

/// Flat view of a [`WcnRecord`] for delimited output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WcnRow {
    pub pdb_aa: char,
    /// Residue number with insertion code, e.g. `11A`
    pub pdb_position: String,
    pub chain: String,
    pub ca_x: f64,
    pub ca_y: f64,
    pub ca_z: f64,
    pub sc_x: f64,
    pub sc_y: f64,
    pub sc_z: f64,
    pub wcn_ca: f64,
    pub wcn_sc: f64,
}

impl From<&WcnRecord> for WcnRow {
    fn from(record: &WcnRecord) -> Self {
        let residue = &record.residue;
        Self {
            pdb_aa: residue.amino_acid,
            pdb_position: residue.position.to_string(),
            chain: residue.chain.clone(),
            ca_x: residue.ca.x,
            ca_y: residue.ca.y,
            ca_z: residue.ca.z,
            sc_x: residue.sidechain_center.x,
            sc_y: residue.sidechain_center.y,
            sc_z: residue.sidechain_center.z,
            wcn_ca: record.wcn_ca,
            wcn_sc: record.wcn_sc,
        }
    }
}

impl TableRow for WcnRow {
    const COLUMNS: &'static [&'static str] = &[
        "pdb_aa",
        "pdb_position",
        "chain",
        "ca_x",
        "ca_y",
        "ca_z",
        "sc_x",
        "sc_y",
        "sc_z",
        "wcn_ca",
        "wcn_sc",
    ];
}
