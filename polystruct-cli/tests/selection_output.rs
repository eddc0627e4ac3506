mod common;

use std::fs;

use common::{GENE_ID, polystruct, run_stdout, write_gene, write_selection_inputs};

#[test]
fn pnps_tsv_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    write_gene(dir.path(), GENE_ID);

    let output = run_stdout(&[
        "pnps",
        "-q",
        "-f",
        "tsv",
        "-g",
        GENE_ID,
        "-d",
        dir.path().to_str().unwrap(),
    ]);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("UniProt_ID\tAA_pos\tCodon_index\t"));
    assert_eq!(lines[1], "P1\t2\t2\t2\t2.0\t0.5\t2\t1\t1.0\t2.0\t0.5");
}

#[test]
fn pnps_unknown_gene_fails() {
    let dir = tempfile::tempdir().unwrap();
    polystruct()
        .args(["pnps", "-g", "FBgn9999999", "-d"])
        .arg(dir.path())
        .assert()
        .failure();
}

#[test]
fn pnps_malformed_codon_stats_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_selection_inputs(dir.path(), GENE_ID, "", "", "P1\t2\t3\tdmel:2,K\n");

    let assert = polystruct()
        .args(["pnps", "-g", GENE_ID, "-d"])
        .arg(dir.path())
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("MalformedRow"));
}

#[test]
fn aggregate_with_status_table() {
    let dir = tempfile::tempdir().unwrap();
    write_gene(dir.path(), GENE_ID);
    write_selection_inputs(dir.path(), "FBgn0000016", "", "", "P2\t2\t3\tdmel:2,K\n");
    fs::create_dir(dir.path().join("FBgn0000017")).unwrap();
    fs::create_dir(dir.path().join("scratch")).unwrap();

    let out = dir.path().join("all.csv");
    let status = dir.path().join("status.csv");
    let assert = polystruct()
        .args(["aggregate", "-d"])
        .arg(dir.path())
        .arg("-o")
        .arg(&out)
        .arg("-s")
        .arg(&status)
        .assert()
        .success();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("2 positions from 1 of 3 genes"));
    assert!(stderr.contains("FBgn0000016"));

    let records = fs::read_to_string(&out).unwrap();
    assert_eq!(records.lines().count(), 3);
    assert!(records.lines().skip(1).all(|l| l.starts_with("P1,")));

    assert_eq!(
        fs::read_to_string(&status).unwrap(),
        "gene_id,synonymous.Poly?,missense.Poly?,codonStats?,features?,SLAC?,pdb?,pNpS_calc\n\
         FBgn0000015,1,1,1,0,0,1,1\n\
         FBgn0000016,1,1,1,0,0,0,0\n\
         FBgn0000017,0,0,0,0,0,0,0\n"
    );
}

#[test]
fn aggregate_logs_at_info_by_default() {
    let dir = tempfile::tempdir().unwrap();
    write_gene(dir.path(), GENE_ID);

    let assert = polystruct().args(["aggregate", "-d"]).arg(dir.path()).assert().success();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("aggregation finished"));

    let assert = polystruct()
        .args(["aggregate", "-q", "-d"])
        .arg(dir.path())
        .assert()
        .success();
    assert!(assert.get_output().stderr.is_empty());
}

#[test]
fn aggregate_empty_directory_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_stdout(&["aggregate", "-q", "-d", dir.path().to_str().unwrap()]);
    assert_eq!(
        output,
        "UniProt_ID,AA_pos,Codon_index,Species_count,E[N],E[S],PN,PS,pN,pS,pN/pS\n"
    );
}

#[test]
fn merge_with_correlations() {
    let dir = tempfile::tempdir().unwrap();
    write_gene(dir.path(), GENE_ID);
    let accessibility = dir.path().join("access.csv");
    fs::write(&accessibility, common::ACCESSIBILITY).unwrap();
    let corr = dir.path().join("corr.csv");

    let output = run_stdout(&[
        "merge",
        "-q",
        "-g",
        GENE_ID,
        "-a",
        accessibility.to_str().unwrap(),
        "-d",
        dir.path().to_str().unwrap(),
        "-c",
        corr.to_str().unwrap(),
    ]);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(",DSSP_AA,Sec_Struct,RASA,WCN_AA,chain,wcn_ca,wcn_sc"));
    assert!(lines[1].starts_with("P1,2,2,2,2.0,0.5,2,1,1.0,2.0,0.5,K,H,0.4,K,A,0.5,"));
    assert!(lines[2].starts_with("P1,3,3,1,2.0,1.0,1,0,0.5,0.0,inf,G,-,,G,A,0.3125,"));

    // only position 2 has a finite pN/pS
    assert_eq!(
        fs::read_to_string(&corr).unwrap(),
        "column,pearson_r,pairs\nwcn_ca,,1\nwcn_sc,,1\nRASA,,1\n"
    );
}

#[test]
fn merge_requires_accessibility() {
    polystruct()
        .args(["merge", "-g", GENE_ID])
        .assert()
        .failure();
}
