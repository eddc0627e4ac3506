mod common;

use insta::assert_snapshot;

use common::{GENE_ID, run_stdout, write_gene};

#[test]
fn pnps_csv_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    write_gene(dir.path(), GENE_ID);

    let output = run_stdout(&["pnps", "-q", "-g", GENE_ID, "-d", dir.path().to_str().unwrap()]);
    assert_snapshot!(output, @r"
    UniProt_ID,AA_pos,Codon_index,Species_count,E[N],E[S],PN,PS,pN,pS,pN/pS
    P1,2,2,2,2.0,0.5,2,1,1.0,2.0,0.5
    P1,3,3,1,2.0,1.0,1,0,0.5,0.0,inf
    ");
}

#[test]
fn aggregate_csv_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    write_gene(dir.path(), GENE_ID);
    write_gene(dir.path(), "FBgn0000020");

    // ratios are computed once over the concatenated genes
    let output = run_stdout(&["aggregate", "-q", "-d", dir.path().to_str().unwrap()]);
    assert_snapshot!(output, @r"
    UniProt_ID,AA_pos,Codon_index,Species_count,E[N],E[S],PN,PS,pN,pS,pN/pS
    P1,2,2,2,2.0,0.5,2,1,1.0,2.0,0.5
    P1,3,3,1,2.0,1.0,1,0,0.5,0.0,inf
    P1,2,2,2,2.0,0.5,2,1,1.0,2.0,0.5
    P1,3,3,1,2.0,1.0,1,0,0.5,0.0,inf
    ");
}
