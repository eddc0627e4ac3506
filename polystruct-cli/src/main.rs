//! # polystruct CLI
//!
//! Command-line access to the polystruct pipeline.
//!
//! ## Usage
//!
//! ```bash
//! # Weighted contact numbers of one structure
//! polystruct wcn -i FBgn0000015/refprot/FBgn0000015.pdb -o wcn.csv
//!
//! # pN/pS table of one gene
//! polystruct pnps -g FBgn0000015 -d genes/ -o FBgn0000015.pnps.csv
//!
//! # pN/pS over every gene directory, with a status table
//! polystruct aggregate -d genes/ -o all.pnps.tsv -s status.tsv -f tsv
//!
//! # Residue table joined with accessibility, plus correlations
//! polystruct merge -g FBgn0000015 -a FBgn0000015.dssp.csv -d genes/ -c corr.csv
//!
//! # dN/dS from the gene's SLAC file, optionally joined the same way
//! polystruct dnds -g FBgn0000015 -d genes/ -a FBgn0000015.dssp.csv -c corr.csv
//! ```
//!
//! ## Global options
//!
//! - `-f, --format <FORMAT>`: Output delimiter: csv or tsv (default: csv)
//! - `-t, --threads <N>`: Worker threads for WCN (default: all cores)
//! - `-q, --quiet`: Only log errors, no summary
//! - `-v, --verbose`: Debug logging
//!
//! Logging goes to stderr and honours `POLYSTRUCT_LOG` (an `EnvFilter`
//! directive) unless `--quiet` or `--verbose` is given. Without it, polystruct
//! logs at `info` and other crates at `warn`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use polystruct_core::PolystructAnalyzer;
use polystruct_core::config::{PipelineConfig, TableFormat};
use polystruct_core::merge::Correlation;
use polystruct_core::output::{write_table, write_wcn_table};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVES: &str = "warn,polystruct=info,polystruct_core=info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    init_logging(&matches);

    let num_threads = match matches.get_one::<String>("threads") {
        Some(threads) => Some(
            threads
                .parse::<usize>()
                .map_err(|_| format!("Invalid thread count: {threads}"))?,
        ),
        None => None,
    };
    let output_format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("csv") | None => TableFormat::Csv,
        Some("tsv") => TableFormat::Tsv,
        Some(other) => return Err(format!("Invalid output format: {other}").into()),
    };
    let quiet = matches.get_flag("quiet");

    let (name, sub) = matches
        .subcommand()
        .ok_or("A subcommand is required")?;

    let config = PipelineConfig {
        // `wcn` has no --data-dir
        data_dir: sub
            .try_get_one::<String>("data-dir")
            .ok()
            .flatten()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
        output_format,
        num_threads,
        quiet,
        ..Default::default()
    };
    tracing::debug!(subcommand = name, ?config, "configured");
    let analyzer = PolystructAnalyzer::with_config(config)?;

    match name {
        "wcn" => run_wcn(&analyzer, sub),
        "pnps" => run_pnps(&analyzer, sub),
        "aggregate" => run_aggregate(&analyzer, sub),
        "merge" => run_merge(&analyzer, sub),
        "dnds" => run_dnds(&analyzer, sub),
        other => Err(format!("Unknown subcommand: {other}").into()),
    }
}

fn cli() -> Command {
    let output = Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .help("Output file (default: stdout)");
    let data_dir = Arg::new("data-dir")
        .short('d')
        .long("data-dir")
        .value_name("DIR")
        .help("Directory of gene folders (default: .)");
    let correlations = Arg::new("correlations")
        .short('c')
        .long("correlations")
        .value_name("FILE")
        .help("Correlation table of the ratio against structure");
    let accessibility = Arg::new("accessibility")
        .short('a')
        .long("accessibility")
        .value_name("FILE")
        .help("Accessibility table (position, amino_acid, secondary_structure, rasa)");
    let gene = Arg::new("gene")
        .short('g')
        .long("gene")
        .value_name("GENE")
        .required(true)
        .help("Gene identifier, e.g. FBgn0000015");

    Command::new("polystruct")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Selection pressure (pN/pS) against protein structure")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format: csv or tsv")
                .default_value("csv")
                .global(true),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_name("N")
                .help("Worker threads for WCN (default: all cores)")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Quiet mode")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Debug logging")
                .global(true),
        )
        .subcommand(
            Command::new("wcn")
                .about("Weighted contact numbers of a structure")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .required(true)
                        .help("PDB or mmCIF file"),
                )
                .arg(output.clone()),
        )
        .subcommand(
            Command::new("pnps")
                .about("pN/pS table of one gene")
                .arg(gene.clone())
                .arg(data_dir.clone())
                .arg(output.clone()),
        )
        .subcommand(
            Command::new("aggregate")
                .about("pN/pS over every gene directory")
                .arg(data_dir.clone())
                .arg(output.clone())
                .arg(
                    Arg::new("status")
                        .short('s')
                        .long("status")
                        .value_name("FILE")
                        .help("Per-gene status table"),
                ),
        )
        .subcommand(
            Command::new("merge")
                .about("Residue table: pN/pS joined with accessibility and WCN")
                .arg(gene.clone())
                .arg(accessibility.clone().required(true))
                .arg(data_dir.clone())
                .arg(output.clone())
                .arg(correlations.clone()),
        )
        .subcommand(
            Command::new("dnds")
                .about("dN/dS of one gene from its SLAC file, optionally joined with structure")
                .arg(gene)
                .arg(accessibility)
                .arg(data_dir)
                .arg(output)
                .arg(correlations.requires("accessibility")),
        )
}

fn init_logging(matches: &ArgMatches) {
    let filter = if matches.get_flag("quiet") {
        EnvFilter::new("error")
    } else if matches.get_flag("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("POLYSTRUCT_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn open_output(path: Option<&String>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn run_wcn(analyzer: &PolystructAnalyzer, sub: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let input = sub.get_one::<String>("input").ok_or("--input is required")?;
    let report = analyzer.wcn_for_structure(Path::new(input))?;

    let mut writer = open_output(sub.get_one::<String>("output"))?;
    write_wcn_table(&mut writer, &report.records, analyzer.config.output_format)?;
    writer.flush()?;

    if !analyzer.config.quiet {
        eprintln!(
            "WCN computed for {} residues ({} warnings).",
            report.records.len(),
            report.warnings.len()
        );
    }
    Ok(())
}

fn run_pnps(analyzer: &PolystructAnalyzer, sub: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let gene = sub.get_one::<String>("gene").ok_or("--gene is required")?;
    let records = analyzer.gene_selection(gene)?;

    let mut writer = open_output(sub.get_one::<String>("output"))?;
    write_table(&mut writer, &records, analyzer.config.output_format)?;
    writer.flush()?;

    if !analyzer.config.quiet {
        eprintln!("pN/pS computed for {} positions of {gene}.", records.len());
    }
    Ok(())
}

fn run_aggregate(
    analyzer: &PolystructAnalyzer,
    sub: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = analyzer.aggregate_directory()?;
    let format = analyzer.config.output_format;

    let mut writer = open_output(sub.get_one::<String>("output"))?;
    write_table(&mut writer, &result.records, format)?;
    writer.flush()?;

    if let Some(status_path) = sub.get_one::<String>("status") {
        let mut status_writer = BufWriter::new(File::create(status_path)?);
        write_table(&mut status_writer, &result.status, format)?;
        status_writer.flush()?;
    }

    if !analyzer.config.quiet {
        eprintln!(
            "Aggregation complete! {} positions from {} of {} genes.",
            result.records.len(),
            result.status.iter().filter(|s| s.pnps_computed).count(),
            result.status.len()
        );
        for failure in &result.failures {
            eprintln!("  {}: {}", failure.gene_id, failure.error);
        }
    }
    Ok(())
}

fn run_merge(analyzer: &PolystructAnalyzer, sub: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let gene = sub.get_one::<String>("gene").ok_or("--gene is required")?;
    let accessibility = sub
        .get_one::<String>("accessibility")
        .ok_or("--accessibility is required")?;
    let table = analyzer.residue_table(gene, Path::new(accessibility))?;
    let format = analyzer.config.output_format;

    let mut writer = open_output(sub.get_one::<String>("output"))?;
    write_table(&mut writer, &table.rows, format)?;
    writer.flush()?;

    if let Some(corr_path) = sub.get_one::<String>("correlations") {
        let mut corr_writer = BufWriter::new(File::create(corr_path)?);
        write_table(&mut corr_writer, &table.correlations, format)?;
        corr_writer.flush()?;
    }

    if !analyzer.config.quiet {
        eprintln!("Merged {} residue rows for {gene}.", table.rows.len());
        print_correlations("pN/pS", &table.correlations);
    }
    Ok(())
}

fn run_dnds(analyzer: &PolystructAnalyzer, sub: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let gene = sub.get_one::<String>("gene").ok_or("--gene is required")?;
    let format = analyzer.config.output_format;

    let Some(accessibility) = sub.get_one::<String>("accessibility") else {
        let records = analyzer.gene_divergence(gene)?;
        let mut writer = open_output(sub.get_one::<String>("output"))?;
        write_table(&mut writer, &records, format)?;
        writer.flush()?;
        if !analyzer.config.quiet {
            eprintln!("dN/dS computed for {} codons of {gene}.", records.len());
        }
        return Ok(());
    };

    let table = analyzer.divergence_residue_table(gene, Path::new(accessibility))?;
    let mut writer = open_output(sub.get_one::<String>("output"))?;
    write_table(&mut writer, &table.rows, format)?;
    writer.flush()?;

    if let Some(corr_path) = sub.get_one::<String>("correlations") {
        let mut corr_writer = BufWriter::new(File::create(corr_path)?);
        write_table(&mut corr_writer, &table.correlations, format)?;
        corr_writer.flush()?;
    }

    if !analyzer.config.quiet {
        eprintln!("Merged {} residue rows for {gene}.", table.rows.len());
        print_correlations("dN/dS", &table.correlations);
    }
    Ok(())
}

fn print_correlations(ratio: &str, correlations: &[Correlation]) {
    for correlation in correlations {
        match correlation.pearson_r {
            Some(r) => eprintln!(
                "  {ratio} ~ {}: r = {r:.4} (n = {})",
                correlation.column, correlation.pairs
            ),
            None => eprintln!(
                "  {ratio} ~ {}: undefined (n = {})",
                correlation.column, correlation.pairs
            ),
        }
    }
}
