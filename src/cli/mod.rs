//! Command-line interface for dip-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **call**: Call diplotypes for a sample VCF against a definition library
//! - **genes**: List the genes in a definition library
//!
//! ## Usage
//!
//! ```text
//! # Call every gene in the library
//! dip-solver call sample.vcf --definitions definitions/
//!
//! # Restrict to specific genes
//! dip-solver call sample.vcf --definitions definitions/ --gene CYP2C19
//!
//! # JSON output for scripting
//! dip-solver call sample.vcf --definitions definitions/ --format json
//!
//! # Inspect a definition library
//! dip-solver genes --definitions definitions/
//! ```

use clap::{Parser, Subcommand};

pub mod call;
pub mod genes;

#[derive(Parser)]
#[command(name = "dip-solver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Solve pharmacogene diplotypes from VCF genotype calls")]
#[command(
    long_about = "dip-solver determines which pair of named haplotypes (a diplotype) best explains a sample's genotype calls at each pharmacogene's diagnostic positions.\n\nIt matches the sample's VCF calls against a library of haplotype definitions and reports:\n- The diplotype call(s) per gene, including all phase-ambiguous alternatives\n- Haplotypes the data could not support\n- Panel positions missing from the input"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Call diplotypes for a sample VCF
    Call(call::CallArgs),

    /// List the genes in a definition library
    Genes(genes::GenesArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
