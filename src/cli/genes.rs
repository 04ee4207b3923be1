use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::definitions::DefinitionLibrary;

#[derive(Args)]
pub struct GenesArgs {
    /// Definition file, or directory of per-gene *.json definition files
    #[arg(short, long)]
    pub definitions: PathBuf,
}

#[derive(Serialize)]
struct GeneSummary<'a> {
    gene: &'a str,
    chromosome: &'a str,
    version: String,
    positions: usize,
    named_alleles: usize,
}

/// Execute the genes subcommand.
///
/// # Errors
///
/// Returns an error if the definition library cannot be loaded.
pub fn run(args: GenesArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let library = DefinitionLibrary::load_from_path(&args.definitions)?;

    let summaries: Vec<GeneSummary<'_>> = library
        .iter()
        .map(|(gene, file)| GeneSummary {
            gene: gene.as_str(),
            chromosome: &file.chromosome,
            version: file.version_string(),
            positions: file.positions.len(),
            named_alleles: file.named_alleles.len(),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            println!("{} genes in library", summaries.len());
            for summary in &summaries {
                println!(
                    "   {} ({}): {} positions, {} alleles, version {}",
                    summary.gene,
                    summary.chromosome,
                    summary.positions,
                    summary.named_alleles,
                    summary.version
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
    }

    Ok(())
}
