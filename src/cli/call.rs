use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::definitions::DefinitionLibrary;
use crate::matching::{DiplotypeMatcher, MatchData};
use crate::parsing::vcf::parse_vcf_file;
use crate::report::{CallerReport, GeneCall};

#[derive(Args)]
pub struct CallArgs {
    /// Input VCF with the sample's genotype calls (.vcf, .vcf.gz, .vcf.bgz)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Definition file, or directory of per-gene *.json definition files
    #[arg(short, long)]
    pub definitions: PathBuf,

    /// Restrict calling to this gene (repeatable)
    #[arg(short, long = "gene", value_name = "GENE")]
    pub genes: Vec<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the call subcommand.
///
/// # Errors
///
/// Returns an error if the definition library or VCF cannot be loaded, or
/// if a definition is inconsistent with its panel.
pub fn run(args: CallArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let library = DefinitionLibrary::load_from_path(&args.definitions)?;
    if verbose {
        eprintln!("Loaded {} gene definitions", library.len());
    }
    if library.is_empty() {
        eprintln!("Warning: definition library is empty, nothing to call.");
        return Ok(());
    }

    for gene in &args.genes {
        if library.get(gene).is_none() {
            eprintln!("Warning: gene '{gene}' is not in the definition library.");
        }
    }

    let genotypes = parse_vcf_file(&args.input)?;
    if verbose {
        eprintln!("Parsed {} called sites from input", genotypes.len());
    }

    let mut gene_calls = Vec::new();
    for (gene, definition) in library.iter() {
        if !args.genes.is_empty() && !args.genes.iter().any(|g| g == gene.as_str()) {
            continue;
        }

        let sample_map = genotypes.for_chromosome(&definition.chromosome);
        let data = MatchData::new(&sample_map, &definition.positions, &definition.named_alleles)?;
        let matcher = DiplotypeMatcher::new(&data);
        let haplotype_matches = matcher.compare_permutations();
        let diplotype_matches = matcher.pair_matches(&haplotype_matches);

        gene_calls.push(GeneCall::from_match_results(
            definition,
            &data,
            &haplotype_matches,
            &diplotype_matches,
        ));
    }

    let input_name = args
        .input
        .file_name()
        .map_or_else(|| args.input.to_string_lossy().into_owned(), |name| {
            name.to_string_lossy().into_owned()
        });
    let report = CallerReport::new(input_name, gene_calls);

    let rendered = match format {
        OutputFormat::Text => render_text_report(&report, verbose)?,
        OutputFormat::Json => report.to_json()?,
    };

    match &args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }

    Ok(())
}

fn render_text_report(report: &CallerReport, verbose: bool) -> Result<String, std::fmt::Error> {
    use std::fmt::Write;

    let mut out = String::new();
    writeln!(out, "Input: {}", report.metadata.input_file)?;

    for call in &report.gene_calls {
        writeln!(out, "\n{} ({})", call.gene, call.definition_version)?;

        if call.diplotypes.is_empty() {
            writeln!(out, "   Diplotype: not called")?;
        } else if call.is_ambiguous() {
            writeln!(
                out,
                "   Diplotypes ({} consistent calls, phase unknown):",
                call.diplotypes.len()
            )?;
            for diplotype in &call.diplotypes {
                writeln!(out, "      {diplotype}")?;
            }
        } else {
            writeln!(out, "   Diplotype: {}", call.diplotypes[0])?;
        }

        if !call.uncallable_haplotypes.is_empty() {
            let names: Vec<&str> = call
                .uncallable_haplotypes
                .iter()
                .map(String::as_str)
                .collect();
            writeln!(out, "   Uncallable haplotypes: {}", names.join(", "))?;
        }

        if !call.missing_positions.is_empty() {
            let positions: Vec<String> = call
                .missing_positions
                .iter()
                .map(|locus| match &locus.rsid {
                    Some(rsid) => format!("{} ({rsid})", locus.position),
                    None => locus.position.to_string(),
                })
                .collect();
            writeln!(out, "   Variants not found in input: {}", positions.join(", "))?;
        }

        if verbose {
            for variant in &call.variants {
                let rsid = variant.rsid.as_deref().unwrap_or("-");
                writeln!(
                    out,
                    "      {}:{} {} {} [{}]",
                    call.chromosome, variant.position, rsid, variant.call, variant.vcf_alleles
                )?;
            }
        }
    }

    let called = report.gene_calls.iter().filter(|c| c.is_called()).count();
    writeln!(out, "\nCalled {called} of {} genes", report.gene_calls.len())?;
    Ok(out)
}
