//! # dip-solver
//!
//! A library for calling pharmacogene diplotypes (star-allele pairs) from
//! a sample's VCF genotype calls.
//!
//! Clinical pharmacogenomics works in named haplotypes: a gene's variation
//! is catalogued as star alleles (`*1`, `*4a`, `*17`, …), each defined by
//! the bases expected at a fixed panel of diagnostic positions. Given a
//! sample's per-position genotype calls, `dip-solver` finds every pair of
//! named haplotypes (a diplotype) that jointly explains the observed
//! data, handling phased and unphased calls, positions missing from the
//! input, and partially-specified (wildcard) definitions.
//!
//! ## Features
//!
//! - **Exact combinatorial matching**: Enumerates every single-chromosome
//!   allele sequence consistent with the sample and pairs the haplotypes
//!   they support
//! - **Ambiguity preserved**: Unphased heterozygous data can support
//!   several diplotypes; all of them are returned, deterministically ordered
//! - **Wildcard-tolerant definitions**: Unconstrained positions in a
//!   definition match any observed allele without expansion
//! - **Missing-position tracking**: Panel positions absent from the input
//!   are excluded from matching and surfaced in the report
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dip_solver::definitions::DefinitionLibrary;
//! use dip_solver::matching::{DiplotypeMatcher, MatchData};
//! use dip_solver::parsing::vcf::parse_vcf_file;
//!
//! // Load the gene definition library and the sample's calls
//! let library = DefinitionLibrary::load_from_path(Path::new("definitions/")).unwrap();
//! let genotypes = parse_vcf_file(Path::new("sample.vcf")).unwrap();
//!
//! // Call each gene independently
//! for (gene, definition) in library.iter() {
//!     let sample = genotypes.for_chromosome(&definition.chromosome);
//!     let data = MatchData::new(&sample, &definition.positions, &definition.named_alleles).unwrap();
//!     for diplotype in DiplotypeMatcher::new(&data).compute() {
//!         println!("{gene}: {}", diplotype.name());
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for loci, haplotype definitions, and sample genotypes
//! - [`definitions`]: Gene definition library storage and loading
//! - [`matching`]: Permutation generation, haplotype matching, and diplotype pairing
//! - [`parsing`]: VCF sample genotype extraction
//! - [`report`]: Per-gene call records and run reports
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod definitions;
pub mod matching;
pub mod parsing;
pub mod report;

// Re-export commonly used types for convenience
pub use crate::core::locus::VariantLocus;
pub use crate::core::named_allele::NamedAllele;
pub use crate::core::sample::SampleAllele;
pub use crate::definitions::{DefinitionFile, DefinitionLibrary};
pub use crate::matching::{DiplotypeMatch, DiplotypeMatcher, HaplotypeMatch, MatchData};
pub use crate::report::{CallerReport, GeneCall};
