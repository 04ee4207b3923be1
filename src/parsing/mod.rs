//! Parsers for extracting per-sample genotype calls from input files.
//!
//! Only VCF is consumed: data rows are parsed directly from the text
//! (plain or gzip-compressed) and the first sample column's `GT` field is
//! resolved through the row's REF/ALT alleles into a
//! [`SampleAllele`](crate::core::sample::SampleAllele) per site.
//!
//! Sites without a usable diploid genotype (no-calls, half-calls, haploid
//! or polyploid GT values) are skipped with a warning; the corresponding
//! panel positions surface downstream as "missing", never as an assumed
//! allele.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dip_solver::parsing::vcf::parse_vcf_file;
//!
//! let genotypes = parse_vcf_file(Path::new("sample.vcf")).unwrap();
//! if let Some(call) = genotypes.get("chr10", 94762706) {
//!     println!("{}", call.genotype_string());
//! }
//! ```

pub mod vcf;

pub use vcf::{parse_vcf_file, parse_vcf_text, ParseError, SampleGenotypes};
