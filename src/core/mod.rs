//! Core data types for panels, haplotype definitions, and sample genotypes.
//!
//! - [`VariantLocus`](locus::VariantLocus): one diagnostic genomic position
//!   in a gene's panel
//! - [`NamedAllele`](named_allele::NamedAllele): a named haplotype
//!   definition with wildcard-tolerant expected alleles
//! - [`SampleAllele`](sample::SampleAllele): one sample's observed diploid
//!   genotype at a single position
//!
//! Panels and haplotype definitions are loaded once per gene and shared
//! read-only across evaluations; sample alleles are created fresh per
//! (sample, gene) evaluation.

pub mod locus;
pub mod named_allele;
pub mod sample;
pub mod types;
