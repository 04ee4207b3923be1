//! Diplotype matching engine.
//!
//! This module converts one sample's per-position genotypes into the set of
//! all diplotype calls consistent with the data:
//!
//! 1. [`MatchData`](data::MatchData) binds the sample to a gene's panel,
//!    tracks positions missing from the input, marshalls the haplotype
//!    library onto the available positions, and generates every
//!    single-chromosome allele sequence ("permutation") consistent with
//!    the sample.
//! 2. [`DiplotypeMatcher`](matcher::DiplotypeMatcher) matches permutations
//!    against the wildcard-tolerant haplotype definitions, then pairs
//!    matched haplotypes into diplotypes whose two sequences jointly
//!    reconstruct the full observed genotype.
//!
//! Zero resulting diplotypes is a valid outcome ("gene not called"), and
//! multiple diplotypes are returned in full when phase ambiguity allows
//! more than one explanation; no implicit ranking or pruning is applied
//! beyond a deterministic output order.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::collections::BTreeMap;
//! use dip_solver::core::locus::VariantLocus;
//! use dip_solver::core::named_allele::NamedAllele;
//! use dip_solver::core::sample::SampleAllele;
//! use dip_solver::matching::{DiplotypeMatcher, MatchData};
//!
//! let positions = vec![VariantLocus::new("chr1", 1)];
//! let haplotypes = vec![
//!     NamedAllele::new("*1", "*1", vec![Some("A".to_string())]),
//!     NamedAllele::new("*2", "*2", vec![Some("G".to_string())]),
//! ];
//! let mut sample = BTreeMap::new();
//! sample.insert(
//!     1,
//!     SampleAllele::new("chr1", 1, "A", "G", false, vec!["A".into(), "G".into()]),
//! );
//!
//! let dataset = MatchData::new(&sample, &positions, &haplotypes).unwrap();
//! let matches = DiplotypeMatcher::new(&dataset).compute();
//! assert_eq!(matches[0].name(), "*1/*2");
//! ```

pub mod data;
pub mod matcher;
pub mod model;
pub mod ordering;

pub use data::{MatchData, MatchError};
pub use matcher::DiplotypeMatcher;
pub use model::{DiplotypeMatch, HaplotypeMatch};
