use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::core::named_allele::NamedAllele;
use crate::matching::ordering::allele_name_cmp;

/// A haplotype definition together with the permutations that satisfy it.
///
/// Borrows the definition from the [`MatchData`](crate::matching::MatchData)
/// that produced it; match results never own definitions.
#[derive(Debug, Clone)]
pub struct HaplotypeMatch<'a> {
    /// The matched haplotype definition
    pub haplotype: &'a NamedAllele,

    /// The permutations this definition matched, in canonical encoding
    pub sequences: BTreeSet<String>,
}

impl<'a> HaplotypeMatch<'a> {
    pub fn new(haplotype: &'a NamedAllele, sequences: BTreeSet<String>) -> Self {
        Self {
            haplotype,
            sequences,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.haplotype.name
    }
}

/// An unordered pair of matched haplotypes whose sequences jointly
/// reconstruct the full observed sample genotype.
///
/// The two haplotypes may be the same definition (a homozygous call). The
/// pair is stored in canonical name order so equal calls from either
/// pairing direction compare and display identically.
#[derive(Debug, Clone)]
pub struct DiplotypeMatch<'a> {
    /// First haplotype of the pair, in canonical name order
    pub haplotype1: &'a NamedAllele,

    /// Second haplotype of the pair
    pub haplotype2: &'a NamedAllele,

    /// Combined concrete-position count of the two haplotypes; used for
    /// the deterministic output ordering
    pub score: usize,
}

impl<'a> DiplotypeMatch<'a> {
    pub fn new(a: &'a NamedAllele, b: &'a NamedAllele) -> Self {
        let (haplotype1, haplotype2) = match allele_name_cmp(&a.name, &b.name) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };
        Self {
            haplotype1,
            haplotype2,
            score: haplotype1.score() + haplotype2.score(),
        }
    }

    /// Display name of the call, e.g. `*1/*4a`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}/{}", self.haplotype1.name, self.haplotype2.name)
    }

    /// Whether both haplotypes of the pair are the same definition.
    #[must_use]
    pub fn is_homozygous(&self) -> bool {
        self.haplotype1.name == self.haplotype2.name
    }
}
