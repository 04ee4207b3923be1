use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::core::locus::VariantLocus;
use crate::core::named_allele::{FinalizeError, NamedAllele};
use crate::core::sample::SampleAllele;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error(transparent)]
    Finalize(#[from] FinalizeError),
}

/// The working set for one (sample, gene-panel) pair.
///
/// Construction partitions the panel into positions the sample has calls
/// for and positions missing from the input, re-projects the haplotype
/// library onto the available positions, and generates the complete set of
/// permutation strings consistent with the sample. Immutable afterwards.
///
/// A position missing from the sample is represented by omission and
/// tracked in [`MatchData::missing_positions`]; it is excluded from all
/// match comparisons. Missing-in-sample is distinct from
/// wildcard-in-definition, and both propagate to the output.
#[derive(Debug)]
pub struct MatchData {
    /// Sample calls keyed by genomic position, available positions only
    sample_map: BTreeMap<u64, SampleAllele>,

    /// Panel positions the sample has calls for, in panel order
    positions: Vec<VariantLocus>,

    /// Panel positions absent from the sample's input
    missing_positions: Vec<VariantLocus>,

    /// Haplotype library re-projected onto the available positions and
    /// finalized against them
    haplotypes: Vec<NamedAllele>,

    /// Every single-chromosome allele sequence consistent with the sample,
    /// in canonical `position:allele;` encoding
    permutations: BTreeSet<String>,
}

impl MatchData {
    /// Build the dataset for one evaluation.
    ///
    /// `sample_map` is keyed by genomic position; entries outside the
    /// panel are ignored. `positions` is the gene's full ordered panel and
    /// `haplotypes` its definition library.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any haplotype's allele array does
    /// not have exactly one entry per panel position. Sample data can
    /// never cause this failure.
    pub fn new(
        sample_map: &BTreeMap<u64, SampleAllele>,
        positions: &[VariantLocus],
        haplotypes: &[NamedAllele],
    ) -> Result<Self, MatchError> {
        let mut available = Vec::new();
        let mut missing = Vec::new();
        let mut alleles = BTreeMap::new();

        for locus in positions {
            match sample_map.get(&locus.position) {
                Some(sample) => {
                    alleles.insert(locus.position, sample.clone());
                    available.push(locus.clone());
                }
                None => missing.push(locus.clone()),
            }
        }
        if !missing.is_empty() {
            debug!(
                "{} of {} panel positions missing from sample input",
                missing.len(),
                positions.len()
            );
        }

        let marshalled = marshall_haplotypes(haplotypes, positions, &available)?;
        let permutations = generate_permutations(&available, &alleles);
        debug!(
            "{} permutations over {} positions, {} callable haplotypes",
            permutations.len(),
            available.len(),
            marshalled.len()
        );

        Ok(Self {
            sample_map: alleles,
            positions: available,
            missing_positions: missing,
            haplotypes: marshalled,
            permutations,
        })
    }

    /// Panel positions the sample has calls for, in panel order.
    #[must_use]
    pub fn positions(&self) -> &[VariantLocus] {
        &self.positions
    }

    /// Panel positions absent from the sample's input.
    #[must_use]
    pub fn missing_positions(&self) -> &[VariantLocus] {
        &self.missing_positions
    }

    /// The re-projected, finalized haplotype library.
    #[must_use]
    pub fn haplotypes(&self) -> &[NamedAllele] {
        &self.haplotypes
    }

    /// The complete permutation set, in canonical encoding.
    #[must_use]
    pub fn permutations(&self) -> &BTreeSet<String> {
        &self.permutations
    }

    /// The sample's call at an available position.
    #[must_use]
    pub fn sample_allele(&self, position: u64) -> Option<&SampleAllele> {
        self.sample_map.get(&position)
    }

    /// The unique complementary sequence of a permutation: at every
    /// position, the sample allele the permutation did not choose (or the
    /// same allele when the call is homozygous). A permutation and its
    /// complement jointly reconstruct the full observed genotype.
    #[must_use]
    pub fn complement_sequence(&self, permutation: &str) -> String {
        let fragments = split_permutation(permutation);
        debug_assert_eq!(fragments.len(), self.positions.len());

        let mut sequence = String::with_capacity(permutation.len());
        for (locus, fragment) in self.positions.iter().zip(fragments) {
            let allele = fragment.split_once(':').map_or("", |(_, a)| a);
            let sample = &self.sample_map[&locus.position];
            let complement = if allele == sample.allele1 {
                &sample.allele2
            } else {
                &sample.allele1
            };
            sequence.push_str(&locus.key_fragment(complement));
            sequence.push(';');
        }
        sequence
    }
}

/// Re-project the haplotype library onto the available positions.
///
/// Allele entries at missing positions are dropped; a haplotype whose
/// remaining entries are all wildcards would match any sequence vacuously
/// and is excluded from matching entirely.
fn marshall_haplotypes(
    haplotypes: &[NamedAllele],
    panel: &[VariantLocus],
    available: &[VariantLocus],
) -> Result<Vec<NamedAllele>, MatchError> {
    let mut marshalled = Vec::with_capacity(haplotypes.len());

    for haplotype in haplotypes {
        if haplotype.alleles.len() != panel.len() {
            return Err(FinalizeError::LengthMismatch {
                name: haplotype.name.clone(),
                alleles: haplotype.alleles.len(),
                positions: panel.len(),
            }
            .into());
        }

        let mut projected = if available.len() == panel.len() {
            haplotype.clone()
        } else {
            let kept = panel
                .iter()
                .zip(&haplotype.alleles)
                .filter(|(locus, _)| available.contains(locus))
                .map(|(_, allele)| allele.clone())
                .collect();
            NamedAllele::new(haplotype.id.clone(), haplotype.name.clone(), kept)
        };

        if !projected.has_concrete_allele() {
            debug!(
                "dropping '{}': no concrete alleles at available positions",
                projected.name
            );
            continue;
        }

        projected.finalize(available)?;
        marshalled.push(projected);
    }

    Ok(marshalled)
}

/// Generate the complete permutation set: the cross product, over available
/// positions, of each position's permissible strand alleles.
fn generate_permutations(
    positions: &[VariantLocus],
    sample_map: &BTreeMap<u64, SampleAllele>,
) -> BTreeSet<String> {
    if positions.is_empty() {
        return BTreeSet::new();
    }

    positions
        .iter()
        .map(|locus| {
            let sample = &sample_map[&locus.position];
            sample
                .strand_alleles()
                .into_iter()
                .map(|allele| locus.key_fragment(allele))
                .collect::<Vec<_>>()
        })
        .multi_cartesian_product()
        .map(|fragments| {
            let mut sequence = fragments.join(";");
            sequence.push(';');
            sequence
        })
        .collect()
}

/// Split a canonical permutation string back into its ordered
/// `position:allele` fragments.
pub(crate) fn split_permutation(permutation: &str) -> Vec<&str> {
    permutation.split(';').filter(|f| !f.is_empty()).collect()
}
