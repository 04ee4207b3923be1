use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::matching::data::{split_permutation, MatchData};
use crate::matching::model::{DiplotypeMatch, HaplotypeMatch};
use crate::matching::ordering::allele_name_cmp;

/// Pairs matched haplotypes into diplotype calls for one dataset.
///
/// Rather than testing all haplotype pairs naively, the matcher exploits
/// the fact that every permutation has exactly one complementary sequence
/// under the reconstruction rule: it pairs the haplotypes matching a
/// permutation with the haplotypes matching its complement, then maps the
/// sequence pairs back to unordered haplotype pairs. The work is bounded
/// by the permutation count (2^k for k heterozygous positions, small for
/// a diagnostic panel).
pub struct DiplotypeMatcher<'a> {
    dataset: &'a MatchData,
}

impl<'a> DiplotypeMatcher<'a> {
    pub fn new(dataset: &'a MatchData) -> Self {
        Self { dataset }
    }

    /// Run the full pipeline: haplotype matching, then diplotype pairing.
    ///
    /// Returns every diplotype consistent with the sample, ordered by
    /// descending combined score with name-comparison tie-breaks. An empty
    /// result means the gene could not be called; multiple results mean
    /// the phase-ambiguous data supports several calls. Neither is an
    /// error.
    #[must_use]
    pub fn compute(&self) -> Vec<DiplotypeMatch<'a>> {
        let haplotype_matches = self.compare_permutations();
        self.pair_matches(&haplotype_matches)
    }

    /// Match every permutation against every haplotype definition.
    ///
    /// Returns one [`HaplotypeMatch`] per haplotype that matched at least
    /// one permutation, ordered by the name comparator.
    #[must_use]
    pub fn compare_permutations(&self) -> Vec<HaplotypeMatch<'a>> {
        let mut matches = Vec::new();

        for haplotype in self.dataset.haplotypes() {
            let sequences: BTreeSet<String> = self
                .dataset
                .permutations()
                .iter()
                .filter(|permutation| {
                    haplotype.matches_fragments(&split_permutation(permutation))
                })
                .cloned()
                .collect();

            if !sequences.is_empty() {
                matches.push(HaplotypeMatch::new(haplotype, sequences));
            }
        }

        matches.sort_by(|a, b| allele_name_cmp(a.name(), b.name()));
        debug!(
            "{} of {} haplotypes matched",
            matches.len(),
            self.dataset.haplotypes().len()
        );
        matches
    }

    /// Pair haplotype matches whose sequences jointly reconstruct the
    /// sample. Pairs are deduplicated by unordered haplotype-name pair:
    /// distinct permutation assignments that name the same two haplotypes
    /// collapse into one call.
    ///
    /// `matches` must come from [`DiplotypeMatcher::compare_permutations`]
    /// on the same dataset.
    #[must_use]
    pub fn pair_matches(&self, matches: &[HaplotypeMatch<'a>]) -> Vec<DiplotypeMatch<'a>> {
        // sequence -> indices of the haplotype matches containing it
        let mut by_sequence: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (index, m) in matches.iter().enumerate() {
            for sequence in &m.sequences {
                by_sequence.entry(sequence).or_default().push(index);
            }
        }

        let mut seen: BTreeSet<(String, String)> = BTreeSet::new();
        let mut pairs = Vec::new();

        for permutation in self.dataset.permutations() {
            let complement = self.dataset.complement_sequence(permutation);
            // visit each unordered sequence pair once (self-complementary
            // permutations pair with themselves)
            if permutation.as_str() > complement.as_str() {
                continue;
            }

            let (Some(first), Some(second)) = (
                by_sequence.get(permutation.as_str()),
                by_sequence.get(complement.as_str()),
            ) else {
                continue;
            };

            for &i in first {
                for &j in second {
                    let pair = DiplotypeMatch::new(matches[i].haplotype, matches[j].haplotype);
                    let key = (
                        pair.haplotype1.name.clone(),
                        pair.haplotype2.name.clone(),
                    );
                    if seen.insert(key) {
                        pairs.push(pair);
                    }
                }
            }
        }

        pairs.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| allele_name_cmp(&a.haplotype1.name, &b.haplotype1.name))
                .then_with(|| allele_name_cmp(&a.haplotype2.name, &b.haplotype2.name))
        });
        debug!("{} diplotype pairs", pairs.len());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locus::VariantLocus;
    use crate::core::named_allele::NamedAllele;
    use crate::core::sample::SampleAllele;

    fn positions() -> Vec<VariantLocus> {
        vec![
            VariantLocus::new("chr1", 1),
            VariantLocus::new("chr1", 2),
            VariantLocus::new("chr1", 3),
        ]
    }

    /*
            | 1 | 2 | 3 |
        *1  | A | C | C |
        *4a | G |   |   |
        *4b | G | T | T |
        *17 |   | T | T |
    */
    fn haplotypes() -> Vec<NamedAllele> {
        let some = |s: &str| Some(s.to_string());
        vec![
            NamedAllele::new("*1", "*1", vec![some("A"), some("C"), some("C")]),
            NamedAllele::new("*4a", "*4a", vec![some("G"), None, None]),
            NamedAllele::new("*4b", "*4b", vec![some("G"), some("T"), some("T")]),
            NamedAllele::new("*17", "*17", vec![None, some("T"), some("T")]),
        ]
    }

    fn dataset(genotypes: &[(&str, &str)]) -> MatchData {
        let sample_map: BTreeMap<u64, SampleAllele> = genotypes
            .iter()
            .enumerate()
            .map(|(i, &(a1, a2))| {
                let position = i as u64 + 1;
                (
                    position,
                    SampleAllele::new(
                        "chr1",
                        position,
                        a1,
                        a2,
                        false,
                        vec![a1.to_string(), a2.to_string()],
                    ),
                )
            })
            .collect();
        MatchData::new(&sample_map, &positions(), &haplotypes()).unwrap()
    }

    fn diplotype_names(dataset: &MatchData) -> Vec<String> {
        DiplotypeMatcher::new(dataset)
            .compute()
            .iter()
            .map(DiplotypeMatch::name)
            .collect()
    }

    #[test]
    fn test_het_at_first_position_only() {
        let data = dataset(&[("A", "G"), ("C", "C"), ("C", "C")]);
        assert_eq!(diplotype_names(&data), vec!["*1/*4a"]);
    }

    #[test]
    fn test_het_at_every_position() {
        let data = dataset(&[("A", "G"), ("C", "T"), ("C", "T")]);
        assert_eq!(
            diplotype_names(&data),
            vec!["*1/*4b", "*1/*17", "*1/*4a", "*4a/*17"]
        );
    }

    #[test]
    fn test_hom_ref_first_position() {
        let data = dataset(&[("A", "A"), ("C", "T"), ("C", "T")]);
        assert_eq!(diplotype_names(&data), vec!["*1/*17"]);
    }

    #[test]
    fn test_hom_alt_with_trailing_het() {
        let data = dataset(&[("G", "G"), ("T", "T"), ("C", "T")]);
        assert_eq!(
            diplotype_names(&data),
            vec!["*4a/*4b", "*4a/*17", "*4a/*4a"]
        );
    }

    #[test]
    fn test_hom_alt_with_double_het() {
        let data = dataset(&[("G", "G"), ("C", "T"), ("C", "T")]);
        assert_eq!(
            diplotype_names(&data),
            vec!["*4a/*4b", "*4a/*17", "*4a/*4a"]
        );
    }

    #[test]
    fn test_no_call_is_empty_not_error() {
        // nothing in the library explains a T at position 1
        let data = dataset(&[("T", "T"), ("C", "C"), ("C", "C")]);
        assert!(diplotype_names(&data).is_empty());
    }

    #[test]
    fn test_fully_homozygous_is_self_paired() {
        let data = dataset(&[("G", "G"), ("T", "T"), ("T", "T")]);
        assert_eq!(data.permutations().len(), 1);
        // the single permutation pairs with itself, so every matched
        // haplotype can combine with every other (and with itself)
        assert_eq!(
            diplotype_names(&data),
            vec!["*4b/*4b", "*4b/*17", "*4a/*4b", "*17/*17", "*4a/*17", "*4a/*4a"]
        );
    }

    #[test]
    fn test_phase_independent_when_homozygous() {
        let unphased = dataset(&[("A", "A"), ("C", "C"), ("C", "C")]);

        let sample_map: BTreeMap<u64, SampleAllele> = [("A", 1u64), ("C", 2), ("C", 3)]
            .iter()
            .map(|&(allele, position)| {
                (
                    position,
                    SampleAllele::new(
                        "chr1",
                        position,
                        allele,
                        allele,
                        true,
                        vec![allele.to_string()],
                    ),
                )
            })
            .collect();
        let phased = MatchData::new(&sample_map, &positions(), &haplotypes()).unwrap();

        assert_eq!(phased.permutations().len(), 1);
        assert_eq!(diplotype_names(&unphased), diplotype_names(&phased));
    }

    #[test]
    fn test_compare_permutations_excludes_unmatched() {
        let some = |s: &str| Some(s.to_string());
        let panel = vec![
            VariantLocus::new("chr1", 1),
            VariantLocus::new("chr1", 2),
            VariantLocus::new("chr1", 3),
            VariantLocus::new("chr1", 4),
        ];
        let library = vec![
            NamedAllele::new("*1", "*1", vec![some("T"), some("A"), some("C"), some("C")]),
            NamedAllele::new("*2", "*2", vec![None, some("T"), some("C"), None]),
            NamedAllele::new("*3", "*3", vec![None, None, some("GG"), None]),
        ];
        let sample_map: BTreeMap<u64, SampleAllele> = [
            (1u64, "T", "T", true),
            (2, "A", "T", false),
            (3, "C", "C", false),
            (4, "C", "G", false),
        ]
        .iter()
        .map(|&(position, a1, a2, phased)| {
            (
                position,
                SampleAllele::new(
                    "chr1",
                    position,
                    a1,
                    a2,
                    phased,
                    vec![a1.to_string(), a2.to_string()],
                ),
            )
        })
        .collect();

        let data = MatchData::new(&sample_map, &panel, &library).unwrap();
        let matches = DiplotypeMatcher::new(&data).compare_permutations();

        let names: Vec<&str> = matches.iter().map(HaplotypeMatch::name).collect();
        assert_eq!(names, vec!["*1", "*2"]);
        assert!(matches[0].sequences.contains("1:T;2:A;3:C;4:C;"));
        assert_eq!(matches[0].sequences.len(), 1);
        assert_eq!(matches[1].sequences.len(), 2);
    }

    #[test]
    fn test_idempotent_over_reruns() {
        let data = dataset(&[("A", "G"), ("C", "T"), ("C", "T")]);
        assert_eq!(diplotype_names(&data), diplotype_names(&data));
    }
}
