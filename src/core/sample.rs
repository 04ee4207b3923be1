use serde::{Deserialize, Serialize};

/// One sample's observed genotype at a single panel position.
///
/// Invariant: exactly two called alleles (diploid). The alleles may be
/// identical (homozygous). When `phased` is false the two alleles are
/// unordered and either could sit on either parental strand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleAllele {
    /// Chromosome of the call (must match the panel's chromosome)
    pub chromosome: String,

    /// 1-based genomic coordinate
    pub position: u64,

    /// First called allele
    pub allele1: String,

    /// Second called allele
    pub allele2: String,

    /// Whether the two alleles are assigned to known parental strands
    pub phased: bool,

    /// Raw allele strings present at this site in the VCF (REF then ALTs)
    pub vcf_alleles: Vec<String>,
}

impl SampleAllele {
    pub fn new(
        chromosome: impl Into<String>,
        position: u64,
        allele1: impl Into<String>,
        allele2: impl Into<String>,
        phased: bool,
        vcf_alleles: Vec<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
            allele1: allele1.into(),
            allele2: allele2.into(),
            phased,
            vcf_alleles,
        }
    }

    /// Whether both called alleles are identical.
    #[must_use]
    pub fn is_homozygous(&self) -> bool {
        self.allele1 == self.allele2
    }

    /// Candidate alleles for a single strand at this position: one option
    /// when the two calls are identical (homozygous, or phased with the
    /// same allele on both strands), otherwise both calls in both
    /// directions.
    #[must_use]
    pub fn strand_alleles(&self) -> Vec<&str> {
        if self.is_homozygous() {
            vec![&self.allele1]
        } else {
            vec![&self.allele1, &self.allele2]
        }
    }

    /// Display string for reports: `A|G` when phased, `A/G` otherwise.
    #[must_use]
    pub fn genotype_string(&self) -> String {
        let sep = if self.phased { '|' } else { '/' };
        format!("{}{sep}{}", self.allele1, self.allele2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vcf_alleles(alleles: &[&str]) -> Vec<String> {
        alleles.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_strand_alleles_heterozygous() {
        let allele = SampleAllele::new("chr1", 1, "A", "G", false, vcf_alleles(&["A", "G"]));
        assert!(!allele.is_homozygous());
        assert_eq!(allele.strand_alleles(), vec!["A", "G"]);
    }

    #[test]
    fn test_strand_alleles_homozygous() {
        let allele = SampleAllele::new("chr1", 2, "C", "C", false, vcf_alleles(&["C", "T"]));
        assert!(allele.is_homozygous());
        assert_eq!(allele.strand_alleles(), vec!["C"]);
    }

    #[test]
    fn test_strand_alleles_phased_identical() {
        // phased with the same allele on both strands collapses to one option
        let allele = SampleAllele::new("chr1", 1, "T", "T", true, vcf_alleles(&["T"]));
        assert_eq!(allele.strand_alleles(), vec!["T"]);
    }

    #[test]
    fn test_genotype_string() {
        let unphased = SampleAllele::new("chr1", 1, "A", "G", false, vcf_alleles(&["A", "G"]));
        assert_eq!(unphased.genotype_string(), "A/G");

        let phased = SampleAllele::new("chr1", 1, "A", "G", true, vcf_alleles(&["A", "G"]));
        assert_eq!(phased.genotype_string(), "A|G");
    }
}
