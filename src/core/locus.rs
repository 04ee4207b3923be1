use serde::{Deserialize, Serialize};

/// One diagnostic genomic position within a gene's panel.
///
/// Panel positions are always handled as an ordered sequence; a locus's
/// index in that sequence is the index used to address haplotype allele
/// arrays. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantLocus {
    /// Chromosome this locus sits on (e.g. `chr10`)
    pub chromosome: String,

    /// 1-based genomic coordinate
    pub position: u64,

    /// dbSNP identifier, when one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsid: Option<String>,
}

impl VariantLocus {
    pub fn new(chromosome: impl Into<String>, position: u64) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
            rsid: None,
        }
    }

    #[must_use]
    pub fn with_rsid(mut self, rsid: impl Into<String>) -> Self {
        self.rsid = Some(rsid.into());
        self
    }

    /// Canonical `position:allele` key fragment for this locus.
    ///
    /// Permutation strings are built by joining these fragments with `;`
    /// (plus a trailing `;`) in panel order, so string equality implies
    /// allele-sequence equality. This is the identity representation used
    /// for all permutation equality and grouping.
    #[must_use]
    pub fn key_fragment(&self, allele: &str) -> String {
        format!("{}:{allele}", self.position)
    }
}
