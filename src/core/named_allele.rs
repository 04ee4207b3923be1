use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::locus::VariantLocus;

#[derive(Error, Debug)]
pub enum FinalizeError {
    #[error("haplotype '{name}' defines {alleles} alleles but the panel has {positions} positions")]
    LengthMismatch {
        name: String,
        alleles: usize,
        positions: usize,
    },
}

/// Per-position matching slot, computed when a haplotype is finalized
/// against a panel.
///
/// A `Concrete` slot holds the pre-serialized `position:allele` key
/// fragment so matching is a direct string comparison against the
/// permutation's fragment at the same index. Wildcards match by skipping
/// the position; they are never expanded into candidate alleles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlleleSlot {
    /// The definition places no constraint at this position
    Wildcard,
    /// Expected `position:allele` key fragment at this position
    Concrete(String),
}

/// A named haplotype definition (e.g. a star allele such as `*4a`).
///
/// The allele array has one entry per panel position, in panel order;
/// `None` entries are wildcards, meaning the definition does not constrain
/// that position. [`NamedAllele::finalize`] must be called once to bind the
/// definition to its panel before matching; the definition is immutable
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedAllele {
    /// Stable identifier from the definition source
    pub id: String,

    /// Display name (the clinical allele name, e.g. `*1`)
    pub name: String,

    /// Expected allele per panel position; `None` = wildcard
    pub alleles: Vec<Option<String>>,

    // === Computed by finalize ===
    #[serde(skip)]
    slots: Vec<AlleleSlot>,

    #[serde(skip)]
    score: usize,
}

impl NamedAllele {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        alleles: Vec<Option<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            alleles,
            slots: Vec::new(),
            score: 0,
        }
    }

    /// Bind this definition to its panel: validate the allele-array length
    /// and precompute per-position matching slots and the score.
    ///
    /// # Errors
    ///
    /// Returns [`FinalizeError::LengthMismatch`] if the allele array does
    /// not have exactly one entry per panel position. This is a
    /// configuration error in the definition source, not a sample-data
    /// error.
    pub fn finalize(&mut self, positions: &[VariantLocus]) -> Result<(), FinalizeError> {
        if self.alleles.len() != positions.len() {
            return Err(FinalizeError::LengthMismatch {
                name: self.name.clone(),
                alleles: self.alleles.len(),
                positions: positions.len(),
            });
        }

        self.slots = self
            .alleles
            .iter()
            .zip(positions)
            .map(|(allele, locus)| match allele {
                Some(a) => AlleleSlot::Concrete(locus.key_fragment(a)),
                None => AlleleSlot::Wildcard,
            })
            .collect();
        self.score = self.alleles.iter().filter(|a| a.is_some()).count();

        Ok(())
    }

    /// Number of concrete (non-wildcard) positions in this definition.
    /// Meaningful only after [`NamedAllele::finalize`].
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Whether this definition constrains at least one position.
    #[must_use]
    pub fn has_concrete_allele(&self) -> bool {
        self.alleles.iter().any(Option::is_some)
    }

    /// Match a permutation, given as its ordered `position:allele` key
    /// fragments. A wildcard slot always matches; a concrete slot matches
    /// iff its fragment equals the permutation's fragment at that index.
    ///
    /// The fragment slice must have one entry per panel position, in the
    /// same panel order the definition was finalized against.
    #[must_use]
    pub fn matches_fragments(&self, fragments: &[&str]) -> bool {
        debug_assert_eq!(self.slots.len(), fragments.len());
        self.slots
            .iter()
            .zip(fragments)
            .all(|(slot, fragment)| match slot {
                AlleleSlot::Wildcard => true,
                AlleleSlot::Concrete(expected) => expected == fragment,
            })
    }
}
