use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::locus::VariantLocus;
use crate::core::named_allele::NamedAllele;
use crate::core::types::GeneSymbol;

#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Failed to read definitions: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse definitions: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("duplicate gene '{0}' in definition library")]
    DuplicateGene(GeneSymbol),

    #[error("duplicate named allele '{allele}' in gene '{gene}'")]
    DuplicateAllele { gene: GeneSymbol, allele: String },

    #[error("duplicate panel position {position} in gene '{gene}'")]
    DuplicatePosition { gene: GeneSymbol, position: u64 },

    #[error("gene '{0}' has an empty position panel")]
    EmptyPanel(GeneSymbol),

    #[error(
        "haplotype '{allele}' in gene '{gene}' defines {alleles} alleles \
         but the panel has {positions} positions"
    )]
    AlleleCountMismatch {
        gene: GeneSymbol,
        allele: String,
        alleles: usize,
        positions: usize,
    },

    #[error("position {position} in gene '{gene}' is on '{found}', expected '{expected}'")]
    ChromosomeMismatch {
        gene: GeneSymbol,
        position: u64,
        expected: String,
        found: String,
    },
}

/// One gene's haplotype definition source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionFile {
    /// Gene symbol, unique within a library
    pub gene: GeneSymbol,

    /// Chromosome every panel position sits on
    pub chromosome: String,

    /// Content version of the definition source
    pub content_version: String,

    /// Modification timestamp of the definition source; display only
    pub modified: String,

    /// Ordered panel of diagnostic positions
    pub positions: Vec<VariantLocus>,

    /// Named haplotypes, allele arrays in panel order
    pub named_alleles: Vec<NamedAllele>,
}

impl DefinitionFile {
    /// Parse a definition file from JSON and validate its invariants.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let file: Self = serde_json::from_str(json)?;
        file.validate()?;
        Ok(file)
    }

    /// Load and validate a definition file from disk.
    pub fn load_from_file(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Version string for report display, e.g. `1.2.0 (2025-06-01)`.
    #[must_use]
    pub fn version_string(&self) -> String {
        format!("{} ({})", self.content_version, self.modified)
    }

    /// Names of every haplotype in this definition.
    #[must_use]
    pub fn allele_names(&self) -> BTreeSet<&str> {
        self.named_alleles
            .iter()
            .map(|allele| allele.name.as_str())
            .collect()
    }

    fn validate(&self) -> Result<(), DefinitionError> {
        if self.positions.is_empty() {
            return Err(DefinitionError::EmptyPanel(self.gene.clone()));
        }

        let mut seen_positions = BTreeSet::new();
        for locus in &self.positions {
            if locus.chromosome != self.chromosome {
                return Err(DefinitionError::ChromosomeMismatch {
                    gene: self.gene.clone(),
                    position: locus.position,
                    expected: self.chromosome.clone(),
                    found: locus.chromosome.clone(),
                });
            }
            if !seen_positions.insert(locus.position) {
                return Err(DefinitionError::DuplicatePosition {
                    gene: self.gene.clone(),
                    position: locus.position,
                });
            }
        }

        let mut seen_alleles = BTreeSet::new();
        for allele in &self.named_alleles {
            if !seen_alleles.insert(allele.name.as_str()) {
                return Err(DefinitionError::DuplicateAllele {
                    gene: self.gene.clone(),
                    allele: allele.name.clone(),
                });
            }
            if allele.alleles.len() != self.positions.len() {
                return Err(DefinitionError::AlleleCountMismatch {
                    gene: self.gene.clone(),
                    allele: allele.name.clone(),
                    alleles: allele.alleles.len(),
                    positions: self.positions.len(),
                });
            }
        }

        Ok(())
    }
}

/// Gene-keyed collection of definition files.
#[derive(Debug, Default)]
pub struct DefinitionLibrary {
    files: BTreeMap<GeneSymbol, DefinitionFile>,
}

impl DefinitionLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a library from a definition file, or from every `*.json` file
    /// in a directory.
    pub fn load_from_path(path: &Path) -> Result<Self, DefinitionError> {
        let mut library = Self::new();

        if path.is_dir() {
            let mut paths: Vec<_> = std::fs::read_dir(path)?
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|entry| entry.path())
                .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
                .collect();
            paths.sort();

            for file_path in paths {
                library.insert(DefinitionFile::load_from_file(&file_path)?)?;
            }
        } else {
            library.insert(DefinitionFile::load_from_file(path)?)?;
        }

        Ok(library)
    }

    /// Add a definition file, failing on a duplicate gene.
    pub fn insert(&mut self, file: DefinitionFile) -> Result<(), DefinitionError> {
        if self.files.contains_key(&file.gene) {
            return Err(DefinitionError::DuplicateGene(file.gene));
        }
        self.files.insert(file.gene.clone(), file);
        Ok(())
    }

    /// Get a gene's definition file.
    #[must_use]
    pub fn get(&self, gene: &str) -> Option<&DefinitionFile> {
        self.files.get(&GeneSymbol::new(gene))
    }

    /// Iterate the library in gene order.
    pub fn iter(&self) -> impl Iterator<Item = (&GeneSymbol, &DefinitionFile)> {
        self.files.iter()
    }

    /// Number of genes in the library.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CYP_EXAMPLE: &str = r#"{
        "gene": "CYP2C19",
        "chromosome": "chr10",
        "content_version": "1.2.0",
        "modified": "2025-06-01",
        "positions": [
            {"chromosome": "chr10", "position": 94762706, "rsid": "rs12248560"},
            {"chromosome": "chr10", "position": 94781859},
            {"chromosome": "chr10", "position": 94842866}
        ],
        "named_alleles": [
            {"id": "CYP2C19*1", "name": "*1", "alleles": ["A", "C", "C"]},
            {"id": "CYP2C19*4a", "name": "*4a", "alleles": ["G", null, null]}
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let file = DefinitionFile::from_json(CYP_EXAMPLE).unwrap();
        assert_eq!(file.gene.as_str(), "CYP2C19");
        assert_eq!(file.positions.len(), 3);
        assert_eq!(file.named_alleles.len(), 2);
        assert_eq!(file.version_string(), "1.2.0 (2025-06-01)");
        assert!(file.allele_names().contains("*4a"));
        // wildcard entries deserialize from null
        assert!(file.named_alleles[1].alleles[1].is_none());
    }

    #[test]
    fn test_allele_count_mismatch() {
        let json = CYP_EXAMPLE.replace(r#"["G", null, null]"#, r#"["G", null]"#);
        let err = DefinitionFile::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::AlleleCountMismatch {
                alleles: 2,
                positions: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_allele_name() {
        let json = CYP_EXAMPLE.replace(r#""name": "*4a""#, r#""name": "*1""#);
        let err = DefinitionFile::from_json(&json).unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateAllele { .. }));
    }

    #[test]
    fn test_duplicate_position() {
        let json = CYP_EXAMPLE.replace("94781859", "94762706");
        let err = DefinitionFile::from_json(&json).unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicatePosition { .. }));
    }

    #[test]
    fn test_chromosome_mismatch() {
        let json = CYP_EXAMPLE.replace(
            r#"{"chromosome": "chr10", "position": 94781859}"#,
            r#"{"chromosome": "chr11", "position": 94781859}"#,
        );
        let err = DefinitionFile::from_json(&json).unwrap_err();
        assert!(matches!(err, DefinitionError::ChromosomeMismatch { .. }));
    }

    #[test]
    fn test_empty_panel() {
        let json = r#"{
            "gene": "EMPTY", "chromosome": "chr1",
            "content_version": "1", "modified": "2025-01-01",
            "positions": [], "named_alleles": []
        }"#;
        let err = DefinitionFile::from_json(json).unwrap_err();
        assert!(matches!(err, DefinitionError::EmptyPanel(_)));
    }

    #[test]
    fn test_library_insert_or_fail() {
        let file = DefinitionFile::from_json(CYP_EXAMPLE).unwrap();
        let mut library = DefinitionLibrary::new();
        library.insert(file.clone()).unwrap();
        assert_eq!(library.len(), 1);
        assert!(library.get("CYP2C19").is_some());
        assert!(library.get("CYP2D6").is_none());

        let err = library.insert(file).unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateGene(_)));
    }
}
