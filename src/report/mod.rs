//! Result assembly: per-gene call records and the whole-run report.
//!
//! Records are fully-populated immutable values built in one shot from the
//! matching outputs; there is no mutable builder state. Everything is
//! serde-serializable so the report can be rendered as JSON directly.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::locus::VariantLocus;
use crate::definitions::DefinitionFile;
use crate::matching::{DiplotypeMatch, HaplotypeMatch, MatchData};

/// Run-level metadata attached to every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Name of the VCF input the calls were made from
    pub input_file: String,

    /// RFC 3339 timestamp of the run
    pub timestamp: String,
}

/// One panel position's observed call, for report display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantCall {
    /// 1-based genomic coordinate
    pub position: u64,

    /// dbSNP identifier, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsid: Option<String>,

    /// Genotype display string: `A|G` when phased, `A/G` otherwise
    pub call: String,

    /// Comma-joined raw VCF alleles present at the site
    pub vcf_alleles: String,
}

/// The full call record for one gene in one sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneCall {
    /// Gene symbol
    pub gene: String,

    /// Chromosome of the gene's panel
    pub chromosome: String,

    /// Definition source version, for display
    pub definition_version: String,

    /// Diplotype call names in engine order; empty = gene not called,
    /// more than one = phase-ambiguous
    pub diplotypes: Vec<String>,

    /// Library haplotypes absent from any match
    pub uncallable_haplotypes: BTreeSet<String>,

    /// Panel positions with no call in the input
    pub missing_positions: Vec<VariantLocus>,

    /// Observed calls at the available panel positions, in panel order
    pub variants: Vec<VariantCall>,
}

impl GeneCall {
    /// Build the record from one evaluation's outputs.
    #[must_use]
    pub fn from_match_results(
        definition: &DefinitionFile,
        data: &MatchData,
        haplotype_matches: &[HaplotypeMatch<'_>],
        diplotype_matches: &[DiplotypeMatch<'_>],
    ) -> Self {
        let diplotypes = diplotype_matches.iter().map(DiplotypeMatch::name).collect();

        let matched: BTreeSet<&str> = haplotype_matches.iter().map(HaplotypeMatch::name).collect();
        let uncallable_haplotypes = definition
            .allele_names()
            .into_iter()
            .filter(|name| !matched.contains(name))
            .map(ToString::to_string)
            .collect();

        let variants = data
            .positions()
            .iter()
            .filter_map(|locus| {
                data.sample_allele(locus.position).map(|sample| VariantCall {
                    position: locus.position,
                    rsid: locus.rsid.clone(),
                    call: sample.genotype_string(),
                    vcf_alleles: sample.vcf_alleles.join(","),
                })
            })
            .collect();

        Self {
            gene: definition.gene.to_string(),
            chromosome: definition.chromosome.clone(),
            definition_version: definition.version_string(),
            diplotypes,
            uncallable_haplotypes,
            missing_positions: data.missing_positions().to_vec(),
            variants,
        }
    }

    /// Whether the gene received at least one diplotype call.
    #[must_use]
    pub fn is_called(&self) -> bool {
        !self.diplotypes.is_empty()
    }

    /// Whether phase ambiguity produced more than one call.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.diplotypes.len() > 1
    }
}

/// The whole-run report: metadata plus one record per evaluated gene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerReport {
    pub metadata: Metadata,
    pub gene_calls: Vec<GeneCall>,
}

impl CallerReport {
    /// Assemble the report, stamping run metadata.
    #[must_use]
    pub fn new(input_file: impl Into<String>, gene_calls: Vec<GeneCall>) -> Self {
        Self {
            metadata: Metadata {
                input_file: input_file.into(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
            gene_calls,
        }
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::sample::SampleAllele;
    use crate::matching::DiplotypeMatcher;

    fn definition() -> DefinitionFile {
        DefinitionFile::from_json(
            r#"{
                "gene": "CYP2C19",
                "chromosome": "chr10",
                "content_version": "1.2.0",
                "modified": "2025-06-01",
                "positions": [
                    {"chromosome": "chr10", "position": 1, "rsid": "rs1"},
                    {"chromosome": "chr10", "position": 2},
                    {"chromosome": "chr10", "position": 3}
                ],
                "named_alleles": [
                    {"id": "*1", "name": "*1", "alleles": ["A", "C", "C"]},
                    {"id": "*4a", "name": "*4a", "alleles": ["G", null, null]},
                    {"id": "*17", "name": "*17", "alleles": [null, "T", "T"]}
                ]
            }"#,
        )
        .unwrap()
    }

    fn sample_map(entries: &[(u64, &str, &str)]) -> BTreeMap<u64, SampleAllele> {
        entries
            .iter()
            .map(|&(position, a1, a2)| {
                (
                    position,
                    SampleAllele::new(
                        "chr10",
                        position,
                        a1,
                        a2,
                        false,
                        vec![a1.to_string(), a2.to_string()],
                    ),
                )
            })
            .collect()
    }

    fn gene_call(entries: &[(u64, &str, &str)]) -> GeneCall {
        let definition = definition();
        let data = MatchData::new(
            &sample_map(entries),
            &definition.positions,
            &definition.named_alleles,
        )
        .unwrap();
        let matcher = DiplotypeMatcher::new(&data);
        let haplotype_matches = matcher.compare_permutations();
        let diplotype_matches = matcher.pair_matches(&haplotype_matches);
        GeneCall::from_match_results(&definition, &data, &haplotype_matches, &diplotype_matches)
    }

    #[test]
    fn test_called_gene_record() {
        let call = gene_call(&[(1, "A", "G"), (2, "C", "C"), (3, "C", "C")]);

        assert!(call.is_called());
        assert!(!call.is_ambiguous());
        assert_eq!(call.diplotypes, vec!["*1/*4a"]);
        assert_eq!(call.definition_version, "1.2.0 (2025-06-01)");
        // *17 requires T at positions 2 and 3 and never matched
        assert!(call.uncallable_haplotypes.contains("*17"));
        assert_eq!(call.uncallable_haplotypes.len(), 1);
        assert!(call.missing_positions.is_empty());

        assert_eq!(call.variants.len(), 3);
        assert_eq!(call.variants[0].call, "A/G");
        assert_eq!(call.variants[0].rsid.as_deref(), Some("rs1"));
        assert_eq!(call.variants[0].vcf_alleles, "A,G");
    }

    #[test]
    fn test_uncalled_gene_record() {
        // nothing in the library explains T/T at position 1
        let call = gene_call(&[(1, "T", "T"), (2, "C", "C"), (3, "C", "C")]);

        assert!(!call.is_called());
        assert!(call.diplotypes.is_empty());
        assert_eq!(call.uncallable_haplotypes.len(), 3);
    }

    #[test]
    fn test_missing_positions_surface() {
        let call = gene_call(&[(1, "A", "G")]);

        let missing: Vec<u64> = call
            .missing_positions
            .iter()
            .map(|locus| locus.position)
            .collect();
        assert_eq!(missing, vec![2, 3]);
        assert_eq!(call.variants.len(), 1);
    }

    #[test]
    fn test_report_json() {
        let report = CallerReport::new(
            "sample.vcf",
            vec![gene_call(&[(1, "A", "G"), (2, "C", "C"), (3, "C", "C")])],
        );
        let json = report.to_json().unwrap();

        assert!(json.contains("\"input_file\": \"sample.vcf\""));
        assert!(json.contains("\"*1/*4a\""));

        // records round-trip
        let parsed: CallerReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.gene_calls.len(), 1);
        assert_eq!(parsed.gene_calls[0].gene, "CYP2C19");
    }
}
