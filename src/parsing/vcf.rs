//! Parser for per-sample VCF genotype calls.
//!
//! Reads VCF data rows as text and resolves the first sample's `GT` field
//! into called allele strings:
//!
//! `chr10  94762706  rs12248560  C  T  .  PASS  .  GT  0|1`
//!
//! yields a phased `C|T` call with VCF alleles `[C, T]`.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::core::sample::SampleAllele;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid VCF format: {0}")]
    InvalidFormat(String),

    #[error("duplicate VCF record for {chromosome}:{position}")]
    DuplicatePosition { chromosome: String, position: u64 },
}

/// One sample's genotype calls, keyed by (chromosome, position).
#[derive(Debug, Default)]
pub struct SampleGenotypes {
    alleles: BTreeMap<(String, u64), SampleAllele>,
}

impl SampleGenotypes {
    /// The call at a site, if the input had one.
    #[must_use]
    pub fn get(&self, chromosome: &str, position: u64) -> Option<&SampleAllele> {
        self.alleles.get(&(chromosome.to_string(), position))
    }

    /// All calls on one chromosome, keyed by position: the shape the
    /// match dataset consumes.
    #[must_use]
    pub fn for_chromosome(&self, chromosome: &str) -> BTreeMap<u64, SampleAllele> {
        self.alleles
            .iter()
            .filter(|((chrom, _), _)| chrom == chromosome)
            .map(|((_, position), allele)| (*position, allele.clone()))
            .collect()
    }

    /// Number of called sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alleles.len()
    }

    /// Check if no sites were called.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alleles.is_empty()
    }

    /// Add a call, failing on a duplicate site.
    fn insert(&mut self, allele: SampleAllele) -> Result<(), ParseError> {
        let key = (allele.chromosome.clone(), allele.position);
        if self.alleles.contains_key(&key) {
            return Err(ParseError::DuplicatePosition {
                chromosome: allele.chromosome,
                position: allele.position,
            });
        }
        self.alleles.insert(key, allele);
        Ok(())
    }
}

/// Parse a VCF file (plain, `.vcf.gz`, or `.vcf.bgz`) and extract the
/// first sample's genotype calls.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse
/// errors if the content is invalid.
pub fn parse_vcf_file(path: &Path) -> Result<SampleGenotypes, ParseError> {
    let path_str = path.to_string_lossy().to_lowercase();
    let content = if path_str.ends_with(".vcf.gz") || path_str.ends_with(".vcf.bgz") {
        let file = std::fs::File::open(path)?;
        let mut decoder = flate2::read::GzDecoder::new(file);
        let mut text = String::new();
        decoder.read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(path)?
    };
    parse_vcf_text(&content)
}

/// Parse VCF text and extract the first sample's genotype calls.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for rows without a sample column,
/// out-of-range GT allele indices, or unparseable positions, and
/// `ParseError::DuplicatePosition` when a site appears twice.
pub fn parse_vcf_text(text: &str) -> Result<SampleGenotypes, ParseError> {
    let mut genotypes = SampleGenotypes::default();

    for line in text.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(allele) = parse_record(line)? {
            genotypes.insert(allele)?;
        }
    }

    Ok(genotypes)
}

/// Parse a single VCF data row into a sample call.
///
/// Returns `Ok(None)` for rows that carry no usable diploid genotype
/// (no-call, half-call, haploid or polyploid GT); those sites are
/// reported as missing downstream rather than guessed at.
fn parse_record(line: &str) -> Result<Option<SampleAllele>, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 10 {
        return Err(ParseError::InvalidFormat(format!(
            "data row has {} columns, expected at least 10 (FORMAT + one sample): {line}",
            fields.len()
        )));
    }

    let chromosome = fields[0];
    let position: u64 = fields[1]
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("invalid position '{}'", fields[1])))?;
    let reference = fields[3];
    let alt = fields[4];

    // REF plus each ALT allele present at the site
    let mut site_alleles: Vec<String> = vec![reference.to_string()];
    if alt != "." {
        site_alleles.extend(alt.split(',').map(ToString::to_string));
    }

    let Some(gt_index) = fields[8].split(':').position(|key| key == "GT") else {
        warn!("{chromosome}:{position}: no GT field, skipping");
        return Ok(None);
    };
    let Some(gt) = fields[9].split(':').nth(gt_index) else {
        warn!("{chromosome}:{position}: sample column missing GT value, skipping");
        return Ok(None);
    };

    let phased = gt.contains('|');
    let calls: Vec<&str> = gt.split(['|', '/']).collect();
    if calls.len() != 2 {
        warn!("{chromosome}:{position}: non-diploid genotype '{gt}', skipping");
        return Ok(None);
    }
    if calls.iter().any(|call| *call == ".") {
        warn!("{chromosome}:{position}: missing genotype '{gt}', skipping");
        return Ok(None);
    }

    let mut resolved = Vec::with_capacity(2);
    for call in calls {
        let index: usize = call.parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "{chromosome}:{position}: invalid GT allele index '{call}'"
            ))
        })?;
        let allele = site_alleles.get(index).ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "{chromosome}:{position}: GT index {index} out of range for {} alleles",
                site_alleles.len()
            ))
        })?;
        resolved.push(allele.clone());
    }

    Ok(Some(SampleAllele::new(
        chromosome,
        position,
        resolved[0].clone(),
        resolved[1].clone(),
        phased,
        site_alleles,
    )))
}
