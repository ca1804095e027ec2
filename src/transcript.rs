use crate::error::ExonMapError;
use crate::region::{Region, Strand};
use serde::Deserialize;

/// One block-encoded transcript record from the UCSC `knownGene` track.
///
/// `chromStarts` holds exon offsets relative to `chromStart`, `blockSizes` the
/// matching exon lengths; both are comma-separated with a tolerated trailing
/// comma. `thickStart`/`thickEnd` bound the coding sequence.
#[derive(Clone, Debug, Deserialize)]
pub struct TranscriptRecord {
    pub name: String,
    pub chrom: String,
    #[serde(rename = "chromStart")]
    pub chrom_start: u64,
    #[serde(rename = "chromEnd", default)]
    pub chrom_end: u64,
    pub strand: Strand,
    #[serde(rename = "thickStart")]
    pub thick_start: u64,
    #[serde(rename = "thickEnd")]
    pub thick_end: u64,
    #[serde(rename = "chromStarts")]
    pub chrom_starts: String,
    #[serde(rename = "blockSizes")]
    pub block_sizes: String,
    #[serde(rename = "geneName2", default)]
    pub gene_name2: Option<String>,
}

impl TranscriptRecord {
    /// UniProt accession associated with this transcript, if any.
    /// UCSC reports the literal string "none" for non-coding entries.
    pub fn protein_id(&self) -> Option<&str> {
        match self.gene_name2.as_deref() {
            None | Some("") | Some("none") => None,
            Some(id) => Some(id),
        }
    }

    /// Decode the block encoding into absolute exon regions, labeled 1-based
    /// in transcription order (reversed on the minus strand).
    pub fn exon_regions(&self) -> Result<Vec<Region>, ExonMapError> {
        let offsets = csv_to_u64(&self.chrom_starts)?;
        let sizes = csv_to_u64(&self.block_sizes)?;
        if offsets.len() != sizes.len() {
            return Err(ExonMapError::MalformedEncoding(format!(
                "transcript '{}' has {} chromStarts but {} blockSizes",
                self.name,
                offsets.len(),
                sizes.len()
            )));
        }
        let count = offsets.len();
        offsets
            .iter()
            .zip(&sizes)
            .enumerate()
            .map(|(i, (offset, size))| {
                let start = self.chrom_start + offset;
                Region::new(
                    exon_label(i + 1, count, self.strand),
                    self.chrom.clone(),
                    start,
                    start + size,
                )
            })
            .collect()
    }

    /// The coding sequence as a single region named "CDS".
    pub fn coding_region(&self) -> Result<Region, ExonMapError> {
        Region::new("CDS", self.chrom.clone(), self.thick_start, self.thick_end)
    }
}

/// Label for the exon at 1-based `position` out of `count` blocks ordered by
/// genomic coordinate. Exon 1 is always the first exon read 5'-to-3', which on
/// the minus strand is the rightmost block.
pub fn exon_label(position: usize, count: usize, strand: Strand) -> String {
    match strand {
        Strand::Forward => position.to_string(),
        Strand::Reverse => (count - position + 1).to_string(),
    }
}

/// Parse a comma-separated integer list, tolerating a trailing comma.
pub fn csv_to_u64(text: &str) -> Result<Vec<u64>, ExonMapError> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u64>().map_err(|e| {
                ExonMapError::MalformedEncoding(format!("bad integer '{token}' in block list: {e}"))
            })
        })
        .collect()
}
