use crate::error::ExonMapError;
use crate::region::Region;
use crate::transcript::TranscriptRecord;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One entry from a UCSC UniProt annotation track (domains, structure,
/// localization, repeats). These tracks carry the same interval twice, as
/// chrom bounds and as thick bounds; the two must agree.
#[derive(Clone, Debug, Deserialize)]
pub struct AnnotationRecord {
    pub name: String,
    pub chrom: String,
    #[serde(rename = "chromStart")]
    pub chrom_start: u64,
    #[serde(rename = "chromEnd")]
    pub chrom_end: u64,
    #[serde(rename = "thickStart")]
    pub thick_start: u64,
    #[serde(rename = "thickEnd")]
    pub thick_end: u64,
    #[serde(rename = "uniProtId", default)]
    pub uni_prot_id: String,
}

impl AnnotationRecord {
    /// Decode into a region, failing loudly when the two coordinate
    /// representations disagree.
    pub fn region(&self) -> Result<Region, ExonMapError> {
        if self.chrom_start != self.thick_start || self.chrom_end != self.thick_end {
            return Err(ExonMapError::AnnotationIntegrity(format!(
                "annotation '{}' on {} reports chrom bounds {}..{} but thick bounds {}..{}",
                self.name,
                self.chrom,
                self.chrom_start,
                self.chrom_end,
                self.thick_start,
                self.thick_end
            )));
        }
        Region::new(
            self.name.clone(),
            self.chrom.clone(),
            self.chrom_start,
            self.chrom_end,
        )
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TrackEntry {
    pub name: String,
    pub regions: Vec<Region>,
}

/// Ordered mapping from track name to its regions. Insertion order is the
/// vertical render order; names are unique per collection.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct TrackMap {
    tracks: Vec<TrackEntry>,
}

impl TrackMap {
    pub fn push(
        &mut self,
        name: impl Into<String>,
        regions: Vec<Region>,
    ) -> Result<(), ExonMapError> {
        let name = name.into();
        if self.tracks.iter().any(|entry| entry.name == name) {
            return Err(ExonMapError::String(format!(
                "duplicate track name '{name}'"
            )));
        }
        self.tracks.push(TrackEntry { name, regions });
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackEntry> {
        self.tracks.iter()
    }

    pub fn regions(&self, name: &str) -> Option<&[Region]> {
        self.tracks
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.regions.as_slice())
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Regions for one annotation track: keep only entries for `protein_id`,
/// decode them, and order them by genomic start.
pub fn annotation_track(
    records: &[AnnotationRecord],
    protein_id: &str,
) -> Result<Vec<Region>, ExonMapError> {
    let regions: Vec<Region> = records
        .iter()
        .filter(|record| record.uni_prot_id == protein_id)
        .map(AnnotationRecord::region)
        .collect::<Result<_, _>>()?;
    Ok(regions
        .into_iter()
        .sorted_by_key(|region| (region.start(), region.end()))
        .collect())
}

/// Build the full track mapping for one transcript: exons first, then the
/// coding sequence, then each annotation track that has surviving entries.
pub fn assemble_tracks(
    transcript: &TranscriptRecord,
    annotations: &[(String, Vec<AnnotationRecord>)],
) -> Result<TrackMap, ExonMapError> {
    let mut map = TrackMap::default();
    map.push("exons", transcript.exon_regions()?)?;
    map.push("coding", vec![transcript.coding_region()?])?;
    if let Some(protein_id) = transcript.protein_id() {
        for (name, records) in annotations {
            let regions = annotation_track(records, protein_id)?;
            if !regions.is_empty() {
                map.push(name.clone(), regions)?;
            }
        }
    }
    Ok(map)
}
