use crate::error::ExonMapError;
use crate::fetch::Fetcher;
use crate::region::Strand;
use crate::tracks::{self, AnnotationRecord, TrackMap};
use crate::transcript::TranscriptRecord;
use log::info;
use serde::Deserialize;

pub const ENSEMBL_REST_BASE: &str = "https://rest.ensembl.org";
pub const UCSC_API_BASE: &str = "https://api.genome.ucsc.edu";
pub const SUPPORTED_ASSEMBLY: &str = "GRCh38";
pub const UCSC_GENOME: &str = "hg38";

/// UniProt annotation tracks retrieved per transcript, in render order:
/// domains, structure, the subcellular-localization categories, repeats.
pub const UNIPROT_TRACKS: [&str; 7] = [
    "unipDomain",
    "unipStruct",
    "unipLocSignal",
    "unipLocExtra",
    "unipLocTransMemb",
    "unipLocCytopl",
    "unipRepeat",
];

#[derive(Clone, Debug, Deserialize)]
struct EnsemblLookup {
    assembly_name: String,
    seq_region_name: String,
    start: u64,
    end: u64,
    version: u64,
}

/// Genomic window of a transcript as resolved by Ensembl.
#[derive(Clone, Debug)]
pub struct TranscriptLocus {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub version: u64,
}

/// Everything needed downstream of the pipeline: the track mapping plus the
/// transcript-relative offset the layout subtracts from every coordinate.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TranscriptTracks {
    pub transcript_id: String,
    pub chrom: String,
    pub strand: Strand,
    pub offset: u64,
    pub tracks: TrackMap,
}

/// Resolve a transcript accession to its genomic window via Ensembl.
/// Anything but the supported assembly is fatal.
pub fn lookup_locus(
    fetcher: &impl Fetcher,
    transcript_id: &str,
) -> Result<TranscriptLocus, ExonMapError> {
    let url =
        format!("{ENSEMBL_REST_BASE}/lookup/id/{transcript_id}?content-type=application/json");
    let lookup: EnsemblLookup = serde_json::from_value(fetcher.fetch(&url)?)?;
    if lookup.assembly_name != SUPPORTED_ASSEMBLY {
        return Err(ExonMapError::UnsupportedAssembly(lookup.assembly_name));
    }
    Ok(TranscriptLocus {
        chrom: lookup.seq_region_name,
        start: lookup.start,
        end: lookup.end,
        version: lookup.version,
    })
}

/// UCSC wants the "chr" spelling; Ensembl reports bare names like "X".
fn ucsc_chrom(chrom: &str) -> String {
    if chrom.starts_with("chr") {
        chrom.to_string()
    } else {
        format!("chr{chrom}")
    }
}

fn track_url(track: &str, locus: &TranscriptLocus) -> String {
    format!(
        "{UCSC_API_BASE}/getData/track?genome={UCSC_GENOME};track={track};chrom={};start={};end={}",
        ucsc_chrom(&locus.chrom),
        locus.start,
        locus.end
    )
}

/// Find the versioned transcript in the UCSC knownGene records for the locus.
pub fn fetch_transcript(
    fetcher: &impl Fetcher,
    locus: &TranscriptLocus,
    versioned_id: &str,
) -> Result<TranscriptRecord, ExonMapError> {
    let data = fetcher.fetch(&track_url("knownGene", locus))?;
    let records: Vec<TranscriptRecord> = match data.get("knownGene") {
        None | Some(serde_json::Value::Null) => vec![],
        Some(value) => serde_json::from_value(value.clone())?,
    };
    records
        .into_iter()
        .find(|ts| ts.name == versioned_id)
        .ok_or_else(|| ExonMapError::TranscriptNotFound(versioned_id.to_string()))
}

/// Fetch every UniProt annotation track over the locus, keeping the fixed
/// track order. Tracks the API reports as empty decode to empty lists.
pub fn fetch_annotation_tracks(
    fetcher: &impl Fetcher,
    locus: &TranscriptLocus,
) -> Result<Vec<(String, Vec<AnnotationRecord>)>, ExonMapError> {
    UNIPROT_TRACKS
        .iter()
        .map(|track| {
            let data = fetcher.fetch(&track_url(track, locus))?;
            let records: Vec<AnnotationRecord> = match data.get(*track) {
                None | Some(serde_json::Value::Null) => vec![],
                Some(value) => serde_json::from_value(value.clone())?,
            };
            Ok((track.to_string(), records))
        })
        .collect()
}

/// Run the whole pipeline for one transcript accession: Ensembl lookup,
/// knownGene record, UniProt tracks, assembled track mapping.
pub fn transcript_tracks(
    fetcher: &impl Fetcher,
    transcript_id: &str,
) -> Result<TranscriptTracks, ExonMapError> {
    let locus = lookup_locus(fetcher, transcript_id)?;
    let versioned_id = format!("{transcript_id}.{}", locus.version);
    info!(
        "{versioned_id} maps to {}:{}-{}",
        locus.chrom, locus.start, locus.end
    );
    let record = fetch_transcript(fetcher, &locus, &versioned_id)?;
    let annotations = fetch_annotation_tracks(fetcher, &locus)?;
    let tracks = tracks::assemble_tracks(&record, &annotations)?;
    Ok(TranscriptTracks {
        transcript_id: versioned_id,
        chrom: record.chrom.clone(),
        strand: record.strand,
        offset: record.chrom_start,
        tracks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    struct CannedFetcher {
        responses: HashMap<String, Value>,
    }

    impl CannedFetcher {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
            }
        }

        fn with(mut self, url_part: &str, value: Value) -> Self {
            self.responses.insert(url_part.to_string(), value);
            self
        }
    }

    impl Fetcher for CannedFetcher {
        fn fetch(&self, url: &str) -> Result<Value, ExonMapError> {
            self.responses
                .iter()
                .find(|(part, _)| url.contains(part.as_str()))
                .map(|(_, value)| value.clone())
                .ok_or(ExonMapError::Fetch {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn ensembl_response(assembly: &str) -> Value {
        json!({
            "assembly_name": assembly,
            "seq_region_name": "X",
            "start": 0,
            "end": 100,
            "version": 2,
            "biotype": "protein_coding"
        })
    }

    fn known_gene_response() -> Value {
        json!({
            "knownGene": [{
                "name": "ENST00000000000.2",
                "chrom": "chrX",
                "chromStart": 0,
                "chromEnd": 100,
                "strand": "+",
                "thickStart": 10,
                "thickEnd": 90,
                "chromStarts": "0,",
                "blockSizes": "100,",
                "geneName2": "none"
            }]
        })
    }

    fn fetcher() -> CannedFetcher {
        let mut canned = CannedFetcher::new()
            .with("lookup/id/ENST00000000000", ensembl_response(SUPPORTED_ASSEMBLY))
            .with("track=knownGene", known_gene_response());
        for track in UNIPROT_TRACKS {
            canned = canned.with(&format!("track={track}"), json!({ track: [] }));
        }
        canned
    }

    #[test]
    fn test_lookup_rejects_other_assemblies() {
        let canned =
            CannedFetcher::new().with("lookup/id/ENST1", ensembl_response("GRCh37"));
        let err = lookup_locus(&canned, "ENST1").unwrap_err();
        assert!(matches!(err, ExonMapError::UnsupportedAssembly(a) if a == "GRCh37"));
    }

    #[test]
    fn test_missing_transcript_is_fatal() {
        let canned = fetcher();
        let locus = lookup_locus(&canned, "ENST00000000000").unwrap();
        let err = fetch_transcript(&canned, &locus, "ENST99999999999.1").unwrap_err();
        assert!(matches!(err, ExonMapError::TranscriptNotFound(_)));
    }

    #[test]
    fn test_chrom_prefix_normalization() {
        assert_eq!(ucsc_chrom("X"), "chrX");
        assert_eq!(ucsc_chrom("chrX"), "chrX");
    }

    #[test]
    fn test_end_to_end_single_exon() {
        let result = transcript_tracks(&fetcher(), "ENST00000000000").unwrap();
        assert_eq!(result.transcript_id, "ENST00000000000.2");
        assert_eq!(result.offset, 0);
        assert_eq!(result.tracks.len(), 2);

        let exons = result.tracks.regions("exons").unwrap();
        assert_eq!(exons.len(), 1);
        assert_eq!(exons[0].name(), "1");
        assert_eq!((exons[0].start(), exons[0].end()), (0, 100));

        let coding = result.tracks.regions("coding").unwrap();
        assert_eq!(coding[0].name(), "CDS");
        assert_eq!((coding[0].start(), coding[0].end()), (10, 90));

        // Layout of this mapping: 2 rows, 2 rects, 2 labels, height 3H.
        let settings = crate::layout::LayoutSettings::default();
        let drawing = crate::layout::layout_tracks(&result.tracks, result.offset, &settings);
        assert_eq!(drawing.primitives.len(), 4);
        assert_eq!(drawing.height, 3.0 * settings.row_height);
    }

    #[test]
    fn test_annotation_tracks_filtered_by_protein() {
        let mut canned = CannedFetcher::new()
            .with("lookup/id/ENST00000000000", ensembl_response(SUPPORTED_ASSEMBLY))
            .with(
                "track=knownGene",
                json!({
                    "knownGene": [{
                        "name": "ENST00000000000.2",
                        "chrom": "chrX",
                        "chromStart": 0,
                        "chromEnd": 100,
                        "strand": "+",
                        "thickStart": 10,
                        "thickEnd": 90,
                        "chromStarts": "0,",
                        "blockSizes": "100,",
                        "geneName2": "P12345"
                    }]
                }),
            );
        for track in UNIPROT_TRACKS {
            let payload = if track == "unipDomain" {
                json!({ track: [
                    {"name": "Kinase", "chrom": "chrX", "chromStart": 40, "chromEnd": 60,
                     "thickStart": 40, "thickEnd": 60, "uniProtId": "P12345"},
                    {"name": "Kinase", "chrom": "chrX", "chromStart": 40, "chromEnd": 60,
                     "thickStart": 40, "thickEnd": 60, "uniProtId": "Q99999"}
                ]})
            } else {
                json!({ track: [] })
            };
            canned = canned.with(&format!("track={track}"), payload);
        }

        let result = transcript_tracks(&canned, "ENST00000000000").unwrap();
        let names: Vec<&str> = result.tracks.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["exons", "coding", "unipDomain"]);
        let domains = result.tracks.regions("unipDomain").unwrap();
        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].name(), "Kinase");
    }
}
