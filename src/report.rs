use crate::error::ExonMapError;
use crate::lookup::TranscriptTracks;
use std::fmt::Write;

/// Plain-text listing of every track and its regions.
pub fn text_report(result: &TranscriptTracks) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}, {} strand)",
        result.transcript_id, result.chrom, result.strand
    );
    for entry in result.tracks.iter() {
        let _ = writeln!(out, "---------- {} ----------", entry.name.to_uppercase());
        for region in &entry.regions {
            let _ = writeln!(out, "{}\t{}", region.name(), region);
        }
    }
    out
}

/// Pretty-printed JSON of the full track mapping.
pub fn json_report(result: &TranscriptTracks) -> Result<String, ExonMapError> {
    Ok(serde_json::to_string_pretty(result)?)
}
