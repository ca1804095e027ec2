use crate::tracks::TrackMap;
use serde::{Deserialize, Serialize};

/// Kelly's 20 colors of maximum contrast, cycled across tracks.
pub const KELLY_COLORS: [&str; 20] = [
    "#F3C300", "#875692", "#F38400", "#A1CAF1", "#BE0032", "#C2B280", "#848482", "#008856",
    "#E68FAC", "#0067A5", "#F99379", "#604E97", "#F6A600", "#B3446C", "#DCD300", "#882D17",
    "#8DB600", "#654522", "#E25822", "#2B3D26",
];

/// Constants for the track sweep. The palette is part of the settings so
/// coloring is deterministic without any module-level state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Height of one track row; rows are spaced two row heights apart.
    pub row_height: f64,
    /// Left-hand offset reserved for track labels.
    pub left_margin: f64,
    /// Linear factor from genomic bases to drawing units.
    pub scale: f64,
    /// Ordered fill colors, reused cyclically; track `t` gets entry `t % len`.
    pub palette: Vec<String>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            row_height: 20.0,
            left_margin: 60.0,
            scale: 0.01,
            palette: KELLY_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Drawing-space primitive; carries no genomic semantics.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
    },
}

/// Ordered primitive list plus canvas extent. List order is paint order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

/// Map the track mapping onto drawing coordinates: one horizontal row per
/// track in insertion order, one fill rectangle per region followed by its
/// centered label. `offset` is the transcript's own chromStart, so all
/// x positions are relative to the transcript rather than the genome.
pub fn layout_tracks(tracks: &TrackMap, offset: u64, settings: &LayoutSettings) -> Drawing {
    let h = settings.row_height;
    let mut primitives = Vec::new();
    let mut y_pos = 0.0;
    let mut x_max = 0.0_f64;
    let mut y_max = 0.0_f64;

    for (t, entry) in tracks.iter().enumerate() {
        let fill = if settings.palette.is_empty() {
            "#000000".to_string()
        } else {
            settings.palette[t % settings.palette.len()].clone()
        };
        for region in &entry.regions {
            let x = settings.left_margin
                + (region.start() as f64 - offset as f64) * settings.scale;
            let width = region.size() as f64 * settings.scale;
            primitives.push(Primitive::Rect {
                x,
                y: y_pos,
                width,
                height: h,
                fill: fill.clone(),
            });
            primitives.push(Primitive::Text {
                x: x + width / 2.0,
                y: y_pos + 0.85 * h,
                text: region.name().to_string(),
            });
            x_max = x_max.max(x + width);
        }
        y_max = y_pos + h;
        y_pos += 2.0 * h;
    }

    Drawing {
        width: x_max + settings.left_margin,
        height: y_max,
        primitives,
    }
}
