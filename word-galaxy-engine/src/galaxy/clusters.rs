//! Cluster catalogue and palette lookup.

use bevy::color::Color;
use constants::palette::{NEUTRAL_LABEL_COLOUR, get_cluster_colour, hex_to_rgb};
use serde::Serialize;

use super::item::{ClusterKey, VisualizationItem};

/// One entry of the host's cluster selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterEntry {
    pub id: ClusterKey,
    pub label: String,
}

/// Distinct clusters in first-seen order. Unlabelled clusters get "Cluster <id>".
pub fn cluster_catalogue<'a>(
    items: impl IntoIterator<Item = &'a VisualizationItem>,
) -> Vec<ClusterEntry> {
    let mut entries: Vec<ClusterEntry> = Vec::new();

    for item in items {
        let Some(ref key) = item.cluster else {
            continue;
        };
        if entries.iter().any(|entry| entry.id.loosely_eq(key)) {
            continue;
        }
        let label = item
            .cluster_label
            .clone()
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| format!("Cluster {}", key));
        entries.push(ClusterEntry {
            id: key.clone(),
            label,
        });
    }

    entries
}

pub fn hex_colour(hex: u32) -> Color {
    let (r, g, b) = hex_to_rgb(hex);
    Color::srgb_u8(r, g, b)
}

/// Palette colour for a cluster; absent or unknown clusters are neutral.
pub fn cluster_colour(cluster: Option<&ClusterKey>) -> Color {
    let hex = cluster
        .and_then(ClusterKey::as_index)
        .map_or(NEUTRAL_LABEL_COLOUR, get_cluster_colour);
    hex_colour(hex)
}
