//! Floating word labels drawn as a UI overlay above the 3D scene.
//!
//! Each visible word owns exactly one [`OverlayLabel`] entity. Labels are
//! never edited across syncs: a change of data or filters despawns the whole
//! set and spawns a fresh one.

use std::sync::Arc;

use bevy::asset::LoadState;
use bevy::prelude::*;

use constants::render_settings::SYSTEM_LABEL_FONT_PATHS;

use crate::engine::core::settings::GalaxySettings;
use crate::galaxy::item::VisualizationItem;

/// Screen placement, depth ordering and behind-camera hiding.
pub mod projection;

/// Distance-based opacity applied every frame.
pub mod shading;

/// Reconciles the overlay entities with the filtered collection.
pub mod sync;

/// One rendered word. Bound to its item for the lifetime of the entity.
#[derive(Component, Debug, Clone)]
pub struct OverlayLabel {
    pub item: Arc<VisualizationItem>,
    pub world_position: Vec3,
    /// Cluster palette colour before shading.
    pub colour: Color,
    pub opacity: f32,
    /// Data generation the label was spawned from.
    pub generation: u64,
    /// Index in the collection, kept for stable draw order on ties.
    pub order: usize,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct LabelStyle {
    pub font: Handle<Font>,
    pub font_size: f32,
}

impl LabelStyle {
    pub fn text_font(&self) -> TextFont {
        TextFont {
            font: self.font.clone(),
            font_size: self.font_size,
            ..default()
        }
    }
}

pub fn load_label_font(
    asset_server: Res<AssetServer>,
    settings: Res<GalaxySettings>,
    mut style: ResMut<LabelStyle>,
) {
    style.font_size = settings.label_font_size;
    if let Some(ref path) = settings.label_font_path {
        info!("Loading label font: {}", path);
        style.font = asset_server.load(path);
    }
}

/// Replace a label font that failed to load.
///
/// Native builds try the installed Thai-capable fonts first; Bevy's built-in
/// font is the last resort and has no Thai glyphs.
pub fn fallback_on_missing_font(
    asset_server: Res<AssetServer>,
    mut font_assets: ResMut<Assets<Font>>,
    mut style: ResMut<LabelStyle>,
    mut labels: Query<&mut TextFont, With<OverlayLabel>>,
) {
    if style.font == Handle::default() {
        return;
    }
    let LoadState::Failed(err) = asset_server.load_state(style.font.id()) else {
        return;
    };

    style.font = match find_installed_font(SYSTEM_LABEL_FONT_PATHS) {
        Some((path, font)) => {
            warn!("Label font unavailable ({}), using installed {}", err, path);
            font_assets.add(font)
        }
        None => {
            warn!("Label font unavailable, using default font: {}", err);
            Handle::default()
        }
    };
    for mut font in &mut labels {
        font.font = style.font.clone();
    }
}

/// First candidate that exists on disk and parses as a font face.
pub fn find_installed_font<'a>(candidates: &[&'a str]) -> Option<(&'a str, Font)> {
    if cfg!(target_arch = "wasm32") {
        return None;
    }
    candidates.iter().find_map(|&path| {
        let bytes = std::fs::read(path).ok()?;
        match Font::try_from_bytes(bytes) {
            Ok(font) => Some((path, font)),
            Err(err) => {
                debug!("Skipping unreadable font {}: {}", path, err);
                None
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_candidates_yield_nothing() {
        assert!(find_installed_font(&["/nonexistent/galaxy/Thai.ttf"]).is_none());
    }

    #[test]
    fn files_that_are_not_fonts_are_skipped() {
        let path = std::env::temp_dir().join("word_galaxy_not_a_font.ttf");
        std::fs::write(&path, b"plain text, no font tables").unwrap();
        let candidate = path.to_str().unwrap();

        assert!(find_installed_font(&[candidate]).is_none());
        let _ = std::fs::remove_file(&path);
    }
}
