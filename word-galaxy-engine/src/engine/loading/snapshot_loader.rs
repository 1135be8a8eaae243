use bevy::asset::LoadState;
use bevy::prelude::*;
use serde::Deserialize;

use crate::api::GalaxyControl;
use crate::engine::core::app_state::{AppState, GalaxyData};
use crate::engine::core::settings::GalaxySettings;
use crate::galaxy::item::{WordRecord, items_from_records};

/// Static word collection exported for guests, as a JSON array of word records.
#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
#[serde(transparent)]
pub struct GalaxySnapshot {
    pub words: Vec<WordRecord>,
}

#[derive(Resource, Default)]
pub struct SnapshotLoader {
    handle: Option<Handle<GalaxySnapshot>>,
}

pub fn start_snapshot_loading(
    mut loader: ResMut<SnapshotLoader>,
    settings: Res<GalaxySettings>,
    asset_server: Res<AssetServer>,
) {
    if let Some(ref path) = settings.snapshot_path {
        info!("Loading galaxy snapshot from: {}", path);
        loader.handle = Some(asset_server.load(path));
    }
}

/// Apply the snapshot once loaded, then start running. Host data that arrived
/// first wins over the snapshot.
pub fn poll_snapshot_loading(
    mut commands: Commands,
    loader: Res<SnapshotLoader>,
    asset_server: Res<AssetServer>,
    snapshots: Res<Assets<GalaxySnapshot>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(ref handle) = loader.handle else {
        info!("No snapshot configured, waiting for host data");
        next_state.set(AppState::Running);
        return;
    };

    if let Some(snapshot) = snapshots.get(handle) {
        let items = items_from_records(snapshot.words.clone());
        info!("✓ Snapshot loaded: {} words", items.len());
        commands.queue(move |world: &mut World| {
            if world.resource::<GalaxyData>().generation == 0 {
                world.update_data(items);
            } else {
                debug!("Host data already present, snapshot ignored");
            }
        });
        next_state.set(AppState::Running);
    } else if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        warn!("Snapshot failed to load, starting empty: {}", err);
        next_state.set(AppState::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_guest_snapshot_parses() {
        let snapshot: GalaxySnapshot = serde_json::from_str(include_str!(
            "../../../assets/data/guest_galaxy.galaxy.json"
        ))
        .unwrap();
        let items = items_from_records(snapshot.words);

        assert_eq!(items.len(), 7);
        assert!(items.iter().all(|item| !item.display_text.is_empty()));
        let school = items.iter().find(|item| item.id == 7).unwrap();
        assert_eq!(school.cluster, None);
        assert_eq!(school.srs_level_or_default(), 0);
        assert_eq!(school.component_parts, vec!["โรง", "เรียน"]);
    }
}
